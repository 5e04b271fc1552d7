//! Row ↔ entity mappers

mod invite;

pub use invite::delivery_method_to_str;
