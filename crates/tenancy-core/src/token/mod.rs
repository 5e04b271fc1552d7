//! Token codec - generation, normalization, and one-way digests

mod codec;

pub use codec::{
    digests_match, generate_salt, generate_token, lookup_digest, normalize, verification_digest,
    TokenCandidate, TokenCodecError, SALT_BYTES, TOKEN_ALPHABET, TOKEN_LENGTH,
};
