//! Stateless token codec
//!
//! Generates the plaintext tokens landlords hand to tenants and computes the
//! one-way digests under which they are stored. The plaintext itself is never
//! persisted; the store keys records by a deterministic lookup digest and
//! additionally holds a per-record salted verification digest that is
//! re-checked after load.
//!
//! Canonical normalization: trim ASCII whitespace, then lowercase. It is
//! applied identically when digesting at generation and validation time, so a
//! transport that mangles case cannot break redemption. Tokens are displayed
//! mixed-case; the post-fold alphabet still leaves 36^12 possible values.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of every issued token, in characters
pub const TOKEN_LENGTH: usize = 12;

/// Alphabet tokens are drawn from: URL-safe, no encoding ever required
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the per-record salt, in bytes
pub const SALT_BYTES: usize = 16;

/// Codec errors - only storage corruption can produce these
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenCodecError {
    #[error("stored token salt is not valid base64")]
    MalformedSalt,
}

/// Generate a fresh plaintext token from the OS entropy source.
///
/// `OsRng` reads the operating system CSPRNG directly and fails loudly if it
/// is unavailable; there is no fallback to a non-cryptographic generator.
#[must_use]
pub fn generate_token() -> String {
    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = OsRng.gen_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a per-record random salt, base64-encoded for storage
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Canonical form of a candidate token: trimmed and ASCII-lowercased
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Deterministic digest used to address a record: SHA-256 of the normalized
/// token, base64-encoded. Unique-indexed by the store.
#[must_use]
pub fn lookup_digest(normalized: &str) -> String {
    let digest = Sha256::digest(normalized.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// Salted digest persisted in the record: SHA-256 of salt-bytes ‖ normalized
/// token, base64-encoded. Deterministic for a given salt.
pub fn verification_digest(normalized: &str, salt: &str) -> Result<String, TokenCodecError> {
    let salt_bytes = URL_SAFE_NO_PAD
        .decode(salt)
        .map_err(|_| TokenCodecError::MalformedSalt)?;

    let mut hasher = Sha256::new();
    hasher.update(&salt_bytes);
    hasher.update(normalized.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(hasher.finalize()))
}

/// Constant-time digest comparison
#[must_use]
pub fn digests_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// A candidate token as presented by a caller, parsed once up front.
///
/// Parsing always yields a normalized string so the read path can perform the
/// same digest-and-load work for well-formed and malformed input alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCandidate {
    normalized: String,
    well_formed: bool,
}

impl TokenCandidate {
    /// Parse a raw candidate string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let well_formed =
            trimmed.len() == TOKEN_LENGTH && trimmed.bytes().all(|b| b.is_ascii_alphanumeric());

        Self {
            normalized: normalize(raw),
            well_formed,
        }
    }

    /// Canonical form of the candidate
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether the candidate has the shape of an issued token
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// Lookup digest of the candidate
    #[must_use]
    pub fn lookup_digest(&self) -> String {
        lookup_digest(&self.normalized)
    }
}
