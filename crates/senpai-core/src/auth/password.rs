//! Password hashing and verification.
//!
//! Stored records have the shape `derived-key-hex.salt-hex`: a 64-byte
//! scrypt-derived key and a 16-byte random salt, both lowercase hex. The
//! salt fed to the KDF is the hex *string* (32 ASCII bytes), which is also
//! what the stored record carries, so a record is self-contained.
//!
//! scrypt parameters are N=2^14, r=8, p=1 -- memory-hard on purpose; a fast
//! general-purpose hash here would be a correctness violation, not a style
//! choice.

use rand_core::{OsRng, RngCore};
use scrypt::Params;

use senpai_types::error::CredentialError;

/// Random salt length in bytes (32 hex chars once encoded).
const SALT_LEN: usize = 16;

/// Derived key length in bytes (64 hex chars once encoded).
const DERIVED_KEY_LEN: usize = 64;

/// log2 of the scrypt CPU/memory cost parameter N.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

fn scrypt_params() -> Params {
    // Parameters are compile-time constants; construction cannot fail.
    Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, DERIVED_KEY_LEN)
        .expect("scrypt parameters are valid")
}

/// Hash a password into a stored record.
///
/// Draws a fresh random salt each call, so hashing the same password twice
/// yields different records.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let salt_hex = hex_encode(&salt);

    let mut derived = [0u8; DERIVED_KEY_LEN];
    scrypt::scrypt(
        password.as_bytes(),
        salt_hex.as_bytes(),
        &scrypt_params(),
        &mut derived,
    )
    .map_err(|_| CredentialError::Derivation)?;

    Ok(format!("{}.{salt_hex}", hex_encode(&derived)))
}

/// Verify a supplied password against a stored record.
///
/// Fails closed: any malformed record (missing separator, invalid hex,
/// wrong derived-key length) returns `false` rather than erroring into the
/// request path. The comparison of the derived keys is constant-time.
pub fn verify_password(supplied: &str, stored: &str) -> bool {
    let Some((hash_hex, salt_hex)) = stored.split_once('.') else {
        return false;
    };
    let Ok(stored_hash) = hex_decode(hash_hex) else {
        return false;
    };
    if stored_hash.len() != DERIVED_KEY_LEN {
        return false;
    }

    let mut derived = [0u8; DERIVED_KEY_LEN];
    if scrypt::scrypt(
        supplied.as_bytes(),
        salt_hex.as_bytes(),
        &scrypt_params(),
        &mut derived,
    )
    .is_err()
    {
        return false;
    }

    constant_time_eq(&derived, &stored_hash)
}

/// Constant-time byte comparison (XOR-based).
///
/// Returns true if and only if `a == b`. Time taken is independent of
/// how many bytes match (mitigates timing attacks).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Encode bytes to a lowercase hex string.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Result<Vec<u8>, ()> {
    if hex.len() % 2 != 0 {
        return Err(());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let record = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &record));
    }

    #[test]
    fn wrong_password_fails() {
        let record = hash_password("hunter2").unwrap();
        assert!(!verify_password("hunter3", &record));
        assert!(!verify_password("", &record));
    }

    #[test]
    fn record_shape_is_hash_dot_salt() {
        let record = hash_password("pw").unwrap();
        let (hash_hex, salt_hex) = record.split_once('.').unwrap();
        assert_eq!(hash_hex.len(), DERIVED_KEY_LEN * 2);
        assert_eq!(salt_hex.len(), SALT_LEN * 2);
        assert!(record.chars().all(|c| c.is_ascii_hexdigit() || c == '.'));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_records_fail_closed() {
        // No separator
        assert!(!verify_password("pw", "deadbeef"));
        // Empty record
        assert!(!verify_password("pw", ""));
        // Non-hex hash part
        assert!(!verify_password("pw", "zzzz.deadbeef"));
        // Odd-length hex
        assert!(!verify_password("pw", "abc.deadbeef"));
        // Hash part with the wrong byte length
        assert!(!verify_password("pw", "deadbeef.cafebabe"));
        // Trailing separator only
        assert!(!verify_password("pw", "."));
    }

    #[test]
    fn constant_time_eq_basic() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn hex_round_trip() {
        let bytes = [0x00, 0x0f, 0xff, 0x10];
        let encoded = hex_encode(&bytes);
        assert_eq!(encoded, "000fff10");
        assert_eq!(hex_decode(&encoded).unwrap(), bytes);
    }
}
