use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::Error;
use crate::{DIGEST_HEX_LEN, HEX_CHARS, PREFIX_LEN};

/// The SHA-1 digest of a password, rendered as 40 uppercase hex characters.
///
/// The first [`PREFIX_LEN`] characters are the only part that is ever sent to the
/// range endpoint. The remaining suffix stays local and is used to match records in
/// the response.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordFingerprint {
    hex: [u8; DIGEST_HEX_LEN],
}

impl PasswordFingerprint {
    /// Hashes `password` and returns its fingerprint.
    pub fn compute(password: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password.as_bytes());
        let hash: [u8; 20] = hasher.finalize().into();

        Self::from_digest(&hash)
    }

    #[inline(always)]
    pub(crate) fn from_digest(hash: &[u8; 20]) -> Self {
        let mut hex = [0u8; DIGEST_HEX_LEN];
        for (i, byte) in hash.iter().enumerate() {
            hex[i * 2] = HEX_CHARS[(byte >> 4) as usize];
            hex[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
        }

        Self { hex }
    }

    /// The full 40 character digest.
    pub fn as_str(&self) -> &str {
        // SAFETY: `hex` only ever holds bytes taken from HEX_CHARS, which is ASCII.
        unsafe { std::str::from_utf8_unchecked(&self.hex) }
    }

    /// The disclosable part of the digest (first 5 hex characters).
    pub fn prefix(&self) -> &str {
        &self.as_str()[..PREFIX_LEN]
    }

    /// The locally retained part of the digest (last 35 hex characters).
    pub fn suffix(&self) -> &str {
        &self.as_str()[PREFIX_LEN..]
    }
}

impl fmt::Display for PasswordFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Only the prefix is printed so a stray `{:?}` cannot leak the full digest into logs.
impl fmt::Debug for PasswordFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordFingerprint")
            .field("prefix", &self.prefix())
            .finish_non_exhaustive()
    }
}

/// Computes the fingerprint of `password` on tokio's blocking pool.
///
/// Fails with [`Error::HashingUnavailable`] when the hashing job cannot be run to
/// completion, for example while the runtime is shutting down.
pub async fn digest(password: &str) -> Result<PasswordFingerprint, Error> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || PasswordFingerprint::compute(&password))
        .await
        .map_err(|_| Error::HashingUnavailable)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn is_upper_hex(s: &str) -> bool {
        s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F'))
    }

    #[test]
    fn test_compute_known_digest() {
        // password123 -> SHA1: CBFDAC6008F9CAB4083784CBD1874F76618D2A97
        let fingerprint = PasswordFingerprint::compute("password123");

        assert_eq!(fingerprint.as_str(), "CBFDAC6008F9CAB4083784CBD1874F76618D2A97");
        assert_eq!(fingerprint.prefix(), "CBFDA");
        assert_eq!(fingerprint.suffix(), "C6008F9CAB4083784CBD1874F76618D2A97");
    }

    #[test]
    fn test_from_digest_encoding() {
        let raw = hex!("5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        let fingerprint = PasswordFingerprint::from_digest(&raw);

        assert_eq!(fingerprint, PasswordFingerprint::compute("password"));
        assert_eq!(fingerprint.to_string(), "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
    }

    #[test]
    fn test_compute_is_deterministic() {
        for password in ["", "a", "password1", "hAwT?}cuC:r#kW5", "pässwörd"] {
            assert_eq!(
                PasswordFingerprint::compute(password),
                PasswordFingerprint::compute(password)
            );
        }
    }

    #[test]
    fn test_output_shape() {
        for password in ["", "x", "correct horse battery staple", "\u{1F512}"] {
            let fingerprint = PasswordFingerprint::compute(password);
            assert_eq!(fingerprint.as_str().len(), DIGEST_HEX_LEN);
            assert!(is_upper_hex(fingerprint.as_str()), "{fingerprint}");
            assert_eq!(fingerprint.prefix().len(), PREFIX_LEN);
            assert_eq!(fingerprint.suffix().len(), crate::SUFFIX_LEN);
        }
    }

    #[test]
    fn test_debug_hides_suffix() {
        let fingerprint = PasswordFingerprint::compute("password123");
        let debug = format!("{fingerprint:?}");

        assert!(debug.contains("CBFDA"));
        assert!(!debug.contains(fingerprint.suffix()));
    }

    #[tokio::test]
    async fn test_digest_matches_compute() {
        let first = digest("password1").await.unwrap();
        let second = digest("password1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.as_str(), "E38AD214943DAAD1D64C102FAEC29DE4AFE9DA3D");
    }
}
