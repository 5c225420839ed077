//! Breached password lookups against the Pwned Passwords range API.
//!
//! This library implements the k-anonymity side of a breach check: a password is
//! hashed to a SHA-1 [`PasswordFingerprint`], only the first five hex characters of
//! that digest are sent to the remote corpus, and the returned `SUFFIX:COUNT` list is
//! matched locally against the retained 35-character suffix.
//!
//! The password itself, and the full digest, never leave the process. The remote
//! side only learns that the password is one of the (hundreds of) digests sharing the
//! queried prefix, and with padding enabled it cannot tell from the response size
//! which bucket was requested.
//!
//! # Example
//!
//! ```no_run
//! use pwned_range::{ClientConfig, RangeClient, check_password};
//!
//! # async fn run() -> Result<(), pwned_range::Error> {
//! let client = RangeClient::new(ClientConfig::from_env())?;
//! let result = check_password(&client, "password123").await?;
//! if result.breached {
//!     println!("seen {} times", result.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod fingerprint;
pub mod range;

pub use client::{ClientConfig, RangeClient, RangeTransport, check_password};
pub use error::{Error, FailureKind};
pub use fingerprint::{PasswordFingerprint, digest};
pub use range::{BreachQueryResult, is_valid_prefix, parse_range_body};

/// The length of a SHA1 hash prefix sent to the range endpoint (5 hex characters).
pub const PREFIX_LEN: usize = 5;

/// The length of the hash suffix retained locally (35 hex characters).
pub const SUFFIX_LEN: usize = 35;

/// Length of a full SHA1 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = PREFIX_LEN + SUFFIX_LEN;

/// Hex lookup table for digest encoding.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";
