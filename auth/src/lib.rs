//! Authentication primitives for the account service
//!
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256 JWT)
//!
//! Neither primitive reads the system clock or any global state: the signing
//! secret is passed in at construction and the current instant at every call.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenCodec, TokenError};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let now = Utc::now();
//! let token = codec.issue("alice", now).unwrap();
//!
//! assert_eq!(codec.verify(&token, now).unwrap(), "alice");
//! assert_eq!(
//!     codec.verify(&token, now + Duration::days(15)),
//!     Err(TokenError::Expired)
//! );
//! ```

pub mod jwt;
pub mod password;

pub use jwt::SessionClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::DEFAULT_TOKEN_VALIDITY_DAYS;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
