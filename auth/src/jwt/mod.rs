pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::SessionClaims;
pub use codec::TokenCodec;
pub use codec::DEFAULT_TOKEN_VALIDITY_DAYS;
pub use errors::TokenError;
