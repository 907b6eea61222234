use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Default lifetime of an issued session token.
pub const DEFAULT_TOKEN_VALIDITY_DAYS: i64 = 14;

/// Secrets that are refused even though they are non-empty.
const INSECURE_SECRETS: &[&str] = &["secret-key", "secret", "changeme"];

/// Session token codec.
///
/// Signs `{sub, iat, exp}` claims into a compact HS256 JWT and verifies them
/// back. The codec never reads the system clock: every call takes `now`
/// explicitly, so expiry is fully determined by the caller.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    ///
    /// # Returns
    /// TokenCodec configured with HS256 and a 14 day validity
    ///
    /// # Errors
    /// * `Configuration` - Secret is empty or a known placeholder
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Configuration(
                "signing secret must not be empty".to_string(),
            ));
        }
        if INSECURE_SECRETS.iter().any(|s| s.as_bytes() == secret) {
            return Err(TokenError::Configuration(
                "signing secret is a known placeholder".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity: Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS),
        })
    }

    /// Override the token lifetime.
    ///
    /// # Errors
    /// * `Configuration` - Lifetime is zero or negative
    pub fn with_validity(mut self, validity: Duration) -> Result<Self, TokenError> {
        if validity <= Duration::zero() {
            return Err(TokenError::Configuration(format!(
                "token lifetime must be positive, got {}",
                validity
            )));
        }

        self.validity = validity;
        Ok(self)
    }

    /// Issue a signed token for `subject`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    /// * `Encoding` - Signing failed or the expiry is out of range
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims::for_subject(subject, now, self.validity)?;
        self.encode_claims(&claims)
    }

    /// Verify a token at instant `now` and return its subject.
    ///
    /// Checks run in order: structure, signature, expiry, subject.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or uses another algorithm
    /// * `BadSignature` - Signature does not match under this secret
    /// * `Expired` - `now` is at or past the `exp` claim
    /// * `MissingSubject` - Token has no usable `sub` claim
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock below, with no leeway.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        claims
            .subject()
            .map(str::to_string)
            .ok_or(TokenError::MissingSubject)
    }

    fn encode_claims(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key).map_err(|e| TokenError::Encoding(e.to_string()))
    }
}
