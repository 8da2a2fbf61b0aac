//! Stateless JWT encode/decode against stored key material.

use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::key_pair::KeyPair;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies JWTs.
///
/// The codec holds no key material; every call is given the key(s) to use.
/// Verification accepts a token signed by any key in the provided set, which
/// is what keeps tokens valid across a key rotation.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    config: TokenServiceConfig,
}

impl TokenCodec {
    /// Creates a codec with the given claim expectations.
    pub fn new(config: TokenServiceConfig) -> Self {
        Self { config }
    }

    /// Signs claims with the given key, embedding its `kid` in the header.
    pub fn sign(&self, claims: &Claims, key: &KeyPair) -> Result<String, DomainError> {
        let mut header = Header::new(key.algorithm.to_jwt_algorithm());
        header.kid = Some(key.key_id.clone());

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key_pem.as_bytes())
            .map_err(|e| TokenError::EncodingError {
                message: format!("Invalid private key for {}: {}", key.key_id, e),
            })?;

        encode(&header, claims, &encoding_key).map_err(|e| {
            tracing::error!(key_id = %key.key_id, error = %e, "JWT signing failed");
            TokenError::SigningFailure.into()
        })
    }

    /// Verifies a token against the given key set, enforcing expiry.
    pub fn verify(&self, token: &str, keys: &[KeyPair]) -> Result<Claims, DomainError> {
        self.decode_against(token, keys, true)
    }

    /// Verifies signature, issuer and audience but tolerates a lapsed `exp`.
    ///
    /// Used on the refresh and revocation paths, where an expired token is
    /// still a legitimate reference to its issuance record.
    pub fn verify_ignoring_expiry(
        &self,
        token: &str,
        keys: &[KeyPair],
    ) -> Result<Claims, DomainError> {
        self.decode_against(token, keys, false)
    }

    fn decode_against(
        &self,
        token: &str,
        keys: &[KeyPair],
        validate_exp: bool,
    ) -> Result<Claims, DomainError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::TokenMalformed.into());
        }

        let header = decode_header(token).map_err(|_| TokenError::TokenMalformed)?;

        // With a kid the signing key is known exactly; without one, every
        // active key is a candidate.
        let candidates: Vec<&KeyPair> = match header.kid.as_deref() {
            Some(kid) => keys.iter().filter(|k| k.key_id == kid).collect(),
            None => keys.iter().collect(),
        };
        if candidates.is_empty() {
            return Err(TokenError::InvalidSignature.into());
        }

        let validation = self.validation(validate_exp);
        let mut last_error = TokenError::InvalidSignature;

        for key in candidates {
            if header.alg != key.algorithm.to_jwt_algorithm() {
                last_error = TokenError::AlgorithmMismatch;
                continue;
            }

            let decoding_key = DecodingKey::from_rsa_pem(key.public_key_pem.as_bytes())
                .map_err(|e| TokenError::EncodingError {
                    message: format!("Invalid public key for {}: {}", key.key_id, e),
                })?;

            match decode::<Claims>(token, &decoding_key, &validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) => {
                    last_error = map_decode_error(e);
                    // Only a signature mismatch can succeed under another key.
                    if !matches!(last_error, TokenError::InvalidSignature) {
                        break;
                    }
                }
            }
        }

        Err(last_error.into())
    }

    fn validation(&self, validate_exp: bool) -> Validation {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_audience(&[self.config.audience.as_str()]);
        validation.validate_exp = validate_exp;
        validation
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new(TokenServiceConfig::default())
    }
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch,
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::InvalidSignature,
        _ => TokenError::TokenMalformed,
    }
}
