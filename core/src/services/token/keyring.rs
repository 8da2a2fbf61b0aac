//! Key-set management: generation, rotation and JWKS export.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::domain::entities::key_pair::KeyPair;
use crate::errors::{DomainError, KeyError};
use crate::repositories::KeyRepository;

/// JSON Web Key Set document served at the discovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// One public key in JWK form. Only RSA signing keys are exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub kid: String,
    /// Modulus, base64url without padding
    pub n: String,
    /// Public exponent, base64url without padding
    pub e: String,
}

/// View over the stored key set.
///
/// The repository is the source of truth shared by every instance of the
/// service; the keyring adds the policy: an empty active set is a systemic
/// fault, and issuance requires exactly one primary key.
pub struct Keyring<K: KeyRepository> {
    repository: Arc<K>,
}

impl<K: KeyRepository> Clone for Keyring<K> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<K: KeyRepository> Keyring<K> {
    pub fn new(repository: Arc<K>) -> Self {
        Self { repository }
    }

    /// All verification-eligible keys, newest first.
    ///
    /// An empty set means authentication is unavailable, not that any given
    /// token is invalid.
    pub async fn active_keys(&self) -> Result<Vec<KeyPair>, DomainError> {
        let keys = self.repository.find_active_keys().await?;
        if keys.is_empty() {
            return Err(KeyError::NoActiveKeys.into());
        }
        Ok(keys)
    }

    /// The key new tokens are signed with.
    pub async fn primary_key(&self) -> Result<KeyPair, DomainError> {
        let key = self
            .repository
            .find_primary_key()
            .await?
            .ok_or(KeyError::NoPrimaryKey)?;
        if !key.can_sign() {
            return Err(KeyError::NoPrimaryKey.into());
        }
        Ok(key)
    }

    /// Bumps a key's advisory usage counter. Failures are logged and
    /// swallowed; the counter is telemetry, not bookkeeping.
    pub async fn record_usage(&self, key_id: &str) {
        if let Err(e) = self.repository.increment_usage(key_id).await {
            tracing::warn!(key_id = %key_id, error = %e, "Failed to record key usage");
        }
    }

    /// Generates and stores a fresh RS256 key pair.
    pub async fn generate(&self, is_primary: bool) -> Result<KeyPair, DomainError> {
        let (private_pem, public_pem) = generate_rs256_material()?;
        let key = KeyPair::new_rs256(private_pem, public_pem, is_primary);
        self.repository.save_key(key).await
    }

    /// Rotates the primary signing key.
    ///
    /// The outgoing primary is demoted but stays active, so tokens it signed
    /// keep verifying until they expire. Key material is generated before
    /// the demotion so a generation failure leaves the key set untouched.
    pub async fn rotate(&self) -> Result<KeyPair, DomainError> {
        let (private_pem, public_pem) = generate_rs256_material()?;

        self.repository.demote_primary().await?;
        let key = KeyPair::new_rs256(private_pem, public_pem, true);
        let key = self.repository.save_key(key).await?;

        tracing::info!(key_id = %key.key_id, "Rotated primary signing key");
        Ok(key)
    }

    /// Returns the primary key, generating one on first boot.
    pub async fn ensure_primary(&self) -> Result<KeyPair, DomainError> {
        match self.repository.find_primary_key().await? {
            Some(key) => Ok(key),
            None => {
                tracing::info!("No primary signing key found, generating one");
                self.generate(true).await
            }
        }
    }

    /// Takes a key out of the verification set entirely. Tokens signed with
    /// it stop verifying immediately.
    pub async fn retire(&self, key_id: &str) -> Result<bool, DomainError> {
        let removed = self.repository.deactivate_key(key_id).await?;
        if removed {
            tracing::info!(key_id = %key_id, "Retired signing key");
        }
        Ok(removed)
    }

    /// Exports every active public key as a JWKS document.
    pub async fn jwks(&self) -> Result<Jwks, DomainError> {
        let keys = self.active_keys().await?;
        let mut jwks = Vec::with_capacity(keys.len());

        for key in &keys {
            let public_key = RsaPublicKey::from_public_key_pem(&key.public_key_pem).map_err(
                |e| KeyError::KeyLoadError {
                    message: format!("Stored public key {} is unreadable: {}", key.key_id, e),
                },
            )?;

            jwks.push(Jwk {
                kty: "RSA".to_string(),
                key_use: "sig".to_string(),
                alg: key.algorithm.as_str().to_string(),
                kid: key.key_id.clone(),
                n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
                e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
            });
        }

        Ok(Jwks { keys: jwks })
    }
}

fn generate_rs256_material() -> Result<(String, String), DomainError> {
    let private_key =
        RsaPrivateKey::new(&mut OsRng, 2048).map_err(|e| KeyError::GenerationFailed {
            message: e.to_string(),
        })?;
    let public_key = private_key.to_public_key();

    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| KeyError::GenerationFailed {
            message: e.to_string(),
        })?
        .to_string();

    let public_pem =
        public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| KeyError::GenerationFailed {
                message: e.to_string(),
            })?;

    Ok((private_pem, public_pem))
}
