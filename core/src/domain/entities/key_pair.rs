//! Signing key pair entity for JWT issuance and verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signature algorithm for a key pair.
///
/// Only RSA-SHA256 is issued today; the enum keeps the wire value explicit
/// so a token whose header names a different algorithm is rejected rather
/// than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    #[serde(rename = "RS256")]
    Rs256,
}

impl SigningAlgorithm {
    /// The JOSE `alg` header value for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
        }
    }

    /// Parse from the stored string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RS256" => Some(Self::Rs256),
            _ => None,
        }
    }

    /// The corresponding `jsonwebtoken` algorithm.
    pub fn to_jwt_algorithm(&self) -> jsonwebtoken::Algorithm {
        match self {
            Self::Rs256 => jsonwebtoken::Algorithm::RS256,
        }
    }
}

impl std::fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asymmetric signing key pair registered with the key store.
///
/// Verification considers every active key; new tokens are signed only with
/// the single primary key. Rotated-out keys are deactivated, never deleted,
/// while issued tokens may still reference them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// Stable identifier embedded in token headers as `kid`
    pub key_id: String,

    /// Signature algorithm for this key
    pub algorithm: SigningAlgorithm,

    /// PEM-encoded private key (PKCS#8)
    #[serde(skip_serializing, default)]
    pub private_key_pem: String,

    /// PEM-encoded public key (SPKI)
    pub public_key_pem: String,

    /// Whether the key is eligible for verification
    pub is_active: bool,

    /// Whether this is the single key used for new issuance
    pub is_primary: bool,

    /// Number of tokens signed with this key (advisory telemetry)
    pub usage_count: u64,

    /// Timestamp when the key was created
    pub created_at: DateTime<Utc>,

    /// Optional hard expiry for the key material
    pub expires_at: Option<DateTime<Utc>>,
}

impl KeyPair {
    /// Creates a new RS256 key pair entity from PEM-encoded material.
    pub fn new_rs256(private_key_pem: String, public_key_pem: String, is_primary: bool) -> Self {
        Self {
            key_id: Uuid::new_v4().to_string(),
            algorithm: SigningAlgorithm::Rs256,
            private_key_pem,
            public_key_pem,
            is_active: true,
            is_primary,
            usage_count: 0,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Whether the key may be used to sign new tokens.
    pub fn can_sign(&self) -> bool {
        self.is_active && self.is_primary && !self.private_key_pem.is_empty()
    }

    /// Removes primary status, leaving the key active for verification.
    pub fn demote(&mut self) {
        self.is_primary = false;
    }

    /// Takes the key out of the verification set.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.is_primary = false;
    }
}
