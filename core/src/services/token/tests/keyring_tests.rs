//! Tests for key-set management and JWKS export

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::errors::{DomainError, KeyError};
use crate::repositories::MockKeyRepository;
use crate::services::token::Keyring;

fn empty_keyring() -> Keyring<MockKeyRepository> {
    Keyring::new(Arc::new(MockKeyRepository::new()))
}

#[tokio::test]
async fn test_empty_key_set_is_a_systemic_fault() {
    let keyring = empty_keyring();

    let err = keyring.active_keys().await.unwrap_err();
    assert!(matches!(err, DomainError::Key(KeyError::NoActiveKeys)));

    let err = keyring.primary_key().await.unwrap_err();
    assert!(matches!(err, DomainError::Key(KeyError::NoPrimaryKey)));
}

#[tokio::test]
async fn test_generated_key_is_usable() {
    let keyring = empty_keyring();
    let key = keyring.generate(true).await.unwrap();

    assert!(key.is_active);
    assert!(key.is_primary);
    assert!(key.private_key_pem.contains("PRIVATE KEY"));
    assert!(key.public_key_pem.contains("PUBLIC KEY"));

    let primary = keyring.primary_key().await.unwrap();
    assert_eq!(primary.key_id, key.key_id);
}

#[tokio::test]
async fn test_rotation_demotes_old_primary() {
    let keyring = empty_keyring();
    let old = keyring.generate(true).await.unwrap();
    let new = keyring.rotate().await.unwrap();

    assert_ne!(old.key_id, new.key_id);
    assert_eq!(keyring.primary_key().await.unwrap().key_id, new.key_id);

    // Both keys still verify
    let active = keyring.active_keys().await.unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().any(|k| k.key_id == old.key_id));
}

#[tokio::test]
async fn test_ensure_primary_bootstraps_once() {
    let keyring = empty_keyring();

    let first = keyring.ensure_primary().await.unwrap();
    let second = keyring.ensure_primary().await.unwrap();

    assert_eq!(first.key_id, second.key_id);
    assert_eq!(keyring.active_keys().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_retire_removes_key_from_verification_set() {
    let keyring = empty_keyring();
    let old = keyring.generate(true).await.unwrap();
    keyring.rotate().await.unwrap();

    assert!(keyring.retire(&old.key_id).await.unwrap());
    assert!(!keyring.retire("no-such-key").await.unwrap());

    let active = keyring.active_keys().await.unwrap();
    assert_eq!(active.len(), 1);
    assert!(active.iter().all(|k| k.key_id != old.key_id));
}

#[tokio::test]
async fn test_record_usage_is_advisory() {
    let keyring = empty_keyring();
    let key = keyring.generate(true).await.unwrap();

    keyring.record_usage(&key.key_id).await;
    keyring.record_usage(&key.key_id).await;
    // Unknown key id must not panic or error
    keyring.record_usage("no-such-key").await;

    let primary = keyring.primary_key().await.unwrap();
    assert_eq!(primary.usage_count, 2);
}

#[tokio::test]
async fn test_jwks_exports_active_public_keys() {
    let keyring = empty_keyring();
    let old = keyring.generate(true).await.unwrap();
    let new = keyring.rotate().await.unwrap();

    let jwks = keyring.jwks().await.unwrap();
    assert_eq!(jwks.keys.len(), 2);

    for jwk in &jwks.keys {
        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.key_use, "sig");
        assert_eq!(jwk.alg, "RS256");
        assert!(jwk.kid == old.key_id || jwk.kid == new.key_id);

        // Modulus of a 2048-bit key, base64url without padding
        let n = URL_SAFE_NO_PAD.decode(&jwk.n).unwrap();
        assert_eq!(n.len(), 256);
        let e = URL_SAFE_NO_PAD.decode(&jwk.e).unwrap();
        assert_eq!(e, vec![1, 0, 1]);
    }

    let json = serde_json::to_string(&jwks).unwrap();
    assert!(json.contains("\"use\":\"sig\""));
    assert!(!json.contains("PRIVATE"));
}
