//! MySQL implementation of the KeyRepository trait.
//!
//! The signing_keys table is the shared source of truth for a fleet of
//! stateless instances: the current primary key is a queryable attribute of
//! the stored set, never an in-process singleton.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use am_core::domain::entities::key_pair::{KeyPair, SigningAlgorithm};
use am_core::errors::DomainError;
use am_core::repositories::KeyRepository;

/// MySQL implementation of KeyRepository
pub struct MySqlKeyRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlKeyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to KeyPair entity
    fn row_to_key(row: &sqlx::mysql::MySqlRow) -> Result<KeyPair, DomainError> {
        let algorithm_str: String =
            row.try_get("algorithm").map_err(|e| DomainError::Internal {
                message: format!("Failed to get algorithm: {}", e),
            })?;
        let algorithm =
            SigningAlgorithm::parse(&algorithm_str).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown signing algorithm: {}", algorithm_str),
            })?;

        let usage_count: u64 =
            row.try_get("usage_count").map_err(|e| DomainError::Internal {
                message: format!("Failed to get usage_count: {}", e),
            })?;

        Ok(KeyPair {
            key_id: row.try_get("key_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get key_id: {}", e),
            })?,
            algorithm,
            private_key_pem: row
                .try_get("private_key_pem")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get private_key_pem: {}", e),
                })?,
            public_key_pem: row
                .try_get("public_key_pem")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get public_key_pem: {}", e),
                })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            is_primary: row.try_get("is_primary").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_primary: {}", e),
            })?,
            usage_count,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

const KEY_COLUMNS: &str = "key_id, algorithm, private_key_pem, public_key_pem, is_active, \
                           is_primary, usage_count, created_at, expires_at";

#[async_trait]
impl KeyRepository for MySqlKeyRepository {
    async fn save_key(&self, key: KeyPair) -> Result<KeyPair, DomainError> {
        let query = r#"
            INSERT INTO signing_keys (
                key_id, algorithm, private_key_pem, public_key_pem,
                is_active, is_primary, usage_count, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&key.key_id)
            .bind(key.algorithm.as_str())
            .bind(&key.private_key_pem)
            .bind(&key.public_key_pem)
            .bind(key.is_active)
            .bind(key.is_primary)
            .bind(key.usage_count)
            .bind(key.created_at)
            .bind(key.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save signing key: {}", e),
            })?;

        Ok(key)
    }

    async fn find_active_keys(&self) -> Result<Vec<KeyPair>, DomainError> {
        let query = format!(
            "SELECT {} FROM signing_keys WHERE is_active = TRUE ORDER BY created_at DESC",
            KEY_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load active keys: {}", e),
            })?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in rows {
            keys.push(Self::row_to_key(&row)?);
        }
        Ok(keys)
    }

    async fn find_primary_key(&self) -> Result<Option<KeyPair>, DomainError> {
        let query = format!(
            "SELECT {} FROM signing_keys WHERE is_active = TRUE AND is_primary = TRUE LIMIT 1",
            KEY_COLUMNS
        );

        let result = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load primary key: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_key(&row)?)),
            None => Ok(None),
        }
    }

    async fn increment_usage(&self, key_id: &str) -> Result<(), DomainError> {
        let query = "UPDATE signing_keys SET usage_count = usage_count + 1 WHERE key_id = ?";

        sqlx::query(query)
            .bind(key_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to increment key usage: {}", e),
            })?;

        Ok(())
    }

    async fn demote_primary(&self) -> Result<(), DomainError> {
        let query = "UPDATE signing_keys SET is_primary = FALSE WHERE is_primary = TRUE";

        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to demote primary key: {}", e),
            })?;

        Ok(())
    }

    async fn deactivate_key(&self, key_id: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE signing_keys
            SET is_active = FALSE, is_primary = FALSE
            WHERE key_id = ? AND is_active = TRUE
        "#;

        let result = sqlx::query(query)
            .bind(key_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to deactivate key: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
