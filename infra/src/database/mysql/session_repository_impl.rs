//! MySQL implementation of the SessionRepository trait.
//!
//! One row per token ever minted, keyed by `jti`. Rows are never deleted;
//! revocation and usage stamps are the only mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use am_core::domain::entities::token::{IssuedToken, TokenType};
use am_core::errors::DomainError;
use am_core::repositories::SessionRepository;

/// MySQL implementation of SessionRepository
pub struct MySqlSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to IssuedToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<IssuedToken, DomainError> {
        let subject: String = row
            .try_get("subject_user_id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get subject_user_id: {}", e),
            })?;

        let tenant_id: Option<String> =
            row.try_get("tenant_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get tenant_id: {}", e),
            })?;
        let tenant_id = tenant_id
            .map(|t| Uuid::parse_str(&t))
            .transpose()
            .map_err(|e| DomainError::Internal {
                message: format!("Invalid tenant UUID: {}", e),
            })?;

        let token_type_str: String =
            row.try_get("token_type").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_type: {}", e),
            })?;
        let token_type =
            TokenType::parse(&token_type_str).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown token type: {}", token_type_str),
            })?;

        Ok(IssuedToken {
            jti: row.try_get("jti").map_err(|e| DomainError::Internal {
                message: format!("Failed to get jti: {}", e),
            })?,
            subject_user_id: Uuid::parse_str(&subject).map_err(|e| DomainError::Internal {
                message: format!("Invalid subject UUID: {}", e),
            })?,
            tenant_id,
            token_type,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get issued_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            last_used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_used_at: {}", e),
                })?,
            is_revoked: row.try_get("is_revoked").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_revoked: {}", e),
            })?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get revoked_at: {}", e),
                })?,
            revoked_reason: row
                .try_get("revoked_reason")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get revoked_reason: {}", e),
                })?,
            device_name: row.try_get("device_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get device_name: {}", e),
            })?,
            device_fingerprint: row
                .try_get("device_fingerprint")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get device_fingerprint: {}", e),
                })?,
            source_ip: row.try_get("source_ip").map_err(|e| DomainError::Internal {
                message: format!("Failed to get source_ip: {}", e),
            })?,
            user_agent: row.try_get("user_agent").map_err(|e| DomainError::Internal {
                message: format!("Failed to get user_agent: {}", e),
            })?,
        })
    }
}

const TOKEN_COLUMNS: &str = "jti, subject_user_id, tenant_id, token_type, issued_at, expires_at, \
                             last_used_at, is_revoked, revoked_at, revoked_reason, device_name, \
                             device_fingerprint, source_ip, user_agent";

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn insert(&self, token: IssuedToken) -> Result<IssuedToken, DomainError> {
        let query = r#"
            INSERT INTO issued_tokens (
                jti, subject_user_id, tenant_id, token_type, issued_at, expires_at,
                last_used_at, is_revoked, revoked_at, revoked_reason,
                device_name, device_fingerprint, source_ip, user_agent
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&token.jti)
            .bind(token.subject_user_id.to_string())
            .bind(token.tenant_id.map(|t| t.to_string()))
            .bind(token.token_type.as_str())
            .bind(token.issued_at)
            .bind(token.expires_at)
            .bind(token.last_used_at)
            .bind(token.is_revoked)
            .bind(token.revoked_at)
            .bind(&token.revoked_reason)
            .bind(&token.device_name)
            .bind(&token.device_fingerprint)
            .bind(&token.source_ip)
            .bind(&token.user_agent)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                // The jti is the primary key; a duplicate means an identifier
                // collision, which must surface rather than overwrite.
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Validation {
                    message: "Token identifier already exists".to_string(),
                },
                e => DomainError::Internal {
                    message: format!("Failed to insert issued token: {}", e),
                },
            })?;

        Ok(token)
    }

    async fn find_by_jti(&self, jti: &str) -> Result<Option<IssuedToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM issued_tokens WHERE jti = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(jti)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find token by jti: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<IssuedToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM issued_tokens WHERE subject_user_id = ? ORDER BY issued_at DESC",
            TOKEN_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find tokens for user: {}", e),
            })?;

        let mut tokens = Vec::with_capacity(rows.len());
        for row in rows {
            tokens.push(Self::row_to_token(&row)?);
        }
        Ok(tokens)
    }

    async fn touch_last_used(&self, jti: &str) -> Result<(), DomainError> {
        let query = "UPDATE issued_tokens SET last_used_at = ? WHERE jti = ?";

        sqlx::query(query)
            .bind(Utc::now())
            .bind(jti)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to stamp token usage: {}", e),
            })?;

        Ok(())
    }

    async fn revoke(&self, jti: &str, reason: Option<String>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE issued_tokens
            SET is_revoked = TRUE, revoked_at = ?, revoked_reason = ?
            WHERE jti = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(reason)
            .bind(jti)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke token: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE issued_tokens
            SET is_revoked = TRUE, revoked_at = ?, revoked_reason = ?
            WHERE subject_user_id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(reason)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke tokens for user: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
