//! MySQL implementation of the AccountRepository trait.
//!
//! Account rows are owned by the identity layer; this repository reads them
//! and maintains the lockout counters and login stamps. The failure counter
//! is incremented in SQL so concurrent failures across instances serialize
//! on the row instead of racing a read-then-write pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use am_core::domain::entities::account::Account;
use am_core::errors::DomainError;
use am_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
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

        let login_attempts: u32 =
            row.try_get("login_attempts")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get login_attempts: {}", e),
                })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            full_name: row.try_get("full_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get full_name: {}", e),
            })?,
            role: row.try_get("role").map_err(|e| DomainError::Internal {
                message: format!("Failed to get role: {}", e),
            })?,
            tenant_id,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            login_attempts,
            locked_until: row
                .try_get::<Option<DateTime<Utc>>, _>("locked_until")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get locked_until: {}", e),
                })?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
            last_source_ip: row
                .try_get("last_source_ip")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_source_ip: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, full_name, role, tenant_id, is_active, \
                               login_attempts, locked_until, last_login_at, last_source_ip, \
                               created_at, updated_at";

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE email = ? AND is_active = TRUE LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE id = ? LIMIT 1", ACCOUNT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<u32, DomainError> {
        // Atomic increment; two concurrent failures each observe a distinct
        // post-increment value.
        let query = r#"
            UPDATE accounts
            SET login_attempts = login_attempts + 1, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to record failed attempt: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("account {}", id),
            });
        }

        let row = sqlx::query("SELECT login_attempts FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read failure counter: {}", e),
            })?;

        row.try_get("login_attempts")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get login_attempts: {}", e),
            })
    }

    async fn reset_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE accounts
            SET login_attempts = 0, locked_until = NULL, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to reset failure counter: {}", e),
            })?;

        Ok(())
    }

    async fn lock_until(&self, id: Uuid, until: DateTime<Utc>) -> Result<(), DomainError> {
        let query = "UPDATE accounts SET locked_until = ?, updated_at = ? WHERE id = ?";

        sqlx::query(query)
            .bind(until)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to lock account: {}", e),
            })?;

        Ok(())
    }

    async fn record_login(&self, id: Uuid, source_ip: Option<String>) -> Result<(), DomainError> {
        let query = r#"
            UPDATE accounts
            SET login_attempts = 0,
                locked_until = NULL,
                last_login_at = ?,
                last_source_ip = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let now = Utc::now();
        sqlx::query(query)
            .bind(now)
            .bind(source_ip)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to record login: {}", e),
            })?;

        Ok(())
    }
}
