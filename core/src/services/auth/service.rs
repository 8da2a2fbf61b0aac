//! Main authentication service implementation

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{Claims, IssuedToken, TokenType};
use crate::domain::value_objects::{AuthResponse, PublicUser, RevokeOutcome, VerifiedContext};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, NoOpAuditLogRepository,
    SessionRepository,
};
use crate::services::audit::AuditService;
use crate::services::token::{Keyring, TokenCodec};

use super::account_guard::AccountGuard;
use super::config::AuthServiceConfig;
use super::password::PasswordVerifier;

/// Request metadata attached to issuance records and audit entries.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub device_name: Option<String>,
    pub device_fingerprint: Option<String>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Orchestrates login, verification, refresh and revocation.
///
/// Every collaborator is injected behind a trait so the flows can be tested
/// against in-memory repositories.
pub struct AuthService<K, S, A, P, L = NoOpAuditLogRepository>
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    keyring: Keyring<K>,
    codec: TokenCodec,
    sessions: Arc<S>,
    accounts: Arc<A>,
    guard: AccountGuard<A>,
    passwords: P,
    audit: AuditService<L>,
}

impl<K, S, A, P, L> AuthService<K, S, A, P, L>
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    pub fn new(
        keyring: Keyring<K>,
        codec: TokenCodec,
        sessions: Arc<S>,
        accounts: Arc<A>,
        passwords: P,
        audit: AuditService<L>,
        config: AuthServiceConfig,
    ) -> Self {
        let guard = AccountGuard::new(Arc::clone(&accounts), config);
        Self {
            keyring,
            codec,
            sessions,
            accounts,
            guard,
            passwords,
            audit,
        }
    }

    /// Authenticates credentials and mints an access token.
    ///
    /// A missing account, an inactive account and a tenant mismatch are all
    /// reported as the same credential failure, so the response never leaks
    /// which part was wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        tenant_id: Option<Uuid>,
        ctx: &RequestContext,
    ) -> Result<AuthResponse, DomainError> {
        self.audit.login_attempt(email, ctx).await;

        let account = match self.accounts.find_active_by_email(email).await? {
            Some(account) => account,
            None => {
                self.audit
                    .login_failure(email, None, "unknown or inactive account", ctx)
                    .await;
                return Err(AuthError::InvalidCredentials {
                    attempts_remaining: None,
                }
                .into());
            }
        };

        if let (Some(requested), Some(owned)) = (tenant_id, account.tenant_id) {
            if requested != owned {
                self.audit
                    .login_failure(email, Some(account.id), "tenant mismatch", ctx)
                    .await;
                return Err(AuthError::InvalidCredentials {
                    attempts_remaining: None,
                }
                .into());
            }
        }

        if let Err(e) = self.guard.ensure_unlocked(&account).await {
            self.audit
                .login_failure(email, Some(account.id), "account locked", ctx)
                .await;
            return Err(e);
        }

        if !self.passwords.verify(password, &account.password_hash)? {
            let outcome = self.guard.record_failure(&account).await?;
            self.audit
                .login_failure(email, Some(account.id), "invalid password", ctx)
                .await;

            if let Some(until) = outcome.locked_until {
                self.audit.account_locked(account.id, email, ctx).await;
                return Err(AuthError::AccountLocked {
                    locked_until: until,
                }
                .into());
            }

            return Err(AuthError::InvalidCredentials {
                attempts_remaining: Some(
                    outcome.attempts_remaining(self.guard.config().max_failed_attempts),
                ),
            }
            .into());
        }

        self.guard
            .record_success(&account, ctx.source_ip.clone())
            .await?;

        let tenant = tenant_id.or(account.tenant_id);
        let (token, claims) = self.issue_token(&account, tenant, ctx).await?;

        self.audit.login_success(account.id, email, ctx).await;
        self.audit.token_issued(account.id, &claims.jti, ctx).await;
        tracing::info!(account_id = %account.id, jti = %claims.jti, "Login succeeded");

        Ok(AuthResponse::new(token, &claims, PublicUser::from(&account)))
    }

    /// Resolves a bearer token to its subject.
    ///
    /// The signature proves integrity; the issuance record has the last
    /// word on expiry and revocation.
    pub async fn verify(&self, token: &str) -> Result<VerifiedContext, DomainError> {
        let keys = self.keyring.active_keys().await?;
        let claims = self.codec.verify(token, &keys)?;

        let record = self
            .sessions
            .find_by_jti(&claims.jti)
            .await?
            .ok_or(TokenError::TokenRecordMissing)?;
        if record.is_revoked {
            return Err(TokenError::TokenRevoked.into());
        }
        if record.is_expired() {
            return Err(TokenError::TokenExpired.into());
        }

        let account = self
            .accounts
            .find_by_id(record.subject_user_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(AuthError::AccountInactive)?;

        // Usage stamp is advisory; a failed write must not fail the request.
        let _ = self.sessions.touch_last_used(&claims.jti).await;

        Ok(VerifiedContext {
            user: PublicUser::from(&account),
            tenant_id: record.tenant_id,
            claims,
        })
    }

    /// Exchanges an expired-but-in-grace token for a fresh one.
    ///
    /// The presented token must carry a valid signature; its `exp` claim is
    /// deliberately not enforced here. The predecessor is left unrevoked -
    /// it dies on its own clock, and the grace window bounds how long it
    /// can keep producing successors.
    pub async fn refresh(
        &self,
        token: &str,
        ctx: &RequestContext,
    ) -> Result<AuthResponse, DomainError> {
        let keys = self.keyring.active_keys().await?;
        let claims = match self.codec.verify_ignoring_expiry(token, &keys) {
            Ok(claims) => claims,
            Err(e) => {
                self.audit
                    .verification_failure("refresh with invalid token", ctx)
                    .await;
                return Err(e);
            }
        };

        let record = self
            .sessions
            .find_by_jti(&claims.jti)
            .await?
            .ok_or(TokenError::TokenRecordMissing)?;
        if record.is_revoked {
            return Err(TokenError::TokenRevoked.into());
        }
        if record.token_type != TokenType::RefreshEligible {
            return Err(AuthError::Unauthorized.into());
        }
        if !record.within_grace_period() {
            return Err(TokenError::TokenExpired.into());
        }

        let account = self
            .accounts
            .find_by_id(record.subject_user_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(AuthError::AccountInactive)?;
        self.guard.ensure_unlocked(&account).await?;

        let (new_token, new_claims) = self.issue_token(&account, record.tenant_id, ctx).await?;

        self.audit
            .token_refreshed(account.id, &record.jti, &new_claims.jti, ctx)
            .await;
        self.audit
            .token_issued(account.id, &new_claims.jti, ctx)
            .await;
        tracing::info!(
            account_id = %account.id,
            old_jti = %record.jti,
            new_jti = %new_claims.jti,
            "Token refreshed"
        );

        Ok(AuthResponse::new(
            new_token,
            &new_claims,
            PublicUser::from(&account),
        ))
    }

    /// Revokes one token or the caller's entire set.
    ///
    /// The bearer must itself be valid. A caller may only revoke tokens
    /// belonging to its own subject; the target token may already be
    /// expired, in which case revocation still flips the record for audit.
    pub async fn revoke(
        &self,
        bearer: &str,
        target: Option<&str>,
        all_tokens: bool,
        reason: Option<String>,
        ctx: &RequestContext,
    ) -> Result<RevokeOutcome, DomainError> {
        let caller = self.verify(bearer).await?;
        let caller_id = caller.user.id;

        if all_tokens {
            let count = self
                .sessions
                .revoke_all_for_user(caller_id, reason.clone())
                .await?;
            self.audit.token_revoked(caller_id, None, reason, ctx).await;
            tracing::info!(account_id = %caller_id, revoked = count, "Revoked all tokens");
            return Ok(RevokeOutcome {
                revoked_count: count,
            });
        }

        let target_claims = match target {
            Some(raw) => {
                let keys = self.keyring.active_keys().await?;
                self.codec.verify_ignoring_expiry(raw, &keys)?
            }
            None => caller.claims.clone(),
        };

        let record = self
            .sessions
            .find_by_jti(&target_claims.jti)
            .await?
            .ok_or(TokenError::TokenRecordMissing)?;
        if record.subject_user_id != caller_id {
            return Err(AuthError::Unauthorized.into());
        }

        // Idempotent: revoking an already-revoked token reports zero rows.
        let flipped = self.sessions.revoke(&record.jti, reason.clone()).await?;
        self.audit
            .token_revoked(caller_id, Some(&record.jti), reason, ctx)
            .await;
        tracing::info!(account_id = %caller_id, jti = %record.jti, "Token revoked");

        Ok(RevokeOutcome {
            revoked_count: usize::from(flipped),
        })
    }

    /// Rotates the primary signing key and records the rotation.
    pub async fn rotate_signing_key(&self) -> Result<String, DomainError> {
        let key = self.keyring.rotate().await?;
        self.audit.key_rotated(&key.key_id).await;
        Ok(key.key_id)
    }

    /// Signs a fresh token for the account and persists its record.
    async fn issue_token(
        &self,
        account: &Account,
        tenant: Option<Uuid>,
        ctx: &RequestContext,
    ) -> Result<(String, Claims), DomainError> {
        let claims = Claims::new_access_token(
            account.id,
            generate_jti(),
            Some(account.email.clone()),
            Some(account.role.clone()),
            tenant,
        );

        let primary = self.keyring.primary_key().await?;
        let token = self.codec.sign(&claims, &primary)?;

        let record = IssuedToken::from_claims(&claims, TokenType::RefreshEligible)
            .with_request_context(
                ctx.device_name.clone(),
                ctx.device_fingerprint.clone(),
                ctx.source_ip.clone(),
                ctx.user_agent.clone(),
            );
        self.sessions.insert(record).await?;
        self.keyring.record_usage(&primary.key_id).await;

        Ok((token, claims))
    }
}

/// Generates a random 32-character alphanumeric token identifier.
fn generate_jti() -> String {
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| {
            let idx: u8 = rng.gen_range(0..62);
            match idx {
                0..=9 => (b'0' + idx) as char,
                10..=35 => (b'a' + idx - 10) as char,
                _ => (b'A' + idx - 36) as char,
            }
        })
        .collect()
}
