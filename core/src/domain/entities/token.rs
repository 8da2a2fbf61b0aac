//! Token entities: JWT claims and the per-token issuance record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime (8 hours)
pub const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 8;

/// Grace window after nominal expiry during which refresh is honored (7 days)
pub const REFRESH_GRACE_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "authmint";

/// JWT audience
pub const JWT_AUDIENCE: &str = "authmint-api";

/// Claims structure for the JWT payload.
///
/// Optional claims are explicit fields rather than an untyped map so the
/// signature-relevant content stays unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (account ID)
    pub sub: String,

    /// Audience
    pub aud: String,

    /// Expiration timestamp (epoch seconds)
    pub exp: i64,

    /// Issued at timestamp (epoch seconds)
    pub iat: i64,

    /// Unique token identifier, primary key of the issuance record
    pub jti: String,

    /// Account email, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Account role, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Owning tenant, when the deployment is multi-tenant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Claims {
    /// Creates claims for a new access token expiring after the standard
    /// lifetime.
    pub fn new_access_token(
        subject: Uuid,
        jti: String,
        email: Option<String>,
        role: Option<String>,
        tenant_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);

        Self {
            iss: JWT_ISSUER.to_string(),
            sub: subject.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti,
            email,
            role,
            tenant_id: tenant_id.map(|t| t.to_string()),
        }
    }

    /// Checks whether the embedded expiry claim has lapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Parses the subject claim as an account ID.
    pub fn subject_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Parses the tenant claim, when present.
    pub fn tenant(&self) -> Option<Uuid> {
        self.tenant_id.as_deref().and_then(|t| Uuid::parse_str(t).ok())
    }
}

/// Whether a token may be exchanged for a successor within the grace window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Plain access token
    Access,
    /// Access token eligible for refresh after expiry
    RefreshEligible,
}

impl TokenType {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::RefreshEligible => "refresh_eligible",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "access" => Some(Self::Access),
            "refresh_eligible" => Some(Self::RefreshEligible),
            _ => None,
        }
    }
}

/// One row per token ever minted.
///
/// The signed claim is authoritative only for integrity; this record is
/// authoritative for expiry and revocation. Rows are never deleted - they
/// are retained for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The JWT `jti`, globally unique and never reused
    pub jti: String,

    /// Account the token was issued to
    pub subject_user_id: Uuid,

    /// Owning tenant, when multi-tenant
    pub tenant_id: Option<Uuid>,

    /// Refresh eligibility of the token
    pub token_type: TokenType,

    /// Timestamp when the token was minted
    pub issued_at: DateTime<Utc>,

    /// Nominal expiry of the token
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful verification
    pub last_used_at: Option<DateTime<Utc>>,

    /// Whether the token has been revoked
    pub is_revoked: bool,

    /// Timestamp of revocation
    pub revoked_at: Option<DateTime<Utc>>,

    /// Operator- or user-supplied revocation reason
    pub revoked_reason: Option<String>,

    /// Device name supplied at login
    pub device_name: Option<String>,

    /// Device fingerprint supplied at login
    pub device_fingerprint: Option<String>,

    /// Source IP of the issuing request
    pub source_ip: Option<String>,

    /// User agent of the issuing request
    pub user_agent: Option<String>,
}

impl IssuedToken {
    /// Creates a new issuance record from signed claims.
    pub fn from_claims(claims: &Claims, token_type: TokenType) -> Self {
        Self {
            jti: claims.jti.clone(),
            subject_user_id: claims.subject_id().unwrap_or_else(|_| Uuid::nil()),
            tenant_id: claims.tenant(),
            token_type,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_else(Utc::now),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
            last_used_at: None,
            is_revoked: false,
            revoked_at: None,
            revoked_reason: None,
            device_name: None,
            device_fingerprint: None,
            source_ip: None,
            user_agent: None,
        }
    }

    /// Attaches device and request metadata to the record.
    pub fn with_request_context(
        mut self,
        device_name: Option<String>,
        device_fingerprint: Option<String>,
        source_ip: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.device_name = device_name;
        self.device_fingerprint = device_fingerprint;
        self.source_ip = source_ip;
        self.user_agent = user_agent;
        self
    }

    /// Checks whether the record's expiry has lapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks whether the record is still within the refresh grace window.
    pub fn within_grace_period(&self) -> bool {
        Utc::now() <= self.expires_at + Duration::days(REFRESH_GRACE_DAYS)
    }

    /// Marks the record revoked.
    pub fn revoke(&mut self, reason: Option<String>) {
        self.is_revoked = true;
        self.revoked_at = Some(Utc::now());
        self.revoked_reason = reason;
    }

    /// Stamps the record with a successful verification.
    pub fn touch(&mut self) {
        self.last_used_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims::new_access_token(
            Uuid::new_v4(),
            "jti-sample".to_string(),
            Some("a@x.com".to_string()),
            Some("member".to_string()),
            Some(Uuid::new_v4()),
        )
    }

    #[test]
    fn test_access_token_claims() {
        let subject = Uuid::new_v4();
        let claims = Claims::new_access_token(subject, "jti-1".to_string(), None, None, None);

        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.jti, "jti-1");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_HOURS * 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_subject_parsing() {
        let claims = sample_claims();
        assert!(claims.subject_id().is_ok());
        assert!(claims.tenant().is_some());
    }

    #[test]
    fn test_optional_claims_omitted_from_payload() {
        let claims = Claims::new_access_token(Uuid::new_v4(), "jti-2".to_string(), None, None, None);
        let json = serde_json::to_string(&claims).unwrap();

        assert!(!json.contains("email"));
        assert!(!json.contains("role"));
        assert!(!json.contains("tenant_id"));
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = sample_claims();
        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_token_type_round_trip() {
        assert_eq!(TokenType::parse("access"), Some(TokenType::Access));
        assert_eq!(
            TokenType::parse("refresh_eligible"),
            Some(TokenType::RefreshEligible)
        );
        assert_eq!(TokenType::parse("other"), None);
        assert_eq!(TokenType::RefreshEligible.as_str(), "refresh_eligible");
    }

    #[test]
    fn test_issued_token_from_claims() {
        let claims = sample_claims();
        let record = IssuedToken::from_claims(&claims, TokenType::RefreshEligible);

        assert_eq!(record.jti, claims.jti);
        assert_eq!(record.subject_user_id.to_string(), claims.sub);
        assert_eq!(record.tenant_id, claims.tenant());
        assert!(!record.is_revoked);
        assert!(record.last_used_at.is_none());
        assert!(!record.is_expired());
    }

    #[test]
    fn test_issued_token_revocation() {
        let claims = sample_claims();
        let mut record = IssuedToken::from_claims(&claims, TokenType::Access);

        record.revoke(Some("user logout".to_string()));

        assert!(record.is_revoked);
        assert!(record.revoked_at.is_some());
        assert_eq!(record.revoked_reason.as_deref(), Some("user logout"));
    }

    #[test]
    fn test_grace_period_window() {
        let claims = sample_claims();
        let mut record = IssuedToken::from_claims(&claims, TokenType::RefreshEligible);

        // Expired one hour ago: inside the grace window
        record.expires_at = Utc::now() - Duration::hours(1);
        assert!(record.is_expired());
        assert!(record.within_grace_period());

        // Expired eight days ago: past the grace window
        record.expires_at = Utc::now() - Duration::days(REFRESH_GRACE_DAYS + 1);
        assert!(!record.within_grace_period());
    }

    #[test]
    fn test_request_context_metadata() {
        let claims = sample_claims();
        let record = IssuedToken::from_claims(&claims, TokenType::Access).with_request_context(
            Some("laptop".to_string()),
            Some("fp-1".to_string()),
            Some("203.0.113.9".to_string()),
            Some("curl/8".to_string()),
        );

        assert_eq!(record.device_name.as_deref(), Some("laptop"));
        assert_eq!(record.source_ip.as_deref(), Some("203.0.113.9"));
    }
}
