//! JWT tokens and the authenticated-user context
//!
//! HS256 with issuer and audience validation. The signing secret comes
//! from `JWT_SECRET`; a development build without one runs on a random
//! generated key (every restart invalidates outstanding tokens).

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;

/// JWT configuration, read from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: resolve_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "depot-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "depot-clients".to_string()),
        }
    }
}

/// `JWT_SECRET`, or a generated dev key. Release builds refuse to start
/// without a configured secret.
fn resolve_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= MIN_SECRET_LEN => secret,
        Ok(_) => secret_misconfigured(format!(
            "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
        )),
        Err(_) => secret_misconfigured("JWT_SECRET environment variable is not set".into()),
    }
}

#[cfg(debug_assertions)]
fn secret_misconfigured(reason: String) -> String {
    use ring::rand::{SecureRandom, SystemRandom};

    tracing::warn!("{reason}; using a generated development key");
    let rng = SystemRandom::new();
    let mut raw = [0u8; 48];
    if rng.fill(&mut raw).is_err() {
        return "depot-development-fallback-key-replace-in-production".to_string();
    }
    // Hex keeps the key printable for logging/env round-trips
    raw.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(not(debug_assertions))]
fn secret_misconfigured(reason: String) -> String {
    panic!("FATAL: {reason}");
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub username: String,
    /// Role name
    pub role: String,
    /// Comma-joined permission strings
    pub permissions: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// Issues and validates access tokens
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the keys
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    /// Issue an access token for a user
    pub fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        role: &str,
        permissions: &[String],
    ) -> Result<String, JwtError> {
        let issued = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            permissions: permissions.join(","),
            token_type: "access".to_string(),
            exp: (issued + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: issued.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate signature, expiry, issuer and audience; return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }),
        }
    }

    /// Token part of an `Authorization: Bearer <token>` header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// The authenticated caller, as parsed from validated claims and injected
/// into request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub permissions: Vec<String>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id: i64 = claims
            .sub
            .parse()
            .map_err(|_| JwtError::InvalidToken(format!("malformed subject: {}", claims.sub)))?;

        let permissions: Vec<String> = claims
            .permissions
            .split(',')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            id,
            username: claims.username,
            role: claims.role,
            permissions,
        })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Permission check: admins and holders of the literal `all` pass
    /// everything; otherwise exact match or a `<resource>:*` wildcard.
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_admin() {
            return true;
        }
        self.permissions.iter().any(|held| {
            held == "all"
                || held == permission
                || held.strip_suffix(":*").is_some_and(|resource| {
                    permission
                        .strip_prefix(resource)
                        .is_some_and(|rest| rest.starts_with(':'))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-key-0123456789abcdef".to_string(),
            expiration_minutes: 60,
            issuer: "depot-server".to_string(),
            audience: "depot-clients".to_string(),
        })
    }

    fn operator(permissions: &[&str]) -> CurrentUser {
        CurrentUser {
            id: 9,
            username: "joao".to_string(),
            role: "operator".to_string(),
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_issue_then_validate() {
        let svc = service();
        let token = svc
            .generate_token(42, "maria", "manager", &["products:manage".to_string()])
            .unwrap();
        let claims = svc.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.role, "manager");
        assert_eq!(claims.permissions, "products:manage");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_tampering_invalidates() {
        let svc = service();
        let mut token = svc.generate_token(1, "x", "operator", &[]).unwrap();
        token.push('A');
        assert!(svc.validate_token(&token).is_err());
    }

    #[test]
    fn test_audience_mismatch_is_rejected() {
        let issuing = service();
        let mut other_config = issuing.config.clone();
        other_config.audience = "someone-else".to_string();
        let validating = JwtService::with_config(other_config);

        let token = issuing.generate_token(1, "x", "operator", &[]).unwrap();
        assert!(validating.validate_token(&token).is_err());
    }

    #[test]
    fn test_claims_to_current_user() {
        let svc = service();
        let token = svc
            .generate_token(7, "ana", "manager", &["reports:view".to_string()])
            .unwrap();
        let user = CurrentUser::try_from(svc.validate_token(&token).unwrap()).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.permissions, vec!["reports:view"]);

        // No permissions at all parses to an empty list, not [""]
        let token = svc.generate_token(8, "rui", "operator", &[]).unwrap();
        let user = CurrentUser::try_from(svc.validate_token(&token).unwrap()).unwrap();
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn test_permission_matching() {
        let user = operator(&["movements:create", "products:*"]);
        assert!(user.has_permission("movements:create"));
        assert!(user.has_permission("products:manage"));
        assert!(!user.has_permission("users:manage"));
        // A wildcard only covers its own resource segment
        assert!(!user.has_permission("productsX:manage"));
    }

    #[test]
    fn test_admin_and_all_bypass() {
        let admin = CurrentUser {
            id: 1,
            username: "admin".to_string(),
            role: "admin".to_string(),
            permissions: vec![],
        };
        assert!(admin.has_permission("users:manage"));

        let all = operator(&["all"]);
        assert!(all.has_permission("catalog:manage"));
    }
}
