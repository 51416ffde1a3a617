//! Authentication port - the "current user" collaborator.
//!
//! Quill does not implement login or sessions; requests arrive carrying a
//! token minted by an upstream identity provider. This port only verifies
//! tokens and exposes the claims the authorization layer needs.

use crate::domain::Role;

/// Claims stored in bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub username: String,
    pub role: Role,
    pub blocked: bool,
    pub exp: i64,
}

/// Token service trait for bearer-token operations.
pub trait TokenService: Send + Sync {
    /// Mint a token for a user. Used by the upstream identity provider and
    /// by tests; the API server itself never issues tokens.
    fn generate_token(
        &self,
        username: &str,
        role: Role,
        blocked: bool,
    ) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly minted tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}
