//! Admin identity resolution.
//!
//! Every admin route resolves an [`AdminIdentity`] through an [`AdminSessions`]
//! implementation before it touches the request body or the database.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    name: String,
}

impl AdminIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    #[error("missing admin credential")]
    Missing,
    #[error("invalid admin credential")]
    Invalid,
}

impl AdminAuthError {
    /// Metric label for the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Invalid => "invalid",
        }
    }
}

#[async_trait]
pub trait AdminSessions: Send + Sync {
    async fn require_admin_user(
        &self,
        credential: Option<&str>,
    ) -> Result<AdminIdentity, AdminAuthError>;

    /// Read-side lookup for presentation decisions; never used to authorize.
    async fn optional_admin_user(&self, credential: Option<&str>) -> Option<AdminIdentity> {
        self.require_admin_user(credential).await.ok()
    }
}

/// Single shared admin token, compared by digest in constant time.
pub struct TokenAdminSessions {
    name: String,
    token_digest: Option<Vec<u8>>,
}

impl TokenAdminSessions {
    pub fn new(name: impl Into<String>, token: &str) -> Self {
        Self {
            name: name.into(),
            token_digest: Some(Self::digest(token)),
        }
    }

    /// No token configured: every credential is refused.
    pub fn locked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token_digest: None,
        }
    }

    fn digest(token: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.finalize().to_vec()
    }
}

#[async_trait]
impl AdminSessions for TokenAdminSessions {
    async fn require_admin_user(
        &self,
        credential: Option<&str>,
    ) -> Result<AdminIdentity, AdminAuthError> {
        let token = credential
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AdminAuthError::Missing)?;

        let expected = self
            .token_digest
            .as_deref()
            .ok_or(AdminAuthError::Invalid)?;
        let presented = Self::digest(token);
        if expected.ct_eq(&presented).unwrap_u8() == 0 {
            return Err(AdminAuthError::Invalid);
        }

        Ok(AdminIdentity::new(self.name.clone()))
    }
}
