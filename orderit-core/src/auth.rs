//! Admin access gate
//!
//! A single binary "is staff" switch. Credentials are checked at a pluggable
//! boundary and success is remembered as a persisted session marker with a
//! TTL, so the admin stays logged in across restarts until the marker
//! expires or is cleared.
//!
//! Login failure is uniform: whatever the boundary reports, the caller
//! sees invalid credentials and the stored state is untouched.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

use crate::storage::{JsonStore, StorageError};

const SESSION_FILE: &str = "session.json";

/// Email the bundled verifier accepts
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";
/// Password of the out-of-the-box demo installation
pub const DEMO_PASSWORD: &str = "admin123";

/// Persisted proof of an admin login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMarker {
    /// Opaque token handed back by the credential boundary
    pub token: String,
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Credential check at the authentication boundary
///
/// Production deployments may call out to a remote auth endpoint; the
/// bundled [`LocalSecretVerifier`] checks against a fixed local secret.
/// Either way the gate only learns success or failure plus an opaque token.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns an opaque access token on success
    async fn verify(&self, email: &str, password: &str) -> AppResult<String>;
}

/// Verifier backed by a fixed admin email and an Argon2 password hash
pub struct LocalSecretVerifier {
    admin_email: String,
    password_hash: String,
}

impl LocalSecretVerifier {
    /// Hash `password` and accept logins for `admin_email` only
    pub fn new(admin_email: impl Into<String>, password: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?
            .to_string();
        Ok(Self { admin_email: admin_email.into(), password_hash })
    }

    /// Verifier for the demo installation credentials
    pub fn demo() -> AppResult<Self> {
        Self::new(DEFAULT_ADMIN_EMAIL, DEMO_PASSWORD)
    }
}

#[async_trait]
impl CredentialVerifier for LocalSecretVerifier {
    async fn verify(&self, email: &str, password: &str) -> AppResult<String> {
        if email != self.admin_email {
            return Err(AppError::invalid_credentials());
        }
        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|e| AppError::internal(format!("Stored password hash invalid: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::invalid_credentials())?;
        Ok(uuid::Uuid::new_v4().to_string())
    }
}

/// Admin session state persisted to `session.json`
pub struct AdminSession {
    store: JsonStore,
    session_ttl: Duration,
    marker: Option<SessionMarker>,
}

impl AdminSession {
    /// Load session state; an already-expired marker is cleared on load
    pub fn open(store: JsonStore, session_ttl_days: i64) -> Result<Self, StorageError> {
        let marker: Option<SessionMarker> = store.load(SESSION_FILE)?;
        let mut session = Self {
            store,
            session_ttl: Duration::days(session_ttl_days),
            marker,
        };
        match &session.marker {
            Some(marker) if marker.expires_at <= Utc::now() => {
                tracing::info!(email = %marker.email, "Stored admin session expired");
                session.marker = None;
                session.store.remove(SESSION_FILE)?;
            }
            Some(marker) => {
                tracing::info!(email = %marker.email, "Restored admin session");
            }
            None => {}
        }
        Ok(session)
    }

    pub fn is_authenticated(&self) -> bool {
        self.marker.is_some()
    }

    /// Email of the logged-in admin, if any
    pub fn email(&self) -> Option<&str> {
        self.marker.as_ref().map(|m| m.email.as_str())
    }

    /// Check credentials through the boundary and persist the marker.
    /// A repeated login simply overwrites the previous marker
    pub async fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        email: &str,
        password: &str,
    ) -> AppResult<()> {
        let token = match verifier.verify(email, password).await {
            Ok(token) => token,
            Err(err) => {
                // Uniform failure: wrong password and boundary outage look
                // the same to the caller. The log keeps the distinction
                tracing::warn!(
                    email,
                    category = err.code.category().name(),
                    "Login rejected"
                );
                return Err(AppError::invalid_credentials());
            }
        };
        let now = Utc::now();
        let marker = SessionMarker {
            token,
            email: email.to_string(),
            logged_in_at: now,
            expires_at: now + self.session_ttl,
        };
        self.store.save(SESSION_FILE, &marker)?;
        self.marker = Some(marker);
        tracing::info!(email, "Admin logged in");
        Ok(())
    }

    /// Drop both the in-memory flag and the persisted marker
    pub fn logout(&mut self) -> AppResult<()> {
        self.marker = None;
        self.store.remove(SESSION_FILE)?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Gate for admin-only mutations
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::not_authenticated())
        }
    }
}
