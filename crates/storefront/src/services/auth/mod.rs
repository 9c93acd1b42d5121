//! Authentication service boundary.
//!
//! There is no credential store behind this storefront. [`AuthService`] is
//! the seam a real identity provider would plug into; today the only
//! implementation is [`SimulatedAuthService`], a stub that waits for a
//! configurable delay and accepts any non-empty input.

mod error;

pub use error::AuthError;

use std::future::Future;
use std::time::Duration;

use crate::models::User;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Sign-in and account creation.
pub trait AuthService: Send + Sync {
    /// Sign in with email and password.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Create an account and sign in.
    fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;
}

/// Stub authentication: no verification, just latency.
///
/// Never use this where real credentials matter.
#[derive(Debug, Clone)]
pub struct SimulatedAuthService {
    latency: Duration,
}

impl SimulatedAuthService {
    /// Create a stub that waits `latency` before answering.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl AuthService for SimulatedAuthService {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_round_trip().await;

        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = User::from_login(email);
        tracing::debug!(user = %user.name, "simulated login accepted");
        Ok(user)
    }

    #[tracing::instrument(skip(self, password))]
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_round_trip().await;

        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = User {
            name: name.to_owned(),
            email: email.to_owned(),
        };
        tracing::debug!(user = %user.name, "simulated signup accepted");
        Ok(user)
    }
}

// =============================================================================
// Signup Form Validation
// =============================================================================

/// Check a signup form before calling the service.
///
/// Rules are checked in order and the first failure wins.
///
/// # Errors
///
/// Returns the message to show beside the form.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), &'static str> {
    if [name, email, password, confirm_password]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err("Please fill in all fields");
    }
    if password != confirm_password {
        return Err("Passwords do not match");
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn instant() -> SimulatedAuthService {
        SimulatedAuthService::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_accepts_non_empty_input() {
        let user = instant().login(" kid@example.com ", "hunter2").await.unwrap();
        assert_eq!(user.name, "kid");
        assert_eq!(user.email, "kid@example.com");
    }

    #[tokio::test]
    async fn test_login_accepts_non_email_identifier() {
        let user = instant().login("bob", "pw").await.unwrap();
        assert_eq!(user.name, "bob");
        assert_eq!(user.email, "bob");
    }

    #[tokio::test]
    async fn test_login_rejects_blank_fields() {
        assert!(matches!(
            instant().login("kid@example.com", "   ").await,
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            instant().login("", "secret").await,
            Err(AuthError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn test_signup_keeps_given_name() {
        let user = instant()
            .signup("Ada", "ada@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn test_signup_accepts_any_non_empty_email() {
        let user = instant()
            .signup("Ada", "not-an-email", "secret1")
            .await
            .unwrap();
        assert_eq!(user.email, "not-an-email");
        assert!(matches!(
            instant().signup("Ada", "  ", "secret1").await,
            Err(AuthError::MissingFields)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let service = SimulatedAuthService::new(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        service.login("kid@example.com", "pw").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[test]
    fn test_signup_validation_order() {
        assert_eq!(
            validate_signup("", "a@b.c", "short", "other"),
            Err("Please fill in all fields")
        );
        assert_eq!(
            validate_signup("Ada", "a@b.c", "short", "other"),
            Err("Passwords do not match")
        );
        assert_eq!(
            validate_signup("Ada", "a@b.c", "short", "short"),
            Err("Password must be at least 6 characters")
        );
        assert_eq!(validate_signup("Ada", "a@b.c", "secret", "secret"), Ok(()));
    }
}
