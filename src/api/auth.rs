//! Authentication endpoints

use super::types::{AuthResponse, User};
use super::ApiClient;
use crate::error::{Result, TaskmateError};
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    fullname: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Check login fields before contacting the backend
///
/// # Errors
///
/// Returns `TaskmateError::Validation` if any field is blank or the email
/// lacks an `@`
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(TaskmateError::Validation("Please fill in all fields".to_string()).into());
    }
    if !email.contains('@') {
        return Err(
            TaskmateError::Validation("Please enter a valid email address".to_string()).into(),
        );
    }
    Ok(())
}

impl ApiClient {
    /// Log in and store the issued token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        validate_credentials(email, password)?;
        let builder = self
            .request(Method::POST, "/auth/login")?
            .json(&LoginRequest { email, password });
        let auth: AuthResponse = self.send_json(builder).await?;
        self.tokens.save(&auth.token)?;
        tracing::info!("Logged in as {}", email);
        Ok(auth)
    }

    /// Create an account and store the issued token
    pub async fn register(&self, fullname: &str, email: &str, password: &str) -> Result<AuthResponse> {
        if fullname.trim().is_empty() {
            return Err(TaskmateError::Validation("Please fill in all fields".to_string()).into());
        }
        validate_credentials(email, password)?;
        let builder = self
            .request(Method::POST, "/auth/register")?
            .json(&RegisterRequest {
                fullname,
                email,
                password,
            });
        let auth: AuthResponse = self.send_json(builder).await?;
        self.tokens.save(&auth.token)?;
        tracing::info!("Registered {}", email);
        Ok(auth)
    }

    /// Fetch the signed-in user's profile
    ///
    /// # Errors
    ///
    /// Returns `TaskmateError::MissingCredentials` when no token is stored,
    /// without making a request
    pub async fn profile(&self) -> Result<User> {
        if self.tokens.load()?.is_none() {
            return Err(TaskmateError::MissingCredentials(
                "not logged in, run `taskmate login`".to_string(),
            )
            .into());
        }
        let builder = self.request(Method::GET, "/users/me")?;
        self.send_json(builder).await
    }

    /// Forget the stored token
    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()
    }
}
