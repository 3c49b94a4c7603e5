//! Account, profile and user management endpoints.

use crate::error::{ClientError, Result};
use crate::http::{check_status, encode_segment, expect_success, read_json, read_text, send};
use crate::types::LoginRequest;
use audiobook_core::{PasswordChange, ProfileUpdate, Registration, Role, User, UserUpdate};
use reqwest::Client;
use tracing::{debug, info, warn};

/// User client for the audiobook backend.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Check credentials.
    ///
    /// The backend answers with the role as plain text.
    pub async fn login(&self, username: &str, password: &str) -> Result<Role> {
        let url = format!("{}/user/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        let request = LoginRequest { username, password };
        let response = send(self.http.post(&url).json(&request)).await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let role = Role::from_login_text(&body);
            info!(username = %username, role = %role, "Login successful");
            Ok(role)
        } else if status.is_client_error() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Login failed: invalid credentials");
            Err(ClientError::AuthFailed(
                "Invalid username or password".to_string(),
            ))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<String> {
        registration.validate()?;

        let url = format!("{}/user/register", self.base_url);
        debug!(url = %url, username = %registration.username, "Registering account");

        let response = send(self.http.post(&url).json(registration)).await?;
        let message = read_text(response).await?;

        info!(username = %registration.username, "Account registered");
        Ok(message)
    }

    /// Fetch a user's profile. The role may be absent.
    pub async fn get(&self, username: &str) -> Result<User> {
        let url = format!("{}/user/get-user/{}", self.base_url, encode_segment(username));
        debug!(url = %url, "Fetching user profile");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "user profile").await
    }

    /// List every user (admin).
    pub async fn list(&self) -> Result<Vec<User>> {
        let url = format!("{}/user/get-user", self.base_url);
        debug!(url = %url, "Listing users");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "user list").await
    }

    /// Update another user's details (admin).
    pub async fn update(&self, username: &str, update: &UserUpdate) -> Result<()> {
        let url = format!("{}/user/{}", self.base_url, encode_segment(username));
        debug!(url = %url, role = %update.role, "Updating user");

        let response = send(self.http.put(&url).json(update)).await?;
        expect_success(response).await?;

        info!(username = %username, "User updated");
        Ok(())
    }

    /// Delete a user (admin).
    pub async fn delete(&self, username: &str) -> Result<()> {
        let url = format!("{}/user/{}", self.base_url, encode_segment(username));
        debug!(url = %url, "Deleting user");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(username = %username, "User deleted");
        Ok(())
    }

    /// Update the caller's own profile.
    pub async fn update_profile(&self, username: &str, update: &ProfileUpdate) -> Result<()> {
        let url = format!(
            "{}/user/update-profile/{}",
            self.base_url,
            encode_segment(username)
        );
        debug!(url = %url, "Updating profile");

        let response = send(self.http.put(&url).json(update)).await?;
        expect_success(response).await?;

        info!(username = %username, "Profile updated");
        Ok(())
    }

    /// Change the caller's password.
    ///
    /// The server's error text (e.g. wrong old password) is surfaced as the message.
    pub async fn change_password(&self, username: &str, change: &PasswordChange) -> Result<()> {
        let url = format!(
            "{}/user/change-password/{}",
            self.base_url,
            encode_segment(username)
        );
        debug!(url = %url, "Changing password");

        let response = send(self.http.put(&url).json(change)).await?;
        check_status(response).await?;

        info!(username = %username, "Password changed");
        Ok(())
    }
}
