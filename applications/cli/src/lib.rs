//! Audiobook CLI Library
//!
//! Command-line front end for the audiobook platform: catalog browsing,
//! reviews, listening, personal voices and catalog administration.
//!
//! This library exposes the command handlers for testing purposes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod player;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use player::{GeneratedChapter, ListenController};

use audiobook_client::{AudiobookClient, AuthSession};
use audiobook_core::User;

/// Shared handles for one command invocation
pub struct Context {
    pub client: AudiobookClient,
    pub session: AuthSession,
}

impl Context {
    pub fn new(client: AudiobookClient, session: AuthSession) -> Self {
        Self { client, session }
    }

    /// The logged-in user, or [`CliError::NotLoggedIn`]
    pub fn require_user(&self) -> Result<User> {
        self.session.current_user().ok_or(CliError::NotLoggedIn)
    }

    /// The logged-in admin, or an error naming what is missing
    pub fn require_admin(&self) -> Result<User> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(CliError::NotAdmin);
        }
        Ok(user)
    }
}
