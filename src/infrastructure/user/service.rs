//! Account service for registration and authentication

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::roster::RosterGenerator;
use crate::domain::user::{validate_password, validate_username, NewUser, User};
use crate::domain::{Account, DomainError, GameStore};
use crate::infrastructure::observability::record_registration;

use super::password::PasswordHasher;

/// Request for registering a new manager
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Everything created by a successful registration
pub type Registration = Account;

/// Account service: registration with roster generation, and credential checks
pub struct AccountService<S: GameStore + ?Sized, H: PasswordHasher + ?Sized> {
    store: Arc<S>,
    hasher: Arc<H>,
    roster: Arc<RosterGenerator>,
}

impl<S: GameStore + ?Sized, H: PasswordHasher + ?Sized> AccountService<S, H> {
    pub fn new(store: Arc<S>, hasher: Arc<H>, roster: Arc<RosterGenerator>) -> Self {
        Self {
            store,
            hasher,
            roster,
        }
    }

    /// Register a manager and give them a generated team and squad
    pub async fn register(&self, request: RegisterRequest) -> Result<Registration, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.store.username_exists(&request.username).await? {
            return Err(DomainError::conflict("User already exists"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let account = self
            .store
            .create_account(NewUser::new(&request.username, password_hash), &self.roster)
            .await?;

        info!(
            user_id = %account.user.id(),
            team_id = %account.team.id(),
            players = account.players.len(),
            "Registered user"
        );
        record_registration();

        Ok(account)
    }

    /// Check a login name and password; `None` when either does not match
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.store.get_user_by_username(username).await? {
            Some(u) => u,
            None => {
                debug!(username = %username, "Login for unknown user");
                return Ok(None);
            }
        };

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(user_id = %user.id(), "Login with wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Get a user by login name
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.store.get_user_by_username(username).await
    }
}

impl<S: GameStore + ?Sized, H: PasswordHasher + ?Sized> std::fmt::Debug for AccountService<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("roster", &self.roster)
            .finish_non_exhaustive()
    }
}
