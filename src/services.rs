use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use log::{debug, info};
use rand::RngCore;
use thiserror::Error;

use crate::auth::AuthGate;
use crate::models::{ApiKey, Tweet, User};
use crate::store::{DocumentStore, StoreError};
use crate::validators::{is_valid_email, is_valid_username};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid Username. Username should have minimum 3 characters.")]
    InvalidUsername,
    #[error("Username already taken.")]
    UsernameTaken,
    #[error("Invalid Email Id.")]
    InvalidEmail,
    #[error("Email already registered.")]
    EmailTaken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Username is missing in the query.")]
    MissingUsername,
    #[error("Username does not exists. Please register first.")]
    UnknownUser,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum TweetError {
    #[error("Missing or Invalid api_key")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] StoreError),
}

// 16 random bytes encode to a fixed 22-character url-safe string.
const API_KEY_BYTES: usize = 16;

fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub struct CredentialService {
    store: Arc<DocumentStore>,
}

impl CredentialService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Registers a new user. Checks run in order: username shape, username
    /// uniqueness, email shape, email uniqueness; the first failure wins.
    pub async fn register(&self, username: &str, email: &str) -> Result<User, RegistrationError> {
        if !is_valid_username(username) {
            return Err(RegistrationError::InvalidUsername);
        }
        if self
            .store
            .find_user(|user| user.username == username)
            .await
            .is_some()
        {
            return Err(RegistrationError::UsernameTaken);
        }
        if !is_valid_email(email) {
            return Err(RegistrationError::InvalidEmail);
        }
        if self
            .store
            .find_user(|user| user.email == email)
            .await
            .is_some()
        {
            return Err(RegistrationError::EmailTaken);
        }

        let user = User {
            username: username.to_string(),
            email: email.to_string(),
        };
        self.store.append_user(user.clone()).await?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Issues a fresh api key for a known user. Re-issuing replaces the
    /// stored record, so any previously issued key stops resolving.
    pub async fn issue_api_key(&self, username: Option<&str>) -> Result<ApiKey, KeyError> {
        let username = match username {
            Some(name) if !name.is_empty() => name,
            _ => return Err(KeyError::MissingUsername),
        };
        if self
            .store
            .find_user(|user| user.username == username)
            .await
            .is_none()
        {
            return Err(KeyError::UnknownUser);
        }

        let key = ApiKey {
            username: username.to_string(),
            api_key: generate_api_key(),
        };
        self.store.upsert_api_key(key.clone()).await?;
        info!("Issued api key for {}", key.username);
        Ok(key)
    }
}

pub struct TweetService {
    store: Arc<DocumentStore>,
    gate: AuthGate,
}

impl TweetService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        let gate = AuthGate::new(store.clone());
        Self { store, gate }
    }

    /// All tweets in insertion order. No authentication required.
    pub async fn list(&self) -> Vec<Tweet> {
        self.store.tweets().await
    }

    // The tweet's username comes from the payload as-is; it is not required
    // to match the key holder.
    pub async fn create(
        &self,
        auth_header: Option<&str>,
        username: String,
        message: String,
    ) -> Result<(), TweetError> {
        let Some(key) = self.gate.resolve(auth_header).await else {
            return Err(TweetError::Unauthorized);
        };
        debug!("Tweet accepted via api key of {}", key.username);

        self.store.append_tweet(Tweet { username, message }).await?;
        Ok(())
    }
}
