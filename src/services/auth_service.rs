use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;

use crate::{
    error::AuthError,
    models::{Claims, Identity, LoginRequest, LoginResponse},
};

/// Verifies a username/password pair and tells who the caller is
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError>;
}

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt);
    let salt = SaltString::encode_b64(&salt)?;

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored argon2 hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Logs users in and issues/verifies their session tokens
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_lifetime: Duration,
}

impl AuthService {
    pub fn new(authenticator: Arc<dyn Authenticator>, jwt_secret: &str, expiration_hours: i64) -> Self {
        Self {
            authenticator,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_lifetime: Duration::hours(expiration_hours),
        }
    }

    /// Check the credentials and open a session
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let identity = match self
            .authenticator
            .authenticate(&request.username, &request.password)
            .await
        {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(username = %request.username, "Login failed: {}", e);
                return Err(e);
            }
        };

        let token = self.issue_token(&identity)?;
        tracing::info!(username = %identity.username, role = %identity.role, "User logged in");

        Ok(LoginResponse {
            token,
            username: identity.username,
            name: identity.name,
            role: identity.role,
        })
    }

    /// Sign a session token for `identity`
    pub fn issue_token(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.username.clone(),
            name: identity.name.clone(),
            role: identity.role,
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.token_lifetime).timestamp().max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }

    /// Validate a session token and recover the identity it was issued to
    pub fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;

        Ok(Identity {
            username: data.claims.sub,
            name: data.claims.name,
            role: data.claims.role,
        })
    }
}
