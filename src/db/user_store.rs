use async_trait::async_trait;
use chrono::Utc;

use crate::{
    db::DbPool,
    error::{AuthError, Result},
    models::{Identity, Role, User},
    services::auth_service::{Authenticator, hash_password, verify_password},
    validation::{ValidationError, required_text},
};

/// User store for database operations
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Create a new UserStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a user by username
    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> std::result::Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, name, role, password_hash, last_edit FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user, or replace the name, role and password of an existing one.
    ///
    /// Username and name are trimmed; none of the three may be blank.
    pub async fn save_user(
        &self,
        username: &str,
        name: &str,
        role: Role,
        password: &str,
    ) -> Result<User> {
        let username = required_text("username", username)?;
        let name = required_text("name", name)?;
        if password.is_empty() {
            return Err(ValidationError::Required {
                field: "password".to_string(),
            }
            .into());
        }
        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, name, role, password_hash, last_edit)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(username) DO UPDATE SET
                name = excluded.name,
                role = excluded.role,
                password_hash = excluded.password_hash,
                last_edit = excluded.last_edit
            RETURNING id, username, name, role, password_hash, last_edit
            "#,
        )
        .bind(&username)
        .bind(&name)
        .bind(role)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(username = %user.username, role = %user.role, "Saved user");
        Ok(user)
    }
}

#[async_trait]
impl Authenticator for UserStore {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<Identity, AuthError> {
        let user = self
            .get_user_by_username(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db_pool, migrate};
    use crate::error::AppError;

    async fn setup_store() -> UserStore {
        let pool = init_db_pool("sqlite::memory:", 1).await.unwrap();
        migrate(&pool).await.unwrap();
        UserStore::new(pool)
    }

    #[tokio::test]
    async fn test_authenticate_known_user() {
        let store = setup_store().await;
        store
            .save_user("manager", "Manager One", Role::Manager, "manager123")
            .await
            .unwrap();

        let identity = store.authenticate("manager", "manager123").await.unwrap();
        assert_eq!(identity.username, "manager");
        assert_eq!(identity.name, "Manager One");
        assert_eq!(identity.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let store = setup_store().await;
        store
            .save_user("driver", "Driver One", Role::Driver, "driver123")
            .await
            .unwrap();

        assert!(matches!(
            store.authenticate("driver", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("ghost", "driver123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_save_user_replaces_existing() {
        let store = setup_store().await;
        let first = store
            .save_user("driver", "Driver One", Role::Driver, "old")
            .await
            .unwrap();
        let second = store
            .save_user("driver", "Driver Uno", Role::Manager, "new")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.role, Role::Manager);
        assert!(store.authenticate("driver", "old").await.is_err());
        assert!(store.authenticate("driver", "new").await.is_ok());
    }

    #[tokio::test]
    async fn test_save_user_trims_username_and_name() {
        let store = setup_store().await;
        let user = store
            .save_user("  manager ", " Manager One\t", Role::Manager, "manager123")
            .await
            .unwrap();

        assert_eq!(user.username, "manager");
        assert_eq!(user.name, "Manager One");
        let identity = store.authenticate("manager", "manager123").await.unwrap();
        assert_eq!(identity.name, "Manager One");
    }

    #[tokio::test]
    async fn test_save_user_rejects_blank_fields() {
        let store = setup_store().await;
        let cases = [
            ("username", ("   ", "Driver One", "driver123")),
            ("name", ("driver", "", "driver123")),
            ("password", ("driver", "Driver One", "")),
        ];

        for (field, (username, name, password)) in cases {
            let err = store
                .save_user(username, name, Role::Driver, password)
                .await
                .unwrap_err();
            assert!(
                matches!(&err, AppError::Validation(e) if e.field() == field),
                "unexpected error for {field}: {err:?}"
            );
        }
        assert!(store.get_user_by_username("driver").await.unwrap().is_none());
    }
}
