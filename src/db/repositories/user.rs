use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::task;
use uuid::Uuid;

use crate::entities::{prelude::*, users};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create an account. Callers check for an existing email first; the
    /// unique column is the backstop against a concurrent double-register.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<String>,
        avatar: Option<String>,
        roles: &[String],
    ) -> Result<users::Model> {
        let password_hash = hash_password(password.to_string()).await?;

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.to_lowercase()),
            password_hash: Set(password_hash),
            name: Set(name.to_string()),
            phone: Set(phone),
            avatar: Set(avatar),
            roles: Set(serde_json::to_string(roles)?),
            created_at: Set(Utc::now().to_rfc3339()),
            last_login_at: Set(None),
        };

        Ok(user.insert(&self.conn).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        Ok(Users::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .one(&self.conn)
            .await?)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<users::Model>> {
        Ok(Users::find_by_id(id).one(&self.conn).await?)
    }

    /// Check credentials and stamp `last_login_at` on success. Returns
    /// `None` for both an unknown email and a wrong password so callers
    /// cannot tell the cases apart.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<users::Model>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            return Ok(None);
        }

        let mut active: users::ActiveModel = user.into();
        active.last_login_at = Set(Some(Utc::now().to_rfc3339()));
        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn update_profile(
        &self,
        id: &str,
        name: Option<String>,
        phone: Option<String>,
        avatar: Option<String>,
    ) -> Result<Option<users::Model>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(phone) = phone {
            active.phone = Set(Some(phone));
        }
        if let Some(avatar) = avatar {
            active.avatar = Set(Some(avatar));
        }

        Ok(Some(active.update(&self.conn).await?))
    }
}

/// Argon2 hashing is CPU-bound, so it runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow!("failed to hash password: {e}"))
    })
    .await
    .context("password hashing task panicked")?
}

pub async fn verify_password(password: String, stored_hash: String) -> Result<bool> {
    task::spawn_blocking(move || {
        let parsed =
            PasswordHash::new(&stored_hash).map_err(|e| anyhow!("corrupt password hash: {e}"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .context("password verification task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("correct horse".to_string()).await.unwrap();
        assert!(
            verify_password("correct horse".to_string(), hash.clone())
                .await
                .unwrap()
        );
        assert!(
            !verify_password("wrong horse".to_string(), hash)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same".to_string()).await.unwrap();
        let b = hash_password("same".to_string()).await.unwrap();
        assert_ne!(a, b);
    }
}
