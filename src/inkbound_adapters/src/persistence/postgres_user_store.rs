use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkbound_core::{Email, ProfileUpdate, User, UserId, UserStore, UserStoreError};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    phone: Option<String>,
    address: Option<String>,
    avatar_url: String,
    role: String,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, UserStoreError> {
        let email = Email::try_from(Secret::from(self.email))
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let role = self
            .role
            .parse()
            .map_err(|e: inkbound_core::UserError| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(User::from_parts(
            UserId::from(self.id),
            email,
            Secret::from(self.password_hash),
            self.name,
            self.phone,
            self.address,
            self.avatar_url,
            role,
            self.verified,
            self.created_at,
        ))
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, name, phone, address, avatar_url, role, verified, created_at";

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, name, phone, address, avatar_url, role, verified, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*user.id().as_uuid())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().expose_secret())
        .bind(user.name())
        .bind(user.phone())
        .bind(user.address())
        .bind(user.avatar_url())
        .bind(user.role().as_str())
        .bind(user.is_verified())
        .bind(user.created_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.into_user()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.into_user()
    }

    #[tracing::instrument(name = "Set new password hash", skip_all)]
    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
            .bind(password_hash.expose_secret())
            .bind(email.as_ref().expose_secret())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Marking user verified in PostgreSQL", skip_all)]
    async fn mark_verified(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET verified = TRUE WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, UserStoreError> {
        let query = format!(
            r#"
                UPDATE users
                SET name = COALESCE($2, name),
                    phone = COALESCE($3, phone),
                    address = COALESCE($4, address),
                    avatar_url = COALESCE($5, avatar_url)
                WHERE id = $1
                RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(*id.as_uuid())
            .bind(update.name)
            .bind(update.phone)
            .bind(update.address)
            .bind(update.avatar_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.into_user()
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
