use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, lastname, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with a hashed password. The store assigns the id.
    pub async fn create(
        db: &PgPool,
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (firstname, lastname, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, firstname, lastname, email, password_hash, created_at
            "#,
        )
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_serialization_skips_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            firstname: "A".into(),
            lastname: "B".into(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("a@b.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
