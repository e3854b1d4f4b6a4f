/**
 * User Model and Database Operations
 *
 * This module handles user records in the credential store.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::{UpdateProfileRequest, UserData};

const USER_COLUMNS: &str =
    "id, email, full_name, password_hash, bio, profile_pic, created_at, updated_at";

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (lowercased, unique)
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Free-form profile text
    pub bio: String,
    /// Avatar reference (URL), if set
    pub profile_pic: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Public view of the user, without the password hash
impl From<User> for UserData {
    fn from(user: User) -> Self {
        UserData {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            bio: user.bio,
            profile_pic: user.profile_pic,
        }
    }
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub bio: String,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - Normalized email, name, bio and the already-hashed password
///
/// # Returns
/// Created user or error (a duplicate email surfaces as a unique violation)
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, full_name, password_hash, bio, profile_pic, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, NULL, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.full_name)
    .bind(&new_user.password_hash)
    .bind(&new_user.bio)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(User {
        id,
        email: new_user.email,
        full_name: new_user.full_name,
        password_hash: new_user.password_hash,
        bio: new_user.bio,
        profile_pic: None,
        created_at: now,
        updated_at: now,
    })
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
    sqlx::query_as::<_, User>(&query)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List every user except `exclude`, ordered by name
pub async fn list_users_except(pool: &SqlitePool, exclude: Uuid) -> Result<Vec<User>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM users WHERE id != ? ORDER BY full_name, email",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&query)
        .bind(exclude)
        .fetch_all(pool)
        .await
}

/// Apply a profile update; absent fields keep their current value
///
/// # Returns
/// Updated user, or `None` if the user does not exist
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    update: &UpdateProfileRequest,
) -> Result<Option<User>, sqlx::Error> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE users
        SET full_name = COALESCE(?, full_name),
            bio = COALESCE(?, bio),
            profile_pic = COALESCE(?, profile_pic),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(update.full_name.as_deref().map(str::trim))
    .bind(update.bio.as_deref().map(str::trim))
    .bind(update.profile_pic.as_deref())
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_user_by_id(pool, id).await
}

/// Delete a user
///
/// Not exposed over HTTP; used for administration and tests.
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
