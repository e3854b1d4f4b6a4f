/**
 * User Payloads
 *
 * Request and response bodies for the authentication and user endpoints.
 * `UserData` is the public shape of a user: everything the server stores
 * except the password hash.
 *
 * # Wire Format
 *
 * Field names are camelCase and the identifier is serialized as `_id`,
 * which is what the browser client reads:
 *
 * ```json
 * {
 *   "_id": "0d1c...",
 *   "email": "a@x.com",
 *   "fullName": "Ada",
 *   "bio": "",
 *   "profilePic": null
 * }
 * ```
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Public user profile (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// Signup request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub bio: String,
}

impl SignupRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Validate and normalize the request in place.
    ///
    /// The email is trimmed and lowercased. A missing full name falls back to
    /// the local part of the email address.
    pub fn normalize(&mut self) -> Result<(), SharedError> {
        self.email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "Password is required"));
        }
        self.full_name = self.full_name.trim().to_string();
        if self.full_name.is_empty() {
            self.full_name = self.email.split('@').next().unwrap_or_default().to_string();
        }
        self.bio = self.bio.trim().to_string();
        Ok(())
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn normalize(&mut self) -> Result<(), SharedError> {
        self.email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

/// Profile update body; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.full_name.is_none() && self.bio.is_none() && self.profile_pic.is_none() {
            return Err(SharedError::validation("profile", "Nothing to update"));
        }
        if let Some(name) = &self.full_name {
            if name.trim().is_empty() {
                return Err(SharedError::validation("fullName", "Full name cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Response for signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user_data: UserData,
    pub message: String,
}

/// Response for `GET /api/auth/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAuthResponse {
    pub success: bool,
    pub user_data: UserData,
}

/// Response for `PUT /api/auth/update-profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub user: UserData,
    pub message: String,
}

/// Response for `GET /api/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserData>,
}

fn normalize_email(email: &str) -> Result<String, SharedError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(SharedError::validation("email", "Email address is required"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(SharedError::validation("email", "Invalid email format")),
    }
}
