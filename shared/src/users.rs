//! User accounts and the admin user-management forms.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::null_as_default;

/// Server-assigned user identifier. Numeric ids are kept as their decimal
/// text.
pub type UserId = String;

fn id_text<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid user id: {other}"))),
    }
}

/// Account type, which also selects the description audience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Full moderation rights.
    Admin,
    /// Teaching staff.
    InternalTeacher,
    /// Business partners.
    InternalBusiness,
    /// Everyone else.
    #[default]
    #[serde(alias = "external_user")]
    External,
}

impl UserType {
    /// Every type, in the order the create form offers them.
    pub const ALL: [UserType; 4] = [
        UserType::External,
        UserType::InternalTeacher,
        UserType::InternalBusiness,
        UserType::Admin,
    ];

    /// Wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::InternalTeacher => "internal_teacher",
            UserType::InternalBusiness => "internal_business",
            UserType::External => "external",
        }
    }

    /// Label used in tables and forms.
    pub const fn label(self) -> &'static str {
        match self {
            UserType::Admin => "Admin",
            UserType::InternalTeacher => "Internal Teacher",
            UserType::InternalBusiness => "Internal Business",
            UserType::External => "External User",
        }
    }

    /// Label used next to the signed-in user's name.
    pub const fn header_label(self) -> &'static str {
        match self {
            UserType::Admin => "Administrator",
            other => other.label(),
        }
    }

    /// Parses a wire value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "external_user" => Some(UserType::External),
            raw => UserType::ALL.into_iter().find(|kind| kind.as_str() == raw),
        }
    }
}

/// What the dashboard renders differently for admins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Moderation controls, all descriptions.
    Admin,
    /// Read-only, own audience description.
    #[default]
    Member,
}

impl Role {
    /// Whether admin-only UI is shown.
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl From<UserType> for Role {
    fn from(kind: UserType) -> Self {
        match kind {
            UserType::Admin => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// A user account as listed by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identifier.
    #[serde(deserialize_with = "id_text")]
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Given name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    /// Account type.
    #[serde(default)]
    pub user_type: UserType,
    /// Free-form gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Disabled accounts cannot sign in.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Server timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// `First Last`, falling back to the email.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    /// Date part of `created_at`.
    pub fn created_date(&self) -> Option<&str> {
        self.created_at
            .as_deref()
            .map(|stamp| stamp.split(['T', ' ']).next().unwrap_or(stamp))
    }
}

/// Gender choices offered by the create form.
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// Why a create form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is blank.
    #[error("{0} is required")]
    Missing(&'static str),
    /// Password left blank.
    #[error("Please enter or generate a password")]
    MissingPassword,
    /// Email without an `@`.
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account type.
    pub user_type: UserType,
    /// Optional gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Optional `YYYY-MM-DD` birth date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl NewUser {
    /// Checks the fields the server requires before sending anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::Missing("Email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::Missing("First name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::Missing("Last name"));
        }
        Ok(())
    }

    /// Trims text fields and turns blank optional fields into `None`.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.gender = self.gender.filter(|value| !value.trim().is_empty());
        self.date_of_birth = self.date_of_birth.filter(|value| !value.trim().is_empty());
        self
    }
}

/// Body of `PUT /api/users/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New account type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    /// Enable or disable the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserPatch {
    /// Patch that only flips the active flag.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

/// Toast text after toggling an account.
pub fn activation_message(is_active: bool) -> String {
    let verb = if is_active { "activated" } else { "deactivated" };
    format!("User {verb} successfully!")
}

/// Characters used by [`generate_password`].
pub const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";
/// Length of generated passwords.
pub const PASSWORD_LENGTH: usize = 12;

/// Builds a password from [`PASSWORD_CHARSET`].
///
/// `pick(n)` must return an index below `n`; callers plug in their platform's
/// random source.
pub fn generate_password(mut pick: impl FnMut(usize) -> usize) -> String {
    (0..PASSWORD_LENGTH)
        .map(|_| {
            let index = pick(PASSWORD_CHARSET.len()) % PASSWORD_CHARSET.len();
            char::from(PASSWORD_CHARSET[index])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form() -> NewUser {
        NewUser {
            email: "ada@example.org".into(),
            password: "s3cret!".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            user_type: UserType::InternalTeacher,
            gender: None,
            date_of_birth: None,
        }
    }

    #[test]
    fn blank_password_asks_to_generate_one() {
        let mut user = form();
        user.password.clear();
        let err = user.validate().expect_err("blank password");
        assert_eq!(err.to_string(), "Please enter or generate a password");
    }

    #[test]
    fn validation_checks_required_fields_and_email() {
        assert!(form().validate().is_ok());

        let mut no_at = form();
        no_at.email = "ada.example.org".into();
        assert_eq!(no_at.validate(), Err(ValidationError::InvalidEmail));

        let mut nameless = form();
        nameless.last_name = "  ".into();
        assert_eq!(nameless.validate(), Err(ValidationError::Missing("Last name")));
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let mut user = form();
        user.gender = Some(" ".into());
        user.date_of_birth = Some("1990-01-01".into());
        let user = user.normalized();
        assert_eq!(user.gender, None);
        assert_eq!(user.date_of_birth.as_deref(), Some("1990-01-01"));

        let body = serde_json::to_value(&user).expect("serialize");
        assert!(body.get("gender").is_none());
        assert_eq!(body["user_type"], json!("internal_teacher"));
    }

    #[test]
    fn generated_password_uses_charset_and_length() {
        let mut counter = 0;
        let password = generate_password(|n| {
            counter += 7;
            counter % n
        });
        assert_eq!(password.len(), PASSWORD_LENGTH);
        assert!(password.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
    }

    #[test]
    fn active_patch_serializes_only_flag() {
        let body = serde_json::to_value(UserPatch::active(false)).expect("serialize");
        assert_eq!(body, json!({"is_active": false}));
        assert_eq!(activation_message(true), "User activated successfully!");
    }

    #[test]
    fn user_payload_parses_with_defaults() {
        let user: User = serde_json::from_value(json!({
            "id": "u-1",
            "email": "x@y.z",
            "user_type": "external_user",
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .expect("user");
        assert_eq!(user.user_type, UserType::External);
        assert!(user.is_active);
        assert_eq!(user.display_name(), "x@y.z");
        assert_eq!(user.created_date(), Some("2024-03-01"));
        assert_eq!(Role::from(user.user_type), Role::Member);

        let numeric: User = serde_json::from_value(json!({"id": 17, "email": "n@y.z"})).expect("user");
        assert_eq!(numeric.id, "17");
        assert_eq!(UserType::Admin.header_label(), "Administrator");
    }

    #[test]
    fn null_names_fall_back_to_email() {
        let user: User = serde_json::from_value(json!({
            "id": "u-2",
            "email": "null@y.z",
            "first_name": null,
            "last_name": null
        }))
        .expect("user");
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "");
        assert_eq!(user.display_name(), "null@y.z");
    }
}
