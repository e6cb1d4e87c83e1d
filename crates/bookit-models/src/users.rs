//! User records and the registration DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::input::{FieldInput, text};

/// A registered user. The password hash is never part of this struct.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload.
///
/// Fields take any JSON value so that a wrong type is reported against its
/// field. Uniqueness of `username` and `email` needs the database and is
/// checked by the registration service, which merges both sets of messages
/// into one `ValidationFailed` response.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct RegisterRequest {
    #[schema(value_type = Option<String>, example = "Jane Doe")]
    pub name: Option<FieldInput>,

    #[schema(value_type = Option<String>, example = "janedoe")]
    pub username: Option<FieldInput>,

    #[schema(value_type = Option<String>, example = "jane@example.com")]
    pub email: Option<FieldInput>,

    #[schema(value_type = Option<String>)]
    pub phone: Option<FieldInput>,

    #[schema(value_type = Option<String>, example = "secret123")]
    pub password: Option<FieldInput>,
}

impl RegisterRequest {
    pub fn name(&self) -> Option<&str> {
        text(&self.name)
    }

    pub fn username(&self) -> Option<&str> {
        text(&self.username)
    }

    pub fn email(&self) -> Option<&str> {
        text(&self.email)
    }

    /// The phone number, with a blank value treated as absent.
    pub fn phone(&self) -> Option<&str> {
        text(&self.phone).filter(|phone| !phone.trim().is_empty())
    }

    pub fn password(&self) -> Option<&str> {
        text(&self.password)
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&self.name, "name").and_then(|v| max_len(v, "name", 255));
        let username =
            required_text(&self.username, "username").and_then(|v| max_len(v, "username", 255));
        let email = required_text(&self.email, "email")
            .and_then(valid_email)
            .and_then(|v| max_len(v, "email", 255));
        let phone = optional_text(&self.phone, "phone")
            .and_then(|v| v.map_or(Ok(""), |v| max_len(v, "phone", 15)));
        let password = required_text(&self.password, "password").and_then(min_password_len);

        for (field, result) in [
            ("name", name),
            ("username", username),
            ("email", email),
            ("phone", phone),
            ("password", password),
        ] {
            if let Err(error) = result {
                errors.add(field, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn rule(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn required_text<'a>(
    field: &'a Option<FieldInput>,
    label: &str,
) -> Result<&'a str, ValidationError> {
    match optional_text(field, label)? {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(rule("required", format!("The {} field is required.", label))),
    }
}

fn optional_text<'a>(
    field: &'a Option<FieldInput>,
    label: &str,
) -> Result<Option<&'a str>, ValidationError> {
    match field {
        None => Ok(None),
        Some(FieldInput::Text(value)) => Ok(Some(value)),
        Some(FieldInput::NotText) => {
            Err(rule("string", format!("The {} field must be a string.", label)))
        }
    }
}

fn max_len<'a>(value: &'a str, label: &str, max: usize) -> Result<&'a str, ValidationError> {
    if value.chars().count() > max {
        return Err(rule(
            "length",
            format!("The {} field must not be greater than {} characters.", label, max),
        ));
    }
    Ok(value)
}

fn min_password_len(value: &str) -> Result<&str, ValidationError> {
    if value.chars().count() < 6 {
        return Err(rule(
            "length",
            "The password field must be at least 6 characters.".to_string(),
        ));
    }
    Ok(value)
}

fn valid_email(value: &str) -> Result<&str, ValidationError> {
    if !value.to_string().validate_email() {
        return Err(rule(
            "email",
            "The email field must be a valid email address.".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            name: Some("Jane Doe".into()),
            username: Some("janedoe".into()),
            email: Some("jane@example.com".into()),
            phone: None,
            password: Some("secret123".into()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("phone"));
    }

    #[test]
    fn test_blank_name_is_required() {
        let request = RegisterRequest {
            name: Some("   ".into()),
            ..valid_request()
        };
        assert!(request.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_short_password_rejected() {
        let request = RegisterRequest {
            password: Some("12345".into()),
            ..valid_request()
        };
        assert!(
            request
                .validate()
                .unwrap_err()
                .field_errors()
                .contains_key("password")
        );
    }

    #[test]
    fn test_long_phone_rejected() {
        let request = RegisterRequest {
            phone: Some("1234567890123456".into()),
            ..valid_request()
        };
        assert!(request.validate().unwrap_err().field_errors().contains_key("phone"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = RegisterRequest {
            email: Some("not-an-email".into()),
            ..valid_request()
        };
        assert!(request.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn test_non_string_fields_are_reported_per_field() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name": 5, "username": "janedoe", "email": "jane@example.com",
                "phone": 5550100, "password": "secret123"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields["name"][0].message.as_deref(),
            Some("The name field must be a string.")
        );
        assert_eq!(
            fields["phone"][0].message.as_deref(),
            Some("The phone field must be a string.")
        );
    }

    #[test]
    fn test_blank_phone_is_absent() {
        let request = RegisterRequest {
            phone: Some("  ".into()),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.phone(), None);
    }

    #[test]
    fn test_user_serialization_has_no_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Jane".to_string(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "jane");
    }
}
