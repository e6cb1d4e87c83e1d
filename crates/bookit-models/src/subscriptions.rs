//! Subscription domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dates::parse_date;
use crate::input::{FieldInput, text};
use crate::users::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subscription {
    pub id: Uuid,
    #[serde(rename = "fromDate")]
    pub from_date: NaiveDate,
    #[serde(rename = "toDate")]
    pub to_date: NaiveDate,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionWithUser {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub user: User,
}

/// Subscription creation payload.
///
/// Dates are taken as any JSON value and checked by [`Validate`], so a
/// missing, non-string or unparseable value is reported per field rather than
/// as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[schema(value_type = Option<String>, example = "2025-01-01")]
    pub from_date: Option<FieldInput>,
    #[schema(value_type = Option<String>, example = "2025-12-31")]
    pub to_date: Option<FieldInput>,
}

impl CreateSubscriptionRequest {
    /// Both dates, once they have passed validation.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = parse_date(text(&self.from_date)?)?;
        let to = parse_date(text(&self.to_date)?)?;
        Some((from, to))
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn check_date(value: Option<&FieldInput>, label: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || {
        ValidationError::new("date")
            .with_message(format!("The {} field must be a valid date.", label).into())
    };
    match value {
        None => Err(required(label)),
        Some(FieldInput::NotText) => Err(invalid()),
        Some(FieldInput::Text(value)) if value.trim().is_empty() => Err(required(label)),
        Some(FieldInput::Text(value)) => parse_date(value).ok_or_else(invalid),
    }
}

fn required(label: &str) -> ValidationError {
    ValidationError::new("required").with_message(format!("The {} field is required.", label).into())
}

impl Validate for CreateSubscriptionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let from = check_date(self.from_date.as_ref(), "from date");
        let to = check_date(self.to_date.as_ref(), "to date");

        if let Err(e) = &from {
            errors.add("fromDate", e.clone());
        }
        match (&from, to) {
            (_, Err(e)) => errors.add("toDate", e),
            (Ok(from), Ok(to)) if to <= *from => errors.add(
                "toDate",
                field_error("after", "The to date field must be a date after from date."),
            ),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    #[schema(example = "Subscription created successfully.")]
    pub message: String,
    pub subscription: Subscription,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionListResponse {
    #[schema(example = "Subscriptions retrieved successfully.")]
    pub message: String,
    pub subscriptions: Vec<SubscriptionWithUser>,
}
