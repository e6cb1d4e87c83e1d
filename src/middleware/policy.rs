//! Role-based authorization.
//!
//! Every protected action is listed in one table mapping it to the role it
//! requires and the message returned when the caller lacks that role.
//! Handlers declare the action through an extractor generated by
//! [`require_action!`], so the check runs before the handler body and before
//! any lookup of the target resource.

use bookit_core::AppError;
use bookit_models::RoleName;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateBooking,
    ApproveBooking,
    ListBookings,
    DeleteBooking,
    CreateSubscription,
    ListSubscriptions,
}

/// What an [`Action`] demands of the caller. `None` means any authenticated
/// user may perform it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub required_role: Option<RoleName>,
    pub denial: &'static str,
}

impl Action {
    pub fn rule(self) -> Rule {
        match self {
            Action::CreateBooking => Rule {
                required_role: Some(RoleName::User),
                denial: "Only users can create bookings.",
            },
            Action::ApproveBooking => Rule {
                required_role: Some(RoleName::Admin),
                denial: "Only admins can approve bookings.",
            },
            Action::ListBookings => Rule {
                required_role: Some(RoleName::Admin),
                denial: "Only admins can view all bookings.",
            },
            Action::DeleteBooking => Rule {
                required_role: Some(RoleName::Admin),
                denial: "Only admins can delete bookings.",
            },
            Action::CreateSubscription => Rule {
                required_role: None,
                denial: "",
            },
            Action::ListSubscriptions => Rule {
                required_role: Some(RoleName::Admin),
                denial: "Only admins can view all subscriptions.",
            },
        }
    }
}

/// Checks `auth_user` against the rule for `action`.
pub fn authorize(auth_user: &AuthUser, action: Action) -> Result<(), AppError> {
    let rule = action.rule();
    match rule.required_role {
        Some(role) if !auth_user.has_role(role) => {
            tracing::warn!(
                user_id = %auth_user.user.id,
                action = ?action,
                required_role = %role,
                "Authorization denied"
            );
            Err(AppError::forbidden(rule.denial.to_string()))
        }
        _ => Ok(()),
    }
}

/// Declares an extractor that authenticates the caller and authorizes one
/// [`Action`].
#[macro_export]
macro_rules! require_action {
    ($name:ident, $action:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = bookit_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::policy::authorize(&auth_user, $action)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_action!(CanCreateBooking, Action::CreateBooking);
require_action!(CanApproveBooking, Action::ApproveBooking);
require_action!(CanListBookings, Action::ListBookings);
require_action!(CanDeleteBooking, Action::DeleteBooking);
require_action!(CanCreateSubscription, Action::CreateSubscription);
require_action!(CanListSubscriptions, Action::ListSubscriptions);
