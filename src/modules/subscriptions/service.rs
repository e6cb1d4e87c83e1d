use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bookit_core::AppError;
use bookit_models::{Subscription, SubscriptionWithUser, User};

use crate::modules::users::UserService;

const SUBSCRIPTION_COLUMNS: &str = "id, from_date, to_date, user_id, created_at, updated_at";

const CREATE_FAILED: &str = "An error occurred while creating the subscription.";
const LIST_FAILED: &str = "An error occurred while retrieving subscriptions.";

pub struct SubscriptionService;

impl SubscriptionService {
    /// Stores a subscription for `user_id`. The range must already have been
    /// validated as `from_date < to_date`.
    #[instrument(skip(db))]
    pub async fn create_subscription(
        db: &PgPool,
        user_id: Uuid,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Subscription, AppError> {
        let subscription = sqlx::query_as::<_, Subscription>(&format!(
            "INSERT INTO subscriptions (from_date, to_date, user_id)
             VALUES ($1, $2, $3)
             RETURNING {}",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(from_date)
        .bind(to_date)
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from(e).context(CREATE_FAILED))?;

        Ok(subscription)
    }

    /// Every subscription with its owner, in insertion order.
    #[instrument(skip(db))]
    pub async fn get_subscriptions_with_users(
        db: &PgPool,
    ) -> Result<Vec<SubscriptionWithUser>, AppError> {
        let subscriptions = sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {} FROM subscriptions ORDER BY seq",
            SUBSCRIPTION_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(|e| AppError::from(e).context(LIST_FAILED))?;

        let mut owner_ids: Vec<Uuid> = subscriptions.iter().map(|s| s.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<Uuid, User> = UserService::find_many(db, &owner_ids)
            .await
            .map_err(|e| e.context(LIST_FAILED))?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        subscriptions
            .into_iter()
            .map(|subscription| {
                let user = owners
                    .get(&subscription.user_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::internal_error(format!(
                            "Owner of subscription {} not found",
                            subscription.id
                        ))
                        .context(LIST_FAILED)
                    })?;
                Ok(SubscriptionWithUser { subscription, user })
            })
            .collect()
    }
}
