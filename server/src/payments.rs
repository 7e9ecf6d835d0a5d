use std::sync::Arc;

use mongodb::bson::DateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{PaymentMethod, PaymentMethodView},
    error::ApiError,
    policy::{self, PAYMENT_ROLES},
    store::PaymentStore,
    token::Claims,
};

/// Admin-only registry of payment methods. Records are display data for the
/// client's selection screen; nothing is ever charged against them.
#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentStore>) -> Self {
        Self { payments }
    }

    pub async fn add(
        &self,
        claims: &Claims,
        kind: &str,
        details: &str,
    ) -> Result<PaymentMethodView, ApiError> {
        policy::require_role(claims, PAYMENT_ROLES)?;

        if kind.trim().is_empty() || details.trim().is_empty() {
            return Err(ApiError::Validation(
                "Payment method type and details are required".into(),
            ));
        }

        let now = DateTime::now();
        let method = PaymentMethod {
            id: Uuid::new_v4().to_string(),
            kind: kind.to_string(),
            details: details.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.payments.insert(&method).await?;
        info!(method = %method.id, kind = %method.kind, "Payment method added");

        Ok(PaymentMethodView::from(&method))
    }

    pub async fn list(&self, claims: &Claims) -> Result<Vec<PaymentMethodView>, ApiError> {
        policy::require_role(claims, PAYMENT_ROLES)?;

        let methods = self.payments.list().await?;
        Ok(methods.iter().map(PaymentMethodView::from).collect())
    }
}
