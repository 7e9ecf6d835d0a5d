use async_graphql::{Error as GraphqlError, ErrorExtensions};
use thiserror::Error;

use crate::store::StoreError;

/// Every failure a resolver can surface. `NotFoundOrForbidden` deliberately
/// covers "missing", "wrong owner" and "wrong status" with one answer so the
/// caller cannot tell them apart.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found or access denied")]
    NotFoundOrForbidden(&'static str),

    #[error("Insufficient role for this action")]
    Forbidden,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFoundOrForbidden(_) => "NOT_FOUND_OR_FORBIDDEN",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> GraphqlError {
        let code = self.code();
        GraphqlError::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(
            ApiError::Validation("x".into()).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            ApiError::NotFoundOrForbidden("Order").code(),
            "NOT_FOUND_OR_FORBIDDEN"
        );
        assert_eq!(ApiError::Forbidden.code(), "FORBIDDEN");
        assert_eq!(ApiError::Unauthenticated.code(), "UNAUTHENTICATED");
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(
            ApiError::NotFoundOrForbidden("Order").to_string(),
            "Order not found or access denied"
        );
    }
}
