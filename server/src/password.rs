use crate::error::ApiError;

pub fn hash(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| ApiError::Internal(e.to_string()))
}

pub fn verify(password: &str, hashed: &str) -> Result<bool, ApiError> {
    bcrypt::verify(password, hashed).map_err(|e| ApiError::Internal(e.to_string()))
}
