// src/handlers/mod.rs

pub mod challenge;
pub mod content;
pub mod generate;
pub mod quiz;
pub mod score;

use crate::{error::AppError, models::score::validate_user_id};

/// Path segments skip the JSON extractor, so user ids taken from the URL are checked here.
pub(crate) fn check_user_id(user_id: &str) -> Result<(), AppError> {
    validate_user_id(user_id)
        .map_err(|_| AppError::BadRequest(format!("Invalid user id: {}", user_id)))
}
