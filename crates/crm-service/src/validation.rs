//! Input validation helpers shared by the services.

use validator::{Validate, ValidationError};

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_entity::client::Address;

/// Runs `validator` rules and converts failures into a 400 with field details.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        AppError::validation("Validation failed").with_details(details)
    })
}

/// Names must have at least two non-blank characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if (2..=255).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::new("length")
            .with_message("Name must be between 2 and 255 characters".into()))
    }
}

/// Every address field is required.
pub fn validate_address(address: &Address) -> Result<(), ValidationError> {
    let blank = address.blank_fields();
    if blank.is_empty() {
        return Ok(());
    }
    let mut error = ValidationError::new("required")
        .with_message(format!("Address fields required: {}", blank.join(", ")).into());
    error.add_param("fields".into(), &blank);
    Err(error)
}
