use crate::error::ApiError;

/// Highest task number served; tasks cycle through their pool long before this
pub const MAX_TASK_ID: u32 = 10_000;

/// Validate a 1-based task number
///
/// # Examples
/// ```
/// use solo_api::validation::validate_task_id;
///
/// assert!(validate_task_id(1).is_ok());
/// assert!(validate_task_id(0).is_err());
/// ```
pub fn validate_task_id(task_id: u32) -> Result<(), ApiError> {
    if task_id == 0 {
        return Err(ApiError::Validation(
            "Task numbers start at 1".to_string(),
        ));
    }

    if task_id > MAX_TASK_ID {
        return Err(ApiError::Validation(format!(
            "Invalid task number: {}. Must be at most {}",
            task_id, MAX_TASK_ID
        )));
    }

    Ok(())
}
