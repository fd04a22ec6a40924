use tracing::{info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: i64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: i64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs validation errors with consistent format
pub fn log_validation_error(command: &str, field: &str, value: &str, error: &str, user: &str, user_id: i64, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} - {} field '{}' invalid: {} - user {}({}) in chat {}",
        command, field, value, error, user, user_id, chat_id
    );
}

/// Logs access-control decisions with consistent format
pub fn log_access_event(event: &str, user: &str, user_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("ACCESS: {} - user {}({}) - {}", event, user, user_id, d),
        None => info!("ACCESS: {} - user {}({})", event, user, user_id),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
