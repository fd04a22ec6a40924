use anyhow::{anyhow, Result};

/// Maximum `day:shift` tokens accepted in one message. Seven days of
/// shifts fit well under this; anything larger is noise or abuse.
const MAX_TOKENS: usize = 32;

const MAX_TOKEN_LEN: usize = 30;

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Positive IDs should be within reasonable range for user chats (up to 2^31-1)
    if chat_id > 2147483647 {
        return Err(anyhow!("Invalid user chat ID range"));
    }

    // Negative IDs can be:
    // - Group chats: small negative numbers like -12345 (up to around -2^31)
    // - Supergroups: very large negative numbers starting around -1000000000000
    // Reject extremely large negative numbers beyond Telegram's known ranges
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}

/// Sanity bounds on a raw shift-token line before the parser sees it.
pub fn validate_shift_input(input: &str) -> Result<()> {
    let input = input.trim();

    if input.is_empty() {
        return Err(anyhow!("Shift input cannot be empty"));
    }

    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() > MAX_TOKENS {
        return Err(anyhow!("Too many shift tokens (max {})", MAX_TOKENS));
    }

    for token in tokens {
        if token.chars().count() > MAX_TOKEN_LEN {
            return Err(anyhow!(
                "Shift token '{}' is too long (max {} characters)",
                token,
                MAX_TOKEN_LEN
            ));
        }
    }

    Ok(())
}
