use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub owner_id: i64,
    pub timezone: Tz,
    pub http_port: u16,
    pub reminder_lead_minutes: i64,
    pub nudge_interval_minutes: u64,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub roster_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let owner_id = env::var("OWNER_ID")
            .map_err(|_| anyhow!("OWNER_ID must be set"))?
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("Invalid OWNER_ID"))?;
        if owner_id == 0 {
            return Err(anyhow!("Invalid OWNER_ID"));
        }

        let tz_name = env::var("TZ").unwrap_or_else(|_| "Asia/Jerusalem".to_string());
        let timezone = tz_name
            .trim()
            .parse::<Tz>()
            .map_err(|_| anyhow!("Invalid TZ: {}", tz_name))?;

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let lead_str = env::var("REMINDER_LEAD_MINUTES").unwrap_or_else(|_| "5".to_string());
        let reminder_lead_minutes = lead_str
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("Invalid REMINDER_LEAD_MINUTES"))?;
        if !(0..=120).contains(&reminder_lead_minutes) {
            return Err(anyhow!("REMINDER_LEAD_MINUTES must be between 0 and 120"));
        }

        let nudge_str = env::var("NUDGE_INTERVAL_MINUTES").unwrap_or_else(|_| "10".to_string());
        let nudge_interval_minutes = nudge_str
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow!("Invalid NUDGE_INTERVAL_MINUTES"))?;
        if !(1..=180).contains(&nudge_interval_minutes) {
            return Err(anyhow!("NUDGE_INTERVAL_MINUTES must be between 1 and 180"));
        }

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let roster_model = env::var("ROSTER_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Config {
            telegram_bot_token: token,
            owner_id,
            timezone,
            http_port,
            reminder_lead_minutes,
            nudge_interval_minutes,
            openai_api_key,
            openai_base_url,
            roster_model,
        })
    }
}
