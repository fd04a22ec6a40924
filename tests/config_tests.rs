#![allow(clippy::unwrap_used)]

use shift_reminder_bot::config::Config;
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env() {
    for var in [
        "TELEGRAM_BOT_TOKEN",
        "OWNER_ID",
        "TZ",
        "HTTP_PORT",
        "REMINDER_LEAD_MINUTES",
        "NUDGE_INTERVAL_MINUTES",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "ROSTER_MODEL",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("OWNER_ID", "42");
    env::set_var("TZ", "Europe/London");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("REMINDER_LEAD_MINUTES", "7");
    env::set_var("NUDGE_INTERVAL_MINUTES", "15");
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::set_var("ROSTER_MODEL", "gpt-4o");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.owner_id, 42);
    assert_eq!(config.timezone, chrono_tz::Europe::London);
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.reminder_lead_minutes, 7);
    assert_eq!(config.nudge_interval_minutes, 15);
    assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.roster_model, "gpt-4o");

    clear_env();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("OWNER_ID", "42");

    let config = Config::from_env().unwrap();

    assert_eq!(config.timezone, chrono_tz::Asia::Jerusalem);
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.reminder_lead_minutes, 5);
    assert_eq!(config.nudge_interval_minutes, 10);
    assert!(config.openai_api_key.is_none());
    assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
    assert_eq!(config.roster_model, "gpt-4o-mini");

    clear_env();
}

#[test]
fn test_config_requires_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("OWNER_ID", "42");
    assert!(Config::from_env().is_err());

    env::set_var("TELEGRAM_BOT_TOKEN", "   ");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_requires_owner() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    assert!(Config::from_env().is_err());

    env::set_var("OWNER_ID", "not-a-number");
    assert!(Config::from_env().is_err());

    env::set_var("OWNER_ID", "0");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_rejects_bad_values() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("OWNER_ID", "42");

    env::set_var("TZ", "Atlantis/Nowhere");
    assert!(Config::from_env().is_err());
    env::remove_var("TZ");

    env::set_var("HTTP_PORT", "not-a-port");
    assert!(Config::from_env().is_err());
    env::remove_var("HTTP_PORT");

    env::set_var("REMINDER_LEAD_MINUTES", "500");
    assert!(Config::from_env().is_err());
    env::remove_var("REMINDER_LEAD_MINUTES");

    env::set_var("NUDGE_INTERVAL_MINUTES", "0");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_blank_api_key_disables_roster() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("OWNER_ID", "42");
    env::set_var("OPENAI_API_KEY", "   ");

    let config = Config::from_env().unwrap();
    assert!(config.openai_api_key.is_none());

    clear_env();
}
