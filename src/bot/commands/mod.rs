pub mod access;
pub mod list_shifts;
pub mod set_shifts;

use teloxide::utils::command::{BotCommands, ParseError};

/// Passes the whole argument tail through as one string; an empty tail is
/// valid and opens the step-by-step dialogue.
fn rest_of_line(input: String) -> Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "פקודות הבוט:")]
pub enum Command {
    #[command(description = "הצגת הודעת עזרה")]
    Help,
    #[command(description = "התחלת עבודה עם הבוט")]
    Start,
    #[command(
        description = "הגדרת משמרות לשבוע, למשל: /set_shifts ראשון:בוקר שני:לילה",
        parse_with = rest_of_line
    )]
    SetShifts { shifts: String },
    #[command(description = "הצגת המשמרות המוגדרות")]
    ListShifts,
    #[command(description = "ביטול כל התזכורות")]
    ClearShifts,
    #[command(description = "סיום הזנת משמרות ומעבר לאישור")]
    Done,
    #[command(description = "ביטול הזנת משמרות")]
    Cancel,
    #[command(description = "רשימת משתמשים (למנהל בלבד)")]
    Users,
}
