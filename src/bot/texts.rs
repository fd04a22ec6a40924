//! Every user-facing Hebrew string, in one place. Plain-text replies stay
//! plain; the MarkdownV2 builders escape their dynamic fragments.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::schedule::{BoundaryAction, ParseProblem, ShiftSpec, SlotKey};
use crate::utils::markdown::escape_markdown;

pub const GREETING: &str = "שלום! אני הבוט שיזכיר לך לסמן כניסה ויציאה ב-Inspector 👷\n\n\
כדי להגדיר משמרות לשבוע השתמש בפקודה:\n/set_shifts\n\n\
לדוגמה:\n/set_shifts ראשון:בוקר שני:צהריים שלישי:לילה\n\n\
אפשר גם לשלוח תמונה של סידור העבודה ואני אקרא אותה.";

pub const SET_SHIFTS_USAGE: &str = "שלח את המשמרות שלך בפורמט:\n\
/set_shifts ראשון:בוקר שני:צהריים שישי:כפולה_בוקר\n\n\
סוגי משמרות אפשריים:\nבוקר | צהריים | לילה | כפולה_בוקר | כפולה_לילה";

pub const COLLECT_INTRO: &str = "נגדיר משמרות שלב אחרי שלב.\n\
שלח משמרות בפורמט יום:משמרת, למשל: ראשון:בוקר\n\
אפשר כמה בהודעה אחת. כשתסיים שלח /done, לביטול /cancel.";

pub const NO_SHIFTS: &str = "אין משמרות מוגדרות כרגע.";
pub const LIST_HEADER: &str = "📅 המשמרות המוגדרות:";
pub const SCHEDULED_HEADER: &str = "✅ המשמרות הוגדרו:";
pub const ERRORS_HEADER: &str = "⚠️ שגיאות:";
pub const DRAFT_HEADER: &str = "המשמרות שהוזנו עד כה:";
pub const DRAFT_HINT: &str = "שלח עוד משמרות, או /done לאישור.";
pub const REVIEW_HEADER: &str = "אלה המשמרות שיוגדרו:";
pub const REVIEW_CONFIRM_BUTTON: &str = "✅ אישור";
pub const REVIEW_CANCEL_BUTTON: &str = "❌ ביטול";
pub const SETUP_CANCELLED: &str = "הגדרת המשמרות בוטלה.";
pub const SETUP_NOT_ACTIVE: &str = "אין הגדרת משמרות פעילה. השתמש ב-/set_shifts כדי להתחיל.";
pub const SETUP_EMPTY: &str = "לא הוזנו משמרות עדיין.";
pub const CLEARED: &str = "כל התזכורות בוטלו.";

pub const NO_PERMISSION: &str = "אין לך הרשאה להשתמש בבוט זה.";
pub const ACCESS_REQUESTED: &str = "הבקשה שלך לגישה נשלחה למנהל. תקבל הודעה כשתאושר.";
pub const ACCESS_PENDING: &str = "הבקשה שלך עדיין ממתינה לאישור המנהל.";
pub const ACCESS_APPROVED_NOTICE: &str = "הגישה שלך אושרה! 🎉 אפשר להגדיר משמרות עם /set_shifts";
pub const ACCESS_DENIED_NOTICE: &str = "הבקשה שלך לגישה נדחתה.";
pub const ACCESS_APPROVE_BUTTON: &str = "✅ אשר";
pub const ACCESS_DENY_BUTTON: &str = "❌ דחה";
pub const USERS_HEADER: &str = "👥 משתמשים:";
pub const USERS_EMPTY: &str = "אין עדיין בקשות גישה.";

pub const ROSTER_DISABLED: &str = "קריאת סידור מתמונה אינה מופעלת אצל הבוט הזה.";
pub const ROSTER_DOWNLOADING: &str = "מוריד את התמונה...";
pub const ROSTER_ANALYZING: &str = "מפענח את הסידור...";
pub const ROSTER_PREPARING: &str = "מכין את המשמרות לאישור...";
pub const ROSTER_READ_OK: &str = "הסידור זוהה! אשר את המשמרות בהודעה למטה.";
pub const ROSTER_FAILED: &str = "לא הצלחתי לקרוא את הסידור מהתמונה. נסה שוב או הזן ידנית.";
pub const ROSTER_NOTHING_FOUND: &str = "לא זיהיתי משמרות בתמונה.";
pub const ROSTER_PARTIAL: &str = "חלק מהשורות בתמונה לא זוהו.";

pub const CONFIRM_ACK: &str = "מעולה! סומן בהצלחה!";
pub const ALREADY_CONFIRMED: &str = "כבר סומן. כל הכבוד!";
pub const INVALID_CALLBACK: &str = "נתוני כפתור לא תקינים";
pub const UNKNOWN_COMMAND_SUGGESTION: &str = "השתמש ב-/help כדי לראות את כל הפקודות.";
pub const REVIEW_REMINDER: &str = "יש הגדרת משמרות שממתינה לאישור - לחץ על אישור או ביטול.";

/// Reminder message body (MarkdownV2, action bolded).
pub fn reminder_text(slot: SlotKey, lead_minutes: i64) -> String {
    format!(
        "{} {} *{}* {}",
        slot.action.emoji(),
        escape_markdown(&format!("תזכורת! עוד {lead_minutes} דקות צריך לסמן")),
        escape_markdown(slot.action.label()),
        escape_markdown(&format!("למשמרת {} ב-Inspector", slot.kind.label())),
    )
}

/// Nudge message body (MarkdownV2, action bolded).
pub fn nudge_text(slot: SlotKey) -> String {
    format!(
        "⚠️ {} *{}* {}",
        escape_markdown("עוד לא סימנת"),
        escape_markdown(slot.action.label()),
        escape_markdown(&format!("למשמרת {}! אל תשכח!", slot.kind.label())),
    )
}

pub fn confirm_button_label(action: BoundaryAction) -> String {
    format!("✅ סימנתי {}!", action.label())
}

/// The suffix appended to a reminder message once confirmed (MarkdownV2).
pub fn confirmed_suffix() -> String {
    format!("✅ *{}*", escape_markdown(CONFIRM_ACK))
}

/// Plain-text block listing shift entries, one per line.
pub fn shift_lines(specs: &[ShiftSpec]) -> String {
    specs
        .iter()
        .map(ShiftSpec::describe)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text block listing parse problems, one per line.
pub fn problem_lines(problems: &[ParseProblem]) -> String {
    problems
        .iter()
        .map(|p| format!("• {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The commit reply: scheduled shifts plus an optional error section.
pub fn commit_reply(specs: &[ShiftSpec], problems: &[ParseProblem]) -> String {
    let mut reply = format!("{SCHEDULED_HEADER}\n{}", shift_lines(specs));
    if !problems.is_empty() {
        reply.push_str(&format!("\n\n{ERRORS_HEADER}\n{}", problem_lines(problems)));
    }
    reply
}

pub fn format_fire_time(fire_at: &DateTime<Tz>) -> String {
    fire_at.format("%d/%m %H:%M").to_string()
}
