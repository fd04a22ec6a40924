/// Utility functions for handling Telegram MarkdownV2 formatting
///
/// MarkdownV2 requires escaping of special characters to prevent formatting issues.
/// This module provides centralized functions for proper text escaping.
/// Escapes markdown special characters for MarkdownV2 parsing mode
///
/// This function escapes all characters that have special meaning in Telegram's
/// MarkdownV2 format to ensure they are displayed as literal text.
///
/// # Arguments
/// * `text` - The text to escape
///
/// # Returns
/// A string with all markdown special characters escaped with backslashes
///
/// # Example
/// ```
/// use shift_reminder_bot::utils::markdown::escape_markdown;
///
/// let text = "Hello *world* (test)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Hello \\*world\\* \\(test\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_basic_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("_italic_"), "\\_italic\\_");
        assert_eq!(escape_markdown("`code`"), "\\`code\\`");
    }

    #[test]
    fn test_escape_hebrew_reminder_text() {
        assert_eq!(
            escape_markdown("תזכורת! עוד 5 דקות"),
            "תזכורת\\! עוד 5 דקות"
        );
        assert_eq!(escape_markdown("ב-Inspector"), "ב\\-Inspector");
        assert_eq!(escape_markdown("כפולה_בוקר"), "כפולה\\_בוקר");
    }

    #[test]
    fn test_escape_empty_and_plain_text() {
        assert_eq!(escape_markdown(""), "");
        assert_eq!(escape_markdown("plain text"), "plain text");
        assert_eq!(escape_markdown("בוקר"), "בוקר");
    }
}
