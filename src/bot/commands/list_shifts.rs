use teloxide::prelude::*;

use crate::bot::dialogue::HandlerResult;
use crate::bot::texts;
use crate::state::AppContext;
use crate::utils::feedback::CommandFeedback;

/// `/list_shifts`: the committed roster with the next fire time of every
/// reminder, in the configured timezone.
pub async fn handle_list(bot: Bot, msg: Message, ctx: AppContext) -> HandlerResult {
    let chat = msg.chat.id;
    let (shifts, reminders) = {
        let registry = ctx.reminders.registry.lock().await;
        (registry.shifts_of(chat.0), registry.reminders_of(chat.0))
    };

    if shifts.is_empty() {
        bot.send_message(chat, texts::NO_SHIFTS).await?;
        return Ok(());
    }

    let tz = ctx.reminders.timezone();
    let mut text = String::from(texts::LIST_HEADER);
    for spec in &shifts {
        text.push_str(&format!("\n• {}", spec.describe()));
        for slot in spec.slots() {
            if let Some((_, reminder)) = reminders.iter().find(|(key, _)| *key == slot) {
                let local = reminder.fire_at.with_timezone(&tz);
                text.push_str(&format!(
                    "\n    {} {}: {}",
                    slot.action.emoji(),
                    slot.action.label(),
                    texts::format_fire_time(&local)
                ));
            }
        }
    }

    bot.send_message(chat, text).await?;
    Ok(())
}

/// `/clear_shifts`: cancel everything for this chat.
pub async fn handle_clear(bot: Bot, msg: Message, ctx: AppContext) -> HandlerResult {
    let chat = msg.chat.id;
    let removed = ctx.reminders.cancel_schedule(chat).await;

    if removed == 0 {
        bot.send_message(chat, texts::NO_SHIFTS).await?;
    } else {
        CommandFeedback::new(bot, chat).success(texts::CLEARED).await?;
    }
    Ok(())
}
