use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::commands::{access, set_shifts};
use crate::bot::dialogue::{current_state, set_state, HandlerResult, SetupDialogue, SetupState};
use crate::bot::texts;
use crate::schedule::SlotKey;
use crate::state::AppContext;
use crate::utils::markdown::escape_markdown;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: SetupDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    };

    let username = q.from.username.as_deref().unwrap_or("unknown");
    tracing::info!(
        "Callback received: '{}' from user {} ({})",
        data,
        username,
        q.from.id
    );

    if let Some(slot_data) = data.strip_prefix("confirm:") {
        handle_confirm_callback(bot, q, slot_data, ctx).await
    } else if let Some(decision) = data.strip_prefix("setup:") {
        handle_setup_callback(bot, q, decision, dialogue, ctx).await
    } else if let Some(payload) = data.strip_prefix("access:") {
        access::handle_access_callback(bot, q, payload, ctx).await
    } else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        Ok(())
    }
}

/// The user tapped "I punched in/out" on a reminder.
async fn handle_confirm_callback(
    bot: Bot,
    q: CallbackQuery,
    slot_data: &str,
    ctx: AppContext,
) -> HandlerResult {
    let Some(slot) = SlotKey::parse(slot_data) else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    };

    let Some((chat, message_id, base)) = q
        .message
        .as_ref()
        .map(|m| (m.chat.id, m.id, m.text().unwrap_or_default().to_string()))
    else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    };

    if ctx.reminders.confirm_slot(chat, slot).await {
        let edited = format!("{}\n\n{}", escape_markdown(&base), texts::confirmed_suffix());
        bot.edit_message_text(chat, message_id, edited)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        bot.answer_callback_query(q.id)
            .text(format!("✅ {}", texts::CONFIRM_ACK))
            .await?;
    } else {
        bot.answer_callback_query(q.id)
            .text(texts::ALREADY_CONFIRMED)
            .await?;
    }
    Ok(())
}

/// Confirm/cancel taps on the setup review card.
async fn handle_setup_callback(
    bot: Bot,
    q: CallbackQuery,
    decision: &str,
    dialogue: SetupDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let Some((chat, message_id)) = q.message.as_ref().map(|m| (m.chat.id, m.id)) else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    };

    match decision {
        "confirm" => {
            let SetupState::Reviewing { drafts } = current_state(&dialogue).await else {
                bot.answer_callback_query(q.id)
                    .text(texts::SETUP_NOT_ACTIVE)
                    .await?;
                return Ok(());
            };
            bot.answer_callback_query(q.id).await?;
            // drop the keyboard off the review card before committing
            bot.edit_message_text(chat, message_id, format!("✅ {}", texts::REVIEW_HEADER))
                .await?;
            set_state(&dialogue, SetupState::Idle).await;
            set_shifts::commit_and_reply(&bot, chat, &ctx, drafts, &[]).await?;
        }
        "cancel" => {
            set_state(&dialogue, SetupState::Idle).await;
            bot.edit_message_text(chat, message_id, texts::SETUP_CANCELLED)
                .await?;
            bot.answer_callback_query(q.id).await?;
        }
        _ => {
            bot.answer_callback_query(q.id)
                .text(texts::INVALID_CALLBACK)
                .await?;
        }
    }
    Ok(())
}
