use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::dialogue::HandlerResult;
use crate::bot::texts;
use crate::state::{AccessStatus, AppContext, RequestOutcome};
use crate::utils::logging::log_access_event;

/// Gate for every schedule-touching command. Returns true when the sender
/// is approved; otherwise handles the request/denial conversation and
/// returns false.
pub async fn ensure_access(bot: &Bot, msg: &Message, ctx: &AppContext) -> ResponseResult<bool> {
    let Some(user) = msg.from() else {
        return Ok(false);
    };
    let user_id = user.id.0 as i64;
    let username = user.username.clone();
    let display = username.as_deref().unwrap_or("unknown");

    let outcome = {
        let mut access = ctx.access.lock().await;
        if access.is_approved(user_id) {
            return Ok(true);
        }
        access.request(user_id, username.clone())
    };

    match outcome {
        RequestOutcome::AlreadyApproved => Ok(true),
        RequestOutcome::New => {
            log_access_event("request", display, user_id, None);
            bot.send_message(msg.chat.id, texts::ACCESS_REQUESTED).await?;
            notify_owner(bot, ctx, user_id, display).await?;
            Ok(false)
        }
        RequestOutcome::AlreadyPending => {
            bot.send_message(msg.chat.id, texts::ACCESS_PENDING).await?;
            Ok(false)
        }
        RequestOutcome::Denied => {
            bot.send_message(msg.chat.id, texts::NO_PERMISSION).await?;
            Ok(false)
        }
    }
}

/// Sends the owner an approval card with inline approve/deny buttons.
async fn notify_owner(
    bot: &Bot,
    ctx: &AppContext,
    user_id: i64,
    display: &str,
) -> ResponseResult<()> {
    let owner = ChatId(ctx.config.owner_id);
    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            texts::ACCESS_APPROVE_BUTTON,
            format!("access:approve:{user_id}"),
        ),
        InlineKeyboardButton::callback(texts::ACCESS_DENY_BUTTON, format!("access:deny:{user_id}")),
    ]]);

    bot.send_message(
        owner,
        format!("בקשת גישה חדשה:\n{display} (id {user_id})"),
    )
    .reply_markup(keyboard)
    .await?;
    Ok(())
}

/// `/users` (owner only): list everyone who ever asked for access.
pub async fn handle_users(bot: Bot, msg: Message, ctx: AppContext) -> HandlerResult {
    let sender = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
    let users = {
        let access = ctx.access.lock().await;
        if !access.is_owner(sender) {
            drop(access);
            bot.send_message(msg.chat.id, texts::NO_PERMISSION).await?;
            return Ok(());
        }
        access.list()
    };

    if users.is_empty() {
        bot.send_message(msg.chat.id, texts::USERS_EMPTY).await?;
        return Ok(());
    }

    let mut text = String::from(texts::USERS_HEADER);
    for (id, record) in users {
        let emoji = match record.status {
            AccessStatus::Approved => "✅",
            AccessStatus::Pending => "⏳",
            AccessStatus::Denied => "⛔",
        };
        let name = record.username.as_deref().unwrap_or("unknown");
        text.push_str(&format!("\n{emoji} {name} (id {id})"));
    }
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Owner tapped approve/deny on an access card. `payload` is
/// `approve:<id>` or `deny:<id>`.
pub async fn handle_access_callback(
    bot: Bot,
    q: CallbackQuery,
    payload: &str,
    ctx: AppContext,
) -> HandlerResult {
    let sender = q.from.id.0 as i64;
    {
        let access = ctx.access.lock().await;
        if !access.is_owner(sender) {
            bot.answer_callback_query(q.id)
                .text(texts::NO_PERMISSION)
                .await?;
            return Ok(());
        }
    }

    let Some((decision, id_part)) = payload.split_once(':') else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    };
    let Ok(user_id) = id_part.parse::<i64>() else {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    };

    let (applied, approved) = {
        let mut access = ctx.access.lock().await;
        match decision {
            "approve" => (access.approve(user_id), true),
            "deny" => (access.deny(user_id), false),
            _ => (false, false),
        }
    };

    if !applied {
        bot.answer_callback_query(q.id)
            .text(texts::INVALID_CALLBACK)
            .await?;
        return Ok(());
    }

    let verdict = if approved { "approved" } else { "denied" };
    log_access_event(verdict, "owner-decision", user_id, None);

    let notice = if approved {
        texts::ACCESS_APPROVED_NOTICE
    } else {
        texts::ACCESS_DENIED_NOTICE
    };
    if let Err(e) = bot.send_message(ChatId(user_id), notice).await {
        tracing::warn!("Failed to notify user {} about access: {}", user_id, e);
    }

    // record the decision on the card itself
    if let Some(message) = q.message.as_ref() {
        let base = message.text().unwrap_or_default();
        let mark = if approved { "✅ אושר" } else { "⛔ נדחה" };
        bot.edit_message_text(message.chat.id, message.id, format!("{base}\n\n{mark}"))
            .await?;
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}
