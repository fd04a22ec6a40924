use std::io::Cursor;

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{access, list_shifts, set_shifts, Command};
use crate::bot::dialogue::{current_state, set_state, HandlerResult, SetupDialogue, SetupState};
use crate::bot::texts;
use crate::schedule::{merge_specs, parse_shift_line, ShiftSpec};
use crate::state::AppContext;
use crate::utils::feedback::{CommandFeedback, ProgressTracker};
use crate::utils::logging::{log_command_start, log_command_success};
use crate::utils::validation::validate_shift_input;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: SetupDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let user = msg
        .from()
        .and_then(|u| u.username.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let user = user.as_str();
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
    let chat_id = msg.chat.id.0;

    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            log_command_start("start", user, user_id, chat_id, None);
            bot.send_message(msg.chat.id, texts::GREETING).await?;
            // first contact doubles as the access request
            access::ensure_access(&bot, &msg, &ctx).await?;
        }
        Command::SetShifts { shifts } => {
            log_command_start("set_shifts", user, user_id, chat_id, Some(&shifts));
            if !access::ensure_access(&bot, &msg, &ctx).await? {
                return Ok(());
            }
            set_shifts::handle_set_shifts(bot, msg, shifts, dialogue, ctx).await?;
            log_command_success("set_shifts", user, user_id, chat_id, None);
        }
        Command::ListShifts => {
            log_command_start("list_shifts", user, user_id, chat_id, None);
            if !access::ensure_access(&bot, &msg, &ctx).await? {
                return Ok(());
            }
            list_shifts::handle_list(bot, msg, ctx).await?;
        }
        Command::ClearShifts => {
            log_command_start("clear_shifts", user, user_id, chat_id, None);
            if !access::ensure_access(&bot, &msg, &ctx).await? {
                return Ok(());
            }
            list_shifts::handle_clear(bot, msg, ctx).await?;
        }
        Command::Done => {
            if !access::ensure_access(&bot, &msg, &ctx).await? {
                return Ok(());
            }
            set_shifts::handle_done(bot, msg, dialogue).await?;
        }
        Command::Cancel => {
            if !access::ensure_access(&bot, &msg, &ctx).await? {
                return Ok(());
            }
            set_shifts::handle_cancel(bot, msg, dialogue).await?;
        }
        Command::Users => {
            log_command_start("users", user, user_id, chat_id, None);
            access::handle_users(bot, msg, ctx).await?;
        }
    }
    Ok(())
}

/// Plain text while the setup dialogue collects shifts: parse, merge into
/// the draft, echo the running list.
pub async fn collect_handler(
    bot: Bot,
    msg: Message,
    mut drafts: Vec<ShiftSpec>,
    dialogue: SetupDialogue,
    ctx: AppContext,
) -> HandlerResult {
    if !access::ensure_access(&bot, &msg, &ctx).await? {
        return Ok(());
    }
    let chat = msg.chat.id;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if let Err(e) = validate_shift_input(text) {
        CommandFeedback::new(bot, chat)
            .validation_error(&e.to_string(), texts::SET_SHIFTS_USAGE)
            .await?;
        return Ok(());
    }

    let mut outcome = parse_shift_line(text);
    if outcome.specs.is_empty() {
        CommandFeedback::new(bot, chat)
            .validation_error(&texts::problem_lines(&outcome.problems), texts::SET_SHIFTS_USAGE)
            .await?;
        return Ok(());
    }

    let notices = merge_specs(&mut drafts, outcome.specs.drain(..).collect());
    outcome.problems.extend(notices);

    let mut reply = format!("{}\n{}", texts::DRAFT_HEADER, texts::shift_lines(&drafts));
    if !outcome.problems.is_empty() {
        reply.push_str(&format!(
            "\n\n{}\n{}",
            texts::ERRORS_HEADER,
            texts::problem_lines(&outcome.problems)
        ));
    }
    reply.push_str(&format!("\n\n{}", texts::DRAFT_HINT));
    bot.send_message(chat, reply).await?;

    set_state(&dialogue, SetupState::Collecting { drafts }).await;
    Ok(())
}

/// A roster photo: read it through the vision service and jump straight to
/// the review step with whatever it found.
pub async fn photo_handler(
    bot: Bot,
    msg: Message,
    dialogue: SetupDialogue,
    ctx: AppContext,
) -> HandlerResult {
    if !access::ensure_access(&bot, &msg, &ctx).await? {
        return Ok(());
    }
    let chat = msg.chat.id;

    if !ctx.roster.is_enabled() {
        CommandFeedback::new(bot, chat)
            .error(texts::ROSTER_DISABLED)
            .await?;
        return Ok(());
    }

    let feedback = CommandFeedback::new(bot.clone(), chat);
    let mut progress = ProgressTracker::new(feedback, 3);
    progress.start(texts::ROSTER_DOWNLOADING).await?;

    let image = match download_photo(&bot, &msg).await {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!("Failed to download roster photo from chat {}: {}", chat, e);
            progress.error(texts::ROSTER_FAILED).await?;
            return Ok(());
        }
    };
    progress.next_step(texts::ROSTER_ANALYZING).await?;

    let token_line = match ctx.roster.read_roster(&image).await {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!("Roster reading failed for chat {}: {}", chat, e);
            progress.error(texts::ROSTER_FAILED).await?;
            return Ok(());
        }
    };
    progress.next_step(texts::ROSTER_PREPARING).await?;

    let outcome = parse_shift_line(&token_line);
    if outcome.specs.is_empty() {
        progress.error(texts::ROSTER_NOTHING_FOUND).await?;
        return Ok(());
    }
    if !outcome.problems.is_empty() {
        CommandFeedback::new(bot.clone(), chat)
            .warning(texts::ROSTER_PARTIAL)
            .await?;
    }

    progress.complete(texts::ROSTER_READ_OK).await?;
    set_shifts::send_review(&bot, chat, &outcome.specs).await?;
    set_state(&dialogue, SetupState::Reviewing { drafts: outcome.specs }).await;
    Ok(())
}

/// Grabs the largest size of the photo attached to `msg`.
async fn download_photo(bot: &Bot, msg: &Message) -> anyhow::Result<Vec<u8>> {
    let photo = msg
        .photo()
        .and_then(|sizes| sizes.last())
        .ok_or_else(|| anyhow::anyhow!("message has no photo"))?;

    let file = bot.get_file(photo.file.id.clone()).await?;
    let mut buffer = Cursor::new(Vec::new());
    bot.download_file(&file.path, &mut buffer).await?;
    Ok(buffer.into_inner())
}

/// Fallback for anything no other branch claimed.
pub async fn handle_general_message(
    bot: Bot,
    msg: Message,
    dialogue: SetupDialogue,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if text.starts_with('/') {
        let command = text.split_whitespace().next().unwrap_or(text);
        CommandFeedback::new(bot, msg.chat.id)
            .validation_error(
                &format!("פקודה לא מוכרת: {command}"),
                texts::UNKNOWN_COMMAND_SUGGESTION,
            )
            .await?;
        return Ok(());
    }

    if let SetupState::Reviewing { .. } = current_state(&dialogue).await {
        bot.send_message(msg.chat.id, texts::REVIEW_REMINDER).await?;
    }
    // anything else is ignored to avoid spam

    Ok(())
}
