use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::dialogue::{set_state, HandlerResult, SetupDialogue, SetupState};
use crate::bot::texts;
use crate::schedule::{parse_shift_line, ParseProblem, ShiftSpec};
use crate::state::AppContext;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_validation_error;
use crate::utils::validation::validate_shift_input;

/// `/set_shifts` entry point. With arguments it parses and commits in one
/// step (the original flow); without arguments it opens the step-by-step
/// collection dialogue.
pub async fn handle_set_shifts(
    bot: Bot,
    msg: Message,
    shifts_arg: String,
    dialogue: SetupDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let chat = msg.chat.id;

    if shifts_arg.trim().is_empty() {
        set_state(&dialogue, SetupState::Collecting { drafts: Vec::new() }).await;
        bot.send_message(chat, format!("{}\n\n{}", texts::SET_SHIFTS_USAGE, texts::COLLECT_INTRO))
            .await?;
        return Ok(());
    }

    let user = msg
        .from()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");
    if let Err(e) = validate_shift_input(&shifts_arg) {
        log_validation_error(
            "set_shifts",
            "shifts",
            &shifts_arg,
            &e.to_string(),
            user,
            msg.from().map(|u| u.id.0 as i64).unwrap_or(0),
            chat.0,
        );
        CommandFeedback::new(bot.clone(), chat)
            .validation_error(&e.to_string(), texts::SET_SHIFTS_USAGE)
            .await?;
        return Ok(());
    }

    let outcome = parse_shift_line(&shifts_arg);
    if outcome.specs.is_empty() {
        let problems = texts::problem_lines(&outcome.problems);
        CommandFeedback::new(bot.clone(), chat)
            .validation_error(&problems, texts::SET_SHIFTS_USAGE)
            .await?;
        return Ok(());
    }

    // a direct commit discards any half-finished dialogue
    set_state(&dialogue, SetupState::Idle).await;
    commit_and_reply(&bot, chat, &ctx, outcome.specs, &outcome.problems).await
}

/// `/done`: move a non-empty draft to review.
pub async fn handle_done(bot: Bot, msg: Message, dialogue: SetupDialogue) -> HandlerResult {
    let chat = msg.chat.id;
    match crate::bot::dialogue::current_state(&dialogue).await {
        SetupState::Collecting { drafts } if !drafts.is_empty() => {
            send_review(&bot, chat, &drafts).await?;
            set_state(&dialogue, SetupState::Reviewing { drafts }).await;
        }
        SetupState::Collecting { .. } => {
            CommandFeedback::new(bot, chat).info(texts::SETUP_EMPTY).await?;
        }
        SetupState::Reviewing { .. } => {
            bot.send_message(chat, texts::REVIEW_REMINDER).await?;
        }
        SetupState::Idle => {
            CommandFeedback::new(bot, chat)
                .info(texts::SETUP_NOT_ACTIVE)
                .await?;
        }
    }
    Ok(())
}

/// `/cancel`: drop the draft, whatever state it is in.
pub async fn handle_cancel(bot: Bot, msg: Message, dialogue: SetupDialogue) -> HandlerResult {
    let chat = msg.chat.id;
    match crate::bot::dialogue::current_state(&dialogue).await {
        SetupState::Idle => {
            CommandFeedback::new(bot, chat)
                .info(texts::SETUP_NOT_ACTIVE)
                .await?;
        }
        _ => {
            set_state(&dialogue, SetupState::Idle).await;
            bot.send_message(chat, texts::SETUP_CANCELLED).await?;
        }
    }
    Ok(())
}

/// Sends the review summary with the confirm/cancel keyboard.
pub async fn send_review(bot: &Bot, chat: ChatId, drafts: &[ShiftSpec]) -> ResponseResult<Message> {
    let text = format!("{}\n{}", texts::REVIEW_HEADER, texts::shift_lines(drafts));
    bot.send_message(chat, text)
        .reply_markup(review_keyboard())
        .await
}

pub fn review_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(texts::REVIEW_CONFIRM_BUTTON, "setup:confirm"),
        InlineKeyboardButton::callback(texts::REVIEW_CANCEL_BUTTON, "setup:cancel"),
    ]])
}

/// Commits a schedule through the reminder service and reports back in the
/// original reply format (scheduled list plus error section).
pub async fn commit_and_reply(
    bot: &Bot,
    chat: ChatId,
    ctx: &AppContext,
    specs: Vec<ShiftSpec>,
    problems: &[ParseProblem],
) -> HandlerResult {
    match ctx.reminders.commit_schedule(chat, specs.clone()).await {
        Ok(_planned) => {
            bot.send_message(chat, texts::commit_reply(&specs, problems))
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to commit schedule for chat {}: {}", chat, e);
            CommandFeedback::new(bot.clone(), chat)
                .error("אירעה שגיאה בתזמון התזכורות. נסה שוב.")
                .await?;
        }
    }
    Ok(())
}
