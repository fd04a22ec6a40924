//! The recurring-reminder engine.
//!
//! Each committed shift turns into two one-shot timers (check-in at the
//! start boundary, check-out at the end boundary), fired a lead time before
//! the boundary. When a one-shot fires it sends the reminder, starts a
//! repeating nudge job that keeps poking until the user confirms, and
//! re-registers itself for the following week. Recurrence is this chaining,
//! not a cron expression per slot.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::bot::texts;
use crate::config::Config;
use crate::schedule::{next_fire, ShiftSpec, SlotKey};
use crate::state::registry::{ScheduleRegistry, ScheduledReminder};

type ServiceResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Cloneable handle that handlers and scheduled jobs use to drive the
/// engine.
#[derive(Clone)]
pub struct ReminderContext {
    pub bot: Bot,
    pub registry: Arc<Mutex<ScheduleRegistry>>,
    scheduler: JobScheduler,
    tz: Tz,
    lead: Duration,
    nudge_every: StdDuration,
}

pub struct ReminderService {
    ctx: ReminderContext,
}

impl ReminderService {
    pub async fn new(
        bot: Bot,
        registry: Arc<Mutex<ScheduleRegistry>>,
        config: &Config,
    ) -> ServiceResult<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            ctx: ReminderContext {
                bot,
                registry,
                scheduler,
                tz: config.timezone,
                lead: Duration::minutes(config.reminder_lead_minutes),
                nudge_every: StdDuration::from_secs(config.nudge_interval_minutes * 60),
            },
        })
    }

    /// A handle the bot handlers keep; the service itself only owns
    /// lifecycle.
    pub fn context(&self) -> ReminderContext {
        self.ctx.clone()
    }

    pub async fn start(&mut self) -> ServiceResult<()> {
        let mut scheduler = self.ctx.scheduler.clone();
        scheduler.start().await?;
        tracing::info!(
            "Reminder service started - lead {} min, nudge every {} min, timezone {}",
            self.ctx.lead.num_minutes(),
            self.ctx.nudge_every.as_secs() / 60,
            self.ctx.tz
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> ServiceResult<()> {
        let mut scheduler = self.ctx.scheduler.clone();
        scheduler.shutdown().await?;
        Ok(())
    }
}

impl ReminderContext {
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn lead_minutes(&self) -> i64 {
        self.lead.num_minutes()
    }

    /// Replaces a chat's schedule: cancels every job the old schedule
    /// owned, then registers a one-shot per boundary of the new shifts.
    /// Returns the planned slots with their fire instants, soonest first.
    pub async fn commit_schedule(
        &self,
        chat: ChatId,
        shifts: Vec<ShiftSpec>,
    ) -> ServiceResult<Vec<(SlotKey, DateTime<Tz>)>> {
        let stale = {
            let mut registry = self.registry.lock().await;
            registry.replace_shifts(chat.0, shifts.clone())
        };
        for job_id in stale {
            remove_job(self, job_id).await;
        }

        let now = Utc::now().with_timezone(&self.tz);
        let mut planned = Vec::new();
        for spec in &shifts {
            for slot in spec.slots() {
                let boundary = slot.boundary();
                let fire_at = next_fire(now, boundary.occurs_on, boundary.time, self.lead);
                self.schedule_slot(chat, slot, fire_at).await?;
                planned.push((slot, fire_at));
            }
        }
        planned.sort_by_key(|(_, fire_at)| *fire_at);

        tracing::info!(
            "Committed {} shifts ({} reminders) for chat {}",
            shifts.len(),
            planned.len(),
            chat
        );
        Ok(planned)
    }

    /// Cancels everything for a chat. Returns how many jobs were removed.
    pub async fn cancel_schedule(&self, chat: ChatId) -> usize {
        let stale = {
            let mut registry = self.registry.lock().await;
            registry.remove_user(chat.0)
        };
        let count = stale.len();
        for job_id in stale {
            remove_job(self, job_id).await;
        }
        tracing::info!("Cancelled {} jobs for chat {}", count, chat);
        count
    }

    /// Confirms a fired reminder. Cancels the nudge job and reports whether
    /// anything was actually pending.
    pub async fn confirm_slot(&self, chat: ChatId, slot: SlotKey) -> bool {
        let pending = {
            let mut registry = self.registry.lock().await;
            registry.confirm(chat.0, slot)
        };
        match pending {
            Some(pending) => {
                if let Some(nudge_job) = pending.nudge_job {
                    remove_job(self, nudge_job).await;
                }
                tracing::info!(
                    "Chat {} confirmed {} after {} nudges",
                    chat,
                    slot,
                    pending.nudges_sent
                );
                true
            }
            None => false,
        }
    }

    /// Registers the one-shot timer for a slot and records it in the
    /// registry.
    async fn schedule_slot(
        &self,
        chat: ChatId,
        slot: SlotKey,
        fire_at: DateTime<Tz>,
    ) -> ServiceResult<()> {
        let delay = (fire_at.with_timezone(&Utc) - Utc::now())
            .num_seconds()
            .max(1) as u64;

        let ctx = self.clone();
        let job = Job::new_one_shot_async(StdDuration::from_secs(delay), move |_uuid, _lock| {
            let ctx = ctx.clone();
            Box::pin(async move {
                fire_reminder(ctx, chat, slot).await;
            })
        })?;

        let mut scheduler = self.scheduler.clone();
        let job_id = scheduler.add(job).await?;

        let mut registry = self.registry.lock().await;
        registry.insert_reminder(
            chat.0,
            slot,
            ScheduledReminder {
                job_id,
                fire_at: fire_at.with_timezone(&Utc),
            },
        );
        tracing::debug!("Scheduled {} for chat {} at {}", slot, chat, fire_at);
        Ok(())
    }
}

/// One-shot payload: mark pending, notify, start nudging, chain next week.
fn fire_reminder(
    ctx: ReminderContext,
    chat: ChatId,
    slot: SlotKey,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
    Box::pin(async move {
    let stale_nudge = {
        let mut registry = ctx.registry.lock().await;
        registry.begin_pending(chat.0, slot)
    };
    if let Some(job_id) = stale_nudge {
        // last week's cycle was never confirmed; stop its nudges
        remove_job(&ctx, job_id).await;
    }

    if let Err(e) = send_reminder_message(&ctx, chat, slot).await {
        tracing::error!("Failed to send reminder {} to chat {}: {}", slot, chat, e);
    }

    if let Err(e) = start_nudges(&ctx, chat, slot).await {
        tracing::error!("Failed to start nudges for {} in chat {}: {}", slot, chat, e);
    }

    let now = Utc::now().with_timezone(&ctx.tz);
    let boundary = slot.boundary();
    let fire_at = next_fire(now, boundary.occurs_on, boundary.time, ctx.lead);
    if let Err(e) = ctx.schedule_slot(chat, slot, fire_at).await {
        tracing::error!("Failed to chain {} for chat {}: {}", slot, chat, e);
    }
    })
}

async fn send_reminder_message(
    ctx: &ReminderContext,
    chat: ChatId,
    slot: SlotKey,
) -> ResponseResult<()> {
    ctx.bot
        .send_message(chat, texts::reminder_text(slot, ctx.lead_minutes()))
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(confirm_keyboard(slot))
        .await?;
    Ok(())
}

async fn send_nudge_message(
    ctx: &ReminderContext,
    chat: ChatId,
    slot: SlotKey,
) -> ResponseResult<()> {
    ctx.bot
        .send_message(chat, texts::nudge_text(slot))
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(confirm_keyboard(slot))
        .await?;
    Ok(())
}

/// Registers the repeating nudge job for a freshly fired reminder. The job
/// removes itself once the slot is no longer pending.
async fn start_nudges(ctx: &ReminderContext, chat: ChatId, slot: SlotKey) -> ServiceResult<()> {
    let job_ctx = ctx.clone();
    let job = Job::new_repeated_async(ctx.nudge_every, move |uuid, lock| {
        let ctx = job_ctx.clone();
        Box::pin(async move {
            let still_pending = {
                let registry = ctx.registry.lock().await;
                registry.is_pending(chat.0, slot)
            };
            if !still_pending {
                let mut scheduler = lock;
                if let Err(e) = scheduler.remove(&uuid).await {
                    tracing::warn!("Failed to remove finished nudge job {}: {}", uuid, e);
                }
                return;
            }

            let count = {
                let mut registry = ctx.registry.lock().await;
                registry.record_nudge(chat.0, slot)
            };
            tracing::debug!("Nudge #{} for {} in chat {}", count, slot, chat);
            if let Err(e) = send_nudge_message(&ctx, chat, slot).await {
                tracing::error!("Failed to send nudge {} to chat {}: {}", slot, chat, e);
            }
        })
    })?;

    let mut scheduler = ctx.scheduler.clone();
    let job_id = scheduler.add(job).await?;

    let mut registry = ctx.registry.lock().await;
    registry.attach_nudge_job(chat.0, slot, job_id);
    Ok(())
}

/// The single confirm button attached to reminders and nudges.
pub fn confirm_keyboard(slot: SlotKey) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        texts::confirm_button_label(slot.action),
        format!("confirm:{slot}"),
    )]])
}

async fn remove_job(ctx: &ReminderContext, job_id: Uuid) {
    let mut scheduler = ctx.scheduler.clone();
    if let Err(e) = scheduler.remove(&job_id).await {
        tracing::warn!("Failed to remove job {}: {}", job_id, e);
    }
}
