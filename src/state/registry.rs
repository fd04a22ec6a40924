use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::schedule::{ShiftSpec, SlotKey};

/// A reminder the scheduler has queued: the job handle and when it fires.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledReminder {
    pub job_id: Uuid,
    pub fire_at: DateTime<Utc>,
}

/// A reminder that has fired and is awaiting the user's confirmation tap.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingReminder {
    pub nudge_job: Option<Uuid>,
    pub nudges_sent: u32,
}

/// Counters exposed by the health endpoint.
#[derive(Debug, Clone, Copy)]
pub struct RegistryStats {
    pub users: usize,
    pub scheduled_reminders: usize,
    pub pending_confirmations: usize,
}

#[derive(Debug, Default)]
struct UserSchedule {
    shifts: Vec<ShiftSpec>,
    reminders: HashMap<SlotKey, ScheduledReminder>,
    pending: HashMap<SlotKey, PendingReminder>,
}

impl UserSchedule {
    fn job_ids(&self) -> Vec<Uuid> {
        self.reminders
            .values()
            .map(|r| r.job_id)
            .chain(self.pending.values().filter_map(|p| p.nudge_job))
            .collect()
    }
}

/// In-memory schedule state for every chat the bot serves.
///
/// Everything here dies with the process; the source system has no
/// persistence and this one deliberately keeps that shape. Callers hold the
/// registry behind an async mutex and must not keep the lock across
/// Telegram API calls.
#[derive(Debug, Default)]
pub struct ScheduleRegistry {
    users: HashMap<i64, UserSchedule>,
}

impl ScheduleRegistry {
    /// Replaces a chat's schedule wholesale. Returns every job id the
    /// previous schedule owned (boundary one-shots and live nudges) so the
    /// caller can cancel them.
    pub fn replace_shifts(&mut self, chat: i64, shifts: Vec<ShiftSpec>) -> Vec<Uuid> {
        self.users
            .insert(
                chat,
                UserSchedule {
                    shifts,
                    ..UserSchedule::default()
                },
            )
            .map(|old| old.job_ids())
            .unwrap_or_default()
    }

    /// Drops a chat entirely, returning the job ids to cancel.
    pub fn remove_user(&mut self, chat: i64) -> Vec<Uuid> {
        self.users
            .remove(&chat)
            .map(|old| old.job_ids())
            .unwrap_or_default()
    }

    pub fn insert_reminder(&mut self, chat: i64, slot: SlotKey, reminder: ScheduledReminder) {
        self.users
            .entry(chat)
            .or_default()
            .reminders
            .insert(slot, reminder);
    }

    pub fn shifts_of(&self, chat: i64) -> Vec<ShiftSpec> {
        self.users
            .get(&chat)
            .map(|u| u.shifts.clone())
            .unwrap_or_default()
    }

    /// Scheduled reminders for a chat, soonest first.
    pub fn reminders_of(&self, chat: i64) -> Vec<(SlotKey, ScheduledReminder)> {
        let mut reminders: Vec<_> = self
            .users
            .get(&chat)
            .map(|u| u.reminders.iter().map(|(k, v)| (*k, *v)).collect())
            .unwrap_or_default();
        reminders.sort_by_key(|(_, r)| r.fire_at);
        reminders
    }

    /// Marks a slot as awaiting confirmation. If the previous cycle of this
    /// slot was never confirmed, its leftover nudge job id is returned so
    /// the caller can cancel it.
    pub fn begin_pending(&mut self, chat: i64, slot: SlotKey) -> Option<Uuid> {
        let user = self.users.entry(chat).or_default();
        let stale = user.pending.insert(slot, PendingReminder::default());
        stale.and_then(|p| p.nudge_job)
    }

    pub fn attach_nudge_job(&mut self, chat: i64, slot: SlotKey, job_id: Uuid) {
        if let Some(pending) = self
            .users
            .get_mut(&chat)
            .and_then(|u| u.pending.get_mut(&slot))
        {
            pending.nudge_job = Some(job_id);
        }
    }

    pub fn is_pending(&self, chat: i64, slot: SlotKey) -> bool {
        self.users
            .get(&chat)
            .is_some_and(|u| u.pending.contains_key(&slot))
    }

    /// Increments the nudge counter, returning the new count.
    pub fn record_nudge(&mut self, chat: i64, slot: SlotKey) -> u32 {
        match self
            .users
            .get_mut(&chat)
            .and_then(|u| u.pending.get_mut(&slot))
        {
            Some(pending) => {
                pending.nudges_sent += 1;
                pending.nudges_sent
            }
            None => 0,
        }
    }

    /// Confirms a pending reminder. Returns the pending record (with any
    /// nudge job to cancel), or `None` when nothing was pending.
    pub fn confirm(&mut self, chat: i64, slot: SlotKey) -> Option<PendingReminder> {
        self.users.get_mut(&chat)?.pending.remove(&slot)
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            users: self.users.len(),
            scheduled_reminders: self.users.values().map(|u| u.reminders.len()).sum(),
            pending_confirmations: self.users.values().map(|u| u.pending.len()).sum(),
        }
    }
}
