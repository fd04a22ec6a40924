use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Where a user stands with the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    Pending,
    Approved,
    Denied,
}

#[derive(Debug, Clone)]
pub struct AccessRecord {
    pub status: AccessStatus,
    pub username: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// What happened when a user asked for access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// First contact; the owner should be notified.
    New,
    /// A request is already waiting; don't ping the owner again.
    AlreadyPending,
    AlreadyApproved,
    Denied,
}

/// Who may use the bot. The configured owner is implicitly approved and
/// decides everyone else's fate through the inline approval card.
#[derive(Debug)]
pub struct AccessRegistry {
    owner: i64,
    users: HashMap<i64, AccessRecord>,
}

impl AccessRegistry {
    pub fn new(owner: i64) -> Self {
        Self {
            owner,
            users: HashMap::new(),
        }
    }

    pub fn owner(&self) -> i64 {
        self.owner
    }

    pub fn is_owner(&self, user: i64) -> bool {
        user == self.owner
    }

    pub fn is_approved(&self, user: i64) -> bool {
        self.is_owner(user)
            || self
                .users
                .get(&user)
                .is_some_and(|r| r.status == AccessStatus::Approved)
    }

    pub fn status(&self, user: i64) -> Option<AccessStatus> {
        if self.is_owner(user) {
            return Some(AccessStatus::Approved);
        }
        self.users.get(&user).map(|r| r.status)
    }

    /// Registers an access request from `user`.
    pub fn request(&mut self, user: i64, username: Option<String>) -> RequestOutcome {
        if self.is_owner(user) {
            return RequestOutcome::AlreadyApproved;
        }
        match self.users.get(&user).map(|r| r.status) {
            Some(AccessStatus::Approved) => RequestOutcome::AlreadyApproved,
            Some(AccessStatus::Pending) => RequestOutcome::AlreadyPending,
            Some(AccessStatus::Denied) => RequestOutcome::Denied,
            None => {
                self.users.insert(
                    user,
                    AccessRecord {
                        status: AccessStatus::Pending,
                        username,
                        requested_at: Utc::now(),
                    },
                );
                RequestOutcome::New
            }
        }
    }

    /// Approves a user. Returns false when the user never requested access.
    pub fn approve(&mut self, user: i64) -> bool {
        match self.users.get_mut(&user) {
            Some(record) => {
                record.status = AccessStatus::Approved;
                true
            }
            None => false,
        }
    }

    /// Denies a user. Returns false when the user never requested access.
    pub fn deny(&mut self, user: i64) -> bool {
        match self.users.get_mut(&user) {
            Some(record) => {
                record.status = AccessStatus::Denied;
                true
            }
            None => false,
        }
    }

    /// All known users, oldest request first.
    pub fn list(&self) -> Vec<(i64, AccessRecord)> {
        let mut users: Vec<_> = self.users.iter().map(|(id, r)| (*id, r.clone())).collect();
        users.sort_by_key(|(_, r)| r.requested_at);
        users
    }
}
