pub mod access;
pub mod registry;

pub use access::*;
pub use registry::*;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::services::reminder::ReminderContext;
use crate::services::vision::RosterReader;

/// Everything the bot handlers need, cloned into each endpoint.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub access: Arc<Mutex<AccessRegistry>>,
    pub reminders: ReminderContext,
    pub roster: Arc<RosterReader>,
}
