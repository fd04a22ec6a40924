use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::Dialogue;

use crate::schedule::ShiftSpec;

pub type SetupDialogue = Dialogue<SetupState, InMemStorage<SetupState>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// The shift-setup conversation: collect entries, review, commit.
#[derive(Clone, Default)]
pub enum SetupState {
    #[default]
    Idle,
    Collecting {
        drafts: Vec<ShiftSpec>,
    },
    Reviewing {
        drafts: Vec<ShiftSpec>,
    },
}

/// Reads the current state, treating storage errors as Idle.
pub async fn current_state(dialogue: &SetupDialogue) -> SetupState {
    match dialogue.get().await {
        Ok(Some(state)) => state,
        Ok(None) => SetupState::Idle,
        Err(e) => {
            tracing::warn!("Failed to read dialogue state: {}", e);
            SetupState::Idle
        }
    }
}

/// Writes the state, logging storage errors instead of surfacing them.
pub async fn set_state(dialogue: &SetupDialogue, state: SetupState) {
    if let Err(e) = dialogue.update(state).await {
        tracing::warn!("Failed to update dialogue state: {}", e);
    }
}
