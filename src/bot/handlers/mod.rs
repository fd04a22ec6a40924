pub mod callback;
pub mod message;

use std::sync::Arc;
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
};

use crate::bot::commands::Command;
use crate::bot::dialogue::SetupState;
use crate::state::AppContext;

pub struct BotHandler {
    pub ctx: AppContext,
}

impl BotHandler {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let ctx_cmd = self.ctx.clone();
        let ctx_photo = self.ctx.clone();
        let ctx_collect = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        let message_handler = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot, msg, cmd, dialogue| {
                        let ctx = ctx_cmd.clone();
                        async move { message::command_handler(bot, msg, cmd, dialogue, ctx).await }
                    }),
            )
            .branch(
                dptree::filter(|msg: Message| msg.photo().is_some()).endpoint(
                    move |bot, msg, dialogue| {
                        let ctx = ctx_photo.clone();
                        async move { message::photo_handler(bot, msg, dialogue, ctx).await }
                    },
                ),
            )
            .branch(dptree::case![SetupState::Collecting { drafts }].endpoint(
                move |bot, msg, drafts, dialogue| {
                    let ctx = ctx_collect.clone();
                    async move { message::collect_handler(bot, msg, drafts, dialogue, ctx).await }
                },
            ))
            .branch(dptree::endpoint(message::handle_general_message));

        let callback_query_handler = Update::filter_callback_query().endpoint(
            move |bot, q, dialogue| {
                let ctx = ctx_callback.clone();
                async move { callback::callback_handler(bot, q, dialogue, ctx).await }
            },
        );

        dialogue::enter::<Update, InMemStorage<SetupState>, SetupState, _>()
            .branch(message_handler)
            .branch(callback_query_handler)
    }
}

/// The dialogue storage shared between the dispatcher and the handlers.
pub fn setup_storage() -> Arc<InMemStorage<SetupState>> {
    InMemStorage::new()
}
