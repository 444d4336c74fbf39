// Drives the core confirmation flow with serenity collectors.
//
// Each collector result (or its timeout) becomes a `PromptEvent`; the flow
// decides when we are done.

use crate::core::moderation::{ConfirmationFlow, ConfirmationState, PromptEvent};
use crate::discord::Context;
use poise::serenity_prelude as serenity;
use std::time::Duration;
use tokio::time::Instant;

/// Wait for the invoker's next message in the invoking channel.
pub async fn await_text_reply(
    ctx: Context<'_>,
    mut flow: ConfirmationFlow,
    timeout: Duration,
) -> ConfirmationState {
    let deadline = Instant::now() + timeout;

    while !flow.is_finished() {
        let reply = serenity::MessageCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(deadline.saturating_duration_since(Instant::now()))
            .await;

        match reply {
            Some(message) => flow.handle(PromptEvent::Reply(&message.content)),
            None => flow.handle(PromptEvent::Timeout),
        };
    }

    flow.into_state()
}

/// Wait for the invoker to react to `message_id`.
pub async fn await_reaction(
    ctx: Context<'_>,
    message_id: serenity::MessageId,
    mut flow: ConfirmationFlow,
    timeout: Duration,
) -> ConfirmationState {
    let deadline = Instant::now() + timeout;

    while !flow.is_finished() {
        let reaction = serenity::ReactionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .message_id(message_id)
            .timeout(deadline.saturating_duration_since(Instant::now()))
            .await;

        match reaction {
            Some(reaction) => {
                let emoji = reaction.emoji.to_string();
                flow.handle(PromptEvent::Reaction(&emoji))
            }
            None => flow.handle(PromptEvent::Timeout),
        };
    }

    flow.into_state()
}
