// This module handles bot presence and lifecycle events.
//
// Discord-layer glue only: we work with Discord SDK types (Context,
// ActivityData, OnlineStatus) and keep the logic short.

use poise::serenity_prelude as serenity;

/// Status line advertising the preview command under the configured prefix.
fn status_text(prefix: &str) -> String {
    format!("{}tex for LaTeX previews", prefix)
}

/// Called once the bot is ready so we announce a default presence message.
pub fn on_ready(ctx: &serenity::Context, prefix: &str) {
    let activity = serenity::ActivityData::watching(status_text(prefix));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}
