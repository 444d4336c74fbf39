// Mod-log embeds: one per moderation action, shown in the invoking channel
// and copied to the configured log channel.

use crate::core::moderation::ModLogEntry;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

pub fn mod_log_embed(entry: &ModLogEntry) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(entry.action.title())
        .colour(serenity::Colour::DARK_GOLD);

    for (name, value) in entry.fields() {
        embed = embed.field(name, value, true);
    }

    embed.timestamp(serenity::Timestamp::now())
}

/// Reply with the entry, copy it to the mod log and tick the invocation.
pub async fn publish(ctx: Context<'_>, entry: &ModLogEntry) -> Result<(), Error> {
    tracing::info!(
        action = %entry.action,
        target = %entry.target,
        moderator = ctx.author().id.get(),
        "Moderation action taken"
    );

    let embed = mod_log_embed(entry);
    ctx.send(poise::CreateReply::default().embed(embed.clone()))
        .await?;

    let log_channel = serenity::ChannelId::new(ctx.data().config.moderation.mod_log_channel_id);
    if let Err(e) = log_channel
        .send_message(ctx.http(), serenity::CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!("Failed to post to mod log: {}", e);
    }

    if let poise::Context::Prefix(prefix_ctx) = ctx {
        if let Err(e) = prefix_ctx.msg.react(ctx.http(), '✅').await {
            tracing::warn!("Failed to react to moderation command: {}", e);
        }
    }

    Ok(())
}
