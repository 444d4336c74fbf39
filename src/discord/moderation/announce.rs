// Staff announcements with a reaction confirmation step.

use super::checks::{is_owner, staff_only};
use super::prompts::await_reaction;
use crate::core::moderation::{Announcement, AnnouncementKind, ConfirmationFlow, ConfirmationState};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const CONFIRM: &str = "✅";
const CANCEL: &str = "❌";

/// Post an announcement. End the message with ` ping` to ping the announcement role.
#[poise::command(prefix_command, slash_command, guild_only, check = "staff_only")]
pub async fn announce(
    ctx: Context<'_>,
    #[description = "What to announce (end with ` ping` to ping)"]
    #[rest]
    message: Option<String>,
) -> Result<(), Error> {
    let Some(announcement) = Announcement::parse(message.as_deref()) else {
        ctx.say("Please include a message!").await?;
        return Ok(());
    };

    let config = &ctx.data().config.moderation;
    let kind = AnnouncementKind::for_author(is_owner(ctx));
    let colour = match kind {
        AnnouncementKind::BotUpdate => serenity::Colour::DARK_GOLD,
        AnnouncementKind::ServerUpdate => author_colour(ctx).await,
    };

    let embed = serenity::CreateEmbed::new()
        .title(kind.title())
        .description(&announcement.body)
        .colour(colour)
        .footer(
            serenity::CreateEmbedFooter::new(format!(
                "Announcement from {}",
                ctx.author().tag()
            ))
            .icon_url(ctx.author().face()),
        );

    let preview = ctx
        .send(
            poise::CreateReply::default()
                .content("Proceed with announcement?")
                .embed(embed.clone()),
        )
        .await?;
    let preview_id = preview.message().await?.id;

    for emoji in [CONFIRM, CANCEL] {
        ctx.channel_id()
            .create_reaction(
                ctx.http(),
                preview_id,
                serenity::ReactionType::Unicode(emoji.to_string()),
            )
            .await?;
    }

    let state = await_reaction(
        ctx,
        preview_id,
        ConfirmationFlow::reaction(CONFIRM, CANCEL),
        config.confirmation_timeout,
    )
    .await;

    match state {
        ConfirmationState::Confirmed(_) => {
            let mut message = serenity::CreateMessage::new().embed(embed);
            if announcement.ping {
                match config.announcement_ping_role_id {
                    Some(role_id) => message = message.content(format!("<@&{}>", role_id)),
                    None => tracing::warn!("Announcement asked for a ping but no ping role is configured"),
                }
            }

            serenity::ChannelId::new(config.announcement_channel_id)
                .send_message(ctx.http(), message)
                .await?;
            tracing::info!(author = ctx.author().id.get(), ?kind, "Announcement posted");
        }
        _ => {
            ctx.say("Announcement was cancelled.").await?;
            if let Err(e) = preview.delete(ctx).await {
                tracing::warn!("Failed to delete announcement preview: {}", e);
            }
        }
    }

    Ok(())
}

/// The invoker's display colour, from their highest coloured role.
pub async fn author_colour(ctx: Context<'_>) -> serenity::Colour {
    ctx.author_member()
        .await
        .and_then(|member| member.colour(ctx.cache()))
        .unwrap_or_default()
}
