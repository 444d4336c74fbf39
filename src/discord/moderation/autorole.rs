// Autorole management commands.
//
// Bindings live in the autorole store; the configured autorole message
// mirrors them as embed fields plus one reaction per emoji.

use super::announce::author_colour;
use super::checks::staff_only;
use super::prompts::await_text_reply;
use crate::core::config::AutoroleMessage;
use crate::core::moderation::{autorole_field_name, AutoroleError, ConfirmationFlow, ConfirmationState};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;

/// Embed field values are capped by Discord.
const MAX_FIELD_VALUE_CHARS: usize = 1024;

/// Lists autoroles. Use `add` and `remove` to manage them.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    check = "staff_only",
    subcommands("list", "add", "remove")
)]
pub async fn autorole(ctx: Context<'_>) -> Result<(), Error> {
    show_autoroles(ctx).await
}

/// List all autoroles.
#[poise::command(prefix_command, slash_command, guild_only, check = "staff_only")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    show_autoroles(ctx).await
}

/// Add a new autorole.
#[poise::command(prefix_command, slash_command, guild_only, check = "staff_only")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Emoji members react with"] emoji: String,
    #[description = "Exact name of the role to grant"]
    #[rest]
    rolename: String,
) -> Result<(), Error> {
    let Ok(reaction) = serenity::ReactionType::try_from(emoji.as_str()) else {
        ctx.say(format!("{}, that doesn't look like an emoji.", ctx.author().mention()))
            .await?;
        return Ok(());
    };
    let Some(role) = find_role(ctx, &rolename).await? else {
        return Ok(());
    };

    let config = &ctx.data().config.moderation;
    let prompt = ctx
        .say(format!("{}, please add a description.", ctx.author().mention()))
        .await?;
    let state = await_text_reply(
        ctx,
        ConfirmationFlow::free_text(None),
        config.description_prompt_timeout,
    )
    .await;
    if let Err(e) = prompt.delete(ctx).await {
        tracing::warn!("Failed to delete description prompt: {}", e);
    }

    let ConfirmationState::Confirmed(description) = state else {
        ctx.say("Autorole assignment failed. Try again.").await?;
        return Ok(());
    };

    let autorole = match ctx
        .data()
        .autoroles
        .add(&emoji, role.id.get(), &description)
        .await
    {
        Ok(autorole) => autorole,
        Err(AutoroleError::Duplicate(_)) => {
            ctx.say("That emoji is already bound to that role.").await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let embed = serenity::CreateEmbed::new()
        .title("Add autorole")
        .description(format!("{} {}", autorole.emoji, role.mention()))
        .colour(author_colour(ctx).await);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    if let Some(target) = config.autorole_message {
        let field_name = autorole_field_name(&autorole.emoji, &role.name);
        let field_value: String = autorole
            .description
            .chars()
            .take(MAX_FIELD_VALUE_CHARS)
            .collect();

        let message = edit_autorole_message(ctx, target, |embed| {
            serenity::CreateEmbed::from(embed).field(field_name, field_value, true)
        })
        .await?;
        message.react(ctx.http(), reaction).await?;
    }

    tracing::info!(emoji = %autorole.emoji, role_id = autorole.role_id, "Autorole added");
    Ok(())
}

/// Remove an autorole.
#[poise::command(prefix_command, slash_command, guild_only, check = "staff_only")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Emoji of the autorole"] emoji: String,
    #[description = "Exact name of the role"]
    #[rest]
    rolename: String,
) -> Result<(), Error> {
    let Some(role) = find_role(ctx, &rolename).await? else {
        return Ok(());
    };

    match ctx.data().autoroles.remove(&emoji, role.id.get()).await {
        Ok(()) => {}
        Err(AutoroleError::NotFound(_)) => {
            ctx.say("That emoji is not bound to that role.").await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let embed = serenity::CreateEmbed::new()
        .title("Remove autorole")
        .description(format!("{} {}", emoji.trim(), role.mention()))
        .colour(author_colour(ctx).await);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    if let Some(target) = ctx.data().config.moderation.autorole_message {
        let field_name = autorole_field_name(emoji.trim(), &role.name);
        let message = edit_autorole_message(ctx, target, |mut embed| {
            embed.fields.retain(|f| f.name != field_name);
            serenity::CreateEmbed::from(embed)
        })
        .await?;

        if let Ok(reaction) = serenity::ReactionType::try_from(emoji.trim()) {
            message.delete_reaction_emoji(ctx.http(), reaction).await?;
        }
    }

    tracing::info!(emoji = %emoji.trim(), role_id = role.id.get(), "Autorole removed");
    Ok(())
}

async fn show_autoroles(ctx: Context<'_>) -> Result<(), Error> {
    let autoroles = ctx.data().autoroles.list().await?;

    let description = if autoroles.is_empty() {
        "No autoroles yet.".to_string()
    } else {
        autoroles
            .iter()
            .map(|a| a.list_line())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title("List of all autoroles")
        .description(description)
        .colour(author_colour(ctx).await);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Find a guild role by exact name, telling the invoker if there is none.
async fn find_role(ctx: Context<'_>, name: &str) -> Result<Option<serenity::Role>, Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;
    let name = name.trim();

    let role = guild_id
        .roles(ctx.http())
        .await?
        .into_values()
        .find(|r| r.name == name);

    if role.is_none() {
        ctx.say(format!(
            "{}, the role specified doesn't exist. Try again, character for character.",
            ctx.author().mention()
        ))
        .await?;
    }
    Ok(role)
}

/// Rewrite the first embed of the autorole message.
async fn edit_autorole_message(
    ctx: Context<'_>,
    target: AutoroleMessage,
    edit: impl FnOnce(serenity::Embed) -> serenity::CreateEmbed,
) -> Result<serenity::Message, Error> {
    let mut message = serenity::ChannelId::new(target.channel_id)
        .message(ctx.http(), serenity::MessageId::new(target.message_id))
        .await?;

    let embed = message
        .embeds
        .first()
        .cloned()
        .ok_or("The autorole message has no embed to edit")?;

    message
        .edit(ctx.http(), serenity::EditMessage::new().embed(edit(embed)))
        .await?;
    Ok(message)
}
