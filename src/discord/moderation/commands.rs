// Moderation commands: kick, ban, unban, mute, unmute.
//
// Discord permissions are declared on each command and checked by poise
// before the body runs. The body only gathers a reason, performs the action
// and publishes a mod-log entry.

use super::mod_log::publish;
use super::prompts::await_text_reply;
use crate::core::moderation::{
    next_ban_page, parse_user_id, ConfirmationFlow, ConfirmationState, ModAction, ModLogEntry,
    REASON_NOT_SPECIFIED,
};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;

/// Kicks members from the server.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "KICK_MEMBERS"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Member to kick"] user: serenity::Member,
    #[description = "Why they are being kicked"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;
    let reason = resolve_reason(ctx, reason).await?;

    guild_id
        .kick_with_reason(ctx.http(), user.user.id, &reason)
        .await?;

    let entry = ModLogEntry::new(ModAction::Kick, user.display_name(), moderator(ctx))
        .with_reason(reason);
    publish(ctx, &entry).await
}

/// The mighty ban hammer.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "Member to ban"] user: serenity::Member,
    #[description = "Why they are being banned"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;
    let reason = resolve_reason(ctx, reason).await?;

    guild_id
        .ban_with_reason(ctx.http(), user.user.id, 0, &reason)
        .await?;

    let entry = ModLogEntry::new(ModAction::Ban, user.display_name(), moderator(ctx))
        .with_reason(reason);
    publish(ctx, &entry).await
}

/// Unbans a user by id.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "ID of the banned user"]
    #[rest]
    id: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let Some(user_id) = parse_user_id(&id) else {
        ctx.say("Please give the user's id as a parameter!").await?;
        return Ok(());
    };

    let Some(ban) = find_ban(ctx, guild_id, user_id).await? else {
        ctx.say("This user is not currently banned!").await?;
        return Ok(());
    };

    guild_id.unban(ctx.http(), ban.user.id).await?;

    let entry = ModLogEntry::new(ModAction::Unban, ban.user.tag(), moderator(ctx));
    publish(ctx, &entry).await
}

/// Mutes a member by giving them the muted role.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "Member to mute"] user: serenity::Member,
    #[description = "Why they are being muted"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let muted_role = serenity::RoleId::new(ctx.data().config.moderation.muted_role_id);
    let reason = resolve_reason(ctx, reason).await?;

    user.add_role(ctx.http(), muted_role).await?;

    let entry = ModLogEntry::new(ModAction::Mute, user.display_name(), moderator(ctx))
        .with_reason(reason);
    publish(ctx, &entry).await
}

/// Unmutes an already-muted member.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "Member to unmute"] user: serenity::Member,
) -> Result<(), Error> {
    let muted_role = serenity::RoleId::new(ctx.data().config.moderation.muted_role_id);

    if !user.roles.contains(&muted_role) {
        ctx.say("This user was not muted!").await?;
        return Ok(());
    }

    user.remove_role(ctx.http(), muted_role).await?;

    let entry = ModLogEntry::new(ModAction::Unmute, user.display_name(), moderator(ctx));
    publish(ctx, &entry).await
}

/// Search the guild's ban list page by page.
async fn find_ban(
    ctx: Context<'_>,
    guild_id: serenity::GuildId,
    user_id: u64,
) -> Result<Option<serenity::Ban>, Error> {
    let mut after = None;
    loop {
        let page = guild_id
            .bans(ctx.http(), after.map(serenity::UserPagination::After), None)
            .await?;
        let page_len = page.len();
        let last_user_id = page.last().map(|b| b.user.id.get());

        if let Some(ban) = page.into_iter().find(|b| b.user.id.get() == user_id) {
            return Ok(Some(ban));
        }
        match next_ban_page(page_len, last_user_id) {
            Some(id) => after = Some(serenity::UserId::new(id)),
            None => return Ok(None),
        }
    }
}

fn moderator(ctx: Context<'_>) -> String {
    ctx.author().mention().to_string()
}

/// Use the given reason, or ask the moderator for one.
///
/// Replying "no" or letting the prompt time out records the reason as not specified.
async fn resolve_reason(ctx: Context<'_>, reason: Option<String>) -> Result<String, Error> {
    if let Some(reason) = reason.filter(|r| !r.trim().is_empty()) {
        return Ok(reason);
    }

    let prompt = ctx
        .say(format!("{}, please give your reason.", ctx.author().mention()))
        .await?;

    let state = await_text_reply(
        ctx,
        ConfirmationFlow::free_text(Some("no")),
        ctx.data().config.moderation.reason_prompt_timeout,
    )
    .await;

    if let Err(e) = prompt.delete(ctx).await {
        tracing::warn!("Failed to delete reason prompt: {}", e);
    }

    match state {
        ConfirmationState::Confirmed(reason) => Ok(reason),
        _ => {
            ctx.say("No reason has been specified").await?;
            Ok(REASON_NOT_SPECIFIED.to_string())
        }
    }
}
