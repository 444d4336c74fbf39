// Reaction roles - grants or revokes autoroles when members react to the
// configured autorole message.

use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

/// Apply the autoroles bound to a reaction on the autorole message.
///
/// `added` is true for reaction additions and false for removals.
pub async fn handle_reaction(
    ctx: &serenity::Context,
    data: &Data,
    reaction: &serenity::Reaction,
    added: bool,
) -> Result<(), Error> {
    let Some(target) = data.config.moderation.autorole_message else {
        return Ok(());
    };
    if reaction.message_id.get() != target.message_id {
        return Ok(());
    }

    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return Ok(());
    };

    // Ignore our own reactions and other bots
    let from_bot = reaction.member.as_ref().is_some_and(|m| m.user.bot);
    if from_bot || user_id == ctx.cache.current_user().id {
        return Ok(());
    }

    let emoji = reaction.emoji.to_string();
    for role_id in data.autoroles.roles_for_emoji(&emoji).await? {
        let role_id = serenity::RoleId::new(role_id);
        let result = if added {
            ctx.http
                .add_member_role(guild_id, user_id, role_id, Some("Autorole reaction"))
                .await
        } else {
            ctx.http
                .remove_member_role(guild_id, user_id, role_id, Some("Autorole reaction"))
                .await
        };

        match result {
            Ok(()) => tracing::info!(
                user_id = user_id.get(),
                role_id = role_id.get(),
                added,
                "Autorole applied"
            ),
            Err(e) => tracing::warn!(
                "Failed to update autorole {} for {}: {}",
                role_id,
                user_id,
                e
            ),
        }
    }

    Ok(())
}
