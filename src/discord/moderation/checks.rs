// Command checks for staff-only commands.
//
// Discord permissions (kick, ban) are declared on the commands themselves
// and enforced by poise. Staff membership is our own notion, so it is a
// poise `check` backed by the core capability rule.

use crate::core::moderation::has_staff_capability;
use crate::discord::{Context, Error};

/// Whether the invoker is one of the bot's owners.
pub fn is_owner(ctx: Context<'_>) -> bool {
    ctx.framework().options().owners.contains(&ctx.author().id)
}

/// Allow bot owners and members holding a configured staff role.
pub async fn staff_only(ctx: Context<'_>) -> Result<bool, Error> {
    let author_roles: Vec<u64> = match ctx.author_member().await {
        Some(member) => member.roles.iter().map(|r| r.get()).collect(),
        None => Vec::new(),
    };

    let allowed = has_staff_capability(
        &author_roles,
        &ctx.data().config.moderation.staff_role_ids,
        is_owner(ctx),
    );

    if !allowed {
        ctx.say("⛔ Only staff can use this command.").await?;
    }
    Ok(allowed)
}
