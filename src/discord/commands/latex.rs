// Discord command for LaTeX previews.
//
// **Notice the pattern:**
// 1. Extract the snippet from the invocation
// 2. Call the core LaTeX service
// 3. Reply with the padded PNG
//
// This layer is THIN - rendering and padding live in core.

use crate::core::latex::LatexError;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Attempts to parse the given LaTeX string and display a preview.
///
/// Invoke it as `texd` or `latexd` to delete your message before the
/// preview is shown. Editing your message re-renders the preview.
#[poise::command(
    prefix_command,
    slash_command,
    track_edits,
    aliases("latex", "texd", "latexd")
)]
pub async fn tex(
    ctx: Context<'_>,
    #[description = "LaTeX to render"]
    #[rest]
    content: String,
) -> Result<(), Error> {
    if deletes_invocation(ctx.invoked_command_name()) {
        if let poise::Context::Prefix(prefix_ctx) = ctx {
            if let Err(e) = prefix_ctx.msg.delete(ctx.http()).await {
                tracing::warn!("Failed to delete tex invocation: {}", e);
            }
        }
    }

    ctx.defer().await?;

    match ctx.data().latex.render(&content).await {
        Ok(png) => {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!("{}:", ctx.author().tag()))
                    .attachment(serenity::CreateAttachment::bytes(png, "latex.png")),
            )
            .await?;
        }
        Err(e @ LatexError::InvalidOption { .. }) => {
            ctx.say(format!("⚠️ {}", e)).await?;
        }
        Err(e) => {
            tracing::warn!(user_id = ctx.author().id.get(), "LaTeX render failed: {}", e);
            ctx.say("⚠️ I couldn't render that. Check your LaTeX and try again.")
                .await?;
        }
    }

    Ok(())
}

/// The `d` variants clean up after themselves.
fn deletes_invocation(invoked_name: &str) -> bool {
    invoked_name.ends_with('d')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_d_aliases_delete() {
        assert!(deletes_invocation("texd"));
        assert!(deletes_invocation("latexd"));
        assert!(!deletes_invocation("tex"));
        assert!(!deletes_invocation("latex"));
    }

    #[test]
    fn test_typing_comes_from_defer_only() {
        let command = tex();
        assert!(!command.broadcast_typing);
        assert_eq!(command.aliases, vec!["latex", "texd", "latexd"]);
    }
}
