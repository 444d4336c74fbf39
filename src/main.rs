// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (databases, APIs)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::config::BotConfig;
use crate::core::latex::LatexService;
use crate::core::moderation::AutoroleService;
use crate::discord::commands::presence;
use crate::discord::moderation::reaction_roles;
use crate::discord::{Data, Error};
use crate::infra::latex::CodecogsClient;
use crate::infra::moderation::SqliteAutoroleStore;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
/// Reactions on the autorole message hand out roles.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            if let Err(e) = reaction_roles::handle_reaction(ctx, data, add_reaction, true).await {
                tracing::error!("Error handling reaction add: {}", e);
            }
        }
        serenity::FullEvent::ReactionRemove { removed_reaction } => {
            if let Err(e) =
                reaction_roles::handle_reaction(ctx, data, removed_reaction, false).await
            {
                tracing::error!("Error handling reaction remove: {}", e);
            }
        }
        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let token = std::env::var("DISCORD_TOKEN").context(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    )?;
    let config = Arc::new(BotConfig::from_env()?);

    // Keep runtime databases in a dedicated folder so the repo root stays tidy.
    std::fs::create_dir_all(&config.data_dir)
        .context("Failed to create data directory for SQLite files")?;
    let autorole_db_path = format!("{}/autoroles.db", config.data_dir);

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let autorole_pool = sqlx::sqlite::SqlitePoolOptions::new()
        .connect(&format!("sqlite://{}?mode=rwc", autorole_db_path))
        .await
        .context("Failed to connect to autorole DB")?;
    let autorole_store = SqliteAutoroleStore::new(autorole_pool);
    autorole_store
        .migrate()
        .await
        .context("Failed to migrate autorole DB")?;
    let autorole_service = Arc::new(AutoroleService::new(autorole_store));

    let codecogs = CodecogsClient::new(config.latex.http_timeout)
        .context("Failed to create equation API client")?;
    let latex_service = Arc::new(
        LatexService::new(
            codecogs,
            config.latex.options.clone(),
            config.latex.background_rgba(),
        )
        .context("Invalid LaTeX render defaults")?,
    );

    // Create the data structure that will be shared across all commands
    let data = Data {
        latex: Arc::clone(&latex_service),
        autoroles: Arc::clone(&autorole_service),
        config: Arc::clone(&config),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read prefix commands
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::GUILD_MODERATION
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let prefix = config.prefix.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Register all our commands here
            commands: vec![
                discord::commands::latex::tex(),
                discord::moderation::commands::kick(),
                discord::moderation::commands::ban(),
                discord::moderation::commands::unban(),
                discord::moderation::commands::mute(),
                discord::moderation::commands::unmute(),
                discord::moderation::announce::announce(),
                discord::moderation::autorole::autorole(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                // Edits to a `tex` invocation re-run it and update the preview
                edit_tracker: Some(Arc::new(poise::EditTracker::for_timespan(
                    config.latex.edit_window,
                ))),
                ..Default::default()
            },
            // Event handler for reactions and other events
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                tracing::info!("Commands registered, bot is ready");
                presence::on_ready(ctx, &prefix);

                Ok(data)
            })
        })
        .build();

    // Create the client and start the bot
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
