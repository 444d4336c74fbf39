// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "moderation/mod.rs"]
pub mod moderation;

use crate::core::config::BotConfig;
use crate::core::latex::LatexService;
use crate::core::moderation::AutoroleService;
use crate::infra::latex::CodecogsClient;
use crate::infra::moderation::SqliteAutoroleStore;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands.
/// This is where we store our services and configuration.
pub struct Data {
    pub latex: Arc<LatexService<CodecogsClient>>,
    pub autoroles: Arc<AutoroleService<SqliteAutoroleStore>>,
    pub config: Arc<BotConfig>,
}
