// Discord moderation layer - commands, prompts and reaction roles.

pub mod announce;
pub mod autorole;
pub mod checks;
pub mod commands;
pub mod mod_log;
pub mod prompts;
pub mod reaction_roles;
