// Core moderation module - mod-log entries, confirmations, announcements and autoroles.
// Following the same pattern as the latex module.

pub mod confirmation;
pub mod moderation_models;
pub mod moderation_policy;
pub mod moderation_service;

pub use confirmation::*;
pub use moderation_models::*;
pub use moderation_policy::*;
pub use moderation_service::*;
