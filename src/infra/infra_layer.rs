// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "latex/mod.rs"]
pub mod latex;

#[path = "moderation/mod.rs"]
pub mod moderation;
