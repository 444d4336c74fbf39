// Discord commands module.
// Each feature gets its own command file.

pub mod latex;

// Bot presence management
pub mod presence;
