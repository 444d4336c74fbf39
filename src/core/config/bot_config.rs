// Deployment configuration.
//
// Channel and role ids differ per server, so they are read from the
// environment (or a .env file) at startup instead of living in the code.

use crate::core::latex::RenderOptions;
use image::Rgba;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("Invalid value for {key}: `{value}`")]
    Invalid { key: &'static str, value: String },
}

/// The message whose reactions hand out autoroles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoroleMessage {
    pub channel_id: u64,
    pub message_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationConfig {
    pub mod_log_channel_id: u64,
    pub muted_role_id: u64,
    pub announcement_channel_id: u64,
    pub announcement_ping_role_id: Option<u64>,
    pub autorole_message: Option<AutoroleMessage>,
    pub staff_role_ids: Vec<u64>,
    pub reason_prompt_timeout: Duration,
    pub description_prompt_timeout: Duration,
    pub confirmation_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LatexConfig {
    pub options: RenderOptions,
    /// Opaque colour the padded preview is flattened onto.
    pub background: [u8; 3],
    /// How long edits to a `tex` invocation re-render the reply.
    pub edit_window: Duration,
    pub http_timeout: Duration,
}

impl LatexConfig {
    pub fn background_rgba(&self) -> Rgba<u8> {
        let [r, g, b] = self.background;
        Rgba([r, g, b, 0xFF])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub prefix: String,
    pub data_dir: String,
    pub moderation: ModerationConfig,
    pub latex: LatexConfig,
}

impl BotConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let autorole_channel = env.optional_id("AUTOROLE_CHANNEL_ID")?;
        let autorole_message = env.optional_id("AUTOROLE_MESSAGE_ID")?;
        let autorole_message = match (autorole_channel, autorole_message) {
            (Some(channel_id), Some(message_id)) => Some(AutoroleMessage {
                channel_id,
                message_id,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("AUTOROLE_MESSAGE_ID")),
            (None, Some(_)) => return Err(ConfigError::Missing("AUTOROLE_CHANNEL_ID")),
        };

        let moderation = ModerationConfig {
            mod_log_channel_id: env.required_id("MOD_LOG_CHANNEL_ID")?,
            muted_role_id: env.required_id("MUTED_ROLE_ID")?,
            announcement_channel_id: env.required_id("ANNOUNCEMENT_CHANNEL_ID")?,
            announcement_ping_role_id: env.optional_id("ANNOUNCEMENT_PING_ROLE_ID")?,
            autorole_message,
            staff_role_ids: env.id_list("STAFF_ROLE_IDS")?,
            reason_prompt_timeout: env.secs("REASON_PROMPT_TIMEOUT_SECS", 20)?,
            description_prompt_timeout: env.secs("DESCRIPTION_PROMPT_TIMEOUT_SECS", 40)?,
            confirmation_timeout: env.secs("CONFIRMATION_TIMEOUT_SECS", 10)?,
        };

        let defaults = RenderOptions::default();
        let latex = LatexConfig {
            options: RenderOptions {
                size: env.parsed("LATEX_SIZE", 10)?,
                font: env.string("LATEX_FONT", &defaults.font),
                foreground: env.string("LATEX_FOREGROUND", &defaults.foreground),
                dpi: env.parsed("LATEX_DPI", defaults.dpi)?,
                ..defaults
            },
            background: env.hex_rgb("LATEX_BACKGROUND", [0x36, 0x39, 0x3E])?,
            edit_window: env.secs("LATEX_EDIT_WINDOW_SECS", 1800)?,
            http_timeout: env.secs("LATEX_HTTP_TIMEOUT_SECS", 30)?,
        };

        Ok(Self {
            prefix: env.string("BOT_PREFIX", "!"),
            data_dir: env.string("DATA_DIR", "data"),
            moderation,
            latex,
        })
    }
}

/// Typed accessors over a lookup function.
struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: std::str::FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            None => Ok(default),
        }
    }

    fn optional_id(&self, key: &'static str) -> Result<Option<u64>, ConfigError> {
        match self.get(key) {
            Some(value) => match value.parse::<u64>() {
                Ok(id) if id > 0 => Ok(Some(id)),
                _ => Err(ConfigError::Invalid { key, value }),
            },
            None => Ok(None),
        }
    }

    fn required_id(&self, key: &'static str) -> Result<u64, ConfigError> {
        self.optional_id(key)?.ok_or(ConfigError::Missing(key))
    }

    fn id_list(&self, key: &'static str) -> Result<Vec<u64>, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u64>().map_err(|_| ConfigError::Invalid {
                    key,
                    value: s.to_string(),
                })
            })
            .collect()
    }

    fn secs(&self, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
        self.parsed(key, default).map(Duration::from_secs)
    }

    fn hex_rgb(&self, key: &'static str, default: [u8; 3]) -> Result<[u8; 3], ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        let hex = value.trim_start_matches('#');
        let invalid = || ConfigError::Invalid {
            key,
            value: value.clone(),
        };
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        Ok([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
    }
}
