// LaTeX rendering domain models - option tables, render options and errors.
//
// These are pure domain types with no Discord or HTTP dependencies.
// The option tables map each legal value to the directive the CodeCogs
// renderer understands. An empty directive means "use the renderer default".

use thiserror::Error;

/// Rendering engines (output formats) the equation API can produce.
pub const ENGINES: &[&str] = &["png", "gif", "pdf", "swf", "emf", "svg"];

/// Font scale keywords, keyed by point size.
pub const SIZES: &[(i64, &str)] = &[
    (5, "\\tiny "),
    (9, "\\small "),
    (10, ""),
    (12, "\\large "),
    (18, "\\LARGE "),
    (20, "\\huge "),
];

/// Named fonts.
pub const FONTS: &[(&str, &str)] = &[
    ("Latin Modern", ""),
    ("Verdana", "\\fn_jvn "),
    ("Comic Sans", "\\fn_cs "),
    ("Computer Modern", "\\fn_cm "),
    ("Helvetica", "\\fn_phv "),
];

/// Named background colours.
pub const BACKGROUNDS: &[(&str, &str)] = &[
    ("transparent", ""),
    ("black", "\\bg_black "),
    ("white", "\\bg_white "),
    ("red", "\\bg_red "),
    ("green", "\\bg_green "),
    ("blue", "\\bg_blue "),
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum LatexError {
    /// A render option was outside its legal set.
    #[error("Invalid {field} `{value}`. Valid values are: {allowed}")]
    InvalidOption {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// The fetched bytes could not be decoded as an image.
    #[error("Could not decode rendered image: {0}")]
    ImageDecode(String),

    #[error("Could not encode padded image: {0}")]
    Encode(String),

    #[error("Could not build equation API client: {0}")]
    Client(String),

    #[error("Equation API request failed: {0}")]
    Fetch(String),

    #[error("Image worker failed: {0}")]
    Worker(String),
}

impl LatexError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString, allowed: String) -> Self {
        LatexError::InvalidOption {
            field,
            value: value.to_string(),
            allowed,
        }
    }
}

// ============================================================================
// RENDER OPTIONS
// ============================================================================

/// Parameters for a single render request.
///
/// The fields are kept as raw values; `build_url` is the single place where
/// they are checked against the option tables above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub engine: String,
    pub size: i64,
    pub font: String,
    pub background: String,
    /// dvips colour name passed to `\color{..}`.
    pub foreground: String,
    pub dpi: i64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            engine: "png".to_string(),
            size: 12,
            font: "Latin Modern".to_string(),
            background: "transparent".to_string(),
            foreground: "white".to_string(),
            dpi: 200,
        }
    }
}

impl RenderOptions {
    /// Copy of these options with a different font size.
    pub fn with_size(&self, size: i64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

/// Look up the directive for `key` in an option table.
pub(crate) fn directive<K: PartialEq + Copy>(
    table: &[(K, &'static str)],
    key: K,
) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, d)| *d)
}

/// Human-readable list of a table's keys, for error messages.
pub(crate) fn legal_keys<K: ToString>(table: &[(K, &'static str)]) -> String {
    table
        .iter()
        .map(|(k, _)| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
