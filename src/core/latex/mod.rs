// Core LaTeX preview module - URL building and image post-processing.

pub mod image_padding;
pub mod latex_models;
pub mod latex_service;
pub mod latex_url;

pub use latex_models::{LatexError, RenderOptions};
pub use latex_service::{EquationRenderer, LatexService};
