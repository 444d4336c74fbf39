// LaTeX preview service - turns a snippet into a padded PNG.
//
// The flow is: build URL -> fetch through the renderer port -> pad and
// composite on a blocking worker -> encode PNG.
//
// NO Discord dependencies here.

use super::image_padding::{decode_image, encode_png, pad_and_composite};
use super::latex_models::{LatexError, RenderOptions};
use super::latex_url::build_url;
use async_trait::async_trait;
use image::Rgba;

// ============================================================================
// RENDERER TRAIT (PORT)
// ============================================================================

/// Fetches rendered equation images from a URL.
#[async_trait]
pub trait EquationRenderer: Send + Sync {
    /// Fetch the raw image bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LatexError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct LatexService<R: EquationRenderer> {
    renderer: R,
    options: RenderOptions,
    background: Rgba<u8>,
}

impl<R: EquationRenderer> LatexService<R> {
    /// Create a service rendering with `options` and flattening onto `background`.
    ///
    /// Fails if the options would never produce a valid URL.
    pub fn new(
        renderer: R,
        options: RenderOptions,
        background: Rgba<u8>,
    ) -> Result<Self, LatexError> {
        build_url("", &options)?;
        Ok(Self {
            renderer,
            options,
            background,
        })
    }

    /// URL of the preview for `content`.
    ///
    /// A TeX line break is prepended so the renderer left-aligns the content.
    pub fn preview_url(&self, content: &str) -> Result<String, LatexError> {
        build_url(&format!("\\\\{}", content), &self.options)
    }

    /// Render `content` to padded PNG bytes.
    pub async fn render(&self, content: &str) -> Result<Vec<u8>, LatexError> {
        let url = self.preview_url(content)?;
        tracing::debug!(%url, "Fetching LaTeX preview");

        let bytes = self.renderer.fetch(&url).await?;
        let background = self.background;

        tokio::task::spawn_blocking(move || {
            let source = decode_image(&bytes)?;
            let padded = pad_and_composite(&source, background);
            encode_png(&padded)
        })
        .await
        .map_err(|e| LatexError::Worker(e.to_string()))?
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;
    use image::RgbaImage;

    const BACKGROUND: Rgba<u8> = Rgba([0x36, 0x39, 0x3E, 0xFF]);

    /// Renderer that serves canned bytes and remembers the URLs it was asked for.
    struct MockRenderer {
        response: Vec<u8>,
        requests: DashMap<usize, String>,
    }

    impl MockRenderer {
        fn new(response: Vec<u8>) -> Self {
            Self {
                response,
                requests: DashMap::new(),
            }
        }
    }

    #[async_trait]
    impl EquationRenderer for MockRenderer {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, LatexError> {
            self.requests.insert(self.requests.len(), url.to_string());
            Ok(self.response.clone())
        }
    }

    fn preview_options() -> RenderOptions {
        RenderOptions::default().with_size(10)
    }

    #[tokio::test]
    async fn test_render_pads_fetched_image() {
        let source = RgbaImage::from_pixel(100, 40, Rgba([255, 255, 255, 255]));
        let renderer = MockRenderer::new(encode_png(&source).unwrap());
        let service = LatexService::new(renderer, preview_options(), BACKGROUND).unwrap();

        let png = service.render("x^2").await.unwrap();
        let out = decode_image(&png).unwrap();

        assert_eq!(out.dimensions(), (115, 60));
        assert_eq!(*out.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*out.get_pixel(57, 30), Rgba([255, 255, 255, 255]));
    }

    #[tokio::test]
    async fn test_render_requests_left_aligned_content() {
        let source = RgbaImage::new(10, 10);
        let renderer = MockRenderer::new(encode_png(&source).unwrap());
        let service = LatexService::new(renderer, preview_options(), BACKGROUND).unwrap();

        service.render("a b").await.unwrap();

        let url = service.renderer.requests.get(&0).unwrap().clone();
        assert!(url.ends_with("\\color{white}&space;\\\\a&space;b"));
    }

    #[tokio::test]
    async fn test_render_reports_undecodable_bytes() {
        let renderer = MockRenderer::new(b"<html>502 Bad Gateway</html>".to_vec());
        let service = LatexService::new(renderer, preview_options(), BACKGROUND).unwrap();

        let err = service.render("x").await.unwrap_err();
        assert!(matches!(err, LatexError::ImageDecode(_)));
    }

    #[test]
    fn test_new_rejects_bad_defaults() {
        let renderer = MockRenderer::new(Vec::new());
        let options = RenderOptions {
            dpi: 0,
            ..Default::default()
        };

        let err = LatexService::new(renderer, options, BACKGROUND).err().unwrap();
        assert!(matches!(err, LatexError::InvalidOption { field: "dpi", .. }));
    }
}
