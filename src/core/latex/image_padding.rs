// Image padding/compositing for rendered LaTeX.
//
// Rendered equations come back cropped tight to the glyphs with a transparent
// background, which is hard to read on a dark client. We give the image a
// proportional border and flatten it onto an opaque colour.
//
// Everything here is CPU-bound and synchronous. Callers on the async runtime
// must run it on a blocking worker.

use super::latex_models::LatexError;
use image::codecs::png::PngEncoder;
use image::{imageops, ImageEncoder, Rgba, RgbaImage};

const PADDING_PCT_WIDTH: f64 = 1.15;
const PADDING_PCT_HEIGHT: f64 = 1.5;
const PADDING_MIN_WIDTH: u32 = 100;

/// Size of the padded canvas and where the source lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingGeometry {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl PaddingGeometry {
    /// Geometry for a source image of `width` x `height` pixels.
    pub fn for_source(width: u32, height: u32) -> Self {
        let new_width = ((width as f64 * PADDING_PCT_WIDTH).round() as u32).max(PADDING_MIN_WIDTH);
        let new_height = (height as f64 * PADDING_PCT_HEIGHT).round() as u32;

        Self {
            width: new_width,
            height: new_height,
            offset_x: ((new_width - width) as f64 / 2.0).round() as u32,
            offset_y: ((new_height - height) as f64 / 2.0).round() as u32,
        }
    }
}

/// Pad `source` and composite it over an opaque `background`.
///
/// The result is always fully opaque as long as `background` is.
pub fn pad_and_composite(source: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let geometry = PaddingGeometry::for_source(source.width(), source.height());

    // Paste is a straight overwrite: the source's own alpha is kept as-is.
    let mut padded = RgbaImage::from_pixel(geometry.width, geometry.height, Rgba([0, 0, 0, 0]));
    imageops::replace(
        &mut padded,
        source,
        geometry.offset_x as i64,
        geometry.offset_y as i64,
    );

    let mut out = RgbaImage::from_pixel(geometry.width, geometry.height, background);
    for (dst, src) in out.pixels_mut().zip(padded.pixels()) {
        *dst = composite_over(*src, *dst);
    }
    out
}

/// Porter-Duff "over": `src` drawn on top of `dst`.
pub fn composite_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let src_a = src[3] as f64 / 255.0;
    let dst_a = dst[3] as f64 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let s = src[i] as f64 / 255.0;
        let d = dst[i] as f64 / 255.0;
        // Straight (non-premultiplied) colour, so divide back out by the result alpha.
        let c = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        out[i] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Decode fetched bytes into an RGBA buffer.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, LatexError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| LatexError::ImageDecode(e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, LatexError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ColorType::Rgba8.into(),
        )
        .map_err(|e| LatexError::Encode(e.to_string()))?;
    Ok(bytes)
}
