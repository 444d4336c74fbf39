// Builds CodeCogs request URLs from validated render options.

use super::latex_models::{
    directive, legal_keys, LatexError, RenderOptions, BACKGROUNDS, ENGINES, FONTS, SIZES,
};

/// Equation API endpoint. The engine and render path are appended to it.
pub const END_POINT: &str = "https://latex.codecogs.com/";

/// The API rejects raw whitespace in the query, so it is spelled out.
const SPACE_PLACEHOLDER: &str = "&space;";

/// Build the URL of the rendered preview for `content`.
///
/// Every option is checked against its table before anything is built, so a
/// bad option never reaches the network.
pub fn build_url(content: &str, options: &RenderOptions) -> Result<String, LatexError> {
    if !ENGINES.contains(&options.engine.as_str()) {
        return Err(LatexError::invalid(
            "engine",
            &options.engine,
            ENGINES.join(", "),
        ));
    }
    let size = directive(SIZES, options.size)
        .ok_or_else(|| LatexError::invalid("size", options.size, legal_keys(SIZES)))?;
    let font = directive(FONTS, options.font.as_str())
        .ok_or_else(|| LatexError::invalid("font", &options.font, legal_keys(FONTS)))?;
    let background = directive(BACKGROUNDS, options.background.as_str()).ok_or_else(|| {
        LatexError::invalid("background", &options.background, legal_keys(BACKGROUNDS))
    })?;
    if options.dpi <= 0 {
        return Err(LatexError::invalid(
            "dpi",
            options.dpi,
            "any positive integer".to_string(),
        ));
    }

    let mut raw = String::new();
    raw.push_str(&sanitise(&format!("\\dpi{{{}}}", options.dpi)));
    raw.push_str(&sanitise(background));
    raw.push_str(&sanitise(font));
    raw.push_str(&sanitise(size));
    raw.push_str(&sanitise(&format!(
        "\\color{{{}}} {}",
        options.foreground, content
    )));

    Ok(format!("{}{}.latex?{}", END_POINT, options.engine, raw))
}

/// Escape characters that would end or corrupt the query string, then spell
/// out whitespace.
fn sanitise(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            ' ' | '\n' => out.push_str(SPACE_PLACEHOLDER),
            '\r' => {}
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '+' => out.push_str("%2B"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: LatexError) -> &'static str {
        match err {
            LatexError::InvalidOption { field, .. } => field,
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn test_default_options_url() {
        let url = build_url("x^2", &RenderOptions::default()).unwrap();
        assert_eq!(
            url,
            "https://latex.codecogs.com/png.latex?\\dpi{200}\\large&space;\\color{white}&space;x^2"
        );
    }

    #[test]
    fn test_all_noop_directives_give_minimal_url() {
        let options = RenderOptions::default().with_size(10);
        let url = build_url("a", &options).unwrap();
        assert_eq!(
            url,
            "https://latex.codecogs.com/png.latex?\\dpi{200}\\color{white}&space;a"
        );
    }

    #[test]
    fn test_directives_are_in_fixed_order() {
        let options = RenderOptions {
            engine: "svg".to_string(),
            size: 5,
            font: "Helvetica".to_string(),
            background: "black".to_string(),
            foreground: "red".to_string(),
            dpi: 300,
        };
        let url = build_url("y", &options).unwrap();
        assert_eq!(
            url,
            "https://latex.codecogs.com/svg.latex?\\dpi{300}\\bg_black&space;\\fn_phv&space;\\tiny&space;\\color{red}&space;y"
        );
    }

    #[test]
    fn test_url_never_contains_raw_whitespace() {
        for engine in ENGINES {
            let options = RenderOptions {
                engine: engine.to_string(),
                ..Default::default()
            };
            let url = build_url("\\frac{a}{b} \n + c\r\n d", &options).unwrap();
            assert!(url.starts_with(&format!("{}{}", END_POINT, engine)));
            assert!(!url.contains(' '));
            assert!(!url.contains('\n'));
            assert!(!url.contains('\r'));
        }
    }

    #[test]
    fn test_query_breaking_characters_are_escaped() {
        let url = build_url("50\\% #1 a+b", &RenderOptions::default()).unwrap();
        assert!(url.ends_with("50\\%25&space;%231&space;a%2Bb"));
    }

    #[test]
    fn test_rejects_unknown_engine() {
        let options = RenderOptions {
            engine: "bmp".to_string(),
            ..Default::default()
        };
        let err = build_url("x", &options).unwrap_err();
        assert!(err.to_string().contains("png, gif, pdf, swf, emf, svg"));
        assert_eq!(field_of(err), "engine");
    }

    #[test]
    fn test_rejects_unknown_size() {
        let err = build_url("x", &RenderOptions::default().with_size(7)).unwrap_err();
        assert_eq!(field_of(err), "size");
    }

    #[test]
    fn test_rejects_unknown_font_and_background() {
        let options = RenderOptions {
            font: "Papyrus".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(build_url("x", &options).unwrap_err()), "font");

        let options = RenderOptions {
            background: "purple".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(build_url("x", &options).unwrap_err()), "background");
    }

    #[test]
    fn test_rejects_non_positive_dpi() {
        for dpi in [0, -5] {
            let options = RenderOptions {
                dpi,
                ..Default::default()
            };
            assert_eq!(field_of(build_url("x", &options).unwrap_err()), "dpi");
        }
    }
}
