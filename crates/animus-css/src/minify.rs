//! Optional stylesheet minification through lightningcss.

use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};

use crate::diagnostics::StyleDiagnostic;

const FILENAME: &str = "animus.css";

/// Minify generated CSS.
///
/// On any parse, minify or print failure the input is returned unchanged
/// together with a [`StyleDiagnostic::MinifyFailed`].
pub fn minify_css(css: &str) -> (String, Option<StyleDiagnostic>) {
    match try_minify(css) {
        Ok(code) => (code, None),
        Err(message) => {
            tracing::warn!(%message, "minification failed");
            (css.to_string(), Some(StyleDiagnostic::MinifyFailed { message }))
        }
    }
}

fn try_minify(css: &str) -> Result<String, String> {
    let mut stylesheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: FILENAME.to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| format!("failed to parse generated CSS: {e:?}"))?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| format!("failed to minify generated CSS: {e:?}"))?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| format!("failed to print generated CSS: {e:?}"))?;

    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minifies_valid_css() {
        let (css, diagnostic) = minify_css(".a {\n  color: red;\n  padding: 0px;\n}\n");
        assert!(diagnostic.is_none());
        assert!(!css.contains('\n'));
        assert!(css.starts_with(".a{"));
    }

    #[test]
    fn empty_input_stays_empty() {
        let (css, diagnostic) = minify_css("");
        assert_eq!(css, "");
        assert!(diagnostic.is_none());
    }
}
