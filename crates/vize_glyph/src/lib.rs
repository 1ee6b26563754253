//! # vize_glyph
//!
//! Glyph - The beautiful letterforms for Vize.
//! Formatter for the JavaScript and TypeScript sources that the preview
//! tooling generates and that users edit.
//!
//! ## Name Origin
//!
//! **Glyph** (/ɡlɪf/) refers to the visual representation of a character -
//! the elegant form that gives meaning to written symbols. In typography and
//! calligraphy, glyphs are carefully crafted to be both beautiful and legible.
//! `vize_glyph` shapes generated code into its most readable and consistent form.
//!
//! ## Example
//!
//! ```ignore
//! use vize_glyph::{format_script, FormatOptions};
//!
//! let options = FormatOptions::default();
//! let code = format_script("properties={label:\"label\"};", &options).unwrap();
//! assert!(code.contains("label: \"label\""));
//! ```

mod error;
mod options;
mod script;

pub use error::*;
pub use options::*;

/// Format a JavaScript/TypeScript program (for example an invocation
/// statement such as `properties = {...};`).
#[inline]
pub fn format_script(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    script::format_script_content(source, options)
}

/// Format a single expression (for example an object literal).
#[inline]
pub fn format_expression(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    script::format_expression_content(source, options)
}

/// Format a program, returning `source` unchanged when it cannot be parsed.
///
/// Sources that are being edited are frequently invalid for a moment; those
/// are passed through rather than reported.
pub fn format_script_or_original(source: &str, options: &FormatOptions) -> String {
    match format_script(source, options) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::debug!("keeping unformatted script: {}", err);
            source.to_string()
        }
    }
}

/// Format an expression, returning `source` unchanged when it cannot be parsed.
pub fn format_expression_or_original(source: &str, options: &FormatOptions) -> String {
    match format_expression(source, options) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::debug!("keeping unformatted expression: {}", err);
            source.to_string()
        }
    }
}

/// Check whether `source` is a syntactically valid expression.
#[inline]
pub fn is_valid_expression(source: &str, options: &FormatOptions) -> bool {
    script::is_valid_expression_content(source, options)
}

/// Check whether `source` is a syntactically valid program.
#[inline]
pub fn is_valid_script(source: &str, options: &FormatOptions) -> bool {
    script::is_valid_script_content(source, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_script_only() {
        let source = "const x=1;const y={a:1,b:2}";
        let options = FormatOptions::default();
        let result = format_script(source, &options).unwrap();

        // Check that the code is formatted (variables are separated)
        assert!(result.contains("const x"));
        assert!(result.contains("const y"));
        assert!(result.contains("a:"));
        assert!(result.contains("b:"));
    }

    #[test]
    fn test_fallback_keeps_invalid_source() {
        let options = FormatOptions::default();
        let source = "properties = { label: ";
        assert_eq!(format_script_or_original(source, &options), source);
        assert_eq!(format_expression_or_original("{ a: ", &options), "{ a: ");
    }

    #[test]
    fn test_formatted_output_still_parses() {
        let options = FormatOptions::default();
        let source = "properties = {onClick: () => { console.log(\"onClick invoked\"); }, items: [1, 2]};";
        let formatted = format_script(source, &options).unwrap();
        assert!(is_valid_script(&formatted, &options));
    }

    #[test]
    fn test_typescript_declarations() {
        let options = FormatOptions::typescript();
        let source = "declare let properties: Props;\ntype Props = { label?: string; };";
        assert!(is_valid_script(source, &options));
        let formatted = format_script(source, &options).unwrap();
        assert!(formatted.contains("declare let properties: Props"));
    }

    #[test]
    fn test_no_semi() {
        let options = FormatOptions {
            semi: false,
            ..Default::default()
        };
        let result = format_script("properties = {};", &options).unwrap();
        assert_eq!(result.trim_end(), "properties = {}");
    }
}
