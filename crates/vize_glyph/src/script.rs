//! High-performance Script/TypeScript formatting using oxc_codegen.
//!
//! This module provides formatting for JavaScript/TypeScript code
//! using OXC's code generator, followed by a byte-level pass that turns
//! codegen's tab indentation into the configured indent.

use crate::error::FormatError;
use crate::options::FormatOptions;
use memchr::memchr;
use oxc_allocator::Allocator as OxcAllocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;

/// Binding used to lift a bare expression into statement position.
const EXPRESSION_HOLE: &str = "__glyph__";

#[inline]
pub(crate) fn source_type(options: &FormatOptions) -> SourceType {
    SourceType::default()
        .with_module(true)
        .with_jsx(options.jsx)
        .with_typescript(options.typescript)
}

/// Format a JavaScript/TypeScript program using oxc_codegen
#[inline]
pub fn format_script_content(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    // Fast path for empty content
    if source.trim().is_empty() {
        return Ok(String::new());
    }

    let formatted = print_program(source, options)?;
    let mut result = post_process_script_fast(&formatted, options);

    if !options.semi {
        result = remove_optional_semicolons_fast(&result);
    }

    let mut final_result = trim_trailing_whitespace(&result);
    final_result.extend_from_slice(options.newline_bytes());

    String::from_utf8(final_result).map_err(|e| FormatError::ScriptFormatError(e.to_string()))
}

/// Format a single expression.
///
/// The expression is printed as the right-hand side of an assignment so
/// that object literals keep their expression meaning, then the assignment
/// scaffolding is stripped again.
pub fn format_expression_content(
    source: &str,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    if source.trim().is_empty() {
        return Err(FormatError::ExpressionParseError(
            "empty expression".to_string(),
        ));
    }
    if !is_valid_expression_content(source, options) {
        return Err(FormatError::ExpressionParseError(source.to_string()));
    }

    let wrapped = format!("{EXPRESSION_HOLE} = (\n{source}\n);");
    let printed = print_program(&wrapped, options)?;

    let prefix = format!("{EXPRESSION_HOLE} = ");
    let body = printed
        .trim_end()
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_suffix(';'))
        .ok_or_else(|| FormatError::ScriptFormatError(printed.clone()))?;

    let result = post_process_script_fast(body, options);
    let result = trim_trailing_whitespace(&result);

    String::from_utf8(result).map_err(|e| FormatError::ScriptFormatError(e.to_string()))
}

/// Check whether `source` parses as a single expression.
pub fn is_valid_expression_content(source: &str, options: &FormatOptions) -> bool {
    let oxc_allocator = OxcAllocator::default();
    Parser::new(&oxc_allocator, source, source_type(options))
        .parse_expression()
        .is_ok()
}

/// Check whether `source` parses as a program without errors.
pub fn is_valid_script_content(source: &str, options: &FormatOptions) -> bool {
    let oxc_allocator = OxcAllocator::default();
    let parsed = Parser::new(&oxc_allocator, source, source_type(options)).parse();
    parsed.errors.is_empty() && !parsed.panicked
}

fn print_program(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    // Use OXC's allocator for parsing (required by oxc_parser)
    let oxc_allocator = OxcAllocator::default();

    // Redundant parentheses are dropped so codegen decides where they belong
    let parser = Parser::new(&oxc_allocator, source, source_type(options)).with_options(
        ParseOptions {
            preserve_parens: false,
            ..ParseOptions::default()
        },
    );
    let parsed = parser.parse();

    if !parsed.errors.is_empty() || parsed.panicked {
        let error_messages: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
        return Err(FormatError::ScriptParseError(error_messages.join("; ")));
    }

    let codegen = Codegen::new().with_options(convert_to_codegen_options(options));
    Ok(codegen.build(&parsed.program).code)
}

/// Convert our options to oxc_codegen options
#[inline]
fn convert_to_codegen_options(options: &FormatOptions) -> CodegenOptions {
    CodegenOptions {
        single_quote: options.single_quote,
        minify: false,
        ..Default::default()
    }
}

/// Re-indent codegen output using byte operations.
///
/// OXC indents with one tab per level. Lines that start inside a template
/// literal are copied verbatim since their whitespace is significant.
#[inline]
fn post_process_script_fast(source: &str, options: &FormatOptions) -> Vec<u8> {
    let bytes = source.as_bytes();
    let len = bytes.len();

    // Pre-allocate with estimated size
    let mut result = Vec::with_capacity(len + len / 4);

    let newline = options.newline_bytes();
    let indent = options.indent_bytes();
    let mut in_template = false;
    let mut pos = 0;

    while pos < len {
        // Find end of line using memchr (SIMD-accelerated)
        let line_end = memchr(b'\n', &bytes[pos..]).map_or(len, |offset| pos + offset);
        let content_end = if line_end > pos && bytes[line_end - 1] == b'\r' {
            line_end - 1
        } else {
            line_end
        };
        let line = &bytes[pos..content_end];

        if in_template {
            result.extend_from_slice(line);
        } else {
            let mut tabs = 0;
            let mut spaces = 0;
            for &b in line {
                match b {
                    b'\t' => tabs += 1,
                    b' ' => spaces += 1,
                    _ => break,
                }
            }
            let level = tabs + spaces / 2;
            for _ in 0..level {
                result.extend_from_slice(indent);
            }
            result.extend_from_slice(&line[tabs + spaces..]);
        }

        in_template = ends_inside_template(line, in_template);

        if line_end < len {
            result.extend_from_slice(newline);
        }

        // Move to next line
        pos = if line_end < len { line_end + 1 } else { len };
    }

    result
}

/// Track whether a line leaves an unterminated template literal open.
fn ends_inside_template(line: &[u8], mut in_template: bool) -> bool {
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < line.len() {
        let b = line[i];
        if b == b'\\' {
            i += 2;
            continue;
        }
        match (in_template, quote) {
            (true, _) => {
                if b == b'`' {
                    in_template = false;
                }
            }
            (false, Some(q)) => {
                if b == q {
                    quote = None;
                }
            }
            (false, None) => match b {
                b'`' => in_template = true,
                b'"' | b'\'' => quote = Some(b),
                _ => {}
            },
        }
        i += 1;
    }
    in_template
}

/// Remove optional semicolons using byte operations
#[inline]
fn remove_optional_semicolons_fast(source: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(source.len());
    let mut i = 0;
    let len = source.len();

    while i < len {
        let b = source[i];

        // Skip string literals
        if b == b'"' || b == b'\'' || b == b'`' {
            let quote = b;
            result.push(b);
            i += 1;

            while i < len {
                let c = source[i];
                result.push(c);
                i += 1;

                if c == quote && (i < 2 || source[i - 2] != b'\\') {
                    break;
                }
            }
            continue;
        }

        // Check for semicolon at end of line
        if b == b';' {
            let next_idx = i + 1;
            if next_idx >= len
                || source[next_idx] == b'\n'
                || (next_idx + 1 < len && source[next_idx] == b'\r' && source[next_idx + 1] == b'\n')
            {
                // Skip semicolon at end of line
                i += 1;
                continue;
            }
        }

        result.push(b);
        i += 1;
    }

    result
}

/// Trim trailing whitespace from each line and from the end of the output
#[inline]
fn trim_trailing_whitespace(source: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(source.len());
    let mut line_start = 0;

    for (i, &b) in source.iter().enumerate() {
        if b == b'\n' {
            // Find last non-whitespace character in line
            let mut line_end = i;
            while line_end > line_start {
                let c = source[line_end - 1];
                if c != b' ' && c != b'\t' && c != b'\r' {
                    break;
                }
                line_end -= 1;
            }

            result.extend_from_slice(&source[line_start..line_end]);
            if i > 0 && source[i - 1] == b'\r' {
                result.push(b'\r');
            }
            result.push(b'\n');
            line_start = i + 1;
        }
    }

    // Handle last line without newline
    if line_start < source.len() {
        let mut line_end = source.len();
        while line_end > line_start {
            let c = source[line_end - 1];
            if c != b' ' && c != b'\t' && c != b'\r' && c != b'\n' {
                break;
            }
            line_end -= 1;
        }
        result.extend_from_slice(&source[line_start..line_end]);
    }

    // Drop trailing blank lines
    while matches!(result.last(), Some(b'\n' | b'\r')) {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple_script() {
        let source = "const x=1";
        let options = FormatOptions::default();
        let result = format_script_content(source, &options).unwrap();

        assert!(result.contains("const x = 1"));
        assert!(result.ends_with('\n'));
    }

    #[test]
    fn test_format_assignment_statement() {
        let source = "properties = {label:\"label\",count:0};";
        let options = FormatOptions::default();
        let result = format_script_content(source, &options).unwrap();

        assert!(result.starts_with("properties = {"));
        assert!(result.contains("label: \"label\""));
        assert!(result.contains("count: 0"));
        assert!(!result.contains('\t'));
    }

    #[test]
    fn test_format_empty_source() {
        let options = FormatOptions::default();
        assert!(format_script_content("", &options).unwrap().is_empty());
        assert!(format_script_content("   \n\t  ", &options)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_format_invalid_script() {
        let options = FormatOptions::default();
        let result = format_script_content("properties = {", &options);
        assert!(matches!(result, Err(FormatError::ScriptParseError(_))));
    }

    #[test]
    fn test_format_expression_object() {
        let options = FormatOptions::default();
        let result = format_expression_content("{a:1,b:[1,2]}", &options).unwrap();

        assert!(result.starts_with('{'));
        assert!(result.ends_with('}'));
        assert!(result.contains("a: 1"));
        assert!(!result.contains(EXPRESSION_HOLE));
    }

    #[test]
    fn test_format_expression_rejects_statements() {
        let options = FormatOptions::default();
        assert!(format_expression_content("let x = 1", &options).is_err());
        assert!(format_expression_content("", &options).is_err());
    }

    #[test]
    fn test_expression_validity() {
        let options = FormatOptions::default();
        assert!(is_valid_expression_content("{ foo: \"foo\" }", &options));
        assert!(is_valid_expression_content("<Button disabled />", &options));
        assert!(!is_valid_expression_content("{ foo: }", &options));
    }

    #[test]
    fn test_reindent_tabs() {
        let options = FormatOptions::default();
        let result = post_process_script_fast("{\n\ta: {\n\t\tb: 1\n\t}\n}", &options);
        assert_eq!(
            String::from_utf8(result).unwrap(),
            "{\n  a: {\n    b: 1\n  }\n}"
        );
    }

    #[test]
    fn test_template_literal_lines_untouched() {
        let options = FormatOptions::default();
        let result = post_process_script_fast("x = `a\n\t\tb`;\n\ty;", &options);
        assert_eq!(String::from_utf8(result).unwrap(), "x = `a\n\t\tb`;\n  y;");
    }

    #[test]
    fn test_remove_semicolons() {
        let result = remove_optional_semicolons_fast(b"a = \"x;\";\nb = 2;");
        assert_eq!(String::from_utf8(result).unwrap(), "a = \"x;\"\nb = 2");
    }
}
