//! Format options for vize_glyph.
//!
//! These options are designed to be compatible with Prettier and oxfmt.

use serde::{Deserialize, Serialize};

/// Formatting options for generated sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// Number of spaces per indentation level (default: 2)
    #[serde(default = "default_tab_width")]
    pub tab_width: u8,

    /// Use tabs instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Print semicolons at the ends of statements (default: true)
    #[serde(default = "default_true")]
    pub semi: bool,

    /// Use single quotes instead of double quotes (default: false)
    #[serde(default)]
    pub single_quote: bool,

    /// Accept JSX syntax in the input (default: true)
    #[serde(default = "default_true")]
    pub jsx: bool,

    /// Accept TypeScript syntax in the input (default: false)
    #[serde(default)]
    pub typescript: bool,

    /// End of line style (default: Lf)
    #[serde(default)]
    pub end_of_line: EndOfLine,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            use_tabs: false,
            semi: true,
            single_quote: false,
            jsx: true,
            typescript: false,
            end_of_line: EndOfLine::default(),
        }
    }
}

fn default_tab_width() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

/// End of line options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    /// Line Feed only (\n)
    #[default]
    Lf,
    /// Carriage Return + Line Feed (\r\n)
    Crlf,
}

impl FormatOptions {
    /// Options for TypeScript declaration sources.
    #[inline]
    pub fn typescript() -> Self {
        Self {
            jsx: false,
            typescript: true,
            ..Default::default()
        }
    }

    /// Get the indent as bytes (more efficient for byte operations)
    #[inline]
    pub fn indent_bytes(&self) -> &'static [u8] {
        if self.use_tabs {
            b"\t"
        } else {
            match self.tab_width {
                1 => b" ",
                2 => b"  ",
                4 => b"    ",
                8 => b"        ",
                _ => b"  ", // Default to 2 spaces
            }
        }
    }

    /// Get the newline as bytes (more efficient for byte operations)
    #[inline]
    pub fn newline_bytes(&self) -> &'static [u8] {
        match self.end_of_line {
            EndOfLine::Lf => b"\n",
            EndOfLine::Crlf => b"\r\n",
        }
    }
}
