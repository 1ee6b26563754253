//! # Vize
//!
//! Component preview tooling written in Rust.
//!
//! This crate re-exports all Vize sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`carton`] - Shared hash maps, identifier tables, and string escaping
//! - [`glyph`] - Formatter for generated JavaScript/TypeScript sources
//! - [`esquisse`] - Type-driven value synthesis for preview props
//! - [`musea`] - Host/iframe preview render protocol

/// Shared hash maps, identifier tables, and string escaping.
pub use vize_carton as carton;

/// Formatter for generated JavaScript/TypeScript sources.
pub use vize_glyph as glyph;

/// Type-driven value synthesis for preview props.
pub use vize_esquisse as esquisse;

/// Host/iframe preview render protocol.
pub use vize_musea as musea;
