//! Carton - The artist's toolbox for Vize.
//!
//! This crate provides the foundational utilities shared by the preview
//! crates, much like a carton (artist's portfolio case) holds all the
//! essential tools and materials an artist needs for their work.
//!
//! # Modules
//!
//! - **ident**: JavaScript identifier and reserved word checks
//! - **escape**: String literal quoting for generated source
//!
//! # Example
//!
//! ```
//! use vize_carton::ident::is_identifier_name;
//! use vize_carton::escape::quote_js_string;
//!
//! assert!(is_identifier_name("onClick"));
//! assert!(!is_identifier_name("aria-label"));
//! assert_eq!(quote_js_string("say \"hi\""), r#""say \"hi\"""#);
//! ```

pub mod escape;
pub mod ident;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};
