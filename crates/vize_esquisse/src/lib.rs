//! # vize_esquisse
//!
//! Esquisse - The preliminary sketch for Vize previews.
//! Synthesizes plausible prop values from a resolved type graph and renders
//! them as editable source.
//!
//! ## Name Origin
//!
//! **Esquisse** (/ɛˈskiːs/) is a French term for a rough preparatory sketch -
//! the quick study a painter makes to see a composition before committing to
//! canvas. `vize_esquisse` sketches a first set of props for a component so
//! it can be seen on screen before anyone writes a story for it.
//!
//! ## Pipeline
//!
//! ```text
//! ValueType + CollectedTypes
//!        │
//!        ▼
//!   generate_value ──▶ SerializableValue ──▶ to_source ──▶ vize_glyph
//!        │
//!        ├──▶ generate_default_props   (callback props)
//!        ├──▶ generate_invocation      (`properties = {...};`)
//!        └──▶ generate_type_declarations
//! ```
//!
//! ## Example
//!
//! ```
//! use vize_esquisse::{generate_value, object_type, to_source, CollectedTypes, GenerateOptions, ObjectField, STRING_TYPE};
//!
//! let ty = object_type(vec![ObjectField::required("foo", STRING_TYPE)]);
//! let value = generate_value(&ty, &CollectedTypes::default(), &GenerateOptions::default());
//! assert_eq!(to_source(&value), "{\n  foo: \"foo\"\n}");
//! ```

pub mod compile;
pub mod declarations;
mod error;
pub mod generate;
pub mod props;
pub mod resolve;
pub mod sources;
pub mod types;
pub mod value;

pub use compile::{format_number, to_formatted_source, to_source};
pub use declarations::generate_type_declarations;
pub use error::*;
pub use generate::{generate_value, GenerateOptions, ValueGenerator, UNION_PREFERENCES};
pub use props::{generate_default_props, generate_invocation, DefaultProps};
pub use sources::{
    generate_preview_sources, generate_preview_sources_with, reset_invocation, ComponentAnalysis,
    InvocationEditor, PreviewSources,
};
pub use types::*;
pub use value::*;
