pub mod preview;
pub mod schema;
