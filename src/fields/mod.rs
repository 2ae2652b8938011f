pub mod semantic_type;
pub use semantic_type::*;

pub mod field_definition;
pub use field_definition::*;

pub mod record_materializer;
pub use record_materializer::*;
