pub mod normalization_error;
pub use normalization_error::*;

pub mod field_transform;
pub use field_transform::*;

pub mod normalization_report;
pub use normalization_report::*;

pub mod post_load_normalizer;
pub use post_load_normalizer::*;
