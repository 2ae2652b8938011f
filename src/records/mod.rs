pub mod field_value;
pub use field_value::*;

pub mod record;
pub use record::*;

pub mod identity_error;
pub use identity_error::*;

pub mod identity_resolver;
pub use identity_resolver::*;
