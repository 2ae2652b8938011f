pub mod table_config;
pub use table_config::*;

pub mod resource_error;
pub use resource_error::*;

pub mod resource_object;
pub use resource_object::*;

pub mod read_only_table;
pub use read_only_table::*;
