// Implementations
pub mod column_grouper;
pub mod engine;
pub mod error;
pub mod sanitize;
pub mod sink;
pub mod size_pager;
pub mod table;

// Export the main types
pub use column_grouper::chop_by_columns;
pub use engine::{partition, PartitionOptions};
pub use error::ChopperError;
pub use sanitize::clean_filename_part;
pub use sink::{ensure_directory, persist_all};
pub use size_pager::chop_by_size;
pub use table::{Table, Value};
