//! File table
//!
//! File entries, their operations and the trash lifecycle.

pub mod entry;
pub mod results;
pub mod table;
pub mod trash;

pub use entry::FileEntry;
pub use results::{FileSummary, Metadata, OpenResult};
pub use table::FileTable;
pub use trash::TrashState;
