//! The point table: every plotted point with its image reference and metadata.
//!
//! Built once per session from the embedding table and read-only afterwards,
//! so hover resolution can share it across threads without locking.

mod error;
mod index;
mod point;
pub mod source;

pub use error::TableError;
pub use index::{BuildReport, PointIndexTable};
pub use point::{ClusterLabel, Point, RowRecord};
pub use source::{ColumnBindings, load_rows};
