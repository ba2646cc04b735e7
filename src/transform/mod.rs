//! Transform implementations for collected record sets

mod column_renamer;
mod column_selector;
mod deduplicator;
mod null_filter;

pub use column_renamer::ColumnRenamer;
pub use column_selector::ColumnSelector;
pub use deduplicator::Deduplicator;
pub use null_filter::NullFilter;
