//! Command implementations.

pub mod export;
pub mod organize;

pub use self::export::execute_export_notes;
pub use self::organize::execute_organize;
