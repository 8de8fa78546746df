pub mod fixtures;

// Re-export key testing utilities
pub use fixtures::{packument, packument_with_deps};
