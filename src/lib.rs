//! An unbalanced binary search tree over `i32` keys that stores repeated
//! insertions of a key as a count on a single node.

pub mod bst;
pub mod error;
pub mod tree;

pub use bst::{Node, NodeId, Tree};
pub use error::TreeError;
pub use tree::TreeOps;

/// A convenience type alias for the result of tree lookups.
pub type Result<T> = std::result::Result<T, TreeError>;
