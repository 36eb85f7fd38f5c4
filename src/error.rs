use std::{error::Error, fmt};

use crate::bst::NodeId;

/// Errors that can occur when inspecting a tree.
pub enum TreeError {
    InvalidNode(NodeId),
}

impl Error for TreeError {}

impl fmt::Debug for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidNode(id) => write!(f, "InvalidNode({})", id),
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidNode(id) => {
                write!(f, "Node does not exist or was removed: {}", id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bst::Tree;
    use crate::tree::TreeOps;

    #[test]
    fn stale_handle_error_names_node() {
        let mut tree = Tree::new(1);
        tree.insert(2);
        let id = tree.find(&2).unwrap();
        tree.remove(&2);

        let err = tree.node(id).unwrap_err();
        assert_eq!(format!("{err:?}"), format!("InvalidNode({id})"));
        assert_eq!(
            err.to_string(),
            format!("Node does not exist or was removed: {id}")
        );
    }
}
