use crate::tree::TreeOps;
use crate::{Result, TreeError};
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;

/// Stable handle to a node slot in a [`Tree`].
///
/// A handle stays valid until its node is removed. Slots of removed nodes are
/// reused by later inserts, so a stale handle may end up pointing at a
/// different key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Link = Option<NodeId>;

#[derive(Debug, Clone)]
pub struct Node {
    value: i32,
    count: usize,
    parent: Link,
    left: Link,
    right: Link,
}

impl Node {
    /// A fresh node holding `value` once, hanging off `parent` with no children.
    pub fn new(value: i32, parent: Option<NodeId>) -> Self {
        Node {
            value,
            count: 1,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// How many times `value` is held. Never zero for a node in a tree.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// Unbalanced binary search tree over `i32` keys with multiset semantics.
///
/// Inserting a key that is already present bumps the count on its node instead
/// of adding a second node. Nodes live in an arena and link to their parent and
/// children by [`NodeId`]. Every operation walks a single root-to-leaf path, so
/// its cost is the height of the tree, which degrades to `len` for sorted input.
///
/// The tree owns its root handle. Removing the last occurrence of the last key
/// frees the root and leaves the tree empty; the next insert creates a new root.
pub struct Tree {
    root: Link,
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    len: usize,
    node_count: usize,
}

impl TreeOps<i32> for Tree {
    fn insert(&mut self, value: i32) -> bool {
        self.len += 1;
        let Some(ptr) = self.find_closest(&value) else {
            let id = self.alloc(Node::new(value, None));
            self.root = Some(id);
            debug!("created root {id} for {value}");
            return true;
        };

        let ord = value.cmp(&self.get(ptr).value);
        if ord == Ordering::Equal {
            let node = self.get_mut(ptr);
            node.count += 1;
            trace!("bumped {value} at {ptr} to count {}", node.count);
            return false;
        }

        let new = self.alloc(Node::new(value, Some(ptr)));
        let node = self.get_mut(ptr);
        if ord == Ordering::Less {
            node.left = Some(new);
        } else {
            node.right = Some(new);
        }
        trace!("inserted {value} at {new} under {ptr}");
        true
    }

    fn remove(&mut self, value: &i32) -> bool {
        let Some(ptr) = self.find(value) else {
            trace!("{value} not present, nothing to remove");
            return false;
        };

        self.len -= 1;
        let node = self.get_mut(ptr);
        if node.count > 1 {
            node.count -= 1;
            trace!("dropped {value} at {ptr} to count {}", node.count);
            return true;
        }

        self.remove_node(ptr);
        true
    }

    fn contains(&self, value: &i32) -> bool {
        self.find(value).is_some()
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Tree {
    /// A tree whose root holds `value` once.
    pub fn new(value: i32) -> Self {
        let mut tree = Tree::empty();
        tree.insert(value);
        tree
    }

    pub fn empty() -> Self {
        Tree {
            root: None,
            nodes: Vec::new(),
            free: Vec::new(),
            len: 0,
            node_count: 0,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Looks up a live node by handle.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(TreeError::InvalidNode(id))
    }

    pub fn find(&self, value: &i32) -> Option<NodeId> {
        self.find_closest(value)
            .filter(|&ptr| self.get(ptr).value == *value)
    }

    /// Multiplicity of `value`, zero when absent.
    pub fn count(&self, value: &i32) -> usize {
        self.find(value).map_or(0, |ptr| self.get(ptr).count)
    }

    /// Number of distinct keys.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Edges on the longest path from the root down to a leaf.
    pub fn height(&self) -> Option<usize> {
        let root = self.root?;
        let mut height = 0usize;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.get(id);
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        Some(height)
    }

    /// Smallest key in the tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree is empty. Use [`Tree::try_min`] when it may be.
    pub fn min(&self) -> i32 {
        self.try_min().expect("min called on an empty tree")
    }

    /// Largest key in the tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree is empty. Use [`Tree::try_max`] when it may be.
    pub fn max(&self) -> i32 {
        self.try_max().expect("max called on an empty tree")
    }

    pub fn try_min(&self) -> Option<i32> {
        self.root.map(|id| self.get(self.leftmost(id)).value)
    }

    pub fn try_max(&self) -> Option<i32> {
        self.root.map(|id| self.get(self.rightmost(id)).value)
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
        self.node_count = 0;
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.node_count += 1;
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            NodeId(self.nodes.len() - 1)
        }
    }

    fn release(&mut self, id: NodeId) -> Node {
        let node = self.nodes[id.0]
            .take()
            .expect("released slot should hold a live node");
        self.free.push(id);
        self.node_count -= 1;
        node
    }

    fn get(&self, id: NodeId) -> &Node {
        self.nodes[id.0]
            .as_ref()
            .expect("link should point at a live node")
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.0]
            .as_mut()
            .expect("link should point at a live node")
    }

    /// The node holding `value`, or the node whose empty child slot it would go in.
    fn find_closest(&self, value: &i32) -> Link {
        let mut prev = None;
        let mut cur = self.root;
        while let Some(ptr) = cur {
            prev = cur;
            let node = self.get(ptr);
            match value.cmp(&node.value) {
                Ordering::Less => cur = node.left,
                Ordering::Greater => cur = node.right,
                Ordering::Equal => return cur,
            }
        }
        prev
    }

    /// Unlinks the node at `id` regardless of its count.
    ///
    /// With two children the node stays where it is and takes over the value
    /// and count of its in-order successor, whose own slot is freed instead.
    /// Handles to the successor are invalidated by this.
    fn remove_node(&mut self, id: NodeId) {
        let node = self.get(id);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let (value, count) = {
                    let succ = self.get(successor);
                    (succ.value, succ.count)
                };
                debug!("moving successor {value} from {successor} into {id}");

                let node = self.get_mut(id);
                node.value = value;
                node.count = count;
                // leftmost, so at most a right child
                self.remove_node(successor);
            }
            (left, right) => {
                let child = left.or(right);
                self.replace_node(id, child);
                let node = self.release(id);
                match child {
                    Some(child) => debug!("spliced {child} into the place of {}", node.value),
                    None => debug!("removed leaf {}", node.value),
                }
            }
        }
    }

    /// Points the parent of `id` (or the root) at `new_link` and fixes the back link.
    fn replace_node(&mut self, id: NodeId, new_link: Link) {
        let parent = self.get(id).parent;
        match parent {
            Some(parent_id) => {
                let parent_node = self.get_mut(parent_id);
                if parent_node.left == Some(id) {
                    parent_node.left = new_link;
                } else {
                    parent_node.right = new_link;
                }
            }
            None => {
                self.root = new_link;
                if new_link.is_none() {
                    debug!("tree is empty");
                }
            }
        }

        if let Some(new_id) = new_link {
            self.get_mut(new_id).parent = parent;
        }
    }

    fn leftmost(&self, mut cur: NodeId) -> NodeId {
        while let Some(left) = self.get(cur).left {
            cur = left;
        }
        cur
    }

    fn rightmost(&self, mut cur: NodeId) -> NodeId {
        while let Some(right) = self.get(cur).right {
            cur = right;
        }
        cur
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::empty()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Tree")
            .field("len", &self.len)
            .field("node_count", &self.node_count)
            .field("root", &self.root.map(|id| DebugNode { tree: self, id }))
            .finish()
    }
}

struct DebugNode<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl fmt::Debug for DebugNode<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.tree.get(self.id);
        let child = |link: Link| link.map(|id| DebugNode { tree: self.tree, id });
        fmt.debug_struct("Node")
            .field("value", &node.value)
            .field("count", &node.count)
            .field("parent", &node.parent.map(|id| self.tree.get(id).value))
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}
