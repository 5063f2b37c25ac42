use generational_arena::{Arena, Index};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::instrument;

/// Whether an argument supports or opposes its parent argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Pro,
    Con,
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Pro => write!(f, "Pro"),
            Stance::Con => write!(f, "Con"),
        }
    }
}

/// Data payload for tree nodes representing one argument of a debate.
///
/// The synthetic root carries no stance and no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Dot-delimited position path, e.g. `"1.3.2."`
    pub path: String,
    /// Structural depth, always path-segment-count - 1 (`"1."` is 0)
    pub level: usize,
    /// `Pro` or `Con` relative to the parent argument, `None` for the root
    pub stance: Option<Stance>,
    /// Cleaned argument text, `None` for the root
    pub text: Option<String>,
    /// Subject-derived identifier, unique within the transcript
    pub node_id: String,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stance {
            Some(stance) => write!(f, "{} {}", self.path, stance),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Tree node in the arena-based debate hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    /// Argument data for this node
    pub data: Argument,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in transcript appearance order
    pub children: Vec<Index>,
}

/// Arena-based tree for one debate, addressable by position path.
///
/// Uses a generational arena for memory-safe node references plus a
/// path index for O(1) lookup by position path. Parent/child links are
/// arena indices, so the structure stays acyclic in the ownership sense
/// even though every node can reach its parent.
#[derive(Debug)]
pub struct DebateTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Position path -> arena index
    by_path: HashMap<String, Index>,
    /// Index of the synthetic root, None only while under construction
    root: Option<Index>,
    /// Debate title, shared by every node of the tree
    subject: String,
}

impl DebateTree {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            arena: Arena::new(),
            by_path: HashMap::new(),
            root: None,
            subject: subject.into(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: Argument, parent: Option<Index>) -> Index {
        let path = data.path.clone();
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);
        self.by_path.insert(path, node_idx);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, path: &str) -> Option<Index> {
        self.by_path.get(path).copied()
    }

    pub fn node_by_path(&self, path: &str) -> Option<&TreeNode> {
        self.index_of(path).and_then(|idx| self.get_node(idx))
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Position paths of every node except the root, in pre-order.
    pub fn non_root_paths(&self) -> Vec<String> {
        self.iter()
            .filter(|(idx, _)| Some(*idx) != self.root)
            .map(|(_, node)| node.data.path.clone())
            .collect()
    }

    /// Ancestor paths of `path`, nearest first, exclusive of the node itself.
    ///
    /// Walks parent links rather than re-deriving ancestry from the path
    /// string, so the result reflects actual tree structure.
    pub fn ancestor_paths(&self, path: &str) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut current = self
            .index_of(path)
            .and_then(|idx| self.get_node(idx))
            .and_then(|node| node.parent);
        while let Some(idx) = current {
            let Some(node) = self.get_node(idx) else { break };
            ancestors.push(node.data.path.clone());
            current = node.parent;
        }
        ancestors
    }

    /// Size of the ancestor set shared by both nodes (nodes themselves
    /// excluded). A count of 1 means only the root is shared, i.e. the
    /// nodes sit in different top-level branches.
    pub fn common_ancestor_count(&self, path1: &str, path2: &str) -> usize {
        let a1: HashSet<String> = self.ancestor_paths(path1).into_iter().collect();
        let a2: HashSet<String> = self.ancestor_paths(path2).into_iter().collect();
        a1.intersection(&a2).count()
    }

    /// Post-order path lists, one per top-level branch of the root.
    #[instrument(level = "debug", skip(self))]
    pub fn branches(&self) -> Vec<Vec<String>> {
        let mut branches = Vec::new();
        if let Some(root_idx) = self.root {
            if let Some(root) = self.get_node(root_idx) {
                for &child in &root.children {
                    branches.push(self.subtree_paths_postorder(child));
                }
            }
        }
        branches
    }

    fn subtree_paths_postorder(&self, start: Index) -> Vec<String> {
        let mut paths = Vec::new();
        let mut stack = vec![(start, false)];
        while let Some((current_idx, visited)) = stack.pop() {
            if let Some(node) = self.get_node(current_idx) {
                if !visited {
                    stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        stack.push((child, false));
                    }
                } else {
                    paths.push(node.data.path.clone());
                }
            }
        }
        paths
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Renders the tree for display, one label per node.
    pub fn render(&self) -> termtree::Tree<String> {
        match self.root {
            Some(root) => self.render_subtree(root),
            None => termtree::Tree::new(self.subject.clone()),
        }
    }

    fn render_subtree(&self, node_idx: Index) -> termtree::Tree<String> {
        let Some(node) = self.get_node(node_idx) else {
            return termtree::Tree::new(String::new());
        };
        let mut tree = termtree::Tree::new(node.data.to_string());
        for &child in &node.children {
            tree.push(self.render_subtree(child));
        }
        tree
    }
}

/// Pre-order traversal with an explicit stack, left-to-right.
pub struct TreeIterator<'a> {
    tree: &'a DebateTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DebateTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order traversal with an explicit visited-flag stack.
pub struct PostOrderIterator<'a> {
    tree: &'a DebateTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a DebateTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
