/// Arena-backed directory tree with O(n) bottom-up size aggregation.
///
/// All nodes live in a single `Vec<FileNode>`. Relationships between nodes
/// use `NodeIndex` (a thin `u32` wrapper) rather than heap pointers. The
/// nested [`DirectoryTreeNode`] view handed to the presentation layer is
/// produced from the arena without recursion.
use super::category::Category;
use super::file_node::{FileNode, NodeIndex};
use compact_str::CompactString;
use serde::Serialize;

/// The directory hierarchy produced by one scan, rooted at the scanned path.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// Arena: every node in a flat vector. Children always sit at a higher
    /// index than their parent.
    pub nodes: Vec<FileNode>,

    /// The scan root (always index 0).
    pub root: NodeIndex,

    /// Total size of all files under the root.
    pub total_size: u64,
}

/// Nested, owned view of the tree for transport (treemap / sunburst).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryTreeNode {
    pub name: String,
    /// Rolled-up size: own size for files, sum of children for directories.
    pub size: u64,
    pub children: Vec<DirectoryTreeNode>,
    /// Files anywhere below a directory. Absent on file nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl FileTree {
    /// Create a tree containing only the root directory.
    ///
    /// `estimated_nodes` pre-sizes the arena; it grows if needed.
    pub fn with_root(root_name: CompactString, estimated_nodes: usize) -> Self {
        let mut nodes = Vec::with_capacity(estimated_nodes.max(1));
        nodes.push(FileNode::new_dir(root_name, None));
        Self {
            nodes,
            root: NodeIndex::new(0),
            total_size: 0,
        }
    }

    /// Allocate a new node in the arena and return its index.
    pub fn add_node(&mut self, node: FileNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// O(1) thanks to the `last_child` pointer; children keep insertion order.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        debug_assert!(child > parent, "children must follow their parent in the arena");
        self.nodes[child.idx()].parent = Some(parent);
        self.nodes[child.idx()].next_sibling = None;
        match self.nodes[parent.idx()].last_child {
            Some(last) => self.nodes[last.idx()].next_sibling = Some(child),
            None => self.nodes[parent.idx()].first_child = Some(child),
        }
        self.nodes[parent.idx()].last_child = Some(child);
    }

    /// Convenience: allocate `node` and attach it under `parent`.
    pub fn push_child(&mut self, parent: NodeIndex, node: FileNode) -> NodeIndex {
        let idx = self.add_node(node);
        self.add_child(parent, idx);
        idx
    }

    /// Compute directory sizes and descendant counts in a single bottom-up pass.
    ///
    /// Children are always inserted after their parent in the arena, so
    /// iterating in *reverse* processes every child before its parent. O(n),
    /// no recursion.
    ///
    /// Safe to call repeatedly: directory totals are reset first.
    pub fn aggregate_sizes(&mut self) {
        for node in self.nodes.iter_mut() {
            if node.is_dir {
                node.size = 0;
                node.descendant_count = 0;
            }
        }

        for i in (0..self.nodes.len()).rev() {
            let node = &self.nodes[i];
            let (size, files) = if node.is_dir {
                (node.size, node.descendant_count)
            } else {
                (node.size, 1)
            };
            if let Some(parent_idx) = node.parent {
                self.nodes[parent_idx.idx()].size += size;
                self.nodes[parent_idx.idx()].descendant_count += files;
            }
        }

        self.total_size = self.nodes[self.root.idx()].size;
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &FileNode {
        &self.nodes[index.idx()]
    }

    /// Total number of nodes in the tree, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds nothing but the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Package the arena as a nested [`DirectoryTreeNode`].
    ///
    /// Sizes are taken as-is; call [`aggregate_sizes`](Self::aggregate_sizes)
    /// first. Built in one reverse pass: every child's view is finished
    /// before its parent collects it.
    pub fn to_view(&self) -> DirectoryTreeNode {
        let mut built: Vec<Option<DirectoryTreeNode>> = vec![None; self.len()];

        for i in (0..self.len()).rev() {
            let node = self.node(NodeIndex::new(i));
            let mut children = Vec::new();
            let mut child = node.first_child;
            while let Some(idx) = child {
                if let Some(view) = built[idx.idx()].take() {
                    children.push(view);
                }
                child = self.node(idx).next_sibling;
            }
            built[i] = Some(DirectoryTreeNode {
                name: node.name.to_string(),
                size: node.size,
                children,
                file_count: node.is_dir.then_some(node.descendant_count),
                category: node.category,
            });
        }

        built[self.root.idx()].take().unwrap_or_default()
    }
}
