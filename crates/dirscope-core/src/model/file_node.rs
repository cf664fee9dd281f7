/// A single node in the arena-allocated directory tree.
///
/// Nodes are stored in a flat `Vec<FileNode>`. Parent-child relationships
/// use indices rather than pointers, so building and walking the tree needs
/// neither recursion nor reference counting.
use super::category::Category;
use compact_str::CompactString;

/// Lightweight index into the arena `Vec<FileNode>`.
///
/// Uses `u32` to keep nodes small; supports up to ~4 billion nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A single file or directory in the tree.
///
/// Children form a singly-linked list via `first_child` / `next_sibling`.
/// `last_child` makes appends O(1) so children keep walk order.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name only (NOT the full path).
    pub name: CompactString,

    /// Size in bytes. For directories this is the sum of all descendant
    /// file sizes, computed in a single bottom-up pass after scanning.
    pub size: u64,

    /// `true` if this node represents a directory.
    pub is_dir: bool,

    /// Index of the parent node. `None` for the scan root.
    pub parent: Option<NodeIndex>,

    pub first_child: Option<NodeIndex>,
    pub last_child: Option<NodeIndex>,
    pub next_sibling: Option<NodeIndex>,

    /// Total number of descendant *files* (not directories).
    pub descendant_count: u64,

    /// Category of a file node, used for treemap colouring. Always `None`
    /// on directories.
    pub category: Option<Category>,
}

impl FileNode {
    /// Create a new file leaf.
    pub fn new_file(
        name: CompactString,
        size: u64,
        category: Category,
        parent: Option<NodeIndex>,
    ) -> Self {
        Self {
            name,
            size,
            is_dir: false,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            descendant_count: 0,
            category: Some(category),
        }
    }

    /// Create a new, empty directory node.
    pub fn new_dir(name: CompactString, parent: Option<NodeIndex>) -> Self {
        Self {
            name,
            size: 0,
            is_dir: true,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            descendant_count: 0,
            category: None,
        }
    }
}
