/// Data model for dirscope: file records, categories and the size tree.
pub mod category;
pub mod file_node;
pub mod file_record;
pub mod file_tree;
pub mod size;

pub use category::Category;
pub use file_node::{FileNode, NodeIndex};
pub use file_record::{FileRecord, PermissionBits};
pub use file_tree::{DirectoryTreeNode, FileTree};
