//! 命名空间
//!
//! 纠删码策略挂在命名空间树的节点上。这里提供核心逻辑所需的接口，
//! 以及一个内存实现：
//!
//! - `inode` - 节点与 [`NodeTree`] 接口
//! - `path_lookup` - [`PathChain`] 与 [`PathResolver`] 接口
//! - `tree` - 内存树 [`InodeTable`]
//! - `permission` - 权限检查接口

mod inode;
pub mod path_lookup;
mod permission;
mod tree;

pub use inode::{Inode, InodeKind, NodeTree};
pub use path_lookup::{PathChain, PathResolver};
pub use permission::{AccessMode, AllowAll, PermissionChecker};
pub use tree::InodeTable;
