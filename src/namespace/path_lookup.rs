//! 路径解析
//!
//! [`PathChain`] 是从根到目标路径的节点序列，由路径解析方在持锁期间产生，
//! 之后只读。不存在的尾部分量记为 `None`。

use alloc::{string::String, vec::Vec};

use crate::{
    error::{Error, ErrorKind, Result},
    types::InodeId,
};

/// 从根到目标的节点序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChain {
    path: String,
    inodes: Vec<Option<InodeId>>,
}

impl PathChain {
    /// 创建节点序列
    ///
    /// `inodes[0]` 为根目录，最后一项为目标。
    pub fn new(path: String, inodes: Vec<Option<InodeId>>) -> Self {
        Self { path, inodes }
    }

    /// 规范化后的路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 节点序列（根在前）
    pub fn inodes(&self) -> &[Option<InodeId>] {
        &self.inodes
    }

    /// 序列长度
    pub fn len(&self) -> usize {
        self.inodes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.inodes.is_empty()
    }

    /// 目标节点；不存在时为 `None`
    pub fn last_inode(&self) -> Option<InodeId> {
        self.inodes.last().copied().flatten()
    }
}

/// 路径解析接口
pub trait PathResolver {
    /// 把绝对路径解析为节点序列
    ///
    /// 路径本身不存在不是错误，体现为序列尾部的 `None`。
    fn resolve_path(&self, path: &str) -> Result<PathChain>;
}

/// 拆分并规范化绝对路径
///
/// 忽略空分量与 `.`，`..` 回退一级。
pub fn normalize_components(path: &str) -> Result<Vec<&str>> {
    if !path.starts_with('/') {
        return Err(Error::with_path(
            ErrorKind::InvalidInput,
            "path must be absolute",
            path,
        ));
    }

    let mut components = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if components.pop().is_none() {
                    return Err(Error::with_path(
                        ErrorKind::InvalidInput,
                        "path escapes the root directory",
                        path,
                    ));
                }
            }
            name => components.push(name),
        }
    }
    Ok(components)
}

/// 由分量拼出规范路径
pub fn join_components(components: &[&str]) -> String {
    if components.is_empty() {
        return String::from("/");
    }
    let mut path = String::new();
    for component in components {
        path.push('/');
        path.push_str(component);
    }
    path
}
