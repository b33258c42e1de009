//! 内存命名空间树
//!
//! 节点存放在 `Slab` 中，编号即 slab 下标。树本身不带锁，
//! 并发访问时放在 [`TreeLock`](crate::lock::TreeLock) 之后使用。

use alloc::collections::BTreeMap;
use slab::Slab;

use crate::{
    error::{Error, ErrorKind, Result},
    types::InodeId,
    xattr::{AttributeStore, Xattr, XattrSetFlags},
};

use super::{
    inode::{Inode, InodeKind, NodeTree},
    path_lookup::{join_components, normalize_components, PathChain, PathResolver},
};

/// 内存命名空间
#[derive(Debug, Clone)]
pub struct InodeTable {
    storage: Slab<Inode>,
    root: InodeId,
}

impl InodeTable {
    /// 只有根目录的树
    pub fn new() -> Self {
        let mut storage = Slab::new();
        let entry = storage.vacant_entry();
        let root = entry.key();
        entry.insert(Inode::new(root, "", None, empty_dir()));
        Self { storage, root }
    }

    /// 节点数量（含根目录）
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// 是否只有根目录
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 1
    }

    /// 创建目录，父目录必须存在
    pub fn mkdir(&mut self, path: &str) -> Result<InodeId> {
        self.create(path, empty_dir())
    }

    /// 递归创建目录，已存在的目录保持不变
    pub fn mkdirs(&mut self, path: &str) -> Result<InodeId> {
        let components = normalize_components(path)?;
        let mut current = self.root;
        for name in components {
            current = match self.child_of_dir(current, name, path)? {
                Some(child) => {
                    if !self.is_dir(child) {
                        return Err(Error::with_path(
                            ErrorKind::NotADirectory,
                            "path component is not a directory",
                            path,
                        ));
                    }
                    child
                }
                None => self.insert(current, name, empty_dir())?,
            };
        }
        Ok(current)
    }

    /// 创建文件
    ///
    /// `ec_policy_id` 为创建时物化的策略 ID，负数表示无策略。
    pub fn create_file(&mut self, path: &str, ec_policy_id: i8) -> Result<InodeId> {
        self.create(path, InodeKind::File { ec_policy_id })
    }

    /// 创建符号链接（目标不做校验）
    pub fn create_symlink(&mut self, path: &str, target: &str) -> Result<InodeId> {
        self.create(
            path,
            InodeKind::Symlink {
                target: target.into(),
            },
        )
    }

    /// 按路径查找节点编号
    pub fn lookup(&self, path: &str) -> Result<Option<InodeId>> {
        Ok(self.resolve_path(path)?.last_inode())
    }

    fn is_dir(&self, id: InodeId) -> bool {
        self.storage.get(id).map_or(false, Inode::is_dir)
    }

    fn create(&mut self, path: &str, kind: InodeKind) -> Result<InodeId> {
        let components = normalize_components(path)?;
        let (name, parents) = components.split_last().ok_or(Error::new(
            ErrorKind::AlreadyExists,
            "root directory already exists",
        ))?;

        let mut parent = self.root;
        for component in parents {
            parent = self.child_of_dir(parent, component, path)?.ok_or_else(|| {
                Error::with_path(ErrorKind::NotFound, "parent directory not found", path)
            })?;
        }

        if self.child_of_dir(parent, name, path)?.is_some() {
            return Err(Error::with_path(
                ErrorKind::AlreadyExists,
                "path already exists",
                path,
            ));
        }
        self.insert(parent, name, kind)
    }

    /// 在目录 `dir` 中查找 `name`；`dir` 不是目录时报错
    fn child_of_dir(&self, dir: InodeId, name: &str, path: &str) -> Result<Option<InodeId>> {
        let inode = self
            .storage
            .get(dir)
            .ok_or_else(|| Error::with_path(ErrorKind::NotFound, "inode not found", path))?;
        if !inode.is_dir() {
            return Err(Error::with_path(
                ErrorKind::NotADirectory,
                "path component is not a directory",
                path,
            ));
        }
        Ok(inode.child(name))
    }

    fn insert(&mut self, parent: InodeId, name: &str, kind: InodeKind) -> Result<InodeId> {
        let id = self.storage.vacant_key();
        self.storage
            .get_mut(parent)
            .and_then(Inode::children_mut)
            .ok_or(Error::new(ErrorKind::NotADirectory, "parent is not a directory"))?
            .insert(name.into(), id);
        self.storage.insert(Inode::new(id, name, Some(parent), kind));

        log::trace!("[NS] inserted inode {} '{}' under {}", id, name, parent);
        Ok(id)
    }
}

fn empty_dir() -> InodeKind {
    InodeKind::Directory {
        children: BTreeMap::new(),
    }
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree for InodeTable {
    fn inode(&self, id: InodeId) -> Option<&Inode> {
        self.storage.get(id)
    }

    fn root(&self) -> InodeId {
        self.root
    }
}

impl PathResolver for InodeTable {
    /// 符号链接不会被跟随：链接之后的分量全部为 `None`
    fn resolve_path(&self, path: &str) -> Result<PathChain> {
        let components = normalize_components(path)?;

        let mut inodes = alloc::vec::Vec::with_capacity(components.len() + 1);
        let mut current = Some(self.root);
        inodes.push(current);
        for name in &components {
            current = current
                .and_then(|id| self.storage.get(id))
                .and_then(|inode| inode.child(name));
            inodes.push(current);
        }

        Ok(PathChain::new(join_components(&components), inodes))
    }
}

impl AttributeStore for InodeTable {
    fn get_xattr(&self, inode: InodeId, name: &str) -> Option<&Xattr> {
        self.storage.get(inode)?.xattrs().get(name)
    }

    fn put_xattr(&mut self, inode: InodeId, xattr: Xattr, flags: XattrSetFlags) -> Result<()> {
        self.storage
            .get_mut(inode)
            .ok_or(Error::new(ErrorKind::NotFound, "inode not found"))?
            .xattrs_mut()
            .set(xattr, flags)
    }

    fn remove_xattr(&mut self, inode: InodeId, name: &str) -> Result<Option<Xattr>> {
        let inode = self
            .storage
            .get_mut(inode)
            .ok_or(Error::new(ErrorKind::NotFound, "inode not found"))?;
        Ok(inode.xattrs_mut().remove(name))
    }
}
