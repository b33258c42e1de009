//! 命名空间节点

use alloc::{collections::BTreeMap, string::String};

use crate::{
    types::{materialized_policy_id, InodeId, InodeType, PolicyId},
    xattr::XattrFeature,
};

/// 节点类型及其专有数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InodeKind {
    /// 目录
    Directory {
        /// 子节点：名称 -> 编号
        children: BTreeMap<String, InodeId>,
    },
    /// 普通文件
    File {
        /// 创建时物化的策略 ID，负数表示无策略；创建后不再改变
        ec_policy_id: i8,
    },
    /// 符号链接
    Symlink {
        /// 链接目标（不做解析）
        target: String,
    },
}

/// 命名空间节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    id: InodeId,
    name: String,
    parent: Option<InodeId>,
    kind: InodeKind,
    xattrs: XattrFeature,
}

impl Inode {
    pub(crate) fn new(id: InodeId, name: &str, parent: Option<InodeId>, kind: InodeKind) -> Self {
        Self {
            id,
            name: String::from(name),
            parent,
            kind,
            xattrs: XattrFeature::new(),
        }
    }

    /// 节点编号
    pub fn id(&self) -> InodeId {
        self.id
    }

    /// 节点名（根目录为空字符串）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 父目录编号
    pub fn parent(&self) -> Option<InodeId> {
        self.parent
    }

    /// 节点类型数据
    pub fn kind(&self) -> &InodeKind {
        &self.kind
    }

    /// 节点类型
    pub fn inode_type(&self) -> InodeType {
        match self.kind {
            InodeKind::Directory { .. } => InodeType::Directory,
            InodeKind::File { .. } => InodeType::RegularFile,
            InodeKind::Symlink { .. } => InodeType::Symlink,
        }
    }

    /// 是否为目录
    pub fn is_dir(&self) -> bool {
        self.inode_type().is_dir()
    }

    /// 是否为普通文件
    pub fn is_file(&self) -> bool {
        self.inode_type().is_file()
    }

    /// 是否为符号链接
    pub fn is_symlink(&self) -> bool {
        self.inode_type().is_symlink()
    }

    /// 文件的原始物化策略 ID；非文件返回 `None`
    pub fn raw_ec_policy_id(&self) -> Option<i8> {
        match self.kind {
            InodeKind::File { ec_policy_id } => Some(ec_policy_id),
            _ => None,
        }
    }

    /// 文件物化的策略 ID；非文件或无策略返回 `None`
    pub fn ec_policy_id(&self) -> Option<PolicyId> {
        self.raw_ec_policy_id().and_then(materialized_policy_id)
    }

    /// 符号链接目标
    pub fn symlink_target(&self) -> Option<&str> {
        match &self.kind {
            InodeKind::Symlink { target } => Some(target.as_str()),
            _ => None,
        }
    }

    /// 按名称查找子节点；非目录返回 `None`
    pub fn child(&self, name: &str) -> Option<InodeId> {
        match &self.kind {
            InodeKind::Directory { children } => children.get(name).copied(),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, InodeId>> {
        match &mut self.kind {
            InodeKind::Directory { children } => Some(children),
            _ => None,
        }
    }

    /// 节点上的扩展属性
    pub fn xattrs(&self) -> &XattrFeature {
        &self.xattrs
    }

    pub(crate) fn xattrs_mut(&mut self) -> &mut XattrFeature {
        &mut self.xattrs
    }
}

/// 按编号读取节点
///
/// 解析器与修改器只通过这个接口观察树结构。
pub trait NodeTree {
    /// 获取节点
    fn inode(&self, id: InodeId) -> Option<&Inode>;

    /// 根目录编号
    fn root(&self) -> InodeId;
}
