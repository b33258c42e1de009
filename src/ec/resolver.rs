//! 生效策略解析
//!
//! 在已经解析好的 [`PathChain`] 上从叶到根按下标回溯，O(depth)，无副作用：
//!
//! 1. 文件：由文件自身物化的策略 ID 决定，到此结束（负数即无策略）
//! 2. 符号链接：立即结束，无策略。这是有意的简化，符号链接不参与继承
//! 3. 目录：带显式属性则解码并按名称在启用集合中查找，到此结束；
//!    查找失败（例如策略后来被禁用）得到“无策略”而不是错误。
//!    没有显式属性则继续检查父目录
//! 4. 回溯到根仍未命中：无策略
//!
//! 序列中不存在的节点（`None`）直接跳过。
//!
//! 调用方必须在整个回溯期间持有树的读锁（或写锁）。

use crate::{
    consts::XATTR_ERASURECODING_POLICY,
    error::Result,
    namespace::{NodeTree, PathChain},
    policy::PolicyRegistry,
    types::{InodeId, Policy},
    xattr::{decode_policy_xattr, AttributeStore, Xattr},
};

/// 解析 `chain` 目标的生效策略
pub fn resolve_policy<T, R>(tree: &T, registry: &R, chain: &PathChain) -> Result<Option<Policy>>
where
    T: NodeTree + AttributeStore + ?Sized,
    R: PolicyRegistry + ?Sized,
{
    let inodes = chain.inodes();
    for i in (0..inodes.len()).rev() {
        let inode = match inodes[i].and_then(|id| tree.inode(id)) {
            Some(inode) => inode,
            None => continue,
        };

        if inode.is_file() {
            let policy = inode
                .ec_policy_id()
                .and_then(|id| registry.lookup_by_id(id));
            log::trace!(
                "[EC] {}: file at depth {} carries policy {:?}",
                chain.path(),
                i,
                policy.as_ref().map(Policy::name)
            );
            return Ok(policy);
        }

        if inode.is_symlink() {
            log::trace!("[EC] {}: symlink at depth {}, no policy", chain.path(), i);
            return Ok(None);
        }

        if let Some(xattr) = tree.get_xattr(inode.id(), XATTR_ERASURECODING_POLICY) {
            let name = decode_policy_xattr(xattr).map_err(|err| {
                log::warn!(
                    "[EC] {}: corrupt policy xattr on inode {}: {}",
                    chain.path(),
                    inode.id(),
                    err
                );
                err
            })?;

            let policy = registry.lookup_enabled_by_name(&name);
            if policy.is_none() {
                log::warn!(
                    "[EC] {}: policy '{}' set on inode {} is not enabled",
                    chain.path(),
                    name,
                    inode.id()
                );
            }
            return Ok(policy);
        }
    }

    Ok(None)
}

/// 目标是否有生效策略
pub fn has_policy<T, R>(tree: &T, registry: &R, chain: &PathChain) -> Result<bool>
where
    T: NodeTree + AttributeStore + ?Sized,
    R: PolicyRegistry + ?Sized,
{
    Ok(resolve_policy(tree, registry, chain)?.is_some())
}

/// 单个节点自身的显式策略属性
///
/// 不回溯祖先。符号链接从不暴露属性。
pub fn lookup_explicit_xattr<T>(tree: &T, inode: InodeId) -> Option<&Xattr>
where
    T: NodeTree + AttributeStore + ?Sized,
{
    let node = tree.inode(inode)?;
    if node.is_symlink() {
        return None;
    }
    tree.get_xattr(inode, XATTR_ERASURECODING_POLICY)
}
