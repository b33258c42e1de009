//! 显式策略属性的写入与删除
//!
//! 两个操作都要求调用方在整个“检查现有属性 -> 写入/删除”期间持有写锁，
//! 这里通过 `&mut T` 表达。因此同一目录上的并发 set 会完全串行化：
//! 后一个一定能看到前一个的结果并据此选择 CREATE 或 REPLACE，
//! 节点上也不会出现两个策略属性或被撕裂的值。

use alloc::{vec, vec::Vec};

use crate::{
    error::{Error, ErrorKind, Result},
    namespace::{NodeTree, PathChain},
    policy::PolicyRegistry,
    types::{InodeId, Policy},
    xattr::{build_policy_xattr, AttributeStore, Xattr, XattrSetFlags},
};

use super::resolver::lookup_explicit_xattr;

/// 一次策略写入的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyXattrWrite {
    /// 写入的策略
    pub policy: Policy,
    /// 写入的属性（交给审计方）
    pub xattrs: Vec<Xattr>,
    /// 实际使用的写入模式
    pub flags: XattrSetFlags,
}

/// 取出目标目录；不存在返回 `NotFound`，不是目录返回 `NotADirectory`
fn target_directory<T>(tree: &T, chain: &PathChain, not_dir_message: &'static str) -> Result<InodeId>
where
    T: NodeTree + ?Sized,
{
    let inode = chain
        .last_inode()
        .and_then(|id| tree.inode(id))
        .ok_or_else(|| Error::with_path(ErrorKind::NotFound, "Path not found", chain.path()))?;
    if !inode.is_dir() {
        return Err(Error::with_path(
            ErrorKind::NotADirectory,
            not_dir_message,
            chain.path(),
        ));
    }
    Ok(inode.id())
}

/// 在启用集合中查找策略
///
/// 不存在时返回 `InvalidPolicy`，附带调用时刻的启用策略名列表。
pub fn enabled_policy<R>(registry: &R, policy_name: &str) -> Result<Policy>
where
    R: PolicyRegistry + ?Sized,
{
    registry
        .lookup_enabled_by_name(policy_name)
        .ok_or_else(|| Error::invalid_policy(policy_name, registry.enabled_names()))
}

/// 在目录上设置策略
///
/// `policy` 应先经 [`enabled_policy`] 校验。
///
/// 1. 目标必须存在，否则 `NotFound`
/// 2. 目标必须是目录，否则 `NotADirectory`
/// 3. 已有显式属性用 REPLACE，否则用 CREATE
/// 4. 写入编码后的属性
pub fn set_policy_xattr<T>(tree: &mut T, chain: &PathChain, policy: &Policy) -> Result<PolicyXattrWrite>
where
    T: NodeTree + AttributeStore + ?Sized,
{
    let id = target_directory(
        &*tree,
        chain,
        "Attempt to set an erasure coding policy for a file",
    )?;

    let flags = if lookup_explicit_xattr(&*tree, id).is_some() {
        XattrSetFlags::REPLACE
    } else {
        XattrSetFlags::CREATE
    };

    let xattr = build_policy_xattr(policy.name());
    tree.put_xattr(id, xattr.clone(), flags)?;

    log::debug!(
        "[EC] set policy {} on {} ({:?})",
        policy.name(),
        chain.path(),
        flags
    );
    Ok(PolicyXattrWrite {
        policy: policy.clone(),
        xattrs: vec![xattr],
        flags,
    })
}

/// 删除目录上的显式策略
///
/// 目标必须存在且为目录。没有显式属性时返回 `Ok(None)`，不是错误。
pub fn remove_policy_xattr<T>(tree: &mut T, chain: &PathChain) -> Result<Option<Vec<Xattr>>>
where
    T: NodeTree + AttributeStore + ?Sized,
{
    let id = target_directory(
        &*tree,
        chain,
        "Cannot unset an erasure coding policy on a file",
    )?;

    let name = match lookup_explicit_xattr(&*tree, id) {
        Some(xattr) => alloc::string::String::from(xattr.name()),
        None => {
            log::trace!("[EC] unset on {}: no explicit policy", chain.path());
            return Ok(None);
        }
    };

    match tree.remove_xattr(id, &name)? {
        Some(removed) => {
            log::debug!("[EC] removed policy xattr from {}", chain.path());
            Ok(Some(vec![removed]))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::*,
        namespace::{InodeTable, PathResolver},
        policy::ErasureCodingPolicyManager,
        xattr::decode_policy_xattr,
        EcConfig,
    };

    fn manager() -> ErasureCodingPolicyManager {
        ErasureCodingPolicyManager::from_config(&EcConfig::with_enabled(
            "RS-6-3-1024k,XOR-2-1-1024k",
        ))
        .unwrap()
    }

    fn set(tree: &mut InodeTable, chain: &PathChain, name: &str) -> Result<PolicyXattrWrite> {
        let policy = enabled_policy(&manager(), name)?;
        set_policy_xattr(tree, chain, &policy)
    }

    fn setup() -> (InodeTable, InodeId) {
        let mut tree = InodeTable::new();
        let data = tree.mkdir("/data").unwrap();
        tree.create_file("/data/f", EC_POLICY_ID_NONE).unwrap();
        (tree, data)
    }

    #[test]
    fn test_create_then_replace() {
        let (mut tree, data) = setup();
        let chain = tree.resolve_path("/data").unwrap();

        let first = set(&mut tree, &chain, "RS-6-3-1024k").unwrap();
        assert_eq!(first.flags, XattrSetFlags::CREATE);
        assert_eq!(first.xattrs.len(), 1);
        assert_eq!(first.policy.id(), RS_6_3_POLICY_ID);

        let second = set(&mut tree, &chain, "XOR-2-1-1024k").unwrap();
        assert_eq!(second.flags, XattrSetFlags::REPLACE);

        let inode = tree.inode(data).unwrap();
        assert_eq!(inode.xattrs().count(XATTR_ERASURECODING_POLICY), 1);
        let stored = inode.xattrs().get(XATTR_ERASURECODING_POLICY).unwrap();
        assert_eq!(decode_policy_xattr(stored).unwrap(), "XOR-2-1-1024k");
    }

    #[test]
    fn test_set_same_policy_twice_replaces() {
        let (mut tree, _) = setup();
        let chain = tree.resolve_path("/data").unwrap();

        set(&mut tree, &chain, "RS-6-3-1024k").unwrap();
        let again = set(&mut tree, &chain, "RS-6-3-1024k").unwrap();
        assert_eq!(again.flags, XattrSetFlags::REPLACE);
    }

    #[test]
    fn test_set_errors() {
        let (mut tree, _) = setup();
        let registry = manager();

        let chain = tree.resolve_path("/data/f").unwrap();
        let err = set(&mut tree, &chain, "RS-6-3-1024k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert_eq!(err.path(), Some("/data/f"));

        let chain = tree.resolve_path("/missing").unwrap();
        let err = set(&mut tree, &chain, "RS-6-3-1024k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = enabled_policy(&registry, "RS-3-2-1024k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
        assert_eq!(
            err.enabled_policies().unwrap(),
            registry.enabled_names().as_slice()
        );
    }

    #[test]
    fn test_set_on_symlink_fails() {
        let (mut tree, _) = setup();
        tree.create_symlink("/data/l", "/data").unwrap();
        let chain = tree.resolve_path("/data/l").unwrap();
        let err = set(&mut tree, &chain, "RS-6-3-1024k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_remove_twice() {
        let (mut tree, data) = setup();
        let chain = tree.resolve_path("/data").unwrap();
        set(&mut tree, &chain, "RS-6-3-1024k").unwrap();

        let removed = remove_policy_xattr(&mut tree, &chain).unwrap().unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(decode_policy_xattr(&removed[0]).unwrap(), "RS-6-3-1024k");
        assert!(tree.inode(data).unwrap().xattrs().is_empty());

        assert!(remove_policy_xattr(&mut tree, &chain).unwrap().is_none());
    }

    #[test]
    fn test_remove_errors() {
        let (mut tree, _) = setup();

        let chain = tree.resolve_path("/data/f").unwrap();
        let err = remove_policy_xattr(&mut tree, &chain).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);

        let chain = tree.resolve_path("/nope").unwrap();
        let err = remove_policy_xattr(&mut tree, &chain).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_keeps_other_xattrs() {
        let (mut tree, data) = setup();
        tree.put_xattr(data, Xattr::new("user.owner", vec![1]), XattrSetFlags::CREATE)
            .unwrap();
        let chain = tree.resolve_path("/data").unwrap();
        set(&mut tree, &chain, "XOR-2-1-1024k").unwrap();

        remove_policy_xattr(&mut tree, &chain).unwrap().unwrap();
        let xattrs = tree.inode(data).unwrap().xattrs();
        assert_eq!(xattrs.xattrs().len(), 1);
        assert!(xattrs.get("user.owner").is_some());
    }
}
