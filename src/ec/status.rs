//! 节点状态快照

use alloc::string::String;

use crate::{
    error::{Error, ErrorKind, Result},
    namespace::{NodeTree, PathChain},
    policy::PolicyRegistry,
    types::{InodeId, InodeType, Policy},
    xattr::AttributeStore,
};

use super::resolver::resolve_policy;

/// 节点的公开状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// 规范化路径
    pub path: String,
    /// 节点编号
    pub inode_id: InodeId,
    /// 节点类型
    pub file_type: InodeType,
    /// 生效的纠删码策略
    pub ec_policy: Option<Policy>,
    /// 符号链接目标
    pub symlink_target: Option<String>,
}

impl FileStatus {
    /// 是否为目录
    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    /// 是否带纠删码策略
    pub fn is_erasure_coded(&self) -> bool {
        self.ec_policy.is_some()
    }
}

/// 在持锁期间为 `chain` 的目标生成快照
///
/// 目标不存在返回 `NotFound`。祖先上的策略属性损坏不会让快照失败，
/// 此时 `ec_policy` 为 `None`：快照通常在修改提交之后生成。
pub fn file_status<T, R>(tree: &T, registry: &R, chain: &PathChain) -> Result<FileStatus>
where
    T: NodeTree + AttributeStore + ?Sized,
    R: PolicyRegistry + ?Sized,
{
    let inode = chain
        .last_inode()
        .and_then(|id| tree.inode(id))
        .ok_or_else(|| Error::with_path(ErrorKind::NotFound, "Path not found", chain.path()))?;

    let ec_policy = resolve_policy(tree, registry, chain).unwrap_or_else(|err| {
        log::warn!("[EC] status of {} reported without policy: {}", chain.path(), err);
        None
    });

    Ok(FileStatus {
        path: String::from(chain.path()),
        inode_id: inode.id(),
        file_type: inode.inode_type(),
        ec_policy,
        symlink_target: inode.symlink_target().map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::*,
        namespace::{InodeTable, PathResolver},
        policy::ErasureCodingPolicyManager,
        xattr::{build_policy_xattr, XattrSetFlags},
        EcConfig,
    };

    #[test]
    fn test_status_snapshot() {
        let registry = ErasureCodingPolicyManager::from_config(&EcConfig::default()).unwrap();
        let mut tree = InodeTable::new();
        let data = tree.mkdir("/data").unwrap();
        tree.put_xattr(data, build_policy_xattr("RS-6-3-1024k"), XattrSetFlags::CREATE)
            .unwrap();
        let link = tree.create_symlink("/data/l", "/x").unwrap();

        let status = file_status(&tree, &registry, &tree.resolve_path("/data").unwrap()).unwrap();
        assert!(status.is_dir());
        assert_eq!(status.inode_id, data);
        assert_eq!(status.ec_policy.as_ref().map(|p| p.id()), Some(RS_6_3_POLICY_ID));
        assert!(status.is_erasure_coded());

        let status = file_status(&tree, &registry, &tree.resolve_path("/data/l").unwrap()).unwrap();
        assert_eq!(status.inode_id, link);
        assert_eq!(status.file_type, InodeType::Symlink);
        assert_eq!(status.symlink_target.as_deref(), Some("/x"));
        assert!(!status.is_erasure_coded());
    }

    #[test]
    fn test_status_with_corrupt_ancestor() {
        let registry = ErasureCodingPolicyManager::from_config(&EcConfig::default()).unwrap();
        let mut tree = InodeTable::new();
        let a = tree.mkdir("/a").unwrap();
        let b = tree.mkdir("/a/b").unwrap();
        tree.put_xattr(
            a,
            crate::xattr::Xattr::new(XATTR_ERASURECODING_POLICY, alloc::vec![5, b'x']),
            XattrSetFlags::CREATE,
        )
        .unwrap();

        let status = file_status(&tree, &registry, &tree.resolve_path("/a/b").unwrap()).unwrap();
        assert_eq!(status.inode_id, b);
        assert!(status.ec_policy.is_none());
    }

    #[test]
    fn test_status_not_found() {
        let registry = ErasureCodingPolicyManager::new();
        let tree = InodeTable::new();
        let chain = tree.resolve_path("/gone").unwrap();
        let err = file_status(&tree, &registry, &chain).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), Some("/gone"));
    }
}
