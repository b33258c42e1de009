//! 纠删码策略操作入口
//!
//! [`ErasureCodingOps`] 把各个协作方串起来：
//!
//! ```text
//! set_policy / unset_policy
//!   ├─ 校验策略名（不持锁）
//!   ├─ acquire_write
//!   │    ├─ resolve_path
//!   │    ├─ check_access(WRITE)
//!   │    ├─ set_policy_xattr / remove_policy_xattr
//!   │    └─ file_status
//!   ├─ 释放写锁
//!   └─ AuditLog::record_attribute_change
//!
//! get_policy / has_policy
//!   └─ acquire_read -> resolve_path -> (check_access(READ)) -> resolve_policy
//! ```
//!
//! 守卫在作用域结束时释放，错误路径同样如此。

use alloc::{string::String, vec::Vec};

use crate::{
    audit::{AuditLog, EditLogOp, NullAuditLog, RetryToken},
    config::EcConfig,
    error::{Error, ErrorKind, Result},
    lock::TreeLock,
    namespace::{AccessMode, AllowAll, NodeTree, PathChain, PathResolver, PermissionChecker},
    policy::PolicyRegistry,
    types::Policy,
    xattr::{AttributeStore, Xattr, XattrSetFlags},
};

use super::{
    mutator::{enabled_policy, remove_policy_xattr, set_policy_xattr},
    resolver::{has_policy, resolve_policy},
    status::{file_status, FileStatus},
};

/// `set_policy` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    /// 写入的策略
    pub policy: Policy,
    /// 写入的属性
    pub xattrs: Vec<Xattr>,
    /// 实际使用的写入模式（CREATE 或 REPLACE）
    pub flags: XattrSetFlags,
    /// 写入后的节点状态
    pub status: FileStatus,
}

/// `unset_policy` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetOutcome {
    /// 被删除的属性；`None` 表示本来就没有显式策略
    pub removed: Option<Vec<Xattr>>,
    /// 删除后的节点状态
    pub status: FileStatus,
}

impl UnsetOutcome {
    /// 是否什么都没做
    pub fn is_noop(&self) -> bool {
        self.removed.is_none()
    }
}

/// 纠删码策略操作
///
/// - `L` - 保护命名空间树的锁
/// - `R` - 策略注册表
/// - `P` - 权限检查方
/// - `A` - 审计方
pub struct ErasureCodingOps<L, R, P = AllowAll, A = NullAuditLog> {
    tree: L,
    registry: R,
    permission: P,
    audit: A,
    config: EcConfig,
}

impl<L, R> ErasureCodingOps<L, R> {
    /// 放行所有访问、丢弃审计记录
    pub fn new(tree: L, registry: R, config: EcConfig) -> Self {
        Self {
            tree,
            registry,
            permission: AllowAll,
            audit: NullAuditLog,
            config,
        }
    }
}

impl<L, R, P, A> ErasureCodingOps<L, R, P, A> {
    /// 替换权限检查方
    pub fn with_permission_checker<Q>(self, permission: Q) -> ErasureCodingOps<L, R, Q, A> {
        ErasureCodingOps {
            tree: self.tree,
            registry: self.registry,
            permission,
            audit: self.audit,
            config: self.config,
        }
    }

    /// 替换审计方
    pub fn with_audit_log<B>(self, audit: B) -> ErasureCodingOps<L, R, P, B> {
        ErasureCodingOps {
            tree: self.tree,
            registry: self.registry,
            permission: self.permission,
            audit,
            config: self.config,
        }
    }

    /// 树锁
    pub fn tree(&self) -> &L {
        &self.tree
    }

    /// 策略注册表
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// 可变策略注册表（启用 / 禁用策略）
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// 审计方
    pub fn audit_log(&self) -> &A {
        &self.audit
    }

    /// 配置
    pub fn config(&self) -> &EcConfig {
        &self.config
    }
}

impl<L, R, P, A> ErasureCodingOps<L, R, P, A>
where
    L: TreeLock,
    L::Tree: NodeTree + PathResolver + AttributeStore,
    R: PolicyRegistry,
    P: PermissionChecker,
    A: AuditLog,
{
    fn check_access(&self, tree: &L::Tree, chain: &PathChain, mode: AccessMode) -> Result<()> {
        if !self.config.permissions_enabled {
            return Ok(());
        }
        self.permission.check_access(tree, chain, mode).map_err(|err| {
            log::debug!("[EC] {:?} access to {} rejected: {}", mode, chain.path(), err);
            err
        })
    }

    /// 在目录上设置策略
    ///
    /// 策略名必须在启用集合中，否则返回 `InvalidPolicy`（此时不获取锁）。
    pub fn set_policy(
        &self,
        path: &str,
        policy_name: &str,
        retry: Option<RetryToken>,
    ) -> Result<SetOutcome> {
        let policy = enabled_policy(&self.registry, policy_name)?;

        let (write, status) = {
            let mut tree = self.tree.acquire_write()?;
            let chain = tree.resolve_path(path)?;
            self.check_access(&*tree, &chain, AccessMode::WRITE)?;
            let write = set_policy_xattr(&mut *tree, &chain, &policy)?;
            let status = file_status(&*tree, &self.registry, &chain)?;
            (write, status)
        };

        self.audit.record_attribute_change(EditLogOp::SetXattrs {
            path: status.path.clone(),
            xattrs: write.xattrs.clone(),
            retry,
        });

        Ok(SetOutcome {
            policy: write.policy,
            xattrs: write.xattrs,
            flags: write.flags,
            status,
        })
    }

    /// 删除目录上的显式策略
    ///
    /// 没有显式策略时不报错，返回的 [`UnsetOutcome::is_noop`] 为真，也不产生审计记录。
    pub fn unset_policy(&self, path: &str, retry: Option<RetryToken>) -> Result<UnsetOutcome> {
        let (removed, status) = {
            let mut tree = self.tree.acquire_write()?;
            let chain = tree.resolve_path(path)?;
            self.check_access(&*tree, &chain, AccessMode::WRITE)?;
            let removed = remove_policy_xattr(&mut *tree, &chain)?;
            let status = file_status(&*tree, &self.registry, &chain)?;
            (removed, status)
        };

        if let Some(xattrs) = &removed {
            self.audit.record_attribute_change(EditLogOp::RemoveXattrs {
                path: status.path.clone(),
                xattrs: xattrs.clone(),
                retry,
            });
        }

        Ok(UnsetOutcome { removed, status })
    }

    /// 查询生效策略
    ///
    /// 目标不存在返回 `NotFound`；存在但没有策略返回 `Ok(None)`。
    pub fn get_policy(&self, path: &str) -> Result<Option<Policy>> {
        let tree = self.tree.acquire_read()?;
        let chain = tree.resolve_path(path)?;
        self.check_access(&*tree, &chain, AccessMode::READ)?;
        if chain.last_inode().is_none() {
            return Err(Error::with_path(
                ErrorKind::NotFound,
                "Path not found",
                chain.path(),
            ));
        }
        self.get_policy_for_chain(&*tree, &chain)
    }

    /// 路径是否有生效策略
    ///
    /// 不要求目标存在：尚未创建的路径同样继承祖先的策略。
    pub fn has_policy(&self, path: &str) -> Result<bool> {
        let tree = self.tree.acquire_read()?;
        let chain = tree.resolve_path(path)?;
        self.has_policy_for_chain(&*tree, &chain)
    }

    /// 启用的策略，按 id 排序
    pub fn list_enabled_policies(&self) -> Vec<Policy> {
        self.registry.list_enabled()
    }

    /// 启用的策略名
    pub fn enabled_policy_names(&self) -> Vec<String> {
        self.registry.enabled_names()
    }

    /// 在已解析的路径上查询，不做存在性与权限检查
    ///
    /// 调用方必须持有 `tree` 的读锁或写锁。
    pub fn get_policy_for_chain(&self, tree: &L::Tree, chain: &PathChain) -> Result<Option<Policy>> {
        resolve_policy(tree, &self.registry, chain)
    }

    /// [`get_policy_for_chain`](Self::get_policy_for_chain) 的布尔版本
    pub fn has_policy_for_chain(&self, tree: &L::Tree, chain: &PathChain) -> Result<bool> {
        has_policy(tree, &self.registry, chain)
    }
}
