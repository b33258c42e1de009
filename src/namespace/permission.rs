//! 权限检查接口
//!
//! 本 crate 不实现权限模型，只在合适的时机调用检查方，并原样传递其错误。

use bitflags::bitflags;

use crate::error::Result;

use super::{inode::NodeTree, path_lookup::PathChain};

bitflags! {
    /// 访问模式
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessMode: u8 {
        /// 执行（目录遍历）
        const EXECUTE = 0x01;
        /// 写
        const WRITE   = 0x02;
        /// 读
        const READ    = 0x04;
    }
}

/// 权限检查方
///
/// 拒绝访问时应返回 `ErrorKind::AccessDenied`。
pub trait PermissionChecker {
    /// 检查对 `chain` 目标的访问
    fn check_access<T: NodeTree + ?Sized>(
        &self,
        tree: &T,
        chain: &PathChain,
        mode: AccessMode,
    ) -> Result<()>;
}

/// 放行所有访问
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionChecker for AllowAll {
    #[inline]
    fn check_access<T: NodeTree + ?Sized>(
        &self,
        _tree: &T,
        _chain: &PathChain,
        _mode: AccessMode,
    ) -> Result<()> {
        Ok(())
    }
}
