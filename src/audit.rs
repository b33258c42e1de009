//! 审计 / 编辑日志接口
//!
//! 属性变更在写锁释放之后由编排层提交给审计方，核心逻辑持锁期间从不调用它。

use alloc::{string::String, vec::Vec};

use crate::xattr::Xattr;

/// 重试去重令牌
///
/// 由客户端 ID 与调用 ID 组成；同一令牌的重放可被审计方识别并去重。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryToken {
    /// 客户端 ID
    pub client_id: u64,
    /// 调用 ID
    pub call_id: u32,
}

impl RetryToken {
    /// 创建令牌
    pub const fn new(client_id: u64, call_id: u32) -> Self {
        Self { client_id, call_id }
    }
}

/// 一条属性变更记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditLogOp {
    /// 写入属性
    SetXattrs {
        /// 目标路径
        path: String,
        /// 写入的属性
        xattrs: Vec<Xattr>,
        /// 去重令牌
        retry: Option<RetryToken>,
    },
    /// 删除属性
    RemoveXattrs {
        /// 目标路径
        path: String,
        /// 删除的属性
        xattrs: Vec<Xattr>,
        /// 去重令牌
        retry: Option<RetryToken>,
    },
}

impl EditLogOp {
    /// 目标路径
    pub fn path(&self) -> &str {
        match self {
            EditLogOp::SetXattrs { path, .. } | EditLogOp::RemoveXattrs { path, .. } => path,
        }
    }

    /// 涉及的属性
    pub fn xattrs(&self) -> &[Xattr] {
        match self {
            EditLogOp::SetXattrs { xattrs, .. } | EditLogOp::RemoveXattrs { xattrs, .. } => xattrs,
        }
    }

    /// 去重令牌
    pub fn retry(&self) -> Option<RetryToken> {
        match self {
            EditLogOp::SetXattrs { retry, .. } | EditLogOp::RemoveXattrs { retry, .. } => *retry,
        }
    }
}

/// 审计方
pub trait AuditLog {
    /// 记录一次属性变更
    fn record_attribute_change(&self, op: EditLogOp);
}

impl<A: AuditLog + ?Sized> AuditLog for &A {
    fn record_attribute_change(&self, op: EditLogOp) {
        (**self).record_attribute_change(op)
    }
}

/// 丢弃所有记录
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuditLog;

impl AuditLog for NullAuditLog {
    #[inline]
    fn record_attribute_change(&self, _op: EditLogOp) {}
}

#[cfg(feature = "std")]
pub use memory::MemoryEditLog;

#[cfg(feature = "std")]
mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// 内存编辑日志，按提交顺序保存记录
    #[derive(Debug, Default)]
    pub struct MemoryEditLog {
        ops: Mutex<Vec<EditLogOp>>,
    }

    impl MemoryEditLog {
        /// 空日志
        pub fn new() -> Self {
            Self::default()
        }

        fn locked(&self) -> MutexGuard<'_, Vec<EditLogOp>> {
            // 记录只追加，中毒后内容仍然完整
            self.ops.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// 已提交记录的快照
        pub fn ops(&self) -> Vec<EditLogOp> {
            self.locked().clone()
        }

        /// 记录数
        pub fn len(&self) -> usize {
            self.locked().len()
        }

        /// 是否为空
        pub fn is_empty(&self) -> bool {
            self.locked().is_empty()
        }
    }

    impl AuditLog for MemoryEditLog {
        fn record_attribute_change(&self, op: EditLogOp) {
            log::debug!(
                "[AUDIT] {} {} xattr(s) on {}",
                match op {
                    EditLogOp::SetXattrs { .. } => "set",
                    EditLogOp::RemoveXattrs { .. } => "remove",
                },
                op.xattrs().len(),
                op.path()
            );
            self.locked().push(op);
        }
    }
}
