//! ecpolicy_core: 纠删码策略的命名空间管理
//!
//! 在一棵分层命名空间上为目录指定纠删码策略，并为任意节点求出生效策略：
//! - 目录上的策略以扩展属性 `erasurecoding.policy` 的形式保存
//! - 子节点从最近的带策略祖先目录继承
//! - 文件在创建时物化策略 ID，之后不再受祖先变化影响
//! - 符号链接不参与继承
//!
//! 整棵树由一把读写锁保护，锁、策略注册表、权限检查方与审计方都以 trait 形式注入。
//!
//! # 示例
//!
//! ```rust
//! use std::sync::RwLock;
//! use ecpolicy_core::{
//!     EcConfig, ErasureCodingOps, ErasureCodingPolicyManager, InodeTable, Result,
//! };
//!
//! fn main() -> Result<()> {
//!     let config = EcConfig::with_enabled("RS-6-3-1024k,XOR-2-1-1024k");
//!     let registry = ErasureCodingPolicyManager::from_config(&config)?;
//!
//!     let mut tree = InodeTable::new();
//!     tree.mkdirs("/data/logs")?;
//!
//!     let ops = ErasureCodingOps::new(RwLock::new(tree), registry, config);
//!     ops.set_policy("/data", "RS-6-3-1024k", None)?;
//!
//!     let policy = ops.get_policy("/data/logs")?;
//!     assert_eq!(policy.map(|p| p.num_data_units()), Some(6));
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`consts`] - 常量定义
//! - [`types`] - 策略与节点类型
//! - [`config`] - 配置
//! - [`xattr`] - 扩展属性与策略名编解码
//! - [`policy`] - 系统策略表与注册表
//! - [`namespace`] - 命名空间树、路径解析与权限检查接口
//! - [`lock`] - 树锁
//! - [`audit`] - 审计 / 编辑日志
//! - [`ec`] - 策略解析、修改与编排

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// ===== 基础模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 数据结构定义
pub mod types;

/// 配置
pub mod config;

/// 树锁
pub mod lock;

// ===== 存储与命名空间 =====

/// Extended Attributes (xattr)
pub mod xattr;

/// 纠删码策略
pub mod policy;

/// 命名空间
pub mod namespace;

/// 审计
pub mod audit;

// ===== 核心逻辑 =====

/// 纠删码策略解析与修改
pub mod ec;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorContext, ErrorKind, Result};

// 配置与类型
pub use config::EcConfig;
pub use types::{EcSchema, InodeId, InodeType, Policy, PolicyId};

// 锁
pub use lock::TreeLock;

// Xattr
pub use xattr::{AttributeStore, Xattr, XattrSetFlags};

// 策略
pub use policy::{ErasureCodingPolicyManager, PolicyRegistry};

// 命名空间
pub use namespace::{
    AccessMode, AllowAll, Inode, InodeTable, NodeTree, PathChain, PathResolver, PermissionChecker,
};

// 审计
#[cfg(feature = "std")]
pub use audit::MemoryEditLog;
pub use audit::{AuditLog, EditLogOp, NullAuditLog, RetryToken};

// 编排
pub use ec::{ErasureCodingOps, FileStatus, SetOutcome, UnsetOutcome};
