//! 纠删码策略核心逻辑
//!
//! # 模块结构
//!
//! - `resolver` - 沿路径回溯，求节点的生效策略
//! - `mutator` - 目录上显式策略属性的写入与删除
//! - `status` - 节点状态快照
//! - `ops` - 加锁、权限检查、审计的编排层 [`ErasureCodingOps`]
//!
//! `resolver`、`mutator`、`status` 中的函数假定调用方已经持有合适的锁，
//! 直接借用树；`ops` 负责获取与释放锁。

mod mutator;
mod ops;
mod resolver;
mod status;

pub use mutator::{enabled_policy, remove_policy_xattr, set_policy_xattr, PolicyXattrWrite};
pub use ops::{ErasureCodingOps, SetOutcome, UnsetOutcome};
pub use resolver::{has_policy, lookup_explicit_xattr, resolve_policy};
pub use status::{file_status, FileStatus};
