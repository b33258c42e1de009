//! 纠删码策略
//!
//! - `system` - 系统内置策略表
//! - `manager` - [`PolicyRegistry`] 接口与内存实现 [`ErasureCodingPolicyManager`]

pub mod system;
mod manager;

pub use manager::{ErasureCodingPolicyManager, PolicyRegistry};
