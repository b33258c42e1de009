//! 扩展属性 (Extended Attributes)
//!
//! 本 crate 只拥有一个属性：键名固定为 `erasurecoding.policy`，值为编码后的策略名。
//!
//! # 模块结构
//!
//! - `vint` - 变长整数编码
//! - `codec` - 策略名的长度前缀 UTF-8 编解码
//! - `feature` - 节点上的属性集合、写入模式以及 [`AttributeStore`] 抽象
//!
//! # 使用示例
//!
//! ```rust
//! use ecpolicy_core::xattr::{decode_policy_name, encode_policy_name};
//!
//! let bytes = encode_policy_name("RS-6-3-1024k");
//! assert_eq!(decode_policy_name(&bytes).unwrap(), "RS-6-3-1024k");
//! ```

pub mod vint;
mod codec;
mod feature;

pub use codec::{build_policy_xattr, decode_policy_name, decode_policy_xattr, encode_policy_name};
pub use feature::{AttributeStore, Xattr, XattrFeature, XattrSetFlags};
