//! 错误类型定义
//!
//! 提供纠删码策略操作的错误类型。
//!
//! 与简单的 `&'static str` 消息不同，部分错误需要携带运行时上下文
//! （路径、请求的策略名、当前启用的策略列表），以便调用方无需再次查询
//! 状态就能给出精确的诊断信息。这些上下文放在 [`ErrorContext`] 中。

use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt;

/// 纠删码策略操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
    context: Option<Box<ErrorContext>>,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 目标节点不存在
    NotFound,
    /// 目标不是目录（例如对文件设置策略）
    NotADirectory,
    /// 策略名未知或未启用
    InvalidPolicy,
    /// 属性值无法解码
    CorruptAttribute,
    /// 权限检查失败
    AccessDenied,
    /// 已存在（CREATE 模式下属性已存在，或创建重名节点）
    AlreadyExists,
    /// 无效参数
    InvalidInput,
    /// 获取命名空间锁失败
    LockFailed,
}

/// 错误上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorContext {
    /// 出错的路径
    Path(String),
    /// 策略名未匹配任何启用的策略
    InvalidPolicy {
        /// 请求的策略名
        requested: String,
        /// 调用时刻启用的策略名列表
        enabled: Vec<String>,
        /// 控制启用集合的配置键
        config_key: &'static str,
    },
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            context: None,
        }
    }

    /// 创建带路径的错误
    pub fn with_path(kind: ErrorKind, message: &'static str, path: &str) -> Self {
        Self {
            kind,
            message,
            context: Some(Box::new(ErrorContext::Path(String::from(path)))),
        }
    }

    /// 创建 `InvalidPolicy` 错误
    ///
    /// `enabled` 应为调用时刻 registry 返回的启用列表。
    pub fn invalid_policy(requested: &str, enabled: Vec<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidPolicy,
            message: "policy does not match any enabled erasure coding policies",
            context: Some(Box::new(ErrorContext::InvalidPolicy {
                requested: String::from(requested),
                enabled,
                config_key: crate::consts::DFS_NAMENODE_EC_POLICIES_ENABLED_KEY,
            })),
        }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// 获取错误上下文
    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.as_deref()
    }

    /// 出错的路径（如果有）
    pub fn path(&self) -> Option<&str> {
        match self.context() {
            Some(ErrorContext::Path(path)) => Some(path.as_str()),
            _ => None,
        }
    }

    /// `InvalidPolicy` 错误携带的启用策略名列表
    pub fn enabled_policies(&self) -> Option<&[String]> {
        match self.context() {
            Some(ErrorContext::InvalidPolicy { enabled, .. }) => Some(enabled.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context() {
            None => write!(f, "{:?}: {}", self.kind, self.message),
            Some(ErrorContext::Path(path)) => {
                write!(f, "{:?}: {}: {}", self.kind, self.message, path)
            }
            Some(ErrorContext::InvalidPolicy {
                requested,
                enabled,
                config_key,
            }) => {
                write!(
                    f,
                    "Policy '{}' does not match any enabled erasure coding policies: [",
                    requested
                )?;
                for (i, name) in enabled.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(name)?;
                }
                write!(
                    f,
                    "]. The set of enabled erasure coding policies can be configured at '{}'.",
                    config_key
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result 类型别名
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_invalid_policy_display() {
        let err = Error::invalid_policy(
            "RS-99-1-1024k",
            vec!["RS-6-3-1024k".to_string(), "XOR-2-1-1024k".to_string()],
        );
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
        assert_eq!(
            err.to_string(),
            "Policy 'RS-99-1-1024k' does not match any enabled erasure coding policies: \
             [RS-6-3-1024k, XOR-2-1-1024k]. The set of enabled erasure coding policies \
             can be configured at 'dfs.namenode.ec.policies.enabled'."
        );
        assert_eq!(err.enabled_policies().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_path_context() {
        let err = Error::with_path(ErrorKind::NotFound, "Path not found", "/data");
        assert_eq!(err.path(), Some("/data"));
        assert_eq!(err.to_string(), "NotFound: Path not found: /data");
        assert!(err.enabled_policies().is_none());
    }

    #[test]
    fn test_plain_error() {
        let err = Error::new(ErrorKind::CorruptAttribute, "truncated value");
        assert!(err.context().is_none());
        assert_eq!(err.to_string(), "CorruptAttribute: truncated value");
    }
}
