//! 配置
//!
//! 启用策略集合由配置键 `dfs.namenode.ec.policies.enabled` 给出，值为逗号分隔的策略名。

use alloc::{string::String, vec::Vec};

use crate::consts::DFS_NAMENODE_EC_POLICIES_ENABLED_DEFAULT;

/// 纠删码策略配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcConfig {
    /// 启用的策略名
    pub enabled_policies: Vec<String>,
    /// 是否执行权限检查
    pub permissions_enabled: bool,
}

impl EcConfig {
    /// 解析配置值
    ///
    /// 去除每项两端空白，忽略空项。
    ///
    /// ```rust
    /// use ecpolicy_core::EcConfig;
    ///
    /// let names = EcConfig::parse_enabled(" RS-6-3-1024k, ,XOR-2-1-1024k ");
    /// assert_eq!(names, ["RS-6-3-1024k", "XOR-2-1-1024k"]);
    /// ```
    pub fn parse_enabled(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// 由配置值构造（权限检查开启）
    pub fn with_enabled(value: &str) -> Self {
        Self {
            enabled_policies: Self::parse_enabled(value),
            ..Self::default()
        }
    }
}

impl Default for EcConfig {
    fn default() -> Self {
        Self {
            enabled_policies: Self::parse_enabled(DFS_NAMENODE_EC_POLICIES_ENABLED_DEFAULT),
            permissions_enabled: true,
        }
    }
}
