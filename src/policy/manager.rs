//! 策略注册表
//!
//! [`PolicyRegistry`] 是核心逻辑消费的接口；[`ErasureCodingPolicyManager`] 是一个
//! 内存实现，已知所有系统策略，并维护其中被启用的子集。

use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};

use crate::{
    config::EcConfig,
    error::{Error, ErrorKind, Result},
    types::{Policy, PolicyId},
};

use super::system;

/// 策略注册表接口
pub trait PolicyRegistry {
    /// 按名称查找启用的策略
    fn lookup_enabled_by_name(&self, name: &str) -> Option<Policy>;

    /// 按 id 查找已知策略（不论是否启用）
    fn lookup_by_id(&self, id: PolicyId) -> Option<Policy>;

    /// 所有启用的策略，顺序稳定
    fn list_enabled(&self) -> Vec<Policy>;

    /// 启用策略的名称列表
    fn enabled_names(&self) -> Vec<String> {
        self.list_enabled()
            .iter()
            .map(|p| String::from(p.name()))
            .collect()
    }
}

impl<R: PolicyRegistry + ?Sized> PolicyRegistry for &R {
    fn lookup_enabled_by_name(&self, name: &str) -> Option<Policy> {
        (**self).lookup_enabled_by_name(name)
    }

    fn lookup_by_id(&self, id: PolicyId) -> Option<Policy> {
        (**self).lookup_by_id(id)
    }

    fn list_enabled(&self) -> Vec<Policy> {
        (**self).list_enabled()
    }
}

/// 内存策略管理器
#[derive(Debug, Clone)]
pub struct ErasureCodingPolicyManager {
    policies: BTreeMap<PolicyId, Policy>,
    enabled: BTreeSet<PolicyId>,
}

impl ErasureCodingPolicyManager {
    /// 已知所有系统策略，全部未启用
    pub fn new() -> Self {
        let policies = system::system_policies()
            .into_iter()
            .map(|p| (p.id(), p))
            .collect();
        Self {
            policies,
            enabled: BTreeSet::new(),
        }
    }

    /// 按配置启用策略
    ///
    /// 配置中出现未知策略名时返回 `InvalidPolicy`。
    pub fn from_config(config: &EcConfig) -> Result<Self> {
        let mut manager = Self::new();
        for name in &config.enabled_policies {
            manager.enable_policy(name)?;
        }
        log::debug!(
            "[EC] policy manager initialized, enabled: {:?}",
            manager.enabled_names()
        );
        Ok(manager)
    }

    fn find_by_name(&self, name: &str) -> Option<&Policy> {
        self.policies.values().find(|p| p.name() == name)
    }

    fn unknown_policy(&self, name: &str) -> Error {
        Error::invalid_policy(name, self.enabled_names())
    }

    /// 注册自定义策略
    pub fn add_policy(&mut self, policy: Policy) -> Result<()> {
        if self.policies.contains_key(&policy.id()) || self.find_by_name(policy.name()).is_some() {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                "erasure coding policy already registered",
            ));
        }
        log::debug!("[EC] added policy {}", policy);
        self.policies.insert(policy.id(), policy);
        Ok(())
    }

    /// 启用策略；重复启用无影响
    pub fn enable_policy(&mut self, name: &str) -> Result<()> {
        let id = self
            .find_by_name(name)
            .map(Policy::id)
            .ok_or_else(|| self.unknown_policy(name))?;
        if self.enabled.insert(id) {
            log::debug!("[EC] enabled policy {}", name);
        }
        Ok(())
    }

    /// 禁用策略
    ///
    /// 已写入目录的属性不受影响，但之后的解析会得到“无策略”。
    ///
    /// # 返回
    ///
    /// 策略此前是否处于启用状态
    pub fn disable_policy(&mut self, name: &str) -> Result<bool> {
        let id = self
            .find_by_name(name)
            .map(Policy::id)
            .ok_or_else(|| self.unknown_policy(name))?;
        let was_enabled = self.enabled.remove(&id);
        if was_enabled {
            log::debug!("[EC] disabled policy {}", name);
        }
        Ok(was_enabled)
    }

    /// 所有已知策略
    pub fn all_policies(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values()
    }
}

impl Default for ErasureCodingPolicyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRegistry for ErasureCodingPolicyManager {
    fn lookup_enabled_by_name(&self, name: &str) -> Option<Policy> {
        self.find_by_name(name)
            .filter(|p| self.enabled.contains(&p.id()))
            .cloned()
    }

    fn lookup_by_id(&self, id: PolicyId) -> Option<Policy> {
        self.policies.get(&id).cloned()
    }

    fn list_enabled(&self) -> Vec<Policy> {
        self.enabled
            .iter()
            .filter_map(|id| self.policies.get(id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::*,
        types::EcSchema,
    };

    #[test]
    fn test_new_has_nothing_enabled() {
        let manager = ErasureCodingPolicyManager::new();
        assert!(manager.list_enabled().is_empty());
        assert!(manager.lookup_enabled_by_name("RS-6-3-1024k").is_none());
        assert_eq!(manager.all_policies().count(), 5);
        // 未启用的策略仍可按 id 查到
        assert_eq!(
            manager.lookup_by_id(RS_6_3_POLICY_ID).unwrap().name(),
            "RS-6-3-1024k"
        );
    }

    #[test]
    fn test_from_config() {
        let config = EcConfig::with_enabled("XOR-2-1-1024k,RS-6-3-1024k");
        let manager = ErasureCodingPolicyManager::from_config(&config).unwrap();
        // 按 id 排序，与配置顺序无关
        assert_eq!(manager.enabled_names(), ["RS-6-3-1024k", "XOR-2-1-1024k"]);

        let config = EcConfig::with_enabled("RS-6-3-1024k,NOPE-1-1-1k");
        let err = ErasureCodingPolicyManager::from_config(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
    }

    #[test]
    fn test_enable_disable() {
        let mut manager = ErasureCodingPolicyManager::new();
        manager.enable_policy("RS-3-2-1024k").unwrap();
        manager.enable_policy("RS-3-2-1024k").unwrap();
        assert_eq!(manager.list_enabled().len(), 1);

        assert!(manager.disable_policy("RS-3-2-1024k").unwrap());
        assert!(!manager.disable_policy("RS-3-2-1024k").unwrap());
        assert!(manager.lookup_enabled_by_name("RS-3-2-1024k").is_none());

        let err = manager.enable_policy("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
        assert_eq!(err.enabled_policies().unwrap().len(), 0);
    }

    #[test]
    fn test_add_policy() {
        let mut manager = ErasureCodingPolicyManager::new();
        let custom = Policy::new(64, EcSchema::new(RS_CODEC_NAME, 12, 4), 256 * 1024);
        manager.add_policy(custom.clone()).unwrap();
        manager.enable_policy("RS-12-4-256k").unwrap();
        assert_eq!(manager.lookup_enabled_by_name("RS-12-4-256k"), Some(custom.clone()));

        let err = manager.add_policy(custom).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let clash = Policy::new(RS_6_3_POLICY_ID, EcSchema::new(XOR_CODEC_NAME, 3, 1), DEFAULT_CELLSIZE);
        assert_eq!(manager.add_policy(clash).unwrap_err().kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_registry_by_reference() {
        let manager = ErasureCodingPolicyManager::from_config(&EcConfig::default()).unwrap();
        let registry: &dyn PolicyRegistry = &manager;
        assert_eq!(registry.enabled_names(), ["RS-6-3-1024k"]);
    }
}
