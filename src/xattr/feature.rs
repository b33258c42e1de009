//! 节点上的扩展属性存储
//!
//! - [`Xattr`] - 单个 name/value 对
//! - [`XattrSetFlags`] - 写入模式（CREATE / REPLACE）
//! - [`XattrFeature`] - 挂在单个节点上的属性集合
//! - [`AttributeStore`] - 按节点编号访问属性的抽象，与具体的树节点表示解耦

use alloc::{string::String, vec::Vec};
use bitflags::bitflags;

use crate::{
    error::{Error, ErrorKind, Result},
    types::InodeId,
};

/// 扩展属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xattr {
    name: String,
    value: Vec<u8>,
}

impl Xattr {
    /// 创建属性
    pub fn new(name: &str, value: Vec<u8>) -> Self {
        Self {
            name: String::from(name),
            value,
        }
    }

    /// 属性名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 属性值
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

bitflags! {
    /// 属性写入模式
    ///
    /// 两者都设置时表示“存在则替换，不存在则创建”。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct XattrSetFlags: u8 {
        /// 仅允许创建（属性必须不存在）
        const CREATE  = 0x01;
        /// 仅允许替换（属性必须已存在）
        const REPLACE = 0x02;
    }
}

impl XattrSetFlags {
    /// 根据属性是否已存在检查写入模式
    pub fn validate(self, exists: bool) -> Result<()> {
        if exists && !self.contains(XattrSetFlags::REPLACE) {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                "xattr already exists and REPLACE was not requested",
            ));
        }
        if !exists && !self.contains(XattrSetFlags::CREATE) {
            return Err(Error::new(
                ErrorKind::NotFound,
                "xattr does not exist and CREATE was not requested",
            ));
        }
        Ok(())
    }
}

/// 单个节点的扩展属性集合
///
/// 同名属性最多一个。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XattrFeature {
    xattrs: Vec<Xattr>,
}

impl XattrFeature {
    /// 空集合
    pub const fn new() -> Self {
        Self { xattrs: Vec::new() }
    }

    /// 按名称查找
    pub fn get(&self, name: &str) -> Option<&Xattr> {
        self.xattrs.iter().find(|x| x.name() == name)
    }

    /// 写入属性
    pub fn set(&mut self, xattr: Xattr, flags: XattrSetFlags) -> Result<()> {
        let pos = self.xattrs.iter().position(|x| x.name() == xattr.name());
        flags.validate(pos.is_some())?;

        match pos {
            Some(pos) => self.xattrs[pos] = xattr,
            None => self.xattrs.push(xattr),
        }
        Ok(())
    }

    /// 删除属性，返回被删除的值
    pub fn remove(&mut self, name: &str) -> Option<Xattr> {
        let pos = self.xattrs.iter().position(|x| x.name() == name)?;
        Some(self.xattrs.remove(pos))
    }

    /// 所有属性
    pub fn xattrs(&self) -> &[Xattr] {
        &self.xattrs
    }

    /// 同名属性的数量
    pub fn count(&self, name: &str) -> usize {
        self.xattrs.iter().filter(|x| x.name() == name).count()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.xattrs.is_empty()
    }
}

/// 按节点访问扩展属性
///
/// 调用方负责持有合适的命名空间锁：读操作需要读锁，`put_xattr` 与
/// `remove_xattr` 需要写锁（`&mut self` 已经表达了这一点）。
pub trait AttributeStore {
    /// 读取节点上的属性
    fn get_xattr(&self, inode: InodeId, name: &str) -> Option<&Xattr>;

    /// 写入属性，`flags` 决定 CREATE / REPLACE 语义
    fn put_xattr(&mut self, inode: InodeId, xattr: Xattr, flags: XattrSetFlags) -> Result<()>;

    /// 删除属性；不存在时返回 `Ok(None)`
    fn remove_xattr(&mut self, inode: InodeId, name: &str) -> Result<Option<Xattr>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_validate_flags() {
        assert!(XattrSetFlags::CREATE.validate(false).is_ok());
        assert_eq!(
            XattrSetFlags::CREATE.validate(true).unwrap_err().kind(),
            ErrorKind::AlreadyExists
        );
        assert!(XattrSetFlags::REPLACE.validate(true).is_ok());
        assert_eq!(
            XattrSetFlags::REPLACE.validate(false).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        let both = XattrSetFlags::CREATE | XattrSetFlags::REPLACE;
        assert!(both.validate(true).is_ok());
        assert!(both.validate(false).is_ok());
    }

    #[test]
    fn test_feature_create_then_replace() {
        let mut feature = XattrFeature::new();
        feature
            .set(Xattr::new("user.a", vec![1]), XattrSetFlags::CREATE)
            .unwrap();
        assert_eq!(feature.get("user.a").unwrap().value(), &[1]);

        // 重复 CREATE 失败，值不变
        let err = feature
            .set(Xattr::new("user.a", vec![2]), XattrSetFlags::CREATE)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(feature.get("user.a").unwrap().value(), &[1]);

        feature
            .set(Xattr::new("user.a", vec![3]), XattrSetFlags::REPLACE)
            .unwrap();
        assert_eq!(feature.count("user.a"), 1);
        assert_eq!(feature.get("user.a").unwrap().value(), &[3]);
    }

    #[test]
    fn test_feature_remove() {
        let mut feature = XattrFeature::new();
        assert!(feature.remove("user.a").is_none());

        feature
            .set(Xattr::new("user.a", vec![1]), XattrSetFlags::CREATE)
            .unwrap();
        feature
            .set(Xattr::new("user.b", vec![2]), XattrSetFlags::CREATE)
            .unwrap();

        let removed = feature.remove("user.a").unwrap();
        assert_eq!(removed.name(), "user.a");
        assert!(feature.get("user.a").is_none());
        assert_eq!(feature.xattrs().len(), 1);
        assert!(!feature.is_empty());
    }
}
