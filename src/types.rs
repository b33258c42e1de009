//! 数据结构定义
//!
//! 策略、schema 以及节点类型等跨模块共享的类型。

use alloc::{format, string::String};
use core::fmt;

/// 策略 ID
pub type PolicyId = u8;

/// 命名空间中的节点编号
pub type InodeId = usize;

/// 纠删码 schema
///
/// 描述 codec 以及数据块、校验块数量。编解码算法本身不在本 crate 内。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EcSchema {
    /// codec 名（小写，如 "rs"）
    pub codec_name: &'static str,
    /// 数据块数量
    pub num_data_units: u8,
    /// 校验块数量
    pub num_parity_units: u8,
}

impl EcSchema {
    /// 创建 schema
    pub const fn new(codec_name: &'static str, num_data_units: u8, num_parity_units: u8) -> Self {
        Self {
            codec_name,
            num_data_units,
            num_parity_units,
        }
    }
}

/// 纠删码策略
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Policy {
    name: String,
    id: PolicyId,
    schema: EcSchema,
    cell_size: u32,
}

impl Policy {
    /// 根据 schema 与 cell 大小创建策略，名称自动合成
    pub fn new(id: PolicyId, schema: EcSchema, cell_size: u32) -> Self {
        let name = Self::compose_name(&schema, cell_size);
        Self {
            name,
            id,
            schema,
            cell_size,
        }
    }

    /// 合成策略名：`UPPER(codec)-<data>-<parity>-<cell/1024>k`
    pub fn compose_name(schema: &EcSchema, cell_size: u32) -> String {
        format!(
            "{}-{}-{}-{}k",
            schema.codec_name.to_ascii_uppercase(),
            schema.num_data_units,
            schema.num_parity_units,
            cell_size / 1024
        )
    }

    /// 策略名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 策略 ID
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// schema
    pub fn schema(&self) -> &EcSchema {
        &self.schema
    }

    /// cell 大小（字节）
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// 数据块数量
    pub fn num_data_units(&self) -> u8 {
        self.schema.num_data_units
    }

    /// 校验块数量
    pub fn num_parity_units(&self) -> u8 {
        self.schema.num_parity_units
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={})", self.name, self.id)
    }
}

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InodeType {
    /// 目录
    Directory = 1,
    /// 普通文件
    RegularFile = 2,
    /// 符号链接
    Symlink = 3,
}

impl InodeType {
    /// 检查是否为目录
    pub fn is_dir(self) -> bool {
        self == InodeType::Directory
    }

    /// 检查是否为普通文件
    pub fn is_file(self) -> bool {
        self == InodeType::RegularFile
    }

    /// 检查是否为符号链接
    pub fn is_symlink(self) -> bool {
        self == InodeType::Symlink
    }
}

/// 把文件的原始物化 ID 转换为策略 ID（负数表示无策略）
pub fn materialized_policy_id(raw: i8) -> Option<PolicyId> {
    if raw < 0 {
        None
    } else {
        Some(raw as PolicyId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_compose_name() {
        let policy = Policy::new(RS_6_3_POLICY_ID, EcSchema::new(RS_CODEC_NAME, 6, 3), DEFAULT_CELLSIZE);
        assert_eq!(policy.name(), "RS-6-3-1024k");

        let legacy = Policy::new(
            RS_6_3_LEGACY_POLICY_ID,
            EcSchema::new(RS_LEGACY_CODEC_NAME, 6, 3),
            DEFAULT_CELLSIZE,
        );
        assert_eq!(legacy.name(), "RS-LEGACY-6-3-1024k");

        let small = Policy::new(9, EcSchema::new(XOR_CODEC_NAME, 2, 1), 64 * 1024);
        assert_eq!(small.name(), "XOR-2-1-64k");
    }

    #[test]
    fn test_materialized_policy_id() {
        assert_eq!(materialized_policy_id(EC_POLICY_ID_NONE), None);
        assert_eq!(materialized_policy_id(i8::MIN), None);
        assert_eq!(materialized_policy_id(0), Some(0));
        assert_eq!(materialized_policy_id(4), Some(XOR_2_1_POLICY_ID));
    }

    #[test]
    fn test_inode_type_checks() {
        assert!(InodeType::Directory.is_dir());
        assert!(!InodeType::RegularFile.is_dir());

        assert!(InodeType::RegularFile.is_file());
        assert!(!InodeType::Directory.is_file());

        assert!(InodeType::Symlink.is_symlink());
        assert!(!InodeType::RegularFile.is_symlink());
    }
}
