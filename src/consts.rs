//! 纠删码策略常量定义
//!
//! 这个模块包含了：
//! - 扩展属性键名
//! - 配置键
//! - 系统策略 ID 与 schema 参数
//! - 变长整数编码常量

//=============================================================================
// 扩展属性
//=============================================================================

/// 纠删码策略属性的固定键名
pub const XATTR_ERASURECODING_POLICY: &str = "erasurecoding.policy";

//=============================================================================
// 配置
//=============================================================================

/// 启用策略集合的配置键
pub const DFS_NAMENODE_EC_POLICIES_ENABLED_KEY: &str = "dfs.namenode.ec.policies.enabled";

/// 启用策略集合的默认值
pub const DFS_NAMENODE_EC_POLICIES_ENABLED_DEFAULT: &str = "RS-6-3-1024k";

//=============================================================================
// 策略 ID
//=============================================================================

/// 文件未物化任何策略时的原始 ID
pub const EC_POLICY_ID_NONE: i8 = -1;

/// RS-6-3-1024k
pub const RS_6_3_POLICY_ID: u8 = 1;

/// RS-3-2-1024k
pub const RS_3_2_POLICY_ID: u8 = 2;

/// RS-LEGACY-6-3-1024k
pub const RS_6_3_LEGACY_POLICY_ID: u8 = 3;

/// XOR-2-1-1024k
pub const XOR_2_1_POLICY_ID: u8 = 4;

/// RS-10-4-1024k
pub const RS_10_4_POLICY_ID: u8 = 5;

//=============================================================================
// Codec 与 cell 大小
//=============================================================================

/// Reed-Solomon codec
pub const RS_CODEC_NAME: &str = "rs";

/// 旧版 Reed-Solomon codec
pub const RS_LEGACY_CODEC_NAME: &str = "rs-legacy";

/// XOR codec
pub const XOR_CODEC_NAME: &str = "xor";

/// 系统策略默认 cell 大小（1 MiB）
pub const DEFAULT_CELLSIZE: u32 = 1024 * 1024;

//=============================================================================
// 变长整数编码
//=============================================================================

/// 单字节即可表示的最小值
pub const VINT_SINGLE_BYTE_MIN: i64 = -112;

/// 单字节即可表示的最大值
pub const VINT_SINGLE_BYTE_MAX: i64 = 127;

/// 正数多字节编码的首字节基准
pub const VINT_POSITIVE_BASE: i8 = -112;

/// 负数多字节编码的首字节基准
pub const VINT_NEGATIVE_BASE: i8 = -120;

/// 变长整数最大字节数（首字节 + 8 字节负载）
pub const VINT_MAX_LEN: usize = 9;
