//! 系统内置策略
//!
//! | id | 名称 | codec | 数据 | 校验 |
//! |----|------|-------|------|------|
//! | 1 | RS-6-3-1024k | rs | 6 | 3 |
//! | 2 | RS-3-2-1024k | rs | 3 | 2 |
//! | 3 | RS-LEGACY-6-3-1024k | rs-legacy | 6 | 3 |
//! | 4 | XOR-2-1-1024k | xor | 2 | 1 |
//! | 5 | RS-10-4-1024k | rs | 10 | 4 |

use alloc::vec::Vec;

use crate::{
    consts::*,
    types::{EcSchema, Policy, PolicyId},
};

/// 系统策略定义：(id, codec, 数据块, 校验块)
static SYSTEM_POLICY_TABLE: &[(PolicyId, &str, u8, u8)] = &[
    (RS_6_3_POLICY_ID, RS_CODEC_NAME, 6, 3),
    (RS_3_2_POLICY_ID, RS_CODEC_NAME, 3, 2),
    (RS_6_3_LEGACY_POLICY_ID, RS_LEGACY_CODEC_NAME, 6, 3),
    (XOR_2_1_POLICY_ID, XOR_CODEC_NAME, 2, 1),
    (RS_10_4_POLICY_ID, RS_CODEC_NAME, 10, 4),
];

/// 所有系统策略，按 id 升序
pub fn system_policies() -> Vec<Policy> {
    SYSTEM_POLICY_TABLE
        .iter()
        .map(|&(id, codec, data, parity)| {
            Policy::new(id, EcSchema::new(codec, data, parity), DEFAULT_CELLSIZE)
        })
        .collect()
}
