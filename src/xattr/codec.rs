//! 策略属性值的编解码
//!
//! 属性值格式：变长整数表示的 UTF-8 字节长度，紧跟对应数量的 UTF-8 字节。
//! 其他任何格式都视为损坏。

use alloc::{string::String, vec::Vec};

use crate::{
    consts::XATTR_ERASURECODING_POLICY,
    error::{Error, ErrorKind, Result},
};

use super::{
    feature::Xattr,
    vint::{read_vint, vint_size, write_vlong},
};

/// 编码策略名
///
/// 对任意字符串都成功。
pub fn encode_policy_name(name: &str) -> Vec<u8> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(vint_size(bytes.len() as i64) + bytes.len());
    write_vlong(&mut out, bytes.len() as i64);
    out.extend_from_slice(bytes);
    out
}

/// 解码策略名
///
/// 以下情况返回 `CorruptAttribute`：
/// - 长度前缀本身截断或为负
/// - 声明的长度超过剩余字节
/// - 声明的长度之后仍有多余字节
/// - 内容不是合法 UTF-8
pub fn decode_policy_name(bytes: &[u8]) -> Result<String> {
    let (len, prefix_len) = read_vint(bytes)?;
    if len < 0 {
        return Err(Error::new(
            ErrorKind::CorruptAttribute,
            "negative policy name length",
        ));
    }

    let rest = &bytes[prefix_len..];
    let len = len as usize;
    if rest.len() < len {
        return Err(Error::new(
            ErrorKind::CorruptAttribute,
            "policy name shorter than its declared length",
        ));
    }
    if rest.len() > len {
        return Err(Error::new(
            ErrorKind::CorruptAttribute,
            "trailing bytes after policy name",
        ));
    }

    let name = core::str::from_utf8(rest).map_err(|_| {
        Error::new(ErrorKind::CorruptAttribute, "policy name is not valid UTF-8")
    })?;
    Ok(String::from(name))
}

/// 构造策略属性
pub fn build_policy_xattr(policy_name: &str) -> Xattr {
    Xattr::new(XATTR_ERASURECODING_POLICY, encode_policy_name(policy_name))
}

/// 从策略属性中解码策略名
pub fn decode_policy_xattr(xattr: &Xattr) -> Result<String> {
    if xattr.name() != XATTR_ERASURECODING_POLICY {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "not an erasure coding policy xattr",
        ));
    }
    decode_policy_name(xattr.value())
}
