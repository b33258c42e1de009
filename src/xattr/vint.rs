//! 变长整数编码
//!
//! 零压缩的有符号变长整数：
//! - `[-112, 127]` 内的值直接写成一个字节
//! - 否则首字节记录符号与负载长度，随后是大端负载
//!
//! 首字节在 `[-120, -113]` 表示正数，负载长度为 `-112 - b`；
//! 在 `[-128, -121]` 表示负数（负载为按位取反后的值），负载长度为 `-120 - b`。

use alloc::vec::Vec;
use byteorder::{BigEndian, ByteOrder};

use crate::{
    consts::*,
    error::{Error, ErrorKind, Result},
};

/// 根据首字节得到编码总长度（含首字节）
#[inline]
pub fn decode_vint_size(first: i8) -> usize {
    let first = first as i32;
    if first >= VINT_SINGLE_BYTE_MIN as i32 {
        1
    } else if first < VINT_NEGATIVE_BASE as i32 {
        (-119 - first) as usize
    } else {
        (-111 - first) as usize
    }
}

/// 首字节是否表示负数
#[inline]
pub fn is_negative_vint(first: i8) -> bool {
    first < VINT_NEGATIVE_BASE || (first as i64 >= VINT_SINGLE_BYTE_MIN && first < 0)
}

/// 计算编码 `value` 所需的字节数
pub fn vint_size(value: i64) -> usize {
    if (VINT_SINGLE_BYTE_MIN..=VINT_SINGLE_BYTE_MAX).contains(&value) {
        return 1;
    }
    let magnitude = (if value < 0 { !value } else { value }) as u64;
    1 + payload_len(magnitude)
}

#[inline]
fn payload_len(magnitude: u64) -> usize {
    let bits = 64 - magnitude.leading_zeros() as usize;
    (bits + 7) / 8
}

/// 追加编码一个 i64
pub fn write_vlong(out: &mut Vec<u8>, value: i64) {
    if (VINT_SINGLE_BYTE_MIN..=VINT_SINGLE_BYTE_MAX).contains(&value) {
        out.push(value as i8 as u8);
        return;
    }

    let (magnitude, base) = if value < 0 {
        (!value as u64, VINT_NEGATIVE_BASE)
    } else {
        (value as u64, VINT_POSITIVE_BASE)
    };

    let len = payload_len(magnitude);
    out.push((base - len as i8) as u8);

    let mut payload = [0u8; 8];
    BigEndian::write_uint(&mut payload, magnitude, len);
    out.extend_from_slice(&payload[..len]);
}

/// 从缓冲区头部解码一个 i64
///
/// 只接受最短编码，其他写法返回 `CorruptAttribute`。
///
/// # 返回
///
/// `(value, consumed)`，`consumed` 为读取的字节数
pub fn read_vlong(buf: &[u8]) -> Result<(i64, usize)> {
    let first = match buf.first() {
        Some(&b) => b as i8,
        None => {
            return Err(Error::new(
                ErrorKind::CorruptAttribute,
                "empty buffer where a variable-length integer was expected",
            ))
        }
    };

    let len = decode_vint_size(first);
    if len == 1 {
        return Ok((first as i64, 1));
    }

    let payload = buf.get(1..len).ok_or(Error::new(
        ErrorKind::CorruptAttribute,
        "truncated variable-length integer",
    ))?;
    let magnitude = BigEndian::read_uint(payload, len - 1) as i64;

    let negative = is_negative_vint(first);
    let value = if negative { magnitude ^ -1 } else { magnitude };
    if vint_size(value) != len || (value < 0) != negative {
        return Err(Error::new(
            ErrorKind::CorruptAttribute,
            "variable-length integer is not minimally encoded",
        ));
    }
    Ok((value, len))
}

/// 从缓冲区头部解码一个 i32
pub fn read_vint(buf: &[u8]) -> Result<(i32, usize)> {
    let (value, len) = read_vlong(buf)?;
    let value = i32::try_from(value).map_err(|_| {
        Error::new(
            ErrorKind::CorruptAttribute,
            "variable-length integer too long to fit in i32",
        )
    })?;
    Ok((value, len))
}
