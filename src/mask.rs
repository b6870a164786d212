//! # 掩码构造模块
//!
//! 生成低位掩码及其按字节取反的形式。

use crate::config::BitWidth;
use crate::error::Result;

/// 返回 `2^width - 1`。
///
/// # Errors
///
/// `width` 不在 1..=8 范围内时返回 [`StegoError::InvalidWidth`](crate::error::StegoError::InvalidWidth)。
pub fn mask(width: u8) -> Result<u8> {
    BitWidth::new(width).map(BitWidth::mask)
}

/// 返回 `0xFF & !mask(width)`，用于保留载体字节的高 `8 - width` 位。
///
/// # Errors
///
/// 与 [`mask`] 相同。
pub fn inverted_mask(width: u8) -> Result<u8> {
    BitWidth::new(width).map(BitWidth::inverted_mask)
}

pub(crate) const fn low_bits(width: u8) -> u8 {
    ((1u16 << width) - 1) as u8
}
