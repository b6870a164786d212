//! # 配置模块
//!
//! 位宽在命令行边界处校验一次，此后以 [`BitWidth`] 的形式传入编解码器，不再重复校验。

use crate::constants::{DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH};
use crate::error::{Result, StegoError};
use crate::mask::low_bits;
use std::fmt;
use std::str::FromStr;

/// 每个载体字节使用的最低有效位数，保证在 1..=8 之间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth(u8);

impl BitWidth {
    /// # Errors
    ///
    /// `width` 不在 1..=8 范围内时返回 [`StegoError::InvalidWidth`]。
    pub fn new(width: u8) -> Result<Self> {
        if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            Ok(Self(width))
        } else {
            Err(StegoError::InvalidWidth(width))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 低 `N` 位全为 1 的掩码。
    pub fn mask(self) -> u8 {
        low_bits(self.0)
    }

    /// 掩码取反，保留载体字节的高位。
    pub fn inverted_mask(self) -> u8 {
        !self.mask()
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self(DEFAULT_WIDTH)
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(width: u8) -> Result<Self> {
        Self::new(width)
    }
}

impl FromStr for BitWidth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let width: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a number between 1 and 8"))?;
        Self::new(width).map_err(|e| e.to_string())
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次嵌入或提取操作的配置。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub width: BitWidth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_width_is_one() {
        assert_eq!(BitWidth::default().get(), 1);
        assert_eq!(Config::default().width, BitWidth::default());
    }

    #[test]
    fn parses_widths_in_range() {
        for width in 1..=8u8 {
            let parsed: BitWidth = width.to_string().parse().unwrap();
            assert_eq!(parsed.get(), width);
        }
    }

    #[test]
    fn rejects_widths_out_of_range() {
        assert!("0".parse::<BitWidth>().is_err());
        assert!("9".parse::<BitWidth>().is_err());
        assert!("two".parse::<BitWidth>().is_err());
        assert!(matches!(BitWidth::try_from(42u8), Err(StegoError::InvalidWidth(42))));
    }
}
