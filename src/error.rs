//! # 错误类型模块
//!
//! 隐写核心返回的结构化错误。命令行层用 `anyhow` 为其附加文件路径等上下文。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// 位宽不在 1..=8 范围内。在修改任何载体字节之前返回。
    #[error("Invalid bit width {0}: must be between 1 and 8")]
    InvalidWidth(u8),

    /// 消息 (含哨兵) 需要的载体字节超过了载体长度。载体已被部分修改，调用方必须丢弃。
    #[error("Message too big for the carrier ({available} bytes available)")]
    CapacityExceeded { available: usize },

    /// 消息文件或载体图像无法打开、读取或解码。
    #[error("Source unavailable")]
    SourceUnavailable(#[source] io::Error),

    /// 路径不是无损的光栅图像格式。
    #[error("Unsupported container format: {0} (expected a lossless image such as PNG or BMP)")]
    UnsupportedContainerFormat(PathBuf),

    /// 输出写入不完整，或刷新/关闭失败。
    #[error("Write failure")]
    WriteFailure(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
