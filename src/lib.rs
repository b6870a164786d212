//! # lsb_stride 库
//!
//! 本库包含可变位宽 LSB 隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod mask;
pub mod steganography;
