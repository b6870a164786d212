//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行结构。位置参数的数量决定模式：
//! 三个参数为嵌入，两个参数为提取。

use crate::config::{BitWidth, Config};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// 一款可变位宽的 LSB (最低有效位) 隐写工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或提取任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    override_usage = "lsb_stride [-n <BITS>] <MESSAGE> <INPUT_IMAGE> <OUTPUT_IMAGE>\n       lsb_stride [-n <BITS>] <INPUT_IMAGE> <OUTPUT_FILE>"
)]
pub struct Cli {
    /// 每个像素通道修改的最低有效位数 (1-8)。嵌入和提取必须使用相同的值。
    #[arg(short = 'n', long = "bits", value_name = "BITS", default_value_t = BitWidth::default())]
    pub width: BitWidth,

    /// 嵌入: <MESSAGE> <INPUT_IMAGE> <OUTPUT_IMAGE>；提取: <INPUT_IMAGE> <OUTPUT_FILE>。
    #[arg(value_name = "PATHS", num_args = 2..=3, required = true)]
    pub paths: Vec<PathBuf>,
}

/// 由位置参数数量选出的操作。
#[derive(Debug)]
pub enum Commands {
    /// 将消息文件隐藏到图像中。
    Embed(EmbedArgs),

    /// 从经过隐写的图像中提取消息。
    Extract(ExtractArgs),
}

/// 嵌入操作所需的参数。
#[derive(Debug, Clone)]
pub struct EmbedArgs {
    /// 要隐藏的消息文件路径。
    pub message: PathBuf,

    /// 用于隐写的输入图像路径。
    pub image: PathBuf,

    /// 隐写完成后保存结果图像的路径。
    pub dest: PathBuf,

    pub config: Config,
}

/// 提取操作所需的参数。
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    /// 已隐藏消息的图像路径。
    pub image: PathBuf,

    /// 保存提取结果的文件路径。
    pub output: PathBuf,

    pub config: Config,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config { width: self.width }
    }

    /// 根据位置参数的数量确定操作。
    ///
    /// # Errors
    ///
    /// 参数数量既不是 2 也不是 3 时返回带用法说明的 `clap` 错误。
    pub fn into_command(self) -> Result<Commands, clap::Error> {
        let config = self.config();
        let mut paths = self.paths.into_iter();
        match (paths.next(), paths.next(), paths.next(), paths.next()) {
            (Some(message), Some(image), Some(dest), None) => Ok(Commands::Embed(EmbedArgs {
                message,
                image,
                dest,
                config,
            })),
            (Some(image), Some(output), None, None) => Ok(Commands::Extract(ExtractArgs {
                image,
                output,
                config,
            })),
            _ => Err(Cli::command().error(
                ErrorKind::WrongNumberOfValues,
                "expected either 3 paths (embed) or 2 paths (extract)",
            )),
        }
    }
}
