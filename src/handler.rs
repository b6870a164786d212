//! # 命令处理逻辑模块
//!
//! 包含嵌入与提取两种操作的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::{Carrier, lossless_format};
use crate::cli::{EmbedArgs, ExtractArgs};
use crate::error::StegoError;
use crate::steganography::{decode, encode, max_payload_bytes, required_carrier_bytes};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// 处理嵌入操作。
///
/// 先校验输出路径为无损格式，再加载载体图像、打开消息文件、检查空间是否足够，
/// 最后写入消息并保存结果图像。任何一步失败都不会保存输出图像。
///
/// # Arguments
///
/// * `args` - 包含消息、输入图像、输出图像路径以及位宽的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输入或输出图像不是无损格式。
/// * 无法读取消息文件或输入图像。
/// * 图像没有足够的空间来隐藏消息。
/// * 无法写入目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let width = args.config.width;

    lossless_format(&args.dest).with_context(|| {
        format!(
            "Refusing to write output image: {}",
            args.dest.to_string_lossy().red().bold()
        )
    })?;

    let mut carrier = Carrier::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let message = File::open(&args.message)
        .map_err(StegoError::SourceUnavailable)
        .with_context(|| {
            format!(
                "Unable to read message file: {}",
                args.message.to_string_lossy().red().bold()
            )
        })?;

    let message_len = message
        .metadata()
        .map_err(StegoError::SourceUnavailable)
        .with_context(|| {
            format!(
                "Unable to read message file: {}",
                args.message.to_string_lossy().red().bold()
            )
        })?
        .len() as usize;

    let available = carrier.bytes().len();
    let required = required_carrier_bytes(message_len, width);
    if required > available {
        let max = max_payload_bytes(available, width).unwrap_or(0);
        return Err(StegoError::CapacityExceeded { available }).with_context(|| {
            format!(
                "Not enough space in the image to hide the message. \nRequired: {} carrier bytes, Available: {} (at most {} message bytes with {width} bits)",
                required.to_string().red().bold(),
                available.to_string().green().bold(),
                max.to_string().green().bold()
            )
        });
    }

    let written = encode(BufReader::new(message), carrier.bytes_mut(), width).with_context(|| {
        format!(
            "Failed to hide '{}' in the image. \nThe output image has not been saved.",
            args.message.to_string_lossy().red().bold()
        )
    })?;
    info!("wrote {written} of {available} carrier bytes with {width} bits per channel");

    carrier.save(&args.dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            args.dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully hidden and saved: {}",
        args.dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理提取操作。
///
/// 加载经过隐写的图像，按相同位宽提取消息直到遇到结束标记，并写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入图像、输出文件路径以及位宽的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输入图像不是无损格式或无法读取。
/// * 无法创建目标文件。
/// * 写入或刷新目标文件失败。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let width = args.config.width;

    let carrier = Carrier::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let output = File::create(&args.output)
        .map_err(StegoError::WriteFailure)
        .with_context(|| {
            format!(
                "Unable to create output file: {}",
                args.output.to_string_lossy().red().bold()
            )
        })?;

    let mut writer = BufWriter::new(output);
    let recovered = decode(carrier.bytes(), width, &mut writer).with_context(|| {
        format!(
            "Failed to write the recovered message to: {}",
            args.output.to_string_lossy().red().bold()
        )
    })?;

    writer
        .into_inner()
        .map_err(|e| StegoError::WriteFailure(e.into_error()))
        .and_then(|file| file.sync_all().map_err(StegoError::WriteFailure))
        .with_context(|| {
            format!(
                "Unable to finish writing output file: {}",
                args.output.to_string_lossy().red().bold()
            )
        })?;
    info!("recovered {recovered} bytes with {width} bits per channel");

    println!(
        "The message has been successfully recovered and saved: {}",
        args.output.to_string_lossy().green().bold()
    );
    Ok(())
}
