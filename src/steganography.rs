//! # 隐写编解码模块
//!
//! 将消息按 `N` 位一组写入载体字节的最低有效位，并以哨兵字节 `0xFF` 标记消息结束。
//!
//! 每 `N` 个消息字节 (一个步长) 拼成一个 `8 * N` 位的整数，低字节在低位，
//! 再切成 8 个 `N` 位的片段依次写入 8 个载体字节。

use crate::config::BitWidth;
use crate::constants::{CARRIER_GROUP, SENTINEL};
use crate::error::{Result, StegoError};
use log::{debug, trace, warn};
use std::io::{Read, Write};

/// 嵌入 `len` 字节消息 (加上哨兵) 所需的载体字节数。
pub fn required_carrier_bytes(len: usize, width: BitWidth) -> usize {
    ((len + 1) * 8).div_ceil(width.get() as usize)
}

/// 长度为 `carrier_len` 的载体最多能容纳的消息字节数。
///
/// 如果连空消息的哨兵都放不下，返回 `None`。
pub fn max_payload_bytes(carrier_len: usize, width: BitWidth) -> Option<usize> {
    (carrier_len * width.get() as usize / 8).checked_sub(1)
}

/// 将 `payload` 嵌入 `carrier` 的低 `width` 位，返回被写入的载体字节数。
///
/// 载体字节的高 `8 - width` 位保持不变。消息流结束时总会追加一个哨兵字节，
/// 因此空消息也会占用载体空间。
///
/// # Errors
///
/// * 读取消息失败时返回 [`StegoError::SourceUnavailable`]。
/// * 载体空间不足时返回 [`StegoError::CapacityExceeded`]。此时载体已被部分修改，不能保存。
pub fn encode<R: Read>(mut payload: R, carrier: &mut [u8], width: BitWidth) -> Result<usize> {
    let n = width.get() as usize;
    let mask = width.mask();
    let inverted_mask = width.inverted_mask();

    let mut cursor = 0usize;
    let mut chunk = Vec::with_capacity(n + 1);

    loop {
        chunk.clear();
        payload
            .by_ref()
            .take(n as u64)
            .read_to_end(&mut chunk)
            .map_err(StegoError::SourceUnavailable)?;

        let last = chunk.len() < n;
        if last {
            chunk.push(SENTINEL);
        }

        let lane = pack(&chunk);
        let slices = (chunk.len() * 8).div_ceil(n);
        trace!("packing {} bytes into {slices} carrier bytes at {cursor}", chunk.len());

        for i in 0..slices {
            let Some(byte) = carrier.get_mut(cursor) else {
                return Err(StegoError::CapacityExceeded {
                    available: carrier.len(),
                });
            };
            let value = (lane >> (n * i)) as u8 & mask;
            *byte = (*byte & inverted_mask) | value;
            cursor += 1;
        }

        if last {
            break;
        }
    }

    debug!(
        "embedded message into {cursor} of {} carrier bytes (width {width})",
        carrier.len()
    );
    Ok(cursor)
}

/// 从 `carrier` 中提取消息写入 `out`，返回写出的字节数。
///
/// 遇到哨兵字节即停止；载体耗尽仍未遇到哨兵时，输出已解出的全部内容，不视为错误。
/// 位宽与嵌入时不一致会得到无意义的数据，这一点无法被检测。
///
/// # Errors
///
/// 写入或刷新 `out` 失败时返回 [`StegoError::WriteFailure`]。
pub fn decode<W: Write>(carrier: &[u8], width: BitWidth, mut out: W) -> Result<usize> {
    let n = width.get() as usize;
    let mask = width.mask();
    let mut written = 0usize;

    for group in carrier.chunks(CARRIER_GROUP) {
        let lane = group
            .iter()
            .enumerate()
            .fold(0u64, |lane, (i, &byte)| lane | (u64::from(byte & mask) << (n * i)));

        // 末尾不足 8 字节的分组只包含完整覆盖的输出字节
        let complete = (group.len() * n / 8).min(n);
        let bytes = lane.to_le_bytes();
        let extracted = &bytes[..complete];

        match extracted.iter().position(|&b| b == SENTINEL) {
            Some(end) => {
                out.write_all(&extracted[..end])
                    .map_err(StegoError::WriteFailure)?;
                written += end;
                out.flush().map_err(StegoError::WriteFailure)?;
                debug!("found end of message after {written} bytes (width {width})");
                return Ok(written);
            }
            None => {
                out.write_all(extracted).map_err(StegoError::WriteFailure)?;
                written += extracted.len();
            }
        }
    }

    out.flush().map_err(StegoError::WriteFailure)?;
    warn!("carrier exhausted without an end-of-message marker, {written} bytes recovered");
    Ok(written)
}

/// [`decode`] 的便捷形式，直接返回提取出的字节。
pub fn decode_to_vec(carrier: &[u8], width: BitWidth) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    decode(carrier, width, &mut payload)?;
    Ok(payload)
}

fn pack(chunk: &[u8]) -> u64 {
    chunk
        .iter()
        .rev()
        .fold(0u64, |lane, &byte| (lane << 8) | u64::from(byte))
}
