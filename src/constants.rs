/// 消息结束标记 (哨兵字节)。
/// 解码时遇到该值即视为消息结束，因此真实消息中的 `0xFF` 会导致截断。
pub const SENTINEL: u8 = 0xFF;

/// 一个步长 (stride) 所占用的载体字节数。
/// 每个载体字节吸收 `N` 位，8 个字节恰好容纳 `N` 个消息字节。
pub const CARRIER_GROUP: usize = 8;

/// 每个载体字节可修改的最少位数。
pub const MIN_WIDTH: u8 = 1;

/// 每个载体字节可修改的最多位数。
pub const MAX_WIDTH: u8 = 8;

/// 未指定 `-n` 时使用的位宽。
pub const DEFAULT_WIDTH: u8 = 1;
