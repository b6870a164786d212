//! # 载体图像模块
//!
//! 将无损图像加载为一段连续、定长、可变的像素通道字节缓冲区，并在隐写后保存回去。
//!
//! 像素统一转换为 8 位 RGBA，按行优先排列，每个像素依次为 R、G、B、A 四个字节。

use crate::error::{Result, StegoError};
use image::{ImageError, ImageFormat, RgbaImage};
use log::debug;
use std::io::{self, ErrorKind};
use std::path::Path;

/// 每个像素的通道数。
pub const CHANNELS: u8 = 4;

/// 检查路径扩展名是否对应无损格式，并返回该格式。
///
/// 有损格式 (如 JPEG) 会在保存时破坏隐藏的数据，因此直接拒绝。
///
/// # Errors
///
/// 扩展名缺失、未知或属于有损格式时返回 [`StegoError::UnsupportedContainerFormat`]。
pub fn lossless_format(path: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(path) {
        Ok(
            format @ (ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Qoi),
        ) => Ok(format),
        _ => Err(StegoError::UnsupportedContainerFormat(path.to_path_buf())),
    }
}

/// 以像素通道字节作为隐写载体的图像。
#[derive(Debug, Clone)]
pub struct Carrier {
    pixels: RgbaImage,
}

impl Carrier {
    /// 从无损图像文件加载载体。
    ///
    /// # Errors
    ///
    /// * 扩展名不是无损格式时返回 [`StegoError::UnsupportedContainerFormat`]。
    /// * 文件无法打开或解码时返回 [`StegoError::SourceUnavailable`]。
    pub fn load(path: &Path) -> Result<Self> {
        let format = lossless_format(path)?;
        let pixels = image::ImageReader::open(path)
            .map_err(StegoError::SourceUnavailable)?
            .with_guessed_format()
            .map_err(StegoError::SourceUnavailable)?
            .decode()
            .map_err(|e| StegoError::SourceUnavailable(into_io(e)))?
            .to_rgba8();

        let (width, height) = pixels.dimensions();
        debug!("loaded {format:?} carrier {width}x{height} from {}", path.display());
        Ok(Self { pixels })
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// 按扩展名对应的无损格式保存载体。
    ///
    /// # Errors
    ///
    /// * 扩展名不是无损格式时返回 [`StegoError::UnsupportedContainerFormat`]。
    /// * 编码或写入失败时返回 [`StegoError::WriteFailure`]。
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = lossless_format(path)?;
        self.pixels
            .save_with_format(path, format)
            .map_err(|e| StegoError::WriteFailure(into_io(e)))?;
        debug!("saved {format:?} carrier to {}", path.display());
        Ok(())
    }

    pub fn bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// 对像素通道字节的独占可变访问。修改是原地进行的，顺序敏感。
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn channels(&self) -> u8 {
        CHANNELS
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }
}

fn into_io(error: ImageError) -> io::Error {
    match error {
        ImageError::IoError(e) => e,
        other => io::Error::new(ErrorKind::InvalidData, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn accepts_only_lossless_extensions() {
        for name in ["a.png", "a.PNG", "a.bmp", "a.tif", "a.tiff", "a.qoi"] {
            assert!(lossless_format(Path::new(name)).is_ok(), "{name}");
        }
        for name in ["a.jpg", "a.jpeg", "a.gif", "a", "a.txt"] {
            assert!(
                matches!(
                    lossless_format(Path::new(name)),
                    Err(StegoError::UnsupportedContainerFormat(p)) if p == PathBuf::from(name)
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn exposes_rgba_bytes_in_row_major_order() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        image.put_pixel(1, 0, Rgba([5, 6, 7, 8]));
        let mut carrier = Carrier::from_image(image);

        assert_eq!(carrier.bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(carrier.channels(), 4);
        assert_eq!(carrier.dimensions(), (2, 1));

        carrier.bytes_mut()[4] = 50;
        assert_eq!(carrier.into_image().get_pixel(1, 0), &Rgba([50, 6, 7, 8]));
    }

    #[test]
    fn save_and_load_preserve_every_byte() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carrier.png");

        let image = RgbaImage::from_fn(7, 5, |x, y| Rgba([x as u8, y as u8, (x * y) as u8, 200]));
        let carrier = Carrier::from_image(image);
        carrier.save(&path).unwrap();

        let loaded = Carrier::load(&path).unwrap();
        assert_eq!(loaded.bytes(), carrier.bytes());
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempdir().unwrap();
        let result = Carrier::load(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(StegoError::SourceUnavailable(_))));
    }

    #[test]
    fn garbage_file_is_source_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(
            Carrier::load(&path),
            Err(StegoError::SourceUnavailable(_))
        ));
    }
}
