use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, RgbaImage};
use thiserror::Error;

/// Errors raised while exporting rendered previews.
/// 匯出預覽影像時可能發生的錯誤。
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Encodes an RGBA image as PNG bytes.
/// 將 RGBA 影像編碼為 PNG 位元組。
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut data = Vec::new();
    PngEncoder::new(&mut data)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(|err| RenderError::Encode(err.to_string()))?;
    Ok(data)
}
