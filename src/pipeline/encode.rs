//! Image encoding: `DynamicImage` → base64 PNG data URL.
//!
//! Vision endpoints accept images as base64 data-URIs embedded in the JSON
//! request body. PNG is chosen over JPEG because it is lossless — text
//! crispness on rendered PDF pages matters far more than payload size for
//! description accuracy.

use crate::error::UnitError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Encode a raster as a `data:image/png;base64,...` URL for the wire.
pub fn to_png_data_url(img: &DynamicImage) -> Result<String, UnitError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| UnitError::Decode {
            name: "<raster>".to_string(),
            detail: format!("PNG encoding failed: {e}"),
        })?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded image → {} bytes base64", b64.len());

    Ok(format!("data:image/png;base64,{b64}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn encode_small_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let url = to_png_data_url(&img).expect("encode should succeed");

        let b64 = url
            .strip_prefix("data:image/png;base64,")
            .expect("data URL prefix");
        let decoded = STANDARD.decode(b64).expect("valid base64");
        // PNG magic
        assert_eq!(&decoded[..4], &[0x89, b'P', b'N', b'G']);
    }
}
