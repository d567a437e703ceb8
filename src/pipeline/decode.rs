//! Decoding uploads into rasters: PDF bytes → ordered page images, and
//! image bytes → a single raster.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto a dedicated
//! blocking-pool thread so the request-handling workers never stall during
//! CPU-heavy rasterisation.
//!
//! ## Failure contract
//!
//! Any decode failure — corrupt bytes, a page that will not render, even a
//! missing pdfium library — surfaces as [`UnitError::Decode`]. The
//! orchestrator treats a failed PDF as having zero usable pages and moves
//! on; it never aborts the batch.

use crate::error::UnitError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// Rasterise every page of a PDF, in document order.
///
/// Pages are materialised eagerly because pdfium requires the document
/// handle to stay alive while rendering; the returned `Vec` preserves
/// document order and is consumed exactly once by the orchestrator.
pub async fn pdf_to_page_images(
    name: &str,
    bytes: Vec<u8>,
    max_pixels: u32,
) -> Result<Vec<DynamicImage>, UnitError> {
    let name = name.to_string();
    let task_name = name.clone();

    tokio::task::spawn_blocking(move || pdf_to_page_images_blocking(&task_name, &bytes, max_pixels))
        .await
        .map_err(|e| UnitError::Decode {
            name,
            detail: format!("Render task panicked: {e}"),
        })?
}

/// Blocking implementation of page rasterisation.
fn pdf_to_page_images_blocking(
    name: &str,
    bytes: &[u8],
    max_pixels: u32,
) -> Result<Vec<DynamicImage>, UnitError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| UnitError::Decode {
            name: name.to_string(),
            detail: format!("{e:?}"),
        })?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF '{}' loaded: {} pages", name, total_pages);

    let render_config = PdfRenderConfig::new()
        .set_target_width(max_pixels as i32)
        .set_maximum_height(max_pixels as i32);

    let mut results = Vec::with_capacity(total_pages);

    for idx in 0..total_pages {
        let page = pages.get(idx as u16).map_err(|e| UnitError::Decode {
            name: name.to_string(),
            detail: format!("page {}: {e:?}", idx + 1),
        })?;

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| UnitError::Decode {
                name: name.to_string(),
                detail: format!("page {}: {e:?}", idx + 1),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            idx + 1,
            image.width(),
            image.height()
        );

        results.push(image);
    }

    Ok(results)
}

/// Decode uploaded image bytes into a raster.
pub fn image_from_bytes(name: &str, bytes: &[u8]) -> Result<DynamicImage, UnitError> {
    image::load_from_memory(bytes).map_err(|e| UnitError::Decode {
        name: name.to_string(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn image_from_bytes_accepts_png() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 128, 0, 255])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();

        let decoded = image_from_bytes("tiny.png", &buf).expect("decode should succeed");
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn image_from_bytes_accepts_common_browser_formats() {
        // The upload form accepts image/*, so the decoder must handle more
        // than PNG and JPEG.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255])));
        for (format, name) in [
            (ImageFormat::Gif, "pixel.gif"),
            (ImageFormat::Bmp, "pixel.bmp"),
            (ImageFormat::Tiff, "pixel.tiff"),
        ] {
            let mut buf = Vec::new();
            img.write_to(&mut Cursor::new(&mut buf), format).unwrap();

            let decoded = image_from_bytes(name, &buf)
                .unwrap_or_else(|e| panic!("decoding {name} failed: {e}"));
            assert_eq!(decoded.width(), 2);
        }
    }

    #[test]
    fn image_from_bytes_rejects_garbage() {
        let err = image_from_bytes("junk.bin", b"not an image").unwrap_err();
        assert!(matches!(err, UnitError::Decode { .. }));
        assert!(err.to_string().contains("junk.bin"));
    }
}
