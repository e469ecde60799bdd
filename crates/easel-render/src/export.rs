//! PNG export of rendered scenes.

use crate::renderer::{RenderError, RenderResult, SoftwareRenderer};
use easel_core::headless::Scene;
use std::path::Path;

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::Encode(format!("header: {e}")))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RenderError::Encode(format!("data: {e}")))?;
    }
    Ok(png_data)
}

/// Render `scene` and write it to `path` as PNG.
pub fn export_png(scene: &Scene, path: impl AsRef<Path>) -> RenderResult<usize> {
    let raster = SoftwareRenderer::new().render(scene)?;
    let png_data = encode_png(raster.as_bytes(), raster.width(), raster.height())?;
    std::fs::write(path.as_ref(), &png_data)?;
    log::info!("PNG export complete: {} bytes to {}", png_data.len(), path.as_ref().display());
    Ok(png_data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::prelude::*;

    #[test]
    fn test_encode_png_signature() {
        let data = vec![255u8; 2 * 2 * 4];
        let png_data = encode_png(&data, 2, 2).unwrap();
        assert_eq!(&png_data[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_rejects_short_data() {
        assert!(matches!(encode_png(&[0u8; 4], 2, 2), Err(RenderError::Encode(_))));
    }

    #[test]
    fn test_export_png_round_trip() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let window = Window::new(&manager, 8, 6).unwrap();
        let rect = window.rectangle(0, 0, 4, 6).unwrap().unwrap();
        rect.fill("blue").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.png");
        let written = export_png(&host.scene(window.surface_id()).unwrap(), &path).unwrap();
        assert!(written > 0);

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert_eq!(decoded.get_pixel(2, 2).0, [0, 0, 255, 255]);
        assert_eq!(decoded.get_pixel(7, 5).0, [255, 255, 255, 255]);
    }
}
