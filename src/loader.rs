//! Turns an image file into something egui can display.

use std::path::Path;

use crate::error::{Error, Result};

/// File extensions offered in the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub struct LoadedImage {
    /// File name without directories, as it should appear in `<img src>`.
    pub name: String,
    pub pixels: egui::ColorImage,
}

impl LoadedImage {
    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.pixels.size[0] as f32, self.pixels.size[1] as f32)
    }
}

pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(e) => Error::Io(e),
        source => Error::Image {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let samples = rgba.as_flat_samples();
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, samples.as_slice());

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    log::info!("Decoded {} ({}x{})", path.display(), size[0], size[1]);

    Ok(LoadedImage { name, pixels })
}
