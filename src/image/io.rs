//! Codec boundary and JSON helpers.
//!
//! - `load_rgba8_image`: decode a PNG/JPEG/etc. into an owned `Rgba8` buffer.
//! - `save_rgba8_image`: encode an `Rgba8` buffer, format chosen by extension.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The processing core never calls into this module.
use super::{ImageView, PixelBuffer};
use crate::color::{PixelColor, Rgba8};
use image::{ImageBuffer, Rgba, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an image from disk and convert it to 8-bit RGBA.
pub fn load_rgba8_image(path: &Path) -> Result<PixelBuffer<Rgba8>, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let pixels = img
        .into_raw()
        .chunks_exact(4)
        .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
        .collect();
    PixelBuffer::from_pixels(width, height, pixels)
        .map_err(|e| format!("Failed to wrap {}: {e}", path.display()))
}

/// Encode any pixel format through its 8-bit RGBA representation.
pub fn save_rgba8_image<C: PixelColor>(buffer: &PixelBuffer<C>, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let raw: Vec<u8> = buffer
        .pixels()
        .iter()
        .flat_map(|&p| Rgba8::from_vector(p.to_vector()).to_array())
        .collect();
    let image: RgbaImage =
        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(buffer.width() as u32, buffer.height() as u32, raw)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
