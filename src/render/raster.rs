use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{ImageBuffer, Rgb, RgbImage};

use super::Renderer;
use crate::color::Color;

/// Largest RGB buffer we allocate (1 GiB, about 18k×18k pixels).
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Rasterizes marks as filled discs on a white RGB canvas.
///
/// Document units are multiplied by `scale` to get pixels, so a 1728×2592
/// poster at `scale = 0.25` renders as a 432×648 preview.
pub struct PngRenderer {
    image: RgbImage,
    scale: f64,
}

impl PngRenderer {
    pub fn new(width: f64, height: f64, scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            bail!("scale must be positive, got {scale}");
        }
        let px = |v: f64| (v * scale).ceil();
        let (w, h) = (px(width), px(height));
        if !(w >= 1.0 && h >= 1.0 && w <= u32::MAX as f64 && h <= u32::MAX as f64) {
            bail!("cannot allocate a {w}x{h} pixel canvas");
        }
        let bytes = (w as u64) * (h as u64) * 3;
        if bytes > MAX_CANVAS_BYTES {
            bail!("{w}x{h} pixel canvas needs {bytes} bytes, limit is {MAX_CANVAS_BYTES}");
        }
        Ok(PngRenderer {
            image: ImageBuffer::from_pixel(w as u32, h as u32, Rgb([255, 255, 255])),
            scale,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("writing PNG to {}", path.display()))
    }
}

impl Renderer for PngRenderer {
    fn draw_circle(&mut self, x: f64, y: f64, diameter: f64, color: Color) -> Result<()> {
        let r = diameter * self.scale / 2.0;
        if r <= 0.0 {
            return Ok(());
        }
        let cx = x * self.scale + r;
        let cy = y * self.scale + r;
        let c = color.to_srgb8();
        let fill = Rgb([c.red, c.green, c.blue]);

        let (w, h) = self.image.dimensions();
        let x0 = (cx - r).floor().max(0.0) as u32;
        let y0 = (cy - r).floor().max(0.0) as u32;
        let x1 = ((cx + r).ceil().max(0.0) as u32).min(w);
        let y1 = ((cy + r).ceil().max(0.0) as u32).min(h);

        // Pixel centres inside the circle are filled.
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.image.put_pixel(px, py, fill);
                }
            }
        }
        Ok(())
    }
}
