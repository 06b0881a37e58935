use egui::{Color32, Pos2, Rect};
use image::{Rgba, RgbaImage};

use crate::renderer::Surface;

/// A CPU pixel buffer the same size as the canvas in device pixels.
///
/// A pixel is covered when its center lies inside the shape. Colors are
/// blended source-over onto whatever is already there.
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba<u8>,
}

impl RasterSurface {
    /// Transparent background, like a freshly cleared canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color32::TRANSPARENT)
    }

    pub fn with_background(width: u32, height: u32, background: Color32) -> Self {
        let background = Rgba(background.to_srgba_unmultiplied());
        Self {
            image: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Bounding box of all pixels that differ from the background, as
    /// `(min_x, min_y, max_x, max_y)` inclusive. `None` when nothing is painted.
    pub fn painted_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in self.image.enumerate_pixels() {
            if *pixel == self.background {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds
    }

    /// Pixel index range whose centers fall in `[min, max)`.
    fn span(min: f32, max: f32, len: u32) -> std::ops::Range<u32> {
        let clamp = |v: f32| v.clamp(0.0, len as f32) as u32;
        clamp((min - 0.5).ceil())..clamp((max - 0.5).ceil())
    }

    fn blend(&mut self, x: u32, y: u32, color: Color32) {
        let [sr, sg, sb, sa] = color.to_srgba_unmultiplied();
        if sa == 0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        if sa == 255 {
            *dst = Rgba([sr, sg, sb, sa]);
            return;
        }
        let src_a = sa as f32 / 255.0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mix = |s: u8, d: u8| {
            let c = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        *dst = Rgba([
            mix(sr, dst[0]),
            mix(sg, dst[1]),
            mix(sb, dst[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        let background = self.background;
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        for y in Self::span(center.y - radius, center.y + radius, self.image.height()) {
            for x in Self::span(center.x - radius, center.x + radius, self.image.width()) {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy < r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        for y in Self::span(rect.min.y, rect.max.y, self.image.height()) {
            for x in Self::span(rect.min.x, rect.max.x, self.image.width()) {
                self.blend(x, y, color);
            }
        }
    }
}
