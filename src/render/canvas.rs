// Drawing helpers pass explicit geometry and color to stay allocation-free.
#![allow(clippy::too_many_arguments)]

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::RgbaImage;

use crate::processing::layout::center_offset;

/// 0RGB pixel buffer in the layout softbuffer presents.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![pack_color((0.0, 0.0, 0.0)); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Composite `image` over the current content, centered. Parts that do not
    /// fit are clipped.
    pub fn blit_rgba_centered(&mut self, image: &RgbaImage) {
        let (ox, oy) = center_offset(image.width(), image.height(), self.width, self.height);
        let skip_x = image.width().saturating_sub(self.width) / 2;
        let skip_y = image.height().saturating_sub(self.height) / 2;
        let cols = image.width().min(self.width);
        let rows = image.height().min(self.height);
        for y in 0..rows {
            let row = ((oy + y) * self.width) as usize;
            for x in 0..cols {
                let px = image.get_pixel(skip_x + x, skip_y + y).0;
                let idx = row + (ox + x) as usize;
                self.pixels[idx] = match px[3] {
                    255 => pack_rgb8([px[0], px[1], px[2]]),
                    0 => continue,
                    a => {
                        let src = rgb8_to_f32([px[0], px[1], px[2]]);
                        pack_color(blend(src, unpack_color(self.pixels[idx]), f32::from(a) / 255.0))
                    }
                };
            }
        }
    }

    /// Draw a single line of text with its baseline at `baseline`.
    pub fn draw_text(
        &mut self,
        font: &FontArc,
        text: &str,
        rgb: [u8; 3],
        left: f32,
        baseline: f32,
        scale: PxScale,
    ) {
        let color = rgb8_to_f32(rgb);
        let scaled = font.as_scaled(scale);
        let mut cursor_x = left;
        let mut previous = None;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let glyph = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                cursor_x += scaled.kern(prev, glyph);
            }
            let advance = scaled.h_advance(glyph);
            let mut positioned = scaled.scaled_glyph(ch);
            positioned.position = point(cursor_x, baseline);
            if let Some(outline) = font.outline_glyph(positioned) {
                let bounds = outline.px_bounds();
                outline.draw(|x, y, coverage| {
                    blend_pixel(
                        &mut self.pixels,
                        self.width,
                        self.height,
                        bounds.min.x + x as f32,
                        bounds.min.y + y as f32,
                        color,
                        coverage,
                    );
                });
            }
            cursor_x += advance;
            previous = Some(glyph);
        }
    }
}

fn blend_pixel(
    buffer: &mut [u32],
    width: u32,
    height: u32,
    x: f32,
    y: f32,
    color: (f32, f32, f32),
    coverage: f32,
) {
    if coverage <= 0.0 {
        return;
    }
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    if xi < 0 || yi < 0 || xi >= width as i32 || yi >= height as i32 {
        return;
    }
    let idx = (yi as u32 * width + xi as u32) as usize;
    let dst = unpack_color(buffer[idx]);
    buffer[idx] = pack_color(blend(color, dst, coverage.clamp(0.0, 1.0)));
}

fn blend(src: (f32, f32, f32), dst: (f32, f32, f32), alpha: f32) -> (f32, f32, f32) {
    (
        src.0 * alpha + dst.0 * (1.0 - alpha),
        src.1 * alpha + dst.1 * (1.0 - alpha),
        src.2 * alpha + dst.2 * (1.0 - alpha),
    )
}

fn rgb8_to_f32(rgb: [u8; 3]) -> (f32, f32, f32) {
    (
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
    )
}

fn unpack_color(value: u32) -> (f32, f32, f32) {
    let r = ((value >> 16) & 0xFF) as f32 / 255.0;
    let g = ((value >> 8) & 0xFF) as f32 / 255.0;
    let b = (value & 0xFF) as f32 / 255.0;
    (r, g, b)
}

fn pack_rgb8(rgb: [u8; 3]) -> u32 {
    0xFF00_0000 | (u32::from(rgb[0]) << 16) | (u32::from(rgb[1]) << 8) | u32::from(rgb[2])
}

fn pack_color(color: (f32, f32, f32)) -> u32 {
    let r = (color.0.clamp(0.0, 1.0) * 255.0).round() as u32;
    let g = (color.1.clamp(0.0, 1.0) * 255.0).round() as u32;
    let b = (color.2.clamp(0.0, 1.0) * 255.0).round() as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}
