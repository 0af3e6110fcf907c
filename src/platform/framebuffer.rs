//! Software raster the terminal backend presents from.
//!
//! One pixel covers `PIXEL_SIZE` × `PIXEL_SIZE` window units. A pixel is
//! covered by a rectangle when its centre lies inside it.

use std::io;

use image::RgbaImage;

use super::{Canvas, Rect};
use crate::entities::{Rgba, SpriteId};

pub const PIXEL_SIZE: i32 = 10;

pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
    sprites: Vec<RgbaImage>,
    presented: u64,
}

impl FrameBuffer {
    /// A black buffer of `width` × `height` pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width * height],
            sprites: Vec::new(),
            presented: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Resize and blank the buffer. Sprites are kept.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::BLACK; width * height];
    }

    pub fn add_sprite(&mut self, image: RgbaImage) -> SpriteId {
        self.sprites.push(image);
        SpriteId((self.sprites.len() - 1) as u32)
    }

    /// Pixel columns and rows whose centres fall inside `rect`.
    fn covered(&self, rect: Rect) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let span = |start: i32, len: i32, max: usize| {
            // Centre of pixel i is i * PIXEL_SIZE + PIXEL_SIZE / 2.
            let first = ceil_div(start - PIXEL_SIZE / 2, PIXEL_SIZE).clamp(0, max as i32);
            let end = ceil_div(start + len - PIXEL_SIZE / 2, PIXEL_SIZE).clamp(0, max as i32);
            (first as usize)..(end.max(first) as usize)
        };
        (
            span(rect.x, rect.w, self.width),
            span(rect.y, rect.h, self.height),
        )
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks(self.width.max(1))
    }
}

fn ceil_div(a: i32, b: i32) -> i32 {
    -((-a).div_euclid(b))
}

fn blend(dst: Rgba, src: [u8; 4]) -> Rgba {
    let alpha = src[3] as u32;
    let mix = |s: u8, d: u8| ((s as u32 * alpha + d as u32 * (255 - alpha)) / 255) as u8;
    Rgba::new(mix(src[0], dst.r), mix(src[1], dst.g), mix(src[2], dst.b), 0xFF)
}

impl Canvas for FrameBuffer {
    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let (cols, rows) = self.covered(rect);
        for y in rows {
            let row = &mut self.pixels[y * self.width..(y + 1) * self.width];
            row[cols.clone()].fill(color);
        }
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let Some(image) = self.sprites.get(sprite.0 as usize) else {
            return;
        };
        let (img_w, img_h) = image.dimensions();
        if img_w == 0 || img_h == 0 {
            return;
        }
        let (cols, rows) = self.covered(rect);
        for y in rows {
            let cy = y as i64 * PIXEL_SIZE as i64 + PIXEL_SIZE as i64 / 2;
            let v = ((cy - rect.y as i64) * img_h as i64 / rect.h as i64) as u32;
            for x in cols.clone() {
                let cx = x as i64 * PIXEL_SIZE as i64 + PIXEL_SIZE as i64 / 2;
                let u = ((cx - rect.x as i64) * img_w as i64 / rect.w as i64) as u32;
                let src = image.get_pixel(u.min(img_w - 1), v.min(img_h - 1)).0;
                let idx = y * self.width + x;
                self.pixels[idx] = blend(self.pixels[idx], src);
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}
