/*!
 * Always-succeeding local fallbacks.
 *
 * When every remote provider in a chain fails, the resolver degrades to one
 * of these: a deterministic placeholder PNG with the requested word rendered
 * onto a plain background, or an echo pseudo-translation. Both synthesize
 * their artifact purely from the request's textual fields.
 */

use image::{ImageFormat, Rgb, RgbImage};
use log::error;
use std::io::Cursor;

use crate::content::{ContentRequest, ImageArtifact, TranslationArtifact};
use crate::resolver::chain::LocalFallback;

/// Glyph cell width in pixels (before scaling)
const GLYPH_W: u32 = 5;
/// Glyph cell height in pixels (before scaling)
const GLYPH_H: u32 = 7;

/// Background fill
const BACKGROUND: Rgb<u8> = Rgb([240, 240, 240]);
/// Main text color
const TEXT_COLOR: Rgb<u8> = Rgb([30, 30, 30]);
/// Notice text color
const NOTICE_COLOR: Rgb<u8> = Rgb([180, 30, 30]);

/// Local placeholder renderer: the requested word on a plain background plus
/// an "image unavailable" notice. Output is deterministic for a given
/// request and size.
#[derive(Debug, Clone)]
pub struct PlaceholderImage {
    /// Output width in pixels
    width: u32,
    /// Output height in pixels
    height: u32,
}

impl Default for PlaceholderImage {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
        }
    }
}

impl PlaceholderImage {
    /// Create a renderer with an explicit output size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render the placeholder for a request into an RGB buffer
    fn render(&self, request: &ContentRequest) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        let word = request.text.to_uppercase();
        draw_text(&mut img, &word, self.height / 3, 4, TEXT_COLOR);
        draw_text(
            &mut img,
            "IMAGE UNAVAILABLE",
            self.height * 2 / 3,
            2,
            NOTICE_COLOR,
        );

        img
    }
}

impl LocalFallback<ImageArtifact> for PlaceholderImage {
    fn synthesize(&self, request: &ContentRequest) -> ImageArtifact {
        let img = self.render(request);

        let mut cursor = Cursor::new(Vec::new());
        if let Err(e) = img.write_to(&mut cursor, ImageFormat::Png) {
            // Encoding to memory cannot fail for a valid buffer; log and
            // return whatever was written so the chain still terminates
            error!("Placeholder PNG encoding failed: {}", e);
        }

        ImageArtifact::new(cursor.into_inner(), "png")
    }
}

/// Echo pseudo-translation: reproduces the request's native form when the
/// seed vocabulary supplied one, otherwise the source text itself
#[derive(Debug, Clone, Default)]
pub struct EchoTranslation;

impl LocalFallback<TranslationArtifact> for EchoTranslation {
    fn synthesize(&self, request: &ContentRequest) -> TranslationArtifact {
        match &request.native {
            Some(native) => TranslationArtifact::plain(native.clone()),
            None => TranslationArtifact::plain(request.text.clone()),
        }
    }
}

/// Draw a line of text centered horizontally at the given baseline, using the
/// embedded 5x7 bitmap font scaled up by `scale`
fn draw_text(img: &mut RgbImage, text: &str, y: u32, scale: u32, color: Rgb<u8>) {
    let advance = (GLYPH_W + 1) * scale;
    let max_chars = (img.width() / advance).max(1) as usize;
    let chars: Vec<char> = text.chars().take(max_chars).collect();

    if chars.is_empty() {
        return;
    }

    let text_width = chars.len() as u32 * advance - scale;
    let x0 = img.width().saturating_sub(text_width) / 2;

    for (i, c) in chars.iter().enumerate() {
        let gx = x0 + i as u32 * advance;
        for (ry, row) in glyph(*c).iter().enumerate() {
            for rx in 0..GLYPH_W {
                if row & (1 << (GLYPH_W - 1 - rx)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = gx + rx * scale + dx;
                        let py = y + ry as u32 * scale + dy;
                        if px < img.width() && py < img.height() {
                            img.put_pixel(px, py, color);
                        }
                    }
                }
            }
        }
    }
}

/// 5x7 glyph rows for the embedded font. Lowercase maps to uppercase;
/// anything outside the covered set renders as a solid block.
fn glyph(c: char) -> [u8; GLYPH_H as usize] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        ' ' => [0b00000; 7],
        _ => [0b11111; 7],
    }
}
