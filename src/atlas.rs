//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
#[cfg(any(feature = "builder", feature = "png_source"))]
use std::io::Cursor;

#[cfg(any(feature = "builder", feature = "png_source"))]
use png::{BitDepth, ColorType, Decoder, Transformations};

use super::*;

/// First code point stored in a baked table.
pub const FIRST_BAKED_CHAR: u32 = 32;
/// One past the last code point stored in a baked table.
pub const LAST_BAKED_CHAR: u32 = 128;

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// Screen-space glyph quad and its atlas texture coordinates.
pub struct GlyphQuad {
    /// Left edge.
    pub x0: f32,
    /// Top edge, relative to the baseline.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge, relative to the baseline.
    pub y1: f32,
    /// Left texture coordinate.
    pub s0: f32,
    /// Top texture coordinate.
    pub t0: f32,
    /// Right texture coordinate.
    pub s1: f32,
    /// Bottom texture coordinate.
    pub t1: f32,
}

/// Source of glyph metrics and quads for text layout.
pub trait GlyphProvider {
    /// Line advance in pixels.
    fn font_size(&self) -> f32;
    /// Height of the tallest descending glyph box. Used for line height and hit testing.
    fn max_char_height(&self) -> f32;
    /// Atlas texture holding the glyph bitmaps.
    fn texture(&self) -> TextureHandle;
    /// Returns `true` when the font has a real outline for `c`.
    fn has_glyph(&self, c: char) -> bool;
    /// Returns the quad for `c` placed at `pen` and advances `pen.x`.
    ///
    /// Returns `None` and leaves `pen` untouched when `c` is outside the baked range.
    fn baked_quad(&self, c: char, pen: &mut Vec2f) -> Option<GlyphQuad>;
}

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// One entry of a baked glyph table.
pub struct BakedChar {
    /// Atlas rectangle left.
    pub x0: u16,
    /// Atlas rectangle top.
    pub y0: u16,
    /// Atlas rectangle right.
    pub x1: u16,
    /// Atlas rectangle bottom.
    pub y1: u16,
    /// Horizontal bearing.
    pub xoff: f32,
    /// Offset from the baseline to the bitmap top (negative above the baseline).
    pub yoff: f32,
    /// Pen advance.
    pub xadvance: f32,
    /// The font maps the code point to a real glyph.
    pub present: bool,
}

#[derive(Clone, Debug)]
/// Glyph table for code points 32..128 baked into a single atlas.
pub struct BakedFont {
    chars: Vec<BakedChar>,
    atlas_width: usize,
    atlas_height: usize,
    font_size: f32,
    max_char_height: f32,
    texture: TextureHandle,
}

impl BakedFont {
    /// Assembles a font from an existing glyph table. `chars[0]` is the entry for `' '`.
    pub fn from_chars(chars: Vec<BakedChar>, atlas_width: usize, atlas_height: usize, font_size: f32, max_char_height: f32) -> Self {
        Self { chars, atlas_width, atlas_height, font_size, max_char_height, texture: TextureHandle::default() }
    }

    /// Binds the uploaded atlas texture.
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = texture;
        self
    }

    /// Atlas dimensions in pixels.
    pub fn atlas_size(&self) -> (usize, usize) { (self.atlas_width, self.atlas_height) }

    /// Table entry for `c`. Tabs reuse the space entry.
    pub fn baked_char(&self, c: char) -> Option<&BakedChar> {
        let c = if c == '\t' { ' ' } else { c };
        let code = c as u32;
        if !(FIRST_BAKED_CHAR..LAST_BAKED_CHAR).contains(&code) {
            return None;
        }
        self.chars.get((code - FIRST_BAKED_CHAR) as usize)
    }
}

impl GlyphProvider for BakedFont {
    fn font_size(&self) -> f32 { self.font_size }
    fn max_char_height(&self) -> f32 { self.max_char_height }
    fn texture(&self) -> TextureHandle { self.texture }
    fn has_glyph(&self, c: char) -> bool { self.baked_char(c).is_some_and(|b| b.present) }

    fn baked_quad(&self, c: char, pen: &mut Vec2f) -> Option<GlyphQuad> {
        let b = self.baked_char(c)?;
        let ipw = 1.0 / self.atlas_width.max(1) as f32;
        let iph = 1.0 / self.atlas_height.max(1) as f32;
        let round_x = (pen.x + b.xoff + 0.5).floor();
        let round_y = (pen.y + b.yoff + 0.5).floor();
        let quad = GlyphQuad {
            x0: round_x,
            y0: round_y,
            x1: round_x + (b.x1 - b.x0) as f32,
            y1: round_y + (b.y1 - b.y0) as f32,
            s0: b.x0 as f32 * ipw,
            t0: b.y0 as f32 * iph,
            s1: b.x1 as f32 * ipw,
            t1: b.y1 as f32 * iph,
        };
        pen.x += b.xadvance;
        Some(quad)
    }
}

#[cfg(feature = "builder")]
impl BakedFont {
    /// Rasterizes code points 32..128 of a TrueType font into a `tex_width` x `tex_height` RGBA atlas.
    ///
    /// Glyphs are packed row by row with a one pixel gutter. The returned pixels are white with the
    /// glyph coverage in alpha, ready for [`Context::load_texture_rgba`](crate::Context::load_texture_rgba).
    pub fn bake(ttf: &[u8], pixel_size: f32, tex_width: usize, tex_height: usize) -> Result<(BakedFont, Vec<u8>)> {
        let font = fontdue::Font::from_bytes(ttf, fontdue::FontSettings::default()).map_err(|e| WarpError::FontLoad(e.to_string()))?;
        let too_small = || WarpError::AtlasTooSmall { width: tex_width, height: tex_height };

        let mut pixels = vec![0u8; tex_width * tex_height * 4];
        let mut chars = Vec::with_capacity((LAST_BAKED_CHAR - FIRST_BAKED_CHAR) as usize);
        let (mut x, mut y, mut bottom_y) = (1usize, 1usize, 1usize);
        let mut max_char_height = 0.0;

        for code in FIRST_BAKED_CHAR..LAST_BAKED_CHAR {
            let ch = char::from_u32(code).unwrap_or(' ');
            let (metrics, bitmap) = font.rasterize(ch, pixel_size);
            let (w, h) = (metrics.width, metrics.height);
            if x + w + 1 >= tex_width {
                y = bottom_y;
                x = 1;
            }
            if y + h + 1 >= tex_height {
                return Err(too_small());
            }
            for row in 0..h {
                for col in 0..w {
                    let dst = ((y + row) * tex_width + x + col) * 4;
                    pixels[dst..dst + 4].copy_from_slice(&[0xFF, 0xFF, 0xFF, bitmap[row * w + col]]);
                }
            }
            if ch == 'p' {
                max_char_height = h as f32;
            }
            chars.push(BakedChar {
                x0: x as u16,
                y0: y as u16,
                x1: (x + w) as u16,
                y1: (y + h) as u16,
                xoff: metrics.xmin as f32,
                yoff: -(metrics.ymin as f32 + h as f32),
                xadvance: metrics.advance_width,
                present: font.lookup_glyph_index(ch) != 0,
            });
            x += w + 1;
            bottom_y = bottom_y.max(y + h + 1);
        }

        Ok((BakedFont::from_chars(chars, tex_width, tex_height, pixel_size, max_char_height), pixels))
    }
}

/// Encodes RGBA pixels as a PNG file image.
#[cfg(feature = "builder")]
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, width, height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| WarpError::ImageDecode(e.to_string()))?;
        writer.write_image_data(rgba).map_err(|e| WarpError::ImageDecode(e.to_string()))?;
    }
    Ok(buffer)
}

/// Decodes a PNG into tightly packed RGBA8 rows. Grayscale and RGB inputs get an opaque alpha.
///
/// With `flip` set the rows are returned bottom-up.
#[cfg(any(feature = "builder", feature = "png_source"))]
pub fn decode_png(bytes: &[u8], flip: bool) -> Result<(u32, u32, Vec<u8>)> {
    let mut decoder = Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| WarpError::ImageDecode(e.to_string()))?;
    let buf_size = reader.output_buffer_size().ok_or_else(|| WarpError::ImageDecode("PNG decoder did not report output size".into()))?;
    let mut img_data = vec![0; buf_size];
    let info = reader.next_frame(&mut img_data).map_err(|e| WarpError::ImageDecode(e.to_string()))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(WarpError::UnsupportedImage(format!("bit depth {:?}", info.bit_depth)));
    }
    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => return Err(WarpError::UnsupportedImage("indexed color".into())),
    };

    let (width, height) = (info.width as usize, info.height as usize);
    let mut pixels = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        let src_row = if flip { height - 1 - row } else { row };
        let line = &img_data[src_row * info.line_size..src_row * info.line_size + width * pixel_size];
        for px in line.chunks_exact(pixel_size) {
            let rgba = match px {
                [v] => [*v, *v, *v, 0xFF],
                [v, a] => [*v, *v, *v, *a],
                [r, g, b] => [*r, *g, *b, 0xFF],
                [r, g, b, a] => [*r, *g, *b, *a],
                _ => [0, 0, 0, 0],
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    Ok((info.width, info.height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn baked_quad_rounds_and_advances() {
        let font = fixed_font();
        let mut pen = vec2f(3.4, 0.0);
        let q = font.baked_quad('A', &mut pen).unwrap();
        assert_eq!((q.x0, q.y0, q.x1, q.y1), (3.0, -10.0, 11.0, 0.0));
        assert_eq!(pen.x, 3.4 + 8.0);
        assert!(q.s1 > q.s0 && q.t1 > q.t0);
    }

    #[test]
    fn out_of_range_chars_have_no_quad() {
        let font = fixed_font();
        let mut pen = vec2f(0.0, 0.0);
        assert!(font.baked_quad('\u{e9}', &mut pen).is_none());
        assert_eq!(pen.x, 0.0);
        assert!(font.baked_quad('\t', &mut pen).is_some());
        assert!(!font.has_glyph('\n'));
    }

    #[cfg(any(feature = "builder", feature = "png_source"))]
    fn encode(color_type: ColorType, data: &[u8], width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buffer
    }

    #[cfg(any(feature = "builder", feature = "png_source"))]
    #[test]
    fn png_decode_error_returns_err() {
        assert!(matches!(decode_png(&[], false), Err(WarpError::ImageDecode(_))));
    }

    #[cfg(any(feature = "builder", feature = "png_source"))]
    #[test]
    fn png_decode_expands_rgb_and_flips_rows() {
        let bytes = encode(ColorType::Rgb, &[1, 2, 3, 4, 5, 6], 1, 2);
        let (w, h, pixels) = decode_png(&bytes, false).unwrap();
        assert_eq!((w, h), (1, 2));
        assert_eq!(pixels, vec![1, 2, 3, 255, 4, 5, 6, 255]);
        let (_, _, flipped) = decode_png(&bytes, true).unwrap();
        assert_eq!(flipped, vec![4, 5, 6, 255, 1, 2, 3, 255]);
    }

    #[cfg(feature = "builder")]
    #[test]
    fn encoded_atlas_decodes_back() {
        let rgba = [255, 255, 255, 10, 255, 255, 255, 200];
        let png = encode_png(2, 1, &rgba).unwrap();
        let (_, _, pixels) = decode_png(&png, false).unwrap();
        assert_eq!(pixels, rgba.to_vec());
    }

    #[cfg(feature = "builder")]
    #[test]
    fn baking_garbage_is_a_font_error() {
        assert!(matches!(BakedFont::bake(&[1, 2, 3], 16.0, 64, 64), Err(WarpError::FontLoad(_))));
    }
}
