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
//! Glyph placement with word wrapping, stop points and index windows.
//!
//! [`layout_text`] is a pure walk over the code points of a string. It never touches the batch; placements are
//! reported to a callback so the same walk serves measuring, hit testing and drawing.

use super::*;

#[derive(Copy, Clone, Debug)]
/// Inputs of one layout walk.
pub struct TextParams {
    /// Top-left of the first line.
    pub pos: Vec2f,
    /// Glyph color.
    pub color: Color,
    /// Absolute x a word may not cross. `None` disables wrapping.
    pub wrap_point: Option<f32>,
    /// Stop once the pen passes this x on or below `stop_y`.
    pub stop_x: Option<f32>,
    /// Stop once a line reaches this y.
    pub stop_y: Option<f32>,
    /// Measure only.
    pub no_render: bool,
    /// Report highlight rectangles instead of glyphs.
    pub render_solid: bool,
    /// Characters before this index advance the pen but are not reported.
    pub start_index: Option<usize>,
    /// Layout ends at this index.
    pub end_index: Option<usize>,
}

impl TextParams {
    /// Plain unwrapped text at `pos`.
    pub fn at(pos: Vec2f, color: Color) -> Self {
        Self {
            pos,
            color,
            wrap_point: None,
            stop_x: None,
            stop_y: None,
            no_render: false,
            render_solid: false,
            start_index: None,
            end_index: None,
        }
    }

    /// Measuring walk at `pos`.
    pub fn measure(pos: Vec2f) -> Self { Self { no_render: true, ..Self::at(pos, Color::NO_COLOR) } }

    /// Sets the wrap boundary.
    pub fn wrap(mut self, wrap_point: Option<f32>) -> Self {
        self.wrap_point = wrap_point;
        self
    }

    /// Sets the stop point.
    pub fn stop_at(mut self, point: Vec2f) -> Self {
        self.stop_x = Some(point.x);
        self.stop_y = Some(point.y);
        self
    }

    /// Restricts reported characters to `start..end`.
    pub fn range(mut self, start: Option<usize>, end: Option<usize>) -> Self {
        self.start_index = start;
        self.end_index = end;
        self
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// Result of a layout walk.
pub struct TextProps {
    /// Widest line.
    pub width: f32,
    /// Total height, starting at one glyph height and growing by the line advance.
    pub height: f32,
    /// Pen x at the end of the walk.
    pub end_x: f32,
    /// Pen y at the end of the walk.
    pub end_y: f32,
    /// Characters consumed, including those skipped by `start_index`.
    pub rendered_count: usize,
}

#[derive(Copy, Clone, Debug)]
/// One reported element of a walk.
pub enum Placement {
    /// A glyph quad (y relative to the baseline of the line top).
    Glyph {
        /// Code point.
        c: char,
        /// Quad to draw.
        quad: GlyphQuad,
    },
    /// A highlight spanning one character cell.
    Solid {
        /// Top-left.
        pos: Vec2f,
        /// Cell size.
        size: Vec2f,
    },
}

fn is_layout_only(c: char) -> bool { c == ' ' || c == '\t' || c.is_ascii_digit() || c.is_ascii_punctuation() }

fn word_width(font: &dyn GlyphProvider, chars: &[char]) -> f32 {
    let mut pen = Vec2f::default();
    for c in chars.iter().take_while(|c| **c != ' ' && **c != '\n') {
        font.baked_quad(*c, &mut pen);
    }
    pen.x
}

/// Walks `text` and reports every placed element to `emit`.
pub fn layout_text<F: FnMut(Placement)>(font: &dyn GlyphProvider, text: &str, params: &TextParams, mut emit: F) -> TextProps {
    let chars: Vec<char> = text.chars().collect();
    let max_h = font.max_char_height();
    let line_advance = font.font_size();
    let origin = params.pos;

    let (mut x, mut y) = (origin.x, origin.y);
    let mut last_x = x;
    let mut width: f32 = 0.0;
    let mut height = max_h;
    let mut count = 0;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\n' && !font.has_glyph(c) && !is_layout_only(c) {
            i += 1;
            continue;
        }
        if params.end_index.is_some_and(|end| i >= end) {
            break;
        }

        let mut line_break = c == '\n';
        if let Some(wrap) = params.wrap_point {
            let word_start = i == 0 || chars[i - 1] == ' ' || chars[i - 1] == '\n';
            if word_start && !line_break && c != ' ' && x > origin.x && x + word_width(font, &chars[i..]) > wrap {
                line_break = true;
            }
        }
        if line_break {
            y += line_advance;
            height += line_advance;
            width = width.max(x - origin.x);
            x = origin.x;
            last_x = x;
        }
        if c == '\n' {
            count += 1;
            i += 1;
            continue;
        }

        let mut pen = vec2f(x, y);
        let Some(quad) = font.baked_quad(c, &mut pen) else {
            i += 1;
            continue;
        };
        x = pen.x;

        if params.start_index.is_some_and(|start| i < start) {
            last_x = x;
            count += 1;
            i += 1;
            continue;
        }

        let stop = match (params.stop_x, params.stop_y) {
            (Some(sx), Some(sy)) => x >= sx && y + max_h >= sy,
            (None, Some(sy)) => y + max_h >= sy,
            _ => false,
        };
        if stop {
            break;
        }

        if !params.no_render {
            if params.render_solid {
                emit(Placement::Solid { pos: vec2f(last_x, y), size: vec2f(x - last_x, max_h) });
            } else {
                emit(Placement::Glyph { c, quad });
            }
            last_x = x;
        }
        count += 1;
        i += 1;
    }

    TextProps { width: width.max(x - origin.x), height, end_x: x, end_y: y, rendered_count: count }
}

/// Size of `text` laid out without wrapping.
pub fn text_dimension(font: &dyn GlyphProvider, text: &str) -> Vec2f { text_dimension_ex(font, text, None) }

/// Size of `text` wrapped at `wrap_width` pixels from the left edge.
pub fn text_dimension_ex(font: &dyn GlyphProvider, text: &str, wrap_width: Option<f32>) -> Vec2f {
    let props = layout_text(font, text, &TextParams::measure(Vec2f::default()).wrap(wrap_width), |_| {});
    vec2f(props.width, props.height)
}

/// Pen x after laying out `text` from `start_x`.
pub fn get_text_end(font: &dyn GlyphProvider, text: &str, start_x: f32) -> f32 {
    layout_text(font, text, &TextParams::measure(vec2f(start_x, 0.0)), |_| {}).end_x
}

/// Index of the character boundary under `point` for text laid out at `pos`.
pub fn char_index_at(font: &dyn GlyphProvider, text: &str, pos: Vec2f, wrap_point: Option<f32>, point: Vec2f) -> usize {
    let params = TextParams::measure(pos).wrap(wrap_point).stop_at(point);
    layout_text(font, text, &params, |_| {}).rendered_count
}

/// Pen position just before character `index`.
pub fn caret_position(font: &dyn GlyphProvider, text: &str, pos: Vec2f, wrap_point: Option<f32>, index: usize) -> Vec2f {
    let params = TextParams::measure(pos).wrap(wrap_point).range(None, Some(index));
    let props = layout_text(font, text, &params, |_| {});
    vec2f(props.end_x, props.end_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn glyphs(text: &str, params: &TextParams) -> Vec<(char, GlyphQuad)> {
        let font = fixed_font();
        let mut out = Vec::new();
        layout_text(&font, text, params, |p| {
            if let Placement::Glyph { c, quad } = p {
                out.push((c, quad));
            }
        });
        out
    }

    #[test]
    fn words_wrap_before_crossing_the_boundary() {
        let font = fixed_font();
        let params = TextParams::at(vec2f(0.0, 0.0), Color::WHITE).wrap(Some(60.0));
        let props = layout_text(&font, "aaaa bbbb", &params, |_| {});
        assert_eq!(props.height, 20.0);
        assert_eq!(props.width, 40.0);
        assert_eq!((props.end_x, props.end_y), (32.0, 10.0));

        let placed = glyphs("aaaa bbbb", &params);
        let first_b = placed.iter().find(|(c, _)| *c == 'b').unwrap().1;
        assert_eq!((first_b.x0, first_b.y0), (0.0, 0.0));
    }

    #[test]
    fn wrapped_words_stay_inside_the_boundary() {
        let text = "the quick brown fox jumps over a lazy dog and keeps on running far";
        let wrap = 100.0;
        let params = TextParams::at(vec2f(0.0, 0.0), Color::WHITE).wrap(Some(wrap));
        for (c, quad) in glyphs(text, &params) {
            if c != ' ' {
                assert!(quad.x1 <= wrap, "{c} ends at {}", quad.x1);
            }
        }
    }

    #[test]
    fn overlong_word_is_kept_whole_at_line_origin() {
        let params = TextParams::at(vec2f(5.0, 0.0), Color::WHITE).wrap(Some(45.0));
        let placed = glyphs("ab abcdefghij", &params);
        let long: Vec<_> = placed[2..].iter().filter(|(c, _)| *c != ' ').collect();
        assert_eq!(long.len(), 10);
        assert_eq!(long[0].1.x0, 5.0);
        assert!(long.iter().all(|(_, q)| q.y0 == long[0].1.y0));
        assert_eq!(long[9].1.x1, 5.0 + 80.0);
    }

    #[test]
    fn newline_forces_a_break() {
        let font = fixed_font();
        let props = layout_text(&font, "ab\ncd", &TextParams::measure(vec2f(0.0, 0.0)), |_| {});
        assert_eq!(props.height, 20.0);
        assert_eq!((props.end_x, props.end_y), (16.0, 10.0));
        assert_eq!(props.rendered_count, 5);
    }

    #[test]
    fn characters_without_glyphs_are_skipped() {
        let font = fixed_font();
        let dim = text_dimension(&font, "a\u{7f}b");
        assert_eq!(dim.x, 16.0);
    }

    #[test]
    fn stop_point_hit_tests_character_boundaries() {
        let font = fixed_font();
        assert_eq!(char_index_at(&font, "hello", vec2f(0.0, 0.0), None, vec2f(13.0, 5.0)), 1);
        assert_eq!(char_index_at(&font, "hello", vec2f(0.0, 0.0), None, vec2f(0.0, 5.0)), 0);
        assert_eq!(char_index_at(&font, "hello", vec2f(0.0, 0.0), None, vec2f(400.0, 5.0)), 5);
    }

    #[test]
    fn index_window_reports_only_the_range() {
        let params = TextParams::at(vec2f(0.0, 0.0), Color::WHITE).range(Some(1), Some(3));
        let placed = glyphs("hello", &params);
        assert_eq!(placed.iter().map(|(c, _)| *c).collect::<String>(), "el");
        assert_eq!(placed[0].1.x0, 8.0);
        let font = fixed_font();
        assert_eq!(caret_position(&font, "hello", vec2f(2.0, 0.0), None, 3).x, 26.0);
    }

    #[test]
    fn solid_mode_reports_cells() {
        let font = fixed_font();
        let mut cells = Vec::new();
        let params = TextParams { render_solid: true, ..TextParams::at(vec2f(0.0, 0.0), Color::WHITE) }.range(Some(1), Some(3));
        layout_text(&font, "hello", &params, |p| {
            if let Placement::Solid { pos, size } = p {
                cells.push((pos.x, size.x, size.y));
            }
        });
        assert_eq!(cells, vec![(8.0, 8.0, 10.0), (16.0, 8.0, 10.0)]);
    }

    #[test]
    fn text_end_and_dimensions() {
        let font = fixed_font();
        assert_eq!(get_text_end(&font, "abc", 10.0), 34.0);
        let dim = text_dimension_ex(&font, "aaaa bbbb", Some(60.0));
        assert_eq!((dim.x, dim.y), (40.0, 20.0));
        assert_eq!(text_dimension(&font, "").y, 10.0);
    }
}
