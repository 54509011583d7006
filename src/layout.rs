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
use std::rc::Rc;

use super::*;

#[derive(Copy, Clone, Debug)]
/// Sequential placement cursor.
pub struct Cursor {
    /// Where the next widget goes.
    pub pos: Vec2f,
    /// Tallest item placed on the current line.
    pub line_height: f32,
    /// Enables wrapping in [`next_line_on_overflow`](Self::next_line_on_overflow).
    pub line_overflow: bool,
}

impl Default for Cursor {
    fn default() -> Self { Self { pos: Vec2f::default(), line_height: 0.0, line_overflow: true } }
}

impl Cursor {
    /// Wraps to a new line when an item of `size` would cross the right edge of `area`, then grows the line to
    /// fit it. `xoffset` is the left inset of the new line.
    pub fn next_line_on_overflow(&mut self, size: Vec2f, xoffset: f32, area: &Aabb) {
        if !self.line_overflow {
            return;
        }
        if self.pos.x - area.pos.x + size.x > area.size.x {
            self.pos.y += self.line_height;
            self.pos.x = area.pos.x + xoffset;
            self.line_height = 0.0;
        }
        if size.y > self.line_height {
            self.line_height = size.y;
        }
    }

    /// Unconditional line break.
    pub fn next_line(&mut self, area: &Aabb, xoffset: f32) {
        self.pos.x = area.pos.x + xoffset;
        self.pos.y += self.line_height;
        self.line_height = 0.0;
    }
}

#[derive(Copy, Clone, Debug, Default)]
/// A layout container as seen during the current frame.
pub struct Div {
    /// Identity.
    pub id: WidgetId,
    /// Bounds on screen.
    pub aabb: Aabb,
    /// Whether the div owns a scroll state.
    pub scrollable: bool,
    /// Farthest point reached by the children, filled in when the div ends.
    pub total_area: Vec2f,
    /// Interaction state of the background.
    pub interact_state: ClickableState,
}

/// Everything a nested div replaces and restores on end.
pub(crate) struct DivFrame {
    pub cursor: Cursor,
    pub font: Option<Rc<dyn GlyphProvider>>,
    pub div: Div,
    pub div_props: ElementProps,
    pub counter: u64,
    pub scroll: Option<ScrollState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Aabb { Aabb::new(0.0, 0.0, 100.0, 200.0) }

    #[test]
    fn default_div_is_unnamed_and_unevaluated() {
        let div = Div::default();
        let copy = div;
        assert!(copy.id.is_none());
        assert_eq!(copy.id, div.id);
        assert!(!copy.scrollable);
        assert_eq!(copy.interact_state, ClickableState::Released);
        assert_eq!((copy.total_area.x, copy.aabb.size.y), (0.0, 0.0));
    }

    #[test]
    fn second_item_wraps_to_the_next_line() {
        let mut c = Cursor::default();
        c.next_line_on_overflow(vec2f(60.0, 20.0), 0.0, &area());
        assert_eq!((c.pos.x, c.pos.y), (0.0, 0.0));
        c.pos.x += 60.0;
        c.next_line_on_overflow(vec2f(60.0, 20.0), 0.0, &area());
        assert_eq!((c.pos.x, c.pos.y), (0.0, 20.0));
        assert_eq!(c.line_height, 20.0);
    }

    #[test]
    fn line_height_tracks_tallest_item() {
        let mut c = Cursor::default();
        c.next_line_on_overflow(vec2f(10.0, 12.0), 0.0, &area());
        c.pos.x += 10.0;
        c.next_line_on_overflow(vec2f(10.0, 30.0), 0.0, &area());
        c.pos.x += 10.0;
        c.next_line_on_overflow(vec2f(10.0, 5.0), 0.0, &area());
        assert_eq!(c.line_height, 30.0);
        c.next_line(&area(), 4.0);
        assert_eq!((c.pos.x, c.pos.y, c.line_height), (4.0, 30.0, 0.0));
    }

    #[test]
    fn disabled_overflow_leaves_cursor_alone() {
        let mut c = Cursor { pos: vec2f(90.0, 0.0), line_height: 7.0, line_overflow: false };
        c.next_line_on_overflow(vec2f(60.0, 20.0), 0.0, &area());
        assert_eq!((c.pos.x, c.pos.y, c.line_height), (90.0, 0.0, 7.0));
    }
}
