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
use crate::*;

const SEPARATOR_HEIGHT: f32 = 1.0;

impl<B: GraphicsBackend> Context<B> {
    fn text_wrap_point(&self, props: &ElementProps) -> Option<f32> {
        self.text_wrap.then(|| self.div.aabb.right() - props.margin_right - props.margin_left)
    }

    /// Label in the text style. Wraps at the right edge of the div when [`set_text_wrap`](Self::set_text_wrap) is on.
    pub fn text(&mut self, text: &str) {
        let props = self.props_for(self.theme.text_props);
        let p = props.padding;
        let wrap = self.text_wrap_point(&props);

        let measured = self.text_render(text, &TextParams::measure(self.cursor.pos).wrap(wrap));
        let size = vec2f(measured.width, measured.height);
        self.overflow(vec2f(
            size.x + p * 2.0 + props.margin_left + props.margin_right,
            size.y + p * 2.0 + props.margin_top + props.margin_bottom,
        ));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        let pos = self.cursor.pos;

        if props.color.is_set() {
            self.rect_render(pos, vec2f(size.x + p * 2.0, size.y + p * 2.0), QuadStyle::from_props(props.color, &props));
        }
        self.text_render(text, &TextParams::at(vec2f(pos.x + p, pos.y + p), props.text_color).wrap(wrap));

        self.cursor.pos.x += size.x + p * 2.0 + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
    }

    /// Horizontal rule across the current div, on a line of its own.
    pub fn separator(&mut self) {
        self.next_line();
        let props = self.props_for(self.theme.button_props);
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        self.set_line_height(props.margin_top + SEPARATOR_HEIGHT + props.margin_bottom);

        let width = self.div.aabb.size.x - props.margin_left * 2.0;
        let style = QuadStyle { corner_radius: props.corner_radius, ..QuadStyle::fill(props.color) };
        self.rect_render(self.cursor.pos, vec2f(width, SEPARATOR_HEIGHT), style);

        self.cursor.pos.y -= props.margin_top;
        self.next_line();
    }

    /// Flat rect of `width` x `height` without margins.
    pub fn rect(&mut self, width: f32, height: f32, color: Color, corner_radius: f32) {
        self.overflow(vec2f(width, height));
        self.rect_render(self.cursor.pos, vec2f(width, height), QuadStyle { corner_radius, ..QuadStyle::fill(color) });
        self.cursor.pos.x += width;
    }

    /// `texture` at its own size, tinted with the image style color.
    pub fn image(&mut self, texture: Texture) {
        let props = self.props_for(self.theme.image_props);
        let size = vec2f(texture.width as f32, texture.height as f32);
        self.overflow(vec2f(
            size.x + props.margin_left + props.margin_right,
            size.y + props.margin_top + props.margin_bottom,
        ));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;

        self.image_render(self.cursor.pos, texture, QuadStyle::from_props(props.color, &props));

        self.cursor.pos.x += size.x + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use crate::*;

    #[test]
    fn text_advances_by_width_and_margins() {
        let mut ctx = test_context();
        let mut after = (0.0, 0.0);
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.text("abc");
            after = (ctx.get_ptr_x(), ctx.get_line_height());
        });
        assert_eq!(after, (5.0 + 24.0 + 5.0, 10.0 + 10.0));
        let batch = &ctx.backend().batches[0];
        assert_eq!(batch.textures, vec![TextureHandle(1)]);
        // root background plus one quad per glyph
        assert_eq!(batch.quads, 1 + 3);
    }

    #[test]
    fn wrapped_text_grows_the_line() {
        let mut ctx = test_context();
        let mut heights = Vec::new();
        for wrap in [false, true] {
            frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
                ctx.set_text_wrap(wrap);
                ctx.div(vec2f(0.0, 0.0), vec2f(100.0, 300.0), None, |ctx| {
                    ctx.text("aaaa bbbb cccc dddd");
                    heights.push(ctx.get_line_height());
                });
            });
        }
        assert_eq!(heights[0], 20.0);
        assert!(heights[1] > heights[0]);
    }

    #[test]
    fn separator_takes_a_line_of_its_own() {
        let mut ctx = test_context();
        let mut y = (0.0, 0.0);
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.rect(30.0, 12.0, Color::RED, 0.0);
            ctx.separator();
            y = (ctx.get_ptr_x(), ctx.get_ptr_y());
        });
        assert_eq!(y, (0.0, 12.0 + 5.0 + 1.0 + 5.0));
    }

    #[test]
    fn rect_wraps_when_the_line_is_full() {
        let mut ctx = test_context();
        let mut positions = Vec::new();
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.div(vec2f(0.0, 0.0), vec2f(100.0, 100.0), None, |ctx| {
                for _ in 0..3 {
                    positions.push((ctx.get_ptr_x(), ctx.get_ptr_y()));
                    ctx.rect(40.0, 10.0, Color::BLUE, 0.0);
                }
                positions.push((ctx.get_ptr_x(), ctx.get_ptr_y()));
            });
        });
        assert_eq!(positions, vec![(0.0, 0.0), (40.0, 0.0), (80.0, 0.0), (40.0, 10.0)]);
    }

    #[test]
    fn image_uses_its_texture() {
        let mut ctx = test_context();
        let tex = Texture { handle: TextureHandle(55), width: 32, height: 16 };
        let mut after = 0.0;
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.image(tex);
            after = ctx.get_ptr_x();
        });
        assert_eq!(after, 5.0 + 32.0 + 5.0);
        let batch = &ctx.backend().batches[0];
        assert_eq!(batch.textures, vec![TextureHandle(55)]);
        assert_eq!(batch.vertices.last().map(|v| v.scale), Some([32.0, 16.0]));
    }
}
