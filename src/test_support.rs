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
//! Fixtures shared by the unit tests: a recording backend, a fixed-advance font and frame helpers.

use std::rc::Rc;

use super::*;

pub(crate) struct RecordedBatch {
    pub quads: usize,
    pub index_count: usize,
    pub textures: Vec<TextureHandle>,
    pub vertices: Vec<Vertex>,
}

#[derive(Default)]
pub(crate) struct MockBackend {
    pub batches: Vec<RecordedBatch>,
    pub size: (u32, u32),
    pub created: Vec<(TextureHandle, u32, u32)>,
    pub destroyed: Vec<TextureHandle>,
    next_texture: u32,
}

impl GraphicsBackend for MockBackend {
    fn resize(&mut self, width: u32, height: u32) { self.size = (width, height); }

    fn draw(&mut self, vertices: &[Vertex], indices: &[u32], textures: &[TextureHandle]) {
        self.batches.push(RecordedBatch {
            quads: vertices.len() / 4,
            index_count: indices.len(),
            textures: textures.to_vec(),
            vertices: vertices.to_vec(),
        });
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8], _filter: TextureFilter) -> Result<TextureHandle> {
        if rgba.len() != (width * height * 4) as usize {
            return Err(WarpError::Backend("pixel buffer size mismatch".into()));
        }
        self.next_texture += 1;
        let handle = TextureHandle(100 + self.next_texture);
        self.created.push((handle, width, height));
        Ok(handle)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) { self.destroyed.push(handle); }
}

/// Monospace 8px advance, 10px tall glyphs, 10px line advance.
pub(crate) fn fixed_font() -> BakedFont {
    let chars = (FIRST_BAKED_CHAR..LAST_BAKED_CHAR)
        .map(|code| {
            let i = (code - FIRST_BAKED_CHAR) as u16;
            BakedChar {
                x0: i * 8,
                y0: 0,
                x1: i * 8 + 8,
                y1: 10,
                xoff: 0.0,
                yoff: -10.0,
                xadvance: 8.0,
                present: code != 127,
            }
        })
        .collect();
    BakedFont::from_chars(chars, 1024, 16, 10.0, 10.0).with_texture(TextureHandle(1))
}

pub(crate) fn test_font() -> Rc<dyn GlyphProvider> { Rc::new(fixed_font()) }

pub(crate) fn test_context() -> Context<MockBackend> {
    Context::new(MockBackend::default(), Theme::new(test_font()), Box::new(MemoryClipboard::default()), 800, 600)
}

/// Runs one frame with the pointer at `(x, y)` and the primary button in state `down`.
pub(crate) fn frame_at<F: FnOnce(&mut Context<MockBackend>)>(ctx: &mut Context<MockBackend>, x: f32, y: f32, down: bool, f: F) {
    let input = ctx.input_mut();
    input.mousemove(x, y);
    if down {
        input.mousedown(MouseButton::LEFT);
    } else {
        input.mouseup(MouseButton::LEFT);
    }
    ctx.frame(f);
}
