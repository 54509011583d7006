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
use super::*;

/// Maximum number of quads accumulated before a forced flush.
pub const MAX_RENDER_BATCH: usize = 10000;
/// Texture units bound per draw call.
pub const MAX_TEX_COUNT_BATCH: usize = 32;

#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// One quad corner as consumed by the batch shader. Attribute locations are 0..=8, 10 and 11.
pub struct Vertex {
    /// Screen position in pixels.
    pub pos: [f32; 2],
    /// Normalized border color.
    pub border_color: [f32; 4],
    /// Border thickness in pixels.
    pub border_width: f32,
    /// Normalized fill color.
    pub color: [f32; 4],
    /// Texture coordinate.
    pub texcoord: [f32; 2],
    /// Bound texture unit, or `-1` for a flat fill.
    pub tex_index: f32,
    /// Logical size of the shape (used by the SDF).
    pub scale: [f32; 2],
    /// Logical top-left of the shape (used by the SDF).
    pub pos_px: [f32; 2],
    /// Corner radius in pixels.
    pub corner_radius: f32,
    /// Clip rect top-left, `-1` when open.
    pub min_coord: [f32; 2],
    /// Clip rect bottom-right, `-1` when open.
    pub max_coord: [f32; 2],
}

/// Index list for `quads` quads: `0,1,2, 2,3,0` shifted by 4 per quad.
pub fn quad_indices(quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(quads * 6);
    for q in 0..quads as u32 {
        let o = q * 4;
        indices.extend_from_slice(&[o, o + 1, o + 2, o + 2, o + 3, o]);
    }
    indices
}

/// GPU collaborator. Implementations own the program, buffers and textures.
pub trait GraphicsBackend {
    /// Updates the viewport and the orthographic projection (`0..width`, `0..height`, y down).
    fn resize(&mut self, width: u32, height: u32);
    /// Issues one indexed triangle draw with `textures[i]` bound to unit `i`.
    fn draw(&mut self, vertices: &[Vertex], indices: &[u32], textures: &[TextureHandle]);
    /// Uploads RGBA8 pixels.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> Result<TextureHandle>;
    /// Releases a texture.
    fn destroy_texture(&mut self, handle: TextureHandle);
}

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// Fill, border and rounding of a submitted shape.
pub struct QuadStyle {
    /// Fill color.
    pub color: Color,
    /// Border color.
    pub border_color: Color,
    /// Border thickness.
    pub border_width: f32,
    /// Corner radius.
    pub corner_radius: f32,
}

impl QuadStyle {
    /// Flat fill without border or rounding.
    pub fn fill(color: Color) -> Self { Self { color, ..Self::default() } }

    /// Style taken from element properties.
    pub fn from_props(color: Color, props: &ElementProps) -> Self {
        Self {
            color,
            border_color: props.border_color,
            border_width: props.border_width,
            corner_radius: props.corner_radius,
        }
    }
}

const RECT_TEXCOORDS: [[f32; 2]; 4] = [[1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0]];
const IMAGE_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

fn centered_corners(center: Vec2f, size: Vec2f) -> [[f32; 2]; 4] {
    let (hx, hy) = (size.x / 2.0, size.y / 2.0);
    [
        [center.x - hx, center.y - hy],
        [center.x + hx, center.y - hy],
        [center.x + hx, center.y + hy],
        [center.x - hx, center.y + hy],
    ]
}

/// Accumulates quads and hands full batches to a [`GraphicsBackend`].
pub struct BatchRenderer<B: GraphicsBackend> {
    backend: B,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    textures: Vec<TextureHandle>,
    drawcalls: usize,
    screen: Vec2f,
}

impl<B: GraphicsBackend> BatchRenderer<B> {
    /// Wraps `backend` and sets its projection to the display size.
    pub fn new(mut backend: B, width: u32, height: u32) -> Self {
        backend.resize(width, height);
        Self {
            backend,
            vertices: Vec::with_capacity(MAX_RENDER_BATCH * 4),
            indices: quad_indices(MAX_RENDER_BATCH),
            textures: Vec::with_capacity(MAX_TEX_COUNT_BATCH),
            drawcalls: 0,
            screen: vec2f(width as f32, height as f32),
        }
    }

    /// Shared access to the backend.
    pub fn backend(&self) -> &B { &self.backend }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }

    /// Display size used for full-screen rounded quads.
    pub fn screen(&self) -> Vec2f { self.screen }

    /// Rebinds the projection after a display resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen = vec2f(width as f32, height as f32);
        self.backend.resize(width, height);
    }

    /// Starts a new frame: drops pending geometry and resets the draw call counter.
    pub fn begin(&mut self) {
        self.vertices.clear();
        self.textures.clear();
        self.drawcalls = 0;
    }

    /// Quads waiting for the next flush.
    pub fn quad_count(&self) -> usize { self.vertices.len() / 4 }

    /// Draw calls issued since `begin`.
    pub fn drawcalls(&self) -> usize { self.drawcalls }

    /// Vertices waiting for the next flush.
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }

    /// Textures bound to the pending batch, in slot order.
    pub fn textures(&self) -> &[TextureHandle] { &self.textures }

    /// Returns the slot of `texture` in the pending batch, assigning the next free one.
    /// Flushes first when every slot is taken.
    pub fn texture_slot(&mut self, texture: TextureHandle) -> f32 {
        if let Some(slot) = self.textures.iter().position(|t| *t == texture) {
            return slot as f32;
        }
        if self.textures.len() >= MAX_TEX_COUNT_BATCH {
            self.flush();
        }
        self.textures.push(texture);
        (self.textures.len() - 1) as f32
    }

    /// Draws the pending batch, if any, and resets it.
    pub fn flush(&mut self) {
        if self.vertices.is_empty() {
            self.textures.clear();
            return;
        }
        let quads = self.quad_count();
        log::debug!("flushing batch: {} quads, {} texture slots", quads, self.textures.len());
        self.backend.draw(&self.vertices, &self.indices[..quads * 6], &self.textures);
        self.drawcalls += 1;
        self.vertices.clear();
        self.textures.clear();
    }

    fn push_quad(&mut self, corners: [[f32; 2]; 4], texcoords: [[f32; 2]; 4], texture: Option<TextureHandle>, template: Vertex) {
        if self.quad_count() + 1 > MAX_RENDER_BATCH {
            self.flush();
        }
        let tex_index = match texture {
            Some(t) => self.texture_slot(t),
            None => -1.0,
        };
        for i in 0..4 {
            self.vertices.push(Vertex { pos: corners[i], texcoord: texcoords[i], tex_index, ..template });
        }
    }

    fn template(style: &QuadStyle, pos: Vec2f, size: Vec2f, clip: &CullRect) -> Vertex {
        let (min_coord, max_coord) = clip.vertex_bounds();
        Vertex {
            border_color: style.border_color.to_zto(),
            border_width: style.border_width,
            color: style.color.to_zto(),
            scale: [size.x, size.y],
            pos_px: [pos.x, pos.y],
            corner_radius: style.corner_radius,
            min_coord,
            max_coord,
            ..Vertex::default()
        }
    }

    /// Submits a flat rectangle with `pos` as its top-left corner.
    ///
    /// Rounded rectangles are emitted as a full-screen quad and carved out by the fragment SDF.
    pub fn push_rect(&mut self, pos: Vec2f, size: Vec2f, style: &QuadStyle, clip: &CullRect) {
        let corners = if style.corner_radius != 0.0 {
            let screen = self.screen;
            centered_corners(vec2f(screen.x / 2.0, screen.y / 2.0), screen)
        } else {
            centered_corners(vec2f(pos.x + size.x / 2.0, pos.y + size.y / 2.0), size)
        };
        let template = Self::template(style, pos, size, clip);
        self.push_quad(corners, RECT_TEXCOORDS, None, template);
    }

    /// Submits a textured quad of `size` at `pos`.
    pub fn push_image(&mut self, pos: Vec2f, size: Vec2f, texture: TextureHandle, style: &QuadStyle, clip: &CullRect) {
        let corners = centered_corners(vec2f(pos.x + size.x / 2.0, pos.y + size.y / 2.0), size);
        let template = Self::template(style, pos, size, clip);
        self.push_quad(corners, IMAGE_TEXCOORDS, Some(texture), template);
    }

    /// Submits a glyph quad shifted down by `y_offset` so the baseline sits below the line top.
    pub fn push_glyph(&mut self, quad: &GlyphQuad, y_offset: f32, color: Color, texture: TextureHandle, clip: &CullRect) {
        let corners = [
            [quad.x0, quad.y0 + y_offset],
            [quad.x1, quad.y0 + y_offset],
            [quad.x1, quad.y1 + y_offset],
            [quad.x0, quad.y1 + y_offset],
        ];
        let texcoords = [[quad.s0, quad.t0], [quad.s1, quad.t0], [quad.s1, quad.t1], [quad.s0, quad.t1]];
        let (min_coord, max_coord) = clip.vertex_bounds();
        let template = Vertex { color: color.to_zto(), min_coord, max_coord, ..Vertex::default() };
        self.push_quad(corners, texcoords, Some(texture), template);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn renderer() -> BatchRenderer<MockBackend> { BatchRenderer::new(MockBackend::default(), 800, 600) }

    #[test]
    fn vertex_layout_is_92_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 92);
        assert_eq!(bytemuck::bytes_of(&Vertex::default()).len(), 92);
    }

    #[test]
    fn index_pattern_per_quad() {
        assert_eq!(quad_indices(2), vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn rect_corners_and_texcoords() {
        let mut r = renderer();
        let style = QuadStyle { color: Color::RED, border_width: 2.0, ..QuadStyle::default() };
        r.push_rect(vec2f(10.0, 20.0), vec2f(100.0, 30.0), &style, &CullRect::default());
        let v = r.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].pos, [10.0, 20.0]);
        assert_eq!(v[2].pos, [110.0, 50.0]);
        assert_eq!(v[0].texcoord, [1.0, 1.0]);
        assert_eq!(v[1].tex_index, -1.0);
        assert_eq!(v[3].scale, [100.0, 30.0]);
        assert_eq!(v[3].pos_px, [10.0, 20.0]);
        assert_eq!(v[0].min_coord, [-1.0, -1.0]);
        assert_eq!(v[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rounded_rect_covers_the_screen() {
        let mut r = renderer();
        let style = QuadStyle { corner_radius: 4.0, ..QuadStyle::fill(Color::WHITE) };
        r.push_rect(vec2f(10.0, 20.0), vec2f(100.0, 30.0), &style, &CullRect::default());
        let v = r.vertices();
        assert_eq!(v[0].pos, [0.0, 0.0]);
        assert_eq!(v[2].pos, [800.0, 600.0]);
        assert_eq!(v[0].scale, [100.0, 30.0]);
    }

    #[test]
    fn textures_share_slots_and_flush_when_exhausted() {
        let mut r = renderer();
        let style = QuadStyle::fill(Color::WHITE);
        let clip = CullRect::default();
        r.push_image(vec2f(0.0, 0.0), vec2f(4.0, 4.0), TextureHandle(7), &style, &clip);
        r.push_image(vec2f(4.0, 0.0), vec2f(4.0, 4.0), TextureHandle(7), &style, &clip);
        assert_eq!(r.textures().len(), 1);
        assert_eq!(r.vertices()[4].tex_index, 0.0);

        for t in 0..MAX_TEX_COUNT_BATCH as u32 {
            r.push_image(vec2f(0.0, 0.0), vec2f(1.0, 1.0), TextureHandle(100 + t), &style, &clip);
        }
        assert_eq!(r.drawcalls(), 1);
        let first = &r.backend().batches[0];
        assert_eq!(first.textures.len(), MAX_TEX_COUNT_BATCH);
        assert_eq!(r.textures().len(), 1);
        assert_eq!(r.vertices()[0].tex_index, 0.0);
    }

    #[test]
    fn quad_capacity_forces_flush() {
        let mut r = renderer();
        let style = QuadStyle::fill(Color::WHITE);
        for _ in 0..MAX_RENDER_BATCH + 3 {
            r.push_rect(vec2f(0.0, 0.0), vec2f(1.0, 1.0), &style, &CullRect::default());
        }
        assert_eq!(r.drawcalls(), 1);
        assert_eq!(r.backend().batches[0].quads, MAX_RENDER_BATCH);
        assert_eq!(r.backend().batches[0].index_count, MAX_RENDER_BATCH * 6);
        assert_eq!(r.quad_count(), 3);
        r.flush();
        assert_eq!(r.drawcalls(), 2);
        r.flush();
        assert_eq!(r.drawcalls(), 2);
    }

    #[test]
    fn glyph_quads_are_offset_by_line_top() {
        let mut r = renderer();
        let q = GlyphQuad { x0: 1.0, y0: -8.0, x1: 9.0, y1: 2.0, s0: 0.1, t0: 0.2, s1: 0.3, t1: 0.4 };
        let clip = CullRect { start: [Some(0.0), Some(5.0)], end: [Some(50.0), Some(60.0)] };
        r.push_glyph(&q, 10.0, Color::WHITE, TextureHandle(3), &clip);
        let v = r.vertices();
        assert_eq!(v[0].pos, [1.0, 2.0]);
        assert_eq!(v[2].pos, [9.0, 12.0]);
        assert_eq!(v[1].texcoord, [0.3, 0.2]);
        assert_eq!(v[0].border_width, 0.0);
        assert_eq!(v[0].scale, [0.0, 0.0]);
        assert_eq!(v[0].max_coord, [50.0, 60.0]);
    }
}
