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

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// Clip rectangle of the active container. Each bound can be set or left open independently.
pub struct CullRect {
    /// Left and top bounds.
    pub start: [Option<f32>; 2],
    /// Right and bottom bounds.
    pub end: [Option<f32>; 2],
}

impl CullRect {
    /// Clip rect covering `area`.
    pub fn from_aabb(area: Aabb) -> Self {
        Self {
            start: [Some(area.pos.x), Some(area.pos.y)],
            end: [Some(area.right()), Some(area.bottom())],
        }
    }

    /// Returns `true` when no bound is set.
    pub fn is_open(&self) -> bool { self.start.iter().chain(self.end.iter()).all(Option::is_none) }

    /// Per-vertex clip corners, with `-1` marking an open bound.
    pub fn vertex_bounds(&self) -> ([f32; 2], [f32; 2]) {
        let v = |b: Option<f32>| b.unwrap_or(-1.0);
        ([v(self.start[0]), v(self.start[1])], [v(self.end[0]), v(self.end[1])])
    }

    /// Returns `true` when `item` lies entirely on the far side of any set bound.
    pub fn excludes(&self, item: &Aabb) -> bool {
        let before = |bound: Option<f32>, far_edge: f32| bound.is_some_and(|b| far_edge < b);
        let after = |bound: Option<f32>, near_edge: f32| bound.is_some_and(|b| near_edge > b);
        before(self.start[0], item.right())
            || before(self.start[1], item.bottom())
            || after(self.end[0], item.pos.x)
            || after(self.end[1], item.pos.y)
    }
}

#[derive(Copy, Clone, Debug)]
/// Frame state the cull test depends on.
pub struct CullQuery {
    /// Display size.
    pub viewport: Vec2f,
    /// Height substituted for "auto" sized items.
    pub line_height: f32,
    /// Global render switch. When set everything is culled.
    pub no_render: bool,
    /// Culling is only applied while the current div is the one that last drew a scrollbar.
    pub enabled: bool,
}

/// Replaces an "auto" size with full display width by one line.
pub fn resolve_auto_size(item: Aabb, viewport: Vec2f, line_height: f32) -> Aabb {
    if item.is_auto() { Aabb { pos: item.pos, size: vec2f(viewport.x, line_height) } } else { item }
}

/// Returns `true` when `item` should not be submitted to the batch.
pub fn should_cull(item: Aabb, clip: &CullRect, query: &CullQuery) -> bool {
    if query.no_render {
        return true;
    }
    if !query.enabled {
        return false;
    }
    let item = resolve_auto_size(item, query.viewport, query.line_height);
    let window = Aabb { pos: Vec2f::default(), size: query.viewport };
    !item.overlaps(&window) || clip.excludes(&item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(enabled: bool) -> CullQuery { CullQuery { viewport: vec2f(800.0, 600.0), line_height: 16.0, no_render: false, enabled } }

    #[test]
    fn items_outside_viewport_are_culled() {
        let clip = CullRect::default();
        assert!(should_cull(Aabb::new(0.0, 700.0, 50.0, 20.0), &clip, &query(true)));
        assert!(should_cull(Aabb::new(-80.0, 10.0, 50.0, 20.0), &clip, &query(true)));
        assert!(!should_cull(Aabb::new(-30.0, 10.0, 50.0, 20.0), &clip, &query(true)));
    }

    #[test]
    fn clip_rect_culls_only_fully_excluded_items() {
        let clip = CullRect::from_aabb(Aabb::new(100.0, 100.0, 200.0, 200.0));
        assert!(should_cull(Aabb::new(120.0, 40.0, 20.0, 20.0), &clip, &query(true)));
        assert!(!should_cull(Aabb::new(120.0, 90.0, 20.0, 20.0), &clip, &query(true)));
        assert!(should_cull(Aabb::new(301.0, 150.0, 20.0, 20.0), &clip, &query(true)));
    }

    #[test]
    fn culling_is_narrowed_to_scrollbar_owner() {
        let clip = CullRect::from_aabb(Aabb::new(100.0, 100.0, 200.0, 200.0));
        assert!(!should_cull(Aabb::new(0.0, 700.0, 50.0, 20.0), &clip, &query(false)));
    }

    #[test]
    fn no_render_culls_everything() {
        let q = CullQuery { no_render: true, ..query(false) };
        assert!(should_cull(Aabb::new(10.0, 10.0, 10.0, 10.0), &CullRect::default(), &q));
    }

    #[test]
    fn auto_size_resolves_to_display_width() {
        let item = resolve_auto_size(Aabb::new(5.0, 5.0, -1.0, -1.0), vec2f(800.0, 600.0), 16.0);
        assert_eq!((item.size.x, item.size.y), (800.0, 16.0));
        // an auto sized line just above the clip start is still rejected once resolved
        let clip = CullRect { start: [None, Some(100.0)], end: [None, None] };
        assert!(should_cull(Aabb::new(5.0, 80.0, -1.0, -1.0), &clip, &query(true)));
    }

    #[test]
    fn open_bounds_emit_sentinel() {
        let clip = CullRect { start: [Some(3.0), None], end: [None, Some(9.0)] };
        assert_eq!(clip.vertex_bounds(), ([3.0, -1.0], [-1.0, 9.0]));
        assert!(!clip.is_open());
        assert!(CullRect::default().is_open());
    }
}
