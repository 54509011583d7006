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

/// Below this the smooth-scroll velocity is snapped to zero after a downward scroll.
const VELOCITY_EPSILON: f32 = 0.1;
/// Smallest thumb height in pixels.
pub const MIN_THUMB_HEIGHT: f32 = 20.0;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
/// Caller-owned scroll position of one div. Outlives the div, which is rebuilt every frame.
pub struct ScrollState {
    /// Vertical offset, always in `[-(content - visible), 0]`.
    pub offset: f32,
    /// Smooth-scroll velocity in pixels per frame.
    pub velocity: f32,
    accelerating: bool,
    extent: Option<(f32, f32)>,
}

impl ScrollState {
    /// Starts at the top.
    pub fn new() -> Self { Self::default() }

    /// Last measured `(content, visible)` heights.
    pub fn extent(&self) -> Option<(f32, f32)> { self.extent }

    /// Returns `true` when there is content below the visible area.
    pub fn can_scroll_down(&self) -> bool { self.extent.is_some_and(|(content, visible)| content > visible) }

    /// Moves to `offset`, clamped to the last measured extent.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
        self.clamp();
    }

    pub(crate) fn set_extent(&mut self, content: f32, visible: f32) {
        self.extent = Some((content, visible));
        self.clamp();
    }

    /// Re-applies the bound. Momentum pushing against an edge is dropped.
    pub fn clamp(&mut self) {
        let bounded = match self.extent {
            Some((content, visible)) => clamp_offset(self.offset, content, visible),
            None => self.offset.min(0.0),
        };
        if bounded != self.offset {
            self.offset = bounded;
            self.velocity = 0.0;
        }
    }
}

/// Bounds `offset` to `[-(content - visible), 0]`. Short content pins the offset to 0.
pub fn clamp_offset(offset: f32, content: f32, visible: f32) -> f32 {
    let min = -(content - visible).max(0.0);
    offset.clamp(min, 0.0)
}

impl ScrollPhysics {
    /// Feeds one wheel event. Negative `dy` scrolls down.
    pub fn apply_input(&self, state: &mut ScrollState, dy: f32) {
        if dy < 0.0 && state.can_scroll_down() {
            if self.smooth {
                state.velocity -= self.acceleration;
                state.accelerating = true;
            } else {
                state.offset -= self.pixel_step;
            }
        } else if dy > 0.0 && state.offset != 0.0 {
            if self.smooth {
                state.velocity += self.acceleration;
                state.accelerating = false;
            } else {
                state.offset += self.pixel_step;
            }
        }
        if self.smooth {
            state.velocity = state.velocity.clamp(-self.max_velocity, self.max_velocity);
        }
        state.clamp();
    }

    /// Advances momentum by one frame.
    pub fn integrate(&self, state: &mut ScrollState) {
        if !self.smooth {
            return;
        }
        state.offset += state.velocity;
        state.velocity *= self.deceleration;
        if state.velocity > -VELOCITY_EPSILON && state.accelerating {
            state.velocity = 0.0;
        }
        state.clamp();
    }
}

/// Scrollbar thumb of a div with bounds `div`, or `None` when everything fits.
///
/// `bar` styles the thumb, `div_props` is the div's own style whose padding, border and radius inset the track.
pub fn thumb_rect(div: &Aabb, state: &ScrollState, scrollbar_width: f32, bar: &ElementProps, div_props: &ElementProps) -> Option<Aabb> {
    let (content, visible) = state.extent?;
    if content <= visible || content <= 0.0 {
        return None;
    }
    let track = div.size.y;
    let height = (track * (visible / content) - bar.margin_top * 2.0).max(MIN_THUMB_HEIGHT);
    let inset = bar.margin_top + div_props.padding + div_props.border_width + div_props.corner_radius;
    let top = (div.pos.y + track * (-state.offset / content) + inset).min(div.pos.y + visible - height);
    let x = div.right() - scrollbar_width - bar.margin_right - div_props.padding - div_props.border_width;
    Some(Aabb {
        pos: vec2f(x, top),
        size: vec2f(scrollbar_width, height - div_props.border_width * 2.0 - div_props.corner_radius * 2.0),
    })
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// An ongoing thumb drag, bound to the div it started on.
pub struct ScrollDrag {
    /// The dragged div.
    pub div: WidgetId,
    /// Pointer y when the drag started.
    pub start_y: f32,
    /// Offset when the drag started.
    pub start_offset: f32,
}

impl ScrollDrag {
    /// Sets the offset from the pointer position, overriding any momentum.
    pub fn apply(&self, state: &mut ScrollState, pointer_y: f32) {
        let Some((content, visible)) = state.extent else { return };
        if visible <= 0.0 {
            return;
        }
        state.offset = clamp_offset(self.start_offset - (pointer_y - self.start_y) * (content / visible), content, visible);
        state.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(content: f32, visible: f32) -> ScrollState {
        let mut s = ScrollState::new();
        s.set_extent(content, visible);
        s
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_offset(10.0, 1000.0, 200.0), 0.0);
        assert_eq!(clamp_offset(-900.0, 1000.0, 200.0), -800.0);
        assert_eq!(clamp_offset(-50.0, 100.0, 200.0), 0.0);
    }

    #[test]
    fn thumb_drag_scales_by_content_ratio() {
        let mut s = measured(1000.0, 200.0);
        let drag = ScrollDrag { div: WidgetId::new(7), start_y: 100.0, start_offset: 0.0 };
        drag.apply(&mut s, 110.0);
        assert_eq!(s.offset, -50.0);
        drag.apply(&mut s, 1100.0);
        assert_eq!(s.offset, -800.0);
        drag.apply(&mut s, 0.0);
        assert_eq!(s.offset, 0.0);
    }

    #[test]
    fn thumb_height_is_proportional_and_floored() {
        let div = Aabb::new(0.0, 0.0, 300.0, 200.0);
        let bar = ElementProps { margin_top: 5.0, margin_right: 5.0, ..ElementProps::default() };
        let flat = ElementProps::default();
        let thumb = thumb_rect(&div, &measured(1000.0, 200.0), 8.0, &bar, &flat).expect("content overflows");
        assert_eq!(thumb.size.y, 30.0);
        assert_eq!(thumb.pos.x, 300.0 - 8.0 - 5.0);
        assert_eq!(thumb.pos.y, 5.0);
        let tiny = thumb_rect(&div, &measured(100_000.0, 200.0), 8.0, &bar, &flat).expect("content overflows");
        assert_eq!(tiny.size.y, MIN_THUMB_HEIGHT);
        assert!(thumb_rect(&div, &measured(150.0, 200.0), 8.0, &bar, &flat).is_none());
    }

    #[test]
    fn wheel_respects_bounds_in_both_modes() {
        let smooth = ScrollPhysics::default();
        let mut s = measured(1000.0, 200.0);
        for _ in 0..200 {
            smooth.apply_input(&mut s, -1.0);
            smooth.integrate(&mut s);
            assert!(s.offset <= 0.0 && s.offset >= -800.0);
        }
        assert_eq!(s.offset, -800.0);
        for _ in 0..200 {
            smooth.apply_input(&mut s, 1.0);
            smooth.integrate(&mut s);
            assert!(s.offset <= 0.0 && s.offset >= -800.0);
        }
        assert_eq!(s.offset, 0.0);

        let stepped = ScrollPhysics { smooth: false, ..ScrollPhysics::default() };
        let mut s = measured(230.0, 200.0);
        stepped.apply_input(&mut s, -1.0);
        assert_eq!(s.offset, -20.0);
        stepped.apply_input(&mut s, -1.0);
        assert_eq!(s.offset, -30.0);
        stepped.apply_input(&mut s, 1.0);
        stepped.apply_input(&mut s, 1.0);
        assert_eq!(s.offset, 0.0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let physics = ScrollPhysics::default();
        let mut s = measured(100.0, 200.0);
        physics.apply_input(&mut s, -1.0);
        physics.integrate(&mut s);
        assert_eq!(s.offset, 0.0);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn velocity_is_capped_and_decays() {
        let physics = ScrollPhysics::default();
        let mut s = measured(100_000.0, 200.0);
        for _ in 0..100 {
            physics.apply_input(&mut s, -1.0);
        }
        assert_eq!(s.velocity, -physics.max_velocity);
        physics.integrate(&mut s);
        assert_eq!(s.offset, -100.0);
        assert!((s.velocity + 92.0).abs() < 1e-3);
    }
}
