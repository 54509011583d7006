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

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Primary button edges sampled for one widget evaluation.
pub struct PointerEdges {
    /// Button went down this frame.
    pub down: bool,
    /// Button went up this frame.
    pub up: bool,
    /// Button is currently down.
    pub held: bool,
}

impl PointerEdges {
    /// Samples the primary button of `input`.
    pub fn primary(input: &Input) -> Self {
        Self {
            down: input.mouse_down(MouseButton::LEFT),
            up: input.mouse_up(MouseButton::LEFT),
            held: input.mouse_held(MouseButton::LEFT),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// The globally exclusive "active" widget lock.
///
/// At most one widget id holds the lock. A holder that stops being declared loses it at the end of the frame.
pub struct Interaction {
    active: WidgetId,
    seen: bool,
}

impl Interaction {
    /// Current lock holder, [`WidgetId::NONE`] when free.
    pub fn active(&self) -> WidgetId { self.active }

    /// Returns `true` when `id` holds the lock.
    pub fn is_active(&self, id: WidgetId) -> bool { !id.is_none() && self.active == id }

    /// Evaluates one widget for this frame.
    pub fn update(&mut self, id: WidgetId, hovered: bool, edges: PointerEdges) -> ClickableState {
        if self.active.is_none() && !id.is_none() && hovered && edges.down {
            log::trace!("widget {:#018x} acquired the active lock", id.raw());
            self.active = id;
        }

        if self.is_active(id) {
            self.seen = true;
            if edges.up || !edges.held {
                log::trace!("widget {:#018x} released the active lock", id.raw());
                self.active = WidgetId::NONE;
                return if hovered { ClickableState::Clicked } else { ClickableState::Idle };
            }
            return ClickableState::Held;
        }

        if hovered { ClickableState::Hovered } else { ClickableState::Idle }
    }

    /// Drops a lock whose holder was not evaluated since the last call.
    pub fn end_frame(&mut self) {
        if !self.active.is_none() && !self.seen {
            log::trace!("widget {:#018x} vanished, releasing the active lock", self.active.raw());
            self.active = WidgetId::NONE;
        }
        self.seen = false;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Brightness multipliers used to tint a widget's fill on hover and press.
pub struct Feedback {
    /// Hover multiplier. `None` keeps the base color.
    pub hover: Option<f32>,
    /// Held multiplier. `None` keeps the base color.
    pub held: Option<f32>,
}

impl Feedback {
    /// Text and image buttons.
    pub const BUTTON: Self = Self { hover: Some(1.2), held: Some(1.3) };
    /// Items that only light up on hover.
    pub const HOVER: Self = Self { hover: Some(1.2), held: None };
    /// No feedback at all.
    pub const FLAT: Self = Self { hover: None, held: None };

    /// Div backgrounds. They react only when `hoverable` is set.
    pub fn div(hoverable: bool) -> Self {
        Self { hover: hoverable.then_some(1.5), held: hoverable.then_some(1.8) }
    }

    /// Fill for `state`. A set `hover_override` replaces the computed hover tint.
    pub fn fill(&self, state: ClickableState, base: Color, hover_override: Color) -> Color {
        match state {
            ClickableState::Held => self.held.map_or(base, |f| base.brightness(f)),
            ClickableState::Hovered | ClickableState::Clicked => match self.hover {
                Some(_) if hover_override.is_set() => hover_override,
                Some(f) => base.brightness(f),
                None => base,
            },
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESS: PointerEdges = PointerEdges { down: true, up: false, held: true };
    const HOLD: PointerEdges = PointerEdges { down: false, up: false, held: true };
    const RELEASE: PointerEdges = PointerEdges { down: false, up: true, held: false };
    const REST: PointerEdges = PointerEdges { down: false, up: false, held: false };

    #[test]
    fn press_then_release_clicks() {
        let id = WidgetId::from_str("ok");
        let mut it = Interaction::default();
        assert_eq!(it.update(id, true, REST), ClickableState::Hovered);
        assert_eq!(it.update(id, true, PRESS), ClickableState::Held);
        assert!(it.is_active(id));
        it.end_frame();
        assert_eq!(it.update(id, true, HOLD), ClickableState::Held);
        it.end_frame();
        assert_eq!(it.update(id, true, RELEASE), ClickableState::Clicked);
        assert!(it.active().is_none());
    }

    #[test]
    fn release_outside_drops_lock_without_click() {
        let id = WidgetId::from_str("ok");
        let mut it = Interaction::default();
        it.update(id, true, PRESS);
        it.end_frame();
        assert_eq!(it.update(id, false, RELEASE), ClickableState::Idle);
        assert!(it.active().is_none());
    }

    #[test]
    fn only_one_widget_holds_the_lock() {
        let a = WidgetId::from_str("a");
        let b = WidgetId::from_str("b");
        let mut it = Interaction::default();
        assert_eq!(it.update(a, true, PRESS), ClickableState::Held);
        assert_eq!(it.update(b, true, PRESS), ClickableState::Hovered);
        assert_eq!(it.active(), a);
        it.end_frame();
        // b is released over, but never owned the lock
        assert_eq!(it.update(b, true, RELEASE), ClickableState::Hovered);
        assert_eq!(it.active(), a);
    }

    #[test]
    fn undeclared_holder_loses_lock_at_frame_end() {
        let id = WidgetId::from_str("gone");
        let mut it = Interaction::default();
        it.update(id, true, PRESS);
        it.end_frame();
        assert_eq!(it.active(), id);
        it.end_frame();
        assert!(it.active().is_none());
    }

    #[test]
    fn pressing_outside_never_acquires() {
        let id = WidgetId::from_str("x");
        let mut it = Interaction::default();
        assert_eq!(it.update(id, false, PRESS), ClickableState::Idle);
        assert!(it.active().is_none());
    }

    #[test]
    fn feedback_tints() {
        let base = color(100, 100, 100, 255);
        assert_eq!(Feedback::BUTTON.fill(ClickableState::Hovered, base, Color::NO_COLOR), color(120, 120, 120, 255));
        assert_eq!(Feedback::BUTTON.fill(ClickableState::Held, base, Color::NO_COLOR), color(130, 130, 130, 255));
        assert_eq!(Feedback::BUTTON.fill(ClickableState::Hovered, base, Color::RED), Color::RED);
        assert_eq!(Feedback::HOVER.fill(ClickableState::Held, base, Color::NO_COLOR), base);
        assert_eq!(Feedback::div(true).fill(ClickableState::Hovered, base, Color::NO_COLOR), color(150, 150, 150, 255));
        assert_eq!(Feedback::div(false).fill(ClickableState::Hovered, base, Color::NO_COLOR), base);
        assert_eq!(Feedback::FLAT.fill(ClickableState::Idle, base, Color::RED), base);
    }
}
