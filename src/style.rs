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

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// Visual properties of one widget category. Copied by value on every push and pop.
pub struct ElementProps {
    /// Fill color.
    pub color: Color,
    /// Fill while hovered. Ignored when its alpha is zero.
    pub hover_color: Color,
    /// Text color.
    pub text_color: Color,
    /// Text color while hovered. Ignored when its alpha is zero.
    pub hover_text_color: Color,
    /// Border color.
    pub border_color: Color,
    /// Inner padding on every side.
    pub padding: f32,
    /// Space above the element.
    pub margin_top: f32,
    /// Space below the element.
    pub margin_bottom: f32,
    /// Space left of the element.
    pub margin_left: f32,
    /// Space right of the element.
    pub margin_right: f32,
    /// Border thickness in pixels.
    pub border_width: f32,
    /// Corner radius in pixels. Zero draws a sharp rectangle.
    pub corner_radius: f32,
}

impl ElementProps {
    /// Sets all four margins to `m`.
    pub fn with_margins(mut self, m: f32) -> Self {
        self.margin_top = m;
        self.margin_bottom = m;
        self.margin_left = m;
        self.margin_right = m;
        self
    }

    fn item(text_color: Color) -> Self {
        Self {
            color: Color::PRIMARY_ITEM,
            text_color,
            border_color: Color::SECONDARY_ITEM,
            padding: 10.0,
            border_width: 4.0,
            ..Self::default()
        }
        .with_margins(5.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Scroll wheel behaviour shared by every scrollable div.
pub struct ScrollPhysics {
    /// Velocity added per wheel notch in smooth mode.
    pub acceleration: f32,
    /// Velocity is clamped to `[-max_velocity, max_velocity]`.
    pub max_velocity: f32,
    /// Multiplier applied to the velocity every frame.
    pub deceleration: f32,
    /// Offset change per wheel notch when smooth scrolling is off.
    pub pixel_step: f32,
    /// Enables momentum scrolling.
    pub smooth: bool,
}

impl Default for ScrollPhysics {
    fn default() -> Self { Self { acceleration: 2.5, max_velocity: 100.0, deceleration: 0.92, pixel_step: 20.0, smooth: true } }
}

#[derive(Clone)]
/// Per-category defaults plus global scroll settings.
pub struct Theme {
    /// Font used when no override is pushed.
    pub font: Rc<dyn GlyphProvider>,
    /// Buttons, image buttons and items.
    pub button_props: ElementProps,
    /// Container backgrounds.
    pub div_props: ElementProps,
    /// Plain text.
    pub text_props: ElementProps,
    /// Images.
    pub image_props: ElementProps,
    /// Text input fields.
    pub input_field_props: ElementProps,
    /// Checkboxes.
    pub checkbox_props: ElementProps,
    /// Sliders and progress bars.
    pub slider_props: ElementProps,
    /// Scrollbar thumbs.
    pub scrollbar_props: ElementProps,
    /// Scroll behaviour.
    pub physics: ScrollPhysics,
    /// Scrollbar thumb width in pixels.
    pub scrollbar_width: f32,
    /// Drawn inside a ticked checkbox. An inset rect is used when unset.
    pub tick_texture: Option<Texture>,
    /// Arrow on the right of a dropdown button.
    pub arrow_texture: Option<Texture>,
}

impl Theme {
    /// Builds the default palette around `font`.
    pub fn new(font: Rc<dyn GlyphProvider>) -> Self {
        // text carries a border width with an invisible border color; the width still insets wrapped text
        let text_props = ElementProps {
            text_color: Color::WHITE,
            border_width: 5.0,
            ..ElementProps::default()
        }
        .with_margins(5.0);

        Self {
            font,
            button_props: ElementProps::item(Color::BLACK),
            div_props: ElementProps { color: color(45, 45, 45, 255), ..ElementProps::default() },
            text_props,
            image_props: ElementProps { color: Color::WHITE, ..ElementProps::default() }.with_margins(5.0),
            input_field_props: ElementProps::item(Color::BLACK),
            checkbox_props: ElementProps::item(Color::WHITE),
            slider_props: ElementProps::item(Color::SECONDARY_ITEM),
            scrollbar_props: ElementProps {
                color: Color::SECONDARY_ITEM,
                border_color: Color::BLACK,
                margin_right: 5.0,
                margin_top: 5.0,
                ..ElementProps::default()
            },
            physics: ScrollPhysics::default(),
            scrollbar_width: 8.0,
            tick_texture: None,
            arrow_texture: None,
        }
    }
}

const STYLE_STACK_INIT_CAP: usize = 4;

#[derive(Clone, Debug)]
/// LIFO of [`ElementProps`] overriding the theme defaults.
///
/// Capacity doubles when full and halves once occupancy drops to a quarter.
pub struct StyleStack {
    items: Vec<ElementProps>,
    cap: usize,
}

impl Default for StyleStack {
    fn default() -> Self { Self::new() }
}

impl StyleStack {
    /// Creates an empty stack.
    pub fn new() -> Self { Self { items: Vec::with_capacity(STYLE_STACK_INIT_CAP), cap: STYLE_STACK_INIT_CAP } }

    /// Pushes a copy of `props`.
    pub fn push(&mut self, props: ElementProps) {
        if self.items.len() == self.cap {
            self.cap *= 2;
            self.items.reserve_exact(self.cap - self.items.len());
        }
        self.items.push(props);
    }

    /// Removes and returns the top entry.
    ///
    /// Popping an empty stack is a caller bug: debug builds assert, release builds return `None`.
    pub fn pop(&mut self) -> Option<ElementProps> {
        debug_assert!(!self.items.is_empty(), "style stack underflow");
        let top = self.items.pop()?;
        let len = self.items.len();
        if len > 0 && len == self.cap / 4 {
            self.cap /= 2;
            self.items.shrink_to(self.cap);
        }
        Some(top)
    }

    /// Top entry, if any.
    pub fn peek(&self) -> Option<&ElementProps> { self.items.last() }

    /// Number of entries.
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` when nothing is pushed.
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Logical capacity following the doubling/halving policy.
    pub fn capacity(&self) -> usize { self.cap }

    /// Returns the top entry or `default` when the stack is empty.
    pub fn resolve(&self, default: ElementProps) -> ElementProps { self.peek().copied().unwrap_or(default) }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.cap = STYLE_STACK_INIT_CAP;
        self.items.shrink_to(self.cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn props(border: f32) -> ElementProps { ElementProps { border_width: border, ..ElementProps::default() } }

    #[test]
    fn resolve_falls_back_to_theme_default() {
        let theme = Theme::new(test_font());
        let stack = StyleStack::new();
        assert_eq!(stack.resolve(theme.button_props), theme.button_props);
    }

    #[test]
    fn balanced_push_pop_restores_visible_props() {
        let theme = Theme::new(test_font());
        let mut stack = StyleStack::new();
        stack.push(props(1.0));
        let before = stack.resolve(theme.div_props);
        for i in 0..9 {
            stack.push(props(i as f32 + 10.0));
        }
        assert_eq!(stack.resolve(theme.div_props).border_width, 18.0);
        for _ in 0..9 {
            stack.pop();
        }
        assert_eq!(stack.resolve(theme.div_props), before);
    }

    #[test]
    fn capacity_doubles_and_halves() {
        let mut stack = StyleStack::new();
        for i in 0..5 {
            stack.push(props(i as f32));
        }
        assert_eq!(stack.capacity(), 8);
        for _ in 0..3 {
            stack.pop();
        }
        // 2 left == 8 / 4
        assert_eq!(stack.capacity(), 4);
        assert_eq!(stack.pop().map(|p| p.border_width), Some(1.0));
        // 1 left == 4 / 4
        assert_eq!(stack.capacity(), 2);
        assert_eq!(stack.pop().map(|p| p.border_width), Some(0.0));
        assert_eq!(stack.capacity(), 2);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "style stack underflow")]
    fn popping_empty_stack_asserts() {
        let mut stack = StyleStack::new();
        stack.pop();
    }

    #[test]
    fn default_theme_palette() {
        let theme = Theme::new(test_font());
        assert_eq!(theme.button_props.color, Color::PRIMARY_ITEM);
        assert_eq!(theme.button_props.padding, 10.0);
        assert_eq!(theme.checkbox_props.text_color, Color::WHITE);
        assert_eq!(theme.slider_props.text_color, Color::SECONDARY_ITEM);
        assert_eq!(theme.div_props.color, color(45, 45, 45, 255));
        assert_eq!(theme.text_props.margin_left, 5.0);
        assert_eq!(theme.physics.max_velocity, 100.0);
        assert_eq!(theme.scrollbar_width, 8.0);
    }
}
