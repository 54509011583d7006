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

const DEFAULT_SLIDER_WIDTH: f32 = 200.0;
const DEFAULT_HANDLE_SIZE: f32 = 20.0;
const HELD_HANDLE_SIZE: f32 = 22.5;
const DEFAULT_BAR_WIDTH: f32 = 200.0;
const DEFAULT_BAR_HANDLE: f32 = 10.0;

/// Maps `value` from `[from_min, from_max]` to `[to_min, to_max]` with integer arithmetic.
///
/// An empty source range maps everything to `to_min`.
pub fn map_vals(value: i32, from_min: i32, from_max: i32, to_min: i32, to_max: i32) -> i32 {
    if from_max == from_min {
        return to_min;
    }
    let scaled = (value as i64 - from_min as i64) * (to_max as i64 - to_min as i64) / (from_max as i64 - from_min as i64);
    (scaled + to_min as i64) as i32
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
/// Persistent state for integer sliders and progress stripes.
///
/// Zero `width`, `height` or `handle_size` select the defaults (200 px wide, a 20 px handle, a track half
/// the handle high).
pub struct Slider {
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
    /// Track width.
    pub width: f32,
    /// Track height.
    pub height: f32,
    /// Handle side.
    pub handle_size: f32,
    /// Set while the handle is being dragged.
    pub held: bool,
    /// Handle offset from the left end of the track, updated every frame.
    pub handle_pos: f32,
}

impl Slider {
    /// Slider over `[min, max]` with default geometry.
    pub fn new(min: i32, max: i32) -> Self { Self { min, max, ..Self::default() } }

    /// Sets the track size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn handle_side(&self) -> f32 {
        match (self.held, self.height != 0.0) {
            (true, true) => self.height * 4.5,
            (true, false) => HELD_HANDLE_SIZE,
            (false, _) if self.handle_size != 0.0 => self.handle_size,
            (false, true) => self.height * 4.0,
            (false, false) => DEFAULT_HANDLE_SIZE,
        }
    }
}

impl<B: GraphicsBackend> Context<B> {
    /// Horizontal slider editing `value`.
    ///
    /// Pressing the track grabs the handle; while grabbed the pointer x is mapped back into `[min, max]` even
    /// outside the track. The release is reported as `Clicked` wherever it happens.
    pub fn slider_int(&mut self, slider: &mut Slider, value: &mut i32) -> ClickableState {
        let props = self.props_for(self.theme.slider_props);
        let handle = slider.handle_side();
        let width = if slider.width != 0.0 { slider.width } else { DEFAULT_SLIDER_WIDTH };
        let height = if slider.height != 0.0 { slider.height } else { handle / 2.0 };

        self.overflow(vec2f(width + props.margin_left + props.margin_right, handle + props.margin_top + props.margin_bottom));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        let pos = self.cursor.pos;

        let track = QuadStyle { border_width: 0.0, ..QuadStyle::from_props(props.color, &props) };
        let mut state = self.clickable(pos, vec2f(width, height), Some(vec2f(width, handle)), track, Color::NO_COLOR, Feedback::FLAT);

        slider.handle_pos = map_vals(*value, slider.min, slider.max, (handle / 2.0) as i32, (width - handle / 2.0) as i32) as f32 - handle / 2.0;
        let radius = props.corner_radius * if slider.held { 3.5 } else { 3.0 };
        self.rect_render(
            vec2f(pos.x + slider.handle_pos, pos.y - handle / 2.0 + height / 2.0),
            vec2f(handle, handle),
            QuadStyle { corner_radius: radius, ..QuadStyle::from_props(props.text_color, &props) },
        );

        if matches!(state, ClickableState::Held | ClickableState::Clicked) {
            slider.held = true;
        }
        if slider.held && self.input.mouse_up(MouseButton::LEFT) {
            slider.held = false;
            state = ClickableState::Clicked;
        }
        if slider.held {
            let mx = self.input.mouse_pos().x;
            let right = pos.x + width - handle;
            if mx <= pos.x {
                *value = slider.min;
                slider.handle_pos = 0.0;
            } else if mx >= right {
                *value = slider.max;
                slider.handle_pos = width - handle;
            } else {
                slider.handle_pos = mx - pos.x;
                *value = map_vals(mx as i32, pos.x as i32, right as i32, slider.min, slider.max);
            }
            state = ClickableState::Held;
        }

        self.cursor.pos.x += width + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
        state
    }

    /// Read-only slider showing `value` in `[min, max]`. `None` sizes default to 200 px wide and a 10 px handle.
    ///
    /// Returns the interaction state of the handle.
    pub fn progress_bar_val(&mut self, width: Option<f32>, height: Option<f32>, min: i32, max: i32, value: i32) -> ClickableState {
        let props = self.props_for(self.theme.slider_props);
        let handle = height.map_or(DEFAULT_BAR_HANDLE, |h| h * 2.0);
        let width = width.unwrap_or(DEFAULT_BAR_WIDTH);
        let height = height.unwrap_or(handle / 2.0);

        self.overflow(vec2f(width + props.margin_left + props.margin_right, handle + props.margin_top + props.margin_bottom));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top + handle / 4.0;
        let pos = self.cursor.pos;

        let track = QuadStyle { border_width: 0.0, corner_radius: props.corner_radius / 2.0, ..QuadStyle::from_props(props.color, &props) };
        self.clickable(pos, vec2f(width, height), None, track, Color::NO_COLOR, Feedback::FLAT);

        let handle_pos = map_vals(value, min, max, (handle / 2.0) as i32, (width - handle / 2.0) as i32) as f32 - handle / 2.0;
        let state = self.clickable(
            vec2f(pos.x + handle_pos, pos.y - handle / 2.0 + height / 2.0),
            vec2f(handle, handle),
            None,
            QuadStyle::from_props(props.text_color, &props),
            Color::NO_COLOR,
            Feedback::FLAT,
        );

        self.cursor.pos.x += width + props.margin_right;
        self.cursor.pos.y -= props.margin_top + handle / 4.0;
        state
    }

    /// Bar of `width` x `height` filled in proportion to `value` in `[min, max]`. Returns the state of the bar.
    pub fn progress_bar_int(&mut self, value: f32, min: f32, max: f32, width: f32, height: f32) -> ClickableState {
        let props = self.props_for(self.theme.slider_props);
        self.overflow(vec2f(width + props.margin_left + props.margin_right, height + props.margin_top + props.margin_bottom));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        let pos = self.cursor.pos;

        let state = self.clickable(pos, vec2f(width, height), None, QuadStyle::from_props(props.color, &props), Color::NO_COLOR, Feedback::FLAT);
        let filled = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) * width } else { 0.0 };
        if filled > 0.0 {
            self.rect_render(pos, vec2f(filled, height), QuadStyle { corner_radius: props.corner_radius, ..QuadStyle::fill(props.text_color) });
        }

        self.cursor.pos.x += width + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
        state
    }

    /// Thin bar filled up to `value` with a round marker at the fill edge. Returns the state of the bar.
    pub fn progress_stripe(&mut self, slider: &mut Slider, value: i32) -> ClickableState {
        let props = self.props_for(self.theme.slider_props);
        let width = if slider.width != 0.0 { slider.width } else { DEFAULT_SLIDER_WIDTH };
        let height = if slider.height != 0.0 { slider.height } else { DEFAULT_HANDLE_SIZE / 2.0 };

        self.overflow(vec2f(width + props.margin_left + props.margin_right, height + props.margin_top + props.margin_bottom));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        let pos = self.cursor.pos;

        let state = self.clickable(pos, vec2f(width, height), None, QuadStyle::from_props(props.color, &props), Color::NO_COLOR, Feedback::FLAT);
        slider.handle_pos = map_vals(value, slider.min, slider.max, 0, width as i32) as f32;
        let fill = QuadStyle::fill(props.text_color);
        if slider.handle_pos > 0.0 {
            self.rect_render(pos, vec2f(slider.handle_pos, height), fill);
        }
        self.rect_render(
            vec2f(pos.x + slider.handle_pos, pos.y - height / 2.0),
            vec2f(height * 2.0, height * 2.0),
            QuadStyle { corner_radius: props.corner_radius, ..fill },
        );

        self.cursor.pos.x += width + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
        state
    }
}
