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

const SELECTION_HIGHLIGHT: Color = color(255, 255, 255, 80);
const PLACEHOLDER_BRIGHTNESS: f32 = 0.75;
const CARET_WIDTH: f32 = 1.0;

/// Observes every typed character of a focused field.
pub type CharCallback = Box<dyn FnMut(char)>;
/// Replaces the default insertion of a typed character.
pub type InsertOverride = Box<dyn FnMut(&mut TextEdit, char)>;
/// Runs once per frame while the field has focus, after the built-in key handling.
pub type KeyCallback = Box<dyn FnMut(&mut TextEdit)>;

/// Caller-owned state of a text input field.
pub struct InputField {
    /// Buffer, cursor and selection.
    pub edit: TextEdit,
    /// Content width in pixels.
    pub width: f32,
    /// Content height of the last frame.
    pub height: f32,
    /// Minimum content height. Zero follows the text.
    pub start_height: f32,
    /// Keeps the height at `start_height` regardless of the text.
    pub retain_height: bool,
    /// Shown dimmed while the field is empty and unfocused.
    pub placeholder: String,
    /// Keyboard focus.
    pub selected: bool,
    /// See [`CharCallback`].
    pub on_char: Option<CharCallback>,
    /// See [`InsertOverride`].
    pub insert_override: Option<InsertOverride>,
    /// See [`KeyCallback`].
    pub on_key: Option<KeyCallback>,
}

impl InputField {
    /// Empty field holding up to `capacity` characters, `width` pixels wide.
    pub fn new(capacity: usize, width: f32) -> Self {
        Self {
            edit: TextEdit::new(capacity),
            width,
            height: 0.0,
            start_height: 0.0,
            retain_height: false,
            placeholder: String::new(),
            selected: false,
            on_char: None,
            insert_override: None,
            on_key: None,
        }
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the minimum height, or the fixed height with `retain`.
    pub fn with_start_height(mut self, height: f32, retain: bool) -> Self {
        self.start_height = height;
        self.retain_height = retain;
        self
    }

    /// Current contents.
    pub fn text(&self) -> &str { self.edit.text() }

    fn content_height(&self, text_height: f32, glyph_height: f32) -> f32 {
        let start = (self.start_height != 0.0).then_some(self.start_height);
        if self.retain_height {
            start.unwrap_or(glyph_height)
        } else if let Some(start) = start {
            start.max(text_height)
        } else if text_height != 0.0 {
            text_height
        } else {
            glyph_height
        }
    }
}

impl<B: GraphicsBackend> Context<B> {
    /// Free text field.
    pub fn input_text(&mut self, field: &mut InputField) -> ClickableState { self.input_field(field, InputKind::Text) }

    /// Field accepting an optionally negative integer.
    pub fn input_int(&mut self, field: &mut InputField) -> ClickableState { self.input_field(field, InputKind::Int) }

    /// Field accepting an optionally negative decimal number.
    pub fn input_float(&mut self, field: &mut InputField) -> ClickableState { self.input_field(field, InputKind::Float) }

    fn input_field(&mut self, field: &mut InputField, kind: InputKind) -> ClickableState {
        field.edit.set_kind(kind);
        let props = self.props_for(self.theme.input_field_props);
        let p = props.padding;
        let font = self.get_current_font();

        if field.selected {
            self.field_keyboard(field);
        }

        let measured = text_layout::text_dimension_ex(font.as_ref(), field.edit.text(), Some(field.width));
        field.height = field.content_height(measured.y, font.max_char_height());
        self.overflow(vec2f(
            field.width + p * 2.0 + props.margin_left + props.margin_right,
            field.height + p * 2.0 + props.margin_top + props.margin_bottom,
        ));
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        let pos = self.cursor.pos;
        let origin = vec2f(pos.x + p, pos.y + p);
        let wrap = Some(origin.x + field.width);

        let size = vec2f(field.width + p * 2.0, field.height + p * 2.0);
        let state = self.clickable(pos, size, None, QuadStyle::from_props(props.color, &props), Color::NO_COLOR, Feedback::FLAT);
        let pointer = self.input.mouse_pos();
        let pointer_index = |edit: &TextEdit| text_layout::char_index_at(font.as_ref(), edit.text(), origin, wrap, pointer);

        if self.input.mouse_down(MouseButton::LEFT) && field.selected && state == ClickableState::Idle {
            field.selected = false;
            self.input_grabbed = false;
            field.edit.unselect_all();
        } else if state.is_clicked() && !field.selected {
            field.selected = true;
            self.input_grabbed = true;
            let index = pointer_index(&field.edit);
            field.edit.set_cursor(index);
        }

        if field.selected {
            let delta = self.input.mouse_delta();
            let still = delta.x == 0.0 && delta.y == 0.0;
            if state.is_held() {
                if self.input.mouse_down(MouseButton::LEFT) && still {
                    let index = pointer_index(&field.edit);
                    field.edit.click_at(index);
                } else if !still {
                    let index = pointer_index(&field.edit);
                    field.edit.drag_to(index, delta.x);
                }
            } else if self.input.mouse_up(MouseButton::LEFT) {
                field.edit.release();
            }

            match field.edit.selection_range() {
                Some((start, end)) => {
                    let params = TextParams { render_solid: true, ..TextParams::at(origin, SELECTION_HIGHLIGHT) }.wrap(wrap).range(Some(start), Some(end));
                    self.text_render(field.edit.text(), &params);
                }
                None => {
                    let caret = text_layout::caret_position(font.as_ref(), field.edit.text(), origin, wrap, field.edit.cursor());
                    self.rect_render(caret, vec2f(CARET_WIDTH, font.max_char_height()), QuadStyle::fill(props.text_color));
                }
            }
        }

        let (text, text_color) = if field.edit.is_empty() {
            let shown = if field.selected { "" } else { field.placeholder.as_str() };
            (shown, props.text_color.brightness(PLACEHOLDER_BRIGHTNESS))
        } else {
            (field.edit.text(), props.text_color)
        };
        self.text_render(text, &TextParams::at(origin, text_color).wrap(wrap));

        self.cursor.pos.x += size.x + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
        state
    }

    fn field_keyboard(&mut self, field: &mut InputField) {
        let typed = self.input.text_input().to_string();
        for c in typed.chars().filter(char::is_ascii) {
            if let Some(on_char) = field.on_char.as_mut() {
                on_char(c);
            }
            match field.insert_override.as_mut() {
                Some(insert) => insert(&mut field.edit, c),
                None => {
                    field.edit.insert_char(c);
                }
            }
        }

        let mods = self.input.key_mods();
        let edit = &mut field.edit;
        if self.input.key_pressed(KeyCode::BACKSPACE) {
            edit.backspace();
        }
        if self.input.key_pressed(KeyCode::LEFT) {
            edit.move_left(mods.is_shift());
        }
        if self.input.key_pressed(KeyCode::RIGHT) {
            edit.move_right(mods.is_shift());
        }
        if self.input.key_pressed(KeyCode::TAB) {
            edit.tab();
        }
        if mods.is_ctrl() {
            if self.input.key_down(KeyCode::A) {
                edit.select_all();
            }
            if self.input.key_down(KeyCode::C) {
                edit.copy(self.clipboard.as_mut());
            }
            if self.input.key_pressed(KeyCode::V) {
                edit.paste(self.clipboard.as_ref());
            }
            if self.input.key_down(KeyCode::X) {
                edit.cut(self.clipboard.as_mut());
            }
        }

        if let Some(on_key) = field.on_key.as_mut() {
            on_key(&mut field.edit);
        }
    }
}
