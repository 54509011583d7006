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
use super::{outer_size, padded};
use crate::*;

const DEFAULT_DROPDOWN_LABEL: &str = "Select";
const DROPDOWN_ARROW_SIZE: Vec2f = Vec2f { x: 20.0, y: 10.0 };

impl<B: GraphicsBackend> Context<B> {
    fn label_color(&self, pos: Vec2f, size: Vec2f, props: &ElementProps) -> Color {
        if props.hover_text_color.is_set() && self.hovered(pos, size) {
            props.hover_text_color
        } else {
            props.text_color
        }
    }

    fn enter_margins(&mut self, props: &ElementProps) -> Vec2f {
        self.cursor.pos.x += props.margin_left;
        self.cursor.pos.y += props.margin_top;
        self.cursor.pos
    }

    fn leave_margins(&mut self, width: f32, props: &ElementProps) {
        self.cursor.pos.x += width + props.margin_right;
        self.cursor.pos.y -= props.margin_top;
    }

    /// Text button sized to its label.
    pub fn button(&mut self, text: &str) -> ClickableState {
        let props = self.props_for(self.theme.button_props);
        let p = props.padding;
        let dim = self.text_dimension(text);
        self.overflow(outer_size(dim, &props));
        let pos = self.enter_margins(&props);
        let text_color = self.label_color(pos, dim, &props);

        let state = self.clickable(pos, padded(dim, p), None, QuadStyle::from_props(props.color, &props), props.hover_color, Feedback::BUTTON);
        self.text_render(text, &TextParams::at(vec2f(pos.x + p, pos.y + p), text_color));

        self.leave_margins(dim.x + p * 2.0, &props);
        state
    }

    /// Text button with a fixed content size. `None` takes the label size on that axis.
    ///
    /// The label is centered and clipped at the right edge of the content area.
    pub fn button_fixed(&mut self, text: &str, width: Option<f32>, height: Option<f32>) -> ClickableState {
        let props = self.props_for(self.theme.button_props);
        let p = props.padding;
        let dim = self.text_dimension(text);
        let content = vec2f(width.unwrap_or(dim.x), height.unwrap_or(dim.y));
        self.overflow(outer_size(content, &props));
        let pos = self.enter_margins(&props);
        let text_color = self.label_color(pos, dim, &props);

        let state = self.clickable(pos, padded(content, p), None, QuadStyle::from_props(props.color, &props), props.hover_color, Feedback::HOVER);

        let saved_end = self.cull.end[0];
        self.set_cull_end_x(pos.x + content.x + p);
        let text_pos = vec2f(pos.x + p + (content.x - dim.x) / 2.0, pos.y + p + (content.y - dim.y) / 2.0);
        self.text_render(text, &TextParams::at(text_pos, text_color));
        self.cull.end[0] = saved_end;

        self.leave_margins(content.x + p * 2.0, &props);
        state
    }

    /// Button showing `texture` at its own size.
    pub fn image_button(&mut self, texture: Texture) -> ClickableState { self.image_button_fixed(texture, None, None) }

    /// Button showing `texture`, with a fixed content size. The image is centered horizontally.
    pub fn image_button_fixed(&mut self, texture: Texture, width: Option<f32>, height: Option<f32>) -> ClickableState {
        let props = self.props_for(self.theme.button_props);
        let p = props.padding;
        let content = vec2f(width.unwrap_or(texture.width as f32), height.unwrap_or(texture.height as f32));
        self.overflow(outer_size(content, &props));
        let pos = self.enter_margins(&props);

        let state = self.clickable(pos, padded(content, p), None, QuadStyle::from_props(props.color, &props), props.hover_color, Feedback::BUTTON);
        let image_pos = vec2f(pos.x + p + (content.x - texture.width as f32) / 2.0, pos.y + p);
        self.image_render(image_pos, texture, QuadStyle { corner_radius: props.corner_radius, ..QuadStyle::fill(Color::WHITE) });

        self.leave_margins(content.x + p * 2.0, &props);
        state
    }

    /// Empty clickable area of `size`, styled like a button.
    pub fn item(&mut self, size: Vec2f) -> ClickableState {
        let props = self.props_for(self.theme.button_props);
        self.overflow(outer_size(size, &props));
        let pos = self.enter_margins(&props);
        let state = self.clickable(pos, size, None, QuadStyle::from_props(props.color, &props), props.hover_color, Feedback::HOVER);
        self.leave_margins(size.x, &props);
        state
    }

    /// Box followed by a label. Clicking the box flips `value`.
    ///
    /// A ticked box is filled with `tick_color` when set. The tick is the theme's tick texture tinted with
    /// `tex_color`, or an inset rect when the theme has none.
    pub fn checkbox(&mut self, text: &str, value: &mut bool, tick_color: Color, tex_color: Color) -> ClickableState {
        let props = self.props_for(self.theme.checkbox_props);
        let p = props.padding;
        let label = self.text_dimension(text);
        let side = label.y;
        self.overflow(outer_size(vec2f(side, side), &props));
        let pos = self.enter_margins(&props);

        let fill = if *value && tick_color.is_set() { tick_color } else { props.color };
        let state = self.clickable(pos, padded(vec2f(side, side), p), None, QuadStyle::from_props(fill, &props), Color::NO_COLOR, Feedback::FLAT);
        let label_pos = vec2f(pos.x + side + p * 2.0 + props.margin_right, pos.y + p);
        self.text_render(text, &TextParams::at(label_pos, props.text_color));

        if state.is_clicked() {
            *value = !*value;
        }
        if *value {
            let tint = if tex_color.is_set() { tex_color } else { props.text_color };
            match self.theme.tick_texture {
                Some(tick) => {
                    let tick = Texture { width: side as u32, height: side as u32, ..tick };
                    self.image_render(vec2f(pos.x + p, pos.y + p), tick, QuadStyle { corner_radius: props.corner_radius, ..QuadStyle::fill(tint) });
                }
                None => {
                    let inset = side * 0.2;
                    let mark = QuadStyle { corner_radius: props.corner_radius / 2.0, ..QuadStyle::fill(tint) };
                    self.rect_render(vec2f(pos.x + p + inset, pos.y + p + inset), vec2f(side - inset * 2.0, side - inset * 2.0), mark);
                }
            }
        }

        self.leave_margins(side + p * 2.0 + props.margin_right + label.x, &props);
        state
    }

    /// Button that opens a list of `items` below itself.
    ///
    /// `selected` receives the index of a released item. `opened` toggles on button clicks and is cleared by any
    /// release elsewhere, or by Escape while no text field has focus. `width` and `height` size the content of
    /// the button and of the list.
    pub fn dropdown_menu(&mut self, items: &[&str], placeholder: &str, width: f32, height: f32, selected: &mut Option<usize>, opened: &mut bool) -> ClickableState {
        let props = self.props_for(self.theme.button_props);
        let p = props.padding;
        let font = self.get_current_font();
        let label = match selected.and_then(|i| items.get(i).copied()) {
            Some(item) => item,
            None if placeholder.is_empty() => DEFAULT_DROPDOWN_LABEL,
            None => placeholder,
        };
        let dim = self.text_dimension(label);

        let item_height = font.max_char_height() + if *opened { height + p * 4.0 + props.margin_top } else { p * 2.0 };
        self.cursor
            .next_line_on_overflow(vec2f(width + p * 2.0 + props.margin_right, item_height + props.margin_top + props.margin_bottom), 0.0, &self.div.aabb);
        let pos = self.enter_margins(&props);

        let button_size = vec2f(width + p * 2.0, dim.y + p * 2.0);
        let state = self.clickable(pos, button_size, None, QuadStyle::from_props(props.color, &props), props.hover_color, Feedback::HOVER);
        self.text_render(label, &TextParams::at(vec2f(pos.x + p, pos.y + p), props.text_color));
        if let Some(arrow) = self.theme.arrow_texture {
            let arrow = Texture { width: DROPDOWN_ARROW_SIZE.x as u32, height: DROPDOWN_ARROW_SIZE.y as u32, ..arrow };
            let arrow_pos = vec2f(pos.x + width + p - DROPDOWN_ARROW_SIZE.x, pos.y + (button_size.y - DROPDOWN_ARROW_SIZE.y) / 2.0);
            self.image_render(arrow_pos, arrow, QuadStyle::fill(props.text_color));
        }

        if state.is_clicked() {
            *opened = !*opened;
        }
        if *opened {
            let released_elsewhere = self.input.mouse_up(MouseButton::LEFT) && !state.is_clicked();
            if released_elsewhere || (!self.input_grabbed && self.input.key_down(KeyCode::ESCAPE)) {
                *opened = false;
            }
            self.dropdown_list(items, pos, button_size, height, &props, selected);
        }

        self.leave_margins(button_size.x, &props);
        state
    }

    fn dropdown_list(&mut self, items: &[&str], pos: Vec2f, button_size: Vec2f, height: f32, props: &ElementProps, selected: &mut Option<usize>) {
        let p = props.padding;
        let list_props = ElementProps {
            corner_radius: props.corner_radius,
            border_color: props.border_color,
            border_width: props.border_width,
            color: props.color,
            ..self.theme.div_props
        };
        self.push_style_props(list_props);
        self.div_begin(vec2f(pos.x, pos.y + button_size.y), vec2f(button_size.x, height + p * 2.0), None);
        self.pop_style_props();

        let line = self.theme.font.font_size();
        let text_props = ElementProps { text_color: props.text_color, ..self.theme.text_props };
        for (i, item) in items.iter().enumerate() {
            let at = self.cursor.pos;
            let hovered = self.hovered(vec2f(at.x + text_props.margin_left, at.y + text_props.margin_top), vec2f(button_size.x, line));
            if hovered {
                self.rect_render(at, vec2f(button_size.x, line + props.margin_top), QuadStyle::fill(list_props.color.brightness(1.2)));
                if self.input.mouse_up(MouseButton::LEFT) {
                    *selected = Some(i);
                }
            }
            self.push_style_props(text_props);
            self.text(item);
            self.pop_style_props();
            self.next_line();
        }
        self.div_end();
    }

    /// Row of buttons, or a column when `vertical` is set. The `selected` entry is drawn brighter and `per_item`
    /// runs after each entry. Returns the clicked entry.
    pub fn menu_item_list<F: FnMut(&mut Self, usize)>(&mut self, items: &[&str], selected: Option<usize>, mut per_item: F, vertical: bool) -> Option<usize> {
        let props = self.props_for(self.theme.button_props);
        let p = props.padding;
        let line = self.get_current_font().font_size();
        let width: f32 = items.iter().map(|item| self.text_dimension(item).x + p * 2.0).sum();
        self.overflow(vec2f(width + p * 2.0 + props.margin_left + props.margin_right, line + p * 2.0 + props.margin_top + props.margin_bottom));
        self.cursor.pos.x += props.margin_left;

        let mut clicked = None;
        for (i, item) in items.iter().enumerate() {
            let mut item_props = ElementProps { margin_left: 0.0, margin_right: 0.0, ..props };
            if selected == Some(i) {
                item_props.color = item_props.color.brightness(1.2);
            }
            self.push_style_props(item_props);
            if self.button(item).is_clicked() {
                clicked = Some(i);
            }
            self.pop_style_props();
            per_item(self, i);
            if vertical {
                self.next_line();
                self.cursor.pos.x += props.margin_left;
            }
        }
        clicked
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use crate::*;

    fn click<F: FnMut(&mut Context<MockBackend>)>(ctx: &mut Context<MockBackend>, x: f32, y: f32, mut f: F) {
        frame_at(ctx, x, y, false, &mut f);
        frame_at(ctx, x, y, true, &mut f);
        frame_at(ctx, x, y, false, &mut f);
    }

    #[test]
    fn button_sequence() {
        let mut ctx = test_context();
        let mut states = Vec::new();
        click(&mut ctx, 20.0, 20.0, |ctx| states.push(ctx.button("OK")));
        assert_eq!(states, vec![ClickableState::Idle, ClickableState::Held, ClickableState::Clicked]);
    }

    #[test]
    fn button_advances_cursor_past_padding_and_margins() {
        let mut ctx = test_context();
        let mut after = (0.0, 0.0, 0.0);
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.button("OK");
            after = (ctx.get_ptr_x(), ctx.get_ptr_y(), ctx.get_line_height());
        });
        // 5 margin + 16 text + 2 * 10 padding + 5 margin
        assert_eq!(after, (46.0, 0.0, 40.0));
    }

    #[test]
    fn fixed_button_clips_label_and_restores_clip() {
        let mut ctx = test_context();
        let mut clip = None;
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.button_fixed("a very long label", Some(40.0), None);
            clip = ctx.cull.end[0];
        });
        assert_eq!(clip, Some(800.0));
        let batch = &ctx.backend().batches[0];
        let clipped = batch.vertices.iter().filter(|v| v.max_coord[0] == 5.0 + 40.0 + 10.0).count();
        assert_eq!(clipped, "a very long label".len() * 4);
    }

    #[test]
    fn item_press_held_then_click_off_target_is_idle() {
        let mut ctx = test_context();
        let mut states = Vec::new();
        frame_at(&mut ctx, 10.0, 10.0, false, |ctx| states.push(ctx.item(vec2f(100.0, 30.0))));
        frame_at(&mut ctx, 10.0, 10.0, true, |ctx| states.push(ctx.item(vec2f(100.0, 30.0))));
        frame_at(&mut ctx, 300.0, 300.0, true, |ctx| states.push(ctx.item(vec2f(100.0, 30.0))));
        frame_at(&mut ctx, 300.0, 300.0, false, |ctx| states.push(ctx.item(vec2f(100.0, 30.0))));
        assert_eq!(states, vec![ClickableState::Idle, ClickableState::Held, ClickableState::Held, ClickableState::Idle]);
        assert!(ctx.interaction.active().is_none());
    }

    #[test]
    fn checkbox_toggles_and_draws_tick() {
        let mut ctx = test_context();
        let mut value = false;
        click(&mut ctx, 15.0, 15.0, |ctx| {
            ctx.checkbox("x", &mut value, Color::NO_COLOR, Color::NO_COLOR);
        });
        assert!(value);

        let tick = Texture { handle: TextureHandle(7), width: 16, height: 16 };
        ctx.theme_mut().tick_texture = Some(tick);
        frame_at(&mut ctx, 500.0, 500.0, false, |ctx| {
            ctx.checkbox("x", &mut value, Color::GREEN, Color::NO_COLOR);
        });
        let batch = ctx.backend().batches.last().expect("batch");
        assert!(batch.textures.contains(&TextureHandle(7)));
        assert!(batch.vertices.iter().any(|v| v.color == Color::GREEN.to_zto()));
        assert!(value);
    }

    #[test]
    fn dropdown_opens_selects_and_closes() {
        let mut ctx = test_context();
        let mut selected = None;
        let mut opened = false;
        let items = ["a", "b"];
        let mut menu = |ctx: &mut Context<MockBackend>| {
            ctx.dropdown_menu(&items, "", 100.0, 60.0, &mut selected, &mut opened);
        };
        click(&mut ctx, 20.0, 20.0, &mut menu);
        drop(menu);
        assert!(opened);
        assert_eq!(selected, None);

        // the list starts below the 30 px button; the second entry is hovered at y 64..74
        let mut menu = |ctx: &mut Context<MockBackend>| {
            ctx.dropdown_menu(&items, "", 100.0, 60.0, &mut selected, &mut opened);
        };
        click(&mut ctx, 50.0, 68.0, &mut menu);
        drop(menu);
        assert_eq!(selected, Some(1));
        assert!(!opened);
    }

    #[test]
    fn dropdown_closes_on_escape() {
        let mut ctx = test_context();
        let mut selected = None;
        let mut opened = true;
        ctx.input_mut().keydown_code(KeyCode::ESCAPE);
        frame_at(&mut ctx, 500.0, 500.0, false, |ctx| {
            ctx.dropdown_menu(&["a"], "Pick", 100.0, 40.0, &mut selected, &mut opened);
        });
        assert!(!opened);
    }

    #[test]
    fn menu_item_list_reports_clicked_entry() {
        let mut ctx = test_context();
        let mut results = Vec::new();
        let mut visited = Vec::new();
        click(&mut ctx, 60.0, 20.0, |ctx| {
            results.push(ctx.menu_item_list(&["one", "two"], Some(0), |_, i| visited.push(i), false));
        });
        assert_eq!(results, vec![None, None, Some(1)]);
        assert_eq!(visited, vec![0, 1, 0, 1, 0, 1]);
    }
}
