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
use crate::layout::DivFrame;
use crate::text_layout::{Placement, layout_text};

const ROOT_DIV: &str = "warp.root";

#[cfg(feature = "builder")]
const FONT_ATLAS_SIZE: usize = 1024;

type Listener<E> = Box<dyn FnMut(&E)>;

/// Callbacks registered for raw input events.
#[derive(Default)]
struct InputListeners {
    key: Vec<Listener<KeyEvent>>,
    mouse_button: Vec<Listener<MouseButtonEvent>>,
    scroll: Vec<Listener<ScrollEvent>>,
    mouse_move: Vec<Listener<MouseMoveEvent>>,
}

impl InputListeners {
    fn dispatch(&mut self, events: &[InputEvent]) {
        for ev in events {
            match ev {
                InputEvent::Key(e) => self.key.iter_mut().for_each(|f| f(e)),
                InputEvent::MouseButton(e) => self.mouse_button.iter_mut().for_each(|f| f(e)),
                InputEvent::Scroll(e) => self.scroll.iter_mut().for_each(|f| f(e)),
                InputEvent::MouseMove(e) => self.mouse_move.iter_mut().for_each(|f| f(e)),
            }
        }
    }
}

/// Engine state of one UI instance.
///
/// Widgets are declared between [`begin`](Self::begin) and [`end`](Self::end), or inside [`frame`](Self::frame).
/// Only the active widget lock, scroll drag, root scroll position and settings survive a frame; everything else is
/// rebuilt from the calls of the current frame.
pub struct Context<B: GraphicsBackend> {
    pub(crate) renderer: BatchRenderer<B>,
    pub(crate) theme: Theme,
    pub(crate) styles: StyleStack,
    pub(crate) input: Input,
    pub(crate) clipboard: Box<dyn Clipboard>,
    listeners: InputListeners,
    pub(crate) interaction: Interaction,
    pub(crate) cursor: Cursor,
    pub(crate) div: Div,
    pub(crate) div_props: ElementProps,
    pub(crate) scroll: Option<ScrollState>,
    frames: Vec<DivFrame>,
    counter: u64,
    element_ids: Vec<u64>,
    pub(crate) cull: CullRect,
    font: Option<Rc<dyn GlyphProvider>>,
    image_color: Color,
    no_render: bool,
    pub(crate) text_wrap: bool,
    div_hoverable: bool,
    grabbed: Option<Div>,
    pub(crate) input_grabbed: bool,
    root_scroll: ScrollState,
    scroll_drag: Option<ScrollDrag>,
    selected_div: Div,
    hovered_div: Div,
    scrollbar_div: WidgetId,
}

impl<B: GraphicsBackend> Context<B> {
    /// Creates a context drawing through `backend` into a `width` x `height` display.
    pub fn new(backend: B, theme: Theme, clipboard: Box<dyn Clipboard>, width: u32, height: u32) -> Self {
        Self {
            renderer: BatchRenderer::new(backend, width, height),
            theme,
            styles: StyleStack::new(),
            input: Input::default(),
            clipboard,
            listeners: InputListeners::default(),
            interaction: Interaction::default(),
            cursor: Cursor::default(),
            div: Div::default(),
            div_props: ElementProps::default(),
            scroll: None,
            frames: Vec::new(),
            counter: 0,
            element_ids: Vec::new(),
            cull: CullRect::default(),
            font: None,
            image_color: Color::NO_COLOR,
            no_render: false,
            text_wrap: false,
            div_hoverable: false,
            grabbed: None,
            input_grabbed: false,
            root_scroll: ScrollState::new(),
            scroll_drag: None,
            selected_div: Div::default(),
            hovered_div: Div::default(),
            scrollbar_div: WidgetId::NONE,
        }
    }

    /// Active theme.
    pub fn theme(&self) -> &Theme { &self.theme }

    /// Mutable theme. Changes apply from the next widget call.
    pub fn theme_mut(&mut self) -> &mut Theme { &mut self.theme }

    /// Input snapshot of the current frame.
    pub fn input(&self) -> &Input { &self.input }

    /// Feed window events here before [`begin`](Self::begin).
    pub fn input_mut(&mut self) -> &mut Input { &mut self.input }

    /// Lets `source` write this frame's events, then runs the registered input callbacks on them.
    pub fn pump_input<S: InputSource>(&mut self, source: &mut S) {
        source.pump(&mut self.input);
        self.dispatch_input();
    }

    fn dispatch_input(&mut self) {
        let events = self.input.take_events();
        self.listeners.dispatch(&events);
    }

    /// Calls `f` for every key press, repeat and release. Events fed through [`input_mut`](Self::input_mut)
    /// reach it at the next [`begin`](Self::begin).
    pub fn add_key_callback<F: FnMut(&KeyEvent) + 'static>(&mut self, f: F) { self.listeners.key.push(Box::new(f)); }

    /// Calls `f` for every mouse button press and release.
    pub fn add_mouse_button_callback<F: FnMut(&MouseButtonEvent) + 'static>(&mut self, f: F) {
        self.listeners.mouse_button.push(Box::new(f));
    }

    /// Calls `f` for every wheel movement.
    pub fn add_scroll_callback<F: FnMut(&ScrollEvent) + 'static>(&mut self, f: F) { self.listeners.scroll.push(Box::new(f)); }

    /// Calls `f` for every pointer movement.
    pub fn add_cursor_pos_callback<F: FnMut(&MouseMoveEvent) + 'static>(&mut self, f: F) {
        self.listeners.mouse_move.push(Box::new(f));
    }

    /// The batch renderer.
    pub fn renderer(&self) -> &BatchRenderer<B> { &self.renderer }

    /// The graphics backend.
    pub fn backend(&self) -> &B { self.renderer.backend() }

    /// Mutable graphics backend.
    pub fn backend_mut(&mut self) -> &mut B { self.renderer.backend_mut() }

    /// Draw calls issued by the last frame.
    pub fn drawcalls(&self) -> usize { self.renderer.drawcalls() }

    /// Display width in pixels.
    pub fn display_width(&self) -> u32 { self.renderer.screen().x as u32 }

    /// Display height in pixels.
    pub fn display_height(&self) -> u32 { self.renderer.screen().y as u32 }

    /// Resizes the display. The root div follows on the next frame.
    pub fn resize_display(&mut self, width: u32, height: u32) {
        log::debug!("display resized to {}x{}", width, height);
        self.renderer.resize(width, height);
    }

    /// Opens a frame: resets the batch and the cursor and opens the root div.
    pub fn begin(&mut self) {
        self.dispatch_input();
        self.input.prelude();
        self.renderer.begin();
        self.cursor = Cursor { line_overflow: self.cursor.line_overflow, ..Cursor::default() };
        self.frames.clear();
        self.div = Div::default();
        self.div_props = ElementProps::default();
        self.scroll = None;
        self.counter = 0;
        self.cull = CullRect::default();
        self.hovered_div = Div::default();

        let mut props = self.theme.div_props;
        props.color = Color::NO_COLOR;
        self.styles.push(props);
        let screen = self.renderer.screen();
        self.open_div(WidgetId::from_str(ROOT_DIV), Vec2f::default(), screen, Some(self.root_scroll));
        self.styles.pop();
    }

    /// Closes the frame and flushes the batch.
    pub fn end(&mut self) {
        if self.frames.len() > 1 {
            log::warn!("{} div(s) still open at frame end", self.frames.len() - 1);
            while self.frames.len() > 1 {
                self.div_end();
            }
        }
        if let Some(root) = self.div_end() {
            self.root_scroll = root;
        }
        self.selected_div = self.hovered_div;
        self.interaction.end_frame();
        if !self.styles.is_empty() {
            log::warn!("{} style(s) still pushed at frame end", self.styles.len());
            self.styles.clear();
        }
        if !self.input.mouse_held(MouseButton::LEFT) {
            self.scroll_drag = None;
        }
        self.input.epilogue();
        self.renderer.flush();
    }

    /// Runs `f` between [`begin`](Self::begin) and [`end`](Self::end).
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.begin();
        f(self);
        self.end();
    }

    /// Identity of the next widget declared in the current div.
    pub(crate) fn next_id(&mut self) -> WidgetId {
        self.counter += 1;
        let id = self.div.id.combine(self.counter);
        match self.element_ids.last() {
            Some(extra) => id.combine(*extra),
            None => id,
        }
    }

    /// Mixes `id` into the identity of the following widgets.
    pub fn push_element_id(&mut self, id: u64) { self.element_ids.push(id); }

    /// Removes the last [`push_element_id`](Self::push_element_id).
    pub fn pop_element_id(&mut self) { self.element_ids.pop(); }

    /// Overrides the theme defaults of the following widgets.
    pub fn push_style_props(&mut self, props: ElementProps) { self.styles.push(props); }

    /// Undoes the last [`push_style_props`](Self::push_style_props).
    pub fn pop_style_props(&mut self) -> Option<ElementProps> { self.styles.pop() }

    pub(crate) fn props_for(&self, default: ElementProps) -> ElementProps { self.styles.resolve(default) }

    /// Replaces the font until [`pop_font`](Self::pop_font) or the end of the current div.
    pub fn push_font(&mut self, font: Rc<dyn GlyphProvider>) { self.font = Some(font); }

    /// Back to the theme font.
    pub fn pop_font(&mut self) { self.font = None; }

    /// Font used by text widgets right now.
    pub fn get_current_font(&self) -> Rc<dyn GlyphProvider> { self.font.clone().unwrap_or_else(|| self.theme.font.clone()) }

    /// Enables wrapping of [`text`](Self::text) at the right edge of the current div.
    pub fn set_text_wrap(&mut self, wrap: bool) { self.text_wrap = wrap; }

    /// Turns all rendering off or back on. Layout and interaction keep working.
    pub fn set_no_render(&mut self, no_render: bool) { self.no_render = no_render; }

    /// Tints every image with `color`.
    pub fn set_image_color(&mut self, color: Color) { self.image_color = color; }

    /// Removes the image tint.
    pub fn unset_image_color(&mut self) { self.image_color = Color::NO_COLOR; }

    /// Makes div backgrounds light up on hover.
    pub fn set_div_hoverable(&mut self, hoverable: bool) { self.div_hoverable = hoverable; }

    /// Bakes `ttf` at `pixel_size` and uploads the atlas.
    #[cfg(feature = "builder")]
    pub fn load_font(&mut self, ttf: &[u8], pixel_size: f32) -> Result<Rc<BakedFont>> {
        let (font, rgba) = BakedFont::bake(ttf, pixel_size, FONT_ATLAS_SIZE, FONT_ATLAS_SIZE)?;
        let (w, h) = font.atlas_size();
        let handle = self.upload(w as u32, h as u32, &rgba, TextureFilter::Linear)?;
        Ok(Rc::new(font.with_texture(handle)))
    }

    /// Decodes a PNG and uploads it.
    #[cfg(any(feature = "builder", feature = "png_source"))]
    pub fn load_texture(&mut self, png: &[u8], flip: bool, filter: TextureFilter) -> Result<Texture> {
        let (width, height, rgba) = decode_png(png, flip)?;
        self.load_texture_rgba(width, height, &rgba, filter)
    }

    /// Uploads raw RGBA pixels.
    pub fn load_texture_rgba(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> Result<Texture> {
        let handle = self.upload(width, height, rgba, filter)?;
        Ok(Texture { handle, width, height })
    }

    fn upload(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> Result<TextureHandle> {
        self.renderer.backend_mut().create_texture(width, height, rgba, filter).inspect_err(|e| {
            log::error!("texture upload of {}x{} failed: {}", width, height, e);
        })
    }

    /// Releases a texture.
    pub fn free_texture(&mut self, texture: Texture) { self.renderer.backend_mut().destroy_texture(texture.handle); }

    /// Releases the atlas of a font.
    pub fn free_font(&mut self, font: &dyn GlyphProvider) { self.renderer.backend_mut().destroy_texture(font.texture()); }

    /// `btn` went down this frame.
    pub fn mouse_button_down(&self, btn: MouseButton) -> bool { self.input.mouse_down(btn) }

    /// `btn` went up this frame.
    pub fn mouse_button_up(&self, btn: MouseButton) -> bool { self.input.mouse_up(btn) }

    /// `btn` is down.
    pub fn mouse_button_held(&self, btn: MouseButton) -> bool { self.input.mouse_held(btn) }

    /// `btn` changed this frame.
    pub fn mouse_button_changed(&self, btn: MouseButton) -> bool { self.input.mouse_changed(btn) }

    fn on_scrollbar_div(&self) -> bool { self.scrollbar_div == self.div.id }

    /// Like [`mouse_button_down`](Self::mouse_button_down), restricted to the div that owns the scrollbar.
    pub fn mouse_button_down_on_div(&self, btn: MouseButton) -> bool { self.input.mouse_down(btn) && self.on_scrollbar_div() }

    /// Like [`mouse_button_up`](Self::mouse_button_up), restricted to the div that owns the scrollbar.
    pub fn mouse_button_up_on_div(&self, btn: MouseButton) -> bool { self.input.mouse_up(btn) && self.on_scrollbar_div() }

    /// Like [`mouse_button_held`](Self::mouse_button_held), restricted to the div that owns the scrollbar.
    pub fn mouse_button_held_on_div(&self, btn: MouseButton) -> bool { self.input.mouse_held(btn) && self.on_scrollbar_div() }

    /// Like [`mouse_button_changed`](Self::mouse_button_changed), restricted to the div that owns the scrollbar.
    pub fn mouse_button_changed_on_div(&self, btn: MouseButton) -> bool { self.input.mouse_changed(btn) && self.on_scrollbar_div() }

    /// `key` went down this frame.
    pub fn key_down(&self, key: KeyCode) -> bool { self.input.key_down(key) }

    /// `key` went up this frame.
    pub fn key_up(&self, key: KeyCode) -> bool { self.input.key_up(key) }

    /// `key` is down.
    pub fn key_held(&self, key: KeyCode) -> bool { self.input.key_held(key) }

    /// `key` went down or up this frame.
    pub fn key_changed(&self, key: KeyCode) -> bool { self.input.key_changed(key) }

    /// `key` went down or was auto-repeated this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool { self.input.key_pressed(key) }

    /// Last key event of this frame.
    pub fn key_event(&self) -> Option<KeyEvent> { self.input.key_event() }

    /// Last mouse button event of this frame.
    pub fn mouse_button_event(&self) -> Option<MouseButtonEvent> { self.input.mouse_button_event() }

    /// Last wheel event of this frame.
    pub fn scroll_event(&self) -> Option<ScrollEvent> { self.input.scroll_event() }

    /// Last pointer movement of this frame.
    pub fn mouse_move_event(&self) -> Option<MouseMoveEvent> { self.input.mouse_move_event() }

    /// Pointer position.
    pub fn mouse_pos(&self) -> Vec2f { self.input.mouse_pos() }

    /// Pointer movement since the last frame.
    pub fn mouse_delta(&self) -> Vec2f { self.input.mouse_delta() }

    /// Wheel movement of this frame.
    pub fn scroll_delta(&self) -> Vec2f { self.input.scroll_delta() }

    /// Text typed this frame.
    pub fn char_events(&self) -> &str { self.input.text_input() }

    /// Reads the clipboard.
    pub fn get_clipboard_text(&self) -> String { self.clipboard.get_text() }

    /// Writes the clipboard.
    pub fn set_clipboard_text(&mut self, text: &str) { self.clipboard.set_text(text); }

    /// Returns `true` while a text field has focus.
    pub fn input_grabbed(&self) -> bool { self.input_grabbed }

    /// Pointer inside the rect, regardless of divs.
    pub fn area_hovered(&self, pos: Vec2f, size: Vec2f) -> bool { Aabb { pos, size }.contains_point(self.input.mouse_pos()) }

    /// Pointer inside the rect and the current div receives the pointer: it is either the grabbed div or, with
    /// nothing grabbed, the topmost div hovered last frame.
    pub fn hovered(&self, pos: Vec2f, size: Vec2f) -> bool {
        let receives = match &self.grabbed {
            Some(grabbed) => grabbed.id == self.div.id,
            None => self.selected_div.id == self.div.id,
        };
        receives && self.area_hovered(pos, size)
    }

    /// Routes all pointer input to `div` until [`div_ungrab`](Self::div_ungrab).
    pub fn div_grab(&mut self, div: Div) { self.grabbed = Some(div); }

    /// Releases a grab.
    pub fn div_ungrab(&mut self) { self.grabbed = None; }

    /// Returns `true` while a div is grabbed.
    pub fn div_grabbed(&self) -> bool { self.grabbed.is_some() }

    /// The grabbed div.
    pub fn grabbed_div(&self) -> Option<Div> { self.grabbed }

    fn cull_query(&self, no_render: bool) -> CullQuery {
        CullQuery {
            viewport: self.renderer.screen(),
            line_height: self.get_current_font().font_size(),
            no_render,
            enabled: self.on_scrollbar_div(),
        }
    }

    pub(crate) fn is_culled(&self, item: Aabb) -> bool { should_cull(item, &self.cull, &self.cull_query(false)) }

    fn is_hidden(&self, item: Aabb) -> bool { should_cull(item, &self.cull, &self.cull_query(self.no_render)) }

    /// Evaluates and draws a clickable rect. `hitbox` replaces `size` for the hover test.
    pub(crate) fn clickable(&mut self, pos: Vec2f, size: Vec2f, hitbox: Option<Vec2f>, style: QuadStyle, hover_color: Color, feedback: Feedback) -> ClickableState {
        let id = self.next_id();
        if self.is_culled(Aabb { pos, size }) {
            return ClickableState::Idle;
        }
        let hovered = self.hovered(pos, hitbox.unwrap_or(size));
        let state = self.interaction.update(id, hovered, PointerEdges::primary(&self.input));
        let fill = feedback.fill(state, style.color, hover_color);
        self.rect_render(pos, size, QuadStyle { color: fill, ..style });
        state
    }

    /// Draws a rect with `pos` as its top-left corner.
    pub fn rect_render(&mut self, pos: Vec2f, size: Vec2f, style: QuadStyle) {
        if self.is_hidden(Aabb { pos, size }) {
            return;
        }
        self.renderer.push_rect(pos, size, &style, &self.cull);
    }

    /// Draws `texture` at its own size. The image tint, when set, replaces `style.color`.
    pub fn image_render(&mut self, pos: Vec2f, texture: Texture, style: QuadStyle) {
        let size = vec2f(texture.width as f32, texture.height as f32);
        if self.is_hidden(Aabb { pos, size }) {
            return;
        }
        let style = if self.image_color.is_set() { QuadStyle { color: self.image_color, ..style } } else { style };
        self.renderer.push_image(pos, size, texture.handle, &style, &self.cull);
    }

    /// Lays out `text` with the current font and draws it unless `params.no_render` is set.
    pub fn text_render(&mut self, text: &str, params: &TextParams) -> TextProps {
        let font = self.get_current_font();
        let line = Aabb { pos: vec2f(params.pos.x, params.pos.y + font.font_size()), size: vec2f(-1.0, -1.0) };
        let mut params = *params;
        params.no_render = params.no_render || self.is_hidden(line);

        let texture = font.texture();
        let y_offset = font.max_char_height();
        let color = params.color;
        let clip = self.cull;
        let renderer = &mut self.renderer;
        layout_text(font.as_ref(), text, &params, |placement| match placement {
            Placement::Glyph { quad, .. } => renderer.push_glyph(&quad, y_offset, color, texture, &clip),
            Placement::Solid { pos, size } => renderer.push_rect(pos, size, &QuadStyle::fill(color), &clip),
        })
    }

    /// Size of `text` in the current font.
    pub fn text_dimension(&self, text: &str) -> Vec2f { text_layout::text_dimension(self.get_current_font().as_ref(), text) }

    /// Size of `text` wrapped at the absolute x `wrap_point`.
    pub fn text_dimension_ex(&self, text: &str, wrap_point: Option<f32>) -> Vec2f {
        text_layout::text_dimension_ex(self.get_current_font().as_ref(), text, wrap_point)
    }

    /// Size of a [`button`](Self::button) labelled `text`.
    pub fn button_dimension(&self, text: &str) -> Vec2f {
        let props = self.props_for(self.theme.button_props);
        let dim = self.text_dimension(text);
        vec2f(dim.x + props.padding * 2.0, dim.y + props.padding)
    }

    /// Pen x after drawing `text` from `start_x`.
    pub fn get_text_end(&self, text: &str, start_x: f32) -> f32 { text_layout::get_text_end(self.get_current_font().as_ref(), text, start_x) }

    /// Sets the left clip bound.
    pub fn set_cull_start_x(&mut self, x: f32) { self.cull.start[0] = Some(x); }

    /// Sets the top clip bound.
    pub fn set_cull_start_y(&mut self, y: f32) { self.cull.start[1] = Some(y); }

    /// Sets the right clip bound.
    pub fn set_cull_end_x(&mut self, x: f32) { self.cull.end[0] = Some(x); }

    /// Sets the bottom clip bound.
    pub fn set_cull_end_y(&mut self, y: f32) { self.cull.end[1] = Some(y); }

    /// Clears the left clip bound.
    pub fn unset_cull_start_x(&mut self) { self.cull.start[0] = None; }

    /// Clears the top clip bound.
    pub fn unset_cull_start_y(&mut self) { self.cull.start[1] = None; }

    /// Clears the right clip bound.
    pub fn unset_cull_end_x(&mut self) { self.cull.end[0] = None; }

    /// Clears the bottom clip bound.
    pub fn unset_cull_end_y(&mut self) { self.cull.end[1] = None; }

    pub(crate) fn overflow(&mut self, size: Vec2f) { self.cursor.next_line_on_overflow(size, self.div_props.border_width, &self.div.aabb); }

    /// Breaks the current line.
    pub fn next_line(&mut self) { self.cursor.next_line(&self.div.aabb, self.div_props.border_width); }

    /// Cursor x relative to the current div.
    pub fn set_ptr_x(&mut self, x: f32) { self.cursor.pos.x = x + self.div.aabb.pos.x; }

    /// Cursor y relative to the current div.
    pub fn set_ptr_y(&mut self, y: f32) { self.cursor.pos.y = y + self.div.aabb.pos.y; }

    /// Cursor x in screen space.
    pub fn set_ptr_x_absolute(&mut self, x: f32) { self.cursor.pos.x = x; }

    /// Cursor y in screen space.
    pub fn set_ptr_y_absolute(&mut self, y: f32) { self.cursor.pos.y = y; }

    /// Cursor x in screen space.
    pub fn get_ptr_x(&self) -> f32 { self.cursor.pos.x }

    /// Cursor y in screen space.
    pub fn get_ptr_y(&self) -> f32 { self.cursor.pos.y }

    /// Overrides the height of the current line.
    pub fn set_line_height(&mut self, height: f32) { self.cursor.line_height = height; }

    /// Height of the current line.
    pub fn get_line_height(&self) -> f32 { self.cursor.line_height }

    /// Enables or disables wrapping on overflow.
    pub fn set_line_should_overflow(&mut self, overflow: bool) { self.cursor.line_overflow = overflow; }

    /// Opens a div. Pass the caller-owned scroll state to make it scrollable and store the state returned by
    /// [`div_end`](Self::div_end) back; [`div`](Self::div) does both.
    pub fn div_begin(&mut self, pos: Vec2f, size: Vec2f, scroll: Option<ScrollState>) -> Div {
        let id = self.next_id();
        self.open_div(id, pos, size, scroll)
    }

    fn open_div(&mut self, id: WidgetId, pos: Vec2f, size: Vec2f, mut scroll: Option<ScrollState>) -> Div {
        let props = self.props_for(self.theme.div_props);
        let area_hovered = self.area_hovered(pos, size);

        if let Some(state) = scroll.as_mut() {
            let targeted = match &self.grabbed {
                Some(grabbed) => grabbed.id == id,
                None => self.selected_div.id == id,
            };
            let dy = self.input.scroll_delta().y;
            if targeted && dy != 0.0 {
                self.theme.physics.apply_input(state, dy);
            }
            self.theme.physics.integrate(state);
        }

        self.frames.push(DivFrame {
            cursor: self.cursor,
            font: self.font.take(),
            div: self.div,
            div_props: self.div_props,
            counter: self.counter,
            scroll: self.scroll.take(),
        });

        let mut div = Div { id, aabb: Aabb { pos, size }, scrollable: scroll.is_some(), ..Div::default() };
        self.div = div;
        self.div_props = props;
        self.counter = 0;
        self.cursor.pos = pos;

        div.interact_state = self.div_container(pos, size, &props);
        self.div = div;
        if area_hovered {
            self.hovered_div = div;
        }

        let offset = scroll.map_or(0.0, |s| s.offset);
        self.cursor.pos.y = pos.y + offset + props.border_width + props.corner_radius;
        self.cursor.line_height = 0.0;
        self.cull = CullRect {
            start: [Some(pos.x), Some(pos.y + props.border_width)],
            end: [Some(pos.x + size.x - props.border_width), Some(pos.y + size.y - props.border_width)],
        };
        self.scroll = scroll;
        div
    }

    // Div backgrounds do not take the active lock.
    fn div_container(&mut self, pos: Vec2f, size: Vec2f, props: &ElementProps) -> ClickableState {
        let bg_pos = vec2f(pos.x - props.padding, pos.y - props.padding);
        let bg_size = vec2f(size.x + props.padding * 2.0, size.y + props.padding * 2.0);
        if self.is_culled(Aabb { pos: bg_pos, size: bg_size }) {
            return ClickableState::Idle;
        }
        let state = if self.hovered(bg_pos, bg_size) {
            if self.input.mouse_up(MouseButton::LEFT) {
                ClickableState::Clicked
            } else if self.input.mouse_held(MouseButton::LEFT) {
                ClickableState::Held
            } else {
                ClickableState::Hovered
            }
        } else {
            ClickableState::Idle
        };
        let fill = Feedback::div(self.div_hoverable).fill(state, props.color, props.hover_color);
        self.rect_render(bg_pos, bg_size, QuadStyle::from_props(fill, props));
        state
    }

    /// Closes the innermost div and returns its updated scroll state. Unbalanced calls are logged and ignored.
    pub fn div_end(&mut self) -> Option<ScrollState> {
        if self.frames.is_empty() {
            log::warn!("div_end without a matching div_begin");
            return None;
        }
        self.next_line();
        self.div.total_area = vec2f(self.cursor.pos.x, self.cursor.pos.y + self.div_props.corner_radius);
        if let Some(mut state) = self.scroll.take() {
            self.scrollbar(&mut state);
            self.scroll = Some(state);
        }
        if self.hovered_div.id == self.div.id {
            self.hovered_div.total_area = self.div.total_area;
        }
        let scroll = self.scroll;

        let frame = self.frames.pop()?;
        self.cursor = frame.cursor;
        self.font = frame.font;
        self.div = frame.div;
        self.div_props = frame.div_props;
        self.counter = frame.counter;
        self.scroll = frame.scroll;
        self.cull = CullRect::default();
        scroll
    }

    /// Declares a div around `f`. A scrollable div reads and updates `scroll`.
    pub fn div<F: FnOnce(&mut Self)>(&mut self, pos: Vec2f, size: Vec2f, scroll: Option<&mut ScrollState>, f: F) -> Div {
        let div = self.div_begin(pos, size, scroll.as_deref().copied());
        f(self);
        let state = self.div_end();
        if let (Some(slot), Some(state)) = (scroll, state) {
            *slot = state;
        }
        div
    }

    fn scrollbar(&mut self, state: &mut ScrollState) {
        let div = self.div;
        let content = div.total_area.y - state.offset - div.aabb.pos.y;
        state.set_extent(content, div.aabb.size.y);
        if self.hovered_div.id == div.id {
            self.scrollbar_div = div.id;
        }

        let bar = self.props_for(self.theme.scrollbar_props);
        let Some(thumb) = thumb_rect(&div.aabb, state, self.theme.scrollbar_width, &bar, &self.div_props) else {
            return;
        };
        let pointer = self.input.mouse_pos();
        if self.input.mouse_down(MouseButton::LEFT) && self.hovered(thumb.pos, thumb.size) {
            self.scroll_drag = Some(ScrollDrag { div: div.id, start_y: pointer.y, start_offset: state.offset });
        }
        if let Some(drag) = self.scroll_drag.filter(|d| d.div == div.id) {
            drag.apply(state, pointer.y);
            if self.input.mouse_up(MouseButton::LEFT) {
                self.scroll_drag = None;
            }
        }
        self.rect_render(thumb.pos, thumb.size, QuadStyle::from_props(bar.color, &bar));
    }

    /// The innermost open div.
    pub fn current_div(&self) -> Div { self.div }

    /// The topmost div hovered during the last frame.
    pub fn selected_div(&self) -> Div { self.selected_div }

    /// Offset of the current div. Zero for divs that do not scroll.
    pub fn current_div_scroll(&self) -> f32 { self.scroll.map_or(0.0, |s| s.offset) }

    /// Velocity of the current div.
    pub fn current_div_scroll_velocity(&self) -> f32 { self.scroll.map_or(0.0, |s| s.velocity) }

    /// Moves the current div. Applied to the returned state when the div ends.
    pub fn set_current_div_scroll(&mut self, offset: f32) {
        if let Some(state) = self.scroll.as_mut() {
            state.set_offset(offset);
        }
    }

    /// Overrides the velocity of the current div.
    pub fn set_current_div_scroll_velocity(&mut self, velocity: f32) {
        if let Some(state) = self.scroll.as_mut() {
            state.velocity = velocity;
        }
    }

    /// Scroll state of the root div.
    pub fn root_scroll(&self) -> ScrollState { self.root_scroll }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn click_scenario() {
        let mut ctx = test_context();
        let mut states = Vec::new();
        let record = |ctx: &mut Context<MockBackend>| {
            ctx.set_ptr_x_absolute(0.0);
            ctx.set_ptr_y_absolute(0.0);
            let style = QuadStyle::fill(Color::RED);
            let id_before = ctx.interaction.active();
            let state = ctx.clickable(vec2f(0.0, 0.0), vec2f(100.0, 30.0), None, style, Color::NO_COLOR, Feedback::BUTTON);
            (state, id_before, ctx.interaction.active())
        };
        frame_at(&mut ctx, 50.0, 15.0, false, |ctx| states.push(record(ctx)));
        frame_at(&mut ctx, 50.0, 15.0, true, |ctx| states.push(record(ctx)));
        frame_at(&mut ctx, 50.0, 15.0, false, |ctx| states.push(record(ctx)));

        // the root div only receives the pointer once it was hovered during a previous frame
        assert_eq!(states[0].0, ClickableState::Idle);
        assert_eq!(states[1].0, ClickableState::Held);
        assert!(states[1].1.is_none() && !states[1].2.is_none());
        assert_eq!(states[2].0, ClickableState::Clicked);
        assert!(states[2].2.is_none());
    }

    #[test]
    fn first_frame_has_no_hovered_div() {
        let mut ctx = test_context();
        let mut state = ClickableState::Released;
        frame_at(&mut ctx, 10.0, 10.0, true, |ctx| state = ctx.item(vec2f(50.0, 50.0)));
        assert_eq!(state, ClickableState::Idle);
        assert_eq!(ctx.selected_div().id, WidgetId::from_str(ROOT_DIV));
    }

    #[test]
    fn overflow_wrap_scenario() {
        let mut ctx = test_context();
        let mut seen = Vec::new();
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.div(vec2f(0.0, 0.0), vec2f(100.0, 200.0), None, |ctx| {
                ctx.overflow(vec2f(60.0, 25.0));
                seen.push(ctx.cursor.pos);
                ctx.cursor.pos.x += 60.0;
                ctx.overflow(vec2f(60.0, 25.0));
                seen.push(ctx.cursor.pos);
            });
        });
        assert_eq!((seen[0].x, seen[0].y), (0.0, 0.0));
        assert_eq!((seen[1].x, seen[1].y), (0.0, 25.0));
    }

    #[test]
    fn div_restores_cursor_and_font() {
        let mut ctx = test_context();
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.set_ptr_x_absolute(33.0);
            ctx.set_ptr_y_absolute(44.0);
            ctx.set_line_height(12.0);
            ctx.push_font(test_font());
            let div = ctx.div_begin(vec2f(200.0, 100.0), vec2f(50.0, 50.0), None);
            assert_eq!(ctx.current_div().id, div.id);
            assert!(ctx.font.is_none());
            assert_eq!(ctx.get_line_height(), 0.0);
            assert_eq!((ctx.get_ptr_x(), ctx.get_ptr_y()), (200.0, 100.0));
            assert!(ctx.div_end().is_none());
            assert_eq!((ctx.get_ptr_x(), ctx.get_ptr_y(), ctx.get_line_height()), (33.0, 44.0, 12.0));
            assert!(ctx.font.is_some());
        });
    }

    #[test]
    fn unbalanced_state_is_repaired_at_frame_end() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut ctx = test_context();
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.push_style_props(ElementProps::default());
            ctx.div_begin(vec2f(0.0, 0.0), vec2f(10.0, 10.0), None);
        });
        assert!(ctx.styles.is_empty());
        assert!(ctx.frames.is_empty());
        assert!(ctx.div_end().is_none());
    }

    fn tall_content(ctx: &mut Context<MockBackend>, scroll: &mut ScrollState) {
        ctx.div(vec2f(0.0, 0.0), vec2f(300.0, 200.0), Some(scroll), |ctx| {
            for _ in 0..10 {
                ctx.rect(280.0, 100.0, Color::BLUE, 0.0);
                ctx.next_line();
            }
        });
    }

    #[test]
    fn wheel_scroll_stays_in_bounds() {
        let mut ctx = test_context();
        let mut scroll = ScrollState::new();
        for frame in 0..120 {
            ctx.input_mut().mousemove(100.0, 100.0);
            ctx.input_mut().scroll(0.0, if frame < 60 { -1.0 } else { 1.0 });
            ctx.frame(|ctx| tall_content(ctx, &mut scroll));
            assert!(scroll.offset <= 0.0 && scroll.offset >= -800.0, "offset {}", scroll.offset);
        }
        assert_eq!(scroll.extent(), Some((1000.0, 200.0)));
        assert_eq!(scroll.offset, 0.0);
    }

    #[test]
    fn dragging_the_thumb_scrolls_by_content_ratio() {
        let mut ctx = test_context();
        let mut scroll = ScrollState::new();
        // measure and become the hovered div
        frame_at(&mut ctx, 290.0, 100.0, false, |ctx| tall_content(ctx, &mut scroll));
        frame_at(&mut ctx, 290.0, 100.0, false, |ctx| tall_content(ctx, &mut scroll));
        let thumb = thumb_rect(&Aabb::new(0.0, 0.0, 300.0, 200.0), &scroll, 8.0, &ctx.theme.scrollbar_props, &ElementProps::default())
            .expect("content overflows");
        let grip = vec2f(thumb.pos.x + 2.0, thumb.pos.y + 2.0);
        frame_at(&mut ctx, grip.x, grip.y, true, |ctx| tall_content(ctx, &mut scroll));
        frame_at(&mut ctx, grip.x, grip.y + 10.0, true, |ctx| tall_content(ctx, &mut scroll));
        assert_eq!(scroll.offset, -50.0);
        frame_at(&mut ctx, grip.x, grip.y + 1000.0, true, |ctx| tall_content(ctx, &mut scroll));
        assert_eq!(scroll.offset, -800.0);
        frame_at(&mut ctx, grip.x, grip.y + 1000.0, false, |ctx| tall_content(ctx, &mut scroll));
        frame_at(&mut ctx, grip.x, grip.y, false, |ctx| tall_content(ctx, &mut scroll));
        assert_eq!(scroll.offset, -800.0);
    }

    #[test]
    fn grabbed_div_captures_hover() {
        let mut ctx = test_context();
        let mut inner = Div::default();
        let mut hovered = (false, false);
        let scene = |ctx: &mut Context<MockBackend>, inner: &mut Div, hovered: &mut (bool, bool)| {
            *inner = ctx.div(vec2f(0.0, 0.0), vec2f(100.0, 100.0), None, |ctx| {
                hovered.0 = ctx.hovered(vec2f(0.0, 0.0), vec2f(800.0, 600.0));
            });
            hovered.1 = ctx.hovered(vec2f(0.0, 0.0), vec2f(800.0, 600.0));
        };
        frame_at(&mut ctx, 300.0, 300.0, false, |ctx| scene(ctx, &mut inner, &mut hovered));
        frame_at(&mut ctx, 300.0, 300.0, false, |ctx| scene(ctx, &mut inner, &mut hovered));
        assert_eq!(hovered, (false, true));
        ctx.div_grab(inner);
        frame_at(&mut ctx, 300.0, 300.0, false, |ctx| scene(ctx, &mut inner, &mut hovered));
        assert_eq!(hovered, (true, false));
        assert!(ctx.div_grabbed());
        ctx.div_ungrab();
        assert!(ctx.grabbed_div().is_none());
    }

    #[test]
    fn no_render_skips_geometry_but_keeps_layout() {
        let mut ctx = test_context();
        let mut end = 0.0;
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.set_no_render(true);
            ctx.rect(40.0, 10.0, Color::RED, 0.0);
            end = ctx.get_ptr_x();
        });
        assert_eq!(end, 40.0);
        // only the transparent root background made it into the batch
        let hidden = &ctx.backend().batches[0];
        assert_eq!(hidden.quads, 1);
        assert_eq!(hidden.vertices[0].color, Color::NO_COLOR.to_zto());

        ctx.set_no_render(false);
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| ctx.rect(40.0, 10.0, Color::RED, 0.0));
        let shown = &ctx.backend().batches[1];
        assert_eq!(shown.quads, 2);
        assert_eq!(shown.vertices[4].color, Color::RED.to_zto());
        assert_eq!(ctx.drawcalls(), 1);
    }

    #[test]
    fn image_tint_overrides_color() {
        let mut ctx = test_context();
        let tex = ctx.load_texture_rgba(1, 1, &[255, 255, 255, 255], TextureFilter::Nearest).expect("upload");
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| {
            ctx.set_image_color(Color::GREEN);
            ctx.image_render(vec2f(0.0, 0.0), tex, QuadStyle::fill(Color::WHITE));
            ctx.unset_image_color();
        });
        let batch = &ctx.backend().batches[0];
        assert_eq!(batch.textures, vec![tex.handle]);
        let image = batch.vertices.last().expect("image quad");
        assert_eq!(image.color, Color::GREEN.to_zto());
        assert_eq!(image.tex_index, 0.0);
        ctx.free_texture(tex);
        assert_eq!(ctx.backend().destroyed, vec![tex.handle]);
        assert!(ctx.load_texture_rgba(2, 2, &[0; 4], TextureFilter::Linear).is_err());
    }

    #[test]
    fn resize_reaches_backend_and_root_div() {
        let mut ctx = test_context();
        ctx.resize_display(1024, 768);
        assert_eq!(ctx.backend().size, (1024, 768));
        let mut root = Div::default();
        frame_at(&mut ctx, 0.0, 0.0, false, |ctx| root = ctx.current_div());
        assert_eq!((root.aabb.size.x, root.aabb.size.y), (1024.0, 768.0));
        assert_eq!((ctx.display_width(), ctx.display_height()), (1024, 768));
    }

    #[test]
    fn element_ids_disambiguate_identities() {
        let mut ctx = test_context();
        ctx.begin();
        ctx.counter = 0;
        let plain = ctx.next_id();
        ctx.counter = 0;
        ctx.push_element_id(9);
        let tagged = ctx.next_id();
        ctx.pop_element_id();
        ctx.end();
        assert_ne!(plain, tagged);
        assert!(!plain.is_none());
    }

    struct Scripted;

    impl InputSource for Scripted {
        fn pump(&mut self, input: &mut Input) {
            input.mousemove(12.0, 7.0);
            input.mousedown(MouseButton::MIDDLE);
            input.scroll(0.0, 3.0);
            input.key(KeyCode::ENTER, KeyMode::ALT, KeyAction::Press);
        }
    }

    #[test]
    fn input_callbacks_see_pumped_events() {
        use std::cell::RefCell;

        let mut ctx = test_context();
        let keys = Rc::new(RefCell::new(Vec::new()));
        let buttons = Rc::new(RefCell::new(Vec::new()));
        let scrolls = Rc::new(RefCell::new(Vec::new()));
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = keys.clone();
        ctx.add_key_callback(move |e| sink.borrow_mut().push(*e));
        let sink = buttons.clone();
        ctx.add_mouse_button_callback(move |e| sink.borrow_mut().push(*e));
        let sink = scrolls.clone();
        ctx.add_scroll_callback(move |e| sink.borrow_mut().push(*e));
        let sink = moves.clone();
        ctx.add_cursor_pos_callback(move |e| sink.borrow_mut().push(*e));

        ctx.pump_input(&mut Scripted);
        assert_eq!(*keys.borrow(), vec![KeyEvent { key: KeyCode::ENTER, action: KeyAction::Press, mods: KeyMode::ALT }]);
        assert_eq!(*buttons.borrow(), vec![MouseButtonEvent { button: MouseButton::MIDDLE, pressed: true }]);
        assert_eq!(*scrolls.borrow(), vec![ScrollEvent { x: 0.0, y: 3.0 }]);
        assert_eq!(*moves.borrow(), vec![MouseMoveEvent { x: 12.0, y: 7.0 }]);

        // pumped events are not delivered twice when the frame opens
        let mut seen = None;
        ctx.frame(|ctx| seen = ctx.key_event());
        assert_eq!(keys.borrow().len(), 1);
        assert_eq!(seen.map(|e| e.key), Some(KeyCode::ENTER));

        // events fed directly reach the callbacks at the next begin
        ctx.input_mut().key(KeyCode::ENTER, KeyMode::NONE, KeyAction::Release);
        ctx.input_mut().scroll(1.0, 0.0);
        assert_eq!(keys.borrow().len(), 1);
        ctx.frame(|_| {});
        assert_eq!(keys.borrow().len(), 2);
        assert_eq!(keys.borrow()[1].action, KeyAction::Release);
        assert_eq!(scrolls.borrow()[1], ScrollEvent { x: 1.0, y: 0.0 });
    }

    #[test]
    fn event_accessors_report_the_current_frame_only() {
        let mut ctx = test_context();
        ctx.pump_input(&mut Scripted);
        let mut during = (None, None, None, None, false);
        ctx.frame(|ctx| {
            during = (
                ctx.key_event(),
                ctx.mouse_button_event(),
                ctx.scroll_event(),
                ctx.mouse_move_event(),
                ctx.key_changed(KeyCode::ENTER),
            );
        });
        assert_eq!(during.0.map(|e| e.mods), Some(KeyMode::ALT));
        assert_eq!(during.1.map(|e| e.button), Some(MouseButton::MIDDLE));
        assert_eq!(during.2, Some(ScrollEvent { x: 0.0, y: 3.0 }));
        assert_eq!(during.3, Some(MouseMoveEvent { x: 12.0, y: 7.0 }));
        assert!(during.4);

        let mut after = (None, None, false, true);
        ctx.frame(|ctx| {
            after = (ctx.key_event(), ctx.scroll_event(), ctx.key_changed(KeyCode::ENTER), ctx.key_pressed(KeyCode::ENTER));
        });
        assert_eq!(after, (None, None, false, false));
    }
}
