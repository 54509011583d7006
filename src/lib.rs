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
#![deny(missing_docs)]
//! `warp-ui` is an immediate-mode GUI engine. Widgets are declared every frame from application code and the
//! engine reconstructs their interaction state (hover, press, drag, text selection, scroll momentum) from stable
//! per-frame identities. Geometry is accumulated into a single batch of rounded, bordered quads that a
//! [`GraphicsBackend`] draws with one indexed call per batch.
//!
//! The crate is organised leaves first:
//! - [`StyleStack`] and [`Theme`] resolve visual properties,
//! - [`CullRect`] rejects off-screen geometry,
//! - [`BatchRenderer`] builds the vertex stream,
//! - [`text_layout`] and [`TextEdit`] place glyphs and edit buffers,
//! - [`Interaction`], [`Cursor`] and [`ScrollState`] carry frame-to-frame state,
//! - [`Context`] ties them together behind `begin`/`end`.

mod atlas;
mod context;
mod cull;
mod error;
#[cfg(feature = "glow")]
mod glow_backend;
mod interaction;
mod layout;
mod renderer;
mod scrollbar;
pub mod shader;
mod style;
pub mod text_layout;
mod widgets;

#[cfg(test)]
mod test_support;

pub use atlas::*;
pub use context::Context;
pub use cull::*;
pub use error::*;
#[cfg(feature = "glow")]
pub use glow_backend::GlowBackend;
pub use interaction::*;
pub use layout::*;
pub use renderer::*;
pub use rs_math3d::*;
pub use scrollbar::*;
pub use style::*;
pub use text_layout::{TextParams, TextProps};
pub use widgets::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black. Used as the "unset" marker for optional colors.
    pub const NO_COLOR: Self = color(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = color(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = color(0, 0, 0, 255);
    /// Opaque red.
    pub const RED: Self = color(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = color(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = color(0, 0, 255, 255);
    /// Default fill of interactive items.
    pub const PRIMARY_ITEM: Self = color(133, 138, 148, 255);
    /// Default border of interactive items.
    pub const SECONDARY_ITEM: Self = color(96, 100, 107, 255);

    /// Scales the RGB channels by `factor`, saturating at 255. Alpha is kept.
    pub fn brightness(self, factor: f32) -> Self {
        let scale = |c: u8| ((c as f32 * factor) as u32).min(255) as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b), a: self.a }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self { Self { a, ..self } }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self { color(((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8, 255) }

    /// Converts to normalized `[0, 1]` floats.
    pub fn to_zto(self) -> [f32; 4] { [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0, self.a as f32 / 255.0] }

    /// Converts from normalized `[0, 1]` floats, clamping out of range values.
    pub fn from_zto(c: [f32; 4]) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        color(q(c[0]), q(c[1]), q(c[2]), q(c[3]))
    }

    /// Returns `true` when the alpha channel is non-zero, i.e. the color is set.
    pub fn is_set(self) -> bool { self.a != 0 }
}

/// Convenience constructor for [`Color`].
pub const fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Convenience constructor for [`Vec2f`].
pub fn vec2f(x: f32, y: f32) -> Vec2f { Vec2f { x, y } }

#[derive(Default, Copy, Clone, Debug)]
/// Axis-aligned bounding box stored as top-left position and size.
pub struct Aabb {
    /// Top-left corner.
    pub pos: Vec2f,
    /// Width and height. A negative component means "auto".
    pub size: Vec2f,
}

impl Aabb {
    /// Creates a box from its components.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self { Self { pos: vec2f(x, y), size: vec2f(w, h) } }

    /// Right edge.
    pub fn right(&self) -> f32 { self.pos.x + self.size.x }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 { self.pos.y + self.size.y }

    /// Returns `true` when either dimension is the "auto" marker.
    pub fn is_auto(&self) -> bool { self.size.x < 0.0 || self.size.y < 0.0 }

    /// Inclusive point test.
    pub fn contains_point(&self, p: Vec2f) -> bool { p.x >= self.pos.x && p.x <= self.right() && p.y >= self.pos.y && p.y <= self.bottom() }

    /// Returns `true` when the two boxes share any area (edges inclusive).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x <= other.right() && other.pos.x <= self.right() && self.pos.y <= other.bottom() && other.pos.y <= self.bottom()
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
/// Interaction outcome of a clickable widget for the current frame.
pub enum ClickableState {
    /// Nothing was evaluated yet.
    #[default]
    Released = -1,
    /// The pointer is elsewhere.
    Idle = 0,
    /// The pointer is over the widget.
    Hovered = 1,
    /// The primary button was released over the widget while it held the active lock.
    Clicked = 2,
    /// The widget holds the active lock and the button is still down.
    Held = 3,
}

impl ClickableState {
    /// Returns `true` on the frame the widget was clicked.
    pub fn is_clicked(self) -> bool { self == Self::Clicked }
    /// Returns `true` while the widget is pressed.
    pub fn is_held(self) -> bool { self == Self::Held }
    /// Returns `true` while the pointer rests over the widget without pressing it.
    pub fn is_hovered(self) -> bool { self == Self::Hovered }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle of a texture owned by the graphics backend.
pub struct TextureHandle(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Sampling mode requested when uploading a texture.
pub enum TextureFilter {
    /// Bilinear filtering.
    Linear,
    /// Nearest neighbour filtering.
    Nearest,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A backend texture together with its pixel dimensions.
pub struct Texture {
    /// Backend handle.
    pub handle: TextureHandle,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

const DJB2_SEED: u64 = 5381;

fn djb2(mut hash: u64, bytes: &[u8]) -> u64 {
    for b in bytes {
        hash = hash.wrapping_mul(33).wrapping_add(*b as u64);
    }
    hash
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Stable identity of a widget or container across frames.
///
/// The zero value is reserved and means "no widget".
pub struct WidgetId(u64);

impl WidgetId {
    /// The reserved "no widget" identity.
    pub const NONE: Self = Self(0);

    /// Wraps a caller-supplied numeric identity.
    pub fn new(value: u64) -> Self { Self(value) }

    /// Hashes a string label with djb2.
    pub fn from_str(label: &str) -> Self { Self::non_zero(djb2(DJB2_SEED, label.as_bytes())) }

    /// Folds `value` into this identity, yielding a derived identity.
    pub fn combine(self, value: u64) -> Self {
        let seed = if self.0 == 0 { DJB2_SEED } else { self.0 };
        Self::non_zero(djb2(seed, &value.to_le_bytes()))
    }

    /// Returns the raw hash.
    pub fn raw(self) -> u64 { self.0 }

    /// Returns `true` for the reserved identity.
    pub fn is_none(self) -> bool { self.0 == 0 }

    fn non_zero(hash: u64) -> Self { Self(if hash == 0 { 1 } else { hash }) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse buttons as reported by the input source.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left (primary) mouse button.
        const LEFT = 1;
        /// No buttons.
        const NONE = 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier keys.
    pub struct KeyMode : u32 {
        /// Alt key.
        const ALT = 4;
        /// Control key.
        const CTRL = 2;
        /// Shift key.
        const SHIFT = 1;
        /// No modifiers.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Keys the engine reacts to.
    pub struct KeyCode : u32 {
        /// Letter X (cut shortcut).
        const X = 4096;
        /// Letter V (paste shortcut).
        const V = 2048;
        /// Letter C (copy shortcut).
        const C = 1024;
        /// Letter A (select-all shortcut).
        const A = 512;
        /// Escape key.
        const ESCAPE = 256;
        /// Tab key.
        const TAB = 128;
        /// Return/Enter key.
        const ENTER = 64;
        /// Backspace key.
        const BACKSPACE = 32;
        /// Delete key.
        const DELETE = 16;
        /// Right arrow key.
        const RIGHT = 8;
        /// Left arrow key.
        const LEFT = 4;
        /// Down arrow key.
        const DOWN = 2;
        /// Up arrow key.
        const UP = 1;
        /// No key.
        const NONE = 0;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// What happened to a key in a [`KeyEvent`].
pub enum KeyAction {
    /// The key went down.
    Press,
    /// The platform auto-repeated a held key.
    Repeat,
    /// The key went up.
    Release,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A key transition fed to [`Input`].
pub struct KeyEvent {
    /// Key.
    pub key: KeyCode,
    /// Press, repeat or release.
    pub action: KeyAction,
    /// Modifiers held when the event was fed.
    pub mods: KeyMode,
}

impl KeyEvent {
    /// Press or repeat. Only a release is not a press.
    pub fn pressed(&self) -> bool { self.action != KeyAction::Release }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A mouse button transition fed to [`Input`].
pub struct MouseButtonEvent {
    /// Button.
    pub button: MouseButton,
    /// `true` for a press.
    pub pressed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Wheel movement fed to [`Input`].
pub struct ScrollEvent {
    /// Horizontal movement.
    pub x: f32,
    /// Vertical movement. Positive scrolls up.
    pub y: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Pointer movement fed to [`Input`].
pub struct MouseMoveEvent {
    /// New pointer x.
    pub x: f32,
    /// New pointer y.
    pub y: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Any event fed to [`Input`], in arrival order.
pub enum InputEvent {
    /// See [`KeyEvent`].
    Key(KeyEvent),
    /// See [`MouseButtonEvent`].
    MouseButton(MouseButtonEvent),
    /// See [`ScrollEvent`].
    Scroll(ScrollEvent),
    /// See [`MouseMoveEvent`].
    MouseMove(MouseMoveEvent),
}

#[derive(Clone, Debug)]
/// Per-frame input snapshot with the previous frame's button and key state kept for edge detection.
///
/// Edges follow `down = changed && pressed`, `up = changed && !pressed`, `held = pressed`.
pub struct Input {
    mouse_pos: Vec2f,
    last_mouse_pos: Vec2f,
    mouse_delta: Vec2f,
    scroll_delta: Vec2f,
    mouse_now: MouseButton,
    mouse_last: MouseButton,
    mods_now: KeyMode,
    mods_last: KeyMode,
    keys_now: KeyCode,
    keys_last: KeyCode,
    keys_repeat: KeyCode,
    input_text: String,
    pending: Vec<InputEvent>,
    key_event: Option<KeyEvent>,
    mouse_button_event: Option<MouseButtonEvent>,
    scroll_event: Option<ScrollEvent>,
    mouse_move_event: Option<MouseMoveEvent>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2f::default(),
            last_mouse_pos: Vec2f::default(),
            mouse_delta: Vec2f::default(),
            scroll_delta: Vec2f::default(),
            mouse_now: MouseButton::NONE,
            mouse_last: MouseButton::NONE,
            mods_now: KeyMode::NONE,
            mods_last: KeyMode::NONE,
            keys_now: KeyCode::NONE,
            keys_last: KeyCode::NONE,
            keys_repeat: KeyCode::NONE,
            input_text: String::new(),
            pending: Vec::new(),
            key_event: None,
            mouse_button_event: None,
            scroll_event: None,
            mouse_move_event: None,
        }
    }
}

impl Input {
    /// Updates the pointer position.
    pub fn mousemove(&mut self, x: f32, y: f32) {
        self.mouse_pos = vec2f(x, y);
        let ev = MouseMoveEvent { x, y };
        self.mouse_move_event = Some(ev);
        self.pending.push(InputEvent::MouseMove(ev));
    }

    /// Marks `btn` as pressed.
    pub fn mousedown(&mut self, btn: MouseButton) {
        self.mouse_now |= btn;
        self.push_button(btn, true);
    }

    /// Marks `btn` as released.
    pub fn mouseup(&mut self, btn: MouseButton) {
        self.mouse_now &= !btn;
        self.push_button(btn, false);
    }

    fn push_button(&mut self, button: MouseButton, pressed: bool) {
        let ev = MouseButtonEvent { button, pressed };
        self.mouse_button_event = Some(ev);
        self.pending.push(InputEvent::MouseButton(ev));
    }

    /// Accumulates wheel movement. Positive `y` scrolls up.
    pub fn scroll(&mut self, x: f32, y: f32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
        let ev = ScrollEvent { x, y };
        self.scroll_event = Some(ev);
        self.pending.push(InputEvent::Scroll(ev));
    }

    /// Marks a modifier as pressed.
    pub fn keydown(&mut self, key: KeyMode) { self.mods_now |= key; }

    /// Marks a modifier as released.
    pub fn keyup(&mut self, key: KeyMode) { self.mods_now &= !key; }

    /// Marks a key as pressed.
    pub fn keydown_code(&mut self, code: KeyCode) {
        self.keys_now |= code;
        self.push_key(code, KeyAction::Press);
    }

    /// Marks a key as released.
    pub fn keyup_code(&mut self, code: KeyCode) {
        self.keys_now &= !code;
        self.push_key(code, KeyAction::Release);
    }

    /// Reports a platform auto-repeat of a held key. The key counts as pressed again this frame.
    pub fn key_repeat_code(&mut self, code: KeyCode) {
        self.keys_now |= code;
        self.keys_repeat |= code;
        self.push_key(code, KeyAction::Repeat);
    }

    /// Feeds one platform key event: `mods` replaces the held modifiers, then the key is pressed, repeated
    /// or released.
    pub fn key(&mut self, code: KeyCode, mods: KeyMode, action: KeyAction) {
        self.mods_now = mods;
        match action {
            KeyAction::Press => self.keydown_code(code),
            KeyAction::Repeat => self.key_repeat_code(code),
            KeyAction::Release => self.keyup_code(code),
        }
    }

    fn push_key(&mut self, key: KeyCode, action: KeyAction) {
        let ev = KeyEvent { key, action, mods: self.mods_now };
        self.key_event = Some(ev);
        self.pending.push(InputEvent::Key(ev));
    }

    /// Appends typed text.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    /// Pointer position.
    pub fn mouse_pos(&self) -> Vec2f { self.mouse_pos }

    /// Pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2f { self.mouse_delta }

    /// Wheel movement accumulated this frame.
    pub fn scroll_delta(&self) -> Vec2f { self.scroll_delta }

    /// Text typed this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// `btn` went down this frame.
    pub fn mouse_down(&self, btn: MouseButton) -> bool { self.mouse_changed(btn) && self.mouse_now.contains(btn) }

    /// `btn` went up this frame.
    pub fn mouse_up(&self, btn: MouseButton) -> bool { self.mouse_changed(btn) && !self.mouse_now.contains(btn) }

    /// `btn` is currently pressed.
    pub fn mouse_held(&self, btn: MouseButton) -> bool { self.mouse_now.contains(btn) }

    /// `btn` changed state this frame.
    pub fn mouse_changed(&self, btn: MouseButton) -> bool { (self.mouse_now ^ self.mouse_last).contains(btn) }

    /// `key` went down this frame.
    pub fn key_down(&self, key: KeyCode) -> bool { (self.keys_now & !self.keys_last).contains(key) }

    /// `key` went up this frame.
    pub fn key_up(&self, key: KeyCode) -> bool { (self.keys_last & !self.keys_now).contains(key) }

    /// `key` is currently pressed.
    pub fn key_held(&self, key: KeyCode) -> bool { self.keys_now.contains(key) }

    /// `key` changed state this frame.
    pub fn key_changed(&self, key: KeyCode) -> bool { (self.keys_now ^ self.keys_last).contains(key) }

    /// `key` was auto-repeated this frame.
    pub fn key_repeated(&self, key: KeyCode) -> bool { self.keys_repeat.contains(key) }

    /// `key` went down or was auto-repeated this frame. Editing keys act on this.
    pub fn key_pressed(&self, key: KeyCode) -> bool { self.key_down(key) || self.key_repeated(key) }

    /// Last key event of this frame.
    pub fn key_event(&self) -> Option<KeyEvent> { self.key_event }

    /// Last mouse button event of this frame.
    pub fn mouse_button_event(&self) -> Option<MouseButtonEvent> { self.mouse_button_event }

    /// Last wheel event of this frame.
    pub fn scroll_event(&self) -> Option<ScrollEvent> { self.scroll_event }

    /// Last pointer movement of this frame.
    pub fn mouse_move_event(&self) -> Option<MouseMoveEvent> { self.mouse_move_event }

    /// Events fed since the last call, in arrival order.
    pub(crate) fn take_events(&mut self) -> Vec<InputEvent> { std::mem::take(&mut self.pending) }

    /// Currently held modifiers.
    pub fn key_mods(&self) -> KeyMode { self.mods_now }

    /// Modifiers that went down this frame.
    pub fn key_mods_pressed(&self) -> KeyMode { self.mods_now & !self.mods_last }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.mouse_last = self.mouse_now;
        self.keys_last = self.keys_now;
        self.mods_last = self.mods_now;
        self.keys_repeat = KeyCode::NONE;
        self.key_event = None;
        self.mouse_button_event = None;
        self.scroll_event = None;
        self.mouse_move_event = None;
        self.input_text.clear();
        self.scroll_delta = Vec2f::default();
        self.mouse_delta = Vec2f::default();
        self.last_mouse_pos = self.mouse_pos;
    }
}

/// Something that feeds window-system events into [`Input`] once per frame.
pub trait InputSource {
    /// Drains pending events into `input`.
    fn pump(&mut self, input: &mut Input);
}

/// System clipboard access.
pub trait Clipboard {
    /// Returns the clipboard contents, or an empty string.
    fn get_text(&self) -> String;
    /// Replaces the clipboard contents.
    fn set_text(&mut self, text: &str);
}

#[derive(Default, Clone, Debug)]
/// Process-local clipboard used when no system clipboard is wired in.
pub struct MemoryClipboard {
    text: String,
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> String { self.text.clone() }
    fn set_text(&mut self, text: &str) { self.text = text.to_string(); }
}
