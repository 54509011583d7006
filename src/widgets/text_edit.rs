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
use crate::Clipboard;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Direction of the first movement of a mouse drag.
pub enum DragDirection {
    /// Dragged toward the start of the buffer.
    Left,
    /// Dragged toward the end of the buffer.
    Right,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Where the current selection comes from.
///
/// Every variant is reduced to one half-open range by [`TextEdit::selection_range`]; editing and rendering only
/// ever look at that range.
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// Shift+arrow selection between `anchor` and the cursor.
    Keyboard {
        /// Fixed end.
        anchor: usize,
    },
    /// Mouse drag selection between `anchor` and the cursor.
    Mouse {
        /// Press position.
        anchor: usize,
        /// First movement direction, cleared whenever the range collapses.
        dir: Option<DragDirection>,
    },
    /// Explicit range, e.g. select-all.
    Range {
        /// First selected index.
        start: usize,
        /// One past the last selected index.
        end: usize,
    },
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Restricts what the buffer may contain.
pub enum InputKind {
    /// Any printable ASCII.
    #[default]
    Text,
    /// Optional leading `-` followed by digits.
    Int,
    /// Like `Int` with at most one `.`.
    Float,
}

impl InputKind {
    /// Returns `true` when `text` is valid, possibly partial, input of this kind.
    pub fn accepts(self, text: &str) -> bool {
        let body = text.strip_prefix('-').unwrap_or(text);
        match self {
            Self::Text => true,
            Self::Int => body.chars().all(|c| c.is_ascii_digit()),
            Self::Float => body.chars().all(|c| c.is_ascii_digit() || c == '.') && body.matches('.').count() <= 1,
        }
    }
}

fn is_insertable(c: char) -> bool { c.is_ascii() && !c.is_ascii_control() }

#[derive(Clone, Debug)]
/// Fixed capacity ASCII buffer with a cursor and a selection.
pub struct TextEdit {
    buf: String,
    capacity: usize,
    max_chars: Option<usize>,
    cursor: usize,
    selection: Selection,
    kind: InputKind,
}

impl TextEdit {
    /// Empty buffer holding at most `capacity` characters.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
            max_chars: None,
            cursor: 0,
            selection: Selection::None,
            kind: InputKind::Text,
        }
    }

    /// Restricts accepted input.
    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Changes the accepted input. Existing contents are kept.
    pub fn set_kind(&mut self, kind: InputKind) { self.kind = kind; }

    /// Limits the length below the capacity.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Replaces the contents. Non-printable and non-ASCII characters are dropped and the result is truncated to
    /// the capacity. The cursor moves to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buf = text.chars().filter(|c| is_insertable(*c)).take(self.limit()).collect();
        self.cursor = self.buf.len();
        self.selection = Selection::None;
    }

    /// Buffer contents.
    pub fn text(&self) -> &str { &self.buf }

    /// Length in characters.
    pub fn len(&self) -> usize { self.buf.len() }

    /// Returns `true` for an empty buffer.
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }

    /// Maximum length.
    pub fn capacity(&self) -> usize { self.capacity }

    /// Accepted input.
    pub fn kind(&self) -> InputKind { self.kind }

    /// Cursor index in `0..=len`.
    pub fn cursor(&self) -> usize { self.cursor.min(self.buf.len()) }

    /// Moves the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, index: usize) { self.cursor = index.min(self.buf.len()); }

    /// Raw selection state.
    pub fn selection(&self) -> Selection { self.selection }

    /// Drag direction of an ongoing mouse selection.
    pub fn drag_direction(&self) -> Option<DragDirection> {
        match self.selection {
            Selection::Mouse { dir, .. } => dir,
            _ => None,
        }
    }

    /// Selects `start..end`.
    pub fn select(&mut self, start: usize, end: usize) { self.selection = Selection::Range { start, end }; }

    /// Clears the selection.
    pub fn unselect_all(&mut self) { self.selection = Selection::None; }

    /// The authoritative selection as an ordered, non-empty, in-bounds `start..end`.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let len = self.buf.len();
        let cursor = self.cursor();
        let (a, b) = match self.selection {
            Selection::None => return None,
            Selection::Keyboard { anchor } | Selection::Mouse { anchor, .. } => (anchor, cursor),
            Selection::Range { start, end } => (start, end),
        };
        let (start, end) = (a.min(b).min(len), a.max(b).min(len));
        (start < end).then_some((start, end))
    }

    /// Selected text, if any.
    pub fn selected_text(&self) -> Option<&str> { self.selection_range().map(|(s, e)| &self.buf[s..e]) }

    fn limit(&self) -> usize { self.max_chars.map_or(self.capacity, |m| m.min(self.capacity)) }

    // buffer with the selection replaced by `text`, and the index right after the insertion
    fn replaced(&self, text: &str) -> (String, usize) {
        let (start, end) = self.selection_range().unwrap_or((self.cursor(), self.cursor()));
        let mut candidate = String::with_capacity(self.buf.len() + text.len());
        candidate.push_str(&self.buf[..start]);
        candidate.push_str(text);
        candidate.push_str(&self.buf[end..]);
        (candidate, start + text.len())
    }

    fn commit(&mut self, candidate: String, cursor: usize) -> bool {
        if candidate.len() > self.limit() || !self.kind.accepts(&candidate) {
            return false;
        }
        self.buf = candidate;
        self.cursor = cursor;
        self.selection = Selection::None;
        true
    }

    /// Types `c`: the selection is replaced, otherwise `c` goes in at the cursor.
    ///
    /// Returns `false` when `c` is not printable ASCII, would overflow, or is rejected by the [`InputKind`].
    pub fn insert_char(&mut self, c: char) -> bool {
        if !is_insertable(c) {
            return false;
        }
        let mut tmp = [0u8; 4];
        let (candidate, cursor) = self.replaced(c.encode_utf8(&mut tmp));
        self.commit(candidate, cursor)
    }

    /// Inserts two spaces.
    pub fn tab(&mut self) -> bool {
        let (candidate, cursor) = self.replaced("  ");
        self.commit(candidate, cursor)
    }

    /// Deletes the selection, or the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.selection_range().is_some() {
            return self.delete_selection();
        }
        self.selection = Selection::None;
        let cursor = self.cursor();
        if cursor == 0 {
            return false;
        }
        self.buf.remove(cursor - 1);
        self.cursor = cursor - 1;
        true
    }

    /// Removes the selected text and places the cursor at its start.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection = Selection::None;
            return false;
        };
        self.buf.replace_range(start..end, "");
        self.cursor = start;
        self.selection = Selection::None;
        true
    }

    fn keyboard_anchor(&self) -> usize {
        let cursor = self.cursor();
        match self.selection {
            Selection::Keyboard { anchor } | Selection::Mouse { anchor, .. } => anchor,
            Selection::Range { start, end } if cursor == start => end,
            Selection::Range { start, .. } => start,
            Selection::None => cursor,
        }
    }

    fn step(&mut self, target: usize, shift: bool) {
        if shift {
            let anchor = self.keyboard_anchor();
            self.cursor = target;
            self.selection = if target == anchor { Selection::None } else { Selection::Keyboard { anchor } };
        } else if self.selection_range().is_some() {
            self.selection = Selection::None;
        } else {
            self.cursor = target;
            self.selection = Selection::None;
        }
    }

    /// Left arrow. With `shift` the selection grows or shrinks from its anchor; without it an existing
    /// selection is only dropped.
    pub fn move_left(&mut self, shift: bool) {
        let target = self.cursor().saturating_sub(1);
        self.step(target, shift);
    }

    /// Right arrow. See [`move_left`](Self::move_left).
    pub fn move_right(&mut self, shift: bool) {
        let target = (self.cursor() + 1).min(self.buf.len());
        self.step(target, shift);
    }

    /// Selects everything, or clears the selection when everything is already selected.
    pub fn select_all(&mut self) {
        if self.selection_range() == Some((0, self.buf.len())) {
            self.selection = Selection::None;
        } else {
            self.cursor = self.buf.len();
            self.selection = Selection::Range { start: 0, end: self.buf.len() };
        }
    }

    /// Copies the selection.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> bool {
        match self.selected_text() {
            Some(text) => {
                clipboard.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Copies and then deletes the selection.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool { self.copy(clipboard) && self.delete_selection() }

    /// Replaces the selection with the printable ASCII part of the clipboard. Rejected as a whole on overflow.
    pub fn paste(&mut self, clipboard: &dyn Clipboard) -> bool {
        let text: String = clipboard.get_text().chars().filter(|c| is_insertable(*c)).collect();
        if text.is_empty() {
            return false;
        }
        let (candidate, cursor) = self.replaced(&text);
        self.commit(candidate, cursor)
    }

    /// Inserts `c` at `index` without touching the selection.
    pub fn insert_char_at(&mut self, index: usize, c: char) -> bool {
        let mut tmp = [0u8; 4];
        self.insert_str_at(index, c.encode_utf8(&mut tmp))
    }

    /// Inserts `text` at `index`. Out of range indices are logged and ignored.
    pub fn insert_str_at(&mut self, index: usize, text: &str) -> bool {
        if index > self.buf.len() {
            log::warn!("insert at {} past the end of a {} character buffer", index, self.buf.len());
            return false;
        }
        if !text.chars().all(is_insertable) || self.buf.len() + text.len() > self.limit() {
            return false;
        }
        let mut candidate = self.buf.clone();
        candidate.insert_str(index, text);
        if !self.kind.accepts(&candidate) {
            return false;
        }
        self.buf = candidate;
        if index <= self.cursor {
            self.cursor += text.len();
        }
        true
    }

    /// Removes the character at `index`. Out of range indices are logged and ignored.
    pub fn remove_char_at(&mut self, index: usize) -> bool {
        if index >= self.buf.len() {
            log::warn!("remove at {} past the end of a {} character buffer", index, self.buf.len());
            return false;
        }
        self.buf.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.selection = Selection::None;
        true
    }

    /// Press without movement: places the cursor and collapses any selection, including a finished drag.
    pub fn click_at(&mut self, index: usize) {
        self.cursor = index.min(self.buf.len());
        self.selection = Selection::Mouse { anchor: self.cursor, dir: None };
    }

    /// Drag to `index`. `dx` is the pointer movement of this frame; its sign picks the direction of a fresh drag.
    pub fn drag_to(&mut self, index: usize, dx: f32) {
        let (anchor, mut dir) = match self.selection {
            Selection::Mouse { anchor, dir } => (anchor, dir),
            _ => (self.cursor(), None),
        };
        if dir.is_none() && dx != 0.0 {
            dir = Some(if dx < 0.0 { DragDirection::Left } else { DragDirection::Right });
        }
        self.cursor = index.min(self.buf.len());
        if self.cursor == anchor {
            dir = None;
        }
        self.selection = Selection::Mouse { anchor, dir };
    }

    /// Button release: ends the drag, keeping whatever range it produced.
    pub fn release(&mut self) {
        self.selection = match self.selection {
            Selection::Mouse { .. } if self.selection_range().is_none() => Selection::None,
            Selection::Mouse { anchor, .. } => Selection::Mouse { anchor, dir: None },
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryClipboard;

    fn edit(text: &str) -> TextEdit {
        let mut e = TextEdit::new(32);
        e.set_text(text);
        e
    }

    #[test]
    fn typing_replaces_the_selection() {
        let mut e = edit("hello");
        e.select(1, 3);
        assert!(e.insert_char('X'));
        assert_eq!(e.text(), "hXlo");
        assert_eq!(e.cursor(), 2);
        assert_eq!(e.selection_range(), None);
    }

    #[test]
    fn backspace_prefers_the_selection() {
        let mut e = edit("hello");
        e.select(3, 1);
        assert!(e.backspace());
        assert_eq!(e.text(), "hlo");
        assert_eq!(e.cursor(), 1);
        assert!(e.backspace());
        assert_eq!(e.text(), "lo");
        e.set_cursor(0);
        assert!(!e.backspace());
    }

    #[test]
    fn capacity_and_max_chars_reject_input() {
        let mut e = TextEdit::new(3);
        assert!(e.insert_char('a') && e.insert_char('b') && e.insert_char('c'));
        assert!(!e.insert_char('d'));
        assert!(!e.tab());
        let mut limited = TextEdit::new(10).with_max_chars(1);
        assert!(limited.insert_char('x'));
        assert!(!limited.insert_char('y'));
        assert!(!limited.insert_char('\u{e9}'));
    }

    #[test]
    fn shift_arrows_grow_from_the_anchor() {
        let mut e = edit("hello");
        e.set_cursor(2);
        e.move_right(true);
        e.move_right(true);
        assert_eq!(e.selection_range(), Some((2, 4)));
        e.move_left(true);
        assert_eq!(e.selection_range(), Some((2, 3)));
        e.move_left(true);
        assert_eq!(e.selection(), Selection::None);
        e.move_left(true);
        assert_eq!(e.selection_range(), Some((1, 2)));
    }

    #[test]
    fn plain_arrows_drop_the_selection_before_moving() {
        let mut e = edit("hello");
        e.select(1, 4);
        let cursor = e.cursor();
        e.move_left(false);
        assert_eq!(e.cursor(), cursor);
        assert_eq!(e.selection_range(), None);
        e.move_left(false);
        assert_eq!(e.cursor(), cursor - 1);
    }

    #[test]
    fn select_all_toggles_and_clipboard_round_trip() {
        let mut clip = MemoryClipboard::default();
        let mut e = edit("abc");
        e.select_all();
        assert_eq!(e.selected_text(), Some("abc"));
        assert!(e.cut(&mut clip));
        assert!(e.is_empty());
        assert!(e.paste(&clip));
        assert!(e.paste(&clip));
        assert_eq!(e.text(), "abcabc");
        e.select_all();
        e.select_all();
        assert_eq!(e.selection_range(), None);
    }

    #[test]
    fn paste_overflow_is_rejected_whole() {
        let mut clip = MemoryClipboard::default();
        clip.set_text("0123456789");
        let mut e = TextEdit::new(8);
        e.set_text("ab");
        assert!(!e.paste(&clip));
        assert_eq!(e.text(), "ab");
        clip.set_text("x\ty\u{e9}z");
        assert!(e.paste(&clip));
        assert_eq!(e.text(), "abxyz");
    }

    #[test]
    fn numeric_kinds_filter_characters() {
        let mut i = TextEdit::new(8).with_kind(InputKind::Int);
        assert!(i.insert_char('-'));
        assert!(i.insert_char('4'));
        assert!(!i.insert_char('.'));
        assert!(!i.insert_char('-'));
        let mut f = TextEdit::new(8).with_kind(InputKind::Float);
        for c in "1.5".chars() {
            assert!(f.insert_char(c));
        }
        assert!(!f.insert_char('.'));
        assert_eq!(f.text(), "1.5");
    }

    #[test]
    fn out_of_range_insert_is_a_no_op() {
        let mut e = edit("ab");
        assert!(!e.insert_char_at(5, 'x'));
        assert!(!e.remove_char_at(2));
        assert!(e.insert_char_at(0, 'x'));
        assert_eq!(e.text(), "xab");
        assert_eq!(e.cursor(), 3);
    }

    #[test]
    fn drag_selects_and_records_first_direction() {
        let mut e = edit("hello world");
        e.click_at(6);
        e.drag_to(3, -4.0);
        assert_eq!(e.drag_direction(), Some(DragDirection::Left));
        e.drag_to(8, 12.0);
        // direction is sticky while the range is non-empty
        assert_eq!(e.drag_direction(), Some(DragDirection::Left));
        assert_eq!(e.selection_range(), Some((6, 8)));
        e.drag_to(6, -3.0);
        assert_eq!(e.drag_direction(), None);
        e.drag_to(9, 5.0);
        assert_eq!(e.drag_direction(), Some(DragDirection::Right));
        e.release();
        assert_eq!(e.selection_range(), Some((6, 9)));
        assert_eq!(e.drag_direction(), None);
    }

    #[test]
    fn click_after_drag_collapses_selection() {
        let mut e = edit("hello world");
        e.click_at(0);
        e.drag_to(5, 10.0);
        e.release();
        e.click_at(2);
        assert_eq!(e.selection_range(), None);
        assert_eq!(e.cursor(), 2);
        assert_eq!(e.drag_direction(), None);
        e.release();
        assert_eq!(e.selection(), Selection::None);
    }
}
