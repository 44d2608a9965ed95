//! UTF-8 safe editing buffer for the form's text fields.

use unicode_width::UnicodeWidthStr;

/// Which characters a field accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    /// ASCII digits only (quantity).
    Digits,
}

impl InputKind {
    fn accepts(self, character: char) -> bool {
        match self {
            InputKind::Text => !character.is_control(),
            InputKind::Digits => character.is_ascii_digit(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    input: String,
    /// Byte index into `input`, always on a char boundary.
    cursor: usize,
    kind: InputKind,
}

impl TextInputState {
    pub fn new(kind: InputKind) -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            kind,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal columns between the start of the field and the cursor.
    pub fn cursor_column(&self) -> u16 {
        u16::try_from(self.input[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    /// Replaces the text and parks the cursor at the end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor = self.input.len();
    }

    pub fn move_left(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= previous.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Inserts at the cursor. Returns false when the field rejects the char.
    pub fn insert_char(&mut self, character: char) -> bool {
        if !self.kind.accepts(character) {
            return false;
        }
        self.input.insert(self.cursor, character);
        self.cursor += character.len_utf8();
        true
    }

    /// Deletes the char before the cursor. Returns false at the start of the field.
    pub fn backspace(&mut self) -> bool {
        let Some(previous) = self.input[..self.cursor].chars().next_back() else {
            return false;
        };
        let start = self.cursor - previous.len_utf8();
        self.input.drain(start..self.cursor);
        self.cursor = start;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_respect_multibyte_boundaries() {
        let mut field = TextInputState::new(InputKind::Text);
        field.set_input("Sägeblatt");
        field.move_left();
        field.move_left();
        assert!(field.backspace());
        assert_eq!(field.input(), "Sägebltt");

        field.set_input("ä");
        assert!(field.backspace());
        assert_eq!(field.input(), "");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn digits_field_rejects_letters() {
        let mut field = TextInputState::new(InputKind::Digits);
        assert!(field.insert_char('4'));
        assert!(!field.insert_char('x'));
        assert!(field.insert_char('2'));
        assert_eq!(field.input(), "42");
        assert_eq!(field.cursor_column(), 2);
    }

    #[test]
    fn cursor_column_counts_wide_characters() {
        let mut field = TextInputState::new(InputKind::Text);
        field.set_input("工具");
        assert_eq!(field.cursor(), 6);
        assert_eq!(field.cursor_column(), 4);
        assert!(!TextInputState::default().clone().backspace());
    }
}
