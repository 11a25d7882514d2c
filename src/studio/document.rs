//! The edited document
//!
//! Owns the source text and the cursor offsets. Every edit operation is
//! synchronous and atomic: the string and both offsets are updated before
//! the call returns, and `0 <= cursor_start <= cursor_end <= text.len()`
//! always holds (byte offsets, kept on char boundaries).

/// Number of spaces inserted per indent unit
pub const INDENT_UNIT: &str = "    ";

/// Document text plus cursor/selection state
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    cursor_start: usize,
    cursor_end: usize,
}

impl Document {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with initial text, cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            cursor_start: end,
            cursor_end: end,
        }
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Selection as (start, end) byte offsets; equal when no selection
    pub fn selection(&self) -> (usize, usize) {
        (self.cursor_start, self.cursor_end)
    }

    /// Primary cursor offset
    pub fn cursor(&self) -> usize {
        self.cursor_start
    }

    /// Whether there is nothing to analyze
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Collapse the cursor to `pos` (clamped to a char boundary)
    pub fn set_cursor(&mut self, pos: usize) {
        let pos = self.clamp_boundary(pos);
        self.cursor_start = pos;
        self.cursor_end = pos;
    }

    /// Select the byte range `start..end`
    pub fn select(&mut self, start: usize, end: usize) {
        let start = self.clamp_boundary(start);
        let end = self.clamp_boundary(end).max(start);
        self.cursor_start = start;
        self.cursor_end = end;
    }

    /// Replace the selection (or insert at the cursor) and place the
    /// cursor after the inserted text
    pub fn replace_selection(&mut self, insert: &str) {
        self.text
            .replace_range(self.cursor_start..self.cursor_end, insert);
        let after = self.cursor_start + insert.len();
        self.cursor_start = after;
        self.cursor_end = after;
    }

    /// Type one character
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.replace_selection(c.encode_utf8(&mut buf));
    }

    /// Tab key: one literal 4-space indent unit, cursor advances past it
    pub fn insert_tab(&mut self) {
        self.replace_selection(INDENT_UNIT);
    }

    /// Enter key: newline plus the current line's leading whitespace, with
    /// one extra indent unit when the trimmed line ends in `{`, `(` or `[`.
    /// The cursor lands immediately after the inserted indent.
    pub fn insert_newline(&mut self) {
        let current_line = &self.text[self.line_start(self.cursor_start)..self.cursor_start];
        let ws_len = current_line.len() - current_line.trim_start().len();
        let mut indent = current_line[..ws_len].to_string();
        if matches!(current_line.trim().chars().last(), Some('{' | '(' | '[')) {
            indent.push_str(INDENT_UNIT);
        }
        let insert = format!("\n{indent}");
        self.replace_selection(&insert);
    }

    /// Backspace: delete the selection, or the char before the cursor
    pub fn backspace(&mut self) {
        if self.cursor_start != self.cursor_end {
            self.replace_selection("");
            return;
        }
        if let Some(prev) = self.prev_boundary(self.cursor_start) {
            self.text.replace_range(prev..self.cursor_start, "");
            self.cursor_start = prev;
            self.cursor_end = prev;
        }
    }

    /// Delete key: delete the selection, or the char after the cursor
    pub fn delete_forward(&mut self) {
        if self.cursor_start != self.cursor_end {
            self.replace_selection("");
            return;
        }
        if let Some(next) = self.next_boundary(self.cursor_start) {
            self.text.replace_range(self.cursor_start..next, "");
        }
    }

    /// Move one char left (or collapse a selection to its start)
    pub fn move_left(&mut self) {
        if self.cursor_start != self.cursor_end {
            self.set_cursor(self.cursor_start);
        } else if let Some(prev) = self.prev_boundary(self.cursor_start) {
            self.set_cursor(prev);
        }
    }

    /// Move one char right (or collapse a selection to its end)
    pub fn move_right(&mut self) {
        if self.cursor_start != self.cursor_end {
            self.set_cursor(self.cursor_end);
        } else if let Some(next) = self.next_boundary(self.cursor_start) {
            self.set_cursor(next);
        }
    }

    /// Move to the previous line, preserving the column where possible
    pub fn move_up(&mut self) {
        let (line, col) = self.line_col();
        if line > 0 {
            let target = self.offset_at(line - 1, col);
            self.set_cursor(target);
        }
    }

    /// Move to the next line, preserving the column where possible
    pub fn move_down(&mut self) {
        let (line, col) = self.line_col();
        if line + 1 < self.line_count() {
            let target = self.offset_at(line + 1, col);
            self.set_cursor(target);
        }
    }

    /// Move to the start of the current line
    pub fn move_line_start(&mut self) {
        let start = self.line_start(self.cursor_start);
        self.set_cursor(start);
    }

    /// Move to the end of the current line
    pub fn move_line_end(&mut self) {
        let end = self.text[self.cursor_start..]
            .find('\n')
            .map(|i| self.cursor_start + i)
            .unwrap_or(self.text.len());
        self.set_cursor(end);
    }

    /// Reset to an empty document
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_start = 0;
        self.cursor_end = 0;
    }

    /// Replace the whole text, cursor at the start
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_start = 0;
        self.cursor_end = 0;
    }

    /// Cursor position as zero-based (line, column) with columns in chars
    pub fn line_col(&self) -> (usize, usize) {
        let head = &self.text[..self.cursor_start];
        let line = head.matches('\n').count();
        let col = head[self.line_start(self.cursor_start)..].chars().count();
        (line, col)
    }

    /// Number of lines (a trailing newline starts a new, empty line)
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Byte offset of the start of the line containing `pos`
    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// Byte offset for (line, column), clamping the column to line length
    fn offset_at(&self, line: usize, col: usize) -> usize {
        let mut start = 0;
        for (idx, text_line) in self.text.split('\n').enumerate() {
            if idx == line {
                let within: usize = text_line
                    .char_indices()
                    .take(col)
                    .last()
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);
                return start + within.min(text_line.len());
            }
            start += text_line.len() + 1;
        }
        self.text.len()
    }

    fn prev_boundary(&self, pos: usize) -> Option<usize> {
        self.text[..pos]
            .chars()
            .next_back()
            .map(|c| pos - c.len_utf8())
    }

    fn next_boundary(&self, pos: usize) -> Option<usize> {
        self.text[pos..].chars().next().map(|c| pos + c.len_utf8())
    }

    fn clamp_boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while pos > 0 && !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_inserts_four_spaces() {
        let mut doc = Document::with_text("ab");
        doc.set_cursor(1);
        doc.insert_tab();
        assert_eq!(doc.text(), "a    b");
        assert_eq!(doc.selection(), (5, 5));
    }

    #[test]
    fn test_tab_replaces_selection() {
        let mut doc = Document::with_text("hello world");
        doc.select(5, 11);
        doc.insert_tab();
        assert_eq!(doc.text(), "hello    ");
        assert_eq!(doc.selection(), (9, 9));
    }

    #[test]
    fn test_enter_after_open_brace_adds_indent_unit() {
        let mut doc = Document::with_text("if (x) {");
        doc.insert_newline();
        assert_eq!(doc.text(), "if (x) {\n    ");
        assert_eq!(doc.cursor(), doc.text().len());
    }

    #[test]
    fn test_enter_preserves_existing_indent() {
        let mut doc = Document::with_text("    int x = 1;");
        doc.insert_newline();
        assert_eq!(doc.text(), "    int x = 1;\n    ");
    }

    #[test]
    fn test_enter_stacks_indent_inside_nested_openers() {
        let mut doc = Document::with_text("    for (\n");
        doc.set_cursor(9); // end of the "    for (" line
        doc.insert_newline();
        assert_eq!(doc.text(), "    for (\n        \n");
    }

    #[test]
    fn test_enter_mid_line_uses_text_before_cursor() {
        // cursor between '{' and trailing text: the part before the cursor
        // decides the indent
        let mut doc = Document::with_text("while (1) {}");
        doc.set_cursor(11); // after '{'
        doc.insert_newline();
        assert_eq!(doc.text(), "while (1) {\n    }");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut doc = Document::with_text("abc");
        doc.set_cursor(2);
        doc.backspace();
        assert_eq!(doc.text(), "ac");
        doc.delete_forward();
        assert_eq!(doc.text(), "a");
        assert_eq!(doc.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut doc = Document::with_text("abc");
        doc.set_cursor(0);
        doc.backspace();
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut doc = Document::with_text("longer line\nab\nlonger again");
        doc.set_cursor(8); // col 8 on line 0
        doc.move_down();
        let (line, col) = doc.line_col();
        assert_eq!((line, col), (1, 2)); // clamped to "ab"
        doc.move_down();
        let (line, col) = doc.line_col();
        assert_eq!(line, 2);
        assert_eq!(col, 2); // the clamped column carries forward
    }

    #[test]
    fn test_line_col_and_home_end() {
        let mut doc = Document::with_text("one\ntwo three");
        doc.set_cursor(doc.text().len());
        assert_eq!(doc.line_col(), (1, 9));
        doc.move_line_start();
        assert_eq!(doc.line_col(), (1, 0));
        doc.move_line_end();
        assert_eq!(doc.line_col(), (1, 9));
    }

    #[test]
    fn test_multibyte_editing_keeps_boundaries() {
        let mut doc = Document::with_text("héllo");
        doc.move_left();
        doc.move_left();
        doc.insert_char('x');
        assert_eq!(doc.text(), "hélxlo");
        doc.backspace();
        assert_eq!(doc.text(), "héllo");
    }

    #[test]
    fn test_blank_detection() {
        assert!(Document::with_text("  \n \t ").is_blank());
        assert!(!Document::with_text(" x ").is_blank());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut doc = Document::with_text("exit();");
        doc.clear();
        assert_eq!(doc.text(), "");
        assert_eq!(doc.selection(), (0, 0));
    }
}
