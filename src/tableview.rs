/// View state for the table (cursor, viewport)
///
/// `cursor_row` indexes the list of visible rows, not the table itself.
#[derive(Debug, Clone)]
pub struct TableView {
    pub cursor_row: usize,
    pub cursor_col: usize,

    // Viewport offset (top-left visible cell)
    pub viewport_row: usize,
    pub viewport_col: usize,

    // Visible area size (set during render)
    pub visible_rows: usize,
    pub visible_cols: usize,
}

impl TableView {
    pub fn new() -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            viewport_row: 0,
            viewport_col: 0,
            visible_rows: 20,
            visible_cols: 10,
        }
    }

    /// Table row under the cursor
    pub fn current_row(&self, visible: &[usize]) -> Option<usize> {
        visible.get(self.cursor_row).copied()
    }

    /// Keep the cursor on `anchor` if it is still visible after the visible
    /// set changed; otherwise clamp it into range.
    pub fn follow_row(&mut self, anchor: Option<usize>, visible: &[usize]) {
        if let Some(pos) = anchor.and_then(|row| visible.iter().position(|&r| r == row)) {
            self.cursor_row = pos;
        }
        self.clamp_cursor(visible.len(), usize::MAX);
        self.scroll_to_cursor();
    }

    /// Ensure cursor is within bounds
    pub fn clamp_cursor(&mut self, row_count: usize, col_count: usize) {
        self.cursor_row = self.cursor_row.min(row_count.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(col_count.saturating_sub(1));
    }

    /// Ensure viewport contains the cursor
    pub fn scroll_to_cursor(&mut self) {
        let rows = self.visible_rows.max(1);
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + rows {
            self.viewport_row = self.cursor_row + 1 - rows;
        }

        let cols = self.visible_cols.max(1);
        if self.cursor_col < self.viewport_col {
            self.viewport_col = self.cursor_col;
        } else if self.cursor_col >= self.viewport_col + cols {
            self.viewport_col = self.cursor_col + 1 - cols;
        }
    }

    /// Record the size of the drawable area
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.visible_rows = rows.max(1);
        self.visible_cols = cols.max(1);
        self.scroll_to_cursor();
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_right(&mut self, col_count: usize) {
        if self.cursor_col + 1 < col_count {
            self.cursor_col += 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_down(&mut self, row_count: usize) {
        if self.cursor_row + 1 < row_count {
            self.cursor_row += 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_to_top(&mut self) {
        self.cursor_row = 0;
        self.scroll_to_cursor();
    }

    pub fn move_to_bottom(&mut self, row_count: usize) {
        self.cursor_row = row_count.saturating_sub(1);
        self.scroll_to_cursor();
    }

    pub fn page_down(&mut self, row_count: usize) {
        let jump = self.visible_rows.saturating_sub(1).max(1);
        self.cursor_row = (self.cursor_row + jump).min(row_count.saturating_sub(1));
        self.scroll_to_cursor();
    }

    pub fn page_up(&mut self) {
        let jump = self.visible_rows.saturating_sub(1).max(1);
        self.cursor_row = self.cursor_row.saturating_sub(jump);
        self.scroll_to_cursor();
    }

    pub fn goto_row(&mut self, row: usize, row_count: usize) {
        self.cursor_row = row.min(row_count.saturating_sub(1));
        self.scroll_to_cursor();
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tableview_navigation_bounds() {
        let mut view = TableView::new();
        view.move_up();
        view.move_left();
        assert_eq!((view.cursor_row, view.cursor_col), (0, 0));

        view.move_down(2);
        view.move_down(2);
        view.move_right(3);
        view.move_right(3);
        view.move_right(3);
        assert_eq!((view.cursor_row, view.cursor_col), (1, 2));

        view.move_to_top();
        assert_eq!(view.cursor_row, 0);
        view.move_to_bottom(7);
        assert_eq!(view.cursor_row, 6);
        view.move_to_bottom(0);
        assert_eq!(view.cursor_row, 0);
    }

    #[test]
    fn test_tableview_scrolls_with_cursor() {
        let mut view = TableView::new();
        view.resize(5, 2);
        view.goto_row(12, 100);
        assert_eq!(view.viewport_row, 8);
        view.page_up();
        assert_eq!(view.cursor_row, 8);
        assert_eq!(view.viewport_row, 8);
        view.page_up();
        assert_eq!(view.cursor_row, 4);
        assert_eq!(view.viewport_row, 4);
        view.page_down(6);
        assert_eq!(view.cursor_row, 5);

        view.move_right(4);
        view.move_right(4);
        assert_eq!(view.viewport_col, 1);
    }

    #[test]
    fn test_follow_row_keeps_selection() {
        let mut view = TableView::new();
        let before = vec![0, 1, 2, 3];
        view.goto_row(2, before.len());
        let anchor = view.current_row(&before);
        assert_eq!(anchor, Some(2));

        // Row 2 is still visible, now at position 1
        view.follow_row(anchor, &[0, 2]);
        assert_eq!(view.cursor_row, 1);

        // Anchor filtered out: clamp
        view.follow_row(Some(3), &[1]);
        assert_eq!(view.cursor_row, 0);
        assert_eq!(view.current_row(&[]), None);
    }
}
