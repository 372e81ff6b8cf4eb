//! Cursor and viewport navigation.
//!
//! The cursor selects a row of the derived view; the viewport is the window
//! `viewport_top ..= viewport_top + page_height` that gets rendered. Every
//! command clamps against the current view length, so navigating past
//! either end is silently absorbed.

/// Hint for the renderer after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    /// The viewport moved; visible rows changed.
    Notify,
    /// Only the highlighted row moved within an unchanged viewport.
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Selected row in the derived view
    pub row: usize,
    /// First rendered row
    pub viewport_top: usize,
    /// Rows below `viewport_top` that still fit on screen
    pub page_height: usize,
}

fn last_row(len: usize) -> usize {
    len.saturating_sub(1)
}

impl Cursor {
    pub fn new(page_height: usize) -> Self {
        Self {
            row: 0,
            viewport_top: 0,
            page_height,
        }
    }

    /// Cursor offset inside the viewport.
    pub fn relative_row(&self) -> usize {
        self.row.saturating_sub(self.viewport_top)
    }

    /// Last row index inside the viewport.
    pub fn last_visible_row(&self) -> usize {
        self.viewport_top + self.page_height
    }

    pub fn move_down(&mut self, len: usize) -> RenderHint {
        self.row = (self.row + 1).min(last_row(len));
        if self.row > self.last_visible_row() {
            self.viewport_top += 1;
            RenderHint::Notify
        } else {
            RenderHint::Quiet
        }
    }

    pub fn move_up(&mut self) -> RenderHint {
        self.row = self.row.saturating_sub(1);
        if self.row < self.viewport_top {
            self.viewport_top = self.row;
            RenderHint::Notify
        } else {
            RenderHint::Quiet
        }
    }

    /// Move one page down, keeping the cursor's offset inside the viewport.
    pub fn page_down(&mut self, len: usize) -> RenderHint {
        let relative = self.relative_row();
        self.row = (self.row + self.page_height).min(last_row(len));
        self.viewport_top = self.row.saturating_sub(relative);
        RenderHint::Notify
    }

    /// Move one page up; does nothing when less than a page above.
    pub fn page_up(&mut self) -> RenderHint {
        if self.row < self.page_height {
            return RenderHint::Quiet;
        }
        let relative = self.relative_row();
        self.row -= self.page_height;
        self.viewport_top = self.row.saturating_sub(relative);
        RenderHint::Notify
    }

    pub fn first_page(&mut self) -> RenderHint {
        self.row = 0;
        self.viewport_top = 0;
        RenderHint::Notify
    }

    pub fn last_page(&mut self, len: usize) -> RenderHint {
        self.row = last_row(len);
        self.viewport_top = self.row.saturating_sub(self.page_height);
        RenderHint::Notify
    }

    /// Jump to `target`, placing it at the top of the viewport.
    pub fn goto(&mut self, target: usize, len: usize) -> RenderHint {
        self.row = target.min(last_row(len));
        self.viewport_top = self.row;
        RenderHint::Notify
    }

    pub fn move_to_first_viewport_line(&mut self, len: usize) -> RenderHint {
        self.row = self.viewport_top.min(last_row(len));
        RenderHint::Quiet
    }

    pub fn move_to_last_viewport_line(&mut self, len: usize) -> RenderHint {
        self.row = self.last_visible_row().min(last_row(len));
        RenderHint::Quiet
    }

    pub fn move_to_center_viewport_line(&mut self, len: usize) -> RenderHint {
        self.row = (self.viewport_top + self.page_height / 2).min(last_row(len));
        RenderHint::Quiet
    }

    /// Apply a new page height, scrolling so the cursor stays on screen.
    pub fn resize(&mut self, page_height: usize) -> RenderHint {
        self.page_height = page_height;
        if self.row > self.last_visible_row() {
            self.viewport_top = self.row - self.page_height;
        }
        RenderHint::Notify
    }

    /// Pull row and viewport back into range after the view shrank.
    pub fn clamp(&mut self, len: usize) {
        self.row = self.row.min(last_row(len));
        self.viewport_top = self.viewport_top.min(self.row);
    }

    pub fn reset(&mut self) {
        self.row = 0;
        self.viewport_top = 0;
    }
}
