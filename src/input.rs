//! Input plumbing shared by the frontend and the game: event types, click
//! targets, and pixel-to-cell conversion.

use ratzilla::event::KeyCode;
use ratzilla::ratatui::layout::Rect;

/// Input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key (letters lowercased).
    Key(char),
    Enter,
    Backspace,
    Esc,
    /// A click/tap on a registered target, identified by a semantic action ID.
    Click(u16),
}

impl InputEvent {
    /// Map a ratzilla key code to an event. Unhandled keys give `None`.
    pub fn from_key_code(code: &KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(c) => Some(InputEvent::Key(c.to_ascii_lowercase())),
            KeyCode::Enter => Some(InputEvent::Enter),
            KeyCode::Backspace | KeyCode::Delete => Some(InputEvent::Backspace),
            KeyCode::Esc => Some(InputEvent::Esc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cells.
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame, plus the terminal size they were
/// laid out for. Shared between the draw loop and the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame: remember the size, forget old targets.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Full-width target on one row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a row of buttons laid out left to right from `area.x`.
    ///
    /// `buttons` holds `(display_width, action_id)` per label; labels are
    /// separated by `gap` columns. Each button owns its label and the gap
    /// after it, and the last one runs to the right edge of `area`.
    pub fn add_button_row(&mut self, area: Rect, buttons: &[(u16, u16)], gap: u16) {
        let right_edge = area.x + area.width;
        let mut x = area.x;
        for (i, &(width, action_id)) in buttons.iter().enumerate() {
            if x >= right_edge {
                break;
            }
            let end = if i + 1 == buttons.len() {
                right_edge
            } else {
                (x + width + gap).min(right_edge)
            };
            self.add_click_target(Rect::new(x, area.y, end - x, area.height), action_id);
            x = end;
        }
    }

    /// Action at a cell. Later targets win where they overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }

    /// Hit-test a click given in pixels relative to the grid's top-left corner.
    pub fn hit_test_pixels(&self, x: f64, y: f64, grid_width: f64, grid_height: f64) -> Option<u16> {
        let col = pixel_to_cell(x, grid_width, self.terminal_cols)?;
        let row = pixel_to_cell(y, grid_height, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

/// Whether a width (in columns) gets the stacked phone layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel offset along one axis to a cell index.
///
/// `extent` is the grid's pixel size along that axis and `cells` its cell count.
/// Returns `None` outside the grid or for a degenerate grid.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
