//! Clickable UI components. Each one renders and registers its own click
//! targets so the two never drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// One row of labelled buttons (keypad keys, shop commands).
///
/// ```ignore
/// TabBar::new(" ")
///     .tab("7", key_style, DIGIT_BASE + 7)
///     .tab("OK", ok_style, SUBMIT_ANSWER)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Labels padded with one space each side, as rendered.
    fn padded_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {} ", label)).width() as u16, *id))
            .collect()
    }

    /// Render and register one target per button.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let widths = self.padded_widths();
        let gap = Line::from(self.separator).width() as u16;

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
        cs.add_button_row(area, &widths, gap);
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a `Paragraph`, some of them bound to an action.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Shop"));
/// cl.push_clickable(Line::from(" [1] +2 Lives  120"), BUY_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line bound to `action_id`. The target follows the line wherever
    /// it ends up.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line that is visible.
    ///
    /// `top`/`bottom` are the rows taken by borders. Lines are assumed not
    /// to wrap.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top: u16, bottom: u16) {
        let first_row = area.y + top;
        let end_row = area.y + area.height.saturating_sub(bottom);
        for &(line_idx, action_id) in &self.actions {
            let row = first_row + line_idx;
            if row < end_row {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
