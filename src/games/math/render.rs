//! Pixel Math rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::Rarity;
use super::effects::Effect;
use super::state::{GameState, Outcome, Phase, Snapshot, Timer};
use super::{SELL_KEYS, USE_KEYS};

const KEYPAD_ROWS: u16 = 3;

pub fn render(
    state: &GameState,
    input: &str,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let snap = state.snapshot();
    let narrow = is_narrow_layout(area.width);
    let borders = if narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);
    render_header(&snap, f, rows[0], borders);

    if narrow {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(main_height(state)),
                Constraint::Length(inventory_height(state)),
                Constraint::Min(3),
            ])
            .split(rows[1]);
        render_main(state, &snap, input, f, chunks[0], borders, click_state);
        render_inventory(state, f, chunks[1], borders, click_state);
        render_log(state, f, chunks[2], borders);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(main_height(state)), Constraint::Min(3)])
            .split(cols[0]);
        render_main(state, &snap, input, f, left[0], borders, click_state);
        render_log(state, f, left[1], borders);
        render_inventory(state, f, cols[1], borders, click_state);
    }
}

fn main_height(state: &GameState) -> u16 {
    match state.phase {
        Phase::Answering => 6 + KEYPAD_ROWS,
        Phase::Shop => 7 + 2 * state.offers.len() as u16,
        Phase::GameOver => 8,
    }
}

fn inventory_height(state: &GameState) -> u16 {
    (2 * state.inventory.len() as u16).max(1) + 2
}

// ── Header ─────────────────────────────────────────────────────────────

fn render_header(snap: &Snapshot, f: &mut Frame, area: Rect, borders: Borders) {
    let hearts = if snap.lives <= 8 {
        "♥".repeat(snap.lives as usize)
    } else {
        format!("♥x{}", snap.lives)
    };

    let stats = Line::from(vec![
        Span::styled(format!(" {}", hearts), Style::default().fg(Color::Red)),
        Span::styled("  Score ", Style::default().fg(Color::Gray)),
        Span::styled(
            snap.score.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Round ", Style::default().fg(Color::Gray)),
        Span::styled(snap.round.to_string(), Style::default().fg(Color::White)),
        Span::styled("  Lv ", Style::default().fg(Color::Gray)),
        Span::styled(snap.difficulty.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  ✔{}", snap.correct_count),
            Style::default().fg(Color::Green),
        ),
    ]);

    let mut effect_spans = vec![Span::raw(" ")];
    if snap.effects.is_empty() {
        effect_spans.push(Span::styled(
            "No active effects",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for e in &snap.effects {
        effect_spans.push(Span::styled(
            format!("[{}] ", effect_text(e)),
            Style::default().fg(Color::Magenta),
        ));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Pixel Math ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let widget = Paragraph::new(vec![stats, Line::from(effect_spans)]).block(block);
    f.render_widget(widget, area);
}

fn effect_text(e: &Effect) -> String {
    match (e.rounds_left, e.bonus_ms) {
        (Some(n), _) => format!("{} {}r", e.kind.label(), n),
        (None, Some(ms)) => format!("{} {}ms", e.kind.label(), ms),
        (None, None) => e.kind.label().to_string(),
    }
}

// ── Main panel ─────────────────────────────────────────────────────────

fn render_main(
    state: &GameState,
    snap: &Snapshot,
    input: &str,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match state.phase {
        Phase::Answering => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(6), Constraint::Min(0)])
                .split(area);
            render_problem(state, snap, input, f, chunks[0], borders);
            render_keypad(state, f, chunks[1], click_state);
        }
        Phase::Shop => render_shop(state, f, area, borders, click_state),
        Phase::GameOver => render_game_over(snap, f, area, borders, click_state),
    }
}

fn render_problem(
    state: &GameState,
    snap: &Snapshot,
    input: &str,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
) {
    let bar_width = (area.width.saturating_sub(8) as usize).min(30);
    let question_style = if state.timer == Timer::Running {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(format!(" {}", snap.problem.question()), question_style)),
        timer_line(snap, bar_width),
        answer_line(state, input),
        outcome_line(state.last_outcome),
    ];

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Round {} · {}ms ", snap.round, snap.time_limit_ms));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn timer_line(snap: &Snapshot, width: usize) -> Line<'static> {
    let ratio = if snap.time_limit_ms == 0 {
        0.0
    } else {
        (snap.countdown_ms as f64 / snap.time_limit_ms as f64).clamp(0.0, 1.0)
    };
    let filled = (ratio * width as f64).round() as usize;
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };

    Line::from(vec![
        Span::raw(" "),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(width.saturating_sub(filled)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {}s", snap.countdown_ms.div_ceil(1000)),
            Style::default().fg(color),
        ),
    ])
}

fn answer_line(state: &GameState, input: &str) -> Line<'static> {
    let cursor = if state.accepting_answers() && (state.anim_frame / 10) % 2 == 0 {
        "_"
    } else {
        " "
    };
    Line::from(vec![
        Span::styled(" > ", Style::default().fg(Color::Gray)),
        Span::styled(
            input.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
    ])
}

fn outcome_line(outcome: Option<Outcome>) -> Line<'static> {
    let (text, color) = match outcome {
        None => ("Enter submits, ? gives up".to_string(), Color::DarkGray),
        Some(Outcome::Correct { gained }) => (format!("✔ Correct! +{}", gained), Color::Green),
        Some(Outcome::Wrong { answer }) => (format!("✘ Wrong, it was {}", answer), Color::Red),
        Some(Outcome::Timeout { answer }) => (format!("⏱ Time's up, it was {}", answer), Color::Red),
        Some(Outcome::Revealed { answer }) => (format!("It was {}", answer), Color::Magenta),
    };
    Line::from(Span::styled(format!(" {}", text), Style::default().fg(color)))
}

fn render_keypad(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let key_style = if state.accepting_answers() {
        Style::default().fg(Color::Black).bg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let ok_style = Style::default().fg(Color::Black).bg(Color::Green);
    let give_up_style = Style::default().fg(Color::Magenta);

    let mut top = TabBar::new(" ");
    for d in 1..=5u16 {
        top = top.tab(d.to_string(), key_style, DIGIT_BASE + d);
    }
    let mut middle = TabBar::new(" ");
    for d in [6u16, 7, 8, 9, 0] {
        middle = middle.tab(d.to_string(), key_style, DIGIT_BASE + d);
    }
    let bottom = TabBar::new(" ")
        .tab("-", key_style, MINUS)
        .tab("Del", key_style, ERASE)
        .tab("OK", ok_style, SUBMIT_ANSWER)
        .tab("Give up", give_up_style, REVEAL_ANSWER);

    let mut cs = click_state.borrow_mut();
    for (i, bar) in [top, middle, bottom].into_iter().enumerate() {
        let i = i as u16;
        if i >= area.height {
            break;
        }
        bar.render(f, Rect::new(area.x + 1, area.y + i, area.width.saturating_sub(1), 1), &mut cs);
    }
}

// ── Shop ───────────────────────────────────────────────────────────────

fn render_shop(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" Level {} cleared! Spend your {} points.", state.difficulty, state.score),
        Style::default().fg(Color::Cyan),
    )));
    if state.inventory_full() {
        cl.push(Line::from(Span::styled(
            " Inventory full: use or sell an item first",
            Style::default().fg(Color::Red),
        )));
    }
    if state.offers.is_empty() {
        cl.push(Line::from(Span::styled(
            " Nothing for sale this time",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, offer) in state.offers.iter().enumerate() {
        let affordable = state.score >= offer.price && !state.inventory_full();
        let (key_color, text_color) = if affordable {
            (Color::Yellow, Color::White)
        } else {
            (Color::DarkGray, Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", i + 1),
                    Style::default().fg(key_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(offer.def.name, Style::default().fg(text_color)),
                Span::styled(
                    format!("  {} pts", offer.price),
                    Style::default().fg(key_color),
                ),
                Span::styled(
                    format!("  {}", offer.def.rarity.name()),
                    Style::default().fg(rarity_color(offer.def.rarity)),
                ),
            ]),
            BUY_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!("     {}", offer.def.description),
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.push(Line::from(""));
    push_command(&mut cl, 'C', "Continue (harder, less time)", CLOSE_SHOP);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(" Shop ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
    }
}

// ── Game over ──────────────────────────────────────────────────────────

fn render_game_over(
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let stat = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<16}", label), Style::default().fg(Color::Gray)),
            Span::styled(
                value,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " GAME OVER",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    cl.push(stat("Correct answers", snap.correct_count.to_string()));
    cl.push(stat("Score", snap.score.to_string()));
    cl.push(stat("Reached round", snap.round.to_string()));
    cl.push(Line::from(""));
    push_command(&mut cl, 'R', "Play again", RESTART);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn push_command(cl: &mut ClickableList, key: char, label: &str, action_id: u16) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", key),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.to_string(), Style::default().fg(Color::White)),
        ]),
        action_id,
    );
}

// ── Inventory & log ────────────────────────────────────────────────────

fn render_inventory(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let usable = state.phase != Phase::GameOver;
    let mut cl = ClickableList::new();
    if state.inventory.is_empty() {
        cl.push(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, item) in state.inventory.iter().enumerate() {
        let use_key = USE_KEYS.get(i).map_or(' ', |k| k.to_ascii_uppercase());
        let sell_key = SELL_KEYS.get(i).map_or(' ', |k| k.to_ascii_uppercase());
        let key_color = if usable { Color::Yellow } else { Color::DarkGray };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", use_key),
                    Style::default().fg(key_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(item.def.name, Style::default().fg(Color::White)),
            ]),
            USE_BASE + i as u16,
        );
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("     [{}] ", sell_key), Style::default().fg(key_color)),
                Span::styled(
                    format!("Sell +{}", item.resale_value(state.config.sell_ratio)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            SELL_BASE + i as u16,
        );
    }

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(
            " Items {}/{} ",
            state.inventory.len(),
            state.config.max_inventory
        ));
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(state: &GameState, f: &mut Frame, area: Rect, borders: Borders) {
    let max_lines = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(max_lines);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!(" > {}", entry.text), style))
        })
        .collect();

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::math::config::GameConfig;
    use crate::games::math::effects::EffectKind;

    #[test]
    fn effect_labels() {
        assert_eq!(effect_text(&Effect::timed(EffectKind::Double, 2)), "2x 2r");
        assert_eq!(effect_text(&Effect::add_time(500)), "+Time 500ms");
    }

    #[test]
    fn timer_gauge_tracks_countdown() {
        let mut s = GameState::new(GameConfig::default(), 1);
        s.countdown_ms = 1500;
        let line = timer_line(&s.snapshot(), 10);
        let text: String = line.spans.iter().map(|sp| sp.content.as_ref()).collect();
        assert_eq!(text, " █████░░░░░ 2s");
    }

    #[test]
    fn panel_heights_follow_phase() {
        let mut s = GameState::new(GameConfig::default(), 1);
        assert_eq!(main_height(&s), 9);
        assert_eq!(inventory_height(&s), 3);
        s.phase = Phase::GameOver;
        assert_eq!(main_height(&s), 8);
    }
}
