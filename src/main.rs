mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use games::math::config::GameConfig;
use games::math::MathGame;
use games::Game;
use input::{ClickState, InputEvent};
use time::GameTime;

/// Click position relative to the terminal grid, plus the grid's pixel size.
fn grid_relative_click(mouse_x: u32, mouse_y: u32) -> Option<(f64, f64, f64, f64)> {
    let document = web_sys::window()?.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    Some((
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    ))
}

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let config = GameConfig::load();
    let clock = Rc::new(RefCell::new(GameTime::new(config.tick_ms)));
    let seed = js_sys::Date::now() as u64;
    let game = Rc::new(RefCell::new(MathGame::new(config, seed)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let Some((x, y, width, height)) = grid_relative_click(mouse_event.x, mouse_event.y)
            else {
                return;
            };
            let action = click_state.borrow().hit_test_pixels(x, y, width, height);
            log::debug!("click at ({:.0}, {:.0}) -> {:?}", x, y, action);

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let Some(event) = InputEvent::from_key_code(&key_event.code) {
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.draw_web(move |f| {
        let ticks = clock.borrow_mut().update(js_sys::Date::now());
        if ticks > 0 {
            game.borrow_mut().tick(ticks);
        }

        let area = f.area();
        click_state
            .borrow_mut()
            .begin_frame(area.width, area.height);
        game.borrow().render(f, area, &click_state);
    });

    Ok(())
}
