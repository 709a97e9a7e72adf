mod input;
mod landscape;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use input::{
    ClickState, InputEvent, KEY_BACKSPACE, KEY_DOWN, KEY_ENTER, KEY_ESC, KEY_LEFT, KEY_RIGHT,
    KEY_UP,
};
use landscape::catalog::{load_embedded, validate_catalog};
use landscape::model::Catalog;
use landscape::LandscapeApp;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::FrameClock;

/// Playback steps per second; each step moves the timeline 0.02 years.
const PLAYBACK_STEPS_PER_SEC: u32 = 30;

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

/// Build the catalog and report its data quality to the console. A broken
/// source table leaves an empty landscape instead of a dead page.
fn load_catalog() -> Catalog {
    let catalog = match load_embedded() {
        Ok(catalog) => catalog,
        Err(err) => {
            warn(&format!("catalog failed to load: {err}"));
            return Catalog::default();
        }
    };

    let report = validate_catalog(&catalog);
    log(&format!(
        "catalog: {} jobs, {} high confidence, {} low confidence, {} via alias",
        catalog.len(),
        report.high_confidence,
        report.low_confidence,
        report.aliased
    ));
    for msg in report.errors.iter().chain(&report.warnings) {
        warn(msg);
    }
    catalog
}

/// Keyboard to app key. Characters keep their case for text input.
fn key_to_char(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Left => Some(KEY_LEFT),
        KeyCode::Right => Some(KEY_RIGHT),
        KeyCode::Down => Some(KEY_DOWN),
        KeyCode::Up => Some(KEY_UP),
        KeyCode::Enter => Some(KEY_ENTER),
        KeyCode::Esc => Some(KEY_ESC),
        KeyCode::Backspace => Some(KEY_BACKSPACE),
        _ => None,
    }
}

/// Resolve a mouse position against the grid container's bounding rect.
fn dom_click_target(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;
    // DomBackend renders into a <div> directly inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();
    cs.resolve_pixel(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(LandscapeApp::new(load_catalog())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_click_target(mouse_event.x, mouse_event.y, &cs)
            };
            if let Some(id) = action {
                app.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            if let Some(c) = key_to_char(key_event.code) {
                app.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    terminal.draw_web({
        let clock = RefCell::new(FrameClock::new(PLAYBACK_STEPS_PER_SEC));
        move |f| {
            let steps = clock.borrow_mut().update(now_ms());
            if steps > 0 {
                app.borrow_mut().tick(steps);
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            app.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
