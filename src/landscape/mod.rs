//! Job landscape: how AI exposure reshapes a catalog of jobs between 2025
//! and 2030, drawn as a terrain of growth peaks.

pub mod actions;
pub mod catalog;
pub mod logic;
pub mod model;
pub mod render;
pub mod risk;
pub mod state;
pub mod terrain;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{
    ClickState, InputEvent, KEY_BACKSPACE, KEY_DOWN, KEY_ENTER, KEY_ESC, KEY_LEFT, KEY_RIGHT,
    KEY_UP,
};

use actions::*;
use logic::{YEAR_FINE_STEP, YEAR_STEP};
use model::Catalog;
use risk::BASE_YEAR;
use state::{LandscapeState, Overlay, Screen};

pub struct LandscapeApp {
    pub state: LandscapeState,
}

impl LandscapeApp {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            state: LandscapeState::new(catalog),
        }
    }

    /// Dispatch one input event. Returns true if it changed anything.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            TOGGLE_PLAY => {
                logic::toggle_play(&mut self.state);
                true
            }
            BACK => logic::back(&mut self.state),
            YEAR_BACK => {
                self.state.step_year(-YEAR_STEP);
                true
            }
            YEAR_FORWARD => {
                self.state.step_year(YEAR_STEP);
                true
            }
            OPEN_SEARCH => {
                logic::open_overlay(&mut self.state, Overlay::Search);
                true
            }
            OPEN_SKILLS => {
                logic::open_overlay(&mut self.state, Overlay::Skills);
                true
            }
            OVERLAY_CONFIRM => self.confirm_overlay(),
            OVERLAY_CLOSE => logic::close_overlay(&mut self.state),
            id if (TIMELINE_BASE..TIMELINE_BASE + TIMELINE_BUCKETS).contains(&id) => {
                let bucket = (id - TIMELINE_BASE) as f64;
                self.state.playing = false;
                self.state.set_year(BASE_YEAR + bucket * YEAR_STEP);
                true
            }
            id if (TASK_ROW_BASE..JOB_ROW_BASE).contains(&id) => {
                self.state.screen == Screen::Detail
                    && logic::upskill_selected(&mut self.state, (id - TASK_ROW_BASE) as usize)
            }
            id if id >= JOB_ROW_BASE => {
                // Search results reuse the job row actions.
                logic::close_overlay(&mut self.state);
                logic::open_job(&mut self.state, (id - JOB_ROW_BASE) as usize)
            }
            _ => false,
        }
    }

    fn confirm_overlay(&mut self) -> bool {
        match self.state.overlay {
            Overlay::None => false,
            Overlay::Search => logic::open_search_result(&mut self.state),
            Overlay::Skills => logic::confirm_skills(&mut self.state),
        }
    }

    /// Keys while an overlay is open: named keys drive it, everything
    /// else is typed into it.
    fn handle_overlay_key(&mut self, key: char) -> bool {
        match key {
            KEY_ESC => logic::close_overlay(&mut self.state),
            KEY_ENTER => self.confirm_overlay(),
            KEY_BACKSPACE => logic::erase_char(&mut self.state),
            KEY_UP | KEY_DOWN if self.state.overlay == Overlay::Search => {
                let delta = if key == KEY_UP { -1 } else { 1 };
                logic::move_search_cursor(&mut self.state, delta);
                true
            }
            KEY_UP | KEY_DOWN | KEY_LEFT | KEY_RIGHT => false,
            _ => logic::type_char(&mut self.state, key),
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        if self.state.overlay != Overlay::None {
            return self.handle_overlay_key(key);
        }

        let key = match key {
            KEY_LEFT => '[',
            KEY_RIGHT => ']',
            KEY_DOWN => 'j',
            KEY_UP => 'k',
            KEY_ENTER => 'o',
            KEY_ESC => 'q',
            c => c.to_ascii_lowercase(),
        };

        // Timeline and overlay keys work on every screen.
        match key {
            '[' => {
                self.state.step_year(-YEAR_STEP);
                return true;
            }
            ']' => {
                self.state.step_year(YEAR_STEP);
                return true;
            }
            ',' => {
                self.state.step_year(-YEAR_FINE_STEP);
                return true;
            }
            '.' => {
                self.state.step_year(YEAR_FINE_STEP);
                return true;
            }
            'p' => {
                logic::toggle_play(&mut self.state);
                return true;
            }
            'q' => return logic::back(&mut self.state),
            'f' => {
                logic::open_overlay(&mut self.state, Overlay::Search);
                return true;
            }
            's' => {
                logic::open_overlay(&mut self.state, Overlay::Skills);
                return true;
            }
            _ => {}
        }

        match self.state.screen {
            Screen::Landscape => match key {
                'j' => { logic::move_cursor(&mut self.state, 1); true }
                'k' => { logic::move_cursor(&mut self.state, -1); true }
                'o' => {
                    let cursor = self.state.cursor;
                    logic::open_job(&mut self.state, cursor)
                }
                _ => false,
            },
            Screen::Detail => match key.to_digit(10) {
                Some(n @ 1..=9) => logic::upskill_selected(&mut self.state, n as usize - 1),
                _ => false,
            },
        }
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
