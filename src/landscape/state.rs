//! Landscape application state.

use super::logic::SkillReport;
use super::model::{Catalog, Job};
use super::risk::{BASE_YEAR, END_YEAR};

const MAX_LOG: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Terrain overview and job list.
    Landscape,
    /// One job's tasks, composition and impact matrix.
    Detail,
}

/// Text panel drawn over the screen body. While open it owns typed keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    Search,
    Skills,
}

pub struct LandscapeState {
    /// Fractional year on the timeline, always within [2025, 2030].
    pub year: f64,
    /// Live catalog, replaced on every upskill.
    pub catalog: Catalog,
    /// Catalog as loaded, used to tell which jobs were rescued.
    pub baseline: Catalog,
    /// Id of the job shown on the detail screen.
    pub selected: Option<String>,
    /// Highlighted row of the job list.
    pub cursor: usize,
    pub screen: Screen,
    pub playing: bool,
    pub log: Vec<String>,
    pub overlay: Overlay,
    /// Job search text.
    pub query: String,
    /// Highlighted row among the search results.
    pub search_cursor: usize,
    /// Comma-separated skills typed into the skills check.
    pub skills_input: String,
    /// Result of the last skills check; `None` while still typing.
    pub skill_report: Option<SkillReport>,
}

impl LandscapeState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            year: BASE_YEAR,
            baseline: catalog.clone(),
            catalog,
            selected: None,
            cursor: 0,
            screen: Screen::Landscape,
            playing: false,
            log: vec!["Job landscape loaded".into()],
            overlay: Overlay::None,
            query: String::new(),
            search_cursor: 0,
            skills_input: String::new(),
            skill_report: None,
        }
    }

    /// Move the timeline to `year`, clamped to the slider range. NaN is
    /// ignored.
    pub fn set_year(&mut self, year: f64) {
        if year.is_nan() {
            return;
        }
        self.year = year.clamp(BASE_YEAR, END_YEAR);
    }

    pub fn step_year(&mut self, delta: f64) {
        self.set_year(self.year + delta);
    }

    /// Select a job by id and move the cursor to it. Unknown ids clear the
    /// selection.
    pub fn select_job(&mut self, id: Option<&str>) {
        let position = id.and_then(|id| self.catalog.position(id));
        if let Some(index) = position {
            self.cursor = index;
        }
        self.selected = id.filter(|_| position.is_some()).map(str::to_string);
    }

    /// The selected job as it is in the current catalog.
    pub fn selected_job(&self) -> Option<&Job> {
        self.selected.as_deref().and_then(|id| self.catalog.find(id))
    }

    pub fn baseline_job(&self, id: &str) -> Option<&Job> {
        self.baseline.find(id)
    }

    /// Text buffer the open overlay types into.
    pub fn input_buffer(&mut self) -> Option<&mut String> {
        match self.overlay {
            Overlay::Search => Some(&mut self.query),
            Overlay::Skills if self.skill_report.is_none() => Some(&mut self.skills_input),
            _ => None,
        }
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }
}
