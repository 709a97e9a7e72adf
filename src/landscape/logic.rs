//! Landscape logic: pure catalog mutation plus the state transitions driven
//! by input and playback.

use super::model::Catalog;
use super::risk::{BASE_YEAR, END_YEAR};
use super::state::{LandscapeState, Overlay, Screen};

/// Human criticality gained by one upskill step.
pub const UPSKILL_HUMAN_GAIN: f64 = 0.2;
/// AI capability lost by one upskill step.
pub const UPSKILL_AI_REDUCTION: f64 = 0.1;

/// Years advanced per playback tick.
pub const PLAYBACK_STEP: f64 = 0.02;

/// Coarse and fine year steps for the keyboard.
pub const YEAR_STEP: f64 = 0.5;
pub const YEAR_FINE_STEP: f64 = 0.1;

/// Shortest query that produces search results.
pub const MIN_QUERY_CHARS: usize = 2;

/// Deep-link target of the skills check's career path.
pub const CAREER_PATH_JOB_ID: &str = "job-15";

/// Points a planned course adds to the skills score.
pub const COURSE_BONUS: u8 = 15;

// ── Upskill ───────────────────────────────────────────────────────────

/// Return a copy of `catalog` with one task upskilled. Unknown ids leave
/// the copy equal to the input.
pub fn upskill(catalog: &Catalog, job_id: &str, task_name: &str) -> Catalog {
    let mut next = catalog.clone();
    upskill_in_place(&mut next, job_id, task_name);
    next
}

/// Apply one upskill step and refresh the job's labels. Returns false when
/// the job or task does not exist.
pub fn upskill_in_place(catalog: &mut Catalog, job_id: &str, task_name: &str) -> bool {
    let Some(job) = catalog.find_mut(job_id) else {
        return false;
    };
    let Some(task) = job.task_mut(task_name) else {
        return false;
    };
    task.human_criticality_score = (task.human_criticality_score + UPSKILL_HUMAN_GAIN).min(1.0);
    task.ai_capability_score = (task.ai_capability_score - UPSKILL_AI_REDUCTION).max(0.0);
    job.refresh_labels();
    true
}

/// Upskill a task of the live catalog and log it.
pub fn upskill_task(state: &mut LandscapeState, job_id: &str, task_name: &str) -> bool {
    let next = upskill(&state.catalog, job_id, task_name);
    if next == state.catalog {
        // Either unknown, or already saturated on both scores.
        if state.catalog.find(job_id).and_then(|j| j.task(task_name)).is_none() {
            return false;
        }
        state.add_log(&format!("{task_name} is already fully upskilled"));
        return true;
    }
    state.catalog = next;
    state.add_log(&format!("Upskilled {task_name}"));
    true
}

/// Upskill the `index`-th task of the selected job.
pub fn upskill_selected(state: &mut LandscapeState, index: usize) -> bool {
    let Some((job_id, task_name)) = state
        .selected_job()
        .and_then(|job| job.tasks.get(index).map(|t| (job.id.clone(), t.name.clone())))
    else {
        return false;
    };
    upskill_task(state, &job_id, &task_name)
}

// ── Playback ──────────────────────────────────────────────────────────

pub fn tick(state: &mut LandscapeState, delta_ticks: u32) {
    if !state.playing || delta_ticks == 0 {
        return;
    }
    state.set_year(state.year + PLAYBACK_STEP * delta_ticks as f64);
    if state.year >= END_YEAR {
        state.playing = false;
        state.add_log("Reached 2030");
    }
}

/// Start or pause playback. Starting from the end rewinds to the base year.
pub fn toggle_play(state: &mut LandscapeState) {
    if state.playing {
        state.playing = false;
        return;
    }
    if state.year >= END_YEAR {
        state.set_year(BASE_YEAR);
    }
    state.playing = true;
}

// ── Navigation ────────────────────────────────────────────────────────

pub fn move_cursor(state: &mut LandscapeState, delta: isize) {
    let len = state.catalog.len();
    if len == 0 {
        state.cursor = 0;
        return;
    }
    state.cursor = state.cursor.saturating_add_signed(delta).min(len - 1);
}

/// Open the detail screen for the job at `index`.
pub fn open_job(state: &mut LandscapeState, index: usize) -> bool {
    let Some(id) = state.catalog.get(index).map(|j| j.id.clone()) else {
        return false;
    };
    state.cursor = index;
    state.select_job(Some(&id));
    state.screen = Screen::Detail;
    true
}

/// Leave the detail screen. Returns false on the landscape screen.
pub fn back(state: &mut LandscapeState) -> bool {
    match state.screen {
        Screen::Landscape => false,
        Screen::Detail => {
            state.select_job(None);
            state.screen = Screen::Landscape;
            true
        }
    }
}

// ── Search ────────────────────────────────────────────────────────────

/// Catalog indices whose title contains `query`, ignoring case.
pub fn search_jobs(catalog: &Catalog, query: &str) -> Vec<usize> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    catalog
        .jobs()
        .iter()
        .enumerate()
        .filter(|(_, job)| job.title.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

pub fn open_overlay(state: &mut LandscapeState, overlay: Overlay) {
    state.overlay = overlay;
    state.query.clear();
    state.search_cursor = 0;
    state.skills_input.clear();
    state.skill_report = None;
}

pub fn close_overlay(state: &mut LandscapeState) -> bool {
    if state.overlay == Overlay::None {
        return false;
    }
    open_overlay(state, Overlay::None);
    true
}

/// Append a typed character to the open overlay's text.
pub fn type_char(state: &mut LandscapeState, c: char) -> bool {
    if c.is_control() {
        return false;
    }
    let Some(buf) = state.input_buffer() else {
        return false;
    };
    buf.push(c);
    state.search_cursor = 0;
    true
}

pub fn erase_char(state: &mut LandscapeState) -> bool {
    let erased = state.input_buffer().and_then(String::pop).is_some();
    if erased {
        state.search_cursor = 0;
    }
    erased
}

pub fn move_search_cursor(state: &mut LandscapeState, delta: isize) {
    let len = search_jobs(&state.catalog, &state.query).len();
    state.search_cursor = state
        .search_cursor
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1));
}

/// Close the search and open the highlighted result.
pub fn open_search_result(state: &mut LandscapeState) -> bool {
    let results = search_jobs(&state.catalog, &state.query);
    let Some(&index) = results.get(state.search_cursor) else {
        return false;
    };
    close_overlay(state);
    open_job(state, index)
}

// ── Skills check ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Course {
    pub code: &'static str,
    pub name: &'static str,
}

pub const COURSE_STRATEGY: Course = Course { code: "BUS-J375", name: "Strategic Management" };
pub const COURSE_TECH: Course = Course { code: "BUS-K201", name: "The Computer in Business" };
pub const COURSE_LEADERSHIP: Course = Course {
    code: "BUS-Z302",
    name: "Managing Behavior in Organizations",
};
pub const COURSE_ADVANCED: Course = Course {
    code: "BUS-S400",
    name: "Special Topics in Applied Biz Tech",
};

#[derive(Clone, Debug, PartialEq)]
pub struct SkillReport {
    /// Automation resilience score, 0..=100.
    pub score: u8,
    pub feedback: String,
    pub course: Course,
    pub course_added: bool,
}

impl SkillReport {
    /// The report after planning the recommended course. Applies once.
    pub fn with_course(&self) -> Self {
        if self.course_added {
            return self.clone();
        }
        Self {
            score: self.score.saturating_add(COURSE_BONUS).min(100),
            feedback: format!("{} (+{COURSE_BONUS} pts for planned coursework)", self.feedback),
            course: self.course,
            course_added: true,
        }
    }
}

/// Score a comma-separated skills list by the themes it mentions.
pub fn analyze_skills(input: &str) -> SkillReport {
    let lower = input.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    let strategy = mentions(&["strategy", "planning"]);
    let tech = mentions(&["python", "sql", "data"]);
    let leadership = mentions(&["leadership", "management"]);

    let (score, feedback) = if input.split(',').count() < 2 {
        (45, "High exposure to automation. Skills are mostly routine or transactional.")
    } else if strategy && leadership {
        (88, "Strong resilience. Strategy and leadership buffer against automation.")
    } else if tech {
        (72, "Good technical base, but needs more strategic differentiation.")
    } else {
        (60, "Moderate risk. Consider adding high-value human-centric skills.")
    };

    let course = if !strategy {
        COURSE_STRATEGY
    } else if !tech {
        COURSE_TECH
    } else if !leadership {
        COURSE_LEADERSHIP
    } else {
        COURSE_ADVANCED
    };

    SkillReport {
        score,
        feedback: feedback.to_string(),
        course,
        course_added: false,
    }
}

/// Advance the skills check one step: analyze, then plan the course, then
/// open the career path job.
pub fn confirm_skills(state: &mut LandscapeState) -> bool {
    match &state.skill_report {
        None => {
            if state.skills_input.trim().is_empty() {
                return false;
            }
            let report = analyze_skills(&state.skills_input);
            state.add_log(&format!("Skills check: {}", report.score));
            state.skill_report = Some(report);
            true
        }
        Some(report) if !report.course_added => {
            let next = report.with_course();
            state.add_log(&format!("Planned {} {}", next.course.code, next.course.name));
            state.skill_report = Some(next);
            true
        }
        Some(_) => view_career_path(state),
    }
}

/// Close the overlay and open the deep-linked career path job.
pub fn view_career_path(state: &mut LandscapeState) -> bool {
    let Some(index) = state.catalog.position(CAREER_PATH_JOB_ID) else {
        return false;
    };
    close_overlay(state);
    open_job(state, index)
}

// ── Formatting ────────────────────────────────────────────────────────

/// Headcount with thousands separators, e.g. `1,234,567`.
pub fn format_headcount(count: f64) -> String {
    let rounded = if count.is_finite() { count.round().max(0.0) as u64 } else { 0 };
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_growth(growth: f64) -> String {
    if growth >= 0.0 {
        format!("+{growth:.1}%")
    } else {
        format!("{growth:.1}%")
    }
}

pub fn format_year(year: f64) -> String {
    format!("{year:.1}")
}
