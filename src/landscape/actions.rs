//! Semantic action IDs for landscape click targets.

// ── Header ───────────────────────────────────────────────────
pub const TOGGLE_PLAY: u16 = 1;
pub const BACK: u16 = 2;
pub const YEAR_BACK: u16 = 3;
pub const YEAR_FORWARD: u16 = 4;
pub const OPEN_SEARCH: u16 = 5;
pub const OPEN_SKILLS: u16 = 6;

// ── Overlays ─────────────────────────────────────────────────
pub const OVERLAY_CONFIRM: u16 = 7;
pub const OVERLAY_CLOSE: u16 = 8;

// ── Timeline ─────────────────────────────────────────────────
pub const TIMELINE_BASE: u16 = 10; // +bucket 0..TIMELINE_BUCKETS
pub const TIMELINE_BUCKETS: u16 = 11; // half-year marks 2025.0..=2030.0

// ── Detail screen ────────────────────────────────────────────
pub const TASK_ROW_BASE: u16 = 40; // +task index 0..59

// ── Job list and terrain markers ─────────────────────────────
pub const JOB_ROW_BASE: u16 = 100; // +catalog index

/// Action for the job at catalog `index`, if it fits in the ID space.
pub fn job_action(index: usize) -> Option<u16> {
    u16::try_from(index).ok().and_then(|i| JOB_ROW_BASE.checked_add(i))
}

/// Action for the task at `index` on the detail screen.
pub fn task_action(index: usize) -> Option<u16> {
    u16::try_from(index)
        .ok()
        .and_then(|i| TASK_ROW_BASE.checked_add(i))
        .filter(|&id| id < JOB_ROW_BASE)
}
