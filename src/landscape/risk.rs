//! Risk model: year-projected job status and task categories (pure, no IO).
//!
//! Every function here is deterministic and cheap enough to call once per
//! frame for every job.

use super::model::{Job, ResilienceLabel, Task, VolatilityLabel, NEUTRAL_SCORE};

/// First year of the timeline. Projections are measured from here.
pub const BASE_YEAR: f64 = 2025.0;

/// Last year of the timeline.
pub const END_YEAR: f64 = 2030.0;

/// Yearly growth of AI capability.
pub const AI_GROWTH_PER_YEAR: f64 = 0.02;

/// Yearly rise of effective human criticality as workers adapt.
pub const HUMAN_ADAPTATION_PER_YEAR: f64 = 0.05;

// Job-level thresholds.
const INSULATION_THRESHOLD: f64 = 0.65;
const HIGH_RISK_THRESHOLD: f64 = 0.7;

// Task-level thresholds, separate from the job-level ones.
const TASK_AI_DOMINANCE: f64 = 0.6;
const TASK_HUMAN_CEILING: f64 = 0.5;
const TASK_HUMAN_CRITICAL: f64 = 0.6;

// Impact matrix colouring.
const MATRIX_HUMAN_SAFE: f64 = 0.6;
const MATRIX_AI_DANGER: f64 = 0.7;

// Employment drift per year.
const HIGH_RISK_EMPLOYMENT_RATE: f64 = 0.95;
const DEFAULT_EMPLOYMENT_RATE: f64 = 1.02;

/// Years since [`BASE_YEAR`]. Not clamped: years outside the timeline
/// extrapolate linearly. `year` must be finite; the capped projections
/// below would otherwise read a NaN year as fully human-critical.
pub fn years_passed(year: f64) -> f64 {
    debug_assert!(year.is_finite(), "projection needs a finite year, got {year}");
    year - BASE_YEAR
}

/// AI capability projected to `year`, capped at 1.
pub fn projected_ai(score: f64, year: f64) -> f64 {
    (score + years_passed(year) * AI_GROWTH_PER_YEAR).min(1.0)
}

/// Human criticality after adaptation up to `year`, capped at 1.
pub fn effective_human(score: f64, year: f64) -> f64 {
    (score + years_passed(year) * HUMAN_ADAPTATION_PER_YEAR).min(1.0)
}

// ── Job status ────────────────────────────────────────────────────────

/// Discrete risk classification of a job in a given year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Insulated,
    Transitional,
    HighRisk,
}

impl RiskLevel {
    pub fn score(&self) -> f64 {
        match self {
            RiskLevel::Insulated => 0.2,
            RiskLevel::Transitional => 0.5,
            RiskLevel::HighRisk => 0.9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Insulated => "Insulated",
            RiskLevel::Transitional => "Transitional",
            RiskLevel::HighRisk => "High Risk",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            RiskLevel::Insulated => "#22c55e",
            RiskLevel::Transitional => "#fbbf24",
            RiskLevel::HighRisk => "#ef4444",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            RiskLevel::Insulated => (0x22, 0xc5, 0x5e),
            RiskLevel::Transitional => (0xfb, 0xbf, 0x24),
            RiskLevel::HighRisk => (0xef, 0x44, 0x44),
        }
    }

    /// Colour as unit floats, the form the terrain blends.
    pub fn unit_rgb(&self) -> [f64; 3] {
        let (r, g, b) = self.rgb();
        [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JobStatus {
    /// Always one of 0.2, 0.5 or 0.9.
    pub risk_score: f64,
    pub level: RiskLevel,
}

impl JobStatus {
    fn from_level(level: RiskLevel) -> Self {
        Self {
            risk_score: level.score(),
            level,
        }
    }

    pub fn color(&self) -> &'static str {
        self.level.color_hex()
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_score > HIGH_RISK_THRESHOLD
    }
}

/// Unweighted mean AI and human scores. An empty task list is neutral.
pub fn average_scores(tasks: &[Task]) -> (f64, f64) {
    if tasks.is_empty() {
        return (NEUTRAL_SCORE, NEUTRAL_SCORE);
    }
    let n = tasks.len() as f64;
    let ai: f64 = tasks.iter().map(|t| t.ai_capability_score).sum();
    let human: f64 = tasks.iter().map(|t| t.human_criticality_score).sum();
    (ai / n, human / n)
}

/// Classify a job for `year`. Insulation is checked before high risk, so
/// human adaptation wins when both thresholds are crossed.
pub fn evaluate_job_status(job: &Job, year: f64) -> JobStatus {
    let (avg_ai, avg_human) = average_scores(&job.tasks);
    let projected = projected_ai(avg_ai, year);
    let human = effective_human(avg_human, year);

    let level = if human > INSULATION_THRESHOLD {
        RiskLevel::Insulated
    } else if projected > HIGH_RISK_THRESHOLD {
        RiskLevel::HighRisk
    } else {
        RiskLevel::Transitional
    };
    JobStatus::from_level(level)
}

/// True when the job was high risk at the start of the timeline and no
/// longer is at `year` in its current state.
pub fn was_rescued(baseline: &Job, current: &Job, year: f64) -> bool {
    evaluate_job_status(baseline, BASE_YEAR).is_high_risk()
        && !evaluate_job_status(current, year).is_high_risk()
}

/// Headcount projected to `year`: shrinking 5%/year while high risk,
/// growing 2%/year otherwise.
pub fn projected_employment(job: &Job, year: f64) -> f64 {
    let rate = if evaluate_job_status(job, year).is_high_risk() {
        HIGH_RISK_EMPLOYMENT_RATE
    } else {
        DEFAULT_EMPLOYMENT_RATE
    };
    job.employment as f64 * rate.powf(years_passed(year))
}

// ── Task categories ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskCategory {
    Automatable,
    Augmentable,
    HumanCritical,
}

pub const ALL_CATEGORIES: [TaskCategory; 3] = [
    TaskCategory::Automatable,
    TaskCategory::Augmentable,
    TaskCategory::HumanCritical,
];

impl TaskCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TaskCategory::Automatable => "Automatable",
            TaskCategory::Augmentable => "Augmentable",
            TaskCategory::HumanCritical => "Human-Critical",
        }
    }
}

/// Categorise a task for `year`. A task that crosses neither threshold
/// stays Augmentable.
pub fn categorize_task(task: &Task, year: f64) -> TaskCategory {
    let projected = projected_ai(task.ai_capability_score, year);
    let human = effective_human(task.human_criticality_score, year);

    if projected > TASK_AI_DOMINANCE && human < TASK_HUMAN_CEILING {
        TaskCategory::Automatable
    } else if human > TASK_HUMAN_CRITICAL {
        TaskCategory::HumanCritical
    } else {
        TaskCategory::Augmentable
    }
}

/// Number of tasks per category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskComposition {
    pub automatable: usize,
    pub augmentable: usize,
    pub human_critical: usize,
}

impl TaskComposition {
    pub fn total(&self) -> usize {
        self.automatable + self.augmentable + self.human_critical
    }

    pub fn count(&self, category: TaskCategory) -> usize {
        match category {
            TaskCategory::Automatable => self.automatable,
            TaskCategory::Augmentable => self.augmentable,
            TaskCategory::HumanCritical => self.human_critical,
        }
    }
}

pub fn task_composition(tasks: &[Task], year: f64) -> TaskComposition {
    let mut composition = TaskComposition::default();
    for task in tasks {
        match categorize_task(task, year) {
            TaskCategory::Automatable => composition.automatable += 1,
            TaskCategory::Augmentable => composition.augmentable += 1,
            TaskCategory::HumanCritical => composition.human_critical += 1,
        }
    }
    composition
}

/// A task's place on the AI-capability / human-criticality matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactPoint {
    /// Projected AI capability (x axis).
    pub ai: f64,
    /// Raw human criticality (y axis).
    pub human: f64,
    pub level: RiskLevel,
}

pub fn impact_point(task: &Task, year: f64) -> ImpactPoint {
    let ai = projected_ai(task.ai_capability_score, year);
    let human = task.human_criticality_score;
    let level = if human > MATRIX_HUMAN_SAFE {
        RiskLevel::Insulated
    } else if ai > MATRIX_AI_DANGER {
        RiskLevel::HighRisk
    } else {
        RiskLevel::Transitional
    };
    ImpactPoint { ai, human, level }
}

// ── Weighted aggregates & labels ──────────────────────────────────────

/// Importance-weighted mean AI and human scores. Falls back to neutral when
/// there is no weight at all.
pub fn weighted_scores(tasks: &[Task]) -> (f64, f64) {
    let mut total = 0.0;
    let mut ai = 0.0;
    let mut human = 0.0;
    for task in tasks {
        let w = task.weight();
        total += w;
        ai += task.ai_capability_score * w;
        human += task.human_criticality_score * w;
    }
    if total > 0.0 {
        (ai / total, human / total)
    } else {
        (NEUTRAL_SCORE, NEUTRAL_SCORE)
    }
}

pub fn volatility_label(weighted_ai: f64) -> VolatilityLabel {
    if weighted_ai > 0.7 {
        VolatilityLabel::VeryHigh
    } else if weighted_ai > 0.5 {
        VolatilityLabel::High
    } else if weighted_ai < 0.3 {
        VolatilityLabel::Low
    } else {
        VolatilityLabel::Medium
    }
}

pub fn resilience_label(weighted_human: f64) -> ResilienceLabel {
    if weighted_human > 0.8 {
        ResilienceLabel::Critical
    } else if weighted_human > 0.6 {
        ResilienceLabel::VeryHigh
    } else if weighted_human > 0.4 {
        ResilienceLabel::High
    } else {
        ResilienceLabel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marketing_job() -> Job {
        Job::new(
            "job-15",
            "Marketing Associate",
            "Marketing",
            400_000,
            vec![
                Task::new("Campaign Logic", 0.8, 0.3),
                Task::new("Creative Strategy", 0.3, 0.9),
            ],
        )
    }

    #[test]
    fn marketing_job_is_transitional_in_2025() {
        let status = evaluate_job_status(&marketing_job(), 2025.0);
        assert_eq!(status.level, RiskLevel::Transitional);
        assert_eq!(status.risk_score, 0.5);
        assert_eq!(status.color(), "#fbbf24");
    }

    #[test]
    fn marketing_job_is_insulated_in_2030() {
        let status = evaluate_job_status(&marketing_job(), 2030.0);
        assert_eq!(status.level, RiskLevel::Insulated);
        assert_eq!(status.risk_score, 0.2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "finite year")]
    fn nan_year_is_rejected() {
        evaluate_job_status(&marketing_job(), f64::NAN);
    }

    #[test]
    fn ai_heavy_job_is_high_risk() {
        let job = Job::new(
            "job-1",
            "Digital Mktg Specialist",
            "Marketing",
            600_000,
            vec![Task::new("SEO", 0.9, 0.1), Task::new("Content", 0.85, 0.3)],
        );
        let status = evaluate_job_status(&job, 2025.0);
        assert_eq!(status.level, RiskLevel::HighRisk);
        assert_eq!(status.risk_score, 0.9);
        assert!(status.is_high_risk());
    }

    #[test]
    fn insulation_wins_over_high_risk() {
        // projected_ai 0.98 > 0.7 and effective_human 0.7 > 0.65
        let job = Job::new("j", "T", "C", 1, vec![Task::new("t", 0.9, 0.3)]);
        let status = evaluate_job_status(&job, 2033.0);
        assert_eq!(status.level, RiskLevel::Insulated);
    }

    #[test]
    fn empty_task_list_is_neutral() {
        let job = Job::new("j", "T", "C", 1, vec![]);
        assert_eq!(average_scores(&job.tasks), (0.5, 0.5));
        assert_eq!(evaluate_job_status(&job, 2025.0).level, RiskLevel::Transitional);
        // 0.5 + 0.05 * 4 = 0.7 > 0.65
        assert_eq!(evaluate_job_status(&job, 2029.0).level, RiskLevel::Insulated);
    }

    #[test]
    fn years_before_base_extrapolate() {
        let job = marketing_job();
        // avg_human 0.6 - 0.25 = 0.35, avg_ai 0.55 - 0.1 = 0.45
        assert_eq!(evaluate_job_status(&job, 2020.0).level, RiskLevel::Transitional);
        assert!((projected_ai(0.55, 2020.0) - 0.45).abs() < 1e-9);
    }

    #[test]
    fn automatable_task_stays_automatable() {
        let task = Task::new("Lead Gen", 0.9, 0.1);
        assert_eq!(categorize_task(&task, 2025.0), TaskCategory::Automatable);
        assert_eq!(categorize_task(&task, 2030.0), TaskCategory::Automatable);
    }

    #[test]
    fn human_task_is_human_critical() {
        let task = Task::new("Closing", 0.2, 0.9);
        assert_eq!(categorize_task(&task, 2025.0), TaskCategory::HumanCritical);
    }

    #[test]
    fn middling_task_is_augmentable() {
        let task = Task::new("Requirements", 0.6, 0.55);
        assert_eq!(categorize_task(&task, 2025.0), TaskCategory::Augmentable);
        // effective_human 0.55 + 0.05 * 2 = 0.65 > 0.6
        assert_eq!(categorize_task(&task, 2027.0), TaskCategory::HumanCritical);
    }

    #[test]
    fn composition_counts_every_task() {
        let tasks = vec![
            Task::new("a", 0.9, 0.1),
            Task::new("b", 0.2, 0.9),
            Task::new("c", 0.5, 0.5),
        ];
        let c = task_composition(&tasks, 2025.0);
        assert_eq!(c.automatable, 1);
        assert_eq!(c.human_critical, 1);
        assert_eq!(c.augmentable, 1);
        assert_eq!(c.total(), 3);
        assert_eq!(c.count(TaskCategory::Augmentable), 1);
    }

    #[test]
    fn weighted_scores_use_importance() {
        let tasks = vec![
            Task::new("a", 0.8, 0.3).with_importance(4.0),
            Task::new("b", 0.3, 0.9).with_importance(5.0),
        ];
        let (ai, human) = weighted_scores(&tasks);
        assert!((ai - 4.7 / 9.0).abs() < 1e-9);
        assert!((human - 5.7 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn weighted_scores_empty_is_neutral() {
        assert_eq!(weighted_scores(&[]), (0.5, 0.5));
    }

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(volatility_label(0.75), VolatilityLabel::VeryHigh);
        assert_eq!(volatility_label(0.6), VolatilityLabel::High);
        assert_eq!(volatility_label(0.5), VolatilityLabel::Medium);
        assert_eq!(volatility_label(0.2), VolatilityLabel::Low);
        assert_eq!(resilience_label(0.9), ResilienceLabel::Critical);
        assert_eq!(resilience_label(0.7), ResilienceLabel::VeryHigh);
        assert_eq!(resilience_label(0.5), ResilienceLabel::High);
        assert_eq!(resilience_label(0.4), ResilienceLabel::Low);
    }

    #[test]
    fn impact_point_projects_ai_only() {
        let p = impact_point(&Task::new("t", 0.5, 0.3), 2030.0);
        assert!((p.ai - 0.6).abs() < 1e-9);
        assert_eq!(p.human, 0.3);
        assert_eq!(p.level, RiskLevel::Transitional);
        let p = impact_point(&Task::new("t", 0.9, 0.3), 2025.0);
        assert_eq!(p.level, RiskLevel::HighRisk);
        let p = impact_point(&Task::new("t", 0.9, 0.7), 2025.0);
        assert_eq!(p.level, RiskLevel::Insulated);
    }

    #[test]
    fn employment_shrinks_while_high_risk() {
        let job = Job::new("j", "T", "C", 100_000, vec![Task::new("t", 0.9, 0.1)]);
        let e = projected_employment(&job, 2027.0);
        assert!((e - 100_000.0 * 0.95f64.powi(2)).abs() < 1e-6);
    }

    #[test]
    fn employment_grows_otherwise() {
        let job = marketing_job();
        let e = projected_employment(&job, 2026.0);
        assert!((e - 400_000.0 * 1.02).abs() < 1e-6);
        assert_eq!(projected_employment(&job, 2025.0), 400_000.0);
    }

    #[test]
    fn rescued_after_upskilling() {
        let baseline = Job::new("j", "T", "C", 1, vec![Task::new("t", 0.9, 0.1)]);
        let mut current = baseline.clone();
        assert!(!was_rescued(&baseline, &current, 2025.0));
        current.tasks[0] = Task::new("t", 0.6, 0.7);
        assert!(was_rescued(&baseline, &current, 2025.0));
    }

    #[test]
    fn risk_level_colors_match_hex() {
        for level in [RiskLevel::Insulated, RiskLevel::Transitional, RiskLevel::HighRisk] {
            let (r, g, b) = level.rgb();
            assert_eq!(format!("#{:02x}{:02x}{:02x}", r, g, b), level.color_hex());
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // ── Strategy helpers ──────────────────────────────────

    fn arb_task() -> impl Strategy<Value = Task> {
        (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(ai, human)| Task::new("t", ai, human))
    }

    fn arb_job() -> impl Strategy<Value = Job> {
        prop::collection::vec(arb_task(), 0..6).prop_map(|tasks| Job::new("j", "T", "C", 1, tasks))
    }

    proptest! {
        #[test]
        fn prop_risk_score_is_one_of_three_levels(job in arb_job(), year in 2000.0f64..2060.0) {
            let s = evaluate_job_status(&job, year).risk_score;
            prop_assert!(s == 0.2 || s == 0.5 || s == 0.9, "got {}", s);
        }

        #[test]
        fn prop_insulation_is_monotonic_in_year(
            job in arb_job(),
            year in 2025.0f64..2030.0,
            later in 0.0f64..10.0,
        ) {
            let before = evaluate_job_status(&job, year).level;
            let after = evaluate_job_status(&job, year + later).level;
            if before == RiskLevel::Insulated {
                prop_assert_eq!(after, RiskLevel::Insulated);
            }
        }

        #[test]
        fn prop_category_matches_exactly_one_rule(task in arb_task(), year in 2000.0f64..2060.0) {
            let ai = projected_ai(task.ai_capability_score, year);
            let human = effective_human(task.human_criticality_score, year);
            let automatable = ai > 0.6 && human < 0.5;
            let critical = !automatable && human > 0.6;
            let expected = if automatable {
                TaskCategory::Automatable
            } else if critical {
                TaskCategory::HumanCritical
            } else {
                TaskCategory::Augmentable
            };
            prop_assert_eq!(categorize_task(&task, year), expected);
        }

        #[test]
        fn prop_composition_total_matches_tasks(job in arb_job(), year in 2025.0f64..2030.0) {
            prop_assert_eq!(task_composition(&job.tasks, year).total(), job.tasks.len());
        }

        #[test]
        fn prop_projected_scores_never_exceed_one(score in 0.0f64..=1.0, year in 2025.0f64..2200.0) {
            prop_assert!(projected_ai(score, year) <= 1.0);
            prop_assert!(effective_human(score, year) <= 1.0);
        }

        #[test]
        fn prop_weighted_scores_stay_in_unit_range(job in arb_job()) {
            let (ai, human) = weighted_scores(&job.tasks);
            prop_assert!((0.0..=1.0).contains(&ai));
            prop_assert!((0.0..=1.0).contains(&human));
        }

        #[test]
        fn prop_projected_employment_is_finite(job in arb_job(), year in 1990.0f64..2100.0) {
            prop_assert!(projected_employment(&job, year).is_finite());
        }
    }
}
