//! Job catalog schema: jobs, their tasks, and the derived labels.

use serde::Deserialize;

use super::risk::{resilience_label, volatility_label, weighted_scores};

/// Weight for tasks without an importance rating (middle of the 1-5 scale).
pub const DEFAULT_IMPORTANCE: f64 = 3.0;

/// Score used when a rating is missing or unusable.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Clamp a score into [0, 1]. NaN becomes the neutral score.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_SCORE
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A single task performed within a job.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub name: String,
    /// How well AI can perform this task today (0-1).
    pub ai_capability_score: f64,
    /// How much the task needs human judgment, trust or empathy (0-1).
    pub human_criticality_score: f64,
    #[serde(default)]
    pub importance: Option<f64>,
}

impl Task {
    pub fn new(name: impl Into<String>, ai: f64, human: f64) -> Self {
        Self {
            name: name.into(),
            ai_capability_score: clamp_unit(ai),
            human_criticality_score: clamp_unit(human),
            importance: None,
        }
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Aggregation weight. Missing, non-positive and non-finite ratings fall
    /// back to [`DEFAULT_IMPORTANCE`].
    pub fn weight(&self) -> f64 {
        match self.importance {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => DEFAULT_IMPORTANCE,
        }
    }

    pub fn clamp_scores(&mut self) {
        self.ai_capability_score = clamp_unit(self.ai_capability_score);
        self.human_criticality_score = clamp_unit(self.human_criticality_score);
    }
}

/// How exposed a job's pay is to automation pressure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolatilityLabel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl VolatilityLabel {
    pub fn name(&self) -> &'static str {
        match self {
            VolatilityLabel::Low => "Low",
            VolatilityLabel::Medium => "Medium",
            VolatilityLabel::High => "High",
            VolatilityLabel::VeryHigh => "Very High",
        }
    }
}

/// How strongly a job depends on human involvement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResilienceLabel {
    Low,
    High,
    VeryHigh,
    Critical,
}

impl ResilienceLabel {
    pub fn name(&self) -> &'static str {
        match self {
            ResilienceLabel::Low => "Low",
            ResilienceLabel::High => "High",
            ResilienceLabel::VeryHigh => "Very High",
            ResilienceLabel::Critical => "Critical",
        }
    }
}

/// Where a job's numbers came from, kept for display confidence.
#[derive(Clone, Debug, PartialEq)]
pub struct Provenance {
    /// 1.0 with task ratings, 0.7 with employment data only, 0.1 otherwise.
    pub confidence_score: f64,
    pub data_sources: Vec<String>,
    /// The title was resolved through the alias table.
    pub is_alias: bool,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            confidence_score: 1.0,
            data_sources: Vec::new(),
            is_alias: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub cluster: String,
    pub employment: u64,
    /// Economic friction of automating this job (higher = costlier).
    pub automation_cost_index: f64,
    /// Anchor growth rate in percent.
    pub projected_growth: f64,
    pub salary_volatility: VolatilityLabel,
    pub human_resilience: ResilienceLabel,
    pub provenance: Provenance,
    pub tasks: Vec<Task>,
}

impl Job {
    /// Build a job with labels derived from its tasks.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        cluster: impl Into<String>,
        employment: u64,
        tasks: Vec<Task>,
    ) -> Self {
        let mut job = Self {
            id: id.into(),
            title: title.into(),
            cluster: cluster.into(),
            employment,
            automation_cost_index: NEUTRAL_SCORE,
            projected_growth: 0.0,
            salary_volatility: VolatilityLabel::Medium,
            human_resilience: ResilienceLabel::High,
            provenance: Provenance::default(),
            tasks,
        };
        job.refresh_labels();
        job
    }

    /// Recompute the labels from the current task scores.
    pub fn refresh_labels(&mut self) {
        let (ai, human) = weighted_scores(&self.tasks);
        self.salary_volatility = volatility_label(ai);
        self.human_resilience = resilience_label(human);
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub(crate) fn task_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.name == name)
    }
}

/// Ordered job collection. A job's index is its position on the terrain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    jobs: Vec<Job>,
}

impl Catalog {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|j| j.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }
}
