//! Catalog construction: merges the job taxonomy with employment and task
//! lookups, then reports on data confidence.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use super::model::{clamp_unit, Catalog, Job, Provenance, Task, DEFAULT_IMPORTANCE, NEUTRAL_SCORE};
use super::risk::{resilience_label, volatility_label, weighted_scores};

/// Source tables compiled into the binary.
const EMBEDDED_SOURCES: &str = include_str!("../../data/sources.json");

const DEFAULT_CLUSTER: &str = "Business";
const FALLBACK_EMPLOYMENT: u64 = 50_000;
const FALLBACK_GROWTH: f64 = 2.0;

/// Growth points per unit of (human - ai) weighted score difference.
const VOLATILITY_FACTOR: f64 = 0.5;
const GROWTH_IMPACT_SCALE: f64 = 10.0;

const CONFIDENCE_TASKS: f64 = 1.0;
const CONFIDENCE_EMPLOYMENT_ONLY: f64 = 0.7;
const CONFIDENCE_NONE: f64 = 0.1;

const SOURCE_EMPLOYMENT: &str = "BLS-2024";
const SOURCE_EMPLOYMENT_FALLBACK: &str = "Employment-Fallback";
const SOURCE_TASKS: &str = "ONET-Weighted";
const SOURCE_TASKS_FALLBACK: &str = "Legacy-Fallback";

// Report thresholds.
const HIGH_CONFIDENCE: f64 = 0.7;
const GROWTH_OUTLIER_HIGH: f64 = 40.0;
const GROWTH_OUTLIER_LOW: f64 = -20.0;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog sources: {0}")]
    Json(#[from] serde_json::Error),
    #[error("taxonomy row {index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("duplicate job id {0}")]
    DuplicateId(String),
    #[error("{title}: task {task} is listed twice")]
    DuplicateTask { title: String, task: String },
    #[error("{title}: {field} is not a finite number")]
    NonFinite { title: String, field: &'static str },
}

#[derive(Clone, Debug, Deserialize)]
pub struct TaxonomyRow {
    pub title: String,
    #[serde(default)]
    pub cluster: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentRecord {
    pub employment: u64,
    /// Anchor growth rate in percent.
    pub projected_growth: f64,
}

/// The three raw datasets plus the tables that stitch them together.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    pub taxonomy: Vec<TaxonomyRow>,
    #[serde(default)]
    pub employment: BTreeMap<String, EmploymentRecord>,
    #[serde(default)]
    pub tasks: BTreeMap<String, Vec<Task>>,
    /// Raw title → canonical title.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Title → id that must survive regeneration (deep links).
    #[serde(default)]
    pub pinned_ids: BTreeMap<String, String>,
}

/// A lookup result and whether it came through the alias table.
struct Resolved<T> {
    value: T,
    via_alias: bool,
}

impl Sources {
    /// Look `title` up directly, then through its alias.
    fn resolve<'a, T>(
        &'a self,
        table: &'a BTreeMap<String, T>,
        title: &str,
    ) -> Option<Resolved<&'a T>> {
        if let Some(value) = table.get(title) {
            return Some(Resolved {
                value,
                via_alias: false,
            });
        }
        let canonical = self.aliases.get(title)?;
        table.get(canonical).map(|value| Resolved {
            value,
            via_alias: true,
        })
    }
}

/// Build the catalog from the sources compiled into the binary.
pub fn load_embedded() -> Result<Catalog, CatalogError> {
    load_str(EMBEDDED_SOURCES)
}

pub fn load_str(raw: &str) -> Result<Catalog, CatalogError> {
    let sources: Sources = serde_json::from_str(raw)?;
    build_catalog(&sources)
}

/// Merge the sources into a catalog. Missing lookups fall back to neutral
/// values and lower the job's confidence score instead of failing.
pub fn build_catalog(sources: &Sources) -> Result<Catalog, CatalogError> {
    let mut jobs = Vec::with_capacity(sources.taxonomy.len());

    for (index, row) in sources.taxonomy.iter().enumerate() {
        let title = row.title.trim();
        if title.is_empty() {
            return Err(CatalogError::EmptyTitle { index });
        }
        jobs.push(build_job(sources, index, title, row.cluster.as_deref())?);
    }

    pin_ids(&mut jobs, &sources.pinned_ids);

    let mut seen = HashSet::new();
    for job in &jobs {
        if !seen.insert(job.id.as_str()) {
            return Err(CatalogError::DuplicateId(job.id.clone()));
        }
    }

    Ok(Catalog::new(jobs))
}

fn build_job(
    sources: &Sources,
    index: usize,
    title: &str,
    cluster: Option<&str>,
) -> Result<Job, CatalogError> {
    let employment = sources.resolve(&sources.employment, title);
    let rated = sources.resolve(&sources.tasks, title);

    let (headcount, anchor_growth) = match &employment {
        Some(r) => (r.value.employment, r.value.projected_growth),
        None => (FALLBACK_EMPLOYMENT, FALLBACK_GROWTH),
    };
    if !anchor_growth.is_finite() {
        return Err(CatalogError::NonFinite {
            title: title.to_string(),
            field: "projected_growth",
        });
    }

    let mut tasks = match &rated {
        Some(r) => r.value.clone(),
        None => fallback_tasks(),
    };
    let mut names = HashSet::new();
    for task in &mut tasks {
        if !names.insert(task.name.clone()) {
            return Err(CatalogError::DuplicateTask {
                title: title.to_string(),
                task: task.name.clone(),
            });
        }
        task.clamp_scores();
    }

    let (w_ai, w_human) = weighted_scores(&tasks);
    let growth = anchor_growth + (w_human - w_ai) * VOLATILITY_FACTOR * GROWTH_IMPACT_SCALE;
    let cost_index = (w_human * 0.8 + 0.1).clamp(0.1, 0.9);

    let confidence_score = match (&rated, &employment) {
        (Some(_), _) => CONFIDENCE_TASKS,
        (None, Some(_)) => CONFIDENCE_EMPLOYMENT_ONLY,
        (None, None) => CONFIDENCE_NONE,
    };
    let employment_source = if employment.is_some() {
        SOURCE_EMPLOYMENT
    } else {
        SOURCE_EMPLOYMENT_FALLBACK
    };
    let task_source = if rated.is_some() {
        SOURCE_TASKS
    } else {
        SOURCE_TASKS_FALLBACK
    };
    let data_sources = vec![employment_source.to_string(), task_source.to_string()];
    let is_alias = employment.as_ref().is_some_and(|r| r.via_alias)
        || rated.as_ref().is_some_and(|r| r.via_alias);

    Ok(Job {
        id: format!("job-{}", index + 1),
        title: title.to_string(),
        cluster: cluster
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CLUSTER)
            .to_string(),
        employment: headcount,
        automation_cost_index: round_to(clamp_unit(cost_index), 2),
        projected_growth: round_to(growth, 1),
        salary_volatility: volatility_label(w_ai),
        human_resilience: resilience_label(w_human),
        provenance: Provenance {
            confidence_score,
            data_sources,
            is_alias,
        },
        tasks,
    })
}

fn fallback_tasks() -> Vec<Task> {
    vec![
        Task::new("Core Function A", NEUTRAL_SCORE, NEUTRAL_SCORE).with_importance(DEFAULT_IMPORTANCE),
        Task::new("Core Function B", NEUTRAL_SCORE, NEUTRAL_SCORE).with_importance(DEFAULT_IMPORTANCE),
    ]
}

/// Give pinned titles their fixed ids. A job already holding a pinned id
/// takes over the pinned job's generated id, so ids stay unique.
fn pin_ids(jobs: &mut [Job], pinned: &BTreeMap<String, String>) {
    for (title, id) in pinned {
        let Some(target) = jobs.iter().position(|j| j.title == *title) else {
            continue;
        };
        if jobs[target].id == *id {
            continue;
        }
        let displaced_id = std::mem::replace(&mut jobs[target].id, id.clone());
        if let Some(holder) = jobs
            .iter()
            .enumerate()
            .position(|(i, j)| i != target && j.id == *id)
        {
            jobs[holder].id = displaced_id;
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ── Report ────────────────────────────────────────────────────────────

/// Data-quality summary of a catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub high_confidence: usize,
    pub low_confidence: usize,
    pub aliased: usize,
}

impl CatalogReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_catalog(catalog: &Catalog) -> CatalogReport {
    let mut report = CatalogReport::default();
    for job in catalog.jobs() {
        if !job.projected_growth.is_finite() {
            report
                .errors
                .push(format!("{} has invalid growth", job.title));
        } else if job.projected_growth > GROWTH_OUTLIER_HIGH
            || job.projected_growth < GROWTH_OUTLIER_LOW
        {
            report.warnings.push(format!(
                "{} growth is an outlier ({:.1}%)",
                job.title, job.projected_growth
            ));
        }

        if job.provenance.confidence_score >= HIGH_CONFIDENCE {
            report.high_confidence += 1;
        } else {
            report.low_confidence += 1;
        }
        if job.provenance.is_alias {
            report.aliased += 1;
        }
    }
    report
}
