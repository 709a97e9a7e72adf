//! Landscape rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{score_bar, segment_bar, ClickableList};

use super::actions::*;
use super::logic::{format_growth, format_headcount, format_year, search_jobs, MIN_QUERY_CHARS};
use super::model::Job;
use super::risk::{
    categorize_task, evaluate_job_status, impact_point, projected_ai, projected_employment,
    task_composition, was_rescued, RiskLevel, TaskCategory, ALL_CATEGORIES, BASE_YEAR, END_YEAR,
};
use super::state::{LandscapeState, Overlay, Screen};
use super::terrain::{
    blend_color, cell_to_world, field_height, marker_height, peaks_for, world_to_cell, TERRAIN,
};

/// Dimmest to brightest terrain glyphs.
const TERRAIN_RAMP: [char; 10] = ['·', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lowest brightness of a terrain cell.
const MIN_BRIGHTNESS: f64 = 0.3;

pub fn render(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header, timeline, tools
            Constraint::Min(8),    // Screen body
            Constraint::Length(if is_narrow { 3 } else { 5 }), // Log
        ])
        .split(area);

    let mut cs = click_state.borrow_mut();
    render_header(state, f, chunks[0], borders, &mut cs);

    match (state.overlay, state.screen, state.selected_job()) {
        (Overlay::Search, _, _) => render_search(state, f, chunks[1], borders, &mut cs),
        (Overlay::Skills, _, _) => render_skills(state, f, chunks[1], borders, &mut cs),
        (Overlay::None, Screen::Detail, Some(job)) => {
            render_detail(state, job, f, chunks[1], borders, is_narrow, &mut cs)
        }
        _ => render_landscape(state, f, chunks[1], borders, is_narrow, &mut cs),
    }

    render_log(state, f, chunks[2], borders);
}

fn risk_color(level: RiskLevel) -> Color {
    let (r, g, b) = level.rgb();
    Color::Rgb(r, g, b)
}

fn unit_color(rgb: [f64; 3], brightness: f64) -> Color {
    let channel = |v: f64| (v * brightness * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

/// Single-character label shared by a terrain marker and its list row.
fn marker_glyph(index: usize) -> char {
    match index {
        0..=8 => (b'1' + index as u8) as char,
        9..=34 => (b'A' + (index - 9) as u8) as char,
        _ => '?',
    }
}

// ── Header ─────────────────────────────────────────────────────────────

fn render_header(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Job Landscape 2025-2030 ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    let (play_icon, play_label) = if state.playing {
        ("⏸", "Pause")
    } else {
        ("▶", "Play")
    };
    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" {play_icon} [P] {play_label} "),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Year ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_year(state.year),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        TOGGLE_PLAY,
    );

    // Timeline: ◀ then one cell group per half-year bucket then ▶.
    let bucket_width = (inner.width.saturating_sub(4) / TIMELINE_BUCKETS).max(1);
    let current = ((state.year - BASE_YEAR) / 0.5).round() as u16;
    let mut spans = vec![Span::styled("◀ ", Style::default().fg(Color::Yellow))];
    for bucket in 0..TIMELINE_BUCKETS {
        let (ch, color) = if bucket == current {
            ('●', Color::Yellow)
        } else if bucket < current {
            ('━', Color::Cyan)
        } else {
            ('─', Color::DarkGray)
        };
        let cells: String = std::iter::repeat(ch).take(bucket_width as usize).collect();
        spans.push(Span::styled(cells, Style::default().fg(color)));
    }
    spans.push(Span::styled(" ▶", Style::default().fg(Color::Yellow)));
    cl.push(Line::from(spans));

    // Both tools share a row; the skills half gets its own rect below.
    let tools = Line::from(vec![
        Span::styled(SEARCH_HINT, Style::default().fg(Color::Cyan)),
        Span::styled(SKILLS_HINT, Style::default().fg(Color::Cyan)),
    ]);
    cl.push_clickable(tools, OPEN_SEARCH);

    cl.register_targets(area, cs, inner.y - area.y, 0, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);

    let timeline_row = inner.y + 1;
    if timeline_row < inner.y + inner.height {
        cs.add_click_target(Rect::new(inner.x, timeline_row, 2, 1), YEAR_BACK);
        for bucket in 0..TIMELINE_BUCKETS {
            let x = inner.x + 2 + bucket * bucket_width;
            cs.add_click_target(Rect::new(x, timeline_row, bucket_width, 1), TIMELINE_BASE + bucket);
        }
        let end_x = inner.x + 2 + TIMELINE_BUCKETS * bucket_width;
        cs.add_click_target(Rect::new(end_x, timeline_row, 2, 1), YEAR_FORWARD);
    }

    let tools_row = inner.y + 2;
    let skills_x = inner.x + SEARCH_HINT.len() as u16;
    if tools_row < inner.y + inner.height && skills_x < inner.x + inner.width {
        let width = (SKILLS_HINT.len() as u16).min(inner.x + inner.width - skills_x);
        cs.add_click_target(Rect::new(skills_x, tools_row, width, 1), OPEN_SKILLS);
    }
}

const SEARCH_HINT: &str = " [F] Find a job   ";
const SKILLS_HINT: &str = "[S] Skills check ";

// ── Overlays ───────────────────────────────────────────────────────────

fn overlay_block(title: &str, borders: Borders) -> Block<'_> {
    Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

fn input_line(text: &str, placeholder: &str) -> Line<'static> {
    let body = if text.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(text.to_string(), Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(" > ", Style::default().fg(Color::Yellow)),
        body,
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ])
}

fn render_search(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let block = overlay_block(" Find a job ", borders);
    let inner = block.inner(area);

    let mut cl = ClickableList::new();
    cl.push(input_line(&state.query, "type part of a job title"));
    cl.push_clickable(
        Line::from(Span::styled(
            " ✕ Esc: close · Enter: open · ↑/↓: choose",
            Style::default().fg(Color::DarkGray),
        )),
        OVERLAY_CLOSE,
    );

    let results = search_jobs(&state.catalog, &state.query);
    if state.query.chars().count() < MIN_QUERY_CHARS {
        cl.push(Line::from(""));
    } else if results.is_empty() {
        cl.push(Line::from(Span::styled(
            " No jobs found",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        cl.push(Line::from(Span::styled(
            format!(" {} matches", results.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (row, &index) in results.iter().enumerate() {
        let Some(job) = state.catalog.get(index) else {
            continue;
        };
        let is_cursor = row == state.search_cursor;
        let title_style = if is_cursor {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let status = evaluate_job_status(job, state.year);
        let line = Line::from(vec![
            Span::styled(if is_cursor { " ▸ " } else { "   " }, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<26}", job.title), title_style),
            Span::styled(format!(" {:<12}", job.cluster), Style::default().fg(Color::DarkGray)),
            Span::styled(status.level.name(), Style::default().fg(risk_color(status.level))),
        ]);
        match job_action(index) {
            Some(action) => cl.push_clickable(line, action),
            None => cl.push(line),
        }
    }

    // Keep the highlighted result on screen; three rows sit above the list.
    let visible = inner.height.max(1) as usize;
    let scroll = (state.search_cursor + 4).saturating_sub(visible).min(u16::MAX as usize) as u16;
    cl.register_targets(area, cs, inner.y - area.y, area.bottom() - inner.bottom(), scroll, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block).scroll((scroll, 0)), area);
}

fn render_skills(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let block = overlay_block(" Skills check ", borders);
    let inner = block.inner(area);
    let text = Style::default().fg(Color::Gray);
    let action = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut cl = ClickableList::new();
    match &state.skill_report {
        None => {
            cl.push(Line::from(Span::styled(
                " List your key skills, separated by commas.",
                text,
            )));
            cl.push(input_line(&state.skills_input, "e.g. Excel, Python, Strategic Planning"));
            cl.push(Line::from(""));
            cl.push_clickable(Line::from(Span::styled(" ▶ Enter: run the check", action)), OVERLAY_CONFIRM);
        }
        Some(report) => {
            let color = match report.score {
                81.. => Color::Green,
                61..=80 => Color::Yellow,
                _ => Color::Red,
            };
            let mut score = vec![Span::styled(" Resilience ", text)];
            score.push(score_bar(report.score as f64 / 100.0, 20, color));
            score.push(Span::styled(
                format!(" {}", report.score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            cl.push(Line::from(score));
            cl.push(Line::from(Span::styled(format!(" {}", report.feedback), text)));
            cl.push(Line::from(""));
            if report.course_added {
                cl.push(Line::from(vec![
                    Span::styled(" Planned ", text),
                    Span::styled(report.course.code, Style::default().fg(Color::Cyan)),
                    Span::styled(format!(" {}", report.course.name), text),
                ]));
                cl.push_clickable(
                    Line::from(Span::styled(" ▶ Enter: view recommended career path", action)),
                    OVERLAY_CONFIRM,
                );
            } else {
                cl.push(Line::from(vec![
                    Span::styled(" Skill gap: recommended course ", text),
                    Span::styled(report.course.code, Style::default().fg(Color::Cyan)),
                    Span::styled(format!(" {}", report.course.name), text),
                ]));
                cl.push_clickable(
                    Line::from(Span::styled(" ▶ Enter: add to plan (+15)", action)),
                    OVERLAY_CONFIRM,
                );
            }
        }
    }
    cl.push_clickable(
        Line::from(Span::styled(" ✕ Esc: close", Style::default().fg(Color::DarkGray))),
        OVERLAY_CLOSE,
    );

    cl.register_targets(area, cs, inner.y - area.y, area.bottom() - inner.bottom(), 0, inner.width);
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

// ── Landscape screen ───────────────────────────────────────────────────

fn render_landscape(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let chunks = if is_narrow {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Min(5)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area)
    };

    render_terrain(state, f, chunks[0], borders, cs);
    render_job_list(state, f, chunks[1], borders, cs);
}

/// Top-down heat map of the height field. Brightness and glyph follow the
/// elevation, hue follows the blended risk colour of nearby jobs.
fn render_terrain(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Terrain ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let jobs = state.catalog.jobs();
    let shown = &jobs[..jobs.len().min(TERRAIN.max_peaks)];
    let peaks = peaks_for(shown, state.year);
    let colors: Vec<[f64; 3]> = shown
        .iter()
        .map(|job| evaluate_job_status(job, state.year).level.unit_rgb())
        .collect();
    let top = peaks.iter().map(|p| p.height).fold(0.0, f64::max) * TERRAIN.height_scale;
    let relative = |h: f64| if top > 0.0 { (h / top).clamp(0.0, 1.0) } else { 0.0 };

    let mut grid: Vec<Vec<(char, Color)>> = (0..inner.height)
        .map(|row| {
            (0..inner.width)
                .map(|col| {
                    let (x, z) = cell_to_world(col, row, inner.width, inner.height);
                    let level = relative(field_height(x, z, &peaks));
                    let glyph = TERRAIN_RAMP[(level * (TERRAIN_RAMP.len() - 1) as f64).round() as usize];
                    let brightness = MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * level;
                    (glyph, unit_color(blend_color(x, z, &peaks, &colors), brightness))
                })
                .collect()
        })
        .collect();

    for (i, peak) in peaks.iter().enumerate() {
        let Some((col, row)) = world_to_cell(peak.x, peak.z, inner.width, inner.height) else {
            continue;
        };
        let color = if i == state.cursor {
            Color::White
        } else {
            let elevation = marker_height(&peaks, i).unwrap_or(TERRAIN.offset_y) - TERRAIN.offset_y;
            unit_color(colors[i], 0.6 + 0.4 * relative(elevation))
        };
        grid[row as usize][col as usize] = (marker_glyph(i), color);
        if let Some(action) = job_action(i) {
            cs.add_click_target(Rect::new(inner.x + col, inner.y + row, 1, 1), action);
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, color)| Span::styled(ch.to_string(), Style::default().fg(color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_job_list(
    state: &LandscapeState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(format!(" Jobs ({}) · [O] open ", state.catalog.len()));
    let inner = block.inner(area);

    let mut cl = ClickableList::new();
    for (i, job) in state.catalog.jobs().iter().enumerate() {
        let status = evaluate_job_status(job, state.year);
        let is_cursor = i == state.cursor;
        let marker = if i < TERRAIN.max_peaks { marker_glyph(i) } else { ' ' };
        let title_style = if is_cursor {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let line = Line::from(vec![
            Span::styled(if is_cursor { "▸" } else { " " }, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{marker} "), Style::default().fg(risk_color(status.level))),
            Span::styled(format!("{:<24}", job.title), title_style),
            Span::styled(
                format!(" {:<12}", status.level.name()),
                Style::default().fg(risk_color(status.level)),
            ),
            Span::styled(
                format_growth(job.projected_growth),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        match job_action(i) {
            Some(action) => cl.push_clickable(line, action),
            None => cl.push(line),
        }
    }

    let visible = inner.height.max(1) as usize;
    let scroll = (state.cursor + 1).saturating_sub(visible).min(u16::MAX as usize) as u16;
    cl.register_targets(area, cs, inner.y - area.y, area.bottom() - inner.bottom(), scroll, 0);

    let widget = Paragraph::new(cl.into_lines()).block(block).scroll((scroll, 0));
    f.render_widget(widget, area);
}

// ── Detail screen ──────────────────────────────────────────────────────

fn render_detail(
    state: &LandscapeState,
    job: &Job,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let (left, matrix_area) = if is_narrow {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(10)])
            .split(area);
        (chunks[0], chunks[1])
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);
        (chunks[0], chunks[1])
    };

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(4)])
        .split(left);

    render_summary(state, job, f, left_chunks[0], borders, cs);
    render_tasks(state, job, f, left_chunks[1], borders, is_narrow, cs);
    render_matrix(state, job, f, matrix_area, borders);
}

fn render_summary(
    state: &LandscapeState,
    job: &Job,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let year = state.year;
    let status = evaluate_job_status(job, year);
    let rescued = state
        .baseline_job(&job.id)
        .is_some_and(|baseline| was_rescued(baseline, job, year));
    let composition = task_composition(&job.tasks, year);
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(Span::styled(" ◀ [Q] Back to landscape", Style::default().fg(Color::Yellow))),
        BACK,
    );
    cl.push(Line::from(vec![
        Span::styled(
            format!(" {}", job.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {} · {}", job.cluster, job.id), Style::default().fg(Color::DarkGray)),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Employment ", label),
        Span::styled(format_headcount(projected_employment(job, year)), value),
        Span::styled(
            format!("  (2025: {})", format_headcount(job.employment as f64)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Growth     ", label),
        Span::styled(format_growth(job.projected_growth), value),
        Span::styled("  Automation cost ", label),
        Span::styled(format!("{:.2}", job.automation_cost_index), value),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Volatility ", label),
        Span::styled(job.salary_volatility.name(), value),
        Span::styled("  Resilience ", label),
        Span::styled(job.human_resilience.name(), value),
    ]));

    let mut confidence = vec![
        Span::styled(" Confidence ", label),
        Span::styled(format!("{:.0}% ", job.provenance.confidence_score * 100.0), value),
        Span::styled(job.provenance.data_sources.join(" + "), Style::default().fg(Color::DarkGray)),
    ];
    if job.provenance.is_alias {
        confidence.push(Span::styled(" (alias)", Style::default().fg(Color::DarkGray)));
    }
    cl.push(Line::from(confidence));

    let mut risk = vec![
        Span::styled(" Risk       ", label),
        Span::styled(
            format!("{} ({:.1})", status.level.name(), status.risk_score),
            Style::default().fg(risk_color(status.level)).add_modifier(Modifier::BOLD),
        ),
    ];
    if rescued {
        risk.push(Span::styled(
            "  ✔ rescued",
            Style::default().fg(risk_color(RiskLevel::Insulated)),
        ));
    }
    cl.push(Line::from(risk));

    let bar_width = area.width.saturating_sub(4) as usize;
    let segments: Vec<(usize, Color)> = ALL_CATEGORIES
        .iter()
        .map(|&c| (composition.count(c), category_color(c)))
        .collect();
    let mut bar = vec![Span::raw(" ")];
    bar.extend(segment_bar(&segments, bar_width));
    cl.push(Line::from(bar));

    let mut legend = vec![Span::styled(format!(" {} tasks:", composition.total()), label)];
    for &category in ALL_CATEGORIES.iter() {
        legend.push(Span::styled(" ■", Style::default().fg(category_color(category))));
        legend.push(Span::styled(
            format!(" {} {}", category.name(), composition.count(category)),
            label,
        ));
    }
    cl.push(Line::from(legend));

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} in {} ", job.title, format_year(year)));
    let inner = block.inner(area);
    cl.register_targets(area, cs, inner.y - area.y, area.bottom() - inner.bottom(), 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn category_color(category: TaskCategory) -> Color {
    match category {
        TaskCategory::Automatable => risk_color(RiskLevel::HighRisk),
        TaskCategory::Augmentable => risk_color(RiskLevel::Transitional),
        TaskCategory::HumanCritical => risk_color(RiskLevel::Insulated),
    }
}

fn render_tasks(
    state: &LandscapeState,
    job: &Job,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Tasks · tap or [1]-[9] to upskill ");
    let inner = block.inner(area);
    let bar_width = if is_narrow { 5 } else { 8 };

    let mut cl = ClickableList::new();
    for (i, task) in job.tasks.iter().enumerate() {
        let category = categorize_task(task, state.year);
        let key = if i < 9 {
            format!(" [{}] ", i + 1)
        } else {
            "     ".to_string()
        };
        let line = Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{:<20}", task.name), Style::default().fg(Color::White)),
            Span::styled(" AI ", Style::default().fg(Color::Gray)),
            score_bar(projected_ai(task.ai_capability_score, state.year), bar_width, Color::Red),
            Span::styled(" H ", Style::default().fg(Color::Gray)),
            score_bar(task.human_criticality_score, bar_width, Color::Green),
            Span::styled(format!(" {}", category.name()), Style::default().fg(category_color(category))),
        ]);
        match task_action(i) {
            Some(action) => cl.push_clickable(line, action),
            None => cl.push(line),
        }
    }

    let visible = inner.height as usize;
    if cl.visual_height(inner.width) as usize > visible {
        cl.push(Line::from(Span::styled(
            " … more tasks below",
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.register_targets(area, cs, inner.y - area.y, area.bottom() - inner.bottom(), 0, inner.width);
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Scatter of the job's tasks: projected AI capability on x, human
/// criticality on y, with the 0.7 / 0.6 thresholds drawn as guides.
fn render_matrix(state: &LandscapeState, job: &Job, f: &mut Frame, area: Rect, borders: Borders) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Impact matrix ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height < 3 {
        return;
    }

    let plot_h = inner.height - 1;
    let w = inner.width as usize;
    let h = plot_h as usize;
    let to_col = |v: f64| ((v.clamp(0.0, 1.0) * (w - 1) as f64).round() as usize).min(w - 1);
    let to_row = |v: f64| (((1.0 - v.clamp(0.0, 1.0)) * (h - 1) as f64).round() as usize).min(h - 1);
    let guide_col = to_col(0.7);
    let guide_row = to_row(0.6);

    let guide = Color::DarkGray;
    let mut grid: Vec<Vec<(char, Color)>> = (0..h)
        .map(|r| {
            (0..w)
                .map(|c| match (r == guide_row, c == guide_col) {
                    (true, true) => ('┼', guide),
                    (true, false) => ('┈', guide),
                    (false, true) => ('┊', guide),
                    (false, false) => (' ', guide),
                })
                .collect()
        })
        .collect();

    for (i, task) in job.tasks.iter().enumerate() {
        let point = impact_point(task, state.year);
        grid[to_row(point.human)][to_col(point.ai)] = (marker_glyph(i), risk_color(point.level));
    }

    let mut lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, color)| Span::styled(ch.to_string(), Style::default().fg(color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "AI capability → · human ↑",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

// ── Log ────────────────────────────────────────────────────────────────

fn render_log(state: &LandscapeState, f: &mut Frame, area: Rect, borders: Borders) {
    let max_lines = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(max_lines);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|msg| {
            Line::from(Span::styled(
                format!(" > {}", msg),
                Style::default().fg(Color::DarkGray),
            ))
        })
        .collect();

    let until_end = END_YEAR - state.year;
    let title = format!(" Log · {until_end:.1}y to 2030 · [/] year  ,/. fine  j/k move  f find  s skills ");
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
