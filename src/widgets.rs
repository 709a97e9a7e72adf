//! Reusable UI pieces shared by the landscape screens.
//!
//! - [`ClickableList`] pairs rendered lines with click actions so targets
//!   follow the rows they are drawn on.
//! - [`segment_bar`] and [`score_bar`] draw proportional bars.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Paragraph, Wrap};

use crate::input::ClickState;

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a paragraph, some of them bound to an action ID.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Tasks"));
/// cl.push_clickable(Line::from("[1] Closing"), TASK_ROW_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0, inner_width);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when any of its rows is clicked.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Rows the lines take when wrapped to `width`. A zero width means no
    /// wrapping: one row per line.
    pub fn visual_height(&self, width: u16) -> u16 {
        let rows: usize = self.lines.iter().map(|l| line_rows(l, width)).sum();
        rows.min(u16::MAX as usize) as u16
    }

    /// Register click targets for the clickable lines.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders, `scroll`
    /// is the paragraph's vertical scroll in visual rows and `wrap_width`
    /// is the inner width when the paragraph wraps (0 otherwise).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        wrap_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut starts = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            let h = line_rows(line, wrap_width) as u16;
            starts.push((cumulative, h));
            cumulative = cumulative.saturating_add(h);
        }

        for &(idx, action_id) in &self.actions {
            let Some(&(start, height)) = starts.get(idx) else {
                continue;
            };
            for vr in start..start + height {
                if vr < scroll {
                    continue;
                }
                let row = content_y + (vr - scroll);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

fn line_rows(line: &Line<'_>, width: u16) -> usize {
    if width == 0 {
        return 1;
    }
    Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width)
        .max(1)
}

// ── Bars ───────────────────────────────────────────────────────

/// A bar of `width` cells split between segments in proportion to their
/// counts. Empty segments get no cells; rounding leftovers go to the
/// largest segment.
pub fn segment_bar(segments: &[(usize, Color)], width: usize) -> Vec<Span<'static>> {
    let total: usize = segments.iter().map(|(n, _)| n).sum();
    if total == 0 || width == 0 {
        return vec![Span::styled("░".repeat(width), Style::default().fg(Color::DarkGray))];
    }

    let mut cells: Vec<usize> = segments.iter().map(|(n, _)| n * width / total).collect();
    let used: usize = cells.iter().sum();
    if let Some(largest) = (0..segments.len()).max_by_key(|&i| segments[i].0) {
        cells[largest] += width - used;
    }

    segments
        .iter()
        .zip(cells)
        .filter(|(_, n)| *n > 0)
        .map(|((_, color), n)| Span::styled("█".repeat(n), Style::default().fg(*color)))
        .collect()
}

/// A 0-1 score as a filled bar.
pub fn score_bar(value: f64, width: usize, color: Color) -> Span<'static> {
    let filled = ((value.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let bar = "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled));
    Span::styled(bar, Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_widths(spans: &[Span]) -> Vec<usize> {
        spans.iter().map(|s| s.content.chars().count()).collect()
    }

    // ── ClickableList ──────────────────────────────────────────

    #[test]
    fn clickable_list_basic() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("job 0"), 100);
        cl.push_clickable(Line::from("job 1"), 101);
        cl.push(Line::from("footer"));
        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(100));
        assert_eq!(cs.hit_test(10, 8), Some(101));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_with_scroll() {
        let mut cl = ClickableList::new();
        for i in 0..4 {
            cl.push_clickable(Line::from(format!("job {i}")), 100 + i);
        }
        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(102));
        assert_eq!(cs.hit_test(10, 11), Some(103));
    }

    #[test]
    fn clickable_list_clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("job {i}")), 100 + i);
        }
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 3), Some(102));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn wrapped_line_is_clickable_on_every_row() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);
        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(42));
        assert_eq!(cs.hit_test(5, 4), Some(42));
        assert_eq!(cs.hit_test(5, 5), None);
    }

    #[test]
    fn visual_height_counts_wrapped_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push(Line::from("short"));
        assert_eq!(cl.visual_height(0), 2);
        assert_eq!(cl.visual_height(10), 3);
    }

    // ── Bars ───────────────────────────────────────────────────

    #[test]
    fn segment_bar_fills_width() {
        let spans = segment_bar(&[(1, Color::Red), (1, Color::Yellow), (1, Color::Green)], 10);
        assert_eq!(span_widths(&spans).iter().sum::<usize>(), 10);
    }

    #[test]
    fn segment_bar_skips_empty_segments() {
        let spans = segment_bar(&[(0, Color::Red), (2, Color::Yellow), (2, Color::Green)], 8);
        assert_eq!(span_widths(&spans), vec![4, 4]);
    }

    #[test]
    fn segment_bar_empty_is_placeholder() {
        let spans = segment_bar(&[(0, Color::Red)], 6);
        assert_eq!(span_widths(&spans), vec![6]);
    }

    #[test]
    fn score_bar_proportional() {
        assert_eq!(score_bar(0.5, 10, Color::Blue).content, "█████░░░░░");
        assert_eq!(score_bar(1.7, 4, Color::Blue).content, "████");
    }
}
