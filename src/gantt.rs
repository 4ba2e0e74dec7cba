//! Text rendering of timelines.
//!
//! Pure formatting over [`Timeline`] segments; no scheduling logic.
//!
//! ```text
//! | P1 | P2 |idle| P0 |
//! 0    3    4    6    11
//! ```
//!
//! Every cell has the same width, sized to the widest label or time value,
//! so each time value starts exactly under the bar that opens its cell.

use crate::models::{Ticks, Timeline};

/// Label used for idle cells.
pub const IDLE_LABEL: &str = "idle";

struct Cell {
    label: String,
    end: Ticks,
}

fn cells(timeline: &Timeline) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut cursor = 0;
    for s in timeline.segments() {
        if s.start > cursor {
            cells.push(Cell {
                label: IDLE_LABEL.to_string(),
                end: s.start,
            });
        }
        cells.push(Cell {
            label: format!("P{}", s.process_id),
            end: s.end,
        });
        cursor = s.end;
    }
    cells
}

/// Renders a two-line Gantt chart: the bar line and the time line.
pub fn render(timeline: &Timeline) -> String {
    let cells = cells(timeline);

    let widest_time = cells
        .iter()
        .map(|c| c.end.to_string().len())
        .max()
        .unwrap_or(1);
    let widest_label = cells.iter().map(|c| c.label.len()).max().unwrap_or(0);
    let inner = widest_label.max(widest_time);
    // " label |" → inner + 3 columns per cell
    let stride = inner + 3;

    let mut bar = String::from("|");
    let mut times = String::from("0");
    for (i, cell) in cells.iter().enumerate() {
        bar.push_str(&format!(" {:^inner$} |", cell.label));

        let column = (i + 1) * stride;
        while times.len() < column {
            times.push(' ');
        }
        times.push_str(&cell.end.to_string());
    }

    format!("{bar}\n{times}")
}

/// Renders the dispatch order, e.g. `P0 -> P1 -> P0`.
pub fn render_sequence(timeline: &Timeline) -> String {
    timeline
        .segments()
        .iter()
        .map(|s| format!("P{}", s.process_id))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Renders the raw time markers, e.g. `[0, 2, 4]`.
pub fn render_markers(timeline: &Timeline) -> String {
    format!("{:?}", timeline.time_markers())
}
