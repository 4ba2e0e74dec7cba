//! Timeline (Gantt) model.
//!
//! A timeline records which process occupied the CPU over which interval,
//! plus the clock value at the end of every recorded event. Idle intervals
//! are never stored as segments; whether an idle tick leaves a time marker
//! depends on the scheduling discipline.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Ticks};

/// One contiguous run of a process on the CPU, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Process that ran.
    pub process_id: ProcessId,
    /// Start time (ticks).
    pub start: Ticks,
    /// End time (ticks).
    pub end: Ticks,
}

impl Segment {
    /// Creates a new segment.
    pub fn new(process_id: ProcessId, start: Ticks, end: Ticks) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Segment length in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// An interval during which no process ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleGap {
    /// Start time (ticks).
    pub start: Ticks,
    /// End time (ticks).
    pub end: Ticks,
}

/// Ordered execution record produced by one `schedule` call.
///
/// Built incrementally by a scheduler and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
    time_markers: Vec<Ticks>,
}

impl Timeline {
    /// Creates an empty timeline whose only marker is the epoch (0).
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            time_markers: vec![0],
        }
    }

    /// Appends a work segment and records its end as a time marker.
    pub(crate) fn push_work(&mut self, process_id: ProcessId, start: Ticks, end: Ticks) {
        debug_assert!(end > start, "work segment for P{process_id} must be non-empty");
        debug_assert!(
            self.segments.last().map_or(true, |s| s.end <= start),
            "segments must not overlap"
        );
        self.segments.push(Segment::new(process_id, start, end));
        self.time_markers.push(end);
    }

    /// Records a time marker for an idle tick ending at `now`.
    pub(crate) fn push_idle_marker(&mut self, now: Ticks) {
        self.time_markers.push(now);
    }

    /// Work segments in execution order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Clock values at the end of each recorded event, starting from 0.
    pub fn time_markers(&self) -> &[Ticks] {
        &self.time_markers
    }

    /// Number of work segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether no work was recorded.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Makespan: end of the last work segment (0 when empty).
    pub fn makespan(&self) -> Ticks {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total ticks spent running processes.
    pub fn busy_time(&self) -> Ticks {
        self.segments.iter().map(Segment::duration).sum()
    }

    /// Total ticks the CPU sat idle before the makespan.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// Returns all segments for a given process.
    pub fn segments_for(&self, process_id: ProcessId) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// First dispatch time of a process.
    pub fn first_start(&self, process_id: ProcessId) -> Option<Ticks> {
        self.segments
            .iter()
            .find(|s| s.process_id == process_id)
            .map(|s| s.start)
    }

    /// Idle intervals between 0 and the makespan.
    pub fn idle_gaps(&self) -> Vec<IdleGap> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for s in &self.segments {
            if s.start > cursor {
                gaps.push(IdleGap {
                    start: cursor,
                    end: s.start,
                });
            }
            cursor = s.end;
        }
        gaps
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_work(1, 0, 3);
        t.push_idle_marker(4);
        t.push_work(0, 4, 6);
        t.push_work(1, 6, 8);
        t
    }

    #[test]
    fn test_new_timeline_starts_at_epoch() {
        let t = Timeline::new();
        assert_eq!(t.time_markers(), &[0]);
        assert!(t.is_empty());
        assert_eq!(t.makespan(), 0);
        assert_eq!(t.idle_time(), 0);
    }

    #[test]
    fn test_markers_follow_events() {
        let t = sample_timeline();
        assert_eq!(t.time_markers(), &[0, 3, 4, 6, 8]);
        assert_eq!(t.segment_count(), 3);
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_timeline();
        assert_eq!(t.makespan(), 8);
        assert_eq!(t.busy_time(), 7);
        assert_eq!(t.idle_time(), 1);
    }

    #[test]
    fn test_segments_for_process() {
        let t = sample_timeline();
        assert_eq!(t.segments_for(1).len(), 2);
        assert_eq!(t.segments_for(0).len(), 1);
        assert!(t.segments_for(9).is_empty());
        assert_eq!(t.first_start(0), Some(4));
        assert_eq!(t.first_start(9), None);
    }

    #[test]
    fn test_idle_gaps() {
        let mut t = Timeline::new();
        t.push_work(0, 2, 4);
        t.push_work(1, 4, 5);
        t.push_work(2, 7, 9);

        assert_eq!(
            t.idle_gaps(),
            vec![IdleGap { start: 0, end: 2 }, IdleGap { start: 5, end: 7 }]
        );
    }

    #[test]
    fn test_segment_duration() {
        assert_eq!(Segment::new(0, 3, 10).duration(), 7);
    }
}
