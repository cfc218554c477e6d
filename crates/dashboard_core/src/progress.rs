use crate::ParametricJob;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Completed,
    Failed,
    Running,
    Submitted,
    Other,
}

impl SegmentKind {
    pub fn css_class(self) -> &'static str {
        match self {
            SegmentKind::Completed => "progress-bar-success",
            SegmentKind::Failed => "progress-bar-danger",
            SegmentKind::Running => "progress-bar-info",
            SegmentKind::Submitted => "progress-bar-warning",
            SegmentKind::Other => "progress-bar-other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSegment {
    pub kind: SegmentKind,
    pub count: u32,
    pub percent: f64,
}

/// Stacked progress bar for one parametric job.
///
/// Segments are always in the order completed, failed, running, submitted,
/// other. `active` marks a bar that should be drawn striped because work is
/// still queued or running.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub segments: [ProgressSegment; 5],
    pub active: bool,
}

impl ProgressBar {
    pub fn new(total: u32, completed: u32, failed: u32, running: u32, submitted: u32) -> Self {
        let known = completed
            .saturating_add(failed)
            .saturating_add(running)
            .saturating_add(submitted);
        let other = total.saturating_sub(known);
        let segment = |kind, count| ProgressSegment {
            kind,
            count,
            percent: percent_of(count, total),
        };

        Self {
            segments: [
                segment(SegmentKind::Completed, completed),
                segment(SegmentKind::Failed, failed),
                segment(SegmentKind::Running, running),
                segment(SegmentKind::Submitted, submitted),
                segment(SegmentKind::Other, other),
            ],
            active: running.saturating_add(submitted) > 0,
        }
    }

    pub fn for_job(job: &ParametricJob) -> Self {
        Self::new(
            job.njobs,
            job.num_completed,
            job.num_failed,
            job.num_running,
            job.num_submitted,
        )
    }

    pub fn segment(&self, kind: SegmentKind) -> &ProgressSegment {
        self.segments
            .iter()
            .find(|segment| segment.kind == kind)
            .unwrap_or(&self.segments[4])
    }

    /// Share of the total covered by the four known states.
    pub fn accounted_percent(&self) -> f64 {
        self.segments
            .iter()
            .filter(|segment| segment.kind != SegmentKind::Other)
            .map(|segment| segment.percent)
            .sum()
    }
}

/// `100 * count / total`, with an empty total counting as 0%.
pub fn percent_of(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * f64::from(count) / f64::from(total)
}
