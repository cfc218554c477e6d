use std::fmt::Write;

use chrono::{DateTime, Local};
use dashboard_core::{
    AppViewModel, DetailView, FormTarget, InfoView, JobRowView, ProgressBar, RequestRowView,
    SegmentKind,
};

const BAR_WIDTH: usize = 20;

pub(crate) fn render(view: &AppViewModel, loaded_at: Option<DateTime<Local>>) -> String {
    let mut out = String::new();

    let _ = write!(out, "== Requests ({}) ==", view.rows.len());
    if view.pending_batches > 0 {
        let _ = write!(out, "  [{} batch(es) in flight]", view.pending_batches);
    }
    if let Some(at) = loaded_at {
        let _ = write!(out, "  updated {}", at.format("%H:%M:%S"));
    }
    out.push('\n');

    if !view.status_summary.is_empty() {
        let summary = view
            .status_summary
            .iter()
            .map(|slice| format!("{} {}", slice.status, slice.count))
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "Status: {summary}");
    }

    for (index, row) in view.rows.iter().enumerate() {
        render_row(&mut out, index, row);
    }

    if let Some(menu) = &view.menu {
        let entries = menu
            .entries
            .iter()
            .map(|entry| {
                let label = entry.action.label().to_lowercase();
                if entry.enabled {
                    label
                } else {
                    format!("({label})")
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "Menu for {:?}: {entries}", menu.ids);
    }

    if let Some(prompt) = &view.confirm_prompt {
        let _ = writeln!(out, "? {prompt} (yes/no)");
    }

    match &view.info {
        Some(InfoView::Loading(ids)) => {
            let _ = writeln!(out, "-- Info {ids:?}: loading...");
        }
        Some(InfoView::Body(body)) => {
            let _ = writeln!(out, "-- Info --\n{body}\n-- (hide) --");
        }
        None => {}
    }

    if let Some(form) = &view.form {
        let title = match form.target {
            FormTarget::New => "New request".to_string(),
            FormTarget::Edit(id) => format!("Edit request {id}"),
        };
        let _ = writeln!(out, "-- {title} --");
        for (name, value) in &form.fields {
            let _ = writeln!(out, "  {name} = {value}");
        }
        if !view.tags.is_empty() {
            let _ = writeln!(out, "  tags: {}", view.tags.join(", "));
        }
        if let Some((app, versions)) = &view.app_versions {
            let _ = writeln!(out, "  {app} versions: {}", versions.join(", "));
        }
        let _ = writeln!(out, "-- (submit/cancel) --");
    }

    if let Some(note) = &view.notification {
        let _ = writeln!(
            out,
            "[{} {}] {}",
            note.status,
            note.level.css_class(),
            note.message
        );
    }
    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "!! {alert} (dismiss)");
    }

    out
}

fn render_row(out: &mut String, index: usize, row: &RequestRowView) {
    let marker = if row.selected { '*' } else { ' ' };
    let expander = match row.details {
        DetailView::Collapsed => '+',
        DetailView::Loading | DetailView::Jobs(_) => '-',
    };
    let _ = writeln!(
        out,
        "{index:>3} {marker} {expander} {id:<6} {status:<12} {date:<10} {lead:<12} {desc}",
        id = row.request_id,
        status = row.status.label(),
        date = row.request_date,
        lead = row.sim_lead,
        desc = row.description,
    );

    match &row.details {
        DetailView::Collapsed => {}
        DetailView::Loading => {
            let _ = writeln!(out, "        loading jobs...");
        }
        DetailView::Jobs(jobs) if jobs.is_empty() => {
            let _ = writeln!(out, "        no parametric jobs");
        }
        DetailView::Jobs(jobs) => {
            for job in jobs {
                render_job(out, job);
            }
        }
    }
}

fn render_job(out: &mut String, job: &JobRowView) {
    let completed = job.progress.segment(SegmentKind::Completed);
    let failed = job.progress.segment(SegmentKind::Failed);
    let _ = write!(
        out,
        "        job {id:<6} {name} x{njobs} [{bar}] {done:.0}% done {failed:.0}% failed  {status}",
        id = job.job_id,
        name = job.macro_name,
        njobs = job.njobs,
        bar = progress_bar(&job.progress),
        done = completed.percent,
        failed = failed.percent,
        status = job.status,
    );
    if job.can_reschedule {
        let _ = write!(out, "  (reschedule {})", job.job_id);
    }
    out.push('\n');
    for dir in job.output.lines() {
        let _ = writeln!(out, "            -> {dir}");
    }
}

fn segment_glyph(kind: SegmentKind) -> char {
    match kind {
        SegmentKind::Completed => '#',
        SegmentKind::Failed => 'x',
        SegmentKind::Running => '>',
        SegmentKind::Submitted => '+',
        SegmentKind::Other => '?',
    }
}

fn progress_bar(bar: &ProgressBar) -> String {
    let mut cells = String::with_capacity(BAR_WIDTH);
    let mut used = 0;
    for segment in &bar.segments {
        let width = ((segment.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let width = width.min(BAR_WIDTH - used);
        cells.extend(std::iter::repeat(segment_glyph(segment.kind)).take(width));
        used += width;
    }
    cells.extend(std::iter::repeat('.').take(BAR_WIDTH - used));
    cells
}
