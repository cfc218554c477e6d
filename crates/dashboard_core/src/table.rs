use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::{Request, RequestStatus};

pub const CELL_WIDTH_LIMIT: usize = 40;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Default table order: status rank ascending, newest request date first,
/// then highest id first.
pub fn sort_requests(rows: &mut [Request]) {
    rows.sort_by(compare_rows);
}

fn compare_rows(a: &Request, b: &Request) -> Ordering {
    a.status
        .cmp(&b.status)
        .then_with(|| compare_dates(&b.request_date, &a.request_date))
        .then_with(|| b.id.cmp(&a.id))
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    match (
        NaiveDate::parse_from_str(a, DATE_FORMAT),
        NaiveDate::parse_from_str(b, DATE_FORMAT),
    ) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Shortens long cell text to the column limit, marking the cut with `…`.
pub fn truncate_cell(text: &str) -> String {
    match text.char_indices().nth(CELL_WIDTH_LIMIT) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// One slice of the status pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSlice {
    pub status: RequestStatus,
    pub count: usize,
    /// HSL hue in degrees.
    pub hue: f64,
}

/// Requests per status, ordered by label so colours stay put across reloads.
pub fn status_summary(rows: &[Request]) -> Vec<StatusSlice> {
    let mut counts: Vec<(RequestStatus, usize)> = Vec::new();
    for row in rows {
        match counts.iter_mut().find(|(status, _)| *status == row.status) {
            Some((_, count)) => *count += 1,
            None => counts.push((row.status.clone(), 1)),
        }
    }
    counts.sort_by(|(a, _), (b, _)| a.label().cmp(b.label()));

    let slices = counts.len();
    counts
        .into_iter()
        .enumerate()
        .map(|(i, (status, count))| StatusSlice {
            status,
            count,
            hue: 360.0 * i as f64 / slices as f64,
        })
        .collect()
}
