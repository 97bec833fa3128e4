//! Frequency analysis over the draw history.
//!
//! Deliberately naive: flatten every record's six main numbers (bonus
//! excluded) into one multiset and report the ten most frequent values.

use serde::Serialize;

use crate::store::{DrawRecord, LOTTO_MAX};

/// One entry of the top-10 list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

/// Summary over the full history; a view, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub last_drw: u32,
    pub last_date: String,
    pub total_records: usize,
    pub top_10: Vec<NumberCount>,
}

/// Summarize the history: latest draw metadata, record count, and the ten
/// most frequent main numbers. Ties keep first-encountered order (scanning
/// records in store order). None when the history is empty.
pub fn analyze(records: &[DrawRecord]) -> Option<AnalysisSummary> {
    let last = records.last()?;

    let mut counts = [0u32; LOTTO_MAX as usize + 1];
    let mut first_seen: Vec<u8> = Vec::new();
    for record in records {
        for &n in &record.numbers {
            let slot = &mut counts[n as usize];
            if *slot == 0 {
                first_seen.push(n);
            }
            *slot += 1;
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    let mut top: Vec<NumberCount> = first_seen
        .into_iter()
        .map(|number| NumberCount {
            number,
            count: counts[number as usize],
        })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count));
    top.truncate(10);

    Some(AnalysisSummary {
        last_drw: last.draw_no,
        last_date: last.draw_date.clone(),
        total_records: records.len(),
        top_10: top,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(draw_no: u32, numbers: [u8; 6]) -> DrawRecord {
        DrawRecord {
            draw_no,
            draw_date: format!("2024-01-{:02}", draw_no),
            numbers,
            bonus: 45,
        }
    }

    #[test]
    fn empty_history_has_no_summary() {
        assert!(analyze(&[]).is_none());
    }

    #[test]
    fn summarizes_latest_draw_and_counts() {
        let records = vec![
            record(1, [1, 2, 3, 4, 5, 6]),
            record(2, [1, 2, 3, 10, 11, 12]),
            record(3, [1, 20, 21, 22, 23, 24]),
        ];
        let summary = analyze(&records).unwrap();
        assert_eq!(summary.last_drw, 3);
        assert_eq!(summary.last_date, "2024-01-03");
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.top_10.len(), 10);
        assert_eq!(summary.top_10[0], NumberCount { number: 1, count: 3 });
        assert_eq!(summary.top_10[1], NumberCount { number: 2, count: 2 });
        assert_eq!(summary.top_10[2], NumberCount { number: 3, count: 2 });
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        // 7 and 3 both appear twice, but 7 shows up in an earlier record.
        let records = vec![
            record(1, [7, 10, 11, 12, 13, 14]),
            record(2, [3, 20, 21, 22, 23, 24]),
            record(3, [7, 3, 30, 31, 32, 33]),
        ];
        let summary = analyze(&records).unwrap();
        let seven = summary.top_10.iter().position(|e| e.number == 7).unwrap();
        let three = summary.top_10.iter().position(|e| e.number == 3).unwrap();
        assert!(seven < three);
        assert_eq!(summary.top_10[seven].count, 2);
        assert_eq!(summary.top_10[three].count, 2);
    }

    #[test]
    fn bonus_numbers_are_excluded() {
        // Bonus is always 45 in these fixtures; 45 never appears as a main
        // number, so it must not appear in the counts.
        let records = vec![record(1, [1, 2, 3, 4, 5, 6])];
        let summary = analyze(&records).unwrap();
        assert!(summary.top_10.iter().all(|e| e.number != 45));
    }

    #[test]
    fn analysis_is_deterministic_for_fixed_history() {
        let records = vec![
            record(1, [5, 9, 13, 21, 34, 40]),
            record(2, [5, 9, 14, 22, 35, 41]),
            record(3, [6, 10, 13, 21, 36, 42]),
        ];
        let a = analyze(&records).unwrap();
        let b = analyze(&records).unwrap();
        assert_eq!(a.top_10, b.top_10);
        assert_eq!(a.total_records, b.total_records);
    }
}
