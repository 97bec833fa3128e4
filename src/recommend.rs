//! Budget-based number recommendation.
//!
//! Deliberately naive: one line per 1000 won of budget, each line six
//! distinct numbers drawn uniformly from 1..=45 and sorted. Lines are
//! independent; repeats across lines are allowed.

use rand::seq::index;
use serde::Serialize;

use crate::store::LOTTO_MAX;

/// Won per line of play.
pub const LINE_PRICE: u64 = 1000;

const NUMBERS_PER_LINE: usize = 6;

/// Recommendation for a given budget.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub budget: u64,
    pub lines: u64,
    pub results: Vec<Vec<u8>>,
}

/// Produce `budget / 1000` random lines, or None when the budget does not
/// cover a single line.
pub fn recommend(budget: u64) -> Option<Recommendation> {
    let lines = budget / LINE_PRICE;
    if lines == 0 {
        return None;
    }

    let mut rng = rand::rng();
    let results = (0..lines)
        .map(|_| {
            let mut line: Vec<u8> = index::sample(&mut rng, LOTTO_MAX as usize, NUMBERS_PER_LINE)
                .iter()
                .map(|i| i as u8 + 1)
                .collect();
            line.sort_unstable();
            line
        })
        .collect();

    Some(Recommendation {
        budget,
        lines,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_below_one_line_is_rejected() {
        assert!(recommend(0).is_none());
        assert!(recommend(999).is_none());
    }

    #[test]
    fn line_count_is_budget_over_price() {
        assert_eq!(recommend(1000).unwrap().lines, 1);
        assert_eq!(recommend(2500).unwrap().lines, 2);
        assert_eq!(recommend(10_000).unwrap().lines, 10);
    }

    #[test]
    fn lines_are_sorted_distinct_and_in_range() {
        let rec = recommend(50_000).unwrap();
        assert_eq!(rec.results.len(), 50);
        for line in &rec.results {
            assert_eq!(line.len(), 6);
            assert!(line.windows(2).all(|w| w[0] < w[1]), "not strictly ascending: {line:?}");
            assert!(line.iter().all(|&n| (1..=45).contains(&n)));
        }
    }
}
