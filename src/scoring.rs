//! Score derivation. Nothing here is stored: every number is recomputed from the
//! current pair map.

use crate::item::Item;
use crate::session::PairMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Every committed pair is right, and there is at least one.
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}

/// A left id and a right id are the same item exactly when they match.
pub fn is_correct(left: usize, right: usize) -> bool {
    left == right
}

pub fn score(pairs: &PairMap) -> Score {
    pairs.iter().fold(Score::default(), |mut acc, (left, right)| {
        acc.total += 1;
        if is_correct(left, right) {
            acc.correct += 1;
        }
        acc
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairResult {
    pub left: usize,
    pub right: usize,
    pub kanji: String,
    pub meaning: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub results: Vec<PairResult>,
    pub score: Score,
}

impl CheckSummary {
    pub fn is_perfect(&self) -> bool {
        self.score.is_perfect()
    }
}

/// Per-pair verdicts in commit order, with display text resolved through the
/// full collection ("?" when an id or field is missing).
pub fn check_all(pairs: &PairMap, items: &[Item]) -> CheckSummary {
    let results = pairs
        .iter()
        .map(|(left, right)| PairResult {
            left,
            right,
            kanji: kanji_label(items, left),
            meaning: meaning_label(items, right),
            correct: is_correct(left, right),
        })
        .collect();
    CheckSummary { results, score: score(pairs) }
}

pub(crate) fn kanji_label(items: &[Item], id: usize) -> String {
    items
        .get(id)
        .and_then(|i| i.key())
        .unwrap_or("?")
        .to_string()
}

pub(crate) fn meaning_label(items: &[Item], id: usize) -> String {
    items
        .get(id)
        .and_then(|i| i.meaning.as_deref())
        .filter(|m| !m.is_empty())
        .unwrap_or("?")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(usize, usize)]) -> PairMap {
        let mut map = PairMap::default();
        for &(l, r) in entries {
            map.insert(l, r);
        }
        map
    }

    #[test]
    fn empty_map_scores_zero() {
        let s = score(&PairMap::default());
        assert_eq!(s, Score { correct: 0, total: 0 });
        assert!(!s.is_perfect());
        assert_eq!(s.to_string(), "0 / 0");
    }

    #[test]
    fn counts_matching_ids() {
        let s = score(&pairs(&[(0, 0), (1, 2), (2, 1), (3, 3)]));
        assert_eq!(s, Score { correct: 2, total: 4 });
        assert_eq!(s.to_string(), "2 / 4");
    }

    #[test]
    fn perfect_iff_all_pairs_match() {
        assert!(score(&pairs(&[(0, 0), (5, 5)])).is_perfect());
        assert!(!score(&pairs(&[(0, 0), (5, 4)])).is_perfect());
    }

    #[test]
    fn check_all_resolves_labels() {
        let items = vec![Item::new("日", "day"), Item::new("月", "month"), Item { kanji: "火".into(), ..Item::default() }];
        let summary = check_all(&pairs(&[(0, 0), (1, 2), (2, 1)]), &items);
        assert_eq!(summary.score, Score { correct: 1, total: 3 });
        assert_eq!(summary.results[0].kanji, "日");
        assert_eq!(summary.results[0].meaning, "day");
        assert!(summary.results[0].correct);
        assert_eq!(summary.results[1].meaning, "?");
        assert!(!summary.results[1].correct);
        assert_eq!(summary.results[2].kanji, "火");
        assert_eq!(summary.results[2].meaning, "month");
        assert!(!summary.is_perfect());
    }

    #[test]
    fn check_all_unknown_ids() {
        let summary = check_all(&pairs(&[(9, 9)]), &[]);
        assert_eq!(summary.results[0].kanji, "?");
        assert_eq!(summary.results[0].meaning, "?");
        assert!(summary.is_perfect());
    }
}
