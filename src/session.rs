//! The pairing state machine. A `Session` owns the loaded collection, the
//! current page, the pending selection on each side and the committed pairs.
//! The UI calls the public methods; it never mutates state directly.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::item::Item;
use crate::pagination::{self, PageItem};
use crate::scoring::{self, CheckSummary, Score};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Outcome events for the presentation layer (tones, confetti).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
    PerfectPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    Idle,
    LeftPending(usize),
    RightPending(usize),
}

/// Left id -> right id, in commit order. Overwriting a left id keeps its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMap {
    entries: Vec<(usize, usize)>,
}

impl PairMap {
    /// Returns the right id previously paired with `left`, if any.
    pub fn insert(&mut self, left: usize, right: usize) -> Option<usize> {
        match self.entries.iter_mut().find(|(l, _)| *l == left) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, right)),
            None => {
                self.entries.push((left, right));
                None
            }
        }
    }

    pub fn remove(&mut self, left: usize) -> Option<usize> {
        let pos = self.entries.iter().position(|(l, _)| *l == left)?;
        Some(self.entries.remove(pos).1)
    }

    #[cfg(test)]
    pub fn get(&self, left: usize) -> Option<usize> {
        self.entries.iter().find(|(l, _)| *l == left).map(|(_, r)| *r)
    }

    pub fn contains_left(&self, left: usize) -> bool {
        self.entries.iter().any(|(l, _)| *l == left)
    }

    pub fn contains_right(&self, right: usize) -> bool {
        self.entries.iter().any(|(_, r)| *r == right)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub struct Session {
    items: Vec<Item>,
    page_index: usize,
    page_size: usize,
    left: Vec<PageItem>,
    right: Vec<PageItem>,
    pending_left: Option<usize>,
    pending_right: Option<usize>,
    pairs: PairMap,
    rng: StdRng,
}

impl Session {
    pub fn new(items: Vec<Item>, page_size: usize) -> Self {
        Self::with_rng(items, page_size, StdRng::from_entropy())
    }

    pub fn with_rng(items: Vec<Item>, page_size: usize, rng: StdRng) -> Self {
        let mut session = Self {
            items,
            page_index: 0,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            left: Vec::new(),
            right: Vec::new(),
            pending_left: None,
            pending_right: None,
            pairs: PairMap::default(),
            rng,
        };
        session.repaginate();
        session
    }

    // --- Snapshot accessors ---------------------------------------------------

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: usize) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn left(&self) -> &[PageItem] {
        &self.left
    }

    pub fn right(&self) -> &[PageItem] {
        &self.right
    }

    pub fn pairs(&self) -> &PairMap {
        &self.pairs
    }

    pub fn pending_left(&self) -> Option<usize> {
        self.pending_left
    }

    pub fn pending_right(&self) -> Option<usize> {
        self.pending_right
    }

    pub fn state(&self) -> PairingState {
        match (self.pending_left, self.pending_right) {
            (Some(id), None) => PairingState::LeftPending(id),
            (None, Some(id)) => PairingState::RightPending(id),
            // Both pending never survives a call; attempt_pair commits it.
            _ => PairingState::Idle,
        }
    }

    pub fn is_left_disabled(&self, id: usize) -> bool {
        self.pairs.contains_left(id)
    }

    pub fn is_right_disabled(&self, id: usize) -> bool {
        self.pairs.contains_right(id)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.items.len(), self.page_size)
    }

    pub fn page_label(&self) -> String {
        pagination::page_label(self.page_index, self.page_size, self.items.len())
    }

    pub fn score(&self) -> Score {
        scoring::score(&self.pairs)
    }

    pub fn check_all(&self) -> CheckSummary {
        scoring::check_all(&self.pairs, &self.items)
    }

    // --- Selection and pairing ------------------------------------------------

    /// Pick a kanji. Ignored for committed or off-page ids. Commits when a
    /// meaning is already pending.
    pub fn select_left(&mut self, id: usize) -> Option<Feedback> {
        if !self.left.iter().any(|p| p.id == id) || self.is_left_disabled(id) {
            return None;
        }
        self.pending_left = Some(id);
        self.attempt_pair()
    }

    /// Pick a meaning. Ignored for committed or off-page ids. Commits when a
    /// kanji is already pending.
    pub fn select_right(&mut self, id: usize) -> Option<Feedback> {
        if !self.right.iter().any(|p| p.id == id) || self.is_right_disabled(id) {
            return None;
        }
        self.pending_right = Some(id);
        self.attempt_pair()
    }

    /// Commits the pending pair when both sides are chosen.
    pub fn attempt_pair(&mut self) -> Option<Feedback> {
        let (Some(left), Some(right)) = (self.pending_left, self.pending_right) else {
            return None;
        };
        self.pending_left = None;
        self.pending_right = None;
        Some(self.pair(left, right))
    }

    /// Record `left -> right`. An existing pair for `left` is overwritten and
    /// its old right id becomes selectable again.
    pub fn pair(&mut self, left: usize, right: usize) -> Feedback {
        if let Some(previous) = self.pairs.insert(left, right) {
            log::debug!("re-paired {}: right {} -> {}", left, previous, right);
        }
        if scoring::is_correct(left, right) {
            log::debug!("pair ({}, {}) correct", left, right);
            Feedback::Correct
        } else {
            log::debug!("pair ({}, {}) incorrect", left, right);
            Feedback::Incorrect
        }
    }

    /// Undo a pair. Both items become selectable again.
    pub fn remove_pair(&mut self, left: usize) -> bool {
        self.pairs.remove(left).is_some()
    }

    pub fn reset(&mut self) {
        self.pairs.clear();
        self.pending_left = None;
        self.pending_right = None;
    }

    // --- Paging ---------------------------------------------------------------

    /// New collection (level change): back to the first page.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.page_index = 0;
        self.repaginate();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        self.page_index = 0;
        self.repaginate();
    }

    pub fn next_page(&mut self) -> bool {
        if !pagination::has_next(self.page_index, self.page_size, self.items.len()) {
            return false;
        }
        self.page_index += 1;
        self.repaginate();
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !pagination::has_prev(self.page_index) {
            return false;
        }
        self.page_index -= 1;
        self.repaginate();
        true
    }

    /// Reorder both columns of the current page and start over on it.
    pub fn shuffle(&mut self) {
        pagination::shuffle(&mut self.left, &mut self.rng);
        pagination::shuffle(&mut self.right, &mut self.rng);
        self.reset();
    }

    fn repaginate(&mut self) {
        let (left, right) =
            pagination::paginate(&self.items, self.page_index, self.page_size, &mut self.rng);
        self.left = left;
        self.right = right;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(items: Vec<Item>, page_size: usize) -> Session {
        Session::with_rng(items, page_size, StdRng::seed_from_u64(42))
    }

    fn three() -> Vec<Item> {
        vec![Item::new("日", "day"), Item::new("月", "month"), Item::new("火", "fire")]
    }

    #[test]
    fn pair_map_overwrite_keeps_slot() {
        let mut map = PairMap::default();
        assert_eq!(map.insert(3, 1), None);
        assert_eq!(map.insert(5, 5), None);
        assert_eq!(map.insert(3, 3), Some(1));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(3, 3), (5, 5)]);
        assert!(!map.contains_right(1));
        assert_eq!(map.remove(3), Some(3));
        assert_eq!(map.remove(3), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn state_transitions() {
        let mut s = seeded(three(), 10);
        assert_eq!(s.state(), PairingState::Idle);
        assert_eq!(s.select_left(1), None);
        assert_eq!(s.state(), PairingState::LeftPending(1));
        // A second left pick replaces the first.
        assert_eq!(s.select_left(2), None);
        assert_eq!(s.state(), PairingState::LeftPending(2));
        assert_eq!(s.select_right(2), Some(Feedback::Correct));
        assert_eq!(s.state(), PairingState::Idle);

        assert_eq!(s.select_right(0), None);
        assert_eq!(s.state(), PairingState::RightPending(0));
        assert_eq!(s.select_left(1), Some(Feedback::Incorrect));
        assert_eq!(s.state(), PairingState::Idle);
    }

    #[test]
    fn committed_items_are_disabled() {
        let mut s = seeded(three(), 10);
        s.select_left(0);
        s.select_right(1);
        assert!(s.is_left_disabled(0));
        assert!(s.is_right_disabled(1));
        assert_eq!(s.select_left(0), None);
        assert_eq!(s.pending_left(), None);
        assert_eq!(s.select_right(1), None);
        assert_eq!(s.pending_right(), None);
    }

    #[test]
    fn off_page_ids_are_ignored() {
        let items: Vec<Item> = (0..15).map(|i| Item::new(&format!("k{}", i), "m")).collect();
        let mut s = seeded(items, 10);
        assert_eq!(s.select_left(12), None);
        assert_eq!(s.pending_left(), None);
        assert!(s.next_page());
        s.select_left(12);
        assert_eq!(s.pending_left(), Some(12));
    }

    #[test]
    fn overwrite_frees_previous_right() {
        let mut s = seeded(three(), 10);
        assert_eq!(s.pair(0, 1), Feedback::Incorrect);
        assert!(s.is_right_disabled(1));
        assert_eq!(s.pair(0, 0), Feedback::Correct);
        assert_eq!(s.pairs().len(), 1);
        assert_eq!(s.pairs().get(0), Some(0));
        assert!(!s.is_right_disabled(1));
        assert_eq!(s.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn remove_pair_reenables_both_sides() {
        let mut s = seeded(three(), 10);
        s.select_left(1);
        s.select_right(2);
        assert!(s.remove_pair(1));
        assert!(!s.is_left_disabled(1));
        assert!(!s.is_right_disabled(2));
        assert!(!s.remove_pair(1));
        assert_eq!(s.select_left(1), None);
        assert_eq!(s.select_right(1), Some(Feedback::Correct));
    }

    #[test]
    fn paging_bounds_and_reset() {
        let items: Vec<Item> = (0..25).map(|i| Item::new(&format!("k{}", i), "m")).collect();
        let mut s = seeded(items, 10);
        assert_eq!(s.page_count(), 3);
        assert!(!s.prev_page());
        s.pair(0, 0);
        assert!(s.next_page());
        assert!(s.pairs().is_empty());
        assert!(s.next_page());
        assert_eq!(s.page_index(), 2);
        assert_eq!(s.left().len(), 5);
        assert!(!s.next_page());
        assert_eq!(s.page_label(), "Page 3 / 3");
        assert!(s.prev_page());
        assert_eq!(s.left()[0].id, 10);
    }

    #[test]
    fn shuffle_keeps_page_and_resets() {
        let items: Vec<Item> = (0..20).map(|i| Item::new(&format!("k{}", i), "m")).collect();
        let mut s = seeded(items, 10);
        s.next_page();
        s.select_left(11);
        s.pair(10, 10);
        s.shuffle();
        assert!(s.pairs().is_empty());
        assert_eq!(s.state(), PairingState::Idle);
        let mut left: Vec<usize> = s.left().iter().map(|p| p.id).collect();
        let mut right: Vec<usize> = s.right().iter().map(|p| p.id).collect();
        left.sort_unstable();
        right.sort_unstable();
        assert_eq!(left, (10..20).collect::<Vec<_>>());
        assert_eq!(right, left);
    }

    #[test]
    fn page_size_and_items_changes_reset() {
        let mut s = seeded(three(), 10);
        s.pair(0, 0);
        s.set_page_size(30);
        assert_eq!(s.page_size(), 30);
        assert_eq!(s.score(), Score::default());
        s.pair(1, 1);
        s.set_items(vec![Item::new("水", "water")]);
        assert!(s.pairs().is_empty());
        assert_eq!(s.left().len(), 1);
        assert_eq!(s.item(0).map(|i| i.kanji.as_str()), Some("水"));
    }

    #[test]
    fn zero_page_size_uses_default() {
        let s = seeded(three(), 0);
        assert_eq!(s.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let mut s = seeded(Vec::new(), 10);
        assert_eq!(s.page_count(), 1);
        assert!(s.left().is_empty());
        assert!(!s.next_page());
        assert_eq!(s.select_left(0), None);
    }
}
