//! Page slicing and the shuffled right-hand column.

use crate::item::Item;
use rand::Rng;

/// An item placed on a page. `id` is the item's absolute index in the full
/// collection; it is attached once at slice time and identifies the item in
/// both columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub id: usize,
    pub item: Item,
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

pub fn has_prev(page_index: usize) -> bool {
    page_index > 0
}

pub fn has_next(page_index: usize, page_size: usize, len: usize) -> bool {
    (page_index + 1).saturating_mul(page_size) < len
}

pub fn page_label(page_index: usize, page_size: usize, len: usize) -> String {
    format!("Page {} / {}", page_index + 1, page_count(len, page_size))
}

/// Items `[page_index * page_size, page_index * page_size + page_size)`, clamped
/// to the collection, tagged with their absolute index.
pub fn slice_page(items: &[Item], page_index: usize, page_size: usize) -> Vec<PageItem> {
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    items[start..end]
        .iter()
        .enumerate()
        .map(|(offset, item)| PageItem { id: start + offset, item: item.clone() })
        .collect()
}

/// In-place Fisher–Yates.
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// Left column in collection order and an independently shuffled right column
/// holding the same ids.
pub fn paginate<R: Rng>(
    items: &[Item],
    page_index: usize,
    page_size: usize,
    rng: &mut R,
) -> (Vec<PageItem>, Vec<PageItem>) {
    let left = slice_page(items, page_index, page_size);
    let mut right = left.clone();
    shuffle(&mut right, rng);
    (left, right)
}
