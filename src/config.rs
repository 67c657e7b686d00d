//! Compile-time game settings. There is no runtime configuration; the page-size
//! and level selectors in the host page are the only knobs.

/// Items per page when nothing else has been chosen.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Used when the page-size selector reports something that is not a positive number.
pub const FALLBACK_PAGE_SIZE: usize = 30;

/// Pages this small get the `compact` body class.
pub const COMPACT_PAGE_SIZE: usize = 10;

/// Level partitions merged (in this order) when the selector is "all".
pub const PARTITIONS: [&str; 5] = ["n1", "n2", "n3", "n4", "n5"];

/// Directory (relative to the page) holding `<partition>.json` files.
pub const DATA_DIR: &str = "data";

/// Parse the page-size selector value. Anything non-numeric or zero maps to
/// [`FALLBACK_PAGE_SIZE`].
pub fn parse_page_size(raw: &str) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => FALLBACK_PAGE_SIZE,
    }
}
