//! Kanji Match core crate.
//!
//! A flashcard game: kanji on the left, their meanings shuffled on the right,
//! the player pairs them up a page at a time. The game logic (loading,
//! pagination, the pairing state machine and scoring) is plain Rust and runs
//! natively under `cargo test`; the `web` module is the browser adapter exposed
//! through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod item;
pub mod loader;
pub mod pagination;
pub mod scoring;
pub mod session;
pub mod web;

pub use controller::{Controller, Presenter};
pub use item::{FALLBACK_ITEMS, Item, dedupe_by_kanji, fallback_items};
pub use loader::{HttpSource, LevelSelector, LoadError, PartitionSource, load, load_or_fallback};
pub use pagination::{PageItem, page_count, paginate};
pub use scoring::{CheckSummary, PairResult, Score, score};
pub use session::{Feedback, PairMap, PairingState, Session};
pub use web::start_game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("kanji-match {} ready", env!("CARGO_PKG_VERSION"));
}
