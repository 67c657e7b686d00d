//! Browser front end. Wires the host page's controls to a [`Controller`] kept in
//! thread-local state and renders through [`DomPresenter`].
//!
//! Expected element ids: `levelSel`, `pageSizeSel`, `prevBtn`, `nextBtn`,
//! `shuffleBtn`, `checkBtn`, `leftList`, `rightList`, `pairs`, `score`,
//! `pageInfo` and `confetti`. Missing optional controls are skipped.

mod effects;
mod render;

pub use effects::{Effect, effect_for};
pub use render::{DomPresenter, list_max_height, tooltip};

use crate::config::{DEFAULT_PAGE_SIZE, parse_page_size};
use crate::controller::Controller;
use crate::item::Item;
use crate::loader::{HttpSource, LevelSelector, load_or_fallback};
use crate::session::Session;
use std::cell::{Cell, RefCell};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlSelectElement, window};

thread_local! {
    static CONTROLLER: RefCell<Option<Controller<DomPresenter>>> = const { RefCell::new(None) };
    static WIRED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the live controller. Events that arrive before the first
/// load finishes are dropped.
fn with_controller<F: FnOnce(&mut Controller<DomPresenter>)>(f: F) {
    CONTROLLER.with(|cell| {
        if let Some(controller) = cell.borrow_mut().as_mut() {
            f(controller);
        }
    });
}

fn document() -> Result<Document, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn select_value(doc: &Document, id: &str) -> Option<String> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|sel| sel.value())
}

/// Load the level currently shown in the selector, then mount the board.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let doc = document()?;
    let selector = LevelSelector::parse(&select_value(&doc, "levelSel").unwrap_or_default());
    spawn_local(async move {
        let items = load_or_fallback(&HttpSource, &selector).await;
        if let Err(e) = mount(items) {
            log::error!("could not start game: {:?}", e);
        }
    });
    Ok(())
}

/// Install a session over `items`, wire the page controls (once) and render.
pub fn mount(items: Vec<Item>) -> Result<(), JsValue> {
    let doc = document()?;
    let page_size = select_value(&doc, "pageSizeSel")
        .map(|v| parse_page_size(&v))
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let controller = Controller::new(Session::new(items, page_size), DomPresenter::new(doc.clone()));
    CONTROLLER.with(|cell| cell.replace(Some(controller)));

    if !WIRED.with(|w| w.replace(true)) {
        wire_controls(&doc)?;
    }
    with_controller(|c| c.render());
    Ok(())
}

fn on(target: &Element, event: &str, handler: impl FnMut(web_sys::Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_click(doc: &Document, id: &str, mut action: impl FnMut(&mut Controller<DomPresenter>) + 'static) -> Result<(), JsValue> {
    match doc.get_element_by_id(id) {
        Some(el) => on(&el, "click", move |_evt| with_controller(|c| action(c))),
        None => {
            log::warn!("control #{} not found", id);
            Ok(())
        }
    }
}

/// `data-*` id of the element (or ancestor) an event landed on.
fn clicked_id(evt: &web_sys::Event, selector: &str, attr: &str) -> Option<usize> {
    let target = evt.target()?.dyn_into::<Element>().ok()?;
    let node = target.closest(selector).ok()??;
    node.get_attribute(attr)?.parse().ok()
}

fn wire_controls(doc: &Document) -> Result<(), JsValue> {
    // Item clicks are delegated to the list containers since their children
    // are rebuilt on every render.
    if let Some(left) = doc.get_element_by_id("leftList") {
        on(&left, "click", |evt| {
            if let Some(id) = clicked_id(&evt, ".item", "data-id") {
                with_controller(|c| c.select_left(id));
            }
        })?;
    }
    if let Some(right) = doc.get_element_by_id("rightList") {
        on(&right, "click", |evt| {
            if let Some(id) = clicked_id(&evt, ".item", "data-id") {
                with_controller(|c| c.select_right(id));
            }
        })?;
    }
    if let Some(pairs) = doc.get_element_by_id("pairs") {
        on(&pairs, "click", |evt| {
            if let Some(left) = clicked_id(&evt, ".remove", "data-left") {
                with_controller(|c| c.remove_pair(left));
            }
        })?;
    }

    on_click(doc, "prevBtn", |c| c.prev_page())?;
    on_click(doc, "nextBtn", |c| c.next_page())?;
    on_click(doc, "shuffleBtn", |c| c.shuffle())?;
    on_click(doc, "checkBtn", |c| {
        c.check_all();
    })?;

    if let Some(sel) = doc.get_element_by_id("pageSizeSel") {
        let sel_ref = sel.clone();
        on(&sel, "change", move |_evt| {
            let value = sel_ref
                .dyn_ref::<HtmlSelectElement>()
                .map(|s| s.value())
                .unwrap_or_default();
            let size = parse_page_size(&value);
            with_controller(|c| c.set_page_size(size));
        })?;
    }

    if let Some(sel) = doc.get_element_by_id("levelSel") {
        let sel_ref = sel.clone();
        on(&sel, "change", move |_evt| {
            let value = sel_ref
                .dyn_ref::<HtmlSelectElement>()
                .map(|s| s.value())
                .unwrap_or_default();
            let selector = LevelSelector::parse(&value);
            log::info!("level changed to {}", selector);
            spawn_local(async move {
                let items = load_or_fallback(&HttpSource, &selector).await;
                with_controller(|c| c.load_level(items));
            });
        })?;
    }

    if let Some(win) = window() {
        let doc_resize = doc.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Err(e) = render::fit_lists_to_viewport(&doc_resize) {
                log::debug!("resize fit failed: {:?}", e);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
