//! DOM presenter: redraws both columns, the pair list, score and page label from
//! a session snapshot.

use super::effects;
use crate::config::COMPACT_PAGE_SIZE;
use crate::controller::Presenter;
use crate::item::Item;
use crate::scoring::{CheckSummary, kanji_label, meaning_label};
use crate::session::{Feedback, Session};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

// Header, bottom panels and margins the lists must leave room for.
const FOOTER_GAP_PX: f64 = 24.0;
const PANELS_PX: f64 = 160.0;
const MIN_LIST_PX: f64 = 120.0;

/// Hover text for a kanji: reading and Vietnamese gloss, when present.
pub fn tooltip(item: &Item) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(reading) = item.reading.as_deref().filter(|r| !r.is_empty()) {
        parts.push(format!("Đọc: {}", reading));
    }
    if let Some(vn) = item.vn.as_deref().filter(|v| !v.is_empty()) {
        parts.push(vn.to_string());
    }
    if parts.is_empty() { None } else { Some(parts.join(" — ")) }
}

pub fn list_max_height(viewport_h: f64, header_h: f64) -> f64 {
    (viewport_h - header_h - FOOTER_GAP_PX - PANELS_PX).max(MIN_LIST_PX)
}

pub struct DomPresenter {
    doc: Document,
}

impl DomPresenter {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    fn by_id(&self, id: &str) -> Result<Element, JsValue> {
        self.doc
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
    }

    fn div(&self, class: &str) -> Result<Element, JsValue> {
        let el = self.doc.create_element("div")?;
        el.set_class_name(class);
        Ok(el)
    }

    fn text_div(&self, class: &str, text: &str) -> Result<Element, JsValue> {
        let el = self.div(class)?;
        el.set_text_content(Some(text));
        Ok(el)
    }

    fn try_render(&self, session: &Session) -> Result<(), JsValue> {
        self.render_left(session)?;
        self.render_right(session)?;
        self.render_pairs(session)?;
        self.by_id("score")?
            .set_text_content(Some(&session.score().to_string()));
        self.by_id("pageInfo")?
            .set_text_content(Some(&session.page_label()));
        self.set_compact_mode(session.page_size() == COMPACT_PAGE_SIZE);
        fit_lists_to_viewport(&self.doc)
    }

    fn render_left(&self, session: &Session) -> Result<(), JsValue> {
        let list = self.by_id("leftList")?;
        list.set_inner_html("");
        for entry in session.left() {
            let node = self.div("item kanji")?;
            node.set_attribute("data-id", &entry.id.to_string())?;
            node.set_attribute("tabindex", "0")?;
            if let Some(title) = tooltip(&entry.item) {
                node.set_attribute("title", &title)?;
            }
            if session.pending_left() == Some(entry.id) {
                node.class_list().add_1("selected")?;
            }
            if session.is_left_disabled(entry.id) {
                node.class_list().add_1("disabled")?;
            }

            let main = self.div("kanji-main")?;
            main.set_text_content(Some(&format!("{}  ", entry.item.kanji)));
            let reading = self.doc.create_element("span")?;
            reading.set_class_name("reading-text");
            reading.set_text_content(Some(&format!("({})", entry.item.reading_text())));
            main.append_child(&reading)?;
            node.append_child(&main)?;
            list.append_child(&node)?;
        }
        Ok(())
    }

    fn render_right(&self, session: &Session) -> Result<(), JsValue> {
        let list = self.by_id("rightList")?;
        list.set_inner_html("");
        for entry in session.right() {
            let node = self.div("item")?;
            node.set_attribute("data-id", &entry.id.to_string())?;
            node.set_attribute("tabindex", "0")?;
            if session.pending_right() == Some(entry.id) {
                node.class_list().add_1("selected")?;
            }
            if session.is_right_disabled(entry.id) {
                node.class_list().add_1("disabled")?;
            }
            let meaning = self.text_div("meaning-text", entry.item.meaning_text())?;
            node.append_child(&meaning)?;
            if let Some(vn) = entry.item.vn.as_deref() {
                let gloss = self.text_div("subtextvn", vn)?;
                node.append_child(&gloss)?;
            }
            list.append_child(&node)?;
        }
        Ok(())
    }

    fn render_pairs(&self, session: &Session) -> Result<(), JsValue> {
        let container = self.by_id("pairs")?;
        container.set_inner_html("");
        for (left, right) in session.pairs().iter() {
            let row = self.div("pair")?;
            let kanji = self.text_div("pair-kanji", &kanji_label(session.items(), left))?;
            let meaning = self.text_div("pair-meaning", &meaning_label(session.items(), right))?;
            row.append_child(&kanji)?;
            row.append_child(&meaning)?;
            let remove = self.text_div("remove", "✖")?;
            remove.set_attribute("title", "remove")?;
            remove.set_attribute("data-left", &left.to_string())?;
            row.append_child(&remove)?;
            container.append_child(&row)?;
        }
        Ok(())
    }

    fn try_show_summary(&self, summary: &CheckSummary) -> Result<(), JsValue> {
        let container = self.by_id("pairs")?;
        container.set_inner_html("");
        for result in &summary.results {
            let row = self.div("pair")?;
            let verdict_class = if result.correct { "pair-kanji result-correct" } else { "pair-kanji result-wrong" };
            let kanji = self.text_div(verdict_class, &result.kanji)?;
            let meaning = self.text_div("pair-meaning", &result.meaning)?;
            let verdict = self.text_div("verdict", if result.correct { "✅" } else { "❌" })?;
            row.append_child(&kanji)?;
            row.append_child(&meaning)?;
            row.append_child(&verdict)?;
            container.append_child(&row)?;
        }
        self.by_id("score")?
            .set_text_content(Some(&summary.score.to_string()));
        Ok(())
    }

    fn set_compact_mode(&self, compact: bool) {
        if let Some(body) = self.doc.body() {
            let _ = body.class_list().toggle_with_force("compact", compact);
        }
    }
}

impl Presenter for DomPresenter {
    fn render(&mut self, session: &Session) {
        if let Err(e) = self.try_render(session) {
            log::error!("render failed: {:?}", e);
        }
    }

    fn feedback(&mut self, event: Feedback) {
        effects::play(event);
    }

    fn show_summary(&mut self, summary: &CheckSummary) {
        if let Err(e) = self.try_show_summary(summary) {
            log::error!("summary render failed: {:?}", e);
        }
    }
}

/// Cap list height so the page itself does not scroll.
pub fn fit_lists_to_viewport(doc: &Document) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let viewport_h = win.inner_height()?.as_f64().unwrap_or(0.0);
    let header_h = doc
        .query_selector("header")?
        .map(|h| h.get_bounding_client_rect().height())
        .unwrap_or(0.0);
    let available = list_max_height(viewport_h, header_h);
    let lists = doc.query_selector_all(".list")?;
    for i in 0..lists.length() {
        if let Some(el) = lists.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            el.style()
                .set_property("max-height", &format!("{}px", available))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_joins_reading_and_gloss() {
        let item = Item::new("日", "day").with_reading("にち").with_vn("nhật");
        assert_eq!(tooltip(&item).as_deref(), Some("Đọc: にち — nhật"));
        let bare = Item::new("月", "month");
        assert_eq!(tooltip(&bare), None);
        let vn_only = Item::new("火", "fire").with_vn("hỏa");
        assert_eq!(tooltip(&vn_only).as_deref(), Some("hỏa"));
    }

    #[test]
    fn dom_presenter_plugs_into_controller() {
        fn assert_presenter<P: Presenter>() {}
        assert_presenter::<DomPresenter>();
        let _ctor: fn(Session, DomPresenter) -> crate::controller::Controller<DomPresenter> =
            crate::controller::Controller::new;
        let _fit: fn(&Document) -> Result<(), JsValue> = fit_lists_to_viewport;
    }

    #[test]
    fn list_height_has_a_floor() {
        assert_eq!(list_max_height(1000.0, 100.0), 716.0);
        assert_eq!(list_max_height(300.0, 100.0), MIN_LIST_PX);
    }
}
