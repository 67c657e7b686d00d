//! Glue between user events and the session: every control in the page maps to
//! one method here, and each method ends by calling back into the presenter.

use crate::item::Item;
use crate::scoring::CheckSummary;
use crate::session::{Feedback, Session};

/// Presentation hooks. Implementations read the session snapshot; they never
/// mutate it.
pub trait Presenter {
    fn render(&mut self, session: &Session);
    fn feedback(&mut self, event: Feedback);
    /// Per-pair verdicts from the "check" control.
    fn show_summary(&mut self, summary: &CheckSummary);
}

pub struct Controller<P: Presenter> {
    session: Session,
    presenter: P,
}

impl<P: Presenter> Controller<P> {
    pub fn new(session: Session, presenter: P) -> Self {
        Self { session, presenter }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn render(&mut self) {
        self.presenter.render(&self.session);
    }

    /// Level change: swap in the freshly loaded collection.
    pub fn load_level(&mut self, items: Vec<Item>) {
        self.session.set_items(items);
        self.render();
    }

    pub fn select_left(&mut self, id: usize) {
        let outcome = self.session.select_left(id);
        self.after_select(outcome);
    }

    pub fn select_right(&mut self, id: usize) {
        let outcome = self.session.select_right(id);
        self.after_select(outcome);
    }

    fn after_select(&mut self, outcome: Option<Feedback>) {
        self.render();
        if let Some(event) = outcome {
            self.presenter.feedback(event);
        }
    }

    pub fn remove_pair(&mut self, left: usize) {
        if self.session.remove_pair(left) {
            self.render();
        }
    }

    pub fn next_page(&mut self) {
        if self.session.next_page() {
            self.render();
        }
    }

    pub fn prev_page(&mut self) {
        if self.session.prev_page() {
            self.render();
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.session.set_page_size(page_size);
        self.render();
    }

    pub fn shuffle(&mut self) {
        self.session.shuffle();
        self.render();
    }

    pub fn check_all(&mut self) -> CheckSummary {
        let summary = self.session.check_all();
        self.presenter.show_summary(&summary);
        if summary.is_perfect() {
            self.presenter.feedback(Feedback::PerfectPage);
        }
        summary
    }
}
