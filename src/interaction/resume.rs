//! Resume button.
//!
//! A click on `#downloadResume` shows a busy label, hands the document to the
//! browser (download or print, per [`ResumeMode`]) and restores the label
//! after a short delay.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{ResumeConfig, ResumeMode};
use crate::host::{EventKind, EventTarget, Host, NodeId, Page, Scheduler};

/// Binds the resume action. Returns `false` when the page has no button.
pub fn bind(host: &Host, config: &ResumeConfig) -> bool {
    let Some(button) = host.page.by_id("downloadResume") else {
        return false;
    };

    let action = ResumeAction {
        page: Rc::clone(&host.page),
        scheduler: Rc::clone(&host.scheduler),
        button,
        config: config.clone(),
        saved_label: Rc::new(RefCell::new(None)),
    };
    host.events.listen(
        EventTarget::Node(button),
        EventKind::Click,
        Box::new(move |event| {
            event.prevent_default();
            action.run();
        }),
    );
    true
}

struct ResumeAction {
    page: Rc<dyn Page>,
    scheduler: Rc<dyn Scheduler>,
    button: NodeId,
    config: ResumeConfig,
    // Label to restore; set while a restore is pending
    saved_label: Rc<RefCell<Option<String>>>,
}

impl ResumeAction {
    fn run(&self) {
        {
            let mut saved = self.saved_label.borrow_mut();
            if saved.is_none() {
                *saved = Some(self.page.text(self.button).unwrap_or_default());
            }
        }
        self.page.set_text(self.button, self.config.busy_label());

        match self.config.mode {
            ResumeMode::Download => {
                tracing::info!("Downloading resume from {}", self.config.href);
                self.page.download(&self.config.href, &self.config.file_name);
            }
            ResumeMode::Print => {
                tracing::info!("Opening print dialog for resume");
                self.page.print();
            }
        }

        let page = Rc::clone(&self.page);
        let saved = Rc::clone(&self.saved_label);
        let button = self.button;
        self.scheduler.set_timeout(
            self.config.restore_ms,
            Box::new(move || {
                if let Some(label) = saved.borrow_mut().take() {
                    page.set_text(button, &label);
                }
            }),
        );
    }
}
