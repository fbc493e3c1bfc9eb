//! Typewriter effect for the hero subtitle.

use std::cell::Cell;
use std::rc::Rc;

use crate::host::{Host, NodeId, Page, Scheduler};

struct Typing {
    page: Rc<dyn Page>,
    scheduler: Rc<dyn Scheduler>,
    node: NodeId,
    chars: Vec<char>,
    typed: Cell<usize>,
    interval_ms: u32,
}

/// Clears `.hero-subtitle` and retypes its text one character per
/// `interval_ms`, starting after `delay_ms`.
///
/// Returns `false` when there is no subtitle.
pub fn start(host: &Host, delay_ms: u32, interval_ms: u32) -> bool {
    let Some(node) = host.page.select_first(".hero-subtitle") else {
        return false;
    };
    let text = host.page.text(node).unwrap_or_default();
    host.page.set_text(node, "");

    let typing = Rc::new(Typing {
        page: Rc::clone(&host.page),
        scheduler: Rc::clone(&host.scheduler),
        node,
        chars: text.chars().collect(),
        typed: Cell::new(0),
        interval_ms,
    });
    host.scheduler
        .set_timeout(delay_ms, Box::new(move || type_next(typing)));
    true
}

fn type_next(typing: Rc<Typing>) {
    let typed = typing.typed.get();
    if typed >= typing.chars.len() {
        return;
    }
    let prefix: String = typing.chars[..=typed].iter().collect();
    typing.page.set_text(typing.node, &prefix);
    typing.typed.set(typed + 1);

    let scheduler = Rc::clone(&typing.scheduler);
    let interval = typing.interval_ms;
    scheduler.set_timeout(interval, Box::new(move || type_next(typing)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimHost;
    use crate::models::{ElementSpec, PageLayout};

    #[test]
    fn test_types_one_char_per_interval() {
        let sim = SimHost::new(&PageLayout {
            elements: vec![ElementSpec::new("p")
                .with_class("hero-subtitle")
                .with_text("Héllo")],
            ..PageLayout::default()
        });
        assert!(start(&sim.host(), 1000, 100));
        let node = sim.node(".hero-subtitle").unwrap();
        let text = || sim.page.text(node).unwrap_or_default();

        assert_eq!(text(), "");
        sim.clock.advance(999);
        assert_eq!(text(), "");
        sim.clock.advance(1);
        assert_eq!(text(), "H");
        sim.clock.advance(100);
        assert_eq!(text(), "Hé");
        sim.clock.advance(300);
        assert_eq!(text(), "Héllo");
        sim.clock.advance(1000);
        assert_eq!(text(), "Héllo");
        assert_eq!(sim.clock.pending_timers(), 0);
    }

    #[test]
    fn test_without_subtitle() {
        let sim = SimHost::new(&PageLayout::default());
        assert!(!start(&sim.host(), 1000, 100));
    }
}
