//! Scripted playback on the simulated host.
//!
//! A [`Replay`] mounts a [`Portfolio`] on a [`SimHost`], fires the load event
//! and then applies [`ScriptStep`]s one at a time, recording a [`Snapshot`]
//! of the observable page state after each.

use anyhow::{Context, Result};
use serde::Serialize;
use std::rc::Rc;

use crate::app::Portfolio;
use crate::config::Config;
use crate::host::sim::SimHost;
use crate::host::{Event, EventKind, EventTarget, Storage};
use crate::interaction::MenuState;
use crate::models::{PageLayout, Point, Script, ScriptStep, ThemePreference};

/// Observable state after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Step number; 0 is the state right after load
    pub step: usize,
    /// Action name of the step
    pub action: String,
    /// Virtual time in milliseconds
    pub time_ms: u64,
    /// Window scroll position
    pub scroll_y: f64,
    /// `href`s of active navigation links
    pub active_links: Vec<String>,
    /// Activated reveal elements
    pub revealed: usize,
    /// Registered reveal elements
    pub reveal_total: usize,
    /// Whether the mobile menu is open
    pub menu_open: bool,
    /// Drawn cursor-light position
    pub cursor: Point,
    /// Whether the cursor light is shown
    pub cursor_visible: bool,
    /// Applied theme
    pub theme: ThemePreference,
    /// Whether `#navbar` carries `scrolled`
    pub navbar_scrolled: bool,
    /// Alerts shown so far
    pub alerts: Vec<String>,
    /// Downloads started so far
    pub downloads: usize,
    /// Print dialogs opened so far
    pub prints: u32,
}

/// A mounted page driven by script steps.
pub struct Replay {
    sim: SimHost,
    portfolio: Portfolio,
    steps_applied: usize,
}

impl Replay {
    /// Mounts `layout` with `config` and fires the load event.
    pub fn new(layout: &PageLayout, config: &Config, storage: Rc<dyn Storage>) -> Result<Self> {
        let sim = SimHost::with_storage(layout, storage);
        let portfolio = Portfolio::mount(&sim.host(), config)?;
        sim.load();
        Ok(Self {
            sim,
            portfolio,
            steps_applied: 0,
        })
    }

    /// The simulated host.
    #[must_use]
    pub fn sim(&self) -> &SimHost {
        &self.sim
    }

    /// The mounted page.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Current state, labelled with the last applied step.
    #[must_use]
    pub fn snapshot(&self, action: &str) -> Snapshot {
        let cursor = self.portfolio.cursor_state();
        Snapshot {
            step: self.steps_applied,
            action: action.to_string(),
            time_ms: self.sim.clock.elapsed_ms(),
            scroll_y: self.portfolio.host().page.scroll_y(),
            active_links: self.portfolio.active_links(),
            revealed: self.portfolio.revealed_count(),
            reveal_total: self.portfolio.reveal_total(),
            menu_open: self.portfolio.menu_state() == MenuState::Open,
            cursor: cursor.display,
            cursor_visible: cursor.visible,
            theme: self.portfolio.theme(),
            navbar_scrolled: self.portfolio.navbar_scrolled(),
            alerts: self.sim.page.alerts(),
            downloads: self.sim.page.downloads().len(),
            prints: self.sim.page.print_count(),
        }
    }

    /// Applies one step and returns the resulting state.
    pub fn apply(&mut self, step: &ScriptStep) -> Result<Snapshot> {
        tracing::debug!("Applying step {}: {:?}", self.steps_applied + 1, step);
        let sim = &self.sim;

        match step {
            ScriptStep::Scroll { y } => sim.scroll_to(*y),
            ScriptStep::Advance { ms } => {
                sim.clock.advance(*ms);
            }
            ScriptStep::Frames { count } => {
                sim.clock.run_frames(*count);
            }
            ScriptStep::Click { target } => {
                sim.click(target)?;
            }
            ScriptStep::PointerMove { x, y, target } => {
                let mut targets = vec![EventTarget::Document];
                if let Some(target) = target {
                    targets.push(EventTarget::Node(sim.node(target)?));
                }
                for target in targets {
                    sim.dispatch(target, EventKind::PointerMove, Event::pointer(*x, *y));
                }
            }
            ScriptStep::PointerEnter { x, y, target } => {
                let target = self.target(target.as_deref())?;
                sim.dispatch(target, EventKind::PointerEnter, Event::pointer(*x, *y));
            }
            ScriptStep::PointerLeave { target } => {
                let target = self.target(target.as_deref())?;
                sim.dispatch(target, EventKind::PointerLeave, Event::plain());
            }
            ScriptStep::PointerDown => {
                sim.dispatch(EventTarget::Document, EventKind::PointerDown, Event::plain());
            }
            ScriptStep::Key { key } => {
                sim.dispatch(EventTarget::Document, EventKind::KeyDown, Event::key(key.as_str()));
            }
            ScriptStep::Focus { target } => {
                let node = sim.node(target)?;
                sim.dispatch(EventTarget::Node(node), EventKind::Focus, Event::plain());
            }
            ScriptStep::Blur { target } => {
                let node = sim.node(target)?;
                sim.dispatch(EventTarget::Node(node), EventKind::Blur, Event::plain());
            }
            ScriptStep::Submit { target } => {
                let node = sim.node(target)?;
                sim.dispatch(EventTarget::Node(node), EventKind::Submit, Event::plain());
            }
        }

        self.steps_applied += 1;
        Ok(self.snapshot(step.name()))
    }

    /// Applies every step of `script`.
    ///
    /// The returned list starts with the post-load state.
    pub fn run(&mut self, script: &Script) -> Result<Vec<Snapshot>> {
        let mut snapshots = Vec::with_capacity(script.steps.len() + 1);
        snapshots.push(self.snapshot("load"));
        for (index, step) in script.steps.iter().enumerate() {
            let snapshot = self
                .apply(step)
                .with_context(|| format!("Step {} ({}) failed", index + 1, step.name()))?;
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }

    fn target(&self, selector: Option<&str>) -> Result<EventTarget> {
        match selector {
            Some(selector) => Ok(EventTarget::Node(self.sim.node(selector)?)),
            None => Ok(EventTarget::Document),
        }
    }
}
