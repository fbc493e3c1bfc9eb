//! Mounting every behaviour onto a page.
//!
//! [`Portfolio::mount`] is the single entry point used by the browser start
//! function, the simulator and the tests. Handlers are registered in a fixed
//! order so that, for every event, they fire in the same order on every host:
//!
//! 1. menu toggle and nav links
//! 2. sticky header (every scroll)
//! 3. smooth anchors, resume button, typewriter, footer
//! 4. card hover effects
//! 5. scroll work: reveal, active link and lazy images on every scroll, then
//!    debounced reveal and active link
//! 6. keyboard flag and skip link
//! 7. cursor light and its frame loop
//! 8. load handler, contact form, theme

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::constants::ACTIVE_CLASS;
use crate::contact;
use crate::host::{EventKind, EventTarget, Host, NodeId};
use crate::interaction::{
    a11y, cards, footer, resume, typewriter, CursorLight, CursorLightState, MenuState,
    MenuToggle, ThemeController,
};
use crate::models::ThemePreference;
use crate::scroll::sticky::SCROLLED_CLASS;
use crate::scroll::{anchors, ActiveSectionTracker, LazyImages, RevealController, StickyHeader};
use crate::services::{Debouncer, FrameLoopHandle};

/// A mounted page.
pub struct Portfolio {
    host: Host,
    reveal: Rc<RefCell<RevealController>>,
    tracker: ActiveSectionTracker,
    sticky: Rc<StickyHeader>,
    lazy_images: Rc<RefCell<LazyImages>>,
    menu: Rc<MenuToggle>,
    cursor: Rc<CursorLight>,
    cursor_loop: FrameLoopHandle,
    theme: Rc<ThemeController>,
    skip_link: Option<NodeId>,
}

impl Portfolio {
    /// Validates `config` and wires every behaviour onto `host`.
    pub fn mount(host: &Host, config: &Config) -> Result<Self> {
        config.validate().context("Refusing to mount with invalid config")?;
        let page = Rc::clone(&host.page);

        let menu = Rc::new(MenuToggle::new(Rc::clone(&page)));
        menu.bind(host);

        let sticky = Rc::new(StickyHeader::new(
            Rc::clone(&page),
            config.scroll.sticky_threshold,
        ));
        {
            let sticky = Rc::clone(&sticky);
            host.events.listen(
                EventTarget::Window,
                EventKind::Scroll,
                Box::new(move |_| {
                    sticky.update();
                }),
            );
        }

        let anchor_count = anchors::bind(host);
        resume::bind(host, &config.resume);
        if config.site.typewriter {
            typewriter::start(
                host,
                config.site.typewriter_delay_ms,
                config.site.typewriter_interval_ms,
            );
        }
        footer::render(page.as_ref(), footer::current_year(), &config.site.owner);

        cards::bind_skill_cards(host);
        cards::bind_project_cards(host, config.pointer.tilt_divisor);

        let reveal = Rc::new(RefCell::new(RevealController::new(
            Rc::clone(&page),
            config.scroll.activation_margin,
        )));
        let tracker = ActiveSectionTracker::new(Rc::clone(&page), config.scroll.navbar_offset);
        let lazy_images = Rc::new(RefCell::new(LazyImages::new(Rc::clone(&page))));
        Self::bind_scroll_work(host, config, &reveal, &tracker, &lazy_images);

        a11y::bind_keyboard_flag(host);
        let skip_link = a11y::install_skip_link(host);

        let cursor = CursorLight::new(
            host,
            config.pointer.cursor_ease,
            config.pointer.cursor_idle_ms,
        );
        let cursor_loop = cursor.start();
        cursor.bind(host);

        {
            let reveal = Rc::clone(&reveal);
            host.events.listen(
                EventTarget::Window,
                EventKind::Load,
                Box::new(move |_| {
                    reveal.borrow_mut().evaluate_all();
                    tracing::info!("Portfolio loaded");
                }),
            );
        }

        contact::bind(host);

        let theme = Rc::new(ThemeController::new(
            Rc::clone(&page),
            Rc::clone(&host.storage),
        ));
        theme.restore();
        theme.bind(host);

        // Initial pass for content already in view
        reveal.borrow_mut().evaluate_all();
        lazy_images.borrow_mut().load_visible();

        tracing::info!(
            "Mounted: {} reveal element(s), {} section(s), {} anchor(s)",
            reveal.borrow().len(),
            tracker.section_ranges().len(),
            anchor_count
        );

        Ok(Self {
            host: host.clone(),
            reveal,
            tracker,
            sticky,
            lazy_images,
            menu,
            cursor,
            cursor_loop,
            theme,
            skip_link,
        })
    }

    fn bind_scroll_work(
        host: &Host,
        config: &Config,
        reveal: &Rc<RefCell<RevealController>>,
        tracker: &ActiveSectionTracker,
        lazy_images: &Rc<RefCell<LazyImages>>,
    ) {
        // Every scroll is evaluated, so the position a burst settles on is
        // never left to a swallowed debounced call.
        {
            let reveal = Rc::clone(reveal);
            let tracker = tracker.clone();
            let lazy_images = Rc::clone(lazy_images);
            host.events.listen(
                EventTarget::Window,
                EventKind::Scroll,
                Box::new(move |_| {
                    reveal.borrow_mut().evaluate_all();
                    tracker.update_active_link();
                    lazy_images.borrow_mut().load_visible();
                }),
            );
        }

        let wait_ms = config.scroll.debounce_ms;
        let leading = config.scroll.debounce_leading;

        let reveal = Rc::clone(reveal);
        let reveal_debounced = Debouncer::new(
            Rc::clone(&host.scheduler),
            wait_ms,
            leading,
            move |()| {
                reveal.borrow_mut().evaluate_all();
            },
        );

        let tracker = tracker.clone();
        let active_debounced = Debouncer::new(
            Rc::clone(&host.scheduler),
            wait_ms,
            leading,
            move |()| {
                tracker.update_active_link();
            },
        );

        for debounced in [reveal_debounced, active_debounced] {
            host.events.listen(
                EventTarget::Window,
                EventKind::Scroll,
                Box::new(move |_| debounced.call(())),
            );
        }
    }

    /// Stops the cursor-light frame loop.
    pub fn shutdown(&self) {
        self.cursor_loop.cancel();
        tracing::debug!("Cursor light loop stopped");
    }

    /// The host this page was mounted on.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// `href`s of the navigation links currently marked active.
    #[must_use]
    pub fn active_links(&self) -> Vec<String> {
        let page = &self.host.page;
        page.select_all(&format!(".nav-link.{}", ACTIVE_CLASS))
            .into_iter()
            .filter_map(|link| page.attribute(link, "href"))
            .collect()
    }

    /// Re-runs the active-link derivation immediately.
    pub fn update_active_link(&self) -> Vec<String> {
        self.tracker.update_active_link()
    }

    /// Number of activated reveal elements.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.reveal.borrow().activated_count()
    }

    /// Number of registered reveal elements.
    #[must_use]
    pub fn reveal_total(&self) -> usize {
        self.reveal.borrow().len()
    }

    /// Mobile menu state.
    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    /// Cursor light state.
    #[must_use]
    pub fn cursor_state(&self) -> CursorLightState {
        self.cursor.state()
    }

    /// Handle of the cursor-light frame loop.
    #[must_use]
    pub fn cursor_loop(&self) -> &FrameLoopHandle {
        &self.cursor_loop
    }

    /// Applied theme.
    #[must_use]
    pub fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    /// Flips the theme as the toggle button would.
    pub fn toggle_theme(&self) -> ThemePreference {
        self.theme.toggle()
    }

    /// Whether the navbar carries the `scrolled` flag.
    #[must_use]
    pub fn navbar_scrolled(&self) -> bool {
        let page = &self.host.page;
        page.by_id("navbar")
            .is_some_and(|navbar| page.has_class(navbar, SCROLLED_CLASS))
    }

    /// Scroll position seen by the sticky header.
    #[must_use]
    pub fn last_scroll(&self) -> f64 {
        self.sticky.last_scroll()
    }

    /// Lazy images not loaded yet.
    #[must_use]
    pub fn lazy_images_pending(&self) -> usize {
        self.lazy_images.borrow().pending()
    }

    /// The injected skip link.
    #[must_use]
    pub fn skip_link(&self) -> Option<NodeId> {
        self.skip_link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimHost;
    use crate::host::MemoryStorage;
    use crate::models::{ElementSpec, PageLayout, Rect};

    fn layout() -> PageLayout {
        PageLayout {
            elements: vec![
                ElementSpec::new("nav")
                    .with_id("navbar")
                    .fixed()
                    .with_rect(Rect::new(0.0, 0.0, 1280.0, 70.0))
                    .with_child(
                        ElementSpec::new("a")
                            .with_class("nav-link")
                            .with_attr("href", "#home"),
                    )
                    .with_child(
                        ElementSpec::new("a")
                            .with_class("nav-link")
                            .with_attr("href", "#about"),
                    ),
                ElementSpec::new("section")
                    .with_id("home")
                    .with_rect(Rect::new(0.0, 0.0, 1280.0, 800.0)),
                ElementSpec::new("section")
                    .with_id("about")
                    .with_rect(Rect::new(800.0, 0.0, 1280.0, 800.0))
                    .with_child(
                        ElementSpec::new("div")
                            .with_class("reveal")
                            .with_rect(Rect::new(900.0, 0.0, 400.0, 100.0)),
                    ),
            ],
            ..PageLayout::default()
        }
    }

    #[test]
    fn test_mount_runs_initial_pass() {
        let sim = SimHost::new(&layout());
        let portfolio = Portfolio::mount(&sim.host(), &Config::default()).unwrap();
        assert_eq!(portfolio.reveal_total(), 1);
        assert_eq!(portfolio.revealed_count(), 0);
        assert!(portfolio.skip_link().is_some());
        assert_eq!(portfolio.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_scroll_drives_reveal_and_links() {
        let sim = SimHost::new(&layout());
        let portfolio = Portfolio::mount(&sim.host(), &Config::default()).unwrap();

        sim.scroll_to(1000.0);
        assert_eq!(portfolio.revealed_count(), 1);
        assert_eq!(portfolio.active_links(), vec!["#about".to_string()]);
        assert!(portfolio.navbar_scrolled());
        assert_eq!(portfolio.last_scroll(), 1000.0);
    }

    #[test]
    fn test_burst_settles_on_final_position() {
        let sim = SimHost::new(&layout());
        let portfolio = Portfolio::mount(&sim.host(), &Config::default()).unwrap();

        sim.scroll_to(10.0);
        assert_eq!(portfolio.active_links(), vec!["#home".to_string()]);

        // Second scroll lands inside the quiet window and nothing follows it
        sim.clock.advance(5);
        sim.scroll_to(1000.0);
        sim.clock.advance(10_000);

        assert!(portfolio.navbar_scrolled());
        assert_eq!(portfolio.active_links(), vec!["#about".to_string()]);
        assert_eq!(portfolio.revealed_count(), 1);
    }

    #[test]
    fn test_theme_restored_from_storage() {
        let storage = Rc::new(MemoryStorage::with_entry("theme", "light"));
        let sim = SimHost::with_storage(&layout(), storage);
        let portfolio = Portfolio::mount(&sim.host(), &Config::default()).unwrap();
        assert_eq!(portfolio.theme(), ThemePreference::Light);
        assert_eq!(portfolio.toggle_theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_shutdown_stops_cursor_loop() {
        let sim = SimHost::new(&layout());
        let portfolio = Portfolio::mount(&sim.host(), &Config::default()).unwrap();
        sim.clock.run_frames(3);
        assert_eq!(portfolio.cursor_loop().ticks(), 3);

        portfolio.shutdown();
        sim.clock.run_frames(3);
        assert_eq!(portfolio.cursor_loop().ticks(), 3);
        assert!(!portfolio.cursor_loop().is_running());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let sim = SimHost::new(&layout());
        let mut config = Config::default();
        config.pointer.cursor_ease = 0.0;
        let err = Portfolio::mount(&sim.host(), &config).err().unwrap();
        assert!(err.to_string().contains("invalid config"));
    }
}
