//! Light/dark theme switching.
//!
//! The light theme is the body class `light-mode` plus the stored value
//! `theme = "light"`. Switching back to dark removes the key, so storage only
//! ever holds the non-default choice.

use anyhow::{Context, Result};
use std::cell::Cell;
use std::rc::Rc;

use crate::constants::{LIGHT_MODE_CLASS, THEME_STORAGE_KEY};
use crate::host::{EventKind, EventTarget, Host, Page, Storage};
use crate::models::ThemePreference;

/// Reads the stored preference.
#[must_use]
pub fn stored_preference(storage: &dyn Storage) -> ThemePreference {
    ThemePreference::from_stored(storage.get(THEME_STORAGE_KEY).as_deref())
}

/// Writes `preference` to storage.
pub fn persist_preference(storage: &dyn Storage, preference: ThemePreference) -> Result<()> {
    let result = match preference {
        ThemePreference::Light => storage.set(THEME_STORAGE_KEY, preference.as_str()),
        ThemePreference::Dark => storage.remove(THEME_STORAGE_KEY),
    };
    result.with_context(|| format!("Failed to store theme preference '{}'", preference))
}

/// Applies and persists the theme of the page.
pub struct ThemeController {
    page: Rc<dyn Page>,
    storage: Rc<dyn Storage>,
    current: Cell<ThemePreference>,
}

impl ThemeController {
    /// Controller starting from the dark baseline.
    pub fn new(page: Rc<dyn Page>, storage: Rc<dyn Storage>) -> Self {
        Self {
            page,
            storage,
            current: Cell::new(ThemePreference::Dark),
        }
    }

    /// Applies the stored preference to the page.
    pub fn restore(&self) -> ThemePreference {
        let preference = stored_preference(self.storage.as_ref());
        self.apply(preference);
        preference
    }

    /// Flips the theme, updates the page and persists the choice.
    ///
    /// A storage failure is logged; the page still switches.
    pub fn toggle(&self) -> ThemePreference {
        let next = self.current.get().toggled();
        self.apply(next);
        if let Err(e) = persist_preference(self.storage.as_ref(), next) {
            tracing::warn!("{:#}", e);
        }
        tracing::info!("Theme switched to {}", next);
        next
    }

    /// Theme currently applied.
    #[must_use]
    pub fn current(&self) -> ThemePreference {
        self.current.get()
    }

    fn apply(&self, preference: ThemePreference) {
        self.current.set(preference);
        if let Some(body) = self.page.body() {
            self.page
                .set_class(body, LIGHT_MODE_CLASS, preference == ThemePreference::Light);
        }
    }

    /// Binds [`ThemeController::toggle`] to `#themeToggle`, if present.
    pub fn bind(self: &Rc<Self>, host: &Host) -> bool {
        let Some(button) = host.page.by_id("themeToggle") else {
            return false;
        };
        let theme = Rc::clone(self);
        host.events.listen(
            EventTarget::Node(button),
            EventKind::Click,
            Box::new(move |_| {
                theme.toggle();
            }),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimPage;
    use crate::host::MemoryStorage;
    use crate::models::PageLayout;

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }

        fn remove(&self, _key: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    fn setup(storage: Rc<dyn Storage>) -> (Rc<SimPage>, ThemeController) {
        let page = Rc::new(SimPage::from_layout(&PageLayout::default()));
        let theme = ThemeController::new(page.clone(), storage);
        (page, theme)
    }

    #[test]
    fn test_toggle_round_trip() {
        let storage = Rc::new(MemoryStorage::new());
        let (page, theme) = setup(storage.clone());
        let body = page.body().unwrap();

        assert_eq!(theme.toggle(), ThemePreference::Light);
        assert!(page.has_class(body, "light-mode"));
        assert_eq!(storage.get("theme").as_deref(), Some("light"));

        assert_eq!(theme.toggle(), ThemePreference::Dark);
        assert!(!page.has_class(body, "light-mode"));
        assert_eq!(storage.get("theme"), None);
    }

    #[test]
    fn test_restore() {
        let (page, theme) = setup(Rc::new(MemoryStorage::with_entry("theme", "light")));
        assert_eq!(theme.restore(), ThemePreference::Light);
        assert!(page.has_class(page.body().unwrap(), "light-mode"));

        let (page, theme) = setup(Rc::new(MemoryStorage::with_entry("theme", "sepia")));
        assert_eq!(theme.restore(), ThemePreference::Dark);
        assert!(!page.has_class(page.body().unwrap(), "light-mode"));
    }

    #[test]
    fn test_storage_failure_does_not_block_toggle() {
        let (page, theme) = setup(Rc::new(ReadOnlyStorage));
        assert_eq!(theme.toggle(), ThemePreference::Light);
        assert!(page.has_class(page.body().unwrap(), "light-mode"));
    }

    #[test]
    fn test_persist_error_has_context() {
        let err = persist_preference(&ReadOnlyStorage, ThemePreference::Light).unwrap_err();
        assert!(err.to_string().contains("Failed to store theme preference 'light'"));
    }
}
