//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use folio_interact::models::{ElementSpec, PageLayout, Rect, Viewport};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Full-width box in document coordinates.
pub fn band(top: f64, height: f64) -> Rect {
    Rect::new(top, 0.0, 1280.0, height)
}

/// A four-section portfolio page on a 1280x800 viewport.
///
/// Sections sit back to back, 800px each: `#home` at 0, `#about` at 800,
/// `#projects` at 1600, `#contact` at 2400. There is one `.reveal` element
/// per section except contact (at 300, 900 and 1700), a skill card, a project
/// card, one lazy image at 2000 and every control the page script binds to.
pub fn portfolio_layout() -> PageLayout {
    let nav_link = |target: &str| {
        ElementSpec::new("a")
            .with_class("nav-link")
            .with_attr("href", format!("#{}", target))
    };

    let navbar = ElementSpec::new("nav")
        .with_id("navbar")
        .fixed()
        .with_rect(band(0.0, 70.0))
        .with_child(
            ElementSpec::new("button")
                .with_id("menuToggle")
                .with_child(ElementSpec::new("span").with_class("hamburger"))
                .with_child(ElementSpec::new("span").with_class("hamburger"))
                .with_child(ElementSpec::new("span").with_class("hamburger")),
        )
        .with_child(
            ElementSpec::new("ul")
                .with_id("navMenu")
                .with_child(nav_link("home"))
                .with_child(nav_link("about"))
                .with_child(nav_link("projects"))
                .with_child(nav_link("contact")),
        )
        .with_child(ElementSpec::new("button").with_id("themeToggle"));

    let home = ElementSpec::new("section")
        .with_id("home")
        .with_rect(band(0.0, 800.0))
        .with_child(
            ElementSpec::new("p")
                .with_class("hero-subtitle")
                .with_text("Systems engineer"),
        )
        .with_child(
            ElementSpec::new("div")
                .with_class("reveal")
                .with_rect(band(300.0, 100.0)),
        );

    let about = ElementSpec::new("section")
        .with_id("about")
        .with_rect(band(800.0, 800.0))
        .with_child(
            ElementSpec::new("div")
                .with_class("reveal")
                .with_rect(band(900.0, 100.0)),
        )
        .with_child(
            ElementSpec::new("div")
                .with_id("skill")
                .with_class("skill-card")
                .with_rect(Rect::new(1000.0, 100.0, 200.0, 200.0)),
        );

    let projects = ElementSpec::new("section")
        .with_id("projects")
        .with_rect(band(1600.0, 800.0))
        .with_child(
            ElementSpec::new("div")
                .with_class("reveal")
                .with_rect(band(1700.0, 100.0)),
        )
        .with_child(
            ElementSpec::new("div")
                .with_id("project")
                .with_class("project-card")
                .with_rect(Rect::new(1700.0, 100.0, 400.0, 300.0)),
        )
        .with_child(
            ElementSpec::new("img")
                .with_id("shot")
                .with_attr("data-src", "img/shot.png")
                .with_rect(Rect::new(2000.0, 600.0, 300.0, 200.0)),
        );

    let contact = ElementSpec::new("section")
        .with_id("contact")
        .with_rect(band(2400.0, 800.0))
        .with_child(
            ElementSpec::new("form")
                .with_id("contactForm")
                .with_child(ElementSpec::new("input").with_attr("type", "email"))
                .with_child(ElementSpec::new("textarea")),
        )
        .with_child(
            ElementSpec::new("button")
                .with_id("downloadResume")
                .with_text("Download Resume"),
        );

    let footer = ElementSpec::new("footer")
        .with_rect(band(3200.0, 100.0))
        .with_child(ElementSpec::new("p").with_class("footer-text"));

    let cursor = ElementSpec::new("div")
        .with_id("cursorLight")
        .fixed()
        .with_rect(Rect::new(0.0, 0.0, 40.0, 40.0));

    PageLayout {
        viewport: Viewport {
            width: 1280.0,
            height: 800.0,
        },
        elements: vec![navbar, home, about, projects, contact, footer, cursor],
    }
}

/// Writes `layout` as TOML into `dir` and returns the path.
pub fn write_layout_toml(dir: &Path, layout: &PageLayout) -> PathBuf {
    let path = dir.join("layout.toml");
    let content = toml::to_string(layout).expect("Failed to serialize layout");
    fs::write(&path, content).expect("Failed to write layout");
    path
}

/// Writes `layout` as JSON into `dir` and returns the path.
pub fn write_layout_json(dir: &Path, layout: &PageLayout) -> PathBuf {
    let path = dir.join("layout.json");
    let content = serde_json::to_string_pretty(layout).expect("Failed to serialize layout");
    fs::write(&path, content).expect("Failed to write layout");
    path
}

/// Writes a raw script file named `name` into `dir`.
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write script");
    path
}

/// A fresh temporary directory.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
