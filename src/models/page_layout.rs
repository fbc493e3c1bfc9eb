//! Static description of a page, used to build the simulated host.
//!
//! A layout lists the elements the controllers care about together with their
//! document-space boxes. Layout files can be written in TOML, JSON or YAML; the
//! format is picked from the file extension.
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [[elements]]
//! tag = "section"
//! id = "about"
//! rect = { top = 900, height = 700, width = 1280 }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::geometry::Rect;

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width
    pub width: f64,
    /// Inner height
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// One element of the simulated document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Tag name, lowercase (`section`, `a`, `img`, ...)
    pub tag: String,
    /// `id` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Remaining attributes (`href`, `data-src`, `type`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Box in document coordinates
    #[serde(default)]
    pub rect: Rect,
    /// Fixed elements keep their box while the page scrolls (navbar, cursor light)
    #[serde(default)]
    pub fixed: bool,
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Form control value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Nested elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Creates an element with only a tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the document-space box.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Marks the element as fixed-position.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the form value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// A whole page: viewport plus the body's children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageLayout {
    /// Viewport size
    #[serde(default)]
    pub viewport: Viewport,
    /// Top-level elements (children of `<body>`)
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl PageLayout {
    /// Loads a layout, choosing the parser from the file extension
    /// (`.toml`, `.json`, `.yaml`/`.yml`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read page layout: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let layout = match extension.as_str() {
            "json" => serde_json::from_str(&content).context(format!(
                "Failed to parse JSON page layout: {}",
                path.display()
            ))?,
            "yaml" | "yml" => serde_yml::from_str(&content).context(format!(
                "Failed to parse YAML page layout: {}",
                path.display()
            ))?,
            "toml" => Self::from_toml_str(&content)
                .context(format!("Failed to parse page layout: {}", path.display()))?,
            other => anyhow::bail!(
                "Unsupported page layout format '{}' (expected .toml, .json, .yaml or .yml): {}",
                other,
                path.display()
            ),
        };

        Ok(layout)
    }

    /// Parses a TOML layout.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML page layout")
    }

    /// Total number of elements, nested ones included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        fn count(elements: &[ElementSpec]) -> usize {
            elements.iter().map(|el| 1 + count(&el.children)).sum()
        }
        count(&self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r##"
[viewport]
width = 1024
height = 768

[[elements]]
tag = "nav"
id = "navbar"
fixed = true
rect = { top = 0, height = 70, width = 1024 }

[[elements.children]]
tag = "a"
classes = ["nav-link"]
attributes = { href = "#about" }

[[elements]]
tag = "section"
id = "about"
rect = { top = 900, height = 600 }
"##;

    #[test]
    fn test_parse_toml_layout() {
        let layout = PageLayout::from_toml_str(SAMPLE).unwrap();
        assert_eq!(layout.viewport.height, 768.0);
        assert_eq!(layout.elements.len(), 2);
        assert_eq!(layout.element_count(), 3);
        assert!(layout.elements[0].fixed);
        assert_eq!(
            layout.elements[0].children[0].attributes.get("href"),
            Some(&"#about".to_string())
        );
        assert_eq!(layout.elements[1].rect.top, 900.0);
        assert_eq!(layout.elements[1].rect.left, 0.0);
    }

    #[test]
    fn test_load_json_and_yaml_agree() {
        let temp = TempDir::new().unwrap();
        let layout = PageLayout::from_toml_str(SAMPLE).unwrap();

        let json_path = temp.path().join("page.json");
        fs::write(&json_path, serde_json::to_string(&layout).unwrap()).unwrap();
        let yaml_path = temp.path().join("page.yaml");
        fs::write(&yaml_path, serde_yml::to_string(&layout).unwrap()).unwrap();

        assert_eq!(PageLayout::load(&json_path).unwrap(), layout);
        assert_eq!(PageLayout::load(&yaml_path).unwrap(), layout);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page.html");
        fs::write(&path, "<html></html>").unwrap();

        let err = PageLayout::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported page layout format"));
    }

    #[test]
    fn test_builder_helpers() {
        let el = ElementSpec::new("a")
            .with_id("skip")
            .with_class("nav-link")
            .with_attr("href", "#home")
            .with_rect(Rect::new(0.0, 0.0, 10.0, 10.0))
            .fixed();
        assert_eq!(el.id.as_deref(), Some("skip"));
        assert_eq!(el.classes, vec!["nav-link".to_string()]);
        assert!(el.fixed);
    }
}
