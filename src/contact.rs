//! Contact form validation.
//!
//! A form passes when its email field (if any) looks like an address and its
//! message field (if any) has at least [`MIN_MESSAGE_LEN`] characters. The
//! first failing check is reported to the visitor through [`Page::alert`].

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use crate::constants::MIN_MESSAGE_LEN;
use crate::host::{EventKind, EventTarget, Host, NodeId, Page};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Why a contact form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ContactError {
    /// The email field does not look like an address
    InvalidEmail,
    /// The message is shorter than the minimum
    MessageTooShort {
        /// Required number of characters
        min: usize,
        /// Characters provided
        actual: usize,
    },
}

impl ContactError {
    /// Text shown to the visitor.
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self {
            Self::InvalidEmail => "Please enter a valid email address".to_string(),
            Self::MessageTooShort { min, .. } => {
                format!("Please enter a message with at least {} characters", min)
            }
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "invalid email address"),
            Self::MessageTooShort { min, actual } => {
                write!(f, "message has {} characters, at least {} required", actual, min)
            }
        }
    }
}

impl std::error::Error for ContactError {}

/// Checks an email address.
pub fn validate_email(email: &str) -> Result<(), ContactError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ContactError::InvalidEmail)
    }
}

/// Checks a message body. Length is counted in characters.
pub fn validate_message(message: &str) -> Result<(), ContactError> {
    let actual = message.chars().count();
    if actual < MIN_MESSAGE_LEN {
        return Err(ContactError::MessageTooShort {
            min: MIN_MESSAGE_LEN,
            actual,
        });
    }
    Ok(())
}

/// Checks the optional email and message fields in that order.
pub fn validate_fields(email: Option<&str>, message: Option<&str>) -> Result<(), ContactError> {
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(message) = message {
        validate_message(message)?;
    }
    Ok(())
}

/// Validates `form`, alerting the visitor about the first problem.
///
/// Reads the first `input[type="email"]` and the first `textarea` inside the
/// form; missing fields are not checked.
pub fn validate_contact_form(page: &dyn Page, form: NodeId) -> bool {
    let field = |selector: &str| {
        page.select_within(form, selector)
            .into_iter()
            .next()
            .map(|node| page.value(node).unwrap_or_default())
    };
    let email = field("input[type=\"email\"]");
    let message = field("textarea");

    match validate_fields(email.as_deref(), message.as_deref()) {
        Ok(()) => true,
        Err(e) => {
            tracing::info!("Contact form rejected: {}", e);
            page.alert(&e.alert_message());
            false
        }
    }
}

/// Validates `#contactForm` on submit, cancelling rejected submissions.
pub fn bind(host: &Host) -> bool {
    let Some(form) = host.page.by_id("contactForm") else {
        return false;
    };
    let page = Rc::clone(&host.page);
    host.events.listen(
        EventTarget::Node(form),
        EventKind::Submit,
        Box::new(move |event| {
            if !validate_contact_form(page.as_ref(), form) {
                event.prevent_default();
            }
        }),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimHost;
    use crate::host::Event;
    use crate::models::{ElementSpec, PageLayout};

    #[test]
    fn test_email_pattern() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@mail.example.org").is_ok());
        assert_eq!(validate_email("a@b"), Err(ContactError::InvalidEmail));
        assert_eq!(validate_email("abc"), Err(ContactError::InvalidEmail));
        assert_eq!(validate_email("a b@c.de"), Err(ContactError::InvalidEmail));
        assert_eq!(validate_email(""), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn test_message_length() {
        assert_eq!(
            validate_message("too short"),
            Err(ContactError::MessageTooShort { min: 10, actual: 9 })
        );
        assert!(validate_message("exactly 10").is_ok());
        // Counted in characters, not bytes
        assert!(validate_message("ééééééééé").is_err());
    }

    #[test]
    fn test_email_checked_first() {
        assert_eq!(
            validate_fields(Some("nope"), Some("short")),
            Err(ContactError::InvalidEmail)
        );
        assert!(validate_fields(None, None).is_ok());
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(
            ContactError::InvalidEmail.alert_message(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ContactError::MessageTooShort { min: 10, actual: 3 }.alert_message(),
            "Please enter a message with at least 10 characters"
        );
    }

    fn form_layout(email: &str, message: &str) -> PageLayout {
        PageLayout {
            elements: vec![ElementSpec::new("form")
                .with_id("contactForm")
                .with_child(
                    ElementSpec::new("input")
                        .with_attr("type", "email")
                        .with_value(email),
                )
                .with_child(ElementSpec::new("textarea").with_value(message))],
            ..PageLayout::default()
        }
    }

    #[test]
    fn test_submit_rejects_and_alerts() {
        let sim = SimHost::new(&form_layout("a@b", "Hello there, nice site"));
        assert!(bind(&sim.host()));
        let form = sim.node("#contactForm").unwrap();

        let event = sim.dispatch(EventTarget::Node(form), EventKind::Submit, Event::plain());
        assert!(event.default_prevented());
        assert_eq!(sim.page.alerts(), vec!["Please enter a valid email address".to_string()]);
    }

    #[test]
    fn test_submit_accepts_valid_form() {
        let sim = SimHost::new(&form_layout("a@b.co", "Hello there, nice site"));
        bind(&sim.host());
        let form = sim.node("#contactForm").unwrap();

        let event = sim.dispatch(EventTarget::Node(form), EventKind::Submit, Event::plain());
        assert!(!event.default_prevented());
        assert!(sim.page.alerts().is_empty());
    }

    #[test]
    fn test_form_without_fields_passes() {
        let sim = SimHost::new(&PageLayout {
            elements: vec![ElementSpec::new("form").with_id("contactForm")],
            ..PageLayout::default()
        });
        let form = sim.node("#contactForm").unwrap();
        assert!(validate_contact_form(sim.page.as_ref(), form));
    }
}
