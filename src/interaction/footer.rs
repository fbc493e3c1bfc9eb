//! Footer copyright year.

use chrono::Datelike;

use crate::host::Page;

/// Current calendar year in local time.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// The copyright line for `year`; an empty owner is left out.
#[must_use]
pub fn copyright_line(year: i32, owner: &str) -> String {
    let owner = owner.trim();
    if owner.is_empty() {
        format!("© {}. All rights reserved.", year)
    } else {
        format!("© {} {}. All rights reserved.", year, owner)
    }
}

/// Writes the copyright line into `.footer-text`. Returns whether it exists.
pub fn render(page: &dyn Page, year: i32, owner: &str) -> bool {
    let Some(footer) = page.select_first(".footer-text") else {
        return false;
    };
    page.set_text(footer, &copyright_line(year, owner));
    true
}
