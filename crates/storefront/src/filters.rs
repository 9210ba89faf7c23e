//! Custom Askama template filters for the gallery page.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Prefixes an amount with the store currency symbol.
///
/// Usage in templates: `{{ product.price|money }}` renders `$109.95`.
#[askama::filter_fn]
pub fn money(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("${amount}"))
}

/// Returns the current year for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
