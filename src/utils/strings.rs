//! String helpers

use regex::{Captures, Regex};
use std::{collections::HashMap, sync::LazyLock};

use crate::errors::AppError;

/// `${key}`, capturing the key
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("valid regex"));

/// Reverse `text` by Unicode scalar value
///
/// # Errors
///
/// Returns [`AppError::BlankInput`] if `text` is empty or only whitespace.
pub fn reverse(text: &str) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::BlankInput { what: "text to reverse" });
    }

    Ok(text.chars().rev().collect())
}

/// Replace `${key}` placeholders in `template` with values from `values`
///
/// The template is scanned once from left to right, so a substituted value
/// that itself looks like a placeholder is emitted as-is. Placeholders with
/// no entry in `values` are left untouched.
///
/// # Errors
///
/// Returns [`AppError::BlankInput`] if `template` is empty or only
/// whitespace.
pub fn interpolate(template: &str, values: &HashMap<String, String>) -> Result<String, AppError> {
    if template.trim().is_empty() {
        return Err(AppError::BlankInput { what: "template" });
    }
    if values.is_empty() {
        return Ok(template.to_string());
    }

    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures| {
        match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        }
    });

    Ok(rendered.into_owned())
}
