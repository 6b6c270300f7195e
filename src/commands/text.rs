//! Text command implementation

use crate::{
    commands::parse_assignments,
    errors::AppError,
    utils::{interpolate, reverse},
};

/// Print `text` reversed
pub fn reverse_text(text: &str) -> Result<(), AppError> {
    println!("{}", reverse(text)?);
    Ok(())
}

/// Print `template` with `${KEY}` placeholders filled from `KEY=VALUE` arguments
pub fn interpolate_text(template: &str, vars: &[String]) -> Result<(), AppError> {
    let values = parse_assignments(vars)?;
    println!("{}", interpolate(template, &values)?);
    Ok(())
}
