//! Embedded Tera templates.
//!
//! The two pages this server renders (login form and directory listing) are
//! compiled into the binary, so the deployed artifact is a single file plus
//! the served directory.

use tera::Tera;

use crate::error::AppError;

/// Template name for the login view
pub const LOGIN_TEMPLATE: &str = "login.html";

/// Template name for the directory listing view
pub const LISTING_TEMPLATE: &str = "listing.html";

/// Initialize the Tera template engine with the embedded templates.
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (LOGIN_TEMPLATE, include_str!("../templates/login.html")),
        (LISTING_TEMPLATE, include_str!("../templates/listing.html")),
    ])?;
    Ok(tera)
}
