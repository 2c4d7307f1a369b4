//! Token-based access control.
//!
//! Provides:
//! - [`SessionGate`]: pure predicate deciding whether a presented credential
//!   cookie grants access
//! - [`SessionIssuer`]: issues and clears the credential cookie on login and
//!   logout
//!
//! There is no server-side session store. The credential cookie carries the
//! shared token itself, and every request is re-checked against the
//! configured token. Logging out simply instructs the client to discard the
//! cookie. This keeps request handling entirely stateless at the cost of
//! exposing the token to the client's cookie jar; issuing a derived session
//! token instead would require server-side state this design deliberately
//! avoids.

mod gate;
mod issuer;

pub use gate::{Access, SessionGate};
pub use issuer::{LoginOutcome, SessionIssuer};

use subtle::ConstantTimeEq;

/// Cookie names used for access control
pub mod cookie_names {
    /// Credential cookie carrying the shared token
    pub const TOKEN: &str = "token";
}

/// Compare a submitted token against the configured token in constant time.
///
/// The length check short-circuits, which leaks only the token length.
fn token_eq(submitted: &str, configured: &str) -> bool {
    submitted.as_bytes().ct_eq(configured.as_bytes()).into()
}

/// Strip the `:port` suffix from a Host header value for use as a cookie
/// Domain attribute.
///
/// Handles bracketed IPv6 literals (`[::1]:8080` becomes `::1`); a bare
/// colon-containing host without brackets is left untouched rather than
/// truncated at the first colon.
fn cookie_domain(host: &str) -> String {
    if let Some(rest) = host.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            return rest[..end].to_string();
        }
    }

    match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) =>
        {
            name.to_string()
        }
        _ => host.to_string(),
    }
}
