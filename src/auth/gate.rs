//! Request authorization against the shared token.

use super::token_eq;

/// Authorization decision for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

/// Decides whether a request may reach gated content.
///
/// A pure predicate over the presented credential cookie value: access is
/// granted iff the value equals the configured token byte-for-byte. The
/// caller translates `Denied` into rendering the login view; wrong or
/// missing credentials are routine, never an error.
pub struct SessionGate {
    token: String,
}

impl SessionGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Authorize a request given the credential cookie value, if any.
    pub fn authorize(&self, presented: Option<&str>) -> Access {
        match presented {
            Some(value) if token_eq(value, &self.token) => Access::Granted,
            _ => Access::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SessionGate {
        SessionGate::new("s3cr3t")
    }

    #[test]
    fn grants_exact_match() {
        assert_eq!(gate().authorize(Some("s3cr3t")), Access::Granted);
    }

    #[test]
    fn denies_missing_cookie() {
        assert_eq!(gate().authorize(None), Access::Denied);
    }

    #[test]
    fn denies_empty_value() {
        assert_eq!(gate().authorize(Some("")), Access::Denied);
    }

    #[test]
    fn denies_single_character_difference() {
        assert_eq!(gate().authorize(Some("s3cr3T")), Access::Denied);
        assert_eq!(gate().authorize(Some("s3cr3")), Access::Denied);
        assert_eq!(gate().authorize(Some("s3cr3tt")), Access::Denied);
    }

    #[test]
    fn denies_case_difference() {
        assert_eq!(gate().authorize(Some("S3CR3T")), Access::Denied);
    }

    #[test]
    fn empty_configured_token_still_compares() {
        // The gate compares whatever it is given. An empty configured token
        // matches only an empty presented value.
        let gate = SessionGate::new("");
        assert_eq!(gate.authorize(Some("")), Access::Granted);
        assert_eq!(gate.authorize(Some("anything")), Access::Denied);
        assert_eq!(gate.authorize(None), Access::Denied);
    }
}
