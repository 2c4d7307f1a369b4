//! Credential cookie issuance and revocation.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration as TimeDuration;

use super::{cookie_domain, cookie_names, token_eq};

/// Outcome of a login attempt.
pub enum LoginOutcome {
    /// The submitted token matched; set this cookie and redirect to `/`.
    CredentialIssued(Cookie<'static>),
    /// The submitted token did not match; re-render the login view with a
    /// warning.
    Rejected,
}

/// Issues and clears the credential cookie.
///
/// Login echoes the submitted token back as a session-lifetime cookie scoped
/// to `/` on the request host. Logout issues the same cookie with an empty
/// value and `Max-Age=0` so the client discards it; it succeeds regardless
/// of the current auth state.
pub struct SessionIssuer {
    token: String,
}

impl SessionIssuer {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Validate a submitted token and issue the credential cookie on match.
    pub fn login(&self, submitted: &str, host: &str) -> LoginOutcome {
        if !token_eq(submitted, &self.token) {
            return LoginOutcome::Rejected;
        }

        let cookie = Cookie::build((cookie_names::TOKEN, submitted.to_string()))
            .path("/")
            .domain(cookie_domain(host))
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        LoginOutcome::CredentialIssued(cookie)
    }

    /// Build an already-expired credential cookie that clears the client's
    /// copy.
    pub fn logout(&self, host: &str) -> Cookie<'static> {
        Cookie::build((cookie_names::TOKEN, ""))
            .path("/")
            .domain(cookie_domain(host))
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(TimeDuration::ZERO)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> SessionIssuer {
        SessionIssuer::new("s3cr3t")
    }

    #[test]
    fn login_issues_cookie_on_match() {
        let outcome = issuer().login("s3cr3t", "example.com:8483");
        let LoginOutcome::CredentialIssued(cookie) = outcome else {
            panic!("expected credential to be issued");
        };
        assert_eq!(cookie.name(), cookie_names::TOKEN);
        assert_eq!(cookie.value(), "s3cr3t");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("example.com"));
        // Session-lifetime cookie: no explicit max-age or expiry
        assert!(cookie.max_age().is_none());
    }

    #[test]
    fn login_rejects_wrong_token() {
        assert!(matches!(
            issuer().login("wrong", "example.com"),
            LoginOutcome::Rejected
        ));
    }

    #[test]
    fn login_rejects_case_mismatch() {
        assert!(matches!(
            issuer().login("S3CR3T", "example.com"),
            LoginOutcome::Rejected
        ));
    }

    #[test]
    fn repeated_login_reissues_equivalent_cookie() {
        let issuer = issuer();
        let (LoginOutcome::CredentialIssued(first), LoginOutcome::CredentialIssued(second)) =
            (issuer.login("s3cr3t", "host"), issuer.login("s3cr3t", "host"))
        else {
            panic!("expected both logins to issue credentials");
        };
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        let cookie = issuer().logout("example.com:8483");
        assert_eq!(cookie.name(), cookie_names::TOKEN);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
    }
}
