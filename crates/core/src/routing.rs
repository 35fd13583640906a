//! Role-based page routing.
//!
//! Two decisions live here:
//!
//! - [`edge_decision`] runs on every page request before any handler and only
//!   looks at the `user_role` cookie. It never talks to the backend.
//! - [`guard`] runs inside protected pages after the backend confirmed who the
//!   caller is.

use crate::roles::{Role, DASHBOARD_PREFIX, LOGIN_PATH, MANAGEMENT_PREFIX};

/// Outcome of the cookie-based edge check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    Continue,
    Redirect(String),
}

/// Whether the edge middleware applies to `path` at all.
///
/// Matches `/`, `/auth/login` and everything under `/dashboard`.
pub fn edge_applies(path: &str) -> bool {
    path == "/" || path == LOGIN_PATH || path.starts_with(DASHBOARD_PREFIX)
}

/// Decide whether a page request proceeds or is redirected, given the raw
/// `user_role` cookie value.
///
/// An empty cookie counts as logged out. An unrecognised role name falls
/// back to `/dashboard` as its home, which lets it through every dashboard
/// path.
pub fn edge_decision(role_cookie: Option<&str>, path: &str) -> EdgeDecision {
    let role = match role_cookie {
        Some(r) if !r.is_empty() => r,
        _ => {
            if path.starts_with(DASHBOARD_PREFIX) {
                return EdgeDecision::Redirect(LOGIN_PATH.to_string());
            }
            return EdgeDecision::Continue;
        }
    };

    let home = Role::from_name(role)
        .map(Role::dashboard_path)
        .unwrap_or(DASHBOARD_PREFIX);

    if path == LOGIN_PATH {
        return EdgeDecision::Redirect(home.to_string());
    }

    if path.starts_with(DASHBOARD_PREFIX) {
        if path.starts_with(MANAGEMENT_PREFIX) {
            return EdgeDecision::Continue;
        }
        if !path.starts_with(home) {
            return EdgeDecision::Redirect(home.to_string());
        }
    }

    EdgeDecision::Continue
}

/// Outcome of the backend-confirmed role check on a protected page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow(Role),
    Redirect(&'static str),
}

/// Check the role reported by the "who am I" call against `allowed`.
///
/// `who_am_i` is `None` when the call failed. A known role outside `allowed`
/// is sent to its own dashboard; an unknown role is sent to login.
pub fn guard(allowed: &[Role], who_am_i: Option<&str>) -> GuardOutcome {
    let Some(name) = who_am_i else {
        return GuardOutcome::Redirect(LOGIN_PATH);
    };
    match Role::from_name(name) {
        Some(role) if allowed.contains(&role) => GuardOutcome::Allow(role),
        Some(role) => GuardOutcome::Redirect(role.dashboard_path()),
        None => GuardOutcome::Redirect(LOGIN_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(to: &str) -> EdgeDecision {
        EdgeDecision::Redirect(to.to_string())
    }

    #[test]
    fn applies_to_matched_paths_only() {
        assert!(edge_applies("/"));
        assert!(edge_applies("/auth/login"));
        assert!(edge_applies("/dashboard"));
        assert!(edge_applies("/dashboard/doctor/detail/abc"));
        assert!(!edge_applies("/carstensz/form"));
        assert!(!edge_applies("/api/proxy/me"));
    }

    #[test]
    fn anonymous_dashboard_goes_to_login() {
        assert_eq!(edge_decision(None, "/dashboard/admin"), redirect("/auth/login"));
        assert_eq!(edge_decision(Some(""), "/dashboard"), redirect("/auth/login"));
    }

    #[test]
    fn anonymous_public_pages_continue() {
        assert_eq!(edge_decision(None, "/"), EdgeDecision::Continue);
        assert_eq!(edge_decision(None, "/auth/login"), EdgeDecision::Continue);
    }

    #[test]
    fn logged_in_login_page_goes_home() {
        assert_eq!(
            edge_decision(Some("cashier"), "/auth/login"),
            redirect("/dashboard/cashier")
        );
    }

    #[test]
    fn role_mismatch_redirects_to_own_dashboard() {
        assert_eq!(
            edge_decision(Some("nurse"), "/dashboard/doctor"),
            redirect("/dashboard/nurse")
        );
        assert_eq!(
            edge_decision(Some("doctor"), "/dashboard/admin/staff"),
            redirect("/dashboard/doctor")
        );
    }

    #[test]
    fn own_dashboard_and_subpaths_continue() {
        assert_eq!(
            edge_decision(Some("doctor"), "/dashboard/doctor/detail/u-1"),
            EdgeDecision::Continue
        );
    }

    #[test]
    fn management_is_open_to_every_role() {
        for role in Role::ALL {
            assert_eq!(
                edge_decision(Some(role.as_str()), "/dashboard/management/activity/nurse"),
                EdgeDecision::Continue
            );
        }
    }

    #[test]
    fn unknown_role_is_homed_at_dashboard_root() {
        assert_eq!(edge_decision(Some("intern"), "/dashboard/admin"), EdgeDecision::Continue);
        assert_eq!(edge_decision(Some("intern"), "/auth/login"), redirect("/dashboard"));
    }

    #[test]
    fn root_continues_for_logged_in_users() {
        assert_eq!(edge_decision(Some("admin"), "/"), EdgeDecision::Continue);
    }

    #[test]
    fn guard_allows_listed_role() {
        assert_eq!(
            guard(&[Role::Doctor, Role::Admin], Some("admin")),
            GuardOutcome::Allow(Role::Admin)
        );
    }

    #[test]
    fn guard_sends_other_roles_home() {
        assert_eq!(
            guard(&[Role::Doctor], Some("cashier")),
            GuardOutcome::Redirect("/dashboard/cashier")
        );
    }

    #[test]
    fn guard_failure_and_unknown_role_go_to_login() {
        assert_eq!(guard(&[Role::Doctor], None), GuardOutcome::Redirect("/auth/login"));
        assert_eq!(
            guard(&[Role::Doctor], Some("visitor")),
            GuardOutcome::Redirect("/auth/login")
        );
    }
}
