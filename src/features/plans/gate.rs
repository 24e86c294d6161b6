//! Plan gate decision: whether a protected-page entry should see plan
//! selection, be forwarded past it, or be bounced to sign-in/verification.
//!
//! The decision is pure; the route fetches the session records first and
//! handles `RetryRefresh` by pausing briefly, refetching the user once, and
//! re-evaluating with `retried` set.

use crate::features::auth::types::{Organization, User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// No stored credential, or the session could not be established.
    RedirectLogin,
    /// Email unverified and no fresh verification to trust: back to the
    /// verification screen in pending mode.
    RedirectVerify,
    /// Verification just succeeded but the read is stale; wait out the
    /// propagation lag and refetch once.
    RetryRefresh,
    /// A paid plan is already active; skip plan selection.
    Forward,
    ShowPlans,
}

#[derive(Clone, Copy, Debug)]
pub struct GateInput<'a> {
    /// A session credential is stored client-side.
    pub authenticated: bool,
    pub user: Option<&'a User>,
    pub organization: Option<&'a Organization>,
    /// Entry carried the `verified` flag: verification just completed and a
    /// stale read must not be mistaken for "still unverified".
    pub just_verified: bool,
    /// The one stale-read refetch has already happened.
    pub retried: bool,
}

pub fn evaluate(input: GateInput<'_>) -> GateDecision {
    if !input.authenticated {
        return GateDecision::RedirectLogin;
    }
    let Some(user) = input.user else {
        return GateDecision::RedirectLogin;
    };

    if !user.email_verified {
        if !input.just_verified {
            return GateDecision::RedirectVerify;
        }
        if !input.retried {
            return GateDecision::RetryRefresh;
        }
        // The exchange already succeeded server-side; after one retry the
        // stale read is tolerated rather than re-litigated.
    }

    match input.organization {
        Some(organization) if !organization.plan.is_free() => GateDecision::Forward,
        _ => GateDecision::ShowPlans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::types::Plan;

    fn user(verified: bool) -> User {
        User {
            id: "u1".to_string(),
            email: "kim@vantage.dev".to_string(),
            name: "Kim".to_string(),
            email_verified: verified,
            avatar: None,
        }
    }

    fn organization(plan: Plan) -> Organization {
        Organization {
            id: "o1".to_string(),
            plan,
        }
    }

    fn input<'a>(
        user: Option<&'a User>,
        organization: Option<&'a Organization>,
    ) -> GateInput<'a> {
        GateInput {
            authenticated: true,
            user,
            organization,
            just_verified: false,
            retried: false,
        }
    }

    #[test]
    fn missing_credential_redirects_to_login() {
        let decision = evaluate(GateInput {
            authenticated: false,
            ..input(None, None)
        });
        assert_eq!(decision, GateDecision::RedirectLogin);
    }

    #[test]
    fn unfetchable_user_redirects_to_login() {
        assert_eq!(evaluate(input(None, None)), GateDecision::RedirectLogin);
    }

    #[test]
    fn unverified_without_flag_redirects_to_verification() {
        let user = user(false);
        assert_eq!(
            evaluate(input(Some(&user), None)),
            GateDecision::RedirectVerify
        );
    }

    #[test]
    fn stale_read_after_verification_retries_once_then_proceeds() {
        let user = user(false);
        let org = organization(Plan::Free);

        let first = GateInput {
            just_verified: true,
            ..input(Some(&user), Some(&org))
        };
        assert_eq!(evaluate(first), GateDecision::RetryRefresh);

        // still stale after the retry: proceed anyway, never bounce back
        let second = GateInput {
            just_verified: true,
            retried: true,
            ..input(Some(&user), Some(&org))
        };
        assert_eq!(evaluate(second), GateDecision::ShowPlans);
    }

    #[test]
    fn paid_plan_skips_plan_selection() {
        let user = user(true);
        for plan in [Plan::Standard, Plan::Pro, Plan::Enterprise] {
            let org = organization(plan);
            assert_eq!(
                evaluate(input(Some(&user), Some(&org))),
                GateDecision::Forward
            );
        }
    }

    #[test]
    fn free_plan_shows_choices() {
        let user = user(true);
        let org = organization(Plan::Free);
        assert_eq!(
            evaluate(input(Some(&user), Some(&org))),
            GateDecision::ShowPlans
        );
    }

    #[test]
    fn missing_organization_defaults_to_choices() {
        let user = user(true);
        assert_eq!(evaluate(input(Some(&user), None)), GateDecision::ShowPlans);
    }
}
