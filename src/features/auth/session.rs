//! In-memory session snapshot. A refresh replaces the corresponding field
//! wholesale; the only optimistic local mutation is `email_verified`, and an
//! authoritative refresh always overwrites it.

use crate::features::auth::types::{Organization, User};

/// The current `{user, organization}` pair. Absent fields have not been
/// fetched yet; the whole snapshot is cleared on logout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub organization: Option<Organization>,
}

impl SessionSnapshot {
    /// Replaces the user record wholesale with an authoritative read.
    pub fn replace_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Replaces the organization record wholesale with an authoritative read.
    pub fn replace_organization(&mut self, organization: Organization) {
        self.organization = Some(organization);
    }

    /// Optimistically marks the current user as verified ahead of the next
    /// refresh. No-op when no user has been loaded.
    pub fn mark_email_verified(&mut self) {
        if let Some(user) = self.user.as_mut() {
            user.email_verified = true;
        }
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.organization = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
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

    #[test]
    fn optimistic_patch_is_overwritten_by_refresh() {
        let mut snapshot = SessionSnapshot::default();
        snapshot.replace_user(user(false));

        snapshot.mark_email_verified();
        assert!(snapshot.user.as_ref().is_some_and(|u| u.email_verified));

        // the authoritative value wins when the two disagree
        snapshot.replace_user(user(false));
        assert!(!snapshot.user.as_ref().unwrap().email_verified);
    }

    #[test]
    fn mark_email_verified_without_user_is_a_noop() {
        let mut snapshot = SessionSnapshot::default();
        snapshot.mark_email_verified();
        assert_eq!(snapshot, SessionSnapshot::default());
    }

    #[test]
    fn clear_drops_both_records() {
        let mut snapshot = SessionSnapshot::default();
        snapshot.replace_user(user(true));
        snapshot.replace_organization(Organization {
            id: "o1".to_string(),
            plan: Plan::Pro,
        });
        assert!(snapshot.is_authenticated());

        snapshot.clear();
        assert!(!snapshot.is_authenticated());
        assert_eq!(snapshot.organization, None);
    }
}
