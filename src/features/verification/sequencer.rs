//! Verification sequencer: exchanges a one-time token for a verified session
//! exactly once per page lifetime.
//!
//! Token exchange is a destructive, single-use server operation, so duplicate
//! invocations (navigation re-entry, double-mounted effects, a second tab)
//! must be absorbed before they reach the network. The sequencer keeps a
//! ledger of every token value already attempted plus an in-flight flag, and
//! only hands out an [`ExchangeCommand`] when neither blocks the call. The
//! route owns the actual side effects: it dispatches the command, feeds the
//! classified outcome back through [`VerificationSequencer::resolve_exchange`],
//! and acts on the returned [`SuccessHandoff`].

use std::collections::HashSet;
use std::fmt;

use crate::features::auth::types::User;
use crate::features::verification::types::{ExchangeOutcome, VerifyFailure};

/// Visible status of the verification flow.
#[derive(Clone, Debug, PartialEq)]
pub enum VerifyPhase {
    /// Waiting for the user to follow the link in their inbox.
    Pending,
    /// A gateway exchange is in flight.
    Verifying,
    /// The address is verified; a deferred navigation hands off to plan
    /// selection.
    Success,
    /// The current attempt failed. Recoverable via resend where plausible.
    Error {
        kind: VerifyFailure,
        message: String,
    },
}

/// Instruction to call the verification gateway with this token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeCommand {
    pub token: String,
}

/// What the route must do after a successful exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct SuccessHandoff {
    /// Fresh user record carried by the response, to adopt directly.
    pub adopt_user: Option<User>,
    /// Session credential carried by the response, to store.
    pub adopt_credential: Option<String>,
    /// Whether to optimistically mark the stored user verified. False for a
    /// replayed token: the earlier exchange already applied the patch, and
    /// this response carried no payload.
    pub optimistic: bool,
}

/// Raised by resend when neither a typed address nor a link hint exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingEmailError;

impl fmt::Display for MissingEmailError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Email is required to resend verification.")
    }
}

impl std::error::Error for MissingEmailError {}

const MISSING_TOKEN_MESSAGE: &str =
    "This link is missing its verification token. Check your email for the most recent link.";

#[derive(Debug)]
pub struct VerificationSequencer {
    phase: VerifyPhase,
    attempted: HashSet<String>,
    in_flight: bool,
    link_email: Option<String>,
}

impl VerificationSequencer {
    /// Builds the sequencer, choosing the initial phase synchronously: a
    /// token present means an exchange is about to start, an explicit
    /// awaiting-email flag shows the pending screen, neither is a
    /// missing-token error. The exchange itself starts when the token is
    /// offered through [`VerificationSequencer::accept_token`].
    pub fn new(token: Option<&str>, awaiting_email: bool, link_email: Option<String>) -> Self {
        let phase = match token.map(str::trim).filter(|value| !value.is_empty()) {
            Some(_) => VerifyPhase::Verifying,
            None if awaiting_email => VerifyPhase::Pending,
            None => VerifyPhase::Error {
                kind: VerifyFailure::MissingToken,
                message: MISSING_TOKEN_MESSAGE.to_string(),
            },
        };

        Self {
            phase,
            attempted: HashSet::new(),
            in_flight: false,
            link_email: link_email.filter(|email| !email.trim().is_empty()),
        }
    }

    pub fn phase(&self) -> &VerifyPhase {
        &self.phase
    }

    /// Offers a token to the sequencer. Returns an exchange command only for
    /// a non-empty token that has never been attempted, while no exchange is
    /// in flight and the flow has not already succeeded. Everything else is
    /// a no-op, which is what absorbs duplicate effect runs.
    pub fn accept_token(&mut self, token: &str) -> Option<ExchangeCommand> {
        let token = token.trim();
        if token.is_empty() || self.in_flight || self.phase == VerifyPhase::Success {
            return None;
        }
        if !self.attempted.insert(token.to_string()) {
            return None;
        }

        self.in_flight = true;
        self.phase = VerifyPhase::Verifying;
        Some(ExchangeCommand {
            token: token.to_string(),
        })
    }

    /// Feeds the classified gateway outcome back. Returns the success handoff
    /// when the flow reached `Success`; a resolution arriving with nothing in
    /// flight (a late or duplicate callback) is ignored.
    pub fn resolve_exchange(&mut self, outcome: ExchangeOutcome) -> Option<SuccessHandoff> {
        if !self.in_flight {
            return None;
        }
        self.in_flight = false;

        match outcome {
            ExchangeOutcome::Verified { user, credential } => {
                self.phase = VerifyPhase::Success;
                Some(SuccessHandoff {
                    adopt_user: user,
                    adopt_credential: credential,
                    optimistic: true,
                })
            }
            ExchangeOutcome::AlreadyVerified => {
                self.phase = VerifyPhase::Success;
                Some(SuccessHandoff {
                    adopt_user: None,
                    adopt_credential: None,
                    optimistic: false,
                })
            }
            ExchangeOutcome::Failed { kind, message } => {
                self.phase = VerifyPhase::Error { kind, message };
                None
            }
        }
    }

    /// Chooses the address for a resend: the typed input when non-empty,
    /// otherwise the hint carried by the inbound link.
    pub fn resend_target(&self, typed_email: &str) -> Result<String, MissingEmailError> {
        let typed = typed_email.trim();
        if !typed.is_empty() {
            return Ok(typed.to_string());
        }
        self.link_email.clone().ok_or(MissingEmailError)
    }

    /// A new token was issued; return to the pending display. The resend
    /// itself never re-attempts verification.
    pub fn resend_accepted(&mut self) {
        self.phase = VerifyPhase::Pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verified_outcome() -> ExchangeOutcome {
        ExchangeOutcome::Verified {
            user: None,
            credential: Some("cred-1".to_string()),
        }
    }

    fn expired_outcome() -> ExchangeOutcome {
        ExchangeOutcome::Failed {
            kind: VerifyFailure::InvalidOrExpired,
            message: "expired".to_string(),
        }
    }

    /// Builds a sequencer that has already dispatched one exchange for `token`.
    fn in_flight(token: &str) -> VerificationSequencer {
        let mut sequencer = VerificationSequencer::new(Some(token), false, None);
        assert!(sequencer.accept_token(token).is_some());
        sequencer
    }

    #[test]
    fn token_in_link_starts_verifying() {
        let mut sequencer = VerificationSequencer::new(Some("abc123"), false, None);
        assert_eq!(sequencer.phase(), &VerifyPhase::Verifying);
        let command = sequencer.accept_token("abc123");
        assert_eq!(command.map(|c| c.token).as_deref(), Some("abc123"));
    }

    #[test]
    fn pending_flag_without_token_waits() {
        let sequencer = VerificationSequencer::new(None, true, None);
        assert_eq!(sequencer.phase(), &VerifyPhase::Pending);
    }

    #[test]
    fn no_token_and_no_flag_is_an_error() {
        let sequencer = VerificationSequencer::new(None, false, None);
        match sequencer.phase() {
            VerifyPhase::Error { kind, .. } => assert_eq!(*kind, VerifyFailure::MissingToken),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_arrival_exchanges_once() {
        // the same token arriving twice in quick succession (a duplicate
        // effect run) must reach the gateway exactly once
        let mut sequencer = in_flight("abc123");
        assert!(sequencer.accept_token("abc123").is_none());
        assert!(sequencer.accept_token(" abc123 ").is_none());
    }

    #[test]
    fn in_flight_blocks_a_second_token() {
        let mut sequencer = in_flight("abc123");
        assert!(sequencer.accept_token("other456").is_none());
    }

    #[test]
    fn attempted_token_stays_burned_after_failure() {
        let mut sequencer = in_flight("expired1");
        assert!(sequencer.resolve_exchange(expired_outcome()).is_none());
        assert!(sequencer.accept_token("expired1").is_none());
        // a genuinely new token may start a fresh attempt
        assert!(sequencer.accept_token("fresh2").is_some());
        assert_eq!(sequencer.phase(), &VerifyPhase::Verifying);
    }

    #[test]
    fn success_hands_off_with_payload() {
        let mut sequencer = in_flight("abc123");
        let handoff = sequencer
            .resolve_exchange(verified_outcome())
            .expect("expected a handoff");
        assert_eq!(sequencer.phase(), &VerifyPhase::Success);
        assert!(handoff.optimistic);
        assert_eq!(handoff.adopt_credential.as_deref(), Some("cred-1"));
    }

    #[test]
    fn replayed_token_reaches_success_without_optimistic_patch() {
        let mut sequencer = in_flight("abc123");
        let handoff = sequencer
            .resolve_exchange(ExchangeOutcome::AlreadyVerified)
            .expect("expected a handoff");
        assert_eq!(sequencer.phase(), &VerifyPhase::Success);
        assert!(!handoff.optimistic);
        assert_eq!(handoff.adopt_user, None);
        assert_eq!(handoff.adopt_credential, None);
    }

    #[test]
    fn no_new_exchange_after_success() {
        let mut sequencer = in_flight("abc123");
        sequencer.resolve_exchange(verified_outcome());
        assert!(sequencer.accept_token("other456").is_none());
    }

    #[test]
    fn late_resolution_is_ignored() {
        let mut sequencer = in_flight("abc123");
        sequencer.resolve_exchange(verified_outcome());
        assert!(sequencer.resolve_exchange(expired_outcome()).is_none());
        assert_eq!(sequencer.phase(), &VerifyPhase::Success);
    }

    #[test]
    fn failure_classifies_and_resend_recovers() {
        let mut sequencer = in_flight("expired1");
        sequencer.resolve_exchange(expired_outcome());
        match sequencer.phase() {
            VerifyPhase::Error { kind, message } => {
                assert_eq!(*kind, VerifyFailure::InvalidOrExpired);
                assert_eq!(message, "expired");
            }
            other => panic!("expected Error, got {other:?}"),
        }

        sequencer.resend_accepted();
        assert_eq!(sequencer.phase(), &VerifyPhase::Pending);
    }

    #[test]
    fn resend_target_prefers_typed_then_link_hint() {
        let sequencer =
            VerificationSequencer::new(None, true, Some("hint@vantage.dev".to_string()));
        assert_eq!(
            sequencer.resend_target("typed@vantage.dev").as_deref(),
            Ok("typed@vantage.dev")
        );
        assert_eq!(
            sequencer.resend_target("  ").as_deref(),
            Ok("hint@vantage.dev")
        );

        let sequencer = VerificationSequencer::new(None, true, Some("   ".to_string()));
        assert_eq!(sequencer.resend_target(""), Err(MissingEmailError));
    }
}
