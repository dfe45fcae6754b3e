use super::*;
use crate::phase::ProbeOutcome;

fn authed() -> SessionProbe {
    SessionProbe::settled(ProbeOutcome::Authenticated)
}

fn unauthorized() -> SessionProbe {
    SessionProbe::settled(ProbeOutcome::Unauthorized)
}

fn network_down() -> SessionProbe {
    SessionProbe::settled(ProbeOutcome::network_failure())
}

/// Every probe snapshot the reconciler can be fed.
fn all_snapshots() -> [SessionProbe; 4] {
    [SessionProbe::pending(), authed(), unauthorized(), network_down()]
}

/// All snapshot sequences up to `len` long.
fn sequences(len: usize) -> Vec<Vec<SessionProbe>> {
    let mut out = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..len {
        let mut next = Vec::new();
        for seq in &frontier {
            for snapshot in all_snapshots() {
                let mut extended: Vec<SessionProbe> = seq.clone();
                extended.push(snapshot);
                next.push(extended);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

fn replay(seq: &[SessionProbe]) -> Reconciler {
    let mut rec = Reconciler::default();
    for probe in seq {
        rec.observe(probe);
    }
    rec
}

// =============================================================================
// state machine
// =============================================================================

#[test]
fn starts_unknown_and_pending() {
    let rec = Reconciler::default();
    assert_eq!(rec.phase(), AuthPhase::Unknown);
    assert!(rec.is_pending());
}

#[test]
fn unknown_to_authenticated_on_success() {
    let mut rec = Reconciler::default();
    let t = rec.observe(&authed());
    assert!(t.entered_authenticated());
    assert_eq!(rec.phase(), AuthPhase::Authenticated);
}

#[test]
fn unknown_to_unauthenticated_on_401() {
    let mut rec = Reconciler::default();
    let t = rec.observe(&unauthorized());
    assert!(t.entered_unauthenticated());
    assert_eq!(rec.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn authenticated_to_unauthenticated_on_reprobe_401() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    let t = rec.observe(&unauthorized());
    assert_eq!(t, Transition { from: AuthPhase::Authenticated, to: AuthPhase::Unauthenticated });
}

#[test]
fn login_and_logout_actions_transition() {
    let mut rec = Reconciler::default();
    rec.observe(&unauthorized());
    assert!(rec.signed_in().entered_authenticated());
    assert!(rec.signed_out().entered_unauthenticated());
}

#[test]
fn network_failure_keeps_previous_phase() {
    let mut rec = Reconciler::default();
    rec.observe(&network_down());
    assert_eq!(rec.phase(), AuthPhase::Unknown);

    rec.observe(&authed());
    let t = rec.observe(&network_down());
    assert!(!t.changed());
    assert_eq!(rec.phase(), AuthPhase::Authenticated);
}

#[test]
fn revalidation_keeps_phase_while_pending() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    rec.observe(&SessionProbe::pending());
    assert_eq!(rec.phase(), AuthPhase::Authenticated);
    assert!(rec.is_pending());
}

// =============================================================================
// decisions
// =============================================================================

#[test]
fn authenticated_at_login_goes_to_landing() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    let nav = rec.decide("/login").expect("redirect");
    assert_eq!(nav.to, "/dashboard");
    assert_eq!(nav.reason, NavigationReason::SignedIn);
}

#[test]
fn authenticated_at_root_goes_to_landing() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    assert_eq!(rec.decide("/").map(|n| n.to), Some("/dashboard".to_owned()));
}

#[test]
fn authenticated_on_dashboard_stays() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    assert_eq!(rec.decide("/dashboard/positions"), None);
}

#[test]
fn unauthenticated_under_prefix_goes_to_login() {
    let mut rec = Reconciler::default();
    rec.observe(&unauthorized());
    let nav = rec.decide("/dashboard/taxation").expect("redirect");
    assert_eq!(nav.to, "/login");
    assert_eq!(nav.reason, NavigationReason::SignedOut);
}

#[test]
fn unauthenticated_at_root_goes_to_login() {
    let mut rec = Reconciler::default();
    rec.observe(&unauthorized());
    assert_eq!(rec.decide("/").map(|n| n.to), Some("/login".to_owned()));
}

#[test]
fn unauthenticated_at_login_or_public_page_stays() {
    let mut rec = Reconciler::default();
    rec.observe(&unauthorized());
    assert_eq!(rec.decide("/login"), None);
    assert_eq!(rec.decide("/about"), None);
}

#[test]
fn network_failure_never_redirects() {
    let mut rec = Reconciler::default();
    rec.observe(&network_down());
    for location in ["/", "/login", "/dashboard"] {
        assert_eq!(rec.decide(location), None, "unexpected redirect at {location}");
    }
}

#[test]
fn landing_redirect_issued_once_until_applied() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    assert!(rec.decide("/login").is_some());
    assert_eq!(rec.decide("/login"), None);
    rec.applied();
    assert!(rec.decide("/login").is_some());
}

#[test]
fn arriving_at_target_clears_in_flight() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    assert!(rec.decide("/login").is_some());
    assert_eq!(rec.decide("/dashboard"), None);
    assert!(rec.decide("/login").is_some());
}

#[test]
fn phase_change_rearms_decisions() {
    let mut rec = Reconciler::default();
    rec.observe(&authed());
    assert!(rec.decide("/").is_some());
    rec.signed_out();
    assert_eq!(rec.decide("/").map(|n| n.to), Some("/login".to_owned()));
}

// =============================================================================
// properties over all probe sequences
// =============================================================================

#[test]
fn authenticated_at_login_always_leaves_login() {
    for seq in sequences(4) {
        let mut rec = replay(&seq);
        if rec.phase() == AuthPhase::Authenticated && !rec.is_pending() {
            let nav = rec.decide("/login");
            assert!(
                nav.as_ref().is_some_and(|n| n.to != "/login"),
                "sequence {seq:?} stayed on /login"
            );
        }
    }
}

#[test]
fn unauthenticated_under_prefix_always_goes_to_login() {
    for seq in sequences(4) {
        let mut rec = replay(&seq);
        if rec.phase() == AuthPhase::Unauthenticated && !rec.is_pending() {
            let nav = rec.decide("/dashboard/positions");
            assert_eq!(nav.map(|n| n.to), Some("/login".to_owned()), "sequence {seq:?}");
        }
    }
}

#[test]
fn no_redirect_while_pending() {
    for seq in sequences(3) {
        let mut rec = replay(&seq);
        rec.observe(&SessionProbe::pending());
        for location in ["/", "/login", "/dashboard", "/dashboard/pl"] {
            assert_eq!(rec.decide(location), None, "sequence {seq:?} at {location}");
        }
    }
}
