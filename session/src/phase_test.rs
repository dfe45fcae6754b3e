use super::*;

#[test]
fn from_status_classifies_success_range() {
    assert_eq!(ProbeOutcome::from_status(200), ProbeOutcome::Authenticated);
    assert_eq!(ProbeOutcome::from_status(204), ProbeOutcome::Authenticated);
}

#[test]
fn from_status_classifies_401_as_unauthorized() {
    assert_eq!(ProbeOutcome::from_status(401), ProbeOutcome::Unauthorized);
}

#[test]
fn from_status_keeps_other_failures_generic() {
    assert_eq!(ProbeOutcome::from_status(403), ProbeOutcome::Failed { status: 403 });
    assert_eq!(ProbeOutcome::from_status(502), ProbeOutcome::Failed { status: 502 });
}

#[test]
fn network_failure_reports_500() {
    assert_eq!(ProbeOutcome::network_failure(), ProbeOutcome::Failed { status: 500 });
}

#[test]
fn pending_probe_reads_authenticated_without_outcome() {
    let probe = SessionProbe::pending();
    assert!(probe.pending);
    assert!(probe.authenticated);
    assert_eq!(probe.outcome(), None);
    assert_eq!(probe.phase_hint(), None);
}

#[test]
fn unauthorized_probe_is_the_only_unauthenticated_snapshot() {
    let probe = SessionProbe::settled(ProbeOutcome::Unauthorized);
    assert!(!probe.authenticated);
    assert_eq!(probe.failure_status, Some(401));
    assert!(probe.is_unauthorized());

    let failed = SessionProbe::settled(ProbeOutcome::network_failure());
    assert!(failed.authenticated);
    assert!(!failed.is_unauthorized());
}

#[test]
fn settled_snapshot_reproduces_its_outcome() {
    for outcome in [
        ProbeOutcome::Authenticated,
        ProbeOutcome::Unauthorized,
        ProbeOutcome::Failed { status: 503 },
    ] {
        assert_eq!(SessionProbe::settled(outcome).outcome(), Some(outcome));
    }
}

#[test]
fn generic_failure_implies_no_phase() {
    let probe = SessionProbe::settled(ProbeOutcome::Failed { status: 500 });
    assert_eq!(probe.phase_hint(), None);
}

#[test]
fn transition_reports_entries() {
    let t = Transition { from: AuthPhase::Authenticated, to: AuthPhase::Unauthenticated };
    assert!(t.changed());
    assert!(t.entered_unauthenticated());
    assert!(!t.entered_authenticated());

    let noop = Transition { from: AuthPhase::Unauthenticated, to: AuthPhase::Unauthenticated };
    assert!(!noop.changed());
    assert!(!noop.entered_unauthenticated());
}

#[test]
fn phase_display_is_snake_case() {
    assert_eq!(AuthPhase::Unknown.to_string(), "unknown");
    assert_eq!(AuthPhase::Unauthenticated.to_string(), "unauthenticated");
    assert_eq!(
        serde_json::to_string(&AuthPhase::Authenticated).expect("serialize"),
        "\"authenticated\""
    );
}
