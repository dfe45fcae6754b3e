use super::*;

#[test]
fn unauthorized_is_never_retried() {
    let policy = RetryPolicy::default();
    for attempt in 0..10 {
        assert_eq!(policy.next_delay(ProbeOutcome::Unauthorized, attempt), None);
    }
}

#[test]
fn success_is_never_retried() {
    assert_eq!(RetryPolicy::default().next_delay(ProbeOutcome::Authenticated, 0), None);
}

#[test]
fn failures_back_off_exponentially() {
    let policy = RetryPolicy::default();
    let failed = ProbeOutcome::network_failure();
    assert_eq!(policy.next_delay(failed, 0), Some(Duration::from_secs(5)));
    assert_eq!(policy.next_delay(failed, 1), Some(Duration::from_secs(10)));
    assert_eq!(policy.next_delay(failed, 2), Some(Duration::from_secs(20)));
    assert_eq!(policy.next_delay(failed, 3), None);
}

#[test]
fn backoff_is_capped() {
    let policy = RetryPolicy { max_attempts: 40, ..RetryPolicy::default() };
    let failed = ProbeOutcome::Failed { status: 503 };
    assert_eq!(policy.next_delay(failed, 5), Some(Duration::from_secs(60)));
    assert_eq!(policy.next_delay(failed, 39), Some(Duration::from_secs(60)));
}

#[test]
fn never_policy_stops_immediately() {
    assert_eq!(RetryPolicy::never().next_delay(ProbeOutcome::network_failure(), 0), None);
}
