use super::*;

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn default_policy_matches_swr() {
    let policy = RevalidatePolicy::default();
    assert_eq!(policy.dedupe_interval, secs(2));
    assert!(policy.refresh_interval.is_none());
    assert!(policy.revalidate_on_focus);
}

#[test]
fn never_probed_always_revalidates() {
    let policy = RevalidatePolicy { revalidate_on_focus: false, ..RevalidatePolicy::default() };
    let now = Instant::now();
    for trigger in [RevalidateTrigger::Mount, RevalidateTrigger::Focus, RevalidateTrigger::Interval] {
        assert!(policy.should_revalidate(trigger, None, now));
    }
}

#[test]
fn dedupe_window_suppresses_every_trigger() {
    let policy = RevalidatePolicy { refresh_interval: Some(secs(1)), ..RevalidatePolicy::default() };
    let last = Instant::now();
    let now = last + secs(1);
    for trigger in [RevalidateTrigger::Mount, RevalidateTrigger::Focus, RevalidateTrigger::Interval] {
        assert!(!policy.should_revalidate(trigger, Some(last), now));
    }
}

#[test]
fn focus_honors_flag() {
    let last = Instant::now();
    let now = last + secs(10);
    assert!(RevalidatePolicy::default().should_revalidate(RevalidateTrigger::Focus, Some(last), now));

    let no_focus = RevalidatePolicy { revalidate_on_focus: false, ..RevalidatePolicy::default() };
    assert!(!no_focus.should_revalidate(RevalidateTrigger::Focus, Some(last), now));
    assert!(no_focus.should_revalidate(RevalidateTrigger::Mount, Some(last), now));
}

#[test]
fn interval_requires_refresh_interval() {
    let last = Instant::now();
    assert!(!RevalidatePolicy::default().should_revalidate(RevalidateTrigger::Interval, Some(last), last + secs(600)));

    let polling = RevalidatePolicy { refresh_interval: Some(secs(30)), ..RevalidatePolicy::default() };
    assert!(!polling.should_revalidate(RevalidateTrigger::Interval, Some(last), last + secs(29)));
    assert!(polling.should_revalidate(RevalidateTrigger::Interval, Some(last), last + secs(30)));
}
