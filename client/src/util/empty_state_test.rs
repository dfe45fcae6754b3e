use session::ErrorDetails;

use super::*;

fn not_found(events_present: Option<bool>, in_docker: Option<bool>) -> ApiError {
    ApiError::new(404, "FileNotFound", "missing").with_details(&ErrorDetails { in_docker, events_present })
}

#[test]
fn missing_events_asks_for_import() {
    let err = not_found(Some(false), Some(false));
    assert_eq!(EmptyState::for_failure(&Resource::Portfolio, &err), EmptyState::ImportTrades);
    assert_eq!(EmptyState::for_failure(&Resource::Performance, &err), EmptyState::ImportTrades);
    assert_eq!(EmptyState::for_failure(&Resource::Taxation, &err), EmptyState::ImportEvents);
}

#[test]
fn present_events_ask_for_calculation() {
    let err = not_found(Some(true), Some(false));
    assert_eq!(EmptyState::for_failure(&Resource::Performance, &err), EmptyState::RunPerformance);
    assert_eq!(EmptyState::for_failure(&Resource::Pl, &err), EmptyState::RunPerformance);
    assert_eq!(EmptyState::for_failure(&Resource::Taxation, &err), EmptyState::RunTaxation);
    assert_eq!(EmptyState::for_failure(&Resource::Portfolio, &err), EmptyState::Default);
}

#[test]
fn missing_details_count_as_no_events() {
    let err = ApiError::new(404, "FileNotFound", "missing");
    assert_eq!(EmptyState::for_failure(&Resource::Taxation, &err), EmptyState::ImportEvents);
    assert!(!in_docker(&err));
}

#[test]
fn filtered_views_use_default() {
    let err = not_found(Some(false), None);
    assert_eq!(
        EmptyState::for_failure(&Resource::Timeline { start_date: "2024-01-01".to_owned() }, &err),
        EmptyState::Default
    );
    assert_eq!(EmptyState::for_failure(&Resource::Positions { date: None }, &err), EmptyState::Default);
    assert!(EmptyState::Default.instruction(true).is_none());
}

#[test]
fn instruction_prefixes_docker_exec() {
    assert_eq!(EmptyState::RunTaxation.instruction(false).as_deref(), Some("./doughbox taxation"));
    assert_eq!(
        EmptyState::RunPerformance.instruction(true).as_deref(),
        Some("docker container exec -it container_name ./doughbox performance")
    );
    assert!(in_docker(&not_found(Some(true), Some(true))));
}
