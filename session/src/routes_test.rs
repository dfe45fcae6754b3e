use super::*;

#[test]
fn route_path_strips_query_and_fragment() {
    assert_eq!(route_path("/login?next=/dashboard"), "/login");
    assert_eq!(route_path("/dashboard#taxation"), "/dashboard");
}

#[test]
fn route_path_ignores_trailing_slash_except_root() {
    assert_eq!(route_path("/login/"), "/login");
    assert_eq!(route_path("/"), "/");
    assert_eq!(route_path(""), "/");
}

#[test]
fn protected_prefix_matches_at_segment_boundary() {
    let routes = RouteTable::default();
    assert!(routes.is_protected("/dashboard"));
    assert!(routes.is_protected("/dashboard/taxation"));
    assert!(routes.is_protected("/dashboard?tab=2"));
    assert!(!routes.is_protected("/dashboards"));
    assert!(!routes.is_protected("/login"));
    assert!(!routes.is_protected("/"));
}

#[test]
fn login_and_root_are_recognized() {
    let routes = RouteTable::default();
    assert!(routes.is_login("/login"));
    assert!(routes.is_login("/login?expired=1"));
    assert!(!routes.is_login("/logins"));
    assert!(routes.is_root("/"));
    assert!(!routes.is_root("/dashboard"));
}

#[test]
fn custom_table_uses_its_own_paths() {
    let routes = RouteTable {
        login: "/signin".to_owned(),
        root: "/".to_owned(),
        landing: "/app/home".to_owned(),
        protected_prefix: "/app".to_owned(),
    };
    assert!(routes.is_login("/signin"));
    assert!(routes.is_protected("/app/home"));
    assert!(!routes.is_protected("/dashboard"));
}
