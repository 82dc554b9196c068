use super::*;

fn set(versions: &[&str]) -> BTreeSet<String> {
    versions.iter().map(|v| v.to_string()).collect()
}

fn pkg(name: &str, versions: &[&str]) -> Package {
    Package {
        name: name.to_string(),
        versions: versions.iter().map(|v| v.to_string()).collect(),
    }
}

#[test]
fn test_single_overlap_is_enough() {
    // Only one of the requested versions is installed
    let found = vec![pkg("rake", &["13.0.1", "12.3.3"])];
    let requested = set(&["12.3.3", "99.0.0"]);

    assert_eq!(find_overlap(&requested, &found), Some("12.3.3"));
}

#[test]
fn test_overlap_in_later_entry() {
    // First entry does not match, second one does
    let found = vec![
        pkg("kernel", &["4.18.0", "4.18.0-305.el8"]),
        pkg("kernel", &["5.14.0", "5.14.0-70.el9"]),
    ];

    assert_eq!(find_overlap(&set(&["5.14.0"]), &found), Some("5.14.0"));
}

#[test]
fn test_no_overlap() {
    let found = vec![pkg("curl", &["7.68.0"])];

    assert_eq!(find_overlap(&set(&["9.9.9"]), &found), None);
    assert_eq!(find_overlap(&set(&[]), &found), None);
    assert_eq!(find_overlap(&set(&["7.68.0"]), &[]), None);
}

#[test]
fn test_overlap_matches_set_intersection() {
    let found = vec![pkg("a", &["1", "2"]), pkg("a", &["3"]), pkg("a", &[])];
    let union: BTreeSet<String> = set(&["1", "2", "3"]);

    for requested in [
        set(&["1"]),
        set(&["3", "4"]),
        set(&["4"]),
        set(&["0", "5"]),
        set(&["2", "3"]),
    ] {
        let intersects = requested.intersection(&union).next().is_some();
        assert_eq!(find_overlap(&requested, &found).is_some(), intersects);
    }
}

#[test]
fn test_discovered_versions_dedup_in_order() {
    let found = vec![pkg("a", &["2", "1"]), pkg("a", &["1", "3"])];
    assert_eq!(discovered_versions(&found), vec!["2", "1", "3"]);
}
