//! Home-directory and environment-variable expansion

mod common;

use common::{join, Fixture};
use pth_rs::Path;
use serial_test::serial;

/// Home directory of `user` according to /etc/passwd
#[cfg(target_os = "linux")]
fn passwd_home(user: &str) -> Option<String> {
    let passwd = std::fs::read_to_string("/etc/passwd").ok()?;
    passwd.lines().find_map(|line| {
        let fields: Vec<&str> = line.split(':').collect();
        (fields.len() >= 6 && fields[0] == user).then(|| fields[5].to_string())
    })
}

#[cfg(target_os = "linux")]
#[test]
fn test_expand_user_root() {
    if let Some(home) = passwd_home("root") {
        assert_eq!(Path::new("~root").expand_user(), home.as_str());
        assert_eq!(
            Path::new("~root/stuff").expand_user(),
            join(&home, "stuff")
        );
    }
}

#[test]
fn test_expand_user_inside_archive_is_noop() {
    let fx = Fixture::new();
    let inside = Path::new(join(&fx.archive(), "~root"));

    assert!(inside.is_archive());
    assert_eq!(inside.expand_user(), inside);
    assert_eq!(inside.expand_user(), join(&fx.archive(), "~root"));
}

#[test]
#[serial]
fn test_expand_vars_leaves_entry_names_alone() {
    std::env::set_var("PTH_TEST_FOOBAR", "1");
    let fx = Fixture::new();

    let inside = Path::from_segments([fx.archive().as_str(), "$PTH_TEST_FOOBAR"]);
    assert!(inside.is_archive());
    assert_eq!(inside.expand_vars(), inside);

    std::env::remove_var("PTH_TEST_FOOBAR");
}

#[test]
#[serial]
fn test_expand_vars_can_reach_an_archive() {
    std::env::set_var("PTH_TEST_FOOBAR", "test");
    let fx = Fixture::new();

    let templated = Path::from_segments([fx.root().as_str(), "$PTH_TEST_FOOBAR.zip"]);
    assert!(!templated.is_archive());

    let expanded = templated.expand_vars();
    assert!(expanded.is_archive());
    assert_eq!(expanded, fx.archive());

    std::env::remove_var("PTH_TEST_FOOBAR");
}

#[test]
#[serial]
fn test_expand_vars_in_archive_location() {
    let fx = Fixture::new();
    std::env::set_var("PTH_TEST_ROOT", fx.root());

    // Built from parts, so the unexpanded location is never probed
    let templated = Path::from_parts("$PTH_TEST_ROOT/test.zip", Some("pw"), "1/nested.txt");
    let expanded = templated.expand_vars();

    let archive = expanded.as_archive().unwrap();
    assert_eq!(archive.location(), fx.archive());
    assert_eq!(archive.entry_name(), "1/nested.txt");
    assert_eq!(archive.password(), Some("pw"));

    std::env::remove_var("PTH_TEST_ROOT");
}
