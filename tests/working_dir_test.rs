//! Working-directory scopes
//!
//! Every test here moves the process working directory, so all of them run
//! serially.

mod common;

use common::Fixture;
use pth_rs::{current_dir, Path, PathError, PathMetadata, WorkingDir};
use serial_test::serial;
use std::panic;

fn cwd() -> std::path::PathBuf {
    std::env::current_dir().unwrap()
}

#[test]
#[serial]
fn test_scope_restores_after_error() {
    let before = cwd();
    let fx = Fixture::new();

    let run = || -> pth_rs::Result<()> {
        let _guard = Path::new(fx.root()).cd().scope()?;
        assert_eq!(current_dir()?, fx.root());
        Err(PathError::NotSupported("bail out of the scope".to_string()))
    };

    assert!(run().is_err());
    assert_eq!(cwd(), before);
}

#[test]
#[serial]
fn test_scope_restores_after_panic() {
    let before = cwd();
    let fx = Fixture::new();
    let root = fx.root();

    let result = panic::catch_unwind(|| {
        let _guard = WorkingDir::new(root.as_str()).scope().unwrap();
        panic!("raised inside the scope");
    });

    assert!(result.is_err());
    assert_eq!(cwd(), before);
}

#[test]
#[serial]
fn test_nested_scopes_restore_in_order() {
    let before = cwd();
    let fx = Fixture::new();
    let outer = Path::new(fx.root());
    let inner_dir = outer.join("inner");
    std::fs::create_dir(inner_dir.as_str()).unwrap();

    {
        let _outer = outer.cd().scope().unwrap();
        {
            let _inner = inner_dir.cd().scope().unwrap();
            assert_eq!(current_dir().unwrap(), inner_dir);
        }
        assert_eq!(current_dir().unwrap(), outer);
    }

    assert_eq!(cwd(), before);
}

#[test]
#[serial]
fn test_within_returns_closure_value() {
    let before = cwd();
    let fx = Fixture::new();

    let seen = WorkingDir::new(fx.root())
        .within(|target| {
            assert!(Path::new("b.txt").is_file());
            target.clone()
        })
        .unwrap();

    assert_eq!(seen, fx.root());
    assert_eq!(cwd(), before);
}

#[test]
#[serial]
fn test_enter_is_permanent() {
    let before = cwd();
    let fx = Fixture::new();

    Path::new(fx.root()).cd().enter().unwrap();
    assert_eq!(current_dir().unwrap(), fx.root());

    std::env::set_current_dir(&before).unwrap();
}

#[test]
#[serial]
fn test_cd_into_archive_fails_fast() {
    let before = cwd();
    let fx = Fixture::new();

    let archive = Path::new(fx.archive());
    assert!(archive.is_dir());
    assert!(matches!(archive.cd().enter(), Err(PathError::NotSupported(_))));
    assert!(matches!(
        (&archive / "1").cd().scope(),
        Err(PathError::NotSupported(_))
    ));

    // A string target goes through the same boundary detection
    assert!(matches!(
        WorkingDir::new(fx.archive()).enter(),
        Err(PathError::NotSupported(_))
    ));
    assert_eq!(cwd(), before);
}

#[test]
#[serial]
fn test_tmp_with_scope() {
    let before = cwd();
    let scratch = pth_rs::tmp().unwrap();
    {
        let here = scratch.cd().scope().unwrap();
        assert_eq!(*here, *scratch);
        assert_eq!(Path::new("path").abspath().unwrap(), scratch.join("path"));
    }
    assert_eq!(cwd(), before);
}
