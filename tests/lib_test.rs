//! Library integration tests.

use std::time::Duration;

use tcltk_setup::config::SetupConfig;
use tcltk_setup::runner::{resolve_version, RetryPolicy};
use tcltk_setup::version::{classify, CompatibilityVerdict, SupportedVersion, VersionString};
use tcltk_setup::SetupError;

#[test]
fn error_types_are_public() {
    let err = SetupError::RetryExhausted { attempts: 3 };
    assert!(err.to_string().contains("3 attempt"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> tcltk_setup::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use tcltk_setup::cli::{Cli, Commands};

    let cli = Cli::parse_from(["tcltk-setup", "locate", "--root", "/opt/tcl", "--json"]);

    if let Some(Commands::Locate(args)) = cli.command {
        assert!(args.json);
        assert_eq!(args.roots.len(), 1);
    } else {
        panic!("Expected Locate command");
    }
}

#[test]
fn classifier_is_public() {
    let supported = SupportedVersion::default();
    let found = VersionString::parse("8.6.14");
    assert_eq!(
        classify(found.as_ref(), &supported),
        CompatibilityVerdict::Compatible
    );
}

#[test]
fn retry_waits_between_attempts_only() {
    let calls = std::cell::Cell::new(0);
    let sleeps = std::cell::RefCell::new(Vec::new());
    let probe = || {
        calls.set(calls.get() + 1);
        if calls.get() == 2 {
            VersionString::parse("8.6.13")
        } else {
            None
        }
    };
    let sleep = |d: Duration| sleeps.borrow_mut().push(d);

    let version = resolve_version(&probe, &RetryPolicy::default(), &sleep).unwrap();

    assert_eq!(version.as_str(), "8.6.13");
    assert_eq!(*sleeps.borrow(), vec![Duration::from_secs(5)]);
}

#[test]
fn default_config_targets_eight_six() {
    let config = SetupConfig::default();
    assert_eq!(config.supported_version.as_str(), "8.6");
}
