//! Settings installation
//!
//! Kept in its own test binary: installed settings are process-wide.

mod common;

use errs::config::{self, ConfigError, Settings};
use errs::{Error, FramePaths};

#[test]
fn test_installed_settings_drive_capture_and_rendering() {
    common::init_tracing();

    let settings = Settings::from_toml_str("max_depth = 2\nframe_paths = \"base\"").unwrap();
    config::install(settings.clone()).unwrap();

    assert_eq!(config::settings(), &settings);
    assert!(matches!(
        config::install(Settings::default()),
        Err(ConfigError::AlreadyInstalled)
    ));

    let err = Error::new("shallow");
    assert!(!err.stack_trace().is_empty());
    assert!(err.stack_trace().len() <= 2);

    let rendered = format!("{err:#}");
    assert!(!rendered.contains('\t'));
    assert_eq!(rendered, err.verbose(FramePaths::Base).to_string());
}
