use pixel_pioneers::config::{API_KEY_VAR, Config};
use pixel_pioneers::GameError;
mod common;

#[ctor::ctor]
fn _init() { common::init(); }

#[test]
fn config_defaults() {
    let c = Config::new();
    assert_eq!(c.model, "gpt-4o-mini");
    assert_eq!(c.max_completion_tokens, 2000);
    assert_eq!(c.poll_interval_ms, 100);
    assert!(c.api_key.is_none());
}

#[test]
fn missing_credential_is_fatal_startup_error() {
    let err = Config::from_vars(|_| None).unwrap_err();
    assert!(matches!(err, GameError::StartupConfig(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn credential_only_keeps_defaults() {
    let c = Config::from_vars(|k| (k == API_KEY_VAR).then(|| "sk-test".to_string())).unwrap();
    assert_eq!(c.api_key.as_deref(), Some("sk-test"));
    assert_eq!(c.model, "gpt-4o-mini");
    assert!(c.api_base.is_none());
}
