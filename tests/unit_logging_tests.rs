use casper_runner::logging::{parse_level_str, resolve_level};
use tracing::Level;

#[test]
fn test_parse_known_levels() {
    assert_eq!(parse_level_str("error"), Some(Level::ERROR));
    assert_eq!(parse_level_str("WARN"), Some(Level::WARN));
    assert_eq!(parse_level_str("warning"), Some(Level::WARN));
    assert_eq!(parse_level_str(" info "), Some(Level::INFO));
    assert_eq!(parse_level_str("Debug"), Some(Level::DEBUG));
    assert_eq!(parse_level_str("trace"), Some(Level::TRACE));
    assert_eq!(parse_level_str("verbose"), None);
}

#[test]
fn test_configured_level_wins_over_environment() {
    assert_eq!(resolve_level(Some("debug"), Some("error")).unwrap(), Level::DEBUG);
}

#[test]
fn test_environment_used_when_not_configured() {
    assert_eq!(resolve_level(None, Some("warn")).unwrap(), Level::WARN);
    assert_eq!(resolve_level(Some(" "), Some("trace")).unwrap(), Level::TRACE);
}

#[test]
fn test_defaults_to_info() {
    assert_eq!(resolve_level(None, None).unwrap(), Level::INFO);
}

#[test]
fn test_invalid_environment_falls_back_to_info() {
    assert_eq!(resolve_level(None, Some("chatty")).unwrap(), Level::INFO);
}

#[test]
fn test_invalid_configured_level_is_an_error() {
    assert!(resolve_level(Some("chatty"), None).is_err());
}
