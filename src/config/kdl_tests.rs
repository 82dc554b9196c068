use super::*;
use crate::core::types::ServiceStatus;

#[test]
fn test_empty_document_gives_defaults() {
    let settings = parse_settings("").expect("parse");
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_timeout() {
    let settings = parse_settings("timeout 30").expect("parse");
    assert_eq!(settings.command_timeout, Some(Duration::from_secs(30)));

    let settings = parse_settings("timeout 0").expect("parse");
    assert_eq!(settings.command_timeout, None);

    assert!(parse_settings("timeout -5").is_err());
    assert!(parse_settings("timeout \"soon\"").is_err());
}

#[test]
fn test_signature_block_overrides_builtin() {
    let kdl = r#"
        signature "sysv" {
            running "[ ok ]"
            stopped "[FAIL]"
        }
    "#;
    let settings = parse_settings(kdl).expect("parse");
    let table = &settings.signatures;

    assert_eq!(table.get(SignatureState::Running, InitKind::Sysv), Some("[ ok ]"));
    assert_eq!(
        table.classify(InitKind::Sysv, "[FAIL] nginx is not running ... failed!"),
        ServiceStatus::Stopped
    );
    // Other init systems keep their built-in entries
    assert_eq!(
        table.get(SignatureState::Running, InitKind::Systemd),
        Some("active (running)")
    );
}

#[test]
fn test_signature_inline_form() {
    let kdl = r#"signature "upstart" running="start/running" stopped="stop/post-stop""#;
    let settings = parse_settings(kdl).expect("parse");

    assert_eq!(
        settings.signatures.get(SignatureState::Stopped, InitKind::Upstart),
        Some("stop/post-stop")
    );
}

#[test]
fn test_rejects_bad_signatures() {
    assert!(parse_settings(r#"signature "openrc" { running "started" }"#).is_err());
    assert!(parse_settings(r#"signature "systemd" { crashed "failed" }"#).is_err());
    assert!(parse_settings(r#"signature "systemd" { running "" }"#).is_err());
    assert!(parse_settings(r#"signature { running "x" }"#).is_err());
}

#[test]
fn test_unknown_nodes_are_ignored() {
    let settings = parse_settings("color \"always\"\ntimeout 10").expect("parse");
    assert_eq!(settings.command_timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_syntax_error_is_config_error() {
    let err = parse_settings("signature \"systemd\" {").unwrap_err();
    assert!(matches!(err, HostspecError::ConfigError(_)));
}
