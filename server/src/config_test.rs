use super::*;

#[test]
fn defaults_when_port_absent() {
    let cfg = ServerConfig::from_parts(None).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn parses_explicit_port() {
    let cfg = ServerConfig::from_parts(Some("8080")).unwrap();
    assert_eq!(cfg.port, 8080);
}

#[test]
fn trims_whitespace_around_port() {
    let cfg = ServerConfig::from_parts(Some(" 4000 ")).unwrap();
    assert_eq!(cfg.port, 4000);
}

#[test]
fn rejects_non_numeric_port() {
    let err = ServerConfig::from_parts(Some("not-a-port")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref raw, .. } if raw == "not-a-port"));
}

#[test]
fn rejects_out_of_range_port() {
    assert!(ServerConfig::from_parts(Some("70000")).is_err());
}
