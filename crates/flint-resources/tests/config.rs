// SPDX-License-Identifier: (MIT OR Apache-2.0)

use flint_resources::CheckerConfig;

#[test]
fn defaults_fill_missing_fields() {
    let config: CheckerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CheckerConfig::default());
    assert_eq!(config.max_loop_iterations, 16);
}

#[test]
fn iteration_limit_from_json() {
    let config: CheckerConfig = serde_json::from_str(r#"{"max_loop_iterations": 4}"#).unwrap();
    assert_eq!(config.max_loop_iterations, 4);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"max_loop_iterations":4}"#);
}
