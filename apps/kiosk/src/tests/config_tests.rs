use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn default_endpoints_match_robot_layout() {
    let settings = Settings::default();
    assert_eq!(
        settings.robot_endpoint().expect("url").as_str(),
        "ws://127.0.0.1:9100/modimwebsocketserver"
    );
    assert_eq!(
        settings.liveness_endpoint().expect("url").as_str(),
        "ws://127.0.0.1:9010/websocketserver"
    );
    assert_eq!(settings.prompt_period(), Duration::from_secs(5));
}

#[test]
fn empty_host_falls_back_to_loopback() {
    let settings = Settings {
        robot_host: "  ".into(),
        ..Settings::default()
    };
    assert_eq!(
        settings.robot_endpoint().expect("url").host_str(),
        Some("127.0.0.1")
    );
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
robot_host = "10.0.1.200"
robot_port = 9200
liveness_enabled = false
primary_surfaces = ["default"]
"#,
    )
    .expect("parse");

    assert_eq!(settings.robot_host, "10.0.1.200");
    assert_eq!(settings.robot_port, 9200);
    assert!(!settings.liveness_enabled);
    assert_eq!(settings.primary_surfaces, vec!["default".to_string()]);
    assert_eq!(settings.robot_path, "/modimwebsocketserver");
}

#[test]
fn invalid_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "robot_port = \"not a port\"").is_err());
}

#[test]
fn app_prefixed_env_wins_over_kiosk_prefix() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("KIOSK_ROBOT_HOST", "kiosk-host"),
            ("APP__ROBOT_HOST", "app-host"),
            ("KIOSK_PROMPT_PERIOD_MS", "250"),
            ("KIOSK_PRIMARY_SURFACES", "default, side ,"),
        ]),
    );

    assert_eq!(settings.robot_host, "app-host");
    assert_eq!(settings.prompt_period_ms, 250);
    assert_eq!(
        settings.primary_surfaces,
        vec!["default".to_string(), "side".to_string()]
    );
}

#[test]
fn unparsable_env_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env(&[("KIOSK_ROBOT_PORT", "ninety")]));
    assert_eq!(settings.robot_port, 9100);
}

#[test]
fn zero_period_in_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "prompt_period_ms = 0").is_err());
    assert_eq!(settings.prompt_period_ms, 5000);
}

#[test]
fn zero_period_in_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env(&[("KIOSK_PROMPT_PERIOD_MS", "0")]));
    assert_eq!(settings.prompt_period(), Duration::from_secs(5));
}
