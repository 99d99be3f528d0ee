use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub robot_host: String,
    pub robot_port: u16,
    pub robot_path: String,
    pub liveness_enabled: bool,
    pub liveness_port: u16,
    pub liveness_path: String,
    pub prompt_period_ms: u64,
    pub primary_surfaces: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            robot_host: "127.0.0.1".into(),
            robot_port: 9100,
            robot_path: "/modimwebsocketserver".into(),
            liveness_enabled: true,
            liveness_port: 9010,
            liveness_path: "/websocketserver".into(),
            prompt_period_ms: 5000,
            primary_surfaces: vec!["default".into(), "display".into()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    robot_host: Option<String>,
    robot_port: Option<u16>,
    robot_path: Option<String>,
    liveness_enabled: Option<bool>,
    liveness_port: Option<u16>,
    liveness_path: Option<String>,
    prompt_period_ms: Option<u64>,
    primary_surfaces: Option<Vec<String>>,
}

impl Settings {
    pub fn prompt_period(&self) -> Duration {
        Duration::from_millis(self.prompt_period_ms)
    }

    pub fn robot_endpoint(&self) -> anyhow::Result<Url> {
        build_endpoint(&self.robot_host, self.robot_port, &self.robot_path)
    }

    pub fn liveness_endpoint(&self) -> anyhow::Result<Url> {
        build_endpoint(&self.robot_host, self.liveness_port, &self.liveness_path)
    }
}

/// Defaults, then the TOML file at `path` (if present), then environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.robot_host {
        settings.robot_host = v;
    }
    if let Some(v) = file_cfg.robot_port {
        settings.robot_port = v;
    }
    if let Some(v) = file_cfg.robot_path {
        settings.robot_path = v;
    }
    if let Some(v) = file_cfg.liveness_enabled {
        settings.liveness_enabled = v;
    }
    if let Some(v) = file_cfg.liveness_port {
        settings.liveness_port = v;
    }
    if let Some(v) = file_cfg.liveness_path {
        settings.liveness_path = v;
    }
    if let Some(v) = file_cfg.prompt_period_ms {
        anyhow::ensure!(v > 0, "prompt_period_ms must be greater than zero");
        settings.prompt_period_ms = v;
    }
    if let Some(v) = file_cfg.primary_surfaces {
        settings.primary_surfaces = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    let lookup = |name: &str| {
        var(format!("APP__{name}").as_str())
            .or_else(|| var(format!("KIOSK_{name}").as_str()))
    };

    if let Some(v) = lookup("ROBOT_HOST") {
        settings.robot_host = v;
    }
    if let Some(v) = lookup("ROBOT_PORT").and_then(|v| v.parse().ok()) {
        settings.robot_port = v;
    }
    if let Some(v) = lookup("ROBOT_PATH") {
        settings.robot_path = v;
    }
    if let Some(v) = lookup("LIVENESS_ENABLED").and_then(|v| v.parse().ok()) {
        settings.liveness_enabled = v;
    }
    if let Some(v) = lookup("LIVENESS_PORT").and_then(|v| v.parse().ok()) {
        settings.liveness_port = v;
    }
    if let Some(v) = lookup("LIVENESS_PATH") {
        settings.liveness_path = v;
    }
    if let Some(v) = lookup("PROMPT_PERIOD_MS")
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
    {
        settings.prompt_period_ms = v;
    }
    if let Some(v) = lookup("PRIMARY_SURFACES") {
        settings.primary_surfaces = v
            .split(',')
            .map(str::trim)
            .filter(|surface| !surface.is_empty())
            .map(str::to_string)
            .collect();
    }
}

fn build_endpoint(host: &str, port: u16, path: &str) -> anyhow::Result<Url> {
    let host = host.trim();
    let host = if host.is_empty() { "127.0.0.1" } else { host };
    let path = path.trim_start_matches('/');
    let raw = format!("ws://{host}:{port}/{path}");
    Url::parse(&raw).with_context(|| format!("invalid websocket endpoint '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
