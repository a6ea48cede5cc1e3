#![allow(dead_code)]

use std::path::PathBuf;

use compose_deploy::config::{DeploySettings, validate_settings};

/// Builder for `DeploySettings` to simplify test setup.
pub struct SettingsBuilder {
    settings: DeploySettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: DeploySettings {
                start_tests: false,
                ..DeploySettings::default()
            },
        }
    }

    pub fn compose_file(mut self, path: &str) -> Self {
        self.settings.compose_file = PathBuf::from(path);
        self
    }

    pub fn pull(mut self, val: bool) -> Self {
        self.settings.pull = val;
        self
    }

    pub fn build_images(mut self, val: bool) -> Self {
        self.settings.build = val;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.settings.timeout_secs = secs;
        self
    }

    pub fn poll_interval_secs(mut self, secs: u64) -> Self {
        self.settings.poll_interval_secs = secs;
        self
    }

    pub fn post_cmd(mut self, cmd: &str) -> Self {
        self.settings.post_cmds.push(cmd.to_string());
        self
    }

    pub fn start_tests(mut self, val: bool) -> Self {
        self.settings.start_tests = val;
        self
    }

    pub fn build(self) -> DeploySettings {
        validate_settings(&self.settings).expect("Failed to build valid settings from builder");
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render rows as a docker-compose v1 style `ps` table.
pub fn ps_table(rows: &[(&str, &str)]) -> String {
    let mut out = String::from("      Name                    Command               State   Ports\n");
    out.push_str("-----------------------------------------------------------------------\n");
    for (name, state) in rows {
        out.push_str(&format!("{name:<20}   /entrypoint.sh   {state}\n"));
    }
    out
}
