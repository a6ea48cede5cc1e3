// src/config/layers.rs

//! Settings precedence: built-in defaults, then the config file, then
//! explicitly passed command-line flags.

use crate::config::model::{ConfigOverrides, DeploySettings};

impl DeploySettings {
    /// Apply one override layer on top of `self`.
    ///
    /// Only fields the layer explicitly sets are touched.
    pub fn apply(&mut self, layer: &ConfigOverrides) {
        if let Some(ref path) = layer.compose_file {
            self.compose_file = path.clone();
        }
        if let Some(pull) = layer.pull {
            self.pull = pull;
        }
        if let Some(build) = layer.build {
            self.build = build;
        }
        if let Some(timeout) = layer.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(start_tests) = layer.start_tests {
            self.start_tests = start_tests;
        }
        if let Some(ref cmds) = layer.post_cmds {
            self.post_cmds = cmds.clone();
        }
        if let Some(interval) = layer.poll_interval {
            self.poll_interval_secs = interval;
        }
        if let Some(ref program) = layer.compose_command {
            self.compose_command = program.clone();
        }
        if let Some(ref script) = layer.test_script {
            self.test_script = script.clone();
        }
    }
}

/// Fold `layers` (lowest precedence first) over the built-in defaults.
///
/// The result is not validated; see [`crate::config::validate_settings`].
pub fn merge_layers<'a, I>(layers: I) -> DeploySettings
where
    I: IntoIterator<Item = &'a ConfigOverrides>,
{
    let mut settings = DeploySettings::default();
    for layer in layers {
        settings.apply(layer);
    }
    settings
}
