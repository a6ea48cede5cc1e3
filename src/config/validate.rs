// src/config/validate.rs

use crate::config::model::DeploySettings;
use crate::errors::{DeployError, Result};

/// Run basic sanity checks against resolved settings.
///
/// This checks:
/// - the compose file path is not empty
/// - `poll_interval >= 1`
/// - `compose_command` names a program
/// - no post-deploy command is blank
///
/// It does **not** check that the compose file or test script exist; the
/// orchestrator reports that itself.
pub fn validate_settings(settings: &DeploySettings) -> Result<()> {
    validate_compose_file(settings)?;
    validate_poll_interval(settings)?;
    validate_compose_command(settings)?;
    validate_post_cmds(settings)?;
    Ok(())
}

fn validate_compose_file(settings: &DeploySettings) -> Result<()> {
    if settings.compose_file.as_os_str().is_empty() {
        return Err(DeployError::ConfigError(
            "compose_file must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_poll_interval(settings: &DeploySettings) -> Result<()> {
    if settings.poll_interval_secs == 0 {
        return Err(DeployError::ConfigError(
            "poll_interval must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_compose_command(settings: &DeploySettings) -> Result<()> {
    match settings.compose_command.first() {
        Some(program) if !program.trim().is_empty() => Ok(()),
        _ => Err(DeployError::ConfigError(
            "compose_command must start with a program name".to_string(),
        )),
    }
}

fn validate_post_cmds(settings: &DeploySettings) -> Result<()> {
    for (idx, cmd) in settings.post_cmds.iter().enumerate() {
        if cmd.trim().is_empty() {
            return Err(DeployError::ConfigError(format!(
                "post_cmds[{idx}] is blank"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_settings(&DeploySettings::default()).is_ok());
    }

    #[test]
    fn zero_timeout_is_allowed() {
        let settings = DeploySettings {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let settings = DeploySettings {
            poll_interval_secs: 0,
            ..Default::default()
        };
        match validate_settings(&settings) {
            Err(DeployError::ConfigError(msg)) => assert!(msg.contains("poll_interval")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn empty_compose_command_is_rejected() {
        let settings = DeploySettings {
            compose_command: vec![],
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(DeployError::ConfigError(_))
        ));

        let settings = DeploySettings {
            compose_command: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn blank_post_cmd_is_rejected_with_its_index() {
        let settings = DeploySettings {
            post_cmds: vec!["echo ok".to_string(), "   ".to_string()],
            ..Default::default()
        };
        match validate_settings(&settings) {
            Err(DeployError::ConfigError(msg)) => assert!(msg.contains("post_cmds[1]")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn empty_compose_file_is_rejected() {
        let settings = DeploySettings {
            compose_file: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_err());
    }
}
