//! Configuration loading helpers for the Glyph client.
//!
//! Configuration flags must come before the subcommand. They are split off
//! and handed to `ortho_config`; everything from the first other token on is
//! parsed by clap.

use std::ffi::{OsStr, OsString};

use glyph_config::Config;
use ortho_config::OrthoConfig;

use crate::errors::AppError;

/// Flags recognised by the configuration loader.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--daemon-socket",
    "--log-filter",
    "--log-format",
    "--end-tag",
    "--max-block-bytes",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the leading configuration flags.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let (flag, inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*text, false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

/// Program name plus configuration flags, and the remaining command tokens.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit::default();
    };

    let mut split = ConfigArgumentSplit {
        config_arguments: vec![program.clone()],
        command_arguments: vec![program.clone()],
    };
    let mut tokens = rest.iter();
    while let Some(argument) = tokens.next() {
        match classify(argument) {
            FlagAction::Include { needs_value } => {
                split.config_arguments.push(argument.clone());
                if needs_value && let Some(value) = tokens.next() {
                    split.config_arguments.push(value.clone());
                }
            }
            FlagAction::Stop => {
                split.command_arguments.push(argument.clone());
                split.command_arguments.extend(tokens.cloned());
                break;
            }
        }
    }
    split
}
