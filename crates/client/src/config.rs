//! Client-side configuration: how many episodes to run and how to report
//! them.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// How episode reports are printed on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Mental map dump plus a statistics block per episode.
    #[default]
    Text,
    /// One JSON array with every report.
    Json,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub episodes: u32,
    pub output: OutputFormat,
    /// Directory for daily-rotated log files; stderr only when unset.
    pub log_dir: Option<PathBuf>,
    /// Where to write the weights used by this run.
    pub export_weights: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EXPLORER_EPISODES` - Episodes to run (default: 1)
    /// - `EXPLORER_OUTPUT` - `text` or `json` (default: text)
    /// - `EXPLORER_LOG_DIR` - Mirror logs into this directory
    /// - `EXPLORER_EXPORT_WEIGHTS` - Save the weights in use to this file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(episodes) = read_env::<u32>("EXPLORER_EPISODES") {
            config.episodes = episodes.max(1);
        }
        if let Some(output) = read_env::<OutputFormat>("EXPLORER_OUTPUT") {
            config.output = output;
        }

        config.log_dir = env::var_os("EXPLORER_LOG_DIR").map(PathBuf::from);
        config.export_weights = env::var_os("EXPLORER_EXPORT_WEIGHTS").map(PathBuf::from);

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            episodes: 1,
            output: OutputFormat::default(),
            log_dir: None,
            export_weights: None,
        }
    }
}

/// Platform data directory location of the weights file, e.g.
/// `~/.local/share/explorer/weights.bin` on Linux.
pub fn default_weights_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "explorer").map(|dirs| dirs.data_dir().join("weights.bin"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn defaults_run_one_text_episode() {
        let config = ClientConfig::default();
        assert_eq!(config.episodes, 1);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(config.log_dir.is_none());
    }
}
