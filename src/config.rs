use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::constants;

/// User preferences persisted in `prefs.toml`.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Config {
  pub socket_path: Option<String>,
  pub theme_name: Option<String>,
}

impl Config {
  pub fn load() -> Self {
    if let Some(proj_dirs) = project_dirs() {
      let config_file = proj_dirs.config_dir().join("prefs.toml");
      if let Ok(content) = std::fs::read_to_string(config_file)
        && let Some(config) = Self::parse(&content)
      {
        return config;
      }
    }
    Self::default()
  }

  fn parse(content: &str) -> Option<Self> {
    toml::from_str(content).ok()
  }
}

fn project_dirs() -> Option<ProjectDirs> {
  ProjectDirs::from("", "", &constants().app_name)
}

/// Everything one viewing session needs to know about its surroundings.
///
/// Built once in `main` and handed to the components that need it, so tests can
/// run several sessions side by side against different sockets.
#[derive(Debug, Clone)]
pub struct Session {
  pub socket_path: PathBuf,
  pub log_path: PathBuf,
  pub theme_name: Option<String>,
}

impl Session {
  /// Precedence: CLI flag, then config file, then the compiled-in default.
  pub fn resolve(cli_socket: Option<&Path>, config: &Config) -> Self {
    let socket_path = cli_socket
      .map(Path::to_path_buf)
      .or_else(|| config.socket_path.as_ref().map(PathBuf::from))
      .unwrap_or_else(|| PathBuf::from(&constants().default_socket_path));

    Self { socket_path, log_path: default_log_path(), theme_name: config.theme_name.clone() }
  }
}

/// Location of the log file shared by the viewer and `subscroll log`.
pub fn default_log_path() -> PathBuf {
  let c = constants();
  match project_dirs() {
    Some(dirs) => dirs.cache_dir().join(&c.log_file_name),
    None => std::env::temp_dir().join(&c.log_file_name),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_full_config() {
    let config = Config::parse("socket_path = \"/run/mpv.sock\"\ntheme_name = \"mono\"\n").unwrap();
    assert_eq!(config.socket_path.as_deref(), Some("/run/mpv.sock"));
    assert_eq!(config.theme_name.as_deref(), Some("mono"));
  }

  #[test]
  fn parse_empty_config_is_default() {
    assert_eq!(Config::parse("").unwrap(), Config::default());
  }

  #[test]
  fn parse_malformed_config_fails() {
    assert!(Config::parse("socket_path = [").is_none());
  }

  #[test]
  fn session_prefers_cli_socket() {
    let config = Config { socket_path: Some("/from/config".to_string()), theme_name: None };
    let session = Session::resolve(Some(Path::new("/from/cli")), &config);
    assert_eq!(session.socket_path, PathBuf::from("/from/cli"));
  }

  #[test]
  fn session_falls_back_to_config_then_default() {
    let config = Config { socket_path: Some("/from/config".to_string()), theme_name: Some("mono".to_string()) };
    let session = Session::resolve(None, &config);
    assert_eq!(session.socket_path, PathBuf::from("/from/config"));
    assert_eq!(session.theme_name.as_deref(), Some("mono"));

    let session = Session::resolve(None, &Config::default());
    assert_eq!(session.socket_path, PathBuf::from("/tmp/mpvsocket"));
  }

  #[test]
  fn log_path_ends_with_log_file_name() {
    assert!(default_log_path().ends_with("subscroll.log"));
  }
}
