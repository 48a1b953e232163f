use crate::config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

///
/// Cli
///
/// `--dev` is declared so clap accepts it anywhere, but the mode itself is
/// resolved from the raw argument list before parsing.
///

#[derive(Debug, Parser)]
#[command(name = "geomark", version, about = "Schema bootstrap and sample data seeding")]
pub struct Cli {
    /// Development mode: reset collections and seed sample data.
    #[arg(long, global = true)]
    pub dev: bool,

    /// Configuration file (default: geomark.toml, optional).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store snapshot path, overriding [store].path.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Fixture path, overriding [seed].fixture.
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

///
/// Command
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// Ensure the schema and, in development mode, seed sample data.
    #[default]
    Bootstrap,

    /// Print every collection with its fields and record count as JSON.
    Inspect,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Load the configuration file and apply command-line overrides.
    ///
    /// An explicit `--config` must exist; the default path is optional.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
        };
        self.apply_overrides(&mut config);

        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.store {
            config.store.path.clone_from(path);
        }
        if let Some(path) = &self.fixture {
            config.seed.fixture.clone_from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::Mode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn bare_invocation_bootstraps() {
        let cli = parse(&["geomark"]);

        assert_eq!(cli.command(), Command::Bootstrap);
        assert!(!cli.dev);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn dev_flag_is_accepted_after_the_subcommand() {
        let args = ["geomark", "inspect", "--dev"];
        let cli = parse(&args);

        assert_eq!(cli.command(), Command::Inspect);
        assert!(cli.dev);
        assert_eq!(Mode::resolve(args), Mode::Development);
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "geomark",
            "--store",
            "/tmp/store.json",
            "--fixture",
            "f.json",
            "-vv",
        ]);
        let mut config = Config::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.store.path, Path::new("/tmp/store.json"));
        assert_eq!(config.seed.fixture, Path::new("f.json"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let cli = parse(&["geomark", "--config", missing.to_str().expect("utf8 path")]);

        assert!(matches!(cli.load_config(), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn overrides_apply_on_top_of_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("geomark.toml");
        std::fs::write(&path, "[store]\npath = \"from-file.json\"\n[seed]\ntruncate = \"markers\"\n")
            .expect("write");
        let cli = parse(&[
            "geomark",
            "--config",
            path.to_str().expect("utf8 path"),
            "--store",
            "from-flag.json",
        ]);

        let config = cli.load_config().expect("config");

        assert_eq!(config.store.path, Path::new("from-flag.json"));
        assert_eq!(
            config.seed.truncate,
            crate::core::seed::TruncatePolicy::Markers
        );
    }
}
