//! Command line configuration shared by every subcommand.

use std::path::PathBuf;

use catalogue::session::{ProfileIdPolicy, SessionConfig};
use clap::{Args, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct GlobalArgs {
    /// JSON file holding the persisted session
    #[arg(
        long,
        env = "CATALOGUE_STORAGE_PATH",
        default_value = ".catalogue/session.json",
        global = true
    )]
    pub storage_path: PathBuf,

    /// YAML file with the seed users and products
    #[arg(
        long,
        env = "CATALOGUE_FIXTURES",
        default_value = "fixtures/catalogue.yaml",
        global = true
    )]
    pub fixtures: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t, global = true)]
    pub log_format: LogFormat,

    /// Accept profile updates whose id differs from the signed in user
    #[arg(long, env = "CATALOGUE_ALLOW_PROFILE_ID_MISMATCH", global = true)]
    pub allow_profile_id_mismatch: bool,
}

impl GlobalArgs {
    pub(crate) fn session_config(&self) -> SessionConfig {
        SessionConfig {
            profile_id_policy: if self.allow_profile_id_mismatch {
                ProfileIdPolicy::Allow
            } else {
                ProfileIdPolicy::Reject
            },
        }
    }
}
