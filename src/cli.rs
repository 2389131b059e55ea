//! Command line arguments.

use crate::api::DEFAULT_BASE_URL;
use crate::ui::Mode;
use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

/// Manage image targets in a Vuforia cloud database
#[derive(Parser, Debug)]
#[command(name = "vws-targets")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The access key for the cloud database
    #[arg(long, env = "VWS_ACCESS_KEY")]
    pub access_key: String,

    /// The secret key for the cloud database
    #[arg(long, env = "VWS_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// What to do
    #[arg(long, value_enum)]
    pub mode: Mode,

    /// Path containing .jpg files (add-folder)
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Target management API base URL
    #[arg(long, env = "VWS_ENDPOINT", default_value = DEFAULT_BASE_URL)]
    pub endpoint: String,

    /// Log verbosity, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}
