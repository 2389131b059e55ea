// Error module: every failure the client can hit is one of these kinds.
// `main.rs` turns them into a message on stderr and a process exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes, BSD sysexits.h compatible where one fits.
pub mod exitcode {
    pub const OK: i32 = 0;
    /// The remote service answered with an unexpected status.
    pub const REMOTE: i32 = 1;
    pub const USAGE: i32 = 64;
    pub const DATAERR: i32 = 65;
    pub const NOINPUT: i32 = 66;
    pub const UNAVAILABLE: i32 = 69;
}

#[derive(Error, Debug)]
pub enum VwsError {
    /// Connection, TLS or transport failure.
    #[error("network error")]
    Network(#[from] reqwest::Error),

    /// The service answered, but not with the status we expected.
    #[error("unexpected status {status}. response: {body}")]
    Remote { status: u16, body: String },

    #[error("cannot read {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} did not base64 encode", .path.display())]
    EmptyImage { path: PathBuf },

    #[error("invalid arguments: {0}")]
    Argument(String),

    #[error("malformed response: {0}")]
    Response(String),
}

pub type VwsResult<T> = Result<T, VwsError>;

impl VwsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            VwsError::Network(_) => exitcode::UNAVAILABLE,
            VwsError::Remote { .. } => exitcode::REMOTE,
            VwsError::File { .. } | VwsError::EmptyImage { .. } => exitcode::NOINPUT,
            VwsError::Argument(_) => exitcode::USAGE,
            VwsError::Response(_) => exitcode::DATAERR,
        }
    }
}
