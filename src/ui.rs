// Command driver: runs one mode against the API and reports to the console.
// `delete-all` stops at the first failure; `add-folder` reports each failed
// file and moves on to the next one.

use crate::api::{ApiClient, ApiResponse};
use crate::error::{VwsError, VwsResult};
use crate::scanner::scan_folder;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Delete every target in the cloud database
    DeleteAll,
    /// Upload every .jpg file in PATH as a new target
    AddFolder,
}

/// What happened to one file during `add-folder`.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Server answered 200 or 201.
    Created(ApiResponse),
    /// Server answered with any other status.
    Rejected(ApiResponse),
    /// The request was never answered (unreadable file, network error).
    Failed(String),
}

/// Run `mode`. `path` is only used by `add-folder`.
pub fn run(api: &ApiClient, mode: Mode, path: Option<&Path>) -> VwsResult<()> {
    println!("{}", mode_name(mode));
    match mode {
        Mode::DeleteAll => delete_all(api).map(|_| ()),
        Mode::AddFolder => {
            let dir = path.ok_or_else(|| VwsError::Argument("no path specified".into()))?;
            add_folder(api, dir).map(|_| ())
        }
    }
}

fn mode_name(mode: Mode) -> String {
    mode.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Delete every target. The first error aborts the run; targets after the
/// failing one are left alone. Returns how many targets were deleted.
pub fn delete_all(api: &ApiClient) -> VwsResult<usize> {
    let target_ids = api.list_targets()?;
    println!("all target ids:");
    println!("{:?}", target_ids);

    let mut deleted = 0;
    for target_id in &target_ids {
        let body = api.delete_target(target_id).map_err(|e| {
            tracing::error!(%target_id, error = %e, "delete failed, aborting");
            e
        })?;
        println!("successful delete request. response: {}", body);
        deleted += 1;
    }
    tracing::info!(deleted, "deleted all targets");
    Ok(deleted)
}

/// Upload every `.jpg` directly inside `dir`. Per-file failures are printed
/// and do not stop the run; only an unusable folder is an error.
pub fn add_folder(api: &ApiClient, dir: &Path) -> VwsResult<Vec<(String, UploadOutcome)>> {
    if dir.as_os_str().is_empty() {
        return Err(VwsError::Argument("no path specified".into()));
    }

    let scan = scan_folder(dir)?;
    println!("found files!...");
    let mut found: Vec<&String> = scan.images.iter().chain(&scan.skipped).collect();
    found.sort();
    println!("{:?}", found);

    for file_name in &scan.skipped {
        println!("{} not processed, must have .jpg extension", file_name);
    }

    let mut outcomes = Vec::with_capacity(scan.images.len());
    for file_name in scan.images {
        let image_path: PathBuf = dir.join(&file_name);
        println!("adding {}", image_path.display());

        let outcome = upload_one(api, &file_name, &image_path);
        match &outcome {
            UploadOutcome::Created(res) => println!("{}: {}", file_name, res.body),
            UploadOutcome::Rejected(res) => {
                tracing::warn!(%file_name, status = res.status, "upload rejected");
                println!(
                    "error uploading {}. status: {} response: {}",
                    file_name, res.status, res.body
                );
            }
            UploadOutcome::Failed(msg) => {
                tracing::warn!(%file_name, error = %msg, "upload failed");
                println!("error uploading {}. {}", file_name, msg);
            }
        }
        outcomes.push((file_name, outcome));
    }
    Ok(outcomes)
}

fn upload_one(api: &ApiClient, file_name: &str, image_path: &Path) -> UploadOutcome {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Uploading {}...", file_name));
    spinner.tick();

    let outcome = match api.add_target(image_path) {
        Ok(res) if res.is_created() => UploadOutcome::Created(res),
        Ok(res) => UploadOutcome::Rejected(res),
        Err(e) => UploadOutcome::Failed(e.to_string()),
    };
    spinner.finish_and_clear();
    outcome
}
