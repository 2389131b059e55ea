// Library root
// -----------
// This crate exposes the pieces the `vws-targets` binary is built from.
//
// Module responsibilities:
// - `signer`: computes the `Authorization` header VWS expects.
// - `api`: signed HTTP calls to the target management API (list, delete,
//   add).
// - `scanner`: finds the `.jpg` files in a folder.
// - `ui`: runs the `delete-all` and `add-folder` modes and prints results.
// - `cli`: command line arguments.
// - `error`: error kinds and exit codes.
pub mod api;
pub mod cli;
pub mod error;
pub mod scanner;
pub mod signer;
pub mod ui;
