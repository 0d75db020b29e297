//! Command-line front end for the Radio Bridge sensor codec.
//!
//! Provides the `rbridge` binary's subcommands as library functions that read
//! from any `BufRead` and write to any `Write`:
//!
//! - `decode` prints the decode record for one base64 or hex frame
//! - `encode` validates a downlink request and prints `{"data": "<base64>"}`
//! - `ingest` decodes newline-delimited JSON uplinks, keeping a bounded log
//!   and discovering sensors
//! - `types` lists the message-type registry

pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod telemetry;

pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use ingest::{IngestedMessage, RecordKind, SensorEntry, UplinkLog};
