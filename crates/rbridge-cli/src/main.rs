use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rbridge_cli::commands::{self, Command};
use rbridge_cli::config::CliConfig;
use rbridge_cli::logging::{init_logging, LogFormat, LogLevel};
use rbridge_cli::telemetry::describe_metrics;

#[derive(Parser, Debug)]
#[command(name = "rbridge", version, about = "Radio Bridge sensor codec")]
struct Cli {
    /// Configuration file (YAML).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). Overrides the config file.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    let level = config.log_level_or(cli.log_level);
    init_logging(cli.log_format, level);
    describe_metrics();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match commands::run(cli.command, &config, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from(["rbridge", "decode", "EAgABQ", "--log-level", "debug"])
            .expect("decode args should parse");
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(matches!(cli.command, Command::Decode(ref args) if !args.hex));
    }

    #[test]
    fn parses_encode_params() {
        let cli = Cli::try_parse_from([
            "rbridge",
            "encode",
            "--sensor-type",
            "water_sensor",
            "--param",
            "threshold=10",
            "--param",
            "restoral=5",
        ])
        .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.sensor_type.as_deref(), Some("water_sensor"));
                assert_eq!(args.params.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn log_level_flag_overrides_config() {
        let config = CliConfig::from_yaml_str("log_level: trace\n").expect("config should parse");

        let cli = Cli::try_parse_from(["rbridge", "--log-level", "warn", "types"])
            .expect("types args should parse");
        assert_eq!(config.log_level_or(cli.log_level), LogLevel::Warn);

        let cli = Cli::try_parse_from(["rbridge", "types"]).expect("types args should parse");
        assert_eq!(config.log_level_or(cli.log_level), LogLevel::Trace);
        assert_eq!(CliConfig::default().log_level_or(cli.log_level), LogLevel::Info);
    }

    #[test]
    fn rejects_encode_without_source() {
        let err = Cli::try_parse_from(["rbridge", "encode", "--param", "threshold=10"])
            .expect_err("missing sensor type should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_conflicting_request_sources() {
        let err = Cli::try_parse_from([
            "rbridge",
            "encode",
            "--sensor-type",
            "water_sensor",
            "--request",
            "req.yaml",
        ])
        .expect_err("conflicting args should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
