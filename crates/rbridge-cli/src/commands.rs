use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use rbridge_protocol::{
    decode_base64, decode_frame, entries, DownlinkPayload, DownlinkRequest, Encoder,
    ParameterValue,
};
use serde_json::json;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::ingest::UplinkLog;
use crate::telemetry::metric_defs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode one uplink frame and print its decode record.
    Decode(DecodeArgs),
    /// Encode a configuration downlink and print its transport payload.
    Encode(EncodeArgs),
    /// Read newline-delimited JSON uplinks from stdin.
    Ingest(IngestArgs),
    /// List registered message types.
    Types,
}

pub fn run<R: BufRead>(
    command: Command,
    config: &CliConfig,
    input: R,
    output: &mut impl Write,
) -> CliResult<()> {
    match command {
        Command::Decode(args) => run_decode(&args, output),
        Command::Encode(args) => run_encode(&args, config, output),
        Command::Ingest(args) => run_ingest(&args, config, input, output),
        Command::Types => run_types(output),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame as base64 (padding optional), or hex with --hex.
    pub payload: String,
    /// Read the payload as hex instead of base64.
    #[arg(long)]
    pub hex: bool,
    /// Pretty-print the decode record.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Target sensor type (water_sensor, temp_humidity_sensor).
    #[arg(long, required_unless_present = "request", conflicts_with = "request")]
    pub sensor_type: Option<String>,
    /// Request parameter; repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
    /// Request file (YAML, or JSON by extension).
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct IngestArgs {
    /// Topic recorded with every message.
    #[arg(long)]
    pub topic: Option<String>,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

pub fn run_decode(args: &DecodeArgs, output: &mut impl Write) -> CliResult<()> {
    let raw = if args.hex {
        let digits: String = args.payload.split_whitespace().collect();
        hex::decode(digits)?
    } else {
        decode_base64(&args.payload)?
    };
    debug!(frame = %hex::encode(&raw), "decoding");

    let frame = decode_frame(&raw)?;
    if args.pretty {
        serde_json::to_writer_pretty(&mut *output, &frame)?;
    } else {
        serde_json::to_writer(&mut *output, &frame)?;
    }
    writeln!(output)?;
    Ok(())
}

/// Read a downlink request file.
pub fn load_request(path: &Path) -> CliResult<DownlinkRequest> {
    let text = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&text)?)
    } else {
        Ok(serde_yaml::from_str(&text)?)
    }
}

pub fn run_encode(args: &EncodeArgs, config: &CliConfig, output: &mut impl Write) -> CliResult<()> {
    let mut request = match (&args.request, &args.sensor_type) {
        (Some(path), _) => load_request(path)?,
        (None, Some(sensor_type)) => DownlinkRequest::new(sensor_type.as_str()),
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "either --sensor-type or --request is required".to_string(),
            ))
        }
    };
    for (key, value) in &args.params {
        request
            .parameters
            .insert(key.clone(), ParameterValue::Text(value.clone()));
    }

    let frame = Encoder::with_polarity(config.water_enable_polarity).encode(&request)?;
    info!(
        sensor_type = %request.sensor_type,
        frame = %hex::encode(frame.as_bytes()),
        "encoded downlink"
    );
    let def = metric_defs::DOWNLINK_ENCODED;
    let labels = def.labelled([request.sensor_type.clone()]);
    metrics::counter!(def.name, &labels).increment(1);

    writeln!(output, "{}", DownlinkPayload::from(&frame).to_json())?;
    Ok(())
}

pub fn run_ingest<R: BufRead>(
    args: &IngestArgs,
    config: &CliConfig,
    input: R,
    output: &mut impl Write,
) -> CliResult<()> {
    let mut log = UplinkLog::from_config(config);
    let mut count = 0usize;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = log.ingest(args.topic.as_deref(), line);
        serde_json::to_writer(&mut *output, record)?;
        writeln!(output)?;
        count += 1;
    }

    info!(
        messages = count,
        retained = log.len(),
        sensors = log.sensors().len(),
        "ingest complete"
    );
    serde_json::to_writer(&mut *output, &json!({ "sensors": log.sensors() }))?;
    writeln!(output)?;
    Ok(())
}

pub fn run_types(output: &mut impl Write) -> CliResult<()> {
    for entry in entries() {
        let note = if entry.decoder.is_none() {
            " (no decoder)"
        } else {
            ""
        };
        writeln!(
            output,
            "0x{:02X}  {:<22} {}{}",
            entry.code,
            entry.message_type.name(),
            entry.label,
            note
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("threshold=10"),
            Ok(("threshold".to_string(), "10".to_string()))
        );
        assert_eq!(
            parse_param("mode=0x1F"),
            Ok(("mode".to_string(), "0x1F".to_string()))
        );
        assert!(parse_param("threshold").is_err());
        assert!(parse_param("=10").is_err());
    }

    #[test]
    fn test_decode_hex_with_spaces() {
        let args = DecodeArgs {
            payload: "10 08 00 05".to_string(),
            hex: true,
            pretty: false,
        };
        let mut out = Vec::new();
        run_decode(&args, &mut out).unwrap();
        let record: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(record["State"], "Water Present");
    }

    #[test]
    fn test_encode_requires_a_source() {
        let args = EncodeArgs {
            sensor_type: None,
            params: Vec::new(),
            request: None,
        };
        let err = run_encode(&args, &CliConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
