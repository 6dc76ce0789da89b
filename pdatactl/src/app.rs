//! Command dispatch

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pdata::codec::otlp_json;
use pdata::{Format, Metrics, MetricsMarshaler, MetricsUnmarshaler};

use crate::cli::{self, CliConfig, Commands};
use crate::config::AppConfig;
use crate::constants::{APP_NAME, ENV_LOG, STDIO_PATH};
use crate::report::InspectReport;

pub struct App {
    pub config: AppConfig,
}

impl App {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        let (cli_config, command) = cli::parse();
        Self::init_logging(&cli_config);
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self {
            config: AppConfig::load(&cli_config)?,
        };
        app.execute(command)
    }

    fn init_logging(cli: &CliConfig) {
        let default_filter = format!("warn,{}=info", APP_NAME);

        let filter = cli
            .log_level
            .clone()
            .or_else(|| std::env::var(ENV_LOG).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    pub fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Inspect {
                input,
                format,
                json,
            } => {
                let report = self.inspect(&input, format)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{report}");
                }
                Ok(())
            }
            Commands::Convert {
                input,
                output,
                from,
                to,
            } => self.convert(&input, &output, from, to),
        }
    }

    pub fn inspect(&self, input: &Path, format: Option<Format>) -> Result<InspectReport> {
        let format = format.unwrap_or(self.config.default_format);
        let bytes = read_input(input)?;
        let md = decode(&bytes, format, input)?;
        Ok(InspectReport::new(format, bytes.len(), &md))
    }

    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        from: Option<Format>,
        to: Option<Format>,
    ) -> Result<()> {
        let from = from.unwrap_or(self.config.default_format);
        let to = to.unwrap_or(self.config.default_format);

        let bytes = read_input(input)?;
        let md = decode(&bytes, from, input)?;
        let encoded = self
            .marshaler(to)
            .marshal(&md)
            .with_context(|| format!("Failed to encode metrics as {}", to))?;
        write_output(output, &encoded)?;

        let (metrics, data_points) = md.metric_and_data_point_count();
        tracing::info!(
            from = %from,
            to = %to,
            metrics,
            data_points,
            bytes = encoded.len(),
            "Converted metrics"
        );
        Ok(())
    }

    fn marshaler(&self, format: Format) -> Box<dyn MetricsMarshaler + Send + Sync> {
        if format == Format::Json && self.config.pretty_json {
            Box::new(otlp_json::pretty_marshaler())
        } else {
            format.marshaler()
        }
    }
}

fn decode(bytes: &[u8], format: Format, input: &Path) -> Result<Metrics> {
    format
        .unmarshaler()
        .unmarshal(bytes)
        .with_context(|| format!("Failed to decode {} as {}", input.display(), format))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == STDIO_PATH {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if path.as_os_str() == STDIO_PATH {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes).context("Failed to write stdout")?;
        return stdout.flush().context("Failed to write stdout");
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pdata::{AggregationTemporality, MetricDataType};

    use super::*;

    fn app(default_format: Format, pretty_json: bool) -> App {
        App {
            config: AppConfig {
                default_format,
                pretty_json,
            },
        }
    }

    fn sample() -> Metrics {
        let mut md = Metrics::new();
        let mut rms = md.resource_metrics_mut();
        let mut rm = rms.append_empty();
        let mut ilms = rm.instrumentation_library_metrics_mut();
        let mut ilm = ilms.append_empty();
        let mut metrics = ilm.metrics_mut();

        let mut metric = metrics.append_empty();
        metric.set_name("requests");
        metric.set_data_type(MetricDataType::IntSum);
        let mut sum = metric.int_sum_mut();
        sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
        sum.data_points_mut().resize(3);

        let mut metric = metrics.append_empty();
        metric.set_name("temperature");
        metric.set_data_type(MetricDataType::DoubleGauge);
        metric.double_gauge_mut().data_points_mut().resize(2);
        md
    }

    #[test]
    fn test_inspect_proto_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("metrics.pb");
        let md = sample();
        fs::write(&input, md.to_otlp_proto_bytes().unwrap()).unwrap();

        let report = app(Format::Proto, false).inspect(&input, None).unwrap();
        assert_eq!(report.format, Format::Proto);
        assert_eq!(report.resources, 1);
        assert_eq!(report.metrics, 2);
        assert_eq!(report.data_points, 5);
        assert_eq!(report.otlp_proto_size, report.input_bytes);
        assert_eq!(report.data_types.get("IntSum"), Some(&1));
        assert_eq!(report.data_types.get("DoubleGauge"), Some(&1));
    }

    #[test]
    fn test_convert_proto_to_json_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("metrics.pb");
        let json = dir.path().join("metrics.json");
        let back = dir.path().join("back.pb");
        let md = sample();
        fs::write(&input, md.to_otlp_proto_bytes().unwrap()).unwrap();

        let app = app(Format::Proto, true);
        app.convert(&input, &json, None, Some(Format::Json)).unwrap();
        let text = fs::read_to_string(&json).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"intSum\""));

        app.convert(&json, &back, Some(Format::Json), None).unwrap();
        let decoded = Metrics::from_otlp_proto_bytes(&fs::read(&back).unwrap()).unwrap();
        assert_eq!(decoded, md);
    }

    #[test]
    fn test_inspect_uses_configured_default_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("metrics.json");
        let bytes = Format::Json.marshaler().marshal(&sample()).unwrap();
        fs::write(&input, bytes).unwrap();

        let report = app(Format::Json, false).inspect(&input, None).unwrap();
        assert_eq!(report.metrics, 2);
    }

    #[test]
    fn test_decode_error_names_input_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, b"{").unwrap();

        let err = app(Format::Json, false).inspect(&input, None).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to decode"));
        assert!(message.ends_with("as json"));
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = app(Format::Proto, false)
            .inspect(&dir.path().join("absent.pb"), None)
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read input file"));
    }
}
