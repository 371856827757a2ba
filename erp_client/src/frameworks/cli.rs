use crate::domain::{ApiClientError, LogSink, RequestBody, RequestOptions, Severity};
use crate::frameworks::config;
use crate::interface_adapters::clients::ReqwestTransport;
use crate::interface_adapters::clock::SystemClock;
use crate::interface_adapters::panel::InMemoryLogPanel;
use crate::use_cases::{FetchApi, UiLogger};
use clap::Parser;
use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Call an ERP API endpoint, print its data and the system log.
#[derive(Debug, Parser)]
#[command(name = "erp_client")]
pub struct Args {
    /// Endpoint path (joined onto the base URL) or absolute URL.
    pub path: String,

    /// Backend base URL. Falls back to ERP_API_BASE_URL.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(short = 'X', long, default_value = "GET", value_parser = parse_method)]
    pub method: Method,

    /// Extra header as `Name: value`; may be repeated.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,

    /// Request body. Valid JSON is sent as JSON, anything else as raw text.
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Request timeout in milliseconds. Falls back to ERP_API_TIMEOUT_MS.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl Args {
    pub fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new(self.method.clone());
        for (name, value) in &self.headers {
            options.headers.append(name.clone(), value.clone());
        }
        options.body = self.data.as_ref().and_then(|raw| {
            match serde_json::from_str::<Value>(raw) {
                Ok(value) => RequestBody::from_value(value),
                Err(_) => Some(RequestBody::Text(raw.clone())),
            }
        });
        options
    }

    fn timeout(&self) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(config::api_timeout)
    }
}

fn parse_method(raw: &str) -> Result<Method, String> {
    Method::from_bytes(raw.to_uppercase().as_bytes()).map_err(|err| err.to_string())
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{raw}`"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|err| err.to_string())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|err| err.to_string())?;
    Ok((name, value))
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout carries the response data, so diagnostics go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();

    let panel = InMemoryLogPanel::new();
    let logger = UiLogger::attached(SystemClock, Arc::new(panel.clone()));
    logger.log(config::READY_MESSAGE, Severity::Info);

    let base_url = args.base_url.clone().unwrap_or_else(config::api_base_url);
    let base_url = match Url::parse(&base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(%base_url, error = %e, "invalid base url");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(base_url = %base_url, "erp client configured.");

    let transport = match ReqwestTransport::new(args.timeout()) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!(error = %e, "failed to build http client");
            return ExitCode::from(2);
        }
    };

    let api = FetchApi::new(transport, logger).with_base_url(base_url);
    let result = api.fetch::<Value>(&args.path, args.request_options()).await;

    eprint!("{}", panel.render_ansi());

    match result {
        Ok(data) => {
            let pretty = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
            println!("{pretty}");
            ExitCode::SUCCESS
        }
        Err(ApiClientError::Business(err)) => {
            for (field, message) in err.field_errors() {
                eprintln!("  {field}: {message}");
            }
            ExitCode::from(1)
        }
        Err(_) => ExitCode::from(2),
    }
}
