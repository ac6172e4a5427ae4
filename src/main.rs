use std::io::Write;

use anyhow::{Context, anyhow};
use clap::Parser;
use log::{debug, info};
use paygate_http::cli::{Cli, Commands, TransportArgs};
use paygate_http::config::{ApplyArgs, ClientConfig, load_client_config};
use paygate_http::http::{BlockingTransport, Params, RequestDispatcher};
use paygate_http::log::init_logging;
use serde_json::Value;

fn main() -> Result<(), anyhow::Error> {
    init_logging()?;
    let cli = Cli::parse();

    let config = load_client_config(&cli.config)?;
    debug!(path:% = cli.config.display(); "Configuration loaded");

    match cli.command {
        Commands::Request {
            method,
            url,
            params,
            json,
            transport,
        } => {
            let params = build_params(json.as_deref(), params)?;
            let mut dispatcher = RequestDispatcher::with_transport(Box::new(build_transport(config, &transport)?));

            info!(method = method.as_str(), url = url.as_str(); "Sending request");
            let (body, status) = dispatcher.request(&method, &url, &params)?.into_parts();

            eprintln!("HTTP {}", status);
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        },
        Commands::UserAgent => {
            let transport = build_transport(config, &TransportArgs::default())?;
            println!("{}", transport.user_agent());
            Ok(())
        },
    }
}

fn build_transport(mut config: ClientConfig, args: &TransportArgs) -> Result<BlockingTransport, anyhow::Error> {
    config.apply_transport(args);
    config.transport.validate()?;
    BlockingTransport::with_config(config.transport).context("HTTP transport is unavailable")
}

fn build_params(json: Option<&str>, pairs: Vec<(String, String)>) -> Result<Params, anyhow::Error> {
    let mut params = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("Invalid --json value")? {
            Value::Object(map) => map,
            other => return Err(anyhow!("--json must be a JSON object, got {}", other)),
        },
        None => Params::new(),
    };
    for (key, value) in pairs {
        params.insert(key, Value::String(value));
    }
    Ok(params)
}
