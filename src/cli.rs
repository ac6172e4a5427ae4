use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "paygate")]
#[command(about = "Payment gateway HTTP client", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the configuration file",
        default_value = "config/config.toml"
    )]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one request to the gateway and print the raw response.
    ///
    /// The status code goes to stderr, the body to stdout.
    Request {
        #[arg(short, long, help = "HTTP method, GET or POST", default_value = "GET")]
        method: String,
        #[arg(short, long, help = "Absolute URL of the gateway endpoint")]
        url: String,
        #[arg(
            short,
            long = "param",
            help = "Request parameter as key=value. Can be specified multiple times.",
            value_parser = parse_key_val
        )]
        params: Vec<(String, String)>,
        #[arg(long, help = "Request parameters as a JSON object, applied before --param")]
        json: Option<String>,
        #[command(flatten)]
        transport: TransportArgs,
    },
    /// Print the User-Agent header the transport sends
    UserAgent,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TransportArgs {
    #[arg(
        long,
        help = "Override the connect timeout in seconds",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub connect_timeout_secs: Option<u64>,
    #[arg(
        long,
        help = "Override the total request timeout in seconds",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,
}

pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid key=value pair: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
