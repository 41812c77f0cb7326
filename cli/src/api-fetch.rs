//! # api-fetch
//!
//! A command-line driver for the `lib_netservice` orchestrator. Resolves a
//! backend environment from flags or `NETSERVICE_*` variables, issues one
//! GET through the orchestrator and prints the JSON payload.

use anyhow::Context;
use clap::{ArgAction, Parser};
use lib_netservice::net::{ApiEnvironment, ApiRequest, NetService};

/// CLI arguments for api-fetch.
#[derive(Parser)]
#[clap(
    name = "api-fetch",
    version = "0.1.0",
    about = "Issues a single REST call through the netservice orchestrator.",
    long_about = "Resolves a backend environment, builds a GET request from the given path and \
                  query parameters, and prints the decoded JSON payload. Classified errors \
                  (client, server, decode, transport) are reported distinctly."
)]
pub struct Cli {
    /// Request path relative to the API base, e.g. "/devices".
    #[clap(value_parser)]
    pub path: String,

    /// Backend host, scheme included.
    #[clap(long, env = "NETSERVICE_HOST")]
    pub host: String,

    /// API base path prefix, e.g. "/v1".
    #[clap(long, env = "NETSERVICE_API_PATH", default_value = "")]
    pub api_path: String,

    /// Default Authorization header value, sent verbatim.
    #[clap(long, env = "NETSERVICE_TOKEN")]
    pub token: Option<String>,

    /// Query parameters as KEY=VALUE pairs.
    #[clap(long, short = 'q', value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub query: Vec<String>,

    /// Pretty-print the response payload.
    #[clap(long, action = ArgAction::SetTrue)]
    pub pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let environment = ApiEnvironment::new(args.host, args.api_path, args.token);
    let service = NetService::new(environment);

    let mut request = ApiRequest::get(args.path);
    for pair in &args.query {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("query parameter {pair:?} is not KEY=VALUE"))?;
        request = request.query(key, value);
    }

    let payload: serde_json::Value = service.fetch_one(&request).await?;
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{payload}");
    }
    Ok(())
}
