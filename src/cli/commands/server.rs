use clap::Subcommand;
use serde_json::Value;

use crate::cli::{
    utils::{output_error, output_success},
    OutputFormat,
};

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health status from the API /health endpoint")]
    Health {
        #[arg(long, default_value = "http://localhost:3001", help = "Server base URL")]
        url: String,
    },
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health { url } => {
            let endpoint = health_url(&url)?;
            let response = reqwest::get(endpoint.clone()).await?;
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);

            if status.is_success() {
                output_success(output_format, &format!("{} is healthy", url), Some(body))
            } else {
                output_error(
                    output_format,
                    &format!("{} returned {}", endpoint, status),
                    Some("SERVER_UNHEALTHY"),
                )?;
                anyhow::bail!("server unhealthy")
            }
        }
    }
}

fn health_url(base: &str) -> anyhow::Result<url::Url> {
    let base = url::Url::parse(base)?;
    Ok(base.join("/health")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_url_replaces_path() {
        let url = health_url("http://localhost:3001/api/").expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:3001/health");
    }

    #[test]
    fn health_url_rejects_garbage() {
        assert!(health_url("not a url").is_err());
    }
}
