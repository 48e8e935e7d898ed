use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use std::{env, path::PathBuf, time::Duration};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: Url,
    pub download_dir: PathBuf,
    pub notice_ttl: Duration,
    pub assume_yes: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Interactive browser for a remote object catalog")]
pub struct Args {
    /// Base URL of the object service (overrides OBJECT_BROWSER_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory downloads are saved into (overrides OBJECT_BROWSER_DOWNLOAD_DIR)
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Seconds a notice stays visible (overrides OBJECT_BROWSER_NOTICE_TTL_SECS)
    #[arg(long)]
    pub notice_ttl_secs: Option<u64>,

    /// Confirm deletions without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_args(Args::parse(), |name| env::var(name))
    }

    /// Merge parsed args over values looked up with `var`, over defaults.
    pub fn from_args<F>(args: Args, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_endpoint = lookup(&var, "OBJECT_BROWSER_ENDPOINT")?
            .unwrap_or_else(|| "http://localhost:3000".into());
        let env_download_dir = lookup(&var, "OBJECT_BROWSER_DOWNLOAD_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./downloads"));
        let env_ttl = match lookup(&var, "OBJECT_BROWSER_NOTICE_TTL_SECS")? {
            Some(value) => value.parse::<u64>().with_context(|| {
                format!("parsing OBJECT_BROWSER_NOTICE_TTL_SECS value `{}`", value)
            })?,
            None => 5,
        };

        // --- Merge ---
        let endpoint_raw = args.endpoint.unwrap_or(env_endpoint);
        let endpoint = Url::parse(&endpoint_raw)
            .with_context(|| format!("parsing endpoint URL `{}`", endpoint_raw))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("endpoint `{}` must use http or https", endpoint_raw);
        }

        Ok(Self {
            endpoint,
            download_dir: args.download_dir.unwrap_or(env_download_dir),
            notice_ttl: Duration::from_secs(args.notice_ttl_secs.unwrap_or(env_ttl)),
            assume_yes: args.yes,
        })
    }
}

fn lookup<F>(var: &F, name: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}
