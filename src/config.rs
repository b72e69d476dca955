use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, time::Duration};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_API_URL: &str = "https://api.resend.com/emails";
const SAMPLE_FILE: &str = "config.example.yaml";
const FALLBACK_FILES: [&str; 2] = ["config.yaml", SAMPLE_FILE];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub mail: MailConfig,
}

/// Outbound email provider settings. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer credential. Normally left empty in files and supplied as `RESEND_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    pub from: String,
    pub to: String,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

/// Flat view of the environment, used when no config file is present.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    port: Option<u16>,
    contact_from: String,
    contact_to: String,
    resend_api_url: Option<String>,
    resend_api_key: String,
    #[serde(default, with = "humantime_serde")]
    resend_timeout: Option<Duration>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn parse_yaml(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    serde_yaml::from_str(contents).map_err(Into::into)
}

fn load_from_env<I>(vars: I) -> Result<Config, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_cfg: EnvConfig = envy::from_iter(vars)?;

    Ok(Config {
        port: env_cfg.port.unwrap_or(DEFAULT_PORT),
        mail: MailConfig {
            api_url: env_cfg.resend_api_url.unwrap_or_else(default_api_url),
            api_key: env_cfg.resend_api_key,
            from: env_cfg.contact_from,
            to: env_cfg.contact_to,
            timeout: env_cfg.resend_timeout,
        },
    })
}

/// The credential from the environment always wins over the one in a file.
fn finalize(
    mut cfg: Config,
    api_key_override: Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(key) = api_key_override.filter(|k| !k.is_empty()) {
        cfg.mail.api_key = key;
    }

    if cfg.mail.api_key.is_empty() {
        return Err("email provider API key is missing (set RESEND_API_KEY)".into());
    }

    Ok(cfg)
}

fn read_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    parse_yaml(&contents)
}

/// First file that exists: the requested path, then the fallbacks in order.
fn locate_config_file(requested: &str) -> Option<String> {
    std::iter::once(requested)
        .chain(FALLBACK_FILES)
        .find(|path| Path::new(path).exists())
        .map(str::to_string)
}

fn load_file_or_env(requested: &str) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(path) = locate_config_file(requested) {
        if path != requested {
            tracing::warn!("Portfolio config '{}' is missing, using '{}'", requested, path);
        }
        if path == SAMPLE_FILE {
            tracing::warn!(
                "Contact relay is running on the sample settings in '{}'; \
                 replace sender, recipient and key before deploying",
                path
            );
        }
        return read_file(&path);
    }

    tracing::info!("No portfolio config file present, reading contact settings from the environment");
    let config = load_from_env(env::vars()).map_err(|e| {
        format!(
            "no config file among '{requested}', {FALLBACK_FILES:?} \
             and the environment lacks contact settings: {e}"
        )
    })?;
    tracing::info!("Contact settings loaded from the environment");
    Ok(config)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("PORTFOLIO_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    let cfg = load_file_or_env(&config_path)?;
    finalize(cfg, env::var("RESEND_API_KEY").ok())
}
