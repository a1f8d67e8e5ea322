use std::env::{self, VarError};
use std::net::SocketAddr;

use crate::error::{config_error, Error};
use crate::external::predict_script::PredictScript;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3001";
const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub backend: Backend,
    pub api_url: String,
}

/// Where `POST /api/predict-price` gets its numbers from.
#[derive(Clone, Debug)]
pub enum Backend {
    Formula,
    Script(PredictScript),
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let var_or = |key: &str, default: &str| -> Result<String, Error> {
            match lookup(key) {
                Ok(value) => Ok(value),
                Err(VarError::NotPresent) => Ok(default.into()),
                Err(err) => Err(err.into()),
            }
        };

        let host = var_or("HOST", DEFAULT_HOST)?;
        let port: u16 = var_or("PORT", DEFAULT_PORT)?
            .parse()
            .map_err(|_| config_error("PORT must be a number between 0 and 65535"))?;
        let bind_addr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| config_error(format!("invalid listen address {}:{}", host, port)))?;

        let backend = match var_or("PRICE_BACKEND", "formula")?.as_str() {
            "formula" => Backend::Formula,
            "script" => {
                let script = match lookup("PREDICT_PROGRAM") {
                    Ok(program) => {
                        let args = var_or("PREDICT_ARGS", "")?;
                        PredictScript::new(program, args.split_whitespace().map(String::from))
                    }
                    Err(VarError::NotPresent) => PredictScript::current_exe()?,
                    Err(err) => return Err(err.into()),
                };
                Backend::Script(script)
            }
            other => {
                return Err(config_error(format!(
                    "PRICE_BACKEND must be 'formula' or 'script', got '{}'",
                    other
                )))
            }
        };

        let api_url = var_or("PREDICT_API_URL", DEFAULT_API_URL)?;

        Ok(Self {
            bind_addr,
            backend,
            api_url,
        })
    }
}

#[test]
fn default_config_test() {
    let config = Config::from_lookup(|_| Err(VarError::NotPresent)).unwrap();

    assert_eq!(config.bind_addr, "127.0.0.1:3001".parse().unwrap());
    assert!(matches!(config.backend, Backend::Formula));
    assert_eq!(config.api_url, DEFAULT_API_URL);
}

#[test]
fn script_config_test() {
    use std::collections::HashMap;

    let vars: HashMap<&str, &str> = [
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("PRICE_BACKEND", "script"),
        ("PREDICT_PROGRAM", "python"),
        ("PREDICT_ARGS", "scripts/predict.py"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_lookup(|key| {
        vars.get(key)
            .map(|value| value.to_string())
            .ok_or(VarError::NotPresent)
    })
    .unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
    match config.backend {
        Backend::Script(script) => {
            assert_eq!(script.program, "python");
            assert_eq!(script.args, vec!["scripts/predict.py".to_string()]);
        }
        Backend::Formula => panic!("expected script backend"),
    }
}

#[test]
fn invalid_config_test() {
    let err = Config::from_lookup(|key| match key {
        "PORT" => Ok("not-a-port".into()),
        _ => Err(VarError::NotPresent),
    })
    .unwrap_err();
    assert_eq!(err.code, 2);

    let err = Config::from_lookup(|key| match key {
        "PRICE_BACKEND" => Ok("model".into()),
        _ => Err(VarError::NotPresent),
    })
    .unwrap_err();
    assert_eq!(err.code, 2);
}
