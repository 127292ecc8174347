use std::{env::var, sync::Arc};

use dotenv::dotenv;
use eyre::{eyre, Error};
use log::info;
use qiwi::Credentials;

#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone)]
pub struct EnvInner {
    qiwi_prv_id: String,
    qiwi_api_id: String,
    qiwi_api_password: String,
    rust_log: Option<String>,
}

impl Env {
    pub fn qiwi_prv_id(&self) -> &str {
        &self.0.qiwi_prv_id
    }

    pub fn qiwi_api_id(&self) -> &str {
        &self.0.qiwi_api_id
    }

    pub fn qiwi_api_password(&self) -> &str {
        &self.0.qiwi_api_password
    }

    pub fn rust_log(&self) -> Option<&str> {
        self.0.rust_log.as_deref()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.qiwi_prv_id(),
            self.qiwi_api_id(),
            self.qiwi_api_password(),
        )
    }

    pub fn load() -> Result<Env, Error> {
        if let Err(err) = dotenv() {
            info!("Failed to load .env file: {}", err);
        }
        Self::from_process()
    }

    /// Reads the process environment only, without touching `.env`.
    pub fn from_process() -> Result<Env, Error> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Builds the config from any key lookup, the process environment in `load`.
    pub fn from_lookup<F>(lookup: F) -> Result<Env, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| eyre!("{} is not set", key));

        Ok(Env(Arc::new(EnvInner {
            qiwi_prv_id: required("QIWI_PRV_ID")?,
            qiwi_api_id: required("QIWI_API_ID")?,
            qiwi_api_password: required("QIWI_API_PASSWORD")?,
            rust_log: lookup("RUST_LOG"),
        })))
    }
}
