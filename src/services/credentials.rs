use crate::errors::ConfigError;
use crate::models::Credentials;
use crate::services::config_store::{ConfigStore, StoredConfig};
use crate::services::prompt::Prompter;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_VAR: &str = "OPENROUTER_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Finds the API key and base URL: environment first, then the config store,
/// then the user. Values typed in by the user are written back to the store.
pub struct CredentialResolver<'a, E> {
    env: E,
    store: &'a ConfigStore,
}

impl<'a> CredentialResolver<'a, fn(&str) -> Option<String>> {
    pub fn from_process_env(store: &'a ConfigStore) -> Self {
        Self::new(process_env, store)
    }
}

impl<'a, E> CredentialResolver<'a, E>
where
    E: Fn(&str) -> Option<String>,
{
    pub fn new(env: E, store: &'a ConfigStore) -> Self {
        Self { env, store }
    }

    pub fn resolve(&self, prompter: &mut dyn Prompter) -> Result<Credentials, ConfigError> {
        let env_key = non_empty((self.env)(API_KEY_VAR));
        let env_url = non_empty((self.env)(BASE_URL_VAR));

        if let (Some(api_key), Some(base_url)) = (env_key.clone(), env_url.clone()) {
            log::info!("🔑 Credentials loaded from environment");
            return Ok(Credentials { api_key, base_url });
        }

        let stored = self.store.load().unwrap_or_else(|e| {
            log::warn!("⚠️ Config store unreadable, ignoring it: {}", e);
            StoredConfig::default()
        });

        let (api_key, key_entered) = match env_key.or_else(|| non_empty(stored.api_key)) {
            Some(key) => (key, false),
            None => {
                let answer = prompter.read_hidden("OpenRouter API key: ")?;
                let key = non_empty(answer).ok_or(ConfigError::MissingValue("API key"))?;
                (key, true)
            }
        };

        let (base_url, url_entered) = match env_url.or_else(|| non_empty(stored.base_url)) {
            Some(url) => (url, false),
            None => {
                let prompt = format!("API base URL [{}]: ", DEFAULT_BASE_URL);
                let answer = prompter.read_visible(&prompt)?;
                let url = non_empty(answer).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                (url, true)
            }
        };

        if key_entered || url_entered {
            let persisted = self.store.update(|config| {
                if key_entered {
                    config.api_key = Some(api_key.clone());
                }
                if url_entered {
                    config.base_url = Some(base_url.clone());
                }
            });

            match persisted {
                Ok(()) => log::info!("💾 Credentials saved to {}", self.store.path().display()),
                // The user must not be asked for the key again next run.
                Err(e) if key_entered => return Err(e),
                Err(e) => log::warn!("⚠️ Could not save base URL: {}", e),
            }
        }

        Ok(Credentials { api_key, base_url })
    }
}
