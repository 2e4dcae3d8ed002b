use std::path::PathBuf;
use std::time::Duration;

pub const MODEL_VAR: &str = "OPENROUTER_MODEL";
pub const SYSTEM_PROMPT_VAR: &str = "INGREDIENTIQ_SYSTEM_PROMPT";
pub const FOOD_LOG_VAR: &str = "INGREDIENTIQ_FOOD_LOG";
pub const TIMEOUT_VAR: &str = "INGREDIENTIQ_TIMEOUT_SECS";
pub const CONFIG_PATH_VAR: &str = "INGREDIENTIQ_CONFIG";

pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-distill-llama-70b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a preventive health expert analyzing an included daily food log. \
Identify potentially harmful processed foods and predict long-term health impacts. \
List the unhealthiest processed foods in the log and provide insights and recommendations \
to improve long term health outcomes based on findings and analysis.";

/// Non-secret runtime settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model: String,
    pub system_prompt_path: Option<PathBuf>,
    pub food_log_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub config_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("⚠️ Invalid {}='{}', using {}s", TIMEOUT_VAR, raw, DEFAULT_TIMEOUT_SECS);
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Self {
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_prompt_path: get(SYSTEM_PROMPT_VAR).map(PathBuf::from),
            food_log_path: get(FOOD_LOG_VAR).map(PathBuf::from),
            request_timeout,
            config_path: get(CONFIG_PATH_VAR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings = Settings::from_lookup(|_| None);

        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.system_prompt_path, None);
        assert_eq!(settings.food_log_path, None);
        assert_eq!(settings.config_path, None);
    }

    #[test]
    fn test_values_read_from_lookup() {
        let settings = Settings::from_lookup(|name| match name {
            MODEL_VAR => Some("meta-llama/llama-4-scout:free".to_string()),
            SYSTEM_PROMPT_VAR => Some("prompts/system.txt".to_string()),
            FOOD_LOG_VAR => Some(" week.json ".to_string()),
            TIMEOUT_VAR => Some("30".to_string()),
            _ => None,
        });

        assert_eq!(settings.model, "meta-llama/llama-4-scout:free");
        assert_eq!(settings.system_prompt_path, Some(PathBuf::from("prompts/system.txt")));
        assert_eq!(settings.food_log_path, Some(PathBuf::from("week.json")));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let settings = Settings::from_lookup(|name| (name == TIMEOUT_VAR).then(|| "soon".to_string()));
        assert_eq!(settings.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_path_override() {
        let settings = Settings::from_lookup(|name| {
            (name == CONFIG_PATH_VAR).then(|| "/tmp/iq/config.json".to_string())
        });
        assert_eq!(settings.config_path, Some(PathBuf::from("/tmp/iq/config.json")));
    }
}
