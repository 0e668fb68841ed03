use secrecy::SecretString;
use serde::Deserialize;

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
pub const DEFAULT_GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Deserialize, Debug, Clone)]
pub struct GeminiSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Name of the environment variable holding the API key. The key is read
    /// on every call, never cached in the settings.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl GeminiSettings {
    pub fn new(api_url: String, api_key_env: String) -> Self {
        Self {
            api_url,
            api_key_env,
        }
    }

    /// Current value of the configured key variable, `None` when unset or blank.
    pub fn read_api_key(&self) -> Option<SecretString> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into_boxed_str()))
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self::new(default_api_url(), default_api_key_env())
    }
}

fn default_api_url() -> String {
    DEFAULT_GEMINI_API_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_GEMINI_API_KEY_ENV.to_string()
}
