#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// Connection settings of the hosted backends.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Project of the hosted document store.
    pub project_id: String,
    pub exercise_api_url: String,
    pub exercise_api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            exercise_api_url: String::from("https://api.api-ninjas.com/v1"),
            exercise_api_key: String::new(),
        }
    }
}
