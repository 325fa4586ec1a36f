use crate::display::Language;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter},
};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    language: Language,
    show_descriptions: bool,
}

impl Config {
    pub(crate) fn get_language(&self) -> Language { self.language }
    pub(crate) fn get_show_descriptions(&self) -> bool { self.show_descriptions }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::Both,
            show_descriptions: false,
        }
    }
}

pub(crate) async fn create_initial_config_file(config_path: &Path) -> Result<()> {
    let config_file_path = config_path.join("config.json");

    let default_config = serde_json::to_string_pretty(&Config::default())?;
    let config_file = File::create(&config_file_path).await?;
    let mut bufwriter = BufWriter::new(config_file);

    bufwriter.write_all(default_config.as_bytes()).await?;
    bufwriter.flush().await?;

    tracing::warn!(
        "A default configuration has been generated at {}",
        config_file_path.to_string_lossy()
    );

    Ok(())
}

pub(crate) async fn read_config(config_path: &Path) -> Result<Config> {
    let config_file_path = config_path.join("config.json");

    let config_file = File::open(&config_file_path).await?;
    let mut bufreader = BufReader::new(config_file);
    let mut buffer = String::new();
    bufreader.read_to_string(&mut buffer).await?;

    match serde_json::from_str::<Config>(&buffer) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(
                "\"{}\" could not be read ({e}), using the default configuration...",
                config_file_path.to_string_lossy()
            );

            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"language":"japanese"}"#).unwrap();

        assert_eq!(config.get_language(), Language::Japanese);
        assert!(!config.get_show_descriptions());
    }

    #[test]
    fn default_config_round_trips() {
        let json = serde_json::to_string_pretty(&Config::default()).unwrap();

        assert!(json.contains("\"both\""));
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), Config::default());
    }
}
