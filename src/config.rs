use crate::error::{DemoError, Result};
use crate::loader::BatchOptions;
use crate::model::{Author, Book, Person};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = ".gql-demo.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub batch: BatchSettings,

    #[serde(default)]
    pub seed: SeedData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Extra time a batch stays open once first awaited. 0 = one executor yield.
    #[serde(default)]
    pub delay_ms: u64,

    /// 0 = unbounded
    #[serde(default)]
    pub max_batch_size: usize,
}

impl BatchSettings {
    pub fn options(&self) -> BatchOptions {
        BatchOptions {
            delay: Duration::from_millis(self.delay_ms),
            max_batch_size: self.max_batch_size,
        }
    }
}

/// Initial store contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<Book>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<Person>,
}

impl SeedData {
    /// A small library used by `init --sample`.
    pub fn sample() -> Self {
        Self {
            books: vec![
                Book::new(1, "Childhood".to_string())
                    .with_description("A memoir of early years".to_string())
                    .with_author_ids(vec![1, 2]),
                Book::new(2, "Letters".to_string())
                    .with_description("Collected correspondence".to_string())
                    .with_author_ids(vec![2]),
            ],
            authors: vec![
                Author::new(1, "Sagor".to_string()).with_book_ids(vec![1]),
                Author::new(2, "Sayf Azad".to_string()).with_book_ids(vec![1, 2]),
            ],
            persons: vec![Person::new(1, "Sagor".to_string()).with_age(Some(26.0))],
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DemoConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Loads `explicit` if given, otherwise the nearest config file at or
    /// above `start_path`, otherwise the defaults.
    pub fn load_or_default(explicit: Option<&Path>, start_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(DemoError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }
        match Self::find_config_file(start_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
