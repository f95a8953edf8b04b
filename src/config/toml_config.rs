use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Optional config file. Every value can also come from the command line,
/// which takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub category: Option<String>,
    pub id_prefix: Option<String>,
    pub start_id: Option<u32>,
    pub languages: Option<Vec<String>>,
    pub auto_id: Option<bool>,
    pub expected_clues: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub markdown_dir: Option<PathBuf>,
    pub json_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub difficulty: Option<String>,
    pub source: Option<String>,
}

impl TomlConfig {
    /// Loads a config file. Relative paths inside it resolve against the
    /// file's own directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::io(path, e))?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.paths.rebase(base);
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl PathsConfig {
    fn rebase(&mut self, base: &Path) {
        for path in [&mut self.markdown_dir, &mut self.json_dir, &mut self.manifest]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
