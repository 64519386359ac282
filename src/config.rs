use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};
use toml::{value::Table, Value};

use crate::error::{Error, Result};

/// Name of the optional configuration file at the root of the source tree.
pub const CONFIG_FILE: &str = "notebook.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Configuration for the notebook itself.
    pub notebook: NotebookConfig,

    /// Any remaining configuration for individual renderers.
    rest: Value,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let mut buffer = String::new();
        File::open(path)
            .with_context(|| "Failed to open config file")?
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read config file")?;

        Config::from_str(&buffer)
    }

    /// Renderer configuration for the HTML output, taken from the
    /// `[output.html]` table when one was provided.
    pub fn html(&self) -> Result<HtmlConfig> {
        let Value::Table(ref table) = self.rest else {
            return Ok(HtmlConfig::default());
        };

        let Some(html) = table
            .get("output")
            .and_then(|output| output.as_table())
            .and_then(|output| output.get("html"))
        else {
            return Ok(HtmlConfig::default());
        };

        html.clone()
            .try_into()
            .with_context(|| "Attempted to parse invalid [output.html] configuration")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notebook: NotebookConfig::default(),
            rest: Value::Table(Table::default()),
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = Value::deserialize(deserializer)?;
        let Value::Table(mut table) = raw else {
            return Err(D::Error::custom("notebook.toml must always be a toml table"));
        };

        let notebook: NotebookConfig = table
            .remove("notebook")
            .map(|notebook| notebook.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let config = Config {
            notebook,
            rest: Value::Table(table),
        };

        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).with_context(|| "Attempted to parse invalid configuration file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct NotebookConfig {
    /// Title rendered at the top of the notebook.
    pub title: String,
    /// Optional description rendered below the title in HTML output.
    pub description: Option<String>,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            title: String::from("Notebook"),
            description: None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct HtmlConfig {
    /// Path to a stylesheet whose contents are appended to the built-in
    /// styles, relative to the source root.
    pub stylesheet: Option<PathBuf>,
    /// Fixed text-column width hint applied to the rendered page.
    pub columns: Option<u32>,
}
