use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

/// Where the salary dataset lives.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Path to the salary CSV. Relative paths resolve against the
    /// application directory.
    #[serde(default = "default_data_file")]
    pub file: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

/// Parameters for the derived chart tables.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSettings {
    /// How many roles the top-roles bar chart shows.
    #[serde(default = "default_top_roles")]
    pub top_roles: usize,
    /// Number of equal-width intervals in the salary histogram.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// The role the per-country choropleth is restricted to.
    #[serde(default = "default_choropleth_role")]
    pub choropleth_role: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            top_roles: default_top_roles(),
            histogram_bins: default_histogram_bins(),
            choropleth_role: default_choropleth_role(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("salaries.csv")
}

fn default_top_roles() -> usize {
    10
}

fn default_histogram_bins() -> usize {
    30
}

fn default_choropleth_role() -> String {
    "Data Scientist".to_string()
}
