use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ChartSettings, Config, DataSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it. The file is optional: when absent, every setting
/// falls back to its default.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    if config.charts.histogram_bins == 0 {
        return Err(ConfigError::ValidationError(
            "charts.histogram_bins must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_stock_dashboard() {
        let config = Config::default();
        assert_eq!(config.charts.top_roles, 10);
        assert_eq!(config.charts.histogram_bins, 30);
        assert_eq!(config.charts.choropleth_role, "Data Scientist");
        assert_eq!(config.data.file, std::path::PathBuf::from("salaries.csv"));
    }
}
