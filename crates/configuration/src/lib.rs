use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, LeverageBucket, Settings, SizeThresholds};

/// Loads the application configuration from the `tradebook.toml` file.
///
/// Every setting has an in-code default, so a missing file yields a fully
/// usable configuration rather than an error; a present file only needs to
/// name the settings it overrides.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `tradebook.toml`.
        // The file is optional; defaults cover everything.
        .add_source(config::File::with_name("tradebook").required(false))
        .build()?;

    // Attempt to deserialize the configuration into our `Settings` struct,
    // falling back to defaults for anything the file leaves out.
    let settings: Settings = builder.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}
