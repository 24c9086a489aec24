/// Backend endpoint configuration from environment variables
pub mod backend;

/// Dashboard settings loading from config.toml
pub mod settings;
