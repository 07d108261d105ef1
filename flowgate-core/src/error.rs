use thiserror::Error;

/// Unified error type for Flowgate configuration handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One half of a co-required field pair was set without its partner.
    /// The pairs are `reqPathSearch`/`reqPathReplace`,
    /// `templateFePath`/`templateBePath`, and
    /// `consulTemplateFePath`/`consulTemplateBePath`.
    #[error("service {service}: {present} is set but {missing} is not; both must be set together")]
    MissingCoDependentField {
        service: String,
        present: &'static str,
        missing: &'static str,
    },

    /// The service definition file could not be read or deserialized.
    #[error("config extraction failed: {0}")]
    Extract(#[from] figment::Error),
}
