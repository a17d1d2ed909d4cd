//! Error types for the color_census library

use thiserror::Error;

/// Result type alias for color_census operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for palette construction, configuration and sample loading.
///
/// Degenerate inputs (no samples, more clusters than samples) are not errors;
/// they produce empty or clipped results instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Reference palette has no entries
    #[error("Reference palette is empty")]
    EmptyPalette,

    /// Two palette entries share a name
    #[error("Duplicate palette entry name: {name}")]
    DuplicatePaletteEntry { name: String },

    /// Hex display string could not be parsed
    #[error("Invalid hex color {value:?}: {reason}")]
    InvalidHexColor { value: String, reason: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration or palette file could not be read, written or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration file error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error is fatal at initialization (palette or configuration)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyPalette
                | AnalysisError::DuplicatePaletteEntry { .. }
                | AnalysisError::InvalidHexColor { .. }
                | AnalysisError::InvalidParameter { .. }
                | AnalysisError::ConfigError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::EmptyPalette => {
                "The reference palette has no colors. Please provide at least one palette entry.".to_string()
            }
            AnalysisError::DuplicatePaletteEntry { name } => {
                format!("The palette lists \"{}\" more than once. Palette names must be unique.", name)
            }
            AnalysisError::InvalidHexColor { value, .. } => {
                format!("\"{}\" is not a valid hex color. Use the #RRGGBB form.", value)
            }
            AnalysisError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            _ => "Color analysis could not be configured. Please check the settings.".to_string(),
        }
    }
}
