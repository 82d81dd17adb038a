use crate::font::FontRole;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for workbook operations
pub type Result<T> = std::result::Result<T, WorkbookError>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// A required font face could not be loaded. Fatal: nothing is generated.
    #[error("failed to load the {role} font face")]
    Resource {
        role: FontRole,
        #[source]
        source: ResourceError,
    },

    /// A character reached the serializer that the face cannot encode. Normalization
    /// and font coverage have drifted apart; this is a bug, not an input error.
    #[error("character {ch:?} cannot be encoded by the {role} font face")]
    Encoding { ch: char, role: FontRole },

    #[error(transparent)]
    /// Writing the finished document failed
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// A configuration or product record could not be parsed
    Config(#[from] serde_json::Error),
}

/// Why a font face failed to load
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("could not read font program {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font program
    Parse(#[from] owned_ttf_parser::FaceParsingError),

    #[error("font program has no glyph for {0:?}")]
    MissingGlyph(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn resource_error_keeps_its_cause() {
        let err = WorkbookError::Resource {
            role: FontRole::Bold,
            source: ResourceError::MissingGlyph('~'),
        };
        assert_eq!(err.to_string(), "failed to load the bold font face");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("font program has no glyph for '~'".to_string())
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: WorkbookError = io_err.into();
        assert!(matches!(err, WorkbookError::Io(_)));
    }
}
