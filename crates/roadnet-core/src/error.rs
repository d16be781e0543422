use std::fmt;

/// Failures surfaced by the roadnet pipeline.
///
/// All variants are value-level: nothing here is transient, so callers
/// should never retry on them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoadnetError {
    /// Source data could not be decoded into line geometries.
    #[error("invalid input: {0}")]
    InputFormat(String),

    /// No usable line geometry produced a single node.
    #[error("no nodes found in the input road lines")]
    EmptyInput,

    /// A configuration file or value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RoadnetError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InputFormat(_) => ErrorCode::InputFormat,
            Self::EmptyInput => ErrorCode::EmptyInput,
            Self::Config(_) => ErrorCode::ConfigInvalid,
        }
    }
}

/// Machine-readable error codes for scripts and service layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputFormat,
    EmptyInput,
    ConfigInvalid,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputFormat => "E1001",
            Self::EmptyInput => "E1002",
            Self::ConfigInvalid => "E2001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InputFormat => "Input could not be decoded",
            Self::EmptyInput => "Input contains no usable lines",
            Self::ConfigInvalid => "Configuration rejected",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InputFormat => {
                Some("Provide a GeoJSON FeatureCollection of LineString or MultiLineString features.")
            }
            Self::EmptyInput => Some("Check that the layer has non-null line geometries."),
            Self::ConfigInvalid => Some("Fix the value in the config file and retry."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
