use thiserror::Error;

#[derive(Error, Debug)]
pub enum TofoError {
    #[error("Invalid observation bracket: end ({end}) must be after start ({start})")]
    InvalidBracket { start: String, end: String },

    #[error("Target {0} has no resolved sky position")]
    UnresolvedTarget(String),

    #[error("Scheduling error: {0}")]
    SchedulingError(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid event period for {0}: period must be strictly positive")]
    InvalidPeriod(String),

    #[error("Invalid sexagesimal angle: {0}")]
    InvalidSexagesimal(String),

    #[error("Ephemeris oracle failure: {0}")]
    OracleError(String),

    #[error("Invalid site configuration: {0}")]
    InvalidSiteConfig(String),

    #[error("NaN value encountered: {0}")]
    NanValue(#[from] ordered_float::FloatIsNan),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),
}

impl PartialEq for TofoError {
    fn eq(&self, other: &Self) -> bool {
        use TofoError::*;
        match (self, other) {
            (
                InvalidBracket { start: s1, end: e1 },
                InvalidBracket { start: s2, end: e2 },
            ) => s1 == s2 && e1 == e2,
            (UnresolvedTarget(a), UnresolvedTarget(b)) => a == b,
            (SchedulingError(a), SchedulingError(b)) => a == b,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (InvalidPeriod(a), InvalidPeriod(b)) => a == b,
            (InvalidSexagesimal(a), InvalidSexagesimal(b)) => a == b,
            (OracleError(a), OracleError(b)) => a == b,
            (InvalidSiteConfig(a), InvalidSiteConfig(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,

            // foreign errors only compare by variant
            (NanValue(_), NanValue(_)) => true,
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod tofo_errors_test {
    use super::*;

    #[test]
    fn test_error_equality() {
        assert_eq!(
            TofoError::SchedulingError("negative overhead".into()),
            TofoError::SchedulingError("negative overhead".into())
        );
        assert_ne!(
            TofoError::SchedulingError("a".into()),
            TofoError::OracleError("a".into())
        );

        let io1 = TofoError::from(std::io::Error::other("first"));
        let io2 = TofoError::from(std::io::Error::other("second"));
        assert_eq!(io1, io2);
    }

    #[test]
    fn test_bracket_message() {
        let err = TofoError::InvalidBracket {
            start: "2024-01-01T20:00:00 UTC".into(),
            end: "2024-01-01T19:00:00 UTC".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid observation bracket: end (2024-01-01T19:00:00 UTC) must be after start (2024-01-01T20:00:00 UTC)"
        );
    }
}
