use std::fmt;

/// Road/air quality category reported by the endpoint's classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirStatus {
    /// `BAIK`
    Good,
    /// `SEDANG`
    Moderate,
    /// `TIDAK SEHAT`
    Unhealthy,
    /// Anything else, kept verbatim for display.
    Other(String),
}

impl AirStatus {
    /// Maps the endpoint's status string to a category.
    ///
    /// Matching is exact on the trimmed text, as the classifier emits
    /// upper-case labels.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "BAIK" => Self::Good,
            "SEDANG" => Self::Moderate,
            "TIDAK SEHAT" => Self::Unhealthy,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The label as shown on the dashboard.
    pub fn label(&self) -> &str {
        match self {
            Self::Good => "BAIK",
            Self::Moderate => "SEDANG",
            Self::Unhealthy => "TIDAK SEHAT",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for AirStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!(AirStatus::parse("BAIK"), AirStatus::Good);
        assert_eq!(AirStatus::parse("SEDANG"), AirStatus::Moderate);
        assert_eq!(AirStatus::parse(" TIDAK SEHAT "), AirStatus::Unhealthy);
    }

    #[test]
    fn parse_unknown_keeps_text() {
        let status = AirStatus::parse("Waiting...");
        assert_eq!(status, AirStatus::Other("Waiting...".into()));
        assert_eq!(status.to_string(), "Waiting...");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(AirStatus::parse("baik"), AirStatus::Other("baik".into()));
    }
}
