//! Interpolation delimiter configuration.

/// Delimiters used to find embedded expressions inside template text,
/// `{{` / `}}` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationConfig {
    pub start: String,
    pub end: String,
}

impl InterpolationConfig {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        InterpolationConfig {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_markers(markers: Option<(&str, &str)>) -> Self {
        match markers {
            Some((start, end)) => InterpolationConfig::new(start, end),
            None => InterpolationConfig::default(),
        }
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        InterpolationConfig::new("{{", "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let config = InterpolationConfig::default();
        assert_eq!(config.start, "{{");
        assert_eq!(config.end, "}}");
    }

    #[test]
    fn test_custom_markers() {
        let config = InterpolationConfig::from_markers(Some(("[[", "]]")));
        assert_eq!(config.start, "[[");
        assert_eq!(config.end, "]]");
    }
}
