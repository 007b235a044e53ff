use padezh_parser::{Markers, Segmenter, SegmentError, DEFAULT_INVARIANT_INFIXES};
use serde::{Deserialize, Serialize};

/// Tunables of the phrase layer. Every field has a default, so a partial
/// document (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflectorConfig {
    pub open_marker: String,
    pub close_marker: String,
    /// Words that freeze the rest of a hyphenated compound ("Ростов-на-Дону").
    pub invariant_infixes: Vec<String>,
}

impl Default for InflectorConfig {
    fn default() -> Self {
        let markers = Markers::default();
        Self {
            open_marker: markers.open,
            close_marker: markers.close,
            invariant_infixes: DEFAULT_INVARIANT_INFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl InflectorConfig {
    pub fn segmenter(&self) -> Result<Segmenter, SegmentError> {
        let markers = Markers::new(self.open_marker.as_str(), self.close_marker.as_str())?;
        Ok(Segmenter::new()
            .with_markers(markers)?
            .with_invariant_infixes(self.invariant_infixes.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padezh_parser::MarkerPolicy;

    #[test]
    fn partial_document_keeps_defaults() {
        let config: InflectorConfig =
            serde_json::from_str(r#"{ "open_marker": "{", "close_marker": "}" }"#).unwrap();
        assert_eq!(config.invariant_infixes, vec!["на", "и"]);

        let segmenter = config.segmenter().unwrap();
        assert_eq!(segmenter.markers().open, "{");
        let phrase = segmenter.segment("{Москва}-сити", MarkerPolicy::FreezeMarked).unwrap();
        assert_eq!(phrase.inflectable().count(), 1);
    }

    #[test]
    fn empty_document_is_default() {
        let config: InflectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InflectorConfig::default());
    }

    #[test]
    fn invalid_markers_are_rejected() {
        let config = InflectorConfig {
            open_marker: "||".into(),
            close_marker: "||".into(),
            ..InflectorConfig::default()
        };
        assert!(matches!(config.segmenter(), Err(SegmentError::InvalidMarkers(_))));
    }
}
