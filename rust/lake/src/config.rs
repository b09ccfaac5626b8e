use crate::data::{ActionSetName, MapName, MAX_EPISODE_SIZE};
use crate::error::LakeError;
use crate::rewards::Variant;
use serde::{Deserialize, Serialize};

/// Everything needed to make an environment from named presets.
///
/// ```
/// use frozen_lake::{ActionSetName, EnvConfig, MapName};
///
/// let config = EnvConfig::from_json(r#"{"map": "medium", "action_set": "slippery"}"#).unwrap();
/// assert_eq!(config.map, MapName::Medium);
/// assert_eq!(config.action_set, ActionSetName::Slippery);
/// assert_eq!(config.max_episode_size, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    pub map: MapName,
    pub action_set: ActionSetName,
    pub variant: Variant,
    pub max_episode_size: usize,
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            map: MapName::default(),
            action_set: ActionSetName::default(),
            variant: Variant::default(),
            max_episode_size: MAX_EPISODE_SIZE,
            seed: None,
        }
    }
}

impl EnvConfig {
    pub fn from_json(json: &str) -> Result<Self, LakeError> {
        serde_json::from_str(json).map_err(|e| LakeError::configuration(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, LakeError> {
        serde_json::to_string(self).map_err(|e| LakeError::configuration(e.to_string()))
    }

    pub fn with_map(mut self, map: MapName) -> Self {
        self.map = map;
        self
    }

    pub fn with_action_set(mut self, action_set: ActionSetName) -> Self {
        self.action_set = action_set;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_max_episode_size(mut self, max_episode_size: usize) -> Self {
        self.max_episode_size = max_episode_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertor::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = EnvConfig::from_json(r#"{"variant": "fall", "seed": 7}"#).unwrap();

        assert_that!(config).is_equal_to(
            EnvConfig::default()
                .with_variant(Variant::Fall)
                .with_seed(7),
        );
    }

    #[test]
    fn unknown_names_are_configuration_errors() {
        for json in [
            r#"{"map": "gigantic"}"#,
            r#"{"action_set": "icy"}"#,
            r#"{"variant": "melting"}"#,
            r#"{"mapname": "small"}"#,
        ] {
            let err = EnvConfig::from_json(json).unwrap_err();
            assert!(matches!(err, LakeError::Configuration { .. }), "{json}");
        }
    }

    #[test]
    fn json_round_trip() {
        let config = EnvConfig::default()
            .with_map(MapName::Huge)
            .with_action_set(ActionSetName::Slippery)
            .with_max_episode_size(42);
        let json = config.to_json().unwrap();

        assert!(json.contains(r#""map":"huge""#), "{json}");
        assert_eq!(EnvConfig::from_json(&json).unwrap(), config);
    }
}
