use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "ai_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub search: SearchConfig,
    /// Weights for the `strategist` policy.
    pub strategist: EvaluationConfig,
    /// Weights for the `phased` policy.
    pub phased: EvaluationConfig,
    /// Weights for the `shady` policy. Older config files omit it.
    #[serde(default = "EvaluationConfig::shady")]
    pub shady: EvaluationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies below the root before the frontier is evaluated (root is depth 0,
    /// leaves sit at `depth_limit + 1`).
    pub depth_limit: usize,
    /// Max entries of each policy's evaluation cache.
    pub cache_capacity: usize,
}

/// Linear weights of the evaluation components, all from the perspective
/// player's side. Opponent terms are subtracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub material: i32,
    pub own_mobility: i32,
    pub opponent_mobility: i32,
    pub own_stability: i32,
    pub opponent_stability: i32,
    /// Per disc inside a corner's 2x2 block.
    pub corner: i32,
    /// Per disc on the border.
    pub edge: i32,
    /// Per own disc next to an empty cell (subtracted).
    #[serde(default)]
    pub frontier: i32,
    /// Bonus when the move that reached this board took a corner. Negated
    /// when the opponent made it.
    #[serde(default)]
    pub corner_move: i32,
    /// Penalty when the move that reached this board took an X-square
    /// (the cell diagonal to a corner). Negated when the opponent made it.
    #[serde(default)]
    pub x_square_move: i32,
}

/// Phase-dependent weights. The phase is picked from the number of discs on
/// the board: `<= early_max` early, `<= mid_max` mid, otherwise late.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub early_max: usize,
    pub mid_max: usize,
    pub early: ComponentWeights,
    pub mid: ComponentWeights,
    pub late: ComponentWeights,
}

impl EvaluationConfig {
    /// Same weights in every phase.
    pub fn uniform(weights: ComponentWeights) -> Self {
        EvaluationConfig {
            early_max: 20,
            mid_max: 40,
            early: weights,
            mid: weights,
            late: weights,
        }
    }

    /// 石数差のみ
    pub fn material() -> Self {
        Self::uniform(ComponentWeights {
            material: 1,
            ..ComponentWeights::default()
        })
    }

    /// Stability and mobility, opponent terms weighted double.
    pub fn strategist() -> Self {
        Self::uniform(ComponentWeights {
            own_stability: 5,
            opponent_stability: 10,
            own_mobility: 1,
            opponent_mobility: 2,
            ..ComponentWeights::default()
        })
    }

    /// Mobility / corner-edge pattern / material, reweighted per phase
    /// (percent-scaled).
    pub fn phased() -> Self {
        let blend = |mobility: i32, pattern: i32, material: i32| ComponentWeights {
            material,
            own_mobility: mobility,
            opponent_mobility: mobility,
            corner: pattern * 10,
            edge: pattern * 5,
            ..ComponentWeights::default()
        };
        EvaluationConfig {
            early_max: 20,
            mid_max: 40,
            early: blend(20, 40, 40),
            mid: blend(30, 40, 30),
            late: blend(10, 50, 40),
        }
    }

    /// Stability over mobility with a frontier penalty, plus the corner and
    /// X-square terms for the move just played.
    pub fn shady() -> Self {
        Self::uniform(ComponentWeights {
            own_stability: 2,
            own_mobility: 1,
            opponent_mobility: 1,
            frontier: 1,
            corner_move: 500,
            x_square_move: 250,
            ..ComponentWeights::default()
        })
    }

    pub fn weights_for(&self, disc_count: usize) -> &ComponentWeights {
        if disc_count <= self.early_max {
            &self.early
        } else if disc_count <= self.mid_max {
            &self.mid
        } else {
            &self.late
        }
    }
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::debug!("using default AI config ({})", e);
            Self::default()
        })
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            search: SearchConfig {
                depth_limit: 3,
                cache_capacity: 200_000,
            },
            strategist: EvaluationConfig::strategist(),
            phased: EvaluationConfig::phased(),
            shady: EvaluationConfig::shady(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_selection() {
        let cfg = EvaluationConfig::phased();
        assert_eq!(cfg.weights_for(4).material, 40);
        assert_eq!(cfg.weights_for(20).own_mobility, 20);
        assert_eq!(cfg.weights_for(21).own_mobility, 30);
        assert_eq!(cfg.weights_for(41).own_mobility, 10);
    }

    #[test]
    fn test_json_roundtrip_and_file_load() {
        let config = AIConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: AIConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let path = std::env::temp_dir().join(format!("ai_config_{}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();
        assert_eq!(AIConfig::load_from(&path).unwrap(), config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_without_newer_fields_still_loads() {
        let weights = r#"{"material":1,"own_mobility":0,"opponent_mobility":0,
            "own_stability":0,"opponent_stability":0,"corner":0,"edge":0}"#;
        let phase = format!(
            r#"{{"early_max":20,"mid_max":40,"early":{w},"mid":{w},"late":{w}}}"#,
            w = weights
        );
        let json = format!(
            r#"{{"version":"1.0","search":{{"depth_limit":2,"cache_capacity":10}},
                "strategist":{p},"phased":{p}}}"#,
            p = phase
        );
        let config: AIConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.strategist, EvaluationConfig::material());
        assert_eq!(config.shady, EvaluationConfig::shady());
        assert_eq!(config.strategist.early.frontier, 0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AIConfig::load_from(Path::new("/nonexistent/ai_config.json")).is_err());
    }
}
