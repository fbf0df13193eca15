//! Level catalog
//!
//! The campaign is consumed front to back: the first level starts the game,
//! the rest wait in the queue.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{Level, WinCondition};

/// Ordered list of levels for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub levels: Vec<Level>,
}

impl Default for Campaign {
    fn default() -> Self {
        let level = |name: &str, spawn_interval: f32, bomb_speed: f32, win| Level {
            name: name.to_string(),
            spawn_interval,
            bomb_speed,
            win,
        };

        Self {
            levels: vec![
                level("Warm-up", 1.6, 80.0, WinCondition::CatchBombs { count: 5 }),
                level("Drizzle", 1.2, 110.0, WinCondition::CatchBombs { count: 10 }),
                level("Downpour", 0.8, 150.0, WinCondition::Survive { seconds: 30.0 }),
                level("Barrage", 0.55, 190.0, WinCondition::CatchBombs { count: 25 }),
                level("Blitz", 0.4, 240.0, WinCondition::Survive { seconds: 45.0 }),
            ],
        }
    }
}

impl Campaign {
    /// Parse a campaign from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a campaign from a file, falling back to the built-in one on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));

        match loaded {
            Ok(campaign) if campaign.levels.is_empty() => {
                log::warn!("Campaign {} has no levels, using built-in campaign", path.display());
                Self::default()
            }
            Ok(campaign) => {
                log::info!("Loaded {} levels from {}", campaign.levels.len(), path.display());
                campaign
            }
            Err(e) => {
                log::warn!("Could not load campaign {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_campaign_is_playable() {
        let campaign = Campaign::default();
        assert!(!campaign.is_empty());
        for level in &campaign.levels {
            assert!(level.spawn_interval > 0.0, "{} never spawns", level.name);
            assert!(level.bomb_speed > 0.0);
        }
        // Levels get harder
        let speeds: Vec<f32> = campaign.levels.iter().map(|l| l.bomb_speed).collect();
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_json() {
        let campaign = Campaign::from_json(
            r#"{ "levels": [
                { "name": "Only", "spawn_interval": 2.0, "bomb_speed": 60.0,
                  "win": { "survive": { "seconds": 10.0 } } }
            ] }"#,
        )
        .unwrap();
        assert_eq!(campaign.len(), 1);
        assert_eq!(campaign.levels[0].win, WinCondition::Survive { seconds: 10.0 });
    }

    #[test]
    fn test_missing_file_falls_back() {
        let campaign = Campaign::load_or_default("/definitely/not/here/campaign.json");
        assert_eq!(campaign, Campaign::default());
    }
}
