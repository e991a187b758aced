//! Supported gaming platforms and their PriceCharting identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platforms the tool knows how to look up, NES era through modern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Nes,
    Snes,
    N64,
    GameBoy,
    Gbc,
    Gba,
    GameCube,
    Wii,
    Nds,
    #[serde(rename = "3ds")]
    ThreeDs,
    Switch,
    Genesis,
    Dreamcast,
    Saturn,
    GameGear,
    Ps1,
    Ps2,
    Ps3,
    Psp,
    Xbox,
    Xbox360,
    Atari2600,
}

impl Platform {
    /// Returns the short internal key used in CLI args and config.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Nes => "nes",
            Platform::Snes => "snes",
            Platform::N64 => "n64",
            Platform::GameBoy => "gameboy",
            Platform::Gbc => "gbc",
            Platform::Gba => "gba",
            Platform::GameCube => "gamecube",
            Platform::Wii => "wii",
            Platform::Nds => "nds",
            Platform::ThreeDs => "3ds",
            Platform::Switch => "switch",
            Platform::Genesis => "genesis",
            Platform::Dreamcast => "dreamcast",
            Platform::Saturn => "saturn",
            Platform::GameGear => "gamegear",
            Platform::Ps1 => "ps1",
            Platform::Ps2 => "ps2",
            Platform::Ps3 => "ps3",
            Platform::Psp => "psp",
            Platform::Xbox => "xbox",
            Platform::Xbox360 => "xbox360",
            Platform::Atari2600 => "atari2600",
        }
    }

    /// Returns the human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Nes => "NES",
            Platform::Snes => "SNES",
            Platform::N64 => "N64",
            Platform::GameBoy => "Game Boy",
            Platform::Gbc => "Game Boy Color",
            Platform::Gba => "GBA",
            Platform::GameCube => "GameCube",
            Platform::Wii => "Wii",
            Platform::Nds => "Nintendo DS",
            Platform::ThreeDs => "3DS",
            Platform::Switch => "Switch",
            Platform::Genesis => "Sega Genesis",
            Platform::Dreamcast => "Dreamcast",
            Platform::Saturn => "Sega Saturn",
            Platform::GameGear => "Game Gear",
            Platform::Ps1 => "PS1",
            Platform::Ps2 => "PS2",
            Platform::Ps3 => "PS3",
            Platform::Psp => "PSP",
            Platform::Xbox => "Xbox",
            Platform::Xbox360 => "Xbox 360",
            Platform::Atari2600 => "Atari 2600",
        }
    }

    /// Returns the platform identifier PriceCharting uses in game URLs.
    pub fn market_id(&self) -> &'static str {
        match self {
            Platform::Nes => "nes",
            Platform::Snes => "super-nintendo",
            Platform::N64 => "nintendo-64",
            Platform::GameBoy => "gameboy",
            Platform::Gbc => "gameboy-color",
            Platform::Gba => "gameboy-advance",
            Platform::GameCube => "gamecube",
            Platform::Wii => "wii",
            Platform::Nds => "nintendo-ds",
            Platform::ThreeDs => "nintendo-3ds",
            Platform::Switch => "nintendo-switch",
            Platform::Genesis => "sega-genesis",
            Platform::Dreamcast => "sega-dreamcast",
            Platform::Saturn => "sega-saturn",
            Platform::GameGear => "sega-game-gear",
            Platform::Ps1 => "playstation",
            Platform::Ps2 => "playstation-2",
            Platform::Ps3 => "playstation-3",
            Platform::Psp => "psp",
            Platform::Xbox => "xbox",
            Platform::Xbox360 => "xbox-360",
            Platform::Atari2600 => "atari-2600",
        }
    }

    /// Looks up a platform by its PriceCharting identifier.
    pub fn from_market_id(id: &str) -> Option<Platform> {
        Platform::all().iter().copied().find(|p| p.market_id() == id)
    }

    /// Returns all supported platforms.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Nes,
            Platform::Snes,
            Platform::N64,
            Platform::GameBoy,
            Platform::Gbc,
            Platform::Gba,
            Platform::GameCube,
            Platform::Wii,
            Platform::Nds,
            Platform::ThreeDs,
            Platform::Switch,
            Platform::Genesis,
            Platform::Dreamcast,
            Platform::Saturn,
            Platform::GameGear,
            Platform::Ps1,
            Platform::Ps2,
            Platform::Ps3,
            Platform::Psp,
            Platform::Xbox,
            Platform::Xbox360,
            Platform::Atari2600,
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        Platform::all()
            .iter()
            .copied()
            .find(|p| p.key() == key)
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown platform '{0}'. Run `retro-pricer platforms` for the supported list.")]
pub struct PlatformParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parsing() {
        assert_eq!(Platform::from_str("n64").unwrap(), Platform::N64);
        assert_eq!(Platform::from_str("N64").unwrap(), Platform::N64);
        assert_eq!(Platform::from_str("3ds").unwrap(), Platform::ThreeDs);
        assert_eq!(Platform::from_str("xbox360").unwrap(), Platform::Xbox360);
        assert!(Platform::from_str("commodore64").is_err());
        assert!(Platform::from_str("").is_err());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = Platform::all().iter().map(|p| p.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Platform::all().len());
    }

    #[test]
    fn test_market_ids() {
        assert_eq!(Platform::N64.market_id(), "nintendo-64");
        assert_eq!(Platform::Snes.market_id(), "super-nintendo");
        assert_eq!(Platform::Ps1.market_id(), "playstation");
        assert_eq!(Platform::GameGear.market_id(), "sega-game-gear");
        assert_eq!(Platform::Atari2600.market_id(), "atari-2600");
    }

    #[test]
    fn test_from_market_id() {
        assert_eq!(Platform::from_market_id("nintendo-64"), Some(Platform::N64));
        assert_eq!(Platform::from_market_id("playstation-2"), Some(Platform::Ps2));
        assert_eq!(Platform::from_market_id("neo-geo"), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Platform::Gbc.display_name(), "Game Boy Color");
        assert_eq!(Platform::Genesis.display_name(), "Sega Genesis");
        assert_eq!(Platform::Xbox360.display_name(), "Xbox 360");
    }

    #[test]
    fn test_display_matches_key() {
        for platform in Platform::all() {
            assert_eq!(platform.to_string(), platform.key());
            assert_eq!(Platform::from_str(platform.key()).unwrap(), *platform);
        }
    }

    #[test]
    fn test_platform_count() {
        assert_eq!(Platform::all().len(), 22);
    }

    #[test]
    fn test_platform_serde() {
        assert_eq!(serde_json::to_string(&Platform::N64).unwrap(), "\"n64\"");
        assert_eq!(serde_json::to_string(&Platform::ThreeDs).unwrap(), "\"3ds\"");

        let parsed: Platform = serde_json::from_str("\"gamecube\"").unwrap();
        assert_eq!(parsed, Platform::GameCube);
    }
}
