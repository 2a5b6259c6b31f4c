//! Cosmetic catalog
//!
//! Skins and environments are immutable descriptors. Whether a player owns
//! one is tracked separately in [`crate::progress::Progress`], keyed by the
//! variant, so no catalog entry carries mutable state.

use serde::{Deserialize, Serialize};

/// RGB color
pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const GRAY: Rgb = (128, 128, 128);
pub const RED: Rgb = (255, 0, 0);
pub const BLUE: Rgb = (0, 100, 255);
pub const YELLOW: Rgb = (255, 255, 0);
pub const ORANGE: Rgb = (255, 165, 0);
pub const PURPLE: Rgb = (147, 0, 211);
pub const CYAN: Rgb = (0, 255, 255);
pub const ICE: Rgb = (200, 230, 255);

/// Display data for one purchasable cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinInfo {
    pub name: &'static str,
    /// `None` for skins whose color is animated by the renderer
    pub color: Option<Rgb>,
    /// Price in coins (0 = owned by default, `None` = not sold)
    pub cost: Option<u32>,
}

/// Something that can be bought in the shop
pub trait Cosmetic: Copy + Ord + 'static {
    /// Every variant, in shop order
    const ALL: &'static [Self];

    fn info(self) -> SkinInfo;

    /// Owned without purchase
    fn is_free(self) -> bool {
        self.info().cost == Some(0)
    }
}

/// Ball skins (render hint only)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum BallSkin {
    #[default]
    Classic,
    Neon,
    Fire,
    Gold,
    Diamond,
    Plasma,
    Rainbow,
    Basketball,
    Emoji,
    Planet,
}

impl Cosmetic for BallSkin {
    const ALL: &'static [Self] = &[
        BallSkin::Classic,
        BallSkin::Neon,
        BallSkin::Fire,
        BallSkin::Gold,
        BallSkin::Diamond,
        BallSkin::Plasma,
        BallSkin::Rainbow,
        BallSkin::Basketball,
        BallSkin::Emoji,
        BallSkin::Planet,
    ];

    fn info(self) -> SkinInfo {
        let (name, color, cost) = match self {
            BallSkin::Classic => ("Classic", Some(WHITE), 0),
            BallSkin::Neon => ("Neon", Some(CYAN), 100),
            BallSkin::Fire => ("Fire", Some(ORANGE), 150),
            BallSkin::Gold => ("Gold", Some(YELLOW), 300),
            BallSkin::Diamond => ("Diamond", Some(ICE), 500),
            BallSkin::Plasma => ("Plasma", Some(PURPLE), 400),
            BallSkin::Rainbow => ("Rainbow", None, 750),
            BallSkin::Basketball => ("Basketball", Some(ORANGE), 200),
            BallSkin::Emoji => ("Emoji", Some(YELLOW), 250),
            BallSkin::Planet => ("Planet", Some(BLUE), 350),
        };
        SkinInfo {
            name,
            color,
            cost: Some(cost),
        }
    }
}

/// Paddle skins (render hint only)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PaddleSkin {
    #[default]
    Classic,
    Neon,
    Fire,
    Gold,
    Laser,
    Ice,
    Robot,
    Energy,
}

impl Cosmetic for PaddleSkin {
    const ALL: &'static [Self] = &[
        PaddleSkin::Classic,
        PaddleSkin::Neon,
        PaddleSkin::Fire,
        PaddleSkin::Gold,
        PaddleSkin::Laser,
        PaddleSkin::Ice,
        PaddleSkin::Robot,
        PaddleSkin::Energy,
    ];

    fn info(self) -> SkinInfo {
        let (name, color, cost) = match self {
            PaddleSkin::Classic => ("Classic", WHITE, 0),
            PaddleSkin::Neon => ("Neon", CYAN, 100),
            PaddleSkin::Fire => ("Fire", ORANGE, 150),
            PaddleSkin::Gold => ("Gold", YELLOW, 300),
            PaddleSkin::Laser => ("Laser", RED, 250),
            PaddleSkin::Ice => ("Ice", ICE, 200),
            PaddleSkin::Robot => ("Robot", GRAY, 400),
            PaddleSkin::Energy => ("Energy", PURPLE, 350),
        };
        SkinInfo {
            name,
            color: Some(color),
            cost: Some(cost),
        }
    }
}

/// Background color scheme of an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub grid: Rgb,
}

/// Arena themes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Environment {
    #[default]
    NeonArena,
    CyberCity,
    RetroArcade,
    OceanDepths,
    FirePit,
}

impl Environment {
    /// Settings key for this theme
    pub fn theme_key(self) -> &'static str {
        match self {
            Environment::NeonArena => "neon",
            Environment::CyberCity => "cyberpunk",
            Environment::RetroArcade => "retro",
            Environment::OceanDepths => "ocean",
            Environment::FirePit => "fire",
        }
    }

    pub fn from_theme_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|env| env.theme_key() == key)
    }

    /// Next theme in cycle order (wraps)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn palette(self) -> Palette {
        match self {
            Environment::NeonArena => Palette {
                bg: (10, 10, 20),
                primary: (0, 255, 255),
                secondary: (255, 0, 255),
                accent: (255, 255, 0),
                grid: (30, 30, 50),
            },
            Environment::CyberCity => Palette {
                bg: (20, 0, 40),
                primary: (255, 20, 147),
                secondary: (0, 255, 128),
                accent: (255, 140, 0),
                grid: (40, 20, 60),
            },
            Environment::RetroArcade => Palette {
                bg: (20, 20, 20),
                primary: (57, 255, 20),
                secondary: (255, 57, 20),
                accent: (255, 255, 20),
                grid: (40, 40, 40),
            },
            Environment::OceanDepths => Palette {
                bg: (0, 20, 40),
                primary: (0, 200, 255),
                secondary: (255, 200, 100),
                accent: (100, 255, 200),
                grid: (0, 40, 60),
            },
            Environment::FirePit => Palette {
                bg: (40, 10, 0),
                primary: (255, 100, 0),
                secondary: (255, 255, 100),
                accent: (255, 50, 0),
                grid: (60, 30, 10),
            },
        }
    }
}

impl Cosmetic for Environment {
    const ALL: &'static [Self] = &[
        Environment::NeonArena,
        Environment::CyberCity,
        Environment::RetroArcade,
        Environment::OceanDepths,
        Environment::FirePit,
    ];

    /// Environments are not sold; only Neon Arena is owned from the start
    fn info(self) -> SkinInfo {
        let name = match self {
            Environment::NeonArena => "Neon Arena",
            Environment::CyberCity => "Cyber City",
            Environment::RetroArcade => "Retro Arcade",
            Environment::OceanDepths => "Ocean Depths",
            Environment::FirePit => "Fire Pit",
        };
        SkinInfo {
            name,
            color: Some(self.palette().primary),
            cost: (self == Environment::NeonArena).then_some(0),
        }
    }
}
