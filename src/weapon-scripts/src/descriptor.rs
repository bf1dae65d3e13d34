//! Weapon script descriptors
//!
//! Every engine exposes a common set of script fields ([`BaseWeaponInfo`]).
//! Engines with richer scripts (CS:GO) extend it with balance data
//! ([`WeaponInfo`]). [`WeaponDescriptor`] tags which of the two a script
//! file produced.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::Serialize;

/// Fields shared by all engines' weapon scripts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseWeaponInfo {
    pub class_name: String,
    pub print_name: String,
    pub view_model: String,
    pub world_model: String,
    pub animation_prefix: String,
    pub slot: u32,
    pub position: u32,
    pub max_primary_clip: i32,
    pub max_secondary_clip: i32,
    pub default_primary_clip: i32,
    pub default_secondary_clip: i32,
    pub weight: i32,
    pub rumble_effect: i32,
    pub auto_switch_to: bool,
    pub auto_switch_from: bool,
    pub flags: u32,
    pub primary_ammo_type: String,
    pub secondary_ammo_type: String,
}

impl BaseWeaponInfo {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Melee weapons and grenades report `-1` (no clip)
    pub fn uses_clip(&self) -> bool {
        self.max_primary_clip >= 0
    }
}

/// Team a weapon can be bought by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    Any,
    Terrorist,
    CounterTerrorist,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Any => "any",
            Team::Terrorist => "terrorist",
            Team::CounterTerrorist => "counter_terrorist",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "" => Ok(Team::Any),
            "t" | "terrorist" => Ok(Team::Terrorist),
            "ct" | "counter_terrorist" => Ok(Team::CounterTerrorist),
            _ => Err(()),
        }
    }
}

/// Full weapon script: base fields plus engine-specific balance data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaponInfo {
    #[serde(flatten)]
    pub base: BaseWeaponInfo,
    pub cost: u32,
    pub damage: u32,
    pub bullets: u32,
    pub armor_ratio: f32,
    pub penetration: f32,
    pub range: f32,
    pub range_modifier: f32,
    pub cycle_time: f32,
    pub max_player_speed: f32,
    pub kill_award: u32,
    pub team: Team,
}

impl WeaponInfo {
    pub fn new(base: BaseWeaponInfo) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Damage per trigger pull, before range falloff and armor.
    /// Saturates at `u32::MAX`.
    pub fn damage_per_shot(&self) -> u32 {
        self.damage.saturating_mul(self.bullets.max(1))
    }
}

impl Deref for WeaponInfo {
    type Target = BaseWeaponInfo;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

/// Descriptor for one weapon kind, in whichever layout the engine uses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum WeaponDescriptor {
    Base(BaseWeaponInfo),
    Full(WeaponInfo),
}

impl WeaponDescriptor {
    pub fn class_name(&self) -> &str {
        &self.base().class_name
    }

    /// Base fields, available for both variants
    pub fn base(&self) -> &BaseWeaponInfo {
        match self {
            WeaponDescriptor::Base(info) => info,
            WeaponDescriptor::Full(info) => &info.base,
        }
    }

    /// Full fields, if this engine provides them
    pub fn full(&self) -> Option<&WeaponInfo> {
        match self {
            WeaponDescriptor::Base(_) => None,
            WeaponDescriptor::Full(info) => Some(info),
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, WeaponDescriptor::Full(_))
    }
}

impl From<BaseWeaponInfo> for WeaponDescriptor {
    fn from(info: BaseWeaponInfo) -> Self {
        WeaponDescriptor::Base(info)
    }
}

impl From<WeaponInfo> for WeaponDescriptor {
    fn from(info: WeaponInfo) -> Self {
        WeaponDescriptor::Full(info)
    }
}
