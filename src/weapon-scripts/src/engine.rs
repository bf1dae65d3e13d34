//! Engine families and their weapon ID tables
//!
//! Each engine build ships its own set of weapon ID constants. The tables
//! below are declared in the engine's own order; that order is the order
//! the registry visits identifiers in.

use std::fmt;
use std::str::FromStr;

use crate::script::ScriptError;
use crate::weapon_id::WeaponId;

/// Engine build the host process is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// Counter-Strike: Global Offensive
    Csgo,
    /// Orange Box (Counter-Strike: Source)
    OrangeBox,
}

impl Engine {
    pub const ALL: &'static [Engine] = &[Engine::Csgo, Engine::OrangeBox];

    /// Engine identifier as used in script file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Csgo => "csgo",
            Engine::OrangeBox => "orangebox",
        }
    }

    /// All weapon identifiers known to this engine, in declared order
    pub fn weapon_ids(&self) -> &'static [WeaponId] {
        match self {
            Engine::Csgo => CSGO_WEAPON_IDS,
            Engine::OrangeBox => ORANGEBOX_WEAPON_IDS,
        }
    }

    /// Get weapon identifier by symbolic name (case-insensitive)
    pub fn weapon_id_by_name(&self, name: &str) -> Option<WeaponId> {
        self.weapon_ids()
            .iter()
            .find(|id| id.matches_name(name))
            .copied()
    }

    /// Get weapon identifier by numeric code
    pub fn weapon_id_by_code(&self, code: u16) -> Option<WeaponId> {
        self.weapon_ids().iter().find(|id| id.code == code).copied()
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ScriptError::UnknownEngine(s.to_string()))
    }
}

// ============================================================================
// Weapon ID tables
// ============================================================================

pub const CSGO_WEAPON_IDS: &[WeaponId] = &[
    WeaponId::new(1, "DEAGLE"),
    WeaponId::new(2, "ELITE"),
    WeaponId::new(3, "FIVESEVEN"),
    WeaponId::new(4, "GLOCK"),
    WeaponId::new(7, "AK47"),
    WeaponId::new(8, "AUG"),
    WeaponId::new(9, "AWP"),
    WeaponId::new(10, "FAMAS"),
    WeaponId::new(11, "G3SG1"),
    WeaponId::new(13, "GALILAR"),
    WeaponId::new(14, "M249"),
    WeaponId::new(16, "M4A1"),
    WeaponId::new(17, "MAC10"),
    WeaponId::new(19, "P90"),
    WeaponId::new(24, "UMP45"),
    WeaponId::new(25, "XM1014"),
    WeaponId::new(26, "BIZON"),
    WeaponId::new(27, "MAG7"),
    WeaponId::new(28, "NEGEV"),
    WeaponId::new(29, "SAWEDOFF"),
    WeaponId::new(30, "TEC9"),
    WeaponId::new(31, "TASER"),
    WeaponId::new(32, "HKP2000"),
    WeaponId::new(33, "MP7"),
    WeaponId::new(34, "MP9"),
    WeaponId::new(35, "NOVA"),
    WeaponId::new(36, "P250"),
    WeaponId::new(38, "SCAR20"),
    WeaponId::new(39, "SG556"),
    WeaponId::new(40, "SSG08"),
    WeaponId::new(41, "KNIFE_GG"),
    WeaponId::new(42, "KNIFE"),
    WeaponId::new(43, "FLASHBANG"),
    WeaponId::new(44, "HEGRENADE"),
    WeaponId::new(45, "SMOKEGRENADE"),
    WeaponId::new(46, "MOLOTOV"),
    WeaponId::new(47, "DECOY"),
    WeaponId::new(48, "INCGRENADE"),
    WeaponId::new(49, "C4"),
];

pub const ORANGEBOX_WEAPON_IDS: &[WeaponId] = &[
    WeaponId::new(1, "P228"),
    WeaponId::new(2, "GLOCK"),
    WeaponId::new(3, "SCOUT"),
    WeaponId::new(4, "HEGRENADE"),
    WeaponId::new(5, "XM1014"),
    WeaponId::new(6, "C4"),
    WeaponId::new(7, "MAC10"),
    WeaponId::new(8, "AUG"),
    WeaponId::new(9, "SMOKEGRENADE"),
    WeaponId::new(10, "ELITE"),
    WeaponId::new(11, "FIVESEVEN"),
    WeaponId::new(12, "UMP45"),
    WeaponId::new(13, "SG550"),
    WeaponId::new(14, "GALIL"),
    WeaponId::new(15, "FAMAS"),
    WeaponId::new(16, "USP"),
    WeaponId::new(17, "AWP"),
    WeaponId::new(18, "MP5NAVY"),
    WeaponId::new(19, "M249"),
    WeaponId::new(20, "M3"),
    WeaponId::new(21, "M4A1"),
    WeaponId::new(22, "TMP"),
    WeaponId::new(23, "G3SG1"),
    WeaponId::new(24, "FLASHBANG"),
    WeaponId::new(25, "DEAGLE"),
    WeaponId::new(26, "SG552"),
    WeaponId::new(27, "AK47"),
    WeaponId::new(28, "KNIFE"),
    WeaponId::new(29, "P90"),
];
