//! Weapon script files
//!
//! A script file describes every weapon of one engine build:
//!
//! ```ini
//! [layout]
//! variant = full
//!
//! [weapon.AK47]
//! class_name = weapon_ak47
//! max_primary_clip = 30
//! cost = 2700
//! ```
//!
//! [`resolve_config`] reads and validates the whole file up front, so a
//! file that loads is guaranteed to produce a descriptor for each of its
//! weapon sections. [`bind_descriptor_fetcher`] then hands out descriptors
//! by weapon identifier.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::descriptor::{BaseWeaponInfo, Team, WeaponDescriptor, WeaponInfo};
use crate::ini::{IniDocument, IniError, IniSection};
use crate::weapon_id::WeaponId;

const LAYOUT_SECTION: &str = "layout";
const WEAPON_SECTION_PREFIX: &str = "weapon.";

const BASE_FIELDS: &[&str] = &[
    "class_name",
    "print_name",
    "view_model",
    "world_model",
    "animation_prefix",
    "slot",
    "position",
    "max_primary_clip",
    "max_secondary_clip",
    "default_primary_clip",
    "default_secondary_clip",
    "weight",
    "rumble_effect",
    "auto_switch_to",
    "auto_switch_from",
    "flags",
    "primary_ammo_type",
    "secondary_ammo_type",
];

const FULL_FIELDS: &[&str] = &[
    "cost",
    "damage",
    "bullets",
    "armor_ratio",
    "penetration",
    "range",
    "range_modifier",
    "cycle_time",
    "max_player_speed",
    "kill_award",
    "team",
];

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("weapon script not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("INI syntax error: {0}")]
    Ini(#[from] IniError),

    #[error("missing [layout] section")]
    MissingLayout,

    #[error("unknown layout variant `{0}` (expected `base` or `full`)")]
    UnknownVariant(String),

    #[error("unknown section [{0}]")]
    UnknownSection(String),

    #[error("weapon {0} is defined more than once")]
    DuplicateWeapon(String),

    #[error("[{section}] is missing required field `{key}`")]
    MissingField { section: String, key: String },

    #[error("[{section}] field `{key}` has invalid value `{value}`")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },

    #[error("[{section}] has unknown field `{key}`")]
    UnknownField { section: String, key: String },

    #[error("unknown engine `{0}`")]
    UnknownEngine(String),

    #[error("settings error: {0}")]
    Settings(String),
}

/// Which descriptor variant a script file produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Base,
    Full,
}

impl FromStr for Layout {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Layout::Base),
            "full" => Ok(Layout::Full),
            _ => Err(ScriptError::UnknownVariant(s.to_string())),
        }
    }
}

/// A loaded and validated weapon script file
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    path: Option<PathBuf>,
    layout: Layout,
    /// Upper-cased weapon ID name -> descriptor
    descriptors: HashMap<String, WeaponDescriptor>,
}

impl ScriptConfig {
    /// Parse script text that did not come from a file
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let doc = IniDocument::parse(text)?;

        let layout: Layout = doc
            .section(LAYOUT_SECTION)
            .ok_or(ScriptError::MissingLayout)?
            .get("variant")
            .ok_or_else(|| ScriptError::MissingField {
                section: LAYOUT_SECTION.to_string(),
                key: "variant".to_string(),
            })?
            .parse()?;

        let mut descriptors = HashMap::new();
        for section in doc.sections() {
            if section.name().eq_ignore_ascii_case(LAYOUT_SECTION) {
                continue;
            }
            let Some(weapon) = weapon_section_name(section.name()) else {
                return Err(ScriptError::UnknownSection(section.name().to_string()));
            };
            let descriptor = build_descriptor(section, layout)?;
            if descriptors.insert(weapon.clone(), descriptor).is_some() {
                return Err(ScriptError::DuplicateWeapon(weapon));
            }
        }

        Ok(Self {
            path: None,
            layout,
            descriptors,
        })
    }

    /// File this config was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of weapon sections in the file
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Weapon ID names defined by the file, sorted
    pub fn weapon_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Descriptor for a weapon ID name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&WeaponDescriptor> {
        self.descriptors.get(&name.to_ascii_uppercase())
    }
}

/// Load and validate a weapon script file
pub fn resolve_config(path: &Path) -> Result<ScriptConfig, ScriptError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ScriptError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ScriptError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut config = ScriptConfig::parse(&text)?;
    config.path = Some(path.to_path_buf());
    debug!(
        "Loaded {} weapon scripts ({:?} layout) from {}",
        config.len(),
        config.layout,
        path.display()
    );
    Ok(config)
}

/// Source of weapon descriptors, keyed by weapon identifier
///
/// `None` means the engine build has no script for that weapon.
pub trait DescriptorFetcher {
    fn fetch(&self, id: WeaponId) -> Option<WeaponDescriptor>;
}

impl<F> DescriptorFetcher for F
where
    F: Fn(WeaponId) -> Option<WeaponDescriptor>,
{
    fn fetch(&self, id: WeaponId) -> Option<WeaponDescriptor> {
        self(id)
    }
}

/// Fetcher bound to a loaded script file
#[derive(Debug, Clone, Copy)]
pub struct ConfigFetcher<'a> {
    config: &'a ScriptConfig,
}

impl DescriptorFetcher for ConfigFetcher<'_> {
    fn fetch(&self, id: WeaponId) -> Option<WeaponDescriptor> {
        self.config.get(id.name).cloned()
    }
}

pub fn bind_descriptor_fetcher(config: &ScriptConfig) -> ConfigFetcher<'_> {
    ConfigFetcher { config }
}

// ============================================================================
// Descriptor factory
// ============================================================================

fn weapon_section_name(section: &str) -> Option<String> {
    let prefix = section.get(..WEAPON_SECTION_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(WEAPON_SECTION_PREFIX) {
        return None;
    }
    let name = section[WEAPON_SECTION_PREFIX.len()..].trim();
    (!name.is_empty()).then(|| name.to_ascii_uppercase())
}

fn build_descriptor(section: &IniSection, layout: Layout) -> Result<WeaponDescriptor, ScriptError> {
    let fields = Fields { section };

    for (key, _) in section.entries() {
        let known = BASE_FIELDS.contains(&key)
            || (layout == Layout::Full && FULL_FIELDS.contains(&key));
        if !known {
            return Err(fields.unknown(key));
        }
    }

    let base = BaseWeaponInfo {
        class_name: fields.required("class_name")?,
        print_name: fields.string("print_name"),
        view_model: fields.string("view_model"),
        world_model: fields.string("world_model"),
        animation_prefix: fields.string("animation_prefix"),
        slot: fields.number("slot")?,
        position: fields.number("position")?,
        max_primary_clip: fields.number("max_primary_clip")?,
        max_secondary_clip: fields.number("max_secondary_clip")?,
        default_primary_clip: fields.number("default_primary_clip")?,
        default_secondary_clip: fields.number("default_secondary_clip")?,
        weight: fields.number("weight")?,
        rumble_effect: fields.number("rumble_effect")?,
        auto_switch_to: fields.flag("auto_switch_to")?,
        auto_switch_from: fields.flag("auto_switch_from")?,
        flags: fields.number("flags")?,
        primary_ammo_type: fields.string("primary_ammo_type"),
        secondary_ammo_type: fields.string("secondary_ammo_type"),
    };

    if layout == Layout::Base {
        return Ok(WeaponDescriptor::Base(base));
    }

    Ok(WeaponDescriptor::Full(WeaponInfo {
        base,
        cost: fields.number("cost")?,
        damage: fields.number("damage")?,
        bullets: fields.number("bullets")?,
        armor_ratio: fields.number("armor_ratio")?,
        penetration: fields.number("penetration")?,
        range: fields.number("range")?,
        range_modifier: fields.number("range_modifier")?,
        cycle_time: fields.number("cycle_time")?,
        max_player_speed: fields.number("max_player_speed")?,
        kill_award: fields.number("kill_award")?,
        team: fields.team("team")?,
    }))
}

/// Typed access to one weapon section's raw values
struct Fields<'a> {
    section: &'a IniSection,
}

impl Fields<'_> {
    fn required(&self, key: &str) -> Result<String, ScriptError> {
        match self.section.get(key) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(ScriptError::MissingField {
                section: self.section.name().to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn string(&self, key: &str) -> String {
        self.section.get(key).unwrap_or_default().to_string()
    }

    fn number<T>(&self, key: &str) -> Result<T, ScriptError>
    where
        T: FromStr + Default,
    {
        match self.section.get(key) {
            None => Ok(T::default()),
            Some(value) => value.parse().map_err(|_| self.invalid(key, value)),
        }
    }

    fn flag(&self, key: &str) -> Result<bool, ScriptError> {
        match self.section.get(key).map(str::to_ascii_lowercase).as_deref() {
            None | Some("0" | "false" | "no") => Ok(false),
            Some("1" | "true" | "yes") => Ok(true),
            Some(_) => Err(self.invalid(key, self.section.get(key).unwrap_or_default())),
        }
    }

    fn team(&self, key: &str) -> Result<Team, ScriptError> {
        let value = self.section.get(key).unwrap_or_default();
        value.parse().map_err(|()| self.invalid(key, value))
    }

    fn invalid(&self, key: &str, value: &str) -> ScriptError {
        ScriptError::InvalidValue {
            section: self.section.name().to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn unknown(&self, key: &str) -> ScriptError {
        ScriptError::UnknownField {
            section: self.section.name().to_string(),
            key: key.to_string(),
        }
    }
}
