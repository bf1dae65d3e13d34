//! # weapon-scripts
//!
//! Per-engine weapon script data for game-server plugins.
//!
//! This library provides functionality to:
//! - Parse engine-specific weapon script files (`weapons/scripts/<engine>.ini`)
//! - Build typed descriptors (base or full layout) for every scripted weapon
//! - Look weapons up by class name or by engine weapon ID
//!
//! ## Example
//!
//! ```no_run
//! use weapon_scripts::{build_registry, Settings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::new("/srv/game/data", "csgo");
//! let registry = build_registry(&settings)?;
//!
//! if let Some(ak) = registry.get("weapon_ak47").and_then(|w| w.full()) {
//!     println!("{} costs {}", ak.class_name, ak.cost);
//! }
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod engine;
pub mod ini;
pub mod registry;
pub mod script;
pub mod settings;
pub mod weapon_id;

// Re-export commonly used items
#[doc(inline)]
pub use descriptor::{BaseWeaponInfo, Team, WeaponDescriptor, WeaponInfo};
#[doc(inline)]
pub use engine::Engine;
#[doc(inline)]
pub use ini::{IniDocument, IniError};
#[doc(inline)]
pub use registry::{build_registry, WeaponScriptRegistry};
#[doc(inline)]
pub use script::{
    bind_descriptor_fetcher, resolve_config, DescriptorFetcher, Layout, ScriptConfig, ScriptError,
};
#[doc(inline)]
pub use settings::Settings;
#[doc(inline)]
pub use weapon_id::WeaponId;
