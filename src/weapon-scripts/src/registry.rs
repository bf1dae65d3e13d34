//! Weapon script registry
//!
//! Built once at startup from the running engine's script file, then only
//! read. Lookups work by class name (`weapon_ak47`) or by weapon ID.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::descriptor::WeaponDescriptor;
use crate::engine::Engine;
use crate::script::{bind_descriptor_fetcher, resolve_config, DescriptorFetcher, ScriptError};
use crate::settings::Settings;
use crate::weapon_id::WeaponId;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: WeaponId,
    descriptor: WeaponDescriptor,
}

/// Class-name-indexed table of weapon descriptors
#[derive(Debug, Clone, Default)]
pub struct WeaponScriptRegistry {
    engine: Option<Engine>,
    source: Option<PathBuf>,
    by_class: HashMap<String, Entry>,
    by_id: HashMap<WeaponId, String>,
}

/// Build the registry for the engine named in `settings`
pub fn build_registry(settings: &Settings) -> Result<WeaponScriptRegistry, ScriptError> {
    WeaponScriptRegistry::build(settings)
}

impl WeaponScriptRegistry {
    /// Load `<data_root>/weapons/scripts/<engine>.ini` and index every
    /// weapon of the engine that has a script entry.
    ///
    /// Fails without a partial table if the engine is unknown or the file
    /// is missing or malformed.
    pub fn build(settings: &Settings) -> Result<Self, ScriptError> {
        let engine = settings.engine()?;
        let path = settings.script_path()?;
        let config = resolve_config(&path)?;

        let fetcher = bind_descriptor_fetcher(&config);
        let mut registry = Self::from_fetcher(engine.weapon_ids().iter().copied(), &fetcher);
        info!(
            "Indexed {} weapon scripts for {} from {}",
            registry.len(),
            engine,
            path.display()
        );

        registry.engine = Some(engine);
        registry.source = Some(path);
        Ok(registry)
    }

    /// Index descriptors for `ids`, visited in order.
    ///
    /// Identifiers the fetcher reports absent are skipped. When two
    /// identifiers share a class name the later one wins, and the earlier
    /// identifier is dropped from the ID index.
    pub fn from_fetcher<F>(ids: impl IntoIterator<Item = WeaponId>, fetcher: &F) -> Self
    where
        F: DescriptorFetcher + ?Sized,
    {
        let mut registry = Self::default();

        for id in ids {
            let Some(descriptor) = fetcher.fetch(id) else {
                debug!("No weapon script for {id}");
                continue;
            };

            let class_name = descriptor.class_name().to_string();
            let previous = registry
                .by_class
                .insert(class_name.clone(), Entry { id, descriptor });

            if let Some(previous) = previous {
                debug!("{id} overrides {} for {class_name}", previous.id);
                if previous.id != id {
                    registry.by_id.remove(&previous.id);
                }
            }
            registry.by_id.insert(id, class_name);
        }

        registry
    }

    /// Engine this registry was built for, if built from settings
    pub fn engine(&self) -> Option<Engine> {
        self.engine
    }

    /// Script file this registry was built from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn get(&self, class_name: &str) -> Option<&WeaponDescriptor> {
        self.by_class.get(class_name).map(|e| &e.descriptor)
    }

    pub fn get_by_id(&self, id: WeaponId) -> Option<&WeaponDescriptor> {
        self.by_id.get(&id).and_then(|class_name| self.get(class_name))
    }

    /// Weapon ID whose descriptor is stored under `class_name`
    pub fn id_of(&self, class_name: &str) -> Option<WeaponId> {
        self.by_class.get(class_name).map(|e| e.id)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.by_class.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }

    /// Class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_class.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All entries, sorted by class name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WeaponDescriptor)> {
        let mut entries: Vec<(&str, &WeaponDescriptor)> = self
            .by_class
            .iter()
            .map(|(k, e)| (k.as_str(), &e.descriptor))
            .collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BaseWeaponInfo, WeaponInfo};
    use crate::script::ScriptConfig;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    const KNIFE: WeaponId = WeaponId::new(1, "KNIFE");
    const PISTOL: WeaponId = WeaponId::new(2, "PISTOL");
    const RIFLE: WeaponId = WeaponId::new(3, "RIFLE");

    const CSGO_INI: &str = include_str!("../../../share/data/weapons/scripts/csgo.ini");
    const ORANGEBOX_INI: &str = include_str!("../../../share/data/weapons/scripts/orangebox.ini");

    fn full(class_name: &str, cost: u32) -> WeaponDescriptor {
        WeaponInfo {
            cost,
            ..WeaponInfo::new(BaseWeaponInfo::new(class_name))
        }
        .into()
    }

    fn write_script(root: &Path, engine: &str, text: &str) {
        let dir = root.join("weapons").join("scripts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{engine}.ini")), text).unwrap();
    }

    #[test]
    fn test_absent_ids_are_skipped() {
        let fetch = |id: WeaponId| -> Option<WeaponDescriptor> {
            match id.name {
                "KNIFE" => Some(BaseWeaponInfo::new("weapon_knife").into()),
                "RIFLE" => Some(BaseWeaponInfo::new("weapon_rifle").into()),
                _ => None,
            }
        };

        let registry = WeaponScriptRegistry::from_fetcher([KNIFE, PISTOL, RIFLE], &fetch);

        assert_eq!(registry.class_names(), vec!["weapon_knife", "weapon_rifle"]);
        assert!(registry.get_by_id(PISTOL).is_none());
        assert_eq!(registry.get_by_id(RIFLE).unwrap().class_name(), "weapon_rifle");
        assert_eq!(registry.id_of("weapon_knife"), Some(KNIFE));
        assert!(registry.engine().is_none());
    }

    #[test]
    fn test_keys_match_class_names() {
        let fetch = |id: WeaponId| Some(full(&format!("weapon_{}", id.name.to_lowercase()), 0));
        let registry = WeaponScriptRegistry::from_fetcher([KNIFE, PISTOL, RIFLE], &fetch);

        assert_eq!(registry.len(), 3);
        for (key, descriptor) in registry.iter() {
            assert_eq!(key, descriptor.class_name());
        }
    }

    #[test]
    fn test_duplicate_class_name_last_write_wins() {
        let fetch = |id: WeaponId| match id.name {
            "KNIFE" => Some(full("weapon_dup", 100)),
            "RIFLE" => Some(full("weapon_dup", 300)),
            _ => None,
        };

        let registry = WeaponScriptRegistry::from_fetcher([KNIFE, PISTOL, RIFLE], &fetch);

        assert_eq!(registry.len(), 1);
        let dup = registry.get("weapon_dup").unwrap().full().unwrap();
        assert_eq!(dup.cost, 300);
        assert_eq!(registry.id_of("weapon_dup"), Some(RIFLE));
        assert!(registry.get_by_id(KNIFE).is_none());
        assert_eq!(registry.get_by_id(RIFLE).unwrap().full().unwrap().cost, 300);
    }

    #[test]
    fn test_size_bounded_by_distinct_class_names() {
        let ids: Vec<WeaponId> = (0..10).map(|code| WeaponId::new(code, "ANY")).collect();
        let fetch = |id: WeaponId| {
            (id.code % 3 != 0).then(|| full(&format!("weapon_{}", id.code % 4), 0))
        };

        let registry = WeaponScriptRegistry::from_fetcher(ids.iter().copied(), &fetch);

        let expected: HashSet<String> = ids
            .iter()
            .filter_map(|id| fetch(*id))
            .map(|d| d.class_name().to_string())
            .collect();
        assert!(registry.len() <= ids.len());
        assert_eq!(registry.len(), expected.len());
    }

    #[test]
    fn test_empty_enumeration() {
        let fetch = |_: WeaponId| -> Option<WeaponDescriptor> { None };
        let registry = WeaponScriptRegistry::from_fetcher(Vec::<WeaponId>::new(), &fetch);
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn test_build_from_settings() {
        let dir = tempdir().unwrap();
        write_script(
            dir.path(),
            "csgo",
            "[layout]\nvariant = full\n\
             [weapon.KNIFE]\nclass_name = weapon_knife\n\
             [weapon.AWP]\nclass_name = weapon_awp\ncost = 4750\n\
             [weapon.NOT_A_CSGO_WEAPON]\nclass_name = weapon_ghost\n",
        );

        let settings = Settings::new(dir.path(), "csgo");
        let registry = build_registry(&settings).unwrap();

        assert_eq!(registry.engine(), Some(Engine::Csgo));
        assert_eq!(registry.source(), Some(settings.script_path().unwrap().as_path()));
        assert_eq!(registry.class_names(), vec!["weapon_awp", "weapon_knife"]);
        assert!(!registry.contains("weapon_ghost"));

        let awp = Engine::Csgo.weapon_id_by_name("AWP").unwrap();
        assert_eq!(registry.get_by_id(awp).unwrap().full().unwrap().cost, 4750);
    }

    #[test]
    fn test_build_with_mixed_case_engine() {
        let dir = tempdir().unwrap();
        write_script(dir.path(), "csgo", CSGO_INI);

        let registry = build_registry(&Settings::new(dir.path(), "CsGo")).unwrap();
        assert_eq!(registry.engine(), Some(Engine::Csgo));
        assert!(registry.contains("weapon_ak47"));
        assert!(registry.source().unwrap().ends_with("weapons/scripts/csgo.ini"));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let dir = tempdir().unwrap();
        write_script(dir.path(), "orangebox", ORANGEBOX_INI);
        let settings = Settings::new(dir.path(), "orangebox");

        let first = build_registry(&settings).unwrap();
        let second = build_registry(&settings).unwrap();

        assert_eq!(first.class_names(), second.class_names());
        for (key, descriptor) in first.iter() {
            assert_eq!(second.get(key), Some(descriptor));
        }
    }

    #[test]
    fn test_missing_script_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::new(dir.path(), "csgo");

        let err = build_registry(&settings).unwrap_err();
        assert!(matches!(err, ScriptError::NotFound { ref path } if *path == settings.script_path().unwrap()));
    }

    #[test]
    fn test_malformed_script_file() {
        let dir = tempdir().unwrap();
        write_script(dir.path(), "csgo", "[layout]\nvariant = full\n[weapon.AWP]\ncost = 1\n");

        let err = build_registry(&Settings::new(dir.path(), "csgo")).unwrap_err();
        assert!(matches!(err, ScriptError::MissingField { .. }));
    }

    #[test]
    fn test_unknown_engine() {
        let dir = tempdir().unwrap();
        write_script(dir.path(), "tf", "[layout]\nvariant = base\n");

        let err = build_registry(&Settings::new(dir.path(), "tf")).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownEngine(_)));
    }

    #[test]
    fn test_shipped_scripts_match_engines() {
        for (engine, text) in [(Engine::Csgo, CSGO_INI), (Engine::OrangeBox, ORANGEBOX_INI)] {
            let config = ScriptConfig::parse(text).unwrap();
            assert!(!config.is_empty());
            for name in config.weapon_names() {
                assert!(
                    engine.weapon_id_by_name(name).is_some(),
                    "{name} is not a {engine} weapon"
                );
            }

            let registry = WeaponScriptRegistry::from_fetcher(
                engine.weapon_ids().iter().copied(),
                &bind_descriptor_fetcher(&config),
            );
            assert_eq!(registry.len(), config.len());
        }
    }

    #[test]
    fn test_shipped_csgo_values() {
        let config = ScriptConfig::parse(CSGO_INI).unwrap();
        let registry = WeaponScriptRegistry::from_fetcher(
            Engine::Csgo.weapon_ids().iter().copied(),
            &bind_descriptor_fetcher(&config),
        );

        let ak = registry.get("weapon_ak47").unwrap().full().unwrap();
        assert_eq!(ak.cost, 2700);
        assert_eq!(ak.max_primary_clip, 30);
        assert!(!registry.get("weapon_knife").unwrap().base().uses_clip());
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WeaponScriptRegistry>();
    }
}
