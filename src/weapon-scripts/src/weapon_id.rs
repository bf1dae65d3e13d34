//! Weapon identifiers

use std::fmt;

/// Weapon kind known to an engine build.
///
/// `code` is the engine's numeric weapon ID constant, `name` its symbolic
/// tag (e.g. `KNIFE`). Script files refer to weapons by `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeaponId {
    pub code: u16,
    pub name: &'static str,
}

impl WeaponId {
    pub const fn new(code: u16, name: &'static str) -> Self {
        Self { code, name }
    }

    /// True if `name` refers to this identifier, ignoring ASCII case
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
