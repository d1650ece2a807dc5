//! Module identifiers for tracking parsed source units.

use std::fmt;

/// An interned identifier for a module in the workspace.
///
/// `ModuleId` is a lightweight handle (just a u32). The module's path lives
/// in the [`ModuleSet`](crate::hir::ModuleSet) that assigned it.
///
/// Ordering follows assignment order, which is also the order modules are
/// reported in.
///
/// ```
/// use xref::hir::ModuleSet;
/// use xref::syntax::SourceModule;
///
/// let set = ModuleSet::new();
/// let helper = set.insert(SourceModule::new("helper.ts"));
/// let main = set.insert(SourceModule::new("main.ts"));
/// assert!(helper < main);
/// assert_eq!(set.path(main).as_deref(), Some("main.ts"));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ModuleId(pub u32);

impl ModuleId {
    /// Create a new ModuleId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

impl From<u32> for ModuleId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ModuleId> for u32 {
    #[inline]
    fn from(id: ModuleId) -> Self {
        id.0
    }
}
