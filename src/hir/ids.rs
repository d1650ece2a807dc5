//! Semantic identifiers for declarations.

use std::fmt;

use crate::base::ModuleId;

/// A globally unique identifier for a declaration.
///
/// Combines the module the declaration lives in with a module-local ID, so
/// tables can be built per module in parallel and still hand out ids that
/// are unique across the workspace.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DefId {
    /// The module containing this declaration
    pub module: ModuleId,
    /// The local ID within the module
    pub local: LocalDefId,
}

impl DefId {
    /// Create a new DefId.
    #[inline]
    pub const fn new(module: ModuleId, local: LocalDefId) -> Self {
        Self { module, local }
    }
}

impl fmt::Debug for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefId({:?}:{})", self.module, self.local.0)
    }
}

/// A module-local declaration identifier.
///
/// Assigned sequentially in declaration order, enum member sub-symbols
/// directly after their enum. Doubles as the index into the module's
/// declaration list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalDefId(pub u32);

impl LocalDefId {
    /// Create a new LocalDefId.
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

impl fmt::Debug for LocalDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDefId({})", self.0)
    }
}

impl From<u32> for LocalDefId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_id_equality() {
        let module1 = ModuleId::new(1);
        let module2 = ModuleId::new(2);

        let a = DefId::new(module1, LocalDefId::new(0));
        let b = DefId::new(module1, LocalDefId::new(0));
        let c = DefId::new(module1, LocalDefId::new(1));
        let d = DefId::new(module2, LocalDefId::new(0));

        assert_eq!(a, b);
        assert_ne!(a, c); // different local
        assert_ne!(a, d); // different module
    }

    #[test]
    fn test_def_id_orders_by_module_first() {
        let a = DefId::new(ModuleId::new(0), LocalDefId::new(9));
        let b = DefId::new(ModuleId::new(1), LocalDefId::new(0));
        assert!(a < b);
    }

    #[test]
    fn test_def_id_size() {
        // DefId should be 8 bytes (ModuleId + LocalDefId)
        assert_eq!(std::mem::size_of::<DefId>(), 8);
    }
}
