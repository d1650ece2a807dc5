//! Analysis configuration.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Globals provided by the runtime. They resolve without a declaration and
/// are never kind-checked.
const DEFAULT_BUILTINS: &[&str] = &[
    "console", "Math", "JSON", "Object", "Array", "String", "Number", "Boolean", "Symbol",
    "Promise", "Error", "TypeError", "RangeError", "Date", "RegExp", "Map", "Set", "WeakMap",
    "WeakSet", "Record", "Partial", "Readonly", "ReadonlyArray", "parseInt", "parseFloat",
    "isNaN", "setTimeout", "clearTimeout", "globalThis", "undefined", "NaN", "Infinity",
];

/// Extensions tried, in order, when a specifier has none.
const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", ".js", ".jsx", ".mjs"];

/// Knobs for one analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Names that resolve to an external builtin.
    pub builtins: FxHashSet<SmolStr>,
    /// Extensions appended when resolving extensionless module specifiers.
    pub extensions: Vec<SmolStr>,
    /// Run per-module phases on the rayon pool.
    pub parallel: bool,
    /// Treat `if`/`else`, blocks and `try` whose every path terminates as
    /// terminators themselves.
    pub exhaustive_branches: bool,
    /// Check argument counts of calls and instantiations.
    pub check_arity: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            builtins: DEFAULT_BUILTINS.iter().map(|&b| SmolStr::new(b)).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| SmolStr::new(e)).collect(),
            parallel: true,
            exhaustive_branches: true,
            check_arity: true,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a builtin global.
    pub fn with_builtin(mut self, name: impl Into<SmolStr>) -> Self {
        self.builtins.insert(name.into());
        self
    }

    /// Drop every builtin, including the defaults.
    pub fn without_builtins(mut self) -> Self {
        self.builtins.clear();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Run all phases on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_exhaustive_branches(mut self, enabled: bool) -> Self {
        self.exhaustive_branches = enabled;
        self
    }

    pub fn with_arity_checks(mut self, enabled: bool) -> Self {
        self.check_arity = enabled;
        self
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert!(config.is_builtin("console"));
        assert!(!config.is_builtin("SharedFunction"));
        assert!(config.parallel);
        assert!(config.exhaustive_branches);
        assert!(config.check_arity);
        assert_eq!(config.extensions.first().map(|e| e.as_str()), Some(".ts"));
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::new()
            .without_builtins()
            .with_builtin("window")
            .with_extensions([".py"])
            .sequential()
            .with_exhaustive_branches(false)
            .with_arity_checks(false);

        assert!(config.is_builtin("window"));
        assert!(!config.is_builtin("console"));
        assert_eq!(config.extensions, vec![SmolStr::new(".py")]);
        assert!(!config.parallel);
        assert!(!config.exhaustive_branches);
        assert!(!config.check_arity);
    }
}
