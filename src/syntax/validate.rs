//! Input preconditions.
//!
//! Analysis itself never fails; a module that breaks these rules is
//! rejected before it reaches the engine.

use smol_str::SmolStr;
use thiserror::Error;

use super::ast::{ImportSpecifier, ItemKind, SourceModule};
use crate::base::Span;

/// Malformed input from the parsing layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("module path is empty")]
    EmptyModulePath,

    #[error("{module}: empty identifier at {span}")]
    EmptyIdentifier { module: SmolStr, span: Span },

    #[error("{module}: declared name '{name}' at {span} contains '.', which is reserved for enum members")]
    ReservedSeparator {
        module: SmolStr,
        name: SmolStr,
        span: Span,
    },
}

/// Check that a module satisfies the engine's input preconditions.
pub fn validate_module(module: &SourceModule) -> Result<(), InputError> {
    if module.path.trim().is_empty() {
        return Err(InputError::EmptyModulePath);
    }

    for item in &module.items {
        check_declared_name(module, &item.name, item.span)?;
        if let ItemKind::Enum(members) = &item.kind {
            for member in members {
                check_declared_name(module, &member.name, member.span)?;
            }
        }
    }

    for import in &module.imports {
        for spec in &import.specifiers {
            check_declared_name(module, spec.local(), spec.span())?;
            if let ImportSpecifier::Named { imported, span, .. } = spec {
                check_non_empty(module, imported, *span)?;
            }
        }
    }

    Ok(())
}

fn check_non_empty(module: &SourceModule, name: &str, span: Span) -> Result<(), InputError> {
    if name.is_empty() {
        return Err(InputError::EmptyIdentifier {
            module: module.path.clone(),
            span,
        });
    }
    Ok(())
}

fn check_declared_name(module: &SourceModule, name: &SmolStr, span: Span) -> Result<(), InputError> {
    check_non_empty(module, name, span)?;
    if name.contains('.') {
        return Err(InputError::ReservedSeparator {
            module: module.path.clone(),
            name: name.clone(),
            span,
        });
    }
    Ok(())
}
