//! Identifiers used inside generated build files.
//!
//! All ids are pure functions of vendor/name (or vendor/component/part),
//! so independently rendered files agree on them without a registry.

use crate::core::component::ComponentId;
use crate::core::reference::PublicPartKey;

/// Separator between id segments and replacement for `/` in names.
pub const SEPARATOR: char = '~';

/// Prefix of every per-component target.
pub const TARGET_PREFIX: &str = "checkstyle-";

/// Default target of the dispatcher and of the aggregate build file.
pub const ALL_TARGET: &str = "checkstyle-all";

/// Replace path separators in a component name with [`SEPARATOR`].
pub fn sanitize(name: &str) -> String {
    name.replace(['/', '\\'], &SEPARATOR.to_string())
}

/// `vendor~name` with the name sanitized.
pub fn component_id(id: &ComponentId) -> String {
    format!("{}{}{}", id.vendor, SEPARATOR, sanitize(&id.name))
}

/// Default target name of a component's build file: `checkstyle-vendor~name`.
pub fn target_name(id: &ComponentId) -> String {
    format!("{}{}", TARGET_PREFIX, component_id(id))
}

/// Classpath entry id of a public part: `vendor~component~part`.
///
/// The component name is kept as declared: sanitizing it would give
/// `tc/bl` and `tc~bl` the same id.
pub fn part_id(key: &PublicPartKey) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        key.vendor,
        key.component,
        key.part,
        sep = SEPARATOR
    )
}
