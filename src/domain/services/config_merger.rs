//! Configuration merger
//!
//! Deep-merges an override tree onto a base tree:
//! - both values are mappings: recurse
//! - otherwise: the override replaces the base value in full (lists are
//!   replaced, never concatenated)
//! - a shape change (mapping/list/scalar) is an error, except that a `null`
//!   base value accepts anything

use crate::domain::entities::{join_path, ConfigValue, ConfigurationTree};
use crate::error::ConfigurationError;

/// Observed change while merging, used for provenance tracking.
#[derive(Debug)]
pub enum MergeEvent<'a> {
    /// Key absent from the base. `siblings` is the base mapping at that level.
    Added {
        path: &'a str,
        value: &'a ConfigValue,
        siblings: &'a ConfigurationTree,
    },
    /// Base value replaced by the override value.
    Replaced {
        path: &'a str,
        previous: &'a ConfigValue,
        value: &'a ConfigValue,
    },
}

/// Merge `overlay` onto `base`, returning a new tree.
pub fn merge(
    base: &ConfigurationTree,
    overlay: &ConfigurationTree,
) -> Result<ConfigurationTree, ConfigurationError> {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay, "", &mut |_| {})?;
    Ok(merged)
}

/// Merge each overlay in order (last writer wins).
pub fn merge_all<'a, I>(base: &ConfigurationTree, overlays: I) -> Result<ConfigurationTree, ConfigurationError>
where
    I: IntoIterator<Item = &'a ConfigurationTree>,
{
    let mut merged = base.clone();
    for overlay in overlays {
        merge_into(&mut merged, overlay, "", &mut |_| {})?;
    }
    Ok(merged)
}

/// Merge in place, reporting every addition and replacement to `observer`.
///
/// On error `target` may be partially merged; callers that need atomicity
/// merge into a clone.
pub fn merge_into(
    target: &mut ConfigurationTree,
    overlay: &ConfigurationTree,
    prefix: &str,
    observer: &mut dyn FnMut(MergeEvent<'_>),
) -> Result<(), ConfigurationError> {
    for (key, value) in overlay {
        let path = join_path(prefix, key);

        if !target.contains_key(key) {
            observer(MergeEvent::Added {
                path: &path,
                value,
                siblings: &*target,
            });
            target.insert(key.clone(), value.clone());
            continue;
        }

        let Some(existing) = target.get_key_mut(key) else {
            continue;
        };

        match (&mut *existing, value) {
            (ConfigValue::Mapping(base_tree), ConfigValue::Mapping(over_tree)) => {
                merge_into(base_tree, over_tree, &path, observer)?;
            }
            (current, incoming) if current.is_null() || current.shape() == incoming.shape() => {
                observer(MergeEvent::Replaced {
                    path: &path,
                    previous: &*current,
                    value: incoming,
                });
                *current = incoming.clone();
            }
            (current, incoming) => {
                return Err(ConfigurationError::TypeMismatch {
                    path,
                    expected: current.shape(),
                    found: incoming.shape(),
                });
            }
        }
    }
    Ok(())
}
