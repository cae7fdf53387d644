//! The process-wide prefix registry mapping a single letter to a
//! [`BaseSystem`].

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use super::{BaseSystem, SharedBase};

fn registry() -> &'static RwLock<HashMap<char, SharedBase>> {
    static REGISTRY: OnceLock<RwLock<HashMap<char, SharedBase>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert('x', Arc::new(BaseSystem::hex()));
        map.insert('b', Arc::new(BaseSystem::binary()));
        map.insert('o', Arc::new(BaseSystem::octal()));
        map.insert('t', Arc::new(BaseSystem::ternary()));
        RwLock::new(map)
    })
}

/// Letters that can never be registered: `e`/`E` are reserved for
/// scientific notation, and `d`/`D` are the sentinel meaning "use the
/// current input base" rather than a real registry entry.
fn is_reserved_letter(letter: char) -> bool {
    matches!(letter.to_ascii_lowercase(), 'e' | 'd')
}

/// An error registering a prefix letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum RegisterError {
    /// The letter is reserved (`e`/`E` for scientific notation, `d`/`D` for
    /// "use the current input base").
    #[display("prefix letter {_0:?} is reserved and cannot be registered")]
    ReservedLetter(char),
}

/// Registers `letter` as a prefix for `base` in the process-wide registry,
/// overwriting any existing registration for that letter.
///
/// Fails if `letter` is `e`/`E` or `d`/`D`, which are reserved.
///
/// # Concurrency
///
/// This takes a write lock; readers (parses in progress) are unaffected
/// because each parse takes its own [`Arc`] snapshot of a base system the
/// moment it looks one up, per the copy-on-write discipline described in
/// the crate's concurrency notes.
pub fn register_prefix(letter: char, base: BaseSystem) -> Result<(), RegisterError> {
    if is_reserved_letter(letter) {
        return Err(RegisterError::ReservedLetter(letter));
    }
    registry()
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(letter, Arc::new(base));
    Ok(())
}

/// Removes `letter`'s registration, if any. Returns whether a registration
/// was removed.
pub fn unregister_prefix(letter: char) -> bool {
    registry()
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .remove(&letter)
        .is_some()
}

/// Looks up the base system registered for `letter`, if any.
pub fn lookup_prefix(letter: char) -> Option<SharedBase> {
    registry()
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&letter)
        .cloned()
}

/// A read-only snapshot of the prefix registry, taken once at parse entry
/// so that concurrent `register_prefix`/`unregister_prefix` calls from
/// other threads cannot change the meaning of prefixes mid-parse.
#[derive(Clone, Debug)]
pub struct PrefixRegistry {
    snapshot: HashMap<char, SharedBase>,
}

impl PrefixRegistry {
    /// Takes a snapshot of the current process-wide registry.
    pub fn snapshot() -> Self {
        PrefixRegistry {
            snapshot: registry()
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
        }
    }

    /// Looks up a base system by its prefix letter in this snapshot.
    pub fn get(&self, letter: char) -> Option<SharedBase> {
        self.snapshot.get(&letter).cloned()
    }
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        PrefixRegistry::snapshot()
    }
}
