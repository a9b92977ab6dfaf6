use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::value::Symbol;

/// Per-realm symbol registry for Symbol.for() / Symbol.keyFor()
pub struct SymbolRegistry {
    map: Mutex<FxHashMap<String, Arc<Symbol>>>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Symbol>> {
        self.map.lock().get(key).cloned()
    }

    /// `Symbol.for(key)`: the registered symbol, created on first use
    pub fn get_or_insert(&self, key: &str) -> Arc<Symbol> {
        self.map
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Symbol::new(Some(key.to_string())))
            .clone()
    }

    pub fn key_for(&self, symbol: &Symbol) -> Option<String> {
        let map = self.map.lock();
        for (key, value) in map.iter() {
            if value.id == symbol.id {
                return Some(key.clone());
            }
        }
        None
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_symbols_are_shared() {
        let registry = SymbolRegistry::new();
        let a = registry.get_or_insert("app.key");
        let b = registry.get_or_insert("app.key");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.key_for(&a).as_deref(), Some("app.key"));
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_unregistered_symbol_has_no_key() {
        let registry = SymbolRegistry::new();
        registry.get_or_insert("app.key");
        let fresh = Symbol::new(Some("app.key".into()));
        assert!(registry.key_for(&fresh).is_none());
    }
}
