//! String key-value storage seam.
//!
//! The task store only needs `get`/`set` on strings, which is all a browser's
//! local storage offers too. `Database` backs it with SQLite; `MemoryKv`
//! backs it with a map for tests and throwaway sessions.

use std::collections::HashMap;

use crate::error::Result;

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_kv_roundtrip() {
        let mut kv = MemoryKv::new();
        assert!(kv.get("k").unwrap().is_none());
        kv.set("k", "v").unwrap();
        kv.set("k", "w").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("w"));
    }
}
