// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Account storage: one slot per type.

use indexmap::IndexMap;

use crate::value::Value;

/// Storage slots keyed by the rendered slot type (`R`, `[R]`, `Int?`).
/// An empty slot reads as `nil`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    slots: IndexMap<String, Value>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value in a slot, `None` when the slot is empty.
    pub fn get(&self, slot: &str) -> Option<&Value> {
        match self.slots.get(slot) {
            None | Some(Value::Nil) => None,
            Some(value) => Some(value),
        }
    }

    /// Mutable access to a slot, creating it empty if needed.
    pub(crate) fn slot_mut(&mut self, slot: &str) -> &mut Value {
        self.slots.entry(slot.to_string()).or_insert(Value::Nil)
    }

    /// Occupied slots in the order they were first written.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .filter(|(_, value)| !matches!(value, Value::Nil))
            .map(|(slot, value)| (slot.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slots_read_as_absent() {
        let mut storage = Storage::new();
        assert!(storage.get("R").is_none());
        *storage.slot_mut("R") = Value::Bool(true);
        *storage.slot_mut("S") = Value::Nil;
        assert_eq!(storage.get("R"), Some(&Value::Bool(true)));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["R"]);
    }
}
