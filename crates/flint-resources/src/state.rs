// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Per-path resource state tracking.

use std::collections::BTreeMap;

use flint_ast::NodeId;

/// A binding is identified by the node that declares it: a `let`/`var`
/// or `if let` statement, a parameter, or a global declaration.
pub type BindingId = NodeId;

/// Whether a resource entity still holds its value on the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Unavailable,
    Available,
    /// Available on some paths into this point only.
    MaybeAvailable,
}

impl Availability {
    /// Join of two paths: certain only when both paths agree.
    pub fn merge(self, other: Availability) -> Availability {
        match (self, other) {
            (Availability::Available, Availability::Available) => Availability::Available,
            (Availability::Unavailable, Availability::Unavailable) => Availability::Unavailable,
            _ => Availability::MaybeAvailable,
        }
    }
}

/// A tracked entity: a binding, or a chain of fields rooted at one
/// (`x.inner.key`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Place {
    pub root: BindingId,
    pub fields: Vec<String>,
}

impl Place {
    pub fn root(root: BindingId) -> Self {
        Self { root, fields: Vec::new() }
    }

    pub fn field(&self, name: &str) -> Place {
        let mut fields = self.fields.clone();
        fields.push(name.to_string());
        Place { root: self.root, fields }
    }

    pub fn parent(&self) -> Option<Place> {
        if self.fields.is_empty() {
            return None;
        }
        let mut fields = self.fields.clone();
        fields.pop();
        Some(Place { root: self.root, fields })
    }

    /// Whether `self` lies strictly inside `other`.
    pub fn is_within(&self, other: &Place) -> bool {
        self.root == other.root
            && self.fields.len() > other.fields.len()
            && self.fields.starts_with(&other.fields)
    }
}

/// Resource state of one control-flow path.
///
/// Field chains without an entry of their own share the availability of
/// their nearest tracked ancestor; entries exist only for chains that were
/// moved out or reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceState {
    entries: BTreeMap<Place, Availability>,
    reachable: bool,
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceState {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            reachable: true,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// After `return`, `break` or `continue`.
    pub fn mark_unreachable(&mut self) {
        self.reachable = false;
    }

    /// The entity's own entry, ignoring ancestors.
    pub fn own(&self, place: &Place) -> Option<Availability> {
        self.entries.get(place).copied()
    }

    /// Availability of an entity, inherited from its nearest tracked
    /// ancestor. Untracked roots are unavailable.
    pub fn get(&self, place: &Place) -> Availability {
        let mut current = Some(place.clone());
        while let Some(p) = current {
            if let Some(a) = self.entries.get(&p) {
                return *a;
            }
            current = p.parent();
        }
        Availability::Unavailable
    }

    pub fn set(&mut self, place: Place, availability: Availability) {
        self.entries.insert(place, availability);
    }

    /// Tracked entities strictly inside `place`.
    pub fn descendants(&self, place: &Place) -> Vec<(Place, Availability)> {
        self.entries
            .iter()
            .filter(|(p, _)| p.is_within(place))
            .map(|(p, a)| (p.clone(), *a))
            .collect()
    }

    pub fn clear_descendants(&mut self, place: &Place) {
        self.entries.retain(|p, _| !p.is_within(place));
    }

    /// Forget a binding and everything rooted at it.
    pub fn remove_binding(&mut self, root: BindingId) {
        self.entries.retain(|p, _| p.root != root);
    }

    /// Give up precision: every tracked entity may or may not hold its
    /// value.
    pub fn widen(&mut self) {
        for availability in self.entries.values_mut() {
            *availability = Availability::MaybeAvailable;
        }
    }

    /// Join two paths. An unreachable path contributes nothing.
    pub fn merge(&self, other: &ResourceState) -> ResourceState {
        if !self.reachable {
            return other.clone();
        }
        if !other.reachable {
            return self.clone();
        }
        let mut entries = BTreeMap::new();
        for place in self.entries.keys().chain(other.entries.keys()) {
            if entries.contains_key(place) {
                continue;
            }
            entries.insert(place.clone(), self.get(place).merge(other.get(place)));
        }
        ResourceState {
            entries,
            reachable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Availability::*;

    #[test]
    fn merge_table() {
        assert_eq!(Available.merge(Available), Available);
        assert_eq!(Unavailable.merge(Unavailable), Unavailable);
        assert_eq!(Available.merge(Unavailable), MaybeAvailable);
        assert_eq!(Unavailable.merge(MaybeAvailable), MaybeAvailable);
        assert_eq!(MaybeAvailable.merge(Available), MaybeAvailable);
    }

    #[test]
    fn unreachable_is_the_identity_of_merge() {
        let x = Place::root(NodeId(1));
        let mut live = ResourceState::new();
        live.set(x.clone(), Available);
        let mut dead = ResourceState::new();
        dead.set(x.clone(), Unavailable);
        dead.mark_unreachable();
        assert_eq!(live.merge(&dead), live);
        assert_eq!(dead.merge(&live), live);
    }

    #[test]
    fn fields_inherit_until_tracked() {
        let x = Place::root(NodeId(1));
        let inner = x.field("inner");
        let mut state = ResourceState::new();
        state.set(x.clone(), Available);
        assert_eq!(state.get(&inner.field("key")), Available);
        assert_eq!(state.own(&inner), None);

        state.set(inner.clone(), Unavailable);
        assert_eq!(state.get(&inner.field("key")), Unavailable);
        assert_eq!(state.descendants(&x), vec![(inner.clone(), Unavailable)]);

        state.clear_descendants(&x);
        assert_eq!(state.get(&inner), Available);
    }

    #[test]
    fn merge_uses_inherited_values() {
        let x = Place::root(NodeId(1));
        let inner = x.field("inner");
        let mut moved = ResourceState::new();
        moved.set(x.clone(), Available);
        moved.set(inner.clone(), Unavailable);
        let mut kept = ResourceState::new();
        kept.set(x.clone(), Available);

        let joined = moved.merge(&kept);
        assert_eq!(joined.get(&x), Available);
        assert_eq!(joined.get(&inner), MaybeAvailable);
    }

    #[test]
    fn widening_reaches_the_top() {
        let x = Place::root(NodeId(1));
        let y = Place::root(NodeId(2));
        let mut state = ResourceState::new();
        state.set(x.clone(), Available);
        state.set(y.clone(), Unavailable);
        state.widen();
        assert_eq!(state.get(&x), MaybeAvailable);
        assert_eq!(state.get(&y), MaybeAvailable);
        assert_eq!(state.get(&x.field("inner")), MaybeAvailable);
    }
}
