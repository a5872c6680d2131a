use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::model::{Capability, Family, Node, NodeKind};
use crate::renderer::{FnTransform, RenderContext, Transform};

/// What a transform can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Exactly one node kind.
    Kind(NodeKind),
    /// Every kind of a family, e.g. all values.
    Family(Family),
    /// Every kind carrying a capability.
    Capability(Capability),
    /// Any node at all.
    Any,
}

impl Key {
    /// Direct ancestors in lookup order: the family first, then the
    /// capabilities as the kind declares them.
    fn parents(self) -> Vec<Key> {
        match self {
            Key::Kind(kind) => kind
                .family()
                .map(Key::Family)
                .into_iter()
                .chain(kind.capabilities().iter().copied().map(Key::Capability))
                .collect(),
            Key::Family(_) | Key::Capability(_) => vec![Key::Any],
            Key::Any => Vec::new(),
        }
    }
}

impl From<NodeKind> for Key {
    fn from(kind: NodeKind) -> Self {
        Key::Kind(kind)
    }
}

impl From<Family> for Key {
    fn from(family: Family) -> Self {
        Key::Family(family)
    }
}

impl From<Capability> for Key {
    fn from(capability: Capability) -> Self {
        Key::Capability(capability)
    }
}

/// Registry of transforms for one target language.
#[derive(Default)]
pub struct TransformFactory {
    name: String,
    transforms: HashMap<Key, Vec<Arc<dyn Transform>>>,
}

impl TransformFactory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transforms: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a candidate for `key` after any already installed.
    pub fn install<T>(&mut self, key: impl Into<Key>, transform: T) -> &mut Self
    where
        T: Transform + 'static,
    {
        self.transforms
            .entry(key.into())
            .or_default()
            .push(Arc::new(transform));
        self
    }

    pub fn install_fn<F>(&mut self, key: impl Into<Key>, name: &str, function: F) -> &mut Self
    where
        F: Fn(&mut RenderContext<'_>, Node<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.install(key, FnTransform::new(name, function))
    }

    /// Replaces every candidate for `key`.
    pub fn set<T>(&mut self, key: impl Into<Key>, transform: T) -> &mut Self
    where
        T: Transform + 'static,
    {
        self.transforms
            .insert(key.into(), vec![Arc::new(transform) as Arc<dyn Transform>]);
        self
    }

    pub fn remove(&mut self, key: impl Into<Key>) -> bool {
        self.transforms.remove(&key.into()).is_some()
    }

    pub fn transforms_for(&self, key: impl Into<Key>) -> &[Arc<dyn Transform>] {
        self.transforms
            .get(&key.into())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl fmt::Debug for TransformFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformFactory")
            .field("name", &self.name)
            .field("keys", &self.transforms.len())
            .finish()
    }
}

/// A transform together with the factory it came from.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub factory: Arc<TransformFactory>,
    pub transform: Arc<dyn Transform>,
}

fn registered(factory: &Arc<TransformFactory>, key: Key) -> impl Iterator<Item = Candidate> + '_ {
    factory
        .transforms_for(key)
        .iter()
        .map(move |transform| Candidate {
            factory: Arc::clone(factory),
            transform: Arc::clone(transform),
        })
}

/// Every candidate for `kind`, best first.
///
/// Factories are consulted in the order given and each contributes its own
/// resolution. Within a factory, exact registrations win outright. Otherwise
/// ancestors are searched breadth-first; at equal distance the family
/// precedes capabilities and capabilities keep the order
/// [`NodeKind::capabilities`] lists them in.
pub fn resolve(factories: &[Arc<TransformFactory>], kind: NodeKind) -> Vec<Candidate> {
    factories
        .iter()
        .flat_map(|factory| resolve_in(factory, kind))
        .collect()
}

fn resolve_in(factory: &Arc<TransformFactory>, kind: NodeKind) -> Vec<Candidate> {
    let start = Key::Kind(kind);
    let exact: Vec<_> = registered(factory, start).collect();
    if !exact.is_empty() {
        return exact;
    }

    let mut found = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut level = start.parents();
    while !level.is_empty() {
        let mut next = Vec::new();
        for key in level {
            if !visited.insert(key) {
                continue;
            }
            found.extend(registered(factory, key));
            next.extend(key.parents());
        }
        level = next;
    }
    found
}

/// Resolution for every kind, computed once per generator.
#[derive(Debug, Clone)]
pub(crate) struct DispatchTable {
    slots: Vec<Arc<[Candidate]>>,
}

impl DispatchTable {
    pub(crate) fn build(factories: &[Arc<TransformFactory>]) -> Self {
        let slots = NodeKind::ALL
            .iter()
            .map(|&kind| Arc::from(resolve(factories, kind)))
            .collect();
        Self { slots }
    }

    pub(crate) fn candidates(&self, kind: NodeKind) -> Arc<[Candidate]> {
        self.slots
            .get(kind.index())
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(text: &'static str) -> impl Transform {
        FnTransform::new(text, move |_: &mut RenderContext<'_>, _: Node<'_>| {
            Some(text.to_string())
        })
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.transform.name()).collect()
    }

    #[test]
    fn exact_registration_shadows_ancestors() {
        let mut factory = TransformFactory::new("test");
        factory
            .install(Capability::HasName, fixed("named"))
            .install(NodeKind::Field, fixed("field"));
        let factories = vec![Arc::new(factory)];
        assert_eq!(names(&resolve(&factories, NodeKind::Field)), vec!["field"]);
    }

    #[test]
    fn family_beats_capability_at_equal_distance() {
        let mut factory = TransformFactory::new("test");
        factory
            .install(Capability::HasName, fixed("named"))
            .install(Family::ClassOrInterface, fixed("declaration"));
        let factories = vec![Arc::new(factory)];
        assert_eq!(
            names(&resolve(&factories, NodeKind::Class)),
            vec!["declaration", "named"]
        );
    }

    #[test]
    fn capability_ties_follow_declaration_order() {
        // Field declares HasName before HasJavadoc.
        let mut factory = TransformFactory::new("test");
        factory
            .install(Capability::HasJavadoc, fixed("documented"))
            .install(Capability::HasName, fixed("named"));
        let factories = vec![Arc::new(factory)];
        assert_eq!(
            names(&resolve(&factories, NodeKind::Field)),
            vec!["named", "documented"]
        );
    }

    #[test]
    fn any_is_the_most_distant_ancestor() {
        let mut factory = TransformFactory::new("test");
        factory
            .install(Key::Any, fixed("any"))
            .install(Capability::HasCode, fixed("code"));
        let factories = vec![Arc::new(factory)];
        assert_eq!(
            names(&resolve(&factories, NodeKind::Initializer)),
            vec!["code", "any"]
        );
        assert_eq!(names(&resolve(&factories, NodeKind::NullValue)), vec!["any"]);
    }

    #[test]
    fn unregistered_kind_resolves_to_nothing() {
        let mut factory = TransformFactory::new("test");
        factory.install(NodeKind::Field, fixed("field"));
        let factories = vec![Arc::new(factory)];
        assert!(resolve(&factories, NodeKind::Text).is_empty());
    }

    #[test]
    fn factories_are_consulted_in_order() {
        let mut first = TransformFactory::new("first");
        first.install(NodeKind::Type, fixed("one"));
        let mut second = TransformFactory::new("second");
        second.install(NodeKind::Type, fixed("two"));
        let factories = vec![Arc::new(first), Arc::new(second)];

        let candidates = resolve(&factories, NodeKind::Type);
        assert_eq!(names(&candidates), vec!["one", "two"]);
        assert_eq!(candidates[1].factory.name(), "second");
    }

    #[test]
    fn exact_registration_only_shadows_within_its_factory() {
        let mut first = TransformFactory::new("first");
        first
            .install(NodeKind::Type, fixed("type"))
            .install(Key::Any, fixed("hidden"));
        let mut second = TransformFactory::new("second");
        second
            .install(Key::Any, fixed("any"))
            .install(Capability::HasName, fixed("named"));
        let factories = vec![Arc::new(first), Arc::new(second)];

        let candidates = resolve(&factories, NodeKind::Type);
        assert_eq!(names(&candidates), vec!["type", "named", "any"]);
        assert_eq!(candidates[0].factory.name(), "first");
        assert_eq!(candidates[2].factory.name(), "second");
    }

    #[test]
    fn set_overrides_installed_candidates() {
        let mut factory = TransformFactory::new("test");
        factory
            .install(NodeKind::Type, fixed("a"))
            .install(NodeKind::Type, fixed("b"));
        assert_eq!(factory.transforms_for(NodeKind::Type).len(), 2);
        factory.set(NodeKind::Type, fixed("c"));
        let names: Vec<_> = factory
            .transforms_for(NodeKind::Type)
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["c"]);
        assert!(factory.remove(NodeKind::Type));
        assert!(factory.transforms_for(NodeKind::Type).is_empty());
    }

    #[test]
    fn table_covers_every_kind() {
        let mut factory = TransformFactory::new("test");
        factory.install(Key::Any, fixed("any"));
        let table = DispatchTable::build(&[Arc::new(factory)]);
        for kind in NodeKind::ALL {
            assert_eq!(table.candidates(kind).len(), 1, "{kind}");
        }
    }
}
