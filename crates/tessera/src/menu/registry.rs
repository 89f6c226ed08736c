//! Per-node context menu bindings with ancestor fallback.
//!
//! A [`ContextMenuRegistry`] associates nodes of a visual tree with menu
//! producers. Resolving a menu for a node walks from that node towards the
//! root and stops at the first of:
//!
//! 1. a node carrying the suppression marker: no menu at all,
//! 2. the root boundary: the default menu,
//! 3. a node with its own binding: that binding,
//! 4. the top of the chain: the default menu.
//!
//! Bindings live in a `SecondaryMap` keyed by generational [`NodeId`]s. The
//! map cannot see the tree destroy a node, so every lookup also asks the
//! [`Hierarchy`] whether the node is still alive: a destroyed node's binding
//! is never returned, and bindings are never installed for dead nodes.
//! [`ContextMenuRegistry::reclaim`] frees the storage left behind.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::SecondaryMap;
use tessera_core::logging::targets;
use tessera_core::{Hierarchy, NodeId, Signal};

use super::config::{ContextMenuConfig, DEFAULT_MAX_ANCESTOR_DEPTH};
use super::defaults::default_menu;
use super::item::MenuItem;
use crate::error::Result;

/// Produces the entries of a menu when it is about to be shown.
///
/// Producers are evaluated lazily, every time [`ResolvedMenu::items`] is
/// called, so a producer that reads application state always reflects the
/// current state.
#[derive(Clone)]
pub struct MenuProducer(Arc<dyn Fn() -> Vec<MenuItem> + Send + Sync>);

impl MenuProducer {
    /// Wrap a closure that builds the menu on demand.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Vec<MenuItem> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A producer that always yields clones of `items`.
    pub fn snapshot(items: Vec<MenuItem>) -> Self {
        let items = Arc::new(items);
        Self::new(move || items.as_ref().clone())
    }

    /// A producer that yields no entries.
    pub fn empty() -> Self {
        Self::new(Vec::new)
    }

    /// Build the menu entries now.
    pub fn produce(&self) -> Vec<MenuItem> {
        (self.0)()
    }
}

impl From<Vec<MenuItem>> for MenuProducer {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::snapshot(items)
    }
}

impl fmt::Debug for MenuProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MenuProducer(..)")
    }
}

/// A menu producer plus the suppression flag recorded for one owner.
#[derive(Debug, Clone)]
pub struct MenuBinding {
    producer: MenuProducer,
    suppressed: bool,
}

impl MenuBinding {
    /// Create a binding.
    pub fn new(producer: MenuProducer, suppressed: bool) -> Self {
        Self {
            producer,
            suppressed,
        }
    }

    /// The item producer, kept even while the binding is suppressed.
    pub fn producer(&self) -> &MenuProducer {
        &self.producer
    }

    /// Whether this binding hides the menu.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

/// Who a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOwner {
    /// The registry-wide default binding.
    Default,
    /// A node's own binding.
    Node(NodeId),
}

/// What a menu is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// No concrete element, e.g. a request without an anchor element.
    Background,
    /// A node of the visual tree.
    Node(NodeId),
    /// The caller explicitly wants no menu.
    Suppressed,
}

impl From<NodeId> for MenuTarget {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Option<NodeId>> for MenuTarget {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(Self::Background, Self::Node)
    }
}

/// The effective menu for a target.
#[derive(Debug, Clone)]
pub struct ResolvedMenu {
    producer: MenuProducer,
    suppressed: bool,
    owner: Option<MenuOwner>,
}

impl ResolvedMenu {
    fn from_binding(binding: &MenuBinding, owner: MenuOwner) -> Self {
        Self {
            producer: binding.producer.clone(),
            suppressed: binding.suppressed,
            owner: Some(owner),
        }
    }

    fn suppressed() -> Self {
        Self {
            producer: MenuProducer::empty(),
            suppressed: true,
            owner: None,
        }
    }

    /// Build the entries to display. Always empty when suppressed.
    pub fn items(&self) -> Vec<MenuItem> {
        if self.suppressed {
            Vec::new()
        } else {
            self.producer.produce()
        }
    }

    /// Whether no menu should be shown.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// The binding this result came from; `None` when a suppression marker
    /// or an explicit [`MenuTarget::Suppressed`] request ended resolution.
    pub fn owner(&self) -> Option<MenuOwner> {
        self.owner
    }
}

/// Outcome of an ancestor walk.
enum Walk<'a> {
    Bound(NodeId, &'a MenuBinding),
    Marker(NodeId),
    Fallback,
}

/// Resolves context menus for nodes of a visual tree.
///
/// # Signals
///
/// - `bindings_changed`: emitted after any binding is installed, changed or
///   removed, with the affected owner
pub struct ContextMenuRegistry {
    /// Shared so that restored bindings follow later `set_default` calls.
    default: Arc<RwLock<MenuProducer>>,
    bindings: SecondaryMap<NodeId, MenuBinding>,
    max_ancestor_depth: usize,

    /// Emitted after a binding changes.
    pub bindings_changed: Signal<MenuOwner>,
}

impl Default for ContextMenuRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextMenuRegistry {
    /// Create a registry whose default binding is the built-in default menu.
    pub fn new() -> Self {
        Self::with_default(MenuProducer::snapshot(default_menu()))
    }

    /// Create a registry with a custom default producer.
    pub fn with_default(producer: MenuProducer) -> Self {
        Self {
            default: Arc::new(RwLock::new(producer)),
            bindings: SecondaryMap::new(),
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            bindings_changed: Signal::new(),
        }
    }

    /// Create a registry from a validated configuration.
    pub fn with_config(config: &ContextMenuConfig) -> Result<Self> {
        config.validate()?;
        let mut registry = Self::with_default(MenuProducer::snapshot(config.default_items()?));
        registry.max_ancestor_depth = config.max_ancestor_depth;
        Ok(registry)
    }

    /// Ceiling on the number of nodes an ancestor walk visits.
    pub fn max_ancestor_depth(&self) -> usize {
        self.max_ancestor_depth
    }

    /// Replace the default producer.
    ///
    /// Nodes bound with [`restore_default`](Self::restore_default) follow
    /// the new producer too.
    pub fn set_default(&mut self, producer: MenuProducer) {
        *self.default.write() = producer;
        self.bindings_changed.emit(MenuOwner::Default);
    }

    /// The default binding, used when no ancestor has a binding.
    pub fn default_binding(&self) -> MenuBinding {
        MenuBinding::new(self.default_producer(), false)
    }

    fn default_producer(&self) -> MenuProducer {
        self.default.read().clone()
    }

    /// A live node's own binding, ignoring ancestors.
    pub fn binding<H>(&self, tree: &H, node: NodeId) -> Option<&MenuBinding>
    where
        H: Hierarchy + ?Sized,
    {
        if tree.is_alive(node) {
            self.bindings.get(node)
        } else {
            None
        }
    }

    /// Check whether a live node has its own binding.
    pub fn has_binding<H>(&self, tree: &H, node: NodeId) -> bool
    where
        H: Hierarchy + ?Sized,
    {
        self.binding(tree, node).is_some()
    }

    /// Number of node bindings stored (the default binding is not counted).
    ///
    /// Bindings of destroyed nodes count until [`reclaim`](Self::reclaim)
    /// drops them.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve the effective menu for a target.
    ///
    /// Never fails: unbound nodes fall back to the default binding and
    /// unknown nodes behave like unbound parentless nodes.
    pub fn resolve<H>(&self, tree: &H, target: impl Into<MenuTarget>) -> ResolvedMenu
    where
        H: Hierarchy + ?Sized,
    {
        let node = match target.into() {
            MenuTarget::Background => {
                return ResolvedMenu::from_binding(&self.default_binding(), MenuOwner::Default);
            }
            MenuTarget::Suppressed => return ResolvedMenu::suppressed(),
            MenuTarget::Node(node) => node,
        };

        match self.walk(tree, node) {
            Walk::Bound(owner, binding) => {
                tracing::trace!(
                    target: targets::MENU,
                    ?node,
                    ?owner,
                    suppressed = binding.suppressed,
                    "resolved node binding"
                );
                ResolvedMenu::from_binding(binding, MenuOwner::Node(owner))
            }
            Walk::Marker(marked) => {
                tracing::trace!(
                    target: targets::MENU,
                    ?node,
                    ?marked,
                    "context menu suppressed by marker"
                );
                ResolvedMenu::suppressed()
            }
            Walk::Fallback => {
                tracing::trace!(target: targets::MENU, ?node, "falling back to default menu");
                ResolvedMenu::from_binding(&self.default_binding(), MenuOwner::Default)
            }
        }
    }

    fn walk<H>(&self, tree: &H, node: NodeId) -> Walk<'_>
    where
        H: Hierarchy + ?Sized,
    {
        let mut current = node;
        for _ in 0..self.max_ancestor_depth {
            if !tree.is_alive(current) {
                return Walk::Fallback;
            }
            if tree.has_suppression_marker(current) {
                return Walk::Marker(current);
            }
            if tree.is_root(current) {
                return Walk::Fallback;
            }
            if let Some(binding) = self.bindings.get(current) {
                return Walk::Bound(current, binding);
            }
            match tree.parent_of(current) {
                Some(parent) => current = parent,
                None => return Walk::Fallback,
            }
        }

        tracing::warn!(
            target: targets::MENU,
            ?node,
            max_depth = self.max_ancestor_depth,
            "ancestor walk hit the depth ceiling, using default menu"
        );
        Walk::Fallback
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    fn install<H>(&mut self, tree: &H, node: NodeId, binding: MenuBinding)
    where
        H: Hierarchy + ?Sized,
    {
        if !tree.is_alive(node) {
            tracing::debug!(target: targets::MENU, ?node, "ignoring binding for destroyed node");
            return;
        }
        // A key older than one already stored is rejected by the map.
        if self.bindings.insert(node, binding).is_none() && !self.bindings.contains_key(node) {
            tracing::debug!(target: targets::MENU, ?node, "ignoring binding for stale node id");
            return;
        }
        self.bindings_changed.emit(MenuOwner::Node(node));
    }

    /// Bind a producer to exactly this node, replacing its previous binding.
    pub fn set<H>(&mut self, tree: &H, node: NodeId, producer: impl Into<MenuProducer>)
    where
        H: Hierarchy + ?Sized,
    {
        self.install(tree, node, MenuBinding::new(producer.into(), false));
    }

    /// Bind this node to the registry default, overriding any ancestor binding.
    pub fn restore_default<H>(&mut self, tree: &H, node: NodeId)
    where
        H: Hierarchy + ?Sized,
    {
        let default = Arc::clone(&self.default);
        let producer = MenuProducer::new(move || {
            let current = default.read().clone();
            current.produce()
        });
        self.install(tree, node, MenuBinding::new(producer, false));
    }

    /// Transform the menu currently resolved for `node` and bind the result
    /// to `node` itself.
    ///
    /// The transform runs once, now; the node's new binding is a snapshot of
    /// its output.
    pub fn update<H, F>(&mut self, tree: &H, node: NodeId, transform: F)
    where
        H: Hierarchy + ?Sized,
        F: FnOnce(Vec<MenuItem>) -> Vec<MenuItem>,
    {
        let current = self.resolve(tree, node).items();
        let updated = transform(current);
        self.install(tree, node, MenuBinding::new(MenuProducer::snapshot(updated), false));
    }

    /// Set this node's suppression flag, keeping the producer it resolves to.
    ///
    /// A node without its own binding captures the producer its ancestor
    /// walk currently yields.
    pub fn set_suppressed<H>(&mut self, tree: &H, node: NodeId, suppressed: bool)
    where
        H: Hierarchy + ?Sized,
    {
        let producer = match self.binding(tree, node) {
            Some(binding) => binding.producer.clone(),
            None => self.resolve(tree, node).producer,
        };
        self.install(tree, node, MenuBinding::new(producer, suppressed));
    }

    /// Remove this node's own binding so resolution falls through to its
    /// ancestors. Returns `true` if there was one.
    pub fn remove_binding(&mut self, node: NodeId) -> bool {
        let removed = self.bindings.remove(node).is_some();
        if removed {
            self.bindings_changed.emit(MenuOwner::Node(node));
        }
        removed
    }

    /// Drop bindings of nodes that are no longer alive.
    ///
    /// Typically called with `|id| tree.contains(id)` after destroying part
    /// of the tree. Returns the number of reclaimed bindings.
    pub fn reclaim(&mut self, mut is_alive: impl FnMut(NodeId) -> bool) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|node, _| is_alive(node));
        let reclaimed = before - self.bindings.len();
        if reclaimed > 0 {
            tracing::debug!(
                target: targets::MENU,
                reclaimed,
                "reclaimed bindings of destroyed nodes"
            );
        }
        reclaimed
    }
}

static_assertions::assert_impl_all!(ContextMenuRegistry: Send, Sync);
static_assertions::assert_impl_all!(ResolvedMenu: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use tessera_core::NodeTree;

    struct Fixture {
        tree: NodeTree,
        body: NodeId,
        a: NodeId,
        b: NodeId,
        c: NodeId,
    }

    /// body (root boundary) -> a -> b -> c
    fn fixture() -> Fixture {
        let mut tree = NodeTree::new();
        let body = tree.create("body");
        tree.set_root_boundary(body, true).unwrap();
        let a = tree.create_child(body, "a").unwrap();
        let b = tree.create_child(a, "b").unwrap();
        let c = tree.create_child(b, "c").unwrap();
        Fixture { tree, body, a, b, c }
    }

    fn titles(menu: &ResolvedMenu) -> Vec<String> {
        menu.items()
            .iter()
            .filter_map(|item| item.title().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_background_resolves_to_default() {
        let f = fixture();
        let registry = ContextMenuRegistry::new();
        let menu = registry.resolve(&f.tree, MenuTarget::Background);
        assert_eq!(menu.owner(), Some(MenuOwner::Default));
        assert!(!menu.is_suppressed());
        assert_eq!(menu.items(), default_menu());

        let absent: Option<NodeId> = None;
        assert_eq!(
            registry.resolve(&f.tree, absent).owner(),
            Some(MenuOwner::Default)
        );
    }

    #[test]
    fn test_explicit_suppressed_target() {
        let f = fixture();
        let registry = ContextMenuRegistry::new();
        let menu = registry.resolve(&f.tree, MenuTarget::Suppressed);
        assert!(menu.is_suppressed());
        assert!(menu.items().is_empty());
        assert_eq!(menu.owner(), None);
    }

    #[test]
    fn test_unbound_chain_falls_back_to_default() {
        let f = fixture();
        let registry = ContextMenuRegistry::new();
        let menu = registry.resolve(&f.tree, f.c);
        assert_eq!(menu.owner(), Some(MenuOwner::Default));
        assert_eq!(menu.items(), default_menu());
    }

    #[test]
    fn test_nearest_ancestor_binding_wins() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.a, vec![MenuItem::action("From A")]);
        registry.set(&f.tree, f.b, vec![MenuItem::action("From B")]);

        let menu = registry.resolve(&f.tree, f.c);
        assert_eq!(menu.owner(), Some(MenuOwner::Node(f.b)));
        assert_eq!(titles(&menu), vec!["From B"]);
        assert_eq!(titles(&registry.resolve(&f.tree, f.a)), vec!["From A"]);
    }

    #[test]
    fn test_set_replaces_without_merging() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.b, vec![MenuItem::action("One"), MenuItem::action("Two")]);
        registry.set(&f.tree, f.b, vec![MenuItem::action("Three")]);
        assert_eq!(titles(&registry.resolve(&f.tree, f.b)), vec!["Three"]);
        assert_eq!(registry.binding_count(), 1);
    }

    #[test]
    fn test_root_boundary_binding_is_not_consulted() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.body, vec![MenuItem::action("Body")]);
        let menu = registry.resolve(&f.tree, f.c);
        assert_eq!(menu.owner(), Some(MenuOwner::Default));
    }

    #[test]
    fn test_parentless_node_binding_is_consulted() {
        let mut tree = NodeTree::new();
        let window = tree.create("window");
        let child = tree.create_child(window, "child").unwrap();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&tree, window, vec![MenuItem::action("Window")]);
        assert_eq!(titles(&registry.resolve(&tree, child)), vec!["Window"]);
    }

    #[test]
    fn test_suppression_marker_short_circuits() {
        let mut f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.a, vec![MenuItem::action("From A")]);
        f.tree.set_suppression_marker(f.b, true).unwrap();

        let menu = registry.resolve(&f.tree, f.c);
        assert!(menu.is_suppressed());
        assert!(menu.items().is_empty());
        assert_eq!(menu.owner(), None);

        // The marked node itself is suppressed too.
        assert!(registry.resolve(&f.tree, f.b).is_suppressed());
        // Ancestors above the marker are unaffected.
        assert_eq!(titles(&registry.resolve(&f.tree, f.a)), vec!["From A"]);
    }

    #[test]
    fn test_marker_on_root_boundary() {
        let mut f = fixture();
        f.tree.set_suppression_marker(f.body, true).unwrap();
        let registry = ContextMenuRegistry::new();
        assert!(registry.resolve(&f.tree, f.c).is_suppressed());
    }

    #[test]
    fn test_items_are_produced_lazily() {
        let f = fixture();
        let state = Arc::new(Mutex::new(vec!["First".to_string()]));
        let state_clone = state.clone();
        let mut registry = ContextMenuRegistry::new();
        registry.set(
            &f.tree,
            f.a,
            MenuProducer::new(move || {
                state_clone
                    .lock()
                    .iter()
                    .map(|title| MenuItem::action(title.clone()))
                    .collect()
            }),
        );

        let menu = registry.resolve(&f.tree, f.c);
        state.lock().push("Second".to_string());
        assert_eq!(titles(&menu), vec!["First", "Second"]);
    }

    #[test]
    fn test_update_snapshots_inherited_items() {
        let f = fixture();
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        let mut registry = ContextMenuRegistry::new();
        registry.set(
            &f.tree,
            f.a,
            MenuProducer::new(move || {
                *calls_clone.lock() += 1;
                vec![MenuItem::action("Open")]
            }),
        );

        registry.update(&f.tree, f.c, |mut items| {
            items.push(MenuItem::action("Rename"));
            items
        });
        assert_eq!(*calls.lock(), 1);

        let menu = registry.resolve(&f.tree, f.c);
        assert_eq!(menu.owner(), Some(MenuOwner::Node(f.c)));
        assert_eq!(titles(&menu), vec!["Open", "Rename"]);
        // The snapshot does not call back into the inherited producer.
        assert_eq!(*calls.lock(), 1);
        // The ancestor keeps its own binding.
        assert_eq!(titles(&registry.resolve(&f.tree, f.a)), vec!["Open"]);
    }

    #[test]
    fn test_update_of_unbound_node_starts_from_default() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.update(&f.tree, f.b, |items| items.into_iter().take(1).collect());
        assert_eq!(
            registry.resolve(&f.tree, f.c).items(),
            vec![MenuItem::label("Main Menu")]
        );
    }

    #[test]
    fn test_restore_default_overrides_ancestor() {
        let f = fixture();
        let mut registry =
            ContextMenuRegistry::with_default(vec![MenuItem::action("Default")].into());
        registry.set(&f.tree, f.a, vec![MenuItem::action("Custom")]);
        registry.restore_default(&f.tree, f.b);

        assert_eq!(titles(&registry.resolve(&f.tree, f.c)), vec!["Default"]);
        assert_eq!(
            registry.resolve(&f.tree, f.c).owner(),
            Some(MenuOwner::Node(f.b))
        );

        registry.set_default(vec![MenuItem::action("New default")].into());
        assert_eq!(titles(&registry.resolve(&f.tree, f.c)), vec!["New default"]);
    }

    #[test]
    fn test_set_suppressed_keeps_producer() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.b, vec![MenuItem::action("Copy")]);

        registry.set_suppressed(&f.tree, f.b, true);
        let menu = registry.resolve(&f.tree, f.c);
        assert!(menu.is_suppressed());
        assert!(menu.items().is_empty());
        assert_eq!(menu.owner(), Some(MenuOwner::Node(f.b)));

        registry.set_suppressed(&f.tree, f.b, false);
        assert_eq!(titles(&registry.resolve(&f.tree, f.c)), vec!["Copy"]);
    }

    #[test]
    fn test_set_suppressed_on_unbound_node_captures_inherited_producer() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.a, vec![MenuItem::action("Inherited")]);
        registry.set_suppressed(&f.tree, f.c, true);
        assert!(registry.resolve(&f.tree, f.c).is_suppressed());
        assert!(!registry.resolve(&f.tree, f.b).is_suppressed());

        registry.set_suppressed(&f.tree, f.c, false);
        assert_eq!(titles(&registry.resolve(&f.tree, f.c)), vec!["Inherited"]);
    }

    #[test]
    fn test_remove_binding_falls_through() {
        let f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.a, vec![MenuItem::action("From A")]);
        registry.set(&f.tree, f.c, vec![MenuItem::action("From C")]);

        assert!(registry.remove_binding(f.c));
        assert!(!registry.remove_binding(f.c));
        assert_eq!(titles(&registry.resolve(&f.tree, f.c)), vec!["From A"]);
    }

    #[test]
    fn test_destroyed_nodes_are_unreachable_and_reclaimable() {
        let mut f = fixture();
        let mut registry = ContextMenuRegistry::new();
        registry.set(&f.tree, f.b, vec![MenuItem::action("From B")]);
        registry.set(&f.tree, f.c, vec![MenuItem::action("From C")]);

        f.tree.destroy(f.b).unwrap();
        let replacement = f.tree.create_child(f.a, "replacement").unwrap();
        assert!(!registry.has_binding(&f.tree, replacement));
        assert_eq!(
            registry.resolve(&f.tree, replacement).owner(),
            Some(MenuOwner::Default)
        );

        let tree = &f.tree;
        assert_eq!(registry.reclaim(|id| tree.contains(id)), 2);
        assert_eq!(registry.binding_count(), 0);
    }

    #[test]
    fn test_destroyed_node_without_slot_reuse_is_unbound() {
        let mut f = fixture();
        let changes = Arc::new(Mutex::new(0));
        let changes_clone = changes.clone();
        let mut registry = ContextMenuRegistry::new();
        registry.bindings_changed.connect(move |_| *changes_clone.lock() += 1);
        registry.set(&f.tree, f.b, vec![MenuItem::action("From B")]);
        registry.set(&f.tree, f.c, vec![MenuItem::action("From C")]);

        // No node is created afterwards, so the dead slot stays empty.
        f.tree.destroy(f.c).unwrap();
        assert!(!registry.has_binding(&f.tree, f.c));
        assert!(registry.binding(&f.tree, f.c).is_none());
        let menu = registry.resolve(&f.tree, f.c);
        assert_eq!(menu.owner(), Some(MenuOwner::Default));
        assert_eq!(menu.items(), default_menu());

        // Writes to the dead id are dropped without notifying.
        let before = *changes.lock();
        registry.set(&f.tree, f.c, vec![MenuItem::action("Late")]);
        registry.restore_default(&f.tree, f.c);
        registry.update(&f.tree, f.c, |items| items);
        registry.set_suppressed(&f.tree, f.c, true);
        assert_eq!(*changes.lock(), before);
        assert_eq!(registry.binding_count(), 2);

        let tree = &f.tree;
        assert_eq!(registry.reclaim(|id| tree.contains(id)), 1);
        assert!(registry.has_binding(&f.tree, f.b));
    }

    #[test]
    fn test_set_on_destroyed_node_is_ignored() {
        let mut f = fixture();
        let mut registry = ContextMenuRegistry::new();
        f.tree.destroy(f.c).unwrap();
        let reused = f.tree.create_child(f.a, "reused").unwrap();
        registry.set(&f.tree, reused, vec![MenuItem::action("Live")]);
        registry.set(&f.tree, f.c, vec![MenuItem::action("Stale")]);

        assert_eq!(titles(&registry.resolve(&f.tree, reused)), vec!["Live"]);
    }

    #[test]
    fn test_depth_ceiling_terminates_walk() {
        struct Cycle(NodeId, NodeId);
        impl Hierarchy for Cycle {
            fn is_alive(&self, _: NodeId) -> bool {
                true
            }
            fn parent_of(&self, id: NodeId) -> Option<NodeId> {
                Some(if id == self.0 { self.1 } else { self.0 })
            }
            fn is_root(&self, _: NodeId) -> bool {
                false
            }
            fn has_suppression_marker(&self, _: NodeId) -> bool {
                false
            }
        }

        let mut tree = NodeTree::new();
        let x = tree.create("x");
        let y = tree.create("y");
        let config = ContextMenuConfig {
            max_ancestor_depth: 8,
            ..Default::default()
        };
        let registry = ContextMenuRegistry::with_config(&config).unwrap();
        let menu = registry.resolve(&Cycle(x, y), x);
        assert_eq!(menu.owner(), Some(MenuOwner::Default));
    }

    #[test]
    fn test_bindings_changed_signal() {
        let f = fixture();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        let mut registry = ContextMenuRegistry::new();
        registry.bindings_changed.connect(move |owner| {
            changes_clone.lock().push(*owner);
        });

        registry.set(&f.tree, f.a, vec![MenuItem::action("A")]);
        registry.set_suppressed(&f.tree, f.a, true);
        registry.remove_binding(f.a);
        registry.remove_binding(f.a);
        registry.set_default(MenuProducer::empty());

        assert_eq!(
            *changes.lock(),
            vec![
                MenuOwner::Node(f.a),
                MenuOwner::Node(f.a),
                MenuOwner::Node(f.a),
                MenuOwner::Default,
            ]
        );
    }
}
