//! Catalog of registered tools, indexed by id and by space.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::tool::FormTool;

/// Shared handle to a registered tool.
pub type ToolHandle = Arc<dyn FormTool>;

#[derive(Default)]
struct CatalogState {
    by_id: HashMap<String, ToolHandle>,
    by_space: BTreeMap<String, Vec<ToolHandle>>,
}

impl CatalogState {
    /// Puts `handle` into its space list, taking over the slot of `previous`
    /// when both share a space.
    fn place(&mut self, handle: ToolHandle, previous: Option<&ToolHandle>) {
        if let Some(previous) = previous {
            let old_space = previous.space();
            if let Some(list) = self.by_space.get_mut(old_space) {
                if let Some(position) = list.iter().position(|t| Arc::ptr_eq(t, previous)) {
                    if old_space == handle.space() {
                        list[position] = handle;
                        return;
                    }
                    list.remove(position);
                    if list.is_empty() {
                        self.by_space.remove(old_space);
                    }
                }
            }
        }

        self.by_space
            .entry(handle.space().to_owned())
            .or_default()
            .push(handle);
    }
}

/// Registry of tools shared by everything that lists or dispatches them.
///
/// Registration takes an exclusive lock over both indexes, so a tool is never
/// visible by id without also being listed under its space. Lookups share a
/// read lock and may run concurrently.
#[derive(Default)]
pub struct ToolCatalog {
    inner: RwLock<CatalogState>,
}

impl fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        let mut ids: Vec<_> = state.by_id.keys().cloned().collect();
        ids.sort_unstable();
        f.debug_struct("ToolCatalog")
            .field("registered", &ids)
            .field("spaces", &state.by_space.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, returning the handle it replaced.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    pub fn register<T>(&self, tool: T) -> Option<ToolHandle>
    where
        T: FormTool + 'static,
    {
        self.register_handle(Arc::new(tool))
    }

    /// Registers an already shared tool handle, returning the handle it replaced.
    ///
    /// The last registration for an id wins. A replaced tool is removed from
    /// its space list; when the replacement declares the same space it takes
    /// over the old position, otherwise it is appended to its new space.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    pub fn register_handle(&self, handle: ToolHandle) -> Option<ToolHandle> {
        let id = handle.id().to_owned();
        let space = handle.space().to_owned();

        let mut state = self.write();
        let previous = state.by_id.insert(id.clone(), Arc::clone(&handle));
        if previous.is_some() {
            warn!(tool = %id, space = %space, "replacing previously registered tool");
        }
        state.place(handle, previous.as_ref());

        debug!(tool = %id, space = %space, "registered tool");
        previous
    }

    /// Returns the tool registered under `id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ToolHandle> {
        self.read().by_id.get(id).cloned()
    }

    /// Names of all spaces with at least one tool, in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn list_spaces(&self) -> Vec<String> {
        self.read().by_space.keys().cloned().collect()
    }

    /// Tools registered under `space`, in registration order.
    ///
    /// An unknown space yields an empty list.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn list_by_space(&self, space: &str) -> Vec<ToolHandle> {
        self.read().by_space.get(space).cloned().unwrap_or_default()
    }

    /// All registered tools ordered by id.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn list(&self) -> Vec<ToolHandle> {
        let mut tools: Vec<_> = self.read().by_id.values().cloned().collect();
        tools.sort_by(|a, b| a.id().cmp(b.id()));
        tools
    }

    /// Number of registered tools.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    /// Returns `true` when no tool is registered.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().by_id.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.inner.read().expect("tool catalog poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.inner.write().expect("tool catalog poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use async_trait::async_trait;
    use kfunc_forms::{FormInstance, FormRecord};

    use super::*;
    use crate::tool::{ToolContext, ToolOutput, ToolResult};

    #[derive(Default, FormRecord)]
    pub struct EmptyForm {}

    struct StubTool {
        id: String,
        space: String,
        name: String,
    }

    impl StubTool {
        fn new(id: &str, space: &str) -> Self {
            Self::named(id, space, id)
        }

        fn named(id: &str, space: &str, name: &str) -> Self {
            Self {
                id: id.into(),
                space: space.into(),
                name: name.into(),
            }
        }
    }

    #[async_trait]
    impl FormTool for StubTool {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        fn space(&self) -> &str {
            &self.space
        }

        fn new_form(&self) -> Box<dyn FormInstance> {
            Box::new(EmptyForm::default())
        }

        async fn run(&self, _ctx: &ToolContext, _form: Box<dyn FormInstance>) -> ToolResult<ToolOutput> {
            Ok(ToolOutput::text(self.id.clone()))
        }
    }

    fn ids(tools: &[ToolHandle]) -> Vec<&str> {
        tools.iter().map(|tool| tool.id()).collect()
    }

    #[test]
    fn lookup_by_id() {
        let catalog = ToolCatalog::new();
        assert!(catalog.register(StubTool::new("calc", "math")).is_none());

        assert_eq!(catalog.get("calc").unwrap().space(), "math");
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn spaces_keep_registration_order() {
        let catalog = ToolCatalog::new();
        catalog.register(StubTool::new("sum", "math"));
        catalog.register(StubTool::new("upper", "content"));
        catalog.register(StubTool::new("avg", "math"));

        assert_eq!(catalog.list_spaces(), ["content", "math"]);
        assert_eq!(ids(&catalog.list_by_space("math")), ["sum", "avg"]);
        assert!(catalog.list_by_space("unknown").is_empty());
        assert_eq!(ids(&catalog.list()), ["avg", "sum", "upper"]);
    }

    #[test]
    fn reregistering_an_id_replaces_in_place() {
        let catalog = ToolCatalog::new();
        catalog.register(StubTool::named("sum", "math", "Sum v1"));
        catalog.register(StubTool::new("avg", "math"));

        let previous = catalog
            .register(StubTool::named("sum", "math", "Sum v2"))
            .expect("first registration should be returned");
        assert_eq!(previous.name(), "Sum v1");

        let listed = catalog.list_by_space("math");
        assert_eq!(ids(&listed), ["sum", "avg"]);
        assert_eq!(listed[0].name(), "Sum v2");
        assert_eq!(catalog.get("sum").unwrap().name(), "Sum v2");
    }

    #[test]
    fn reregistering_into_another_space_moves_the_tool() {
        let catalog = ToolCatalog::new();
        catalog.register(StubTool::new("trim", "math"));
        catalog.register(StubTool::new("trim", "content"));

        assert_eq!(catalog.list_spaces(), ["content"]);
        assert_eq!(ids(&catalog.list_by_space("content")), ["trim"]);
        assert!(catalog.list_by_space("math").is_empty());
    }

    #[test]
    fn concurrent_registration_keeps_indexes_in_sync() {
        let catalog = ToolCatalog::new();

        thread::scope(|scope| {
            for worker in 0..8 {
                let catalog = &catalog;
                scope.spawn(move || {
                    for n in 0..25 {
                        let space = if n % 2 == 0 { "even" } else { "odd" };
                        catalog.register(StubTool::new(&format!("tool-{worker}-{n}"), space));
                        for handle in catalog.list_by_space(space) {
                            assert!(catalog.get(handle.id()).is_some());
                        }
                    }
                });
            }
        });

        assert_eq!(catalog.len(), 200);
        let listed: usize = catalog
            .list_spaces()
            .iter()
            .map(|space| catalog.list_by_space(space).len())
            .sum();
        assert_eq!(listed, 200);
    }

    #[test]
    fn debug_lists_registered_ids() {
        let catalog = ToolCatalog::new();
        catalog.register(StubTool::new("b", "x"));
        catalog.register(StubTool::new("a", "x"));
        let rendered = format!("{catalog:?}");
        assert!(rendered.contains(r#"registered: ["a", "b"]"#));
    }
}
