//! The results arena.
//!
//! All result elements of one computation pass live in a [`ResultsArena`]
//! and are addressed by [`NodeHandle`]s. Elements form a tree: containers
//! hold tables, plots and further containers. A node's display name is
//! derived from its path from the root, and the whole pass is torn down at
//! once with [`ResultsArena::destroy_all`].

use log::debug;
use serde_json::{json, Map, Value};

use crate::error::ResultsError;
use crate::plot::Plot;
use crate::table::Table;
use crate::Result;

/// Separator between path components of a nested name.
pub const NESTED_NAME_SEPARATOR: &str = "_";

/// Opaque handle to a node in a [`ResultsArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    /// Position of the node in its arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A titled group of result elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub title: String,
}

impl Container {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Any element that can live in the arena.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultElement {
    Container(Container),
    Table(Table),
    Plot(Plot),
}

impl ResultElement {
    /// Title of the element
    pub fn title(&self) -> &str {
        match self {
            ResultElement::Container(c) => &c.title,
            ResultElement::Table(t) => t.title(),
            ResultElement::Plot(p) => p.title(),
        }
    }
}

impl From<Container> for ResultElement {
    fn from(container: Container) -> Self {
        ResultElement::Container(container)
    }
}

impl From<Table> for ResultElement {
    fn from(table: Table) -> Self {
        ResultElement::Table(table)
    }
}

impl From<Plot> for ResultElement {
    fn from(plot: Plot) -> Self {
        ResultElement::Plot(plot)
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    element: ResultElement,
}

/// Owner of every result node of one computation pass.
#[derive(Debug, Clone, Default)]
pub struct ResultsArena {
    nodes: Vec<Node>,
}

impl ResultsArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an element under `parent` (or at the root) with the given name.
    ///
    /// Only containers can be parents.
    pub fn insert(
        &mut self,
        parent: Option<NodeHandle>,
        name: impl Into<String>,
        element: impl Into<ResultElement>,
    ) -> Result<NodeHandle> {
        if let Some(parent) = parent {
            match self.get(parent)? {
                ResultElement::Container(_) => {}
                _ => return Err(ResultsError::NotAContainer(parent.index())),
            }
        }

        let handle = NodeHandle(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            parent,
            children: Vec::new(),
            element: element.into(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(handle);
        }
        Ok(handle)
    }

    fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes
            .get(handle.index())
            .ok_or(ResultsError::UnknownNode(handle.index()))
    }

    /// The element behind a handle
    pub fn get(&self, handle: NodeHandle) -> Result<&ResultElement> {
        Ok(&self.node(handle)?.element)
    }

    /// Mutable access to the element behind a handle
    pub fn get_mut(&mut self, handle: NodeHandle) -> Result<&mut ResultElement> {
        self.nodes
            .get_mut(handle.index())
            .map(|node| &mut node.element)
            .ok_or(ResultsError::UnknownNode(handle.index()))
    }

    /// The table behind a handle, if it is one
    pub fn table_mut(&mut self, handle: NodeHandle) -> Option<&mut Table> {
        match self.get_mut(handle).ok()? {
            ResultElement::Table(table) => Some(table),
            _ => None,
        }
    }

    /// The plot behind a handle, if it is one
    pub fn plot_mut(&mut self, handle: NodeHandle) -> Option<&mut Plot> {
        match self.get_mut(handle).ok()? {
            ResultElement::Plot(plot) => Some(plot),
            _ => None,
        }
    }

    /// Name the node was inserted with
    pub fn name(&self, handle: NodeHandle) -> Result<&str> {
        Ok(&self.node(handle)?.name)
    }

    /// Children of a node in insertion order
    pub fn children(&self, handle: NodeHandle) -> Result<&[NodeHandle]> {
        Ok(&self.node(handle)?.children)
    }

    /// Nodes without a parent, in insertion order
    pub fn roots(&self) -> Vec<NodeHandle> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeHandle(index))
            .collect()
    }

    /// Display name of a node: the non-empty names on its path from the
    /// root, joined with `_`.
    pub fn unique_nested_name(&self, handle: NodeHandle) -> Result<String> {
        let mut parts = Vec::new();
        let mut current = Some(handle);
        while let Some(at) = current {
            let node = self.node(at)?;
            if !node.name.is_empty() {
                parts.push(node.name.as_str());
            }
            current = node.parent;
        }
        parts.reverse();
        Ok(parts.join(NESTED_NAME_SEPARATOR))
    }

    /// Display document of a node; containers embed their children.
    pub fn data_entry(&self, handle: NodeHandle) -> Result<Value> {
        let node = self.node(handle)?;
        let name = self.unique_nested_name(handle)?;

        match &node.element {
            ResultElement::Table(table) => Ok(serde_json::to_value(table.data_entry(&name))?),
            ResultElement::Plot(plot) => Ok(serde_json::to_value(plot.data_entry(&name))?),
            ResultElement::Container(container) => {
                let mut collection = Map::new();
                for &child in &node.children {
                    collection.insert(self.unique_nested_name(child)?, self.data_entry(child)?);
                }
                Ok(json!({
                    "type": "collection",
                    "title": container.title,
                    "name": name,
                    "collection": collection,
                }))
            }
        }
    }

    /// Drop every node; returns how many were dropped.
    ///
    /// Handles issued before the call no longer resolve.
    pub fn destroy_all(&mut self) -> usize {
        let dropped = self.nodes.len();
        self.nodes.clear();
        debug!("destroyed {} result nodes", dropped);
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TabularInput;

    fn tree() -> (ResultsArena, NodeHandle, NodeHandle, NodeHandle) {
        let mut arena = ResultsArena::new();
        let root = arena.insert(None, "anova", Container::new("ANOVA")).unwrap();
        let inner = arena
            .insert(Some(root), "assumptions", Container::new("Assumption Checks"))
            .unwrap();
        let table = arena
            .insert(Some(inner), "levene", Table::new("Levene's Test"))
            .unwrap();
        (arena, root, inner, table)
    }

    #[test]
    fn test_nested_names_follow_the_path() {
        let (mut arena, root, inner, table) = tree();
        assert_eq!(arena.unique_nested_name(root).unwrap(), "anova");
        assert_eq!(
            arena.unique_nested_name(table).unwrap(),
            "anova_assumptions_levene"
        );

        let unnamed = arena.insert(Some(inner), "", Plot::new("qq")).unwrap();
        assert_eq!(arena.unique_nested_name(unnamed).unwrap(), "anova_assumptions");
    }

    #[test]
    fn test_only_containers_have_children() {
        let (mut arena, _, _, table) = tree();
        assert!(matches!(
            arena.insert(Some(table), "x", Plot::new("p")),
            Err(ResultsError::NotAContainer(_))
        ));
        assert!(matches!(
            arena.insert(Some(NodeHandle(99)), "x", Plot::new("p")),
            Err(ResultsError::UnknownNode(99))
        ));
    }

    #[test]
    fn test_collection_document() {
        let (mut arena, root, _, table) = tree();
        arena
            .table_mut(table)
            .unwrap()
            .add_columns(TabularInput::columns([("F", vec![1.5.into()])]))
            .unwrap();

        let doc = arena.data_entry(root).unwrap();
        assert_eq!(doc["type"], "collection");
        let inner = &doc["collection"]["anova_assumptions"];
        assert_eq!(inner["title"], "Assumption Checks");
        let levene = &inner["collection"]["anova_assumptions_levene"];
        assert_eq!(levene["type"], "table");
        assert_eq!(levene["name"], "anova_assumptions_levene");
        assert_eq!(levene["data"][0]["F"], 1.5);
    }

    #[test]
    fn test_destroy_all() {
        let (mut arena, root, _, table) = tree();
        assert!(arena.plot_mut(table).is_none());
        assert_eq!(arena.roots(), vec![root]);

        assert_eq!(arena.destroy_all(), 3);
        assert!(arena.is_empty());
        assert!(arena.get(table).is_err());
    }
}
