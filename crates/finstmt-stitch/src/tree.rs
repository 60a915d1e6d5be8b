//! Presentation tree.
//!
//! Filers disclose rows as a flat list with indentation levels. The tree is rebuilt
//! with a stack of open ancestors: a row becomes the child of the most recent row
//! with a strictly lower level, and rows without one are roots. Nodes live in an
//! arena and refer to each other by index; a concept index makes lookups constant time.

use std::collections::HashMap;

use finstmt_core::{Concept, StatementRow};

/// Index of a node in its tree.
pub type NodeId = usize;

/// A tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    /// Concept of the row.
    pub concept: Concept,
    /// Level as disclosed.
    pub level: u32,
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Children in order.
    pub children: Vec<NodeId>,
    /// Payload.
    pub data: T,
}

/// Arena-backed ordered tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationTree<T> {
    nodes: Vec<Node<T>>,
    roots: Vec<NodeId>,
    /// First node of each concept.
    index: HashMap<Concept, NodeId>,
}

impl<T> Default for PresentationTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl PresentationTree<usize> {
    /// Rebuilds the tree of a row list. Each node's payload is its row index.
    ///
    /// A concept listed more than once keeps its first row; rows nested under a
    /// repeated row attach to that first occurrence.
    #[must_use]
    pub fn from_rows(rows: &[StatementRow]) -> Self {
        let mut tree = Self::default();
        // (level, node) of every open ancestor.
        let mut stack: Vec<(u32, NodeId)> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            while stack.last().is_some_and(|(level, _)| *level >= row.level) {
                stack.pop();
            }
            let parent = stack.last().map(|(_, id)| *id);

            let id = match tree.find(&row.concept) {
                Some(existing) => existing,
                None => tree.insert(row.concept.clone(), row.level, parent, None, index),
            };
            stack.push((row.level, id));
        }
        tree
    }
}

impl<T> PresentationTree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node under `parent` (or as a root), after sibling `after` when given,
    /// else as the last child.
    pub fn insert(
        &mut self,
        concept: Concept,
        level: u32,
        parent: Option<NodeId>,
        after: Option<NodeId>,
        data: T,
    ) -> NodeId {
        let id = self.nodes.len();
        self.index.entry(concept.clone()).or_insert(id);
        self.nodes.push(Node {
            concept,
            level,
            parent,
            children: Vec::new(),
            data,
        });

        let siblings = match parent {
            Some(p) => &mut self.nodes[p].children,
            None => &mut self.roots,
        };
        let position = after
            .and_then(|a| siblings.iter().position(|s| *s == a))
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(position, id);
        id
    }

    /// Finds the first node of a concept.
    #[must_use]
    pub fn find(&self, concept: &Concept) -> Option<NodeId> {
        self.index.get(concept).copied()
    }

    /// Returns a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    /// Returns the root nodes in order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns a node's children in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Returns a node's parent.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Returns the concept of a node's parent.
    #[must_use]
    pub fn parent_concept(&self, id: NodeId) -> Option<&Concept> {
        self.parent(id).map(|p| &self.nodes[p].concept)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reorders the roots, or a node's children, by a stable key.
    pub fn sort_siblings_by_key<K, F>(&mut self, parent: Option<NodeId>, mut key: F)
    where
        K: Ord,
        F: FnMut(&Node<T>) -> K,
    {
        let mut siblings = match parent {
            Some(p) => std::mem::take(&mut self.nodes[p].children),
            None => std::mem::take(&mut self.roots),
        };
        siblings.sort_by_key(|id| key(&self.nodes[*id]));
        match parent {
            Some(p) => self.nodes[p].children = siblings,
            None => self.roots = siblings,
        }
    }

    /// Returns every node in depth-first pre-order.
    #[must_use]
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, level: u32) -> StatementRow {
        StatementRow {
            concept: Concept::new("us-gaap", name),
            display_label: name.to_string(),
            level,
            is_abstract: false,
            is_total: false,
            unit: None,
            values: Vec::new(),
        }
    }

    fn names<T>(tree: &PresentationTree<T>, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| tree.node(*id).concept.name().to_string()).collect()
    }

    #[test]
    fn test_stack_reconstruction() {
        let rows = [
            row("Revenues", 0),
            row("OperatingExpenses", 0),
            row("ResearchAndDevelopmentExpense", 1),
            row("SellingGeneralAndAdministrativeExpense", 1),
            row("Detail", 3),
            row("OperatingIncomeLoss", 0),
        ];
        let tree = PresentationTree::from_rows(&rows);

        assert_eq!(names(&tree, tree.roots()), ["Revenues", "OperatingExpenses", "OperatingIncomeLoss"]);
        let opex = tree.find(&Concept::new("us-gaap", "OperatingExpenses")).unwrap();
        assert_eq!(
            names(&tree, tree.children(opex)),
            ["ResearchAndDevelopmentExpense", "SellingGeneralAndAdministrativeExpense"]
        );
        let detail = tree.find(&Concept::new("us-gaap", "Detail")).unwrap();
        assert_eq!(tree.parent_concept(detail).unwrap().name(), "SellingGeneralAndAdministrativeExpense");
    }

    #[test]
    fn test_non_increasing_sibling_levels() {
        // A level-2 row followed by a level-1 row: both children of the level-0 row.
        let rows = [row("A", 0), row("B", 2), row("C", 1)];
        let tree = PresentationTree::from_rows(&rows);
        let a = tree.find(&Concept::new("us-gaap", "A")).unwrap();
        assert_eq!(names(&tree, tree.children(a)), ["B", "C"]);
    }

    #[test]
    fn test_depth_first_reproduces_row_order() {
        let rows = [row("A", 1), row("B", 2), row("C", 3), row("D", 2), row("E", 1)];
        let tree = PresentationTree::from_rows(&rows);
        let order: Vec<usize> = tree.depth_first().iter().map(|id| tree.node(*id).data).collect();
        assert_eq!(order, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_insert_after_sibling() {
        let rows = [row("P", 0), row("A", 1), row("C", 1)];
        let mut tree = PresentationTree::from_rows(&rows);
        let p = tree.find(&Concept::new("us-gaap", "P")).unwrap();
        let a = tree.find(&Concept::new("us-gaap", "A")).unwrap();
        tree.insert(Concept::new("us-gaap", "B"), 1, Some(p), Some(a), 9);
        tree.insert(Concept::new("us-gaap", "Z"), 1, Some(p), None, 10);
        assert_eq!(names(&tree, tree.children(p)), ["A", "B", "C", "Z"]);
    }

    #[test]
    fn test_find_returns_first_node_of_concept() {
        let mut tree = PresentationTree::new();
        let first = tree.insert(Concept::new("us-gaap", "A"), 0, None, None, ());
        tree.insert(Concept::new("us-gaap", "B"), 0, None, None, ());
        tree.insert(Concept::new("us-gaap", "A"), 1, Some(first), None, ());
        assert_eq!(tree.find(&Concept::new("us-gaap", "A")), Some(first));
        assert_eq!(tree.find(&Concept::new("us-gaap", "B")), Some(1));
        assert_eq!(tree.find(&Concept::new("us-gaap", "C")), None);
    }

    #[test]
    fn test_find_on_wide_tree() {
        let rows: Vec<StatementRow> = (0..5_000u32).map(|i| row(&format!("Line{i}"), i % 3)).collect();
        let tree = PresentationTree::from_rows(&rows);
        assert_eq!(tree.len(), rows.len());
        for (index, row) in rows.iter().enumerate() {
            let id = tree.find(&row.concept).unwrap();
            assert_eq!(tree.node(id).data, index);
        }
    }

    #[test]
    fn test_sort_siblings_is_stable() {
        let rows = [row("P", 0), row("X", 1), row("Y", 1), row("Z", 1)];
        let mut tree = PresentationTree::from_rows(&rows);
        let p = tree.find(&Concept::new("us-gaap", "P")).unwrap();
        tree.sort_siblings_by_key(Some(p), |n| u32::from(n.concept.name() != "Z"));
        assert_eq!(names(&tree, tree.children(p)), ["Z", "X", "Y"]);
    }
}
