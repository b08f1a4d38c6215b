use std::collections::VecDeque;

use crate::Symbol;

pub type NodeId = usize;

/// Whether a node came from a terminal match or a non-terminal expansion.
///
/// The tag is fixed at construction so that display and traversal never
/// have to consult the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    NonTerminal,
    Terminal,
}

#[derive(Debug)]
pub struct ParseTreeNode<'sid> {
    pub symbol: &'sid str,
    pub kind: NodeKind,
    /// The matched lexeme; empty until a terminal node is matched, always
    /// empty on non-terminal nodes.
    pub lexeme: String,
    pub children: Vec<NodeId>,
}

impl ParseTreeNode<'_> {
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal)
    }
}

/// The concrete parse tree, stored as an arena of nodes.
///
/// The root is always node 0 and carries the grammar's start symbol.
/// Nodes exclusively own their children; the tree is read-only after the
/// parse that built it.
#[derive(Debug)]
pub struct ParseTree<'sid> {
    nodes: Vec<ParseTreeNode<'sid>>,
}

impl<'sid> ParseTree<'sid> {
    pub(crate) fn new(start: Symbol<'sid>) -> Self {
        Self {
            nodes: vec![ParseTreeNode {
                symbol: start.id,
                kind: NodeKind::NonTerminal,
                lexeme: String::default(),
                children: vec![],
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &ParseTreeNode<'sid> {
        &self.nodes[id]
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, symbol: Symbol<'sid>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(ParseTreeNode {
            symbol: symbol.id,
            kind: if symbol.is_terminal() {
                NodeKind::Terminal
            } else {
                NodeKind::NonTerminal
            },
            lexeme: String::default(),
            children: vec![],
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub(crate) fn set_lexeme(&mut self, id: NodeId, lexeme: &str) {
        self.nodes[id].lexeme = lexeme.to_string();
    }

    /// Iterate node ids breadth-first from the root.
    pub fn iter_breadth_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut queue = VecDeque::from([self.root()]);

        std::iter::from_fn(move || {
            let id = queue.pop_front()?;
            queue.extend(self.node(id).children.iter().copied());
            Some(id)
        })
    }

    /// The terminal lexemes of the whole tree, in match order.
    pub fn leaves(&self) -> Vec<&str> {
        self.subtree_leaves(self.root())
    }

    /// Depth-first collection of the terminal lexemes under a node;
    /// ε-expanded nodes contribute nothing.
    pub fn subtree_leaves(&self, id: NodeId) -> Vec<&str> {
        let mut leaves = vec![];
        self.collect_leaves(id, &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, id: NodeId, leaves: &mut Vec<&'a str>) {
        let node = self.node(id);

        if node.is_terminal() {
            leaves.push(node.lexeme.as_str());
            return;
        }

        for child in &node.children {
            self.collect_leaves(*child, leaves);
        }
    }

    fn fmt_node(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
    ) -> std::fmt::Result {
        let node = self.node(id);

        let label = if node.is_terminal() {
            node.lexeme.as_str()
        } else {
            node.symbol
        };
        writeln!(f, "{:indent$}{}", "", label, indent = depth * 2)?;

        for child in &node.children {
            self.fmt_node(f, *child, depth + 1)?;
        }

        Ok(())
    }
}

impl std::fmt::Display for ParseTree<'_> {
    /// Renders the tree as an indented outline, two spaces per depth,
    /// terminal nodes showing their matched lexeme.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(f, self.root(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeKind, ParseTree};
    use crate::Symbol;

    fn sample() -> ParseTree<'static> {
        // E
        // ├── x
        // └── R
        //     ├── +
        //     ├── y
        //     └── R        (ε-expanded)
        let mut tree = ParseTree::new(Symbol::nterm("E"));

        let x = tree.push_child(tree.root(), Symbol::kind_term("identifier"));
        tree.set_lexeme(x, "x");

        let r = tree.push_child(tree.root(), Symbol::nterm("R"));
        let plus = tree.push_child(r, Symbol::term("+"));
        tree.set_lexeme(plus, "+");
        let y = tree.push_child(r, Symbol::kind_term("identifier"));
        tree.set_lexeme(y, "y");
        tree.push_child(r, Symbol::nterm("R"));

        tree
    }

    #[test]
    fn test_001_node_tags() {
        let tree = sample();
        assert_eq!(tree.node(tree.root()).kind, NodeKind::NonTerminal);
        assert_eq!(tree.node(1).kind, NodeKind::Terminal);
    }

    #[test]
    fn test_002_leaves_in_match_order() {
        let tree = sample();
        assert_eq!(tree.leaves(), vec!["x", "+", "y"]);
    }

    #[test]
    fn test_003_breadth_first_order() {
        let tree = sample();
        let symbols: Vec<&str> = tree
            .iter_breadth_first()
            .map(|id| tree.node(id).symbol)
            .collect();
        assert_eq!(
            symbols,
            vec!["E", "identifier", "R", "+", "identifier", "R"]
        );
    }

    #[test]
    fn test_004_outline_display() {
        let rendered = sample().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "E");
        assert_eq!(lines[1], "  x");
        assert_eq!(lines[2], "  R");
        assert_eq!(lines[3], "    +");
    }
}
