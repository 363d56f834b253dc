use crate::board::{Action, Board, ACTIONS};

/// Handle into the search tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) u32);

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) board: Board,
    pub(crate) cost: u32,
    pub(crate) heuristic: u32,
    /// The node this one was generated from and the move that produced it.
    /// `None` for the root.
    parent: Option<(NodeId, Action)>,
    /// `None` until the first `expand` call. The flag has to be separate
    /// from emptiness so a board with no cached children is still only
    /// generated once.
    children: Option<Vec<NodeId>>,
}

/// Arena owning every state generated during one search run.
///
/// Parent links are handles instead of references, so the tree can grow
/// without ownership cycles and any root-to-goal path stays walkable until
/// the run ends.
#[derive(Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn new(root: Board) -> Tree {
        let mut tree = Tree { nodes: Vec::new() };
        tree.alloc(root, 0, None);
        tree
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, board: Board, cost: u32, parent: Option<(NodeId, Action)>) -> NodeId {
        // the heuristic is computed exactly once per state, here
        let heuristic = board.manhattan();
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { board, cost, heuristic, parent, children: None });
        id
    }

    /// Children of `id` in up, down, left, right order, skipping moves
    /// blocked by the edge. Generated on the first call, cached afterwards.
    pub(crate) fn expand(&mut self, id: NodeId) -> Vec<NodeId> {
        if let Some(ref children) = self.node(id).children {
            return children.clone();
        }

        let mut children = Vec::with_capacity(4);
        for &action in &ACTIONS {
            if let Some(board) = self.node(id).board.apply(action) {
                let cost = self.node(id).cost + 1;
                children.push(self.alloc(board, cost, Some((id, action))));
            }
        }
        self.nodes[id.0 as usize].children = Some(children.clone());
        children
    }

    /// Walks parent handles from `goal` back to the root, returning the
    /// actions in root-to-goal order.
    pub(crate) fn path_from_root(&self, goal: NodeId) -> Vec<Action> {
        let mut path = Vec::new();
        let mut cur = goal;
        while let Some((parent, action)) = self.node(cur).parent {
            path.push(action);
            cur = parent;
        }
        path.reverse();
        path
    }
}
