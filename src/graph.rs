//! Minimal graph adapter trait.
//!
//! The similarity engine is generic over this trait. [`crate::Subgraph`] is the main
//! implementor; anything else that can list neighbors by dense index can be scored too.

pub trait Graph {
    fn node_count(&self) -> usize;

    /// Neighbors of `node`.
    ///
    /// Implementations should not report `node` itself; the engine filters self-loops and
    /// duplicates anyway, so order and uniqueness are not required.
    fn neighbors(&self, node: usize) -> Vec<usize>;

    /// Write the neighbors of `node` into `out`, replacing its contents.
    ///
    /// Override this when neighbors can be produced without a fresh allocation; the engine
    /// reuses one buffer across all candidates.
    fn neighbors_into(&self, node: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(self.neighbors(node));
    }

    fn out_degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }
}

#[cfg(feature = "petgraph")]
impl<N, E, Ty, Ix> Graph for petgraph::Graph<N, E, Ty, Ix>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn node_count(&self) -> usize {
        self.node_count()
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.neighbors(petgraph::graph::NodeIndex::new(node)).map(|idx| idx.index()).collect()
    }
}

#[cfg(all(test, feature = "petgraph"))]
mod tests {
    use super::Graph;

    #[test]
    fn petgraph_undirected_neighbors() {
        let mut g = petgraph::Graph::<(), (), petgraph::Undirected>::new_undirected();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());

        let mut nbrs = Graph::neighbors(&g, 1);
        nbrs.sort_unstable();
        assert_eq!(nbrs, vec![0, 2]);
        assert_eq!(Graph::node_count(&g), 3);
    }
}
