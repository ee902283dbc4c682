use fxhash::FxHashMap;

use super::*;

/// Bridge detection for undirected multigraphs
pub trait Bridges: IncidenceList {
    /// Returns all bridges, i.e. edges whose removal disconnects their two endpoints.
    ///
    /// Parallel edges are never bridges (each is on a cycle with its twin), neither are self-loops.
    fn compute_bridges(&self) -> Vec<EdgeId>;

    /// Returns *true* if the edge with id `id` is a bridge.
    /// ** Panics if the edge does not exist **
    fn is_bridge(&self, id: EdgeId) -> bool {
        assert!(self.has_edge_id(id), "edge {id} is not part of the graph");
        self.compute_bridges().contains(&id)
    }
}

impl<G: IncidenceList> Bridges for G {
    fn compute_bridges(&self) -> Vec<EdgeId> {
        BridgeSearch::new(self).compute()
    }
}

struct BridgeSearch<'a, G>
where
    G: IncidenceList,
{
    graph: &'a G,
    nodes_info: FxHashMap<VertexId, NodeInfo>,
    time: u32,
    bridges: Vec<EdgeId>,
}

impl<'a, G> BridgeSearch<'a, G>
where
    G: IncidenceList,
{
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            nodes_info: FxHashMap::default(),
            time: 0,
            bridges: Vec::new(),
        }
    }

    fn compute(mut self) -> Vec<EdgeId> {
        for u in self.graph.vertices() {
            if self.nodes_info.contains_key(&u) {
                continue;
            }

            self.compute_node(None, u);
        }

        self.bridges
    }

    /// Tracks the *edge* we arrived by instead of the parent vertex so that a parallel edge back
    /// to the parent still counts as a back-edge.
    fn compute_node(&mut self, parent_edge: Option<EdgeId>, u: VertexId) -> u32 {
        self.time += 1;
        let discovery = self.time;
        let mut low = discovery;
        self.nodes_info.insert(u, NodeInfo { discovery });

        let graph = self.graph;
        for e in graph.edges_of(u) {
            if Some(e.id) == parent_edge || e.is_loop() {
                continue;
            }

            let v = e.other(u);
            match self.nodes_info.get(&v) {
                None => {
                    let low_v = self.compute_node(Some(e.id), v);
                    low = low.min(low_v);

                    if low_v > discovery {
                        self.bridges.push(e.id);
                    }
                }
                Some(info_v) => low = low.min(info_v.discovery),
            }
        }

        low
    }
}

#[derive(Clone, Copy)]
struct NodeInfo {
    discovery: u32,
}
