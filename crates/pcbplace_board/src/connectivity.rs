//! Ratsnest connectivity: unrouted pad-to-pad connections per net.
//!
//! The placer never walks nets itself. It asks a [`Connectivity`]
//! implementation how many ratsnest edges tie a footprint to the already
//! anchored part of the board, and which anchored pad is nearest to a given
//! point on a given net.

use crate::board::Board;
use crate::footprint::PlacementStatus;
use crate::geom::{Point, Rect};
use crate::ids::{FootprintId, NetId};
use std::collections::BTreeMap;

/// A pad found by a connectivity query.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PadAnchor {
    /// Owning footprint.
    pub footprint: FootprintId,
    /// Index into the footprint's pad list.
    pub pad: usize,
    /// Pad centre in board coordinates.
    pub position: Point,
}

/// Connectivity queries consumed by the placer.
pub trait Connectivity {
    /// Refreshes cached pad positions and status of one footprint.
    fn update(&mut self, board: &Board, footprint: FootprintId);

    /// Rebuilds the ratsnest for the whole board.
    fn recalculate_ratsnest(&mut self, board: &Board);

    /// Number of ratsnest edges joining `footprint` to an anchored footprint.
    fn edge_count(&self, footprint: FootprintId) -> usize;

    /// Nearest pad on `net` to `at`, belonging to an anchored footprint other
    /// than `exclude` whose anchor lies inside `bounds`.
    fn nearest_pad(
        &self,
        net: NetId,
        at: Point,
        exclude: FootprintId,
        bounds: &Rect,
    ) -> Option<PadAnchor>;
}

#[derive(Clone, Copy, Debug)]
struct PadNode {
    footprint: FootprintId,
    pad: usize,
    position: Point,
    anchor: Point,
    anchored: bool,
}

impl PadNode {
    fn to_anchor(self) -> PadAnchor {
        PadAnchor {
            footprint: self.footprint,
            pad: self.pad,
            position: self.position,
        }
    }
}

/// Minimum-spanning-tree ratsnest over every pad of every net.
///
/// A footprint counts as anchored once its status is not
/// [`PlacementStatus::Pending`].
#[derive(Debug, Default)]
pub struct RatsnestConnectivity {
    nets: BTreeMap<NetId, Vec<PadNode>>,
    edges: BTreeMap<FootprintId, usize>,
}

impl RatsnestConnectivity {
    /// Builds the pad index and ratsnest for a board.
    pub fn new(board: &Board) -> Self {
        let mut conn = Self::default();
        conn.recalculate_ratsnest(board);
        conn
    }

    fn index_pads(&mut self, board: &Board) {
        self.nets.clear();
        for id in board.footprint_ids() {
            let fp = board.footprint(id);
            let anchored = fp.status != PlacementStatus::Pending;
            for (i, pad) in fp.pads.iter().enumerate() {
                let Some(net) = pad.net else { continue };
                self.nets.entry(net).or_default().push(PadNode {
                    footprint: id,
                    pad: i,
                    position: fp.pad_position(pad),
                    anchor: fp.position,
                    anchored,
                });
            }
        }
    }

    /// Prim's algorithm on the complete graph of one net's pads.
    ///
    /// Returns edges as index pairs into `nodes`. Ties keep the lower index.
    fn spanning_tree(nodes: &[PadNode]) -> Vec<(usize, usize)> {
        let n = nodes.len();
        if n < 2 {
            return Vec::new();
        }
        let mut in_tree = vec![false; n];
        let mut best = vec![i128::MAX; n];
        let mut parent = vec![0usize; n];
        let mut edges = Vec::with_capacity(n - 1);
        in_tree[0] = true;
        for j in 1..n {
            best[j] = nodes[0].position.distance_squared(nodes[j].position);
        }
        for _ in 1..n {
            let mut next = None;
            for j in 0..n {
                if !in_tree[j] && next.map_or(true, |k: usize| best[j] < best[k]) {
                    next = Some(j);
                }
            }
            let Some(k) = next else { break };
            in_tree[k] = true;
            edges.push((parent[k], k));
            for j in 0..n {
                if !in_tree[j] {
                    let d = nodes[k].position.distance_squared(nodes[j].position);
                    if d < best[j] {
                        best[j] = d;
                        parent[j] = k;
                    }
                }
            }
        }
        edges
    }
}

impl Connectivity for RatsnestConnectivity {
    fn update(&mut self, board: &Board, footprint: FootprintId) {
        let fp = board.footprint(footprint);
        let anchored = fp.status != PlacementStatus::Pending;
        for nodes in self.nets.values_mut() {
            for node in nodes.iter_mut().filter(|n| n.footprint == footprint) {
                node.position = fp.pad_position(&fp.pads[node.pad]);
                node.anchor = fp.position;
                node.anchored = anchored;
            }
        }
    }

    fn recalculate_ratsnest(&mut self, board: &Board) {
        self.index_pads(board);
        self.edges.clear();
        for nodes in self.nets.values() {
            for (a, b) in Self::spanning_tree(nodes) {
                let (na, nb) = (nodes[a], nodes[b]);
                if na.footprint == nb.footprint {
                    continue;
                }
                if nb.anchored {
                    *self.edges.entry(na.footprint).or_default() += 1;
                }
                if na.anchored {
                    *self.edges.entry(nb.footprint).or_default() += 1;
                }
            }
        }
        tracing::trace!(nets = self.nets.len(), "ratsnest rebuilt");
    }

    fn edge_count(&self, footprint: FootprintId) -> usize {
        self.edges.get(&footprint).copied().unwrap_or(0)
    }

    fn nearest_pad(
        &self,
        net: NetId,
        at: Point,
        exclude: FootprintId,
        bounds: &Rect,
    ) -> Option<PadAnchor> {
        let nodes = self.nets.get(&net)?;
        let mut nearest: Option<(i128, PadNode)> = None;
        for node in nodes {
            if node.footprint == exclude || !node.anchored || !bounds.contains(node.anchor) {
                continue;
            }
            let d = node.position.distance_squared(at);
            if nearest.map_or(true, |(best, _)| d < best) {
                nearest = Some((d, *node));
            }
        }
        nearest.map(|(_, node)| node.to_anchor())
    }
}
