//! Picks the next footprint to place.
//!
//! Pending footprints are first ordered by complexity (bounding box area
//! times pad count), then re-ordered by area times the number of ratsnest
//! edges tying them to anchored footprints. Both sorts are stable, so equal
//! keys keep the complexity order.

use pcbplace_board::{Board, Connectivity, FootprintId};

/// A pending footprint with its ranking keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ranked {
    /// The footprint.
    pub footprint: FootprintId,
    /// Bounding box area in mm².
    pub area: f64,
    /// `area × pad count`.
    pub complexity: f64,
    /// Ratsnest edges to anchored footprints.
    pub priority: usize,
}

/// Ranks every pending footprint, best candidate first.
///
/// Rebuilds the ratsnest on `connectivity` before reading edge counts.
pub fn rank(board: &Board, connectivity: &mut dyn Connectivity) -> Vec<Ranked> {
    let mut list: Vec<Ranked> = board
        .footprint_ids()
        .filter(|id| board.footprint(*id).needs_placement())
        .map(|id| {
            let fp = board.footprint(id);
            let area = fp.area();
            Ranked {
                footprint: id,
                area,
                complexity: area * fp.pad_count() as f64,
                priority: 0,
            }
        })
        .collect();
    list.sort_by(|a, b| b.complexity.total_cmp(&a.complexity));

    connectivity.recalculate_ratsnest(board);
    for entry in &mut list {
        entry.priority = connectivity.edge_count(entry.footprint);
    }

    list.sort_by(|a, b| {
        let ka = a.area * a.priority as f64;
        let kb = b.area * b.priority as f64;
        kb.total_cmp(&ka)
    });
    list
}

/// Returns the next footprint to place, or `None` when nothing is pending.
///
/// The best-ranked footprint with at least one ratsnest edge wins; without
/// any, the most complex pending footprint is taken.
pub fn pick_next(board: &Board, connectivity: &mut dyn Connectivity) -> Option<FootprintId> {
    let ranked = rank(board, connectivity);
    let pick = ranked
        .iter()
        .find(|r| r.priority > 0)
        .or_else(|| ranked.first())
        .map(|r| r.footprint);
    if let Some(id) = pick {
        tracing::debug!(
            reference = %board.footprint(id).reference,
            pending = ranked.len(),
            "picked footprint"
        );
    }
    pick
}
