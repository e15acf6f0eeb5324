use itertools::Itertools;
use log::error;

use crate::entities::{Block, SiteLayout, Structure};
use crate::util::FPA;
//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

pub fn placements_match_occupied_set(layout: &SiteLayout) -> bool {
    let occupied = layout.occupied();
    if occupied.len() != layout.n_placed() {
        error!(
            "occupied set holds {} footprints, but {} structures are placed",
            occupied.len(),
            layout.n_placed()
        );
        return false;
    }
    layout.placements().all(|(key, candidate)| {
        occupied.get(key).is_some_and(|fp| {
            FPA(fp.center.0) == FPA(candidate.center.0)
                && FPA(fp.center.1) == FPA(candidate.center.1)
        })
    })
}

/// Every footprint lies within the buildable part of the land
pub fn footprints_within_land(layout: &SiteLayout) -> bool {
    layout
        .occupied()
        .iter()
        .all(|(_, fp)| fp.shape.is_within(&layout.buildable))
}

/// No two footprints overlap
pub fn footprints_disjoint(layout: &SiteLayout) -> bool {
    let footprints = layout.occupied().iter().collect_vec();
    footprints
        .iter()
        .tuple_combinations()
        .all(|((k1, fp1), (k2, fp2))| {
            let overlap = fp1.shape.overlaps(&fp2.shape);
            if overlap {
                error!("footprints of {k1:?} and {k2:?} overlap");
            }
            !overlap
        })
}

/// The blocks of a structure are exactly the ones derived from its center, rotation and size
pub fn blocks_match_parent(structure: &Structure, block_dims: (f64, f64)) -> bool {
    let Ok(expected) = Block::grid(&structure.candidate(), block_dims) else {
        return false;
    };
    expected.len() == structure.blocks.len()
        && expected.iter().zip(structure.blocks.iter()).all(|(e, b)| {
            e.index == b.index
                && e.corners
                    .iter()
                    .zip(b.corners.iter())
                    .all(|(c1, c2)| FPA(c1.0) == FPA(c2.0) && FPA(c1.1) == FPA(c2.1))
        })
}
