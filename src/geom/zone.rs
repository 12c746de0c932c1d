//! Decide which pseudorapidity zones a hit belongs to.
//!
//! Each `(type, station, ring)` combination carries a fixed set of
//! `(zone, theta_min, theta_max)` windows; a hit belongs to zone `z` iff its
//! `emtf_theta` falls within the window recorded for `z`. A hit may belong to
//! more than one zone. Zone 6 is the OMTF-exclusive overlap zone; zones 0-5
//! are endcap zones.

use super::DetType;

pub const NZONES: usize = 7;

type Window = (u8, i16, i16); // (zone, theta_min, theta_max) inclusive

/// Static windows for a given `(type, station, ring)`. Order does not matter;
/// `find_emtf_zones` scans all of them and returns matches in zone order.
fn windows(det: DetType, station: u8, ring: u8) -> &'static [Window] {
    use DetType::*;
    match (det, station, ring) {
        (Csc, 1, 4) => &[(0, 4, 17), (1, 16, 25), (2, 24, 36), (3, 34, 43), (4, 41, 53)], // ME1/1a
        (Csc, 1, 1) => &[(0, 4, 17), (1, 16, 25), (2, 24, 36), (3, 34, 43), (4, 41, 53)], // ME1/1b
        (Csc, 1, 2) => &[(4, 46, 54), (5, 52, 88), (6, 80, 88)], // ME1/2
        (Csc, 1, 3) => &[(6, 98, 125)], // ME1/3
        (Csc, 2, 1) => &[(0, 4, 17), (1, 16, 25), (2, 24, 36), (3, 34, 43), (4, 41, 49)], // ME2/1
        (Csc, 2, 2) => &[(5, 53, 90), (6, 83, 111)], // ME2/2
        (Csc, 3, 1) => &[(0, 4, 17), (1, 16, 25), (2, 24, 36), (3, 34, 40)], // ME3/1
        (Csc, 3, 2) => &[(4, 44, 54), (5, 52, 90), (6, 83, 96)], // ME3/2
        (Csc, 4, 1) => &[(0, 4, 17), (1, 16, 25), (2, 24, 35)], // ME4/1
        (Csc, 4, 2) => &[(3, 38, 43), (4, 41, 54), (5, 52, 90)], // ME4/2
        (Rpc, 1, 2) => &[(5, 52, 84)], // RE1/2
        (Rpc, 1, 3) => &[(6, 100, 120)], // RE1/3
        (Rpc, 2, 2) => &[(5, 56, 88)], // RE2/2
        (Rpc, 2, 3) => &[(6, 88, 112)], // RE2/3
        (Rpc, 3, 1) => &[(0, 4, 20), (1, 20, 24), (2, 24, 32)], // RE3/1
        (Rpc, 3, 2) => &[(3, 40, 40), (4, 40, 52), (5, 48, 84)], // RE3/2
        (Rpc, 3, 3) => &[(3, 40, 40), (4, 40, 52), (5, 48, 84), (6, 80, 92)], // RE3/3
        (Rpc, 4, 1) => &[(0, 8, 16), (1, 16, 28), (2, 24, 28)], // RE4/1
        (Rpc, 4, 2) => &[(3, 36, 44), (4, 44, 52), (5, 52, 84)], // RE4/2
        (Rpc, 4, 3) => &[(3, 36, 44), (4, 44, 52), (5, 52, 84)], // RE4/3
        (Gem, 1, 1) => &[(1, 16, 26), (2, 24, 37), (3, 35, 45), (4, 40, 52)], // GE1/1
        (Gem, 2, 1) => &[(0, 7, 19), (1, 18, 24), (2, 23, 36), (3, 34, 45), (4, 40, 46)], // GE2/1
        (Me0, 1, 1) => &[(0, 4, 17), (1, 16, 23)], // ME0
        (Dt, 1, 1) => &[(6, 92, 130)], // MB1
        (Dt, 2, 1) => &[(6, 108, 138)], // MB2
        (Dt, 3, 1) => &[(6, 126, 138)], // MB3
        _ => &[],
    }
}

/// Zones (in increasing order) that a hit with the given detector coordinates
/// and `emtf_theta` belongs to.
pub fn find_emtf_zones(det: DetType, station: u8, ring: u8, emtf_theta: i32) -> Vec<u8> {
    windows(det, station, ring)
        .iter()
        .filter(|&&(_, lo, hi)| (lo as i32) <= emtf_theta && emtf_theta <= (hi as i32))
        .map(|&(zone, _, _)| zone)
        .collect()
}

/// The raw `(zone, theta_min, theta_max)` windows for a `(type, station,
/// ring)` combination, for dumping the table rather than testing one hit.
pub fn zone_windows(det: DetType, station: u8, ring: u8) -> &'static [(u8, i16, i16)] {
    windows(det, station, ring)
}
