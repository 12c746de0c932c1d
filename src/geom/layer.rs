//! Decide the logical layer number for a hit.
//!
//! 16 logical layers: 0-4 CSC stations (ME1/1 rings 1 and 4 collapse into
//! layer 0, ME1/2-3 into layer 1), 5-8 RPC, 9-10 GEM, 11 ME0, 12-15 DT.

use super::DetType;

pub const NLAYERS: usize = 16;

/// `(type, station, ring) -> layer`. Returns `None` for a combination that
/// does not correspond to any logical layer (an out-of-range index is a
/// configuration-fatal condition for the caller, not a silent default).
pub fn find_emtf_layer(det: DetType, station: u8, ring: u8) -> Option<u8> {
    use DetType::*;
    let layer = match (det, station, ring) {
        (Csc, 1, 4) => 0, // ME1/1a
        (Csc, 1, 1) => 0, // ME1/1b
        (Csc, 1, 2) => 1, // ME1/2
        (Csc, 1, 3) => 1, // ME1/3
        (Csc, 2, 1) => 2, // ME2/1
        (Csc, 2, 2) => 2, // ME2/2
        (Csc, 3, 1) => 3, // ME3/1
        (Csc, 3, 2) => 3, // ME3/2
        (Csc, 4, 1) => 4, // ME4/1
        (Csc, 4, 2) => 4, // ME4/2
        (Rpc, 1, 2) => 5, // RE1/2
        (Rpc, 1, 3) => 5, // RE1/3
        (Rpc, 2, 2) => 6, // RE2/2
        (Rpc, 2, 3) => 6, // RE2/3
        (Rpc, 3, 1) => 7, // RE3/1
        (Rpc, 3, 2) => 7, // RE3/2
        (Rpc, 3, 3) => 7, // RE3/3
        (Rpc, 4, 1) => 8, // RE4/1
        (Rpc, 4, 2) => 8, // RE4/2
        (Rpc, 4, 3) => 8, // RE4/3
        (Gem, 1, 1) => 9, // GE1/1
        (Gem, 2, 1) => 10, // GE2/1
        (Me0, 1, 1) => 11, // ME0
        (Dt, 1, 1) => 12, // MB1
        (Dt, 2, 1) => 13, // MB2
        (Dt, 3, 1) => 14, // MB3
        (Dt, 4, 1) => 15, // MB4
        _ => return None,
    };
    Some(layer)
}

/// `true` for layer indices that carry CSC hits (layers 0-4), used by the
/// slimming/recognition stages to restrict theta-median computation to CSC.
pub fn is_csc_layer(layer: u8) -> bool {
    layer <= 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn me11_collapses_rings_1_and_4() {
        assert_eq!(find_emtf_layer(DetType::Csc, 1, 1), Some(0));
        assert_eq!(find_emtf_layer(DetType::Csc, 1, 4), Some(0));
    }

    #[test]
    fn me0_is_layer_11() {
        assert_eq!(find_emtf_layer(DetType::Me0, 1, 1), Some(11));
    }

    #[test]
    fn dt_stations_are_12_through_15() {
        assert_eq!(find_emtf_layer(DetType::Dt, 1, 1), Some(12));
        assert_eq!(find_emtf_layer(DetType::Dt, 4, 1), Some(15));
    }

    #[test]
    fn unknown_combination_is_none() {
        assert_eq!(find_emtf_layer(DetType::Csc, 4, 4), None);
    }
}
