//! Ghost busting: of tracks sharing a key inner-layer hit, keep only the
//! highest-priority one.
//!
//! Grounded on `GhostBusting.run` in the original source. The source loop
//! references `road.hits`/`road_to_check.hits` inside a track-level
//! iteration — almost certainly a bug, since the loop never has a `road` in
//! scope, only `track`/`track_to_check`. Implemented here with
//! `track`/`track_to_check` throughout.

use crate::track::Track;

/// Sort by `(zone, chi2)` descending; keep a track iff no already-kept track
/// shares a `(layer, emtf_phi)` on layers {0,1,11,12,13}.
pub fn bust(mut tracks: Vec<Track>) -> Vec<Track> {
    tracks.sort_by(|a, b| (b.zone, b.chi2).partial_cmp(&(a.zone, a.chi2)).unwrap_or(std::cmp::Ordering::Equal));

    let mut kept: Vec<Track> = Vec::new();
    for track in tracks {
        let ids = track.key_hit_identities();
        let is_ghost = kept.iter().any(|k| k.key_hit_identities().iter().any(|id| ids.contains(id)));
        if !is_ghost {
            kept.push(track);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::DetType;
    use crate::hit::ProcessedHit;
    use crate::track::TrackId;

    fn hit(layer: u8, phi: i32) -> ProcessedHit {
        ProcessedHit {
            det: DetType::Csc,
            station: 1,
            ring: 1,
            endsec: 0,
            fr: 1,
            bx: 0,
            layer,
            zones: vec![],
            emtf_phi: phi,
            emtf_theta: 40,
            emtf_bend: 0,
            emtf_quality: 0,
            emtf_time: 0,
            old_emtf_phi: phi,
            old_emtf_bend: 0,
            sim_tp: false,
        }
    }

    fn track(zone: u8, chi2: f32, hits: Vec<ProcessedHit>) -> Track {
        Track {
            id: TrackId { endcap: 1, sector: 1 },
            hits,
            mode: 0b1111,
            zone,
            pt_raw: 10.0,
            pt: 10.0,
            q: 1,
            emtf_phi: 1000,
            emtf_theta: 40,
            ndof: 4,
            chi2,
        }
    }

    #[test]
    fn sibling_sharing_layer_0_hit_is_suppressed() {
        let a = track(2, 0.9, vec![hit(0, 500)]);
        let b = track(2, 0.5, vec![hit(0, 500)]);
        let survivors = bust(vec![a, b]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].chi2, 0.9);
    }

    #[test]
    fn disjoint_key_hits_both_survive() {
        let a = track(2, 0.9, vec![hit(0, 500)]);
        let b = track(1, 0.5, vec![hit(0, 600)]);
        let survivors = bust(vec![a, b]);
        assert_eq!(survivors.len(), 2);
    }
}
