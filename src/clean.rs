//! Road cleaning: cluster adjacent-`iphi` roads, keep one local maximum per
//! cluster, drop roads with a bad bunch-crossing profile, then suppress
//! roads that overlap or share a key inner-layer hit with a higher-priority
//! survivor.
//!
//! Grounded on `RoadCleaning` in the original source (`_groupby`,
//! `_iter_from_middle`, `_sortby`); the "walk from the middle" iteration is
//! specified as an explicit index walk rather than a generator trick.

use std::collections::HashMap;

use crate::road::{Road, RoadId};

/// `(endcap, sector, ipt, ieta)`, the key two contiguous-`iphi` roads share.
fn group_key(id: &RoadId) -> (i8, u8, usize, usize) {
    (id.endcap, id.sector, id.ipt, id.ieta)
}

/// Indices into `roads`, walking outward from the middle of a slice: middle,
/// middle-1, middle+1, middle-2, middle+2, ...
fn iter_from_middle(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let middle = len / 2;
    let mut order = vec![middle];
    let mut shift = 1;
    loop {
        let lo = middle.checked_sub(shift);
        let hi = middle + shift;
        let mut added = false;
        if let Some(lo) = lo {
            order.push(lo);
            added = true;
        }
        if hi < len {
            order.push(hi);
            added = true;
        }
        if !added {
            break;
        }
        shift += 1;
    }
    order
}

/// Cluster strictly-contiguous-`iphi` roads sharing a group key. `roads`
/// must already be sorted by `id`.
fn group_by_contiguous_iphi(roads: &[Road]) -> Vec<Vec<usize>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < roads.len() {
        let key = group_key(&roads[i].id);
        let start_iphi = roads[i].id.iphi;
        let mut group = vec![i];
        let mut j = i + 1;
        while j < roads.len()
            && group_key(&roads[j].id) == key
            && roads[j].id.iphi == start_iphi + group.len() as i32
        {
            group.push(j);
            j += 1;
        }
        groups.push(group);
        i = j;
    }
    groups
}

/// For each group, walk from the middle outward and keep the first index
/// that dominates (by `sort_code`) both of its immediate neighbours (edge
/// indices compare only against the one neighbour they have). Returns the
/// surviving road's index plus the group's `[iphi_min, iphi_max]` span.
fn pick_local_maxima(roads: &[Road], groups: &[Vec<usize>]) -> Vec<(usize, (i32, i32))> {
    let mut survivors = Vec::new();
    for group in groups {
        let span = (roads[group[0]].id.iphi, roads[*group.last().unwrap()].id.iphi);
        for &pos in &iter_from_middle(group.len()) {
            let idx = group[pos];
            let mut keep = true;
            if pos > 0 && roads[idx].sort_code < roads[group[pos - 1]].sort_code {
                keep = false;
            }
            if pos + 1 < group.len() && roads[idx].sort_code < roads[group[pos + 1]].sort_code {
                keep = false;
            }
            if keep {
                survivors.push((idx, span));
                break;
            }
        }
    }
    survivors
}

/// #(bx<=-1) <= 2, #(bx<=0) >= 2, #(bx>0) <= 1, counting each contributing
/// layer at most once.
fn passes_bx_filter(road: &Road) -> bool {
    let mut seen_layers = std::collections::HashSet::new();
    let (mut le_neg1, mut le_zero, mut gt_zero) = (0, 0, 0);
    for hit in &road.hits {
        if !seen_layers.insert(hit.layer) {
            continue;
        }
        if hit.bx <= -1 {
            le_neg1 += 1;
        }
        if hit.bx <= 0 {
            le_zero += 1;
        }
        if hit.bx > 0 {
            gt_zero += 1;
        }
    }
    le_neg1 <= 2 && le_zero >= 2 && gt_zero <= 1
}

/// `(layer, emtf_phi)` identity on the key inner layers, used by
/// cross-group sibling suppression.
const KEY_LAYERS: [u8; 5] = [0, 1, 11, 12, 13];

fn key_identities(road: &Road) -> Vec<(u8, i32)> {
    road.hits
        .iter()
        .filter(|h| KEY_LAYERS.contains(&h.layer))
        .map(|h| h.key_identity())
        .collect()
}

/// Run road cleaning: group, pick local maxima, apply the BX filter, then
/// suppress overlapping or key-layer-sharing survivors in `sort_code` order.
pub fn clean(mut roads: Vec<Road>) -> Vec<Road> {
    roads.sort_by(|a, b| a.id.cmp(&b.id));
    let groups = group_by_contiguous_iphi(&roads);
    let survivors = pick_local_maxima(&roads, &groups);

    let mut spans: HashMap<RoadId, (i32, i32)> = HashMap::new();
    let mut candidates: Vec<Road> = Vec::new();
    for (idx, span) in survivors {
        let road = roads[idx].clone();
        if passes_bx_filter(&road) {
            spans.insert(road.id, span);
            candidates.push(road);
        }
    }

    candidates.sort_by(|a, b| b.sort_code.cmp(&a.sort_code));

    let mut kept: Vec<Road> = Vec::new();
    for road in candidates {
        let (x1, x2) = spans[&road.id];
        let ids = key_identities(&road);
        let overlaps = kept.iter().any(|k| {
            k.id.endsec_key() == road.id.endsec_key() && {
                let (y1, y2) = spans[&k.id];
                x2 + 2 >= y1 && x1 - 2 <= y2
            }
        });
        let shares_key_hit = kept.iter().any(|k| key_identities(k).iter().any(|id| ids.contains(id)));
        if !overlaps && !shares_key_hit {
            kept.push(road);
        }
    }
    kept
}
