//! The pattern bank: two 4-D `int32` arrays, `patterns_phi` (x-windows) and
//! `patterns_match` (expected phi offsets), both shaped `(9, 7, 16, 3)`.
//!
//! On disk this is a small binary container the crate owns end to end,
//! framed with `binrw` the way `img::woz2` frames a WOZ image: a magic, a
//! version, then the two flattened arrays with their declared shape. There
//! is no NumPy `.npz` reader here; that is the upstream tool's format, not
//! this crate's.

use std::io::Cursor;

use binrw::{binrw, BinRead, BinWrite};
use thiserror::Error;

pub const NPT: usize = 9;
pub const NETA: usize = 7;
pub const NLAYERS: usize = crate::geom::NLAYERS;
pub const NWINDOW: usize = 3;

const MAGIC: [u8; 4] = *b"EMFB";
const VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bank file has bad magic {0:?}, expected {MAGIC:?}")]
    BadMagic([u8; 4]),
    #[error("unsupported bank version {0}, expected {VERSION}")]
    UnsupportedVersion(u16),
    #[error("bank array shape mismatch: expected ({NPT},{NETA},{NLAYERS},{NWINDOW}), got ({0},{1},{2},{3})")]
    ShapeMismatch(usize, usize, usize, usize),
    #[error("bank file truncated while reading {0}")]
    Truncated(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    BinRw(#[from] binrw::Error),
}

#[binrw]
#[brw(little)]
struct RawHeader {
    magic: [u8; 4],
    version: u16,
    npt: u32,
    neta: u32,
    nlayers: u32,
    nwindow: u32,
}

/// In-memory pattern bank. `x_array` and `z_array` are stored flat,
/// row-major over `(ipt, ieta, layer, window)`, matching the on-disk layout.
#[derive(Debug, Clone)]
pub struct PatternBank {
    x_array: Vec<i32>,
    z_array: Vec<i32>,
}

impl PatternBank {
    /// Build a bank from flat row-major `(ipt, ieta, layer, window)` arrays,
    /// validating shape.
    pub fn from_flat(x_array: Vec<i32>, z_array: Vec<i32>) -> Result<Self, Error> {
        let expected = NPT * NETA * NLAYERS * NWINDOW;
        if x_array.len() != expected || z_array.len() != expected {
            return Err(Error::ShapeMismatch(NPT, NETA, NLAYERS, NWINDOW));
        }
        Ok(PatternBank { x_array, z_array })
    }

    fn index(ipt: usize, ieta: usize, layer: usize, window: usize) -> usize {
        ((ipt * NETA + ieta) * NLAYERS + layer) * NWINDOW + window
    }

    /// `(x_lo, x_mid, x_hi)` pattern-x window for this `(ipt, ieta, layer)`.
    pub fn x_window(&self, ipt: usize, ieta: usize, layer: usize) -> (i32, i32, i32) {
        let base = Self::index(ipt, ieta, layer, 0);
        (self.x_array[base], self.x_array[base + 1], self.x_array[base + 2])
    }

    /// `prim_match_lut[layer]` for this `(ipt, ieta)`: the expected signed
    /// phi offset of `layer` from the road's anchor layer, read from the
    /// match array's middle window entry.
    pub fn prim_match(&self, ipt: usize, ieta: usize, layer: usize) -> i32 {
        self.z_array[Self::index(ipt, ieta, layer, 1)]
    }

    pub fn load(bytes: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(bytes);
        let header = RawHeader::read(&mut cursor)?;
        if header.magic != MAGIC {
            return Err(Error::BadMagic(header.magic));
        }
        if header.version != VERSION {
            return Err(Error::UnsupportedVersion(header.version));
        }
        let (npt, neta, nlayers, nwindow) = (
            header.npt as usize,
            header.neta as usize,
            header.nlayers as usize,
            header.nwindow as usize,
        );
        if (npt, neta, nlayers, nwindow) != (NPT, NETA, NLAYERS, NWINDOW) {
            return Err(Error::ShapeMismatch(npt, neta, nlayers, nwindow));
        }
        let count = npt * neta * nlayers * nwindow;
        let x_array = read_i32_array(&mut cursor, count, "patterns_phi")?;
        let z_array = read_i32_array(&mut cursor, count, "patterns_match")?;
        PatternBank::from_flat(x_array, z_array)
    }

    pub fn save(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        let mut cursor = Cursor::new(&mut out);
        let header = RawHeader {
            magic: MAGIC,
            version: VERSION,
            npt: NPT as u32,
            neta: NETA as u32,
            nlayers: NLAYERS as u32,
            nwindow: NWINDOW as u32,
        };
        header.write(&mut cursor)?;
        for &v in &self.x_array {
            v.write_le(&mut cursor)?;
        }
        for &v in &self.z_array {
            v.write_le(&mut cursor)?;
        }
        Ok(out)
    }
}

fn read_i32_array(cursor: &mut Cursor<&[u8]>, count: usize, which: &'static str) -> Result<Vec<i32>, Error> {
    let mut v = Vec::with_capacity(count);
    for _ in 0..count {
        v.push(i32::read_le(cursor).map_err(|_| Error::Truncated(which))?);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_bank() -> PatternBank {
        let count = NPT * NETA * NLAYERS * NWINDOW;
        let mut x = vec![0i32; count];
        // one non-zero pattern at (ipt=4, ieta=3, layer=0): x_lo=22, x_mid=23, x_hi=24
        let base = PatternBank::index(4, 3, 0, 0);
        x[base] = 22;
        x[base + 1] = 23;
        x[base + 2] = 24;
        let z = vec![0i32; count];
        PatternBank::from_flat(x, z).unwrap()
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let bank = flat_bank();
        let bytes = bank.save().unwrap();
        let loaded = PatternBank::load(&bytes).unwrap();
        assert_eq!(bank.x_window(4, 3, 0), loaded.x_window(4, 3, 0));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = flat_bank().save().unwrap();
        bytes[0] = b'X';
        assert!(matches!(PatternBank::load(&bytes), Err(Error::BadMagic(_))));
    }

    #[test]
    fn rejects_wrong_shape() {
        let count = NPT * NETA * NLAYERS * NWINDOW;
        let err = PatternBank::from_flat(vec![0i32; count - 1], vec![0i32; count]);
        assert!(matches!(err, Err(Error::ShapeMismatch(..))));
    }

    #[test]
    fn window_lookup_matches_what_was_stored() {
        let bank = flat_bank();
        assert_eq!(bank.x_window(4, 3, 0), (22, 23, 24));
        assert_eq!(bank.x_window(0, 0, 1), (0, 0, 0));
    }
}
