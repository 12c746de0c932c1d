//! Run configuration, replacing the original tool's module-level globals
//! (`use_condor`, `jobid`, `analysis`, ...) with an explicit value threaded
//! through the pipeline factory.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read config file {0}: {1}")]
    Read(String, std::io::Error),
    #[error("could not parse config file {0}: {1}")]
    Parse(String, toml::de::Error),
}

/// Process-wide configuration for one pipeline run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RunContext {
    /// Select zone 6 (overlap/OMTF) only, instead of zones 0-5.
    pub omtf_input: bool,
    /// Apply the Run-2 compatibility RPC filter (drop iRPC/OMTF RPC hits).
    pub run2_input: bool,
    /// Discriminator pt cutoff used at the rate-study stage.
    pub discr_pt_cut_rate: f32,
    /// Discriminator pt cutoff used at the track-producer stage.
    pub discr_pt_cut_track: f32,
}

impl Default for RunContext {
    fn default() -> Self {
        RunContext {
            omtf_input: false,
            run2_input: false,
            discr_pt_cut_rate: 14.0,
            discr_pt_cut_track: 8.0,
        }
    }
}

impl RunContext {
    pub fn with_omtf_input(mut self, omtf_input: bool) -> Self {
        self.omtf_input = omtf_input;
        self
    }

    pub fn with_run2_input(mut self, run2_input: bool) -> Self {
        self.run2_input = run2_input;
        self
    }

    /// Load from a TOML file, falling back to defaults for any field the
    /// file omits.
    pub fn from_toml_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Read(path.display().to_string(), e))?;
        toml::from_str(&text).map_err(|e| Error::Parse(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let ctx = RunContext::default();
        assert_eq!(ctx.discr_pt_cut_rate, 14.0);
        assert_eq!(ctx.discr_pt_cut_track, 8.0);
        assert!(!ctx.omtf_input);
        assert!(!ctx.run2_input);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "run2_input = true\n").unwrap();
        let ctx = RunContext::from_toml_file(&path).unwrap();
        assert!(ctx.run2_input);
        assert!(!ctx.omtf_input);
        assert_eq!(ctx.discr_pt_cut_rate, 14.0);
    }
}
