//! Binary persistence of a trained memory.
//!
//! Snapshots are `bincode` encodings of [`AssociativeMemory`]. Loading
//! re-checks the weight invariants so a damaged file cannot produce a
//! memory that training could never have built.

use std::path::Path;

use anyhow::{bail, Context};

use crate::memory::associative::AssociativeMemory;

impl AssociativeMemory {
    /// Serialise the memory to bytes.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        bincode::serialize(self).context("failed to encode memory snapshot")
    }

    /// Deserialise and validate a memory snapshot.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let memory: AssociativeMemory =
            bincode::deserialize(bytes).context("failed to decode memory snapshot")?;

        let n = memory.pattern_size();
        let shape = memory.weights().as_array().dim();
        if n == 0 || shape != (n, n) {
            bail!(
                "snapshot weight shape {:?} does not match pattern size {}",
                shape,
                n
            );
        }
        if !memory.weights().is_symmetric() {
            bail!("snapshot weights are not symmetric");
        }
        if !memory.weights().has_zero_diagonal() {
            bail!("snapshot weights have self-connections");
        }
        Ok(memory)
    }

    /// Write a snapshot to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("failed to write snapshot {}", path.display()))
    }

    /// Read a snapshot from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("invalid snapshot {}", path.display()))
    }
}
