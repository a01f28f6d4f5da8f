//! Text I/O for generated topologies and post-processing tables.
//!
//! Writers render into any [`std::fmt::Write`] sink so formatting stays
//! separate from file handling; [`write_atomic`] puts the rendered bytes on
//! disk without ever leaving a partial artifact behind.

pub mod block_mesh_dict;
pub mod table;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::mesh_error::MeshError;
use crate::topology::MeshTopology;

/// Trait for serializers of a finished [`MeshTopology`].
pub trait TopologyWriter {
    /// Write the topology into a text sink.
    fn write<W: std::fmt::Write>(&self, out: &mut W, topology: &MeshTopology)
    -> Result<(), MeshError>;

    /// Render the topology into a fresh string.
    fn render(&self, topology: &MeshTopology) -> Result<String, MeshError> {
        let mut out = String::new();
        self.write(&mut out, topology)?;
        Ok(out)
    }
}

/// Sibling temporary path used while `path` is being written.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Write `bytes` to `path`, replacing any existing file.
///
/// The data goes to a temporary sibling first and is renamed over `path`
/// only after a successful flush, so a failure leaves no partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MeshError> {
    let tmp = temp_path(path);
    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(MeshError::Serialization(format!(
            "cannot write {}: {e}",
            path.display()
        )));
    }
    Ok(())
}
