use crate::{encode::encode, ColorEntry, EncodeError};
use snafu::{ResultExt, Snafu};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Debug, Snafu)]
pub enum WriteError {
    #[snafu(context(false))]
    Encode { source: EncodeError },
    #[snafu(display("failed to write CCF data"))]
    WriteIo { source: std::io::Error },
    #[snafu(display("failed to write `{}`", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Encodes a CCF file and writes it to `w` in one go.
///
/// Nothing is written if encoding fails.
pub fn encode_to_writer<W: Write>(entries: &[ColorEntry], mut w: W) -> Result<(), WriteError> {
    let content = encode(entries)?;
    w.write_all(&content).context(WriteIoSnafu)?;
    w.flush().context(WriteIoSnafu)
}

/// Encodes a CCF file and writes it to `path`, replacing any existing file.
///
/// The file isn't created if encoding fails.
pub fn encode_to_path(entries: &[ColorEntry], path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let content = encode(entries)?;
    std::fs::write(path, content).context(WriteFileSnafu { path })?;

    info!("wrote {} entries to `{}`", entries.len(), path.display());
    Ok(())
}
