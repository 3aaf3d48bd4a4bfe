use crate::{decode::decode, DecodedEntry};
use snafu::{ResultExt, Snafu};
use std::{
    io::Read,
    path::{Path, PathBuf},
};

#[derive(Debug, Snafu)]
pub enum ReadError {
    #[snafu(display("failed to read CCF data"))]
    ReadIo { source: std::io::Error },
    #[snafu(display("failed to read `{}`", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads `r` to the end and decodes it.
pub fn decode_from_reader<R: Read>(mut r: R) -> Result<Vec<DecodedEntry>, ReadError> {
    let mut data = Vec::new();
    r.read_to_end(&mut data).context(ReadIoSnafu)?;
    Ok(decode(&data))
}

/// Reads and decodes the file at `path`.
pub fn decode_from_path(path: impl AsRef<Path>) -> Result<Vec<DecodedEntry>, ReadError> {
    let path = path.as_ref();
    let data = std::fs::read(path).context(ReadFileSnafu { path })?;
    Ok(decode(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode::encode, ColorEntry};

    #[test]
    fn reader_round_trip() {
        let file = encode(&[ColorEntry::new([0, 0, 0], "黑色")]).unwrap();
        let entries = decode_from_reader(&file[..]).unwrap();
        assert_eq!(entries[0].label, "黑色");
    }

    #[test]
    fn missing_file() {
        let err = decode_from_path("does/not/exist.ccf").unwrap_err();
        assert!(matches!(err, ReadError::ReadFile { .. }));
    }
}
