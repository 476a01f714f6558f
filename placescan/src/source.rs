use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{path} not found")]
    NotFound { path: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Opens the record source as a forward-only CSV reader.
///
/// Exports of the dataset written on Windows may start with a UTF-8
/// byte-order marker; it is consumed here so the header row parses
/// cleanly.
pub fn open_records(path: &Path) -> Result<csv::Reader<Box<dyn Read>>, SourceError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SourceError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            SourceError::Io(e)
        }
    })?;
    Ok(from_reader(file))
}

fn from_reader<R: Read + 'static>(mut inner: R) -> csv::Reader<Box<dyn Read>> {
    let mut head = [0u8; 3];
    let mut filled = 0usize;
    while filled < head.len() {
        match inner.read(&mut head[filled..]) {
            Ok(0) | Err(_) => break,
            Ok(n) => filled += n,
        }
    }

    let reader: Box<dyn Read> = if filled == head.len() && head == UTF8_BOM {
        Box::new(inner)
    } else {
        Box::new(io::Cursor::new(head[..filled].to_vec()).chain(inner))
    };
    csv::Reader::from_reader(reader)
}
