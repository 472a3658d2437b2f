use crate::error::Error;
use crate::population::DiploidSnapshot;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads one `DiploidSnapshot` per line of JSON.
///
/// Blank lines are skipped. Every snapshot is checked for
/// equal numbers of mutations and counts before it is returned.
pub struct SnapshotReader<R: BufRead> {
    // number of lines consumed so far
    num_read: usize,
    reader: R,
    buffer: String,
}

impl SnapshotReader<Box<dyn BufRead>> {
    /// Opens `path`, decompressing it on the fly if it ends in `.gz`.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if path.extension().map_or(false, |e| e == "gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> SnapshotReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            num_read: 0,
            reader,
            buffer: String::new(),
        }
    }

    pub fn num_read(&self) -> usize {
        self.num_read
    }

    pub fn next_snapshot(&mut self) -> Option<Result<DiploidSnapshot, Error>> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.num_read += 1,
                Err(e) => return Some(Err(e.into())),
            }
            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str::<DiploidSnapshot>(line)
                    .map_err(|source| Error::SnapshotParse {
                        line: self.num_read,
                        source,
                    })
                    .and_then(|snap| snap.validate().map(|_| snap)),
            );
        }
    }
}

impl<R: BufRead> Iterator for SnapshotReader<R> {
    type Item = Result<DiploidSnapshot, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_snapshot()
    }
}
