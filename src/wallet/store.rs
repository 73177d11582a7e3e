//! Outpoint store - the persisted outpoint sequence read on wallet load

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::error::StoreError;
use crate::wallet::ledger::Outpoint;

/// Lazy, finite sequence of persisted outpoints.
pub type OutpointStream = BoxStream<'static, Result<Outpoint, StoreError>>;

/// Read side of an outpoint store. Each call starts the sequence from the beginning.
#[async_trait]
pub trait OutpointStore: Send + Sync {
    async fn outpoints(&self) -> Result<OutpointStream, StoreError>;
}

/// Store backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutpointStore {
    records: Vec<Outpoint>,
}

impl MemoryOutpointStore {
    pub fn new(records: Vec<Outpoint>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, outpoint: Outpoint) {
        self.records.push(outpoint);
    }
}

#[async_trait]
impl OutpointStore for MemoryOutpointStore {
    async fn outpoints(&self) -> Result<OutpointStream, StoreError> {
        Ok(stream::iter(self.records.clone().into_iter().map(Ok)).boxed())
    }
}

#[cfg(feature = "native")]
pub use file::JsonLinesOutpointStore;

#[cfg(feature = "native")]
mod file {
    use super::*;
    use std::path::{Path, PathBuf};
    use tokio::fs::{File, OpenOptions};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};

    /// One JSON outpoint per line. A missing file is an empty store.
    #[derive(Debug, Clone)]
    pub struct JsonLinesOutpointStore {
        path: PathBuf,
    }

    impl JsonLinesOutpointStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path { &self.path }

        pub async fn append(&self, outpoint: &Outpoint) -> Result<(), StoreError> {
            let mut line = serde_json::to_string(outpoint).map_err(StoreError::Encode)?;
            line.push('\n');
            let mut file = OpenOptions::new().create(true).append(true).open(&self.path).await?;
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
            Ok(())
        }
    }

    type Cursor = (Lines<BufReader<File>>, usize);

    async fn next_record(cursor: Option<Cursor>) -> Option<(Result<Outpoint, StoreError>, Option<Cursor>)> {
        let (mut lines, mut line_no) = cursor?;
        loop {
            line_no += 1;
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    let record = serde_json::from_str(&line)
                        .map_err(|source| StoreError::Decode { line: line_no, source });
                    return Some((record, Some((lines, line_no))));
                }
                Ok(None) => return None,
                // io errors end the sequence
                Err(e) => return Some((Err(e.into()), None)),
            }
        }
    }

    #[async_trait]
    impl OutpointStore for JsonLinesOutpointStore {
        async fn outpoints(&self) -> Result<OutpointStream, StoreError> {
            let file = match File::open(&self.path).await {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(stream::empty().boxed()),
                Err(e) => return Err(e.into()),
            };
            let cursor = Some((BufReader::new(file).lines(), 0));
            Ok(stream::unfold(cursor, next_record).boxed())
        }
    }
}
