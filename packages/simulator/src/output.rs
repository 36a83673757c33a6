//! JSONL result files, one line per match, optionally gzipped.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use time::format_description::well_known::Iso8601;
use time::OffsetDateTime;

use crate::simulator::MatchResult;

pub struct OutputWriter {
    writer: Box<dyn Write + Send>,
    path: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: &Path, compress: bool) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let timestamp = OffsetDateTime::now_utc()
            .format(&Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");
        let filename = format!("callbreak_{timestamp}.jsonl");

        let (writer, path): (Box<dyn Write + Send>, PathBuf) = if compress {
            let path = dir.join(format!("{filename}.gz"));
            let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
            (Box::new(BufWriter::new(encoder)), path)
        } else {
            let path = dir.join(filename);
            (Box::new(BufWriter::new(File::create(&path)?)), path)
        };
        Ok(Self { writer, path })
    }

    pub fn write_match(&mut self, result: &MatchResult) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, result)?;
        self.writer.write_all(b"\n")
    }

    /// Flush and close; the gzip trailer is written when the encoder drops.
    pub fn finish(mut self) -> io::Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
