use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    path::Path,
};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::{rank::ScoredMatch, Result};

/// Headerless TSV reader. Rows may have any number of fields and quotes are plain text.
pub fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rdr)
}

pub fn open_reader(path: impl AsRef<Path>) -> Result<csv::Reader<File>> {
    Ok(reader(File::open(path)?))
}

/// Writes `airportId  url  rank` rows.
pub struct MatchWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> MatchWriter<W> {
    pub fn new(wtr: W) -> Self {
        let inner = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(wtr);
        Self { inner }
    }

    /// Writes one airport's matches and flushes, so a stopped run keeps everything written so far.
    pub fn write_matches(&mut self, matches: &[ScoredMatch]) -> Result<usize> {
        for m in matches {
            self.inner.write_record([
                m.airport_id.to_string().as_str(),
                m.url.as_str(),
                m.rank.to_string().as_str(),
            ])?;
        }
        self.inner.flush()?;
        Ok(matches.len())
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| crate::Error::Io(e.into_error()))
    }
}

impl MatchWriter<File> {
    /// Opens `path` for writing. `append` keeps rows of an earlier run.
    pub fn create(path: impl AsRef<Path>, append: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        Ok(Self::new(file))
    }
}
