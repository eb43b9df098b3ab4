use std::{fmt, io::Read, io::Write};

use chrono::Local;
use reqwest::Url;
use tokio::{
    sync::oneshot::{self, error::TryRecvError},
    time::sleep,
};
use tracing::{debug, error, info, warn};

use crate::{
    airport::AirportRecord,
    config::Settings,
    info_time,
    parse::parse_results,
    progress::{ProgressCursor, ResumeDecision},
    rank::{rank_candidates, Candidate},
    request::{search_url, PageFetcher},
    terms::extract_terms,
    tsv::MatchWriter,
    Error, Result,
};

/// How a single input row ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Malformed row, bad id or no served cities. Nothing was requested.
    BadInput,
    /// Before the resume target. Nothing was requested.
    ResumeSkipped,
    /// The page was fetched but no title matched.
    NoMatch,
    /// The page was fetched and this many rows were written.
    Emitted(usize),
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub bad_input: usize,
    pub resume_skipped: usize,
    pub no_match: usize,
    pub matched_airports: usize,
    pub emitted_rows: usize,
    pub retries: usize,
    pub last_processed: Option<u64>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} airports matched ({} rows written), {} without matches, {} bad input, {} skipped to resume, {} retries",
            self.rows,
            self.matched_airports,
            self.emitted_rows,
            self.no_match,
            self.bad_input,
            self.resume_skipped,
            self.retries
        )
    }
}

/// Drives the search for every airport row, one request at a time.
pub struct BatchController<F, W: Write> {
    settings: Settings,
    fetcher: F,
    writer: MatchWriter<W>,
    cursor: ProgressCursor,
    summary: RunSummary,
    stop_rx: Option<oneshot::Receiver<()>>,
}

impl<F: PageFetcher, W: Write> BatchController<F, W> {
    pub fn new(settings: Settings, fetcher: F, writer: MatchWriter<W>) -> Self {
        let cursor = ProgressCursor::new(settings.start_id);
        Self {
            settings,
            fetcher,
            writer,
            cursor,
            summary: RunSummary::default(),
            stop_rx: None,
        }
    }

    /// A message on this channel ends the run before the next request, or
    /// during a pending retry. The inter-request sleep is never cut short.
    pub fn with_stop_signal(mut self, stop_rx: oneshot::Receiver<()>) -> Self {
        self.stop_rx = Some(stop_rx);
        self
    }

    pub fn cursor(&self) -> &ProgressCursor {
        &self.cursor
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_writer(self) -> MatchWriter<W> {
        self.writer
    }

    /// Processes every row of `reader` in order.
    ///
    /// Only running out of retries, a stop signal or an I/O error ends the run early.
    pub async fn run<R: Read>(&mut self, reader: &mut csv::Reader<R>) -> Result<RunSummary> {
        let start_time = Local::now();
        match self.cursor.resume_target() {
            Some(target) => info_time!("Started matching airports, skipping to airport {}", target),
            None => info_time!("Started matching airports"),
        }

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) if !e.is_io_error() => {
                    self.summary.rows += 1;
                    self.summary.bad_input += 1;
                    warn!("Skipping unreadable input row: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let fields: Vec<&str> = record.iter().collect();
            if let Err(e) = self.process_row(fields.as_slice()).await {
                self.log_stop(fields.as_slice(), &e);
                return Err(e);
            }
        }

        if let Some(target) = self.cursor.resume_target() {
            warn!("Never reached airport {target} to resume from");
        }
        info_time!(start_time, "Finished matching airports. {}", self.summary);
        Ok(self.summary.clone())
    }

    /// Takes one row through parse, resume check, fetch, ranking and output.
    pub async fn process_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<RowOutcome> {
        self.summary.rows += 1;

        let airport = match AirportRecord::from_fields(fields) {
            Ok(airport) => airport,
            Err(e) => return Ok(self.skip_bad_input(fields, &e)),
        };

        if self.cursor.check(airport.id) == ResumeDecision::Skip {
            debug!("Skipping airport {} to resume", airport.id);
            self.summary.resume_skipped += 1;
            return Ok(RowOutcome::ResumeSkipped);
        }

        let terms = match extract_terms(&airport) {
            Ok(terms) => terms,
            Err(e) if e.is_bad_input() => return Ok(self.skip_bad_input(fields, &e)),
            Err(e) => return Err(e),
        };

        if self.stop_requested() {
            return Err(Error::Cancelled(airport.id));
        }

        let url = search_url(&self.settings.search_base_url, &airport.iata_code)?;
        debug!("Searching {} for airport {}", url, airport.id);
        let candidates = self.fetch_candidates(airport.id, &url).await?;
        let matches = rank_candidates(airport.id, &candidates, &terms);

        // The wiki blocks us if we go too fast.
        info!("Sleeping {} seconds...", self.settings.request_delay.as_secs_f64());
        sleep(self.settings.request_delay).await;

        // Rows are written together with the cursor update, so a run stopped
        // during the sleep has written nothing for this airport.
        self.cursor.mark_processed(airport.id);
        self.summary.last_processed = Some(airport.id);

        if matches.is_empty() {
            info!("No matches found. Skipping airport {} ({})", airport.id, airport.iata_code);
            self.summary.no_match += 1;
            return Ok(RowOutcome::NoMatch);
        }

        let written = self.writer.write_matches(&matches)?;
        info!(
            "Airport {} ({}): {} matches, best {:?} ({})",
            airport.id, airport.iata_code, written, matches[0].title, matches[0].rank
        );
        self.summary.matched_airports += 1;
        self.summary.emitted_rows += written;
        Ok(RowOutcome::Emitted(written))
    }

    /// Requests and parses the result page, retrying failures after the retry delay.
    async fn fetch_candidates(&mut self, airport_id: u64, url: &Url) -> Result<Vec<Candidate>> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let err = match self.fetch_once(url).await {
                Ok(candidates) => return Ok(candidates),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            error!("Error scraping page {url}: {err}");
            if attempts > self.settings.max_retries {
                return Err(Error::RetriesExhausted {
                    airport_id,
                    attempts,
                });
            }

            warn!(
                "Auto-recovering in {} seconds (retry {} of {})...",
                self.settings.retry_delay.as_secs_f64(),
                attempts,
                self.settings.max_retries
            );
            self.summary.retries += 1;
            self.wait_before_retry(airport_id).await?;
        }
    }

    async fn fetch_once(&self, url: &Url) -> Result<Vec<Candidate>> {
        let html = self.fetcher.fetch_page(url).await?;
        parse_results(html, url.clone()).await
    }

    async fn wait_before_retry(&mut self, airport_id: u64) -> Result<()> {
        let delay = sleep(self.settings.retry_delay);
        tokio::pin!(delay);

        let stopped = match self.stop_rx.as_mut() {
            Some(stop_rx) => tokio::select! {
                _ = &mut delay => return Ok(()),
                signal = stop_rx => signal.is_ok(),
            },
            None => false,
        };
        // Either the signal was consumed or the sender is gone.
        self.stop_rx = None;
        if stopped {
            return Err(Error::Cancelled(airport_id));
        }

        delay.await;
        Ok(())
    }

    /// Checks for a stop signal without waiting. A consumed signal is forgotten.
    fn stop_requested(&mut self) -> bool {
        let Some(stop_rx) = self.stop_rx.as_mut() else {
            return false;
        };
        match stop_rx.try_recv() {
            Ok(()) => {
                self.stop_rx = None;
                true
            }
            Err(TryRecvError::Closed) => {
                self.stop_rx = None;
                false
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    fn skip_bad_input<S: AsRef<str>>(&mut self, fields: &[S], err: &Error) -> RowOutcome {
        warn!("Skipping bad input ({err}): {}", join_row(fields));
        self.summary.bad_input += 1;
        RowOutcome::BadInput
    }

    fn log_stop<S: AsRef<str>>(&self, fields: &[S], err: &Error) {
        error!("Stopping at row {}: {err}", join_row(fields));
        match (AirportRecord::from_fields(fields), self.cursor.last_processed()) {
            (Ok(airport), _) => error!("Restart with start id {} to resume", airport.id),
            (Err(_), Some(last)) => error!("Last processed airport was {last}"),
            _ => {}
        }
    }
}

fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\t")
}
