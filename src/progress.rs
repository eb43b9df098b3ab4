/// What to do with a row while a resume target is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeDecision {
    /// No target, or the target was just reached.
    Process,
    /// Still before the target. No request is made for this row.
    Skip,
}

/// Where the run is. Nothing here is persisted, a stopped run is picked up
/// again by passing the id it stopped on as the start id.
#[derive(Debug, Clone, Default)]
pub struct ProgressCursor {
    last_processed: Option<u64>,
    resume_target: Option<u64>,
}

impl ProgressCursor {
    pub fn new(resume_target: Option<u64>) -> Self {
        Self {
            last_processed: None,
            resume_target,
        }
    }

    /// Decides whether the row with `airport_id` is processed.
    /// The target is cleared the first time its row shows up.
    pub fn check(&mut self, airport_id: u64) -> ResumeDecision {
        match self.resume_target {
            Some(target) if target == airport_id => {
                self.resume_target = None;
                ResumeDecision::Process
            }
            Some(_) => ResumeDecision::Skip,
            None => ResumeDecision::Process,
        }
    }

    pub fn mark_processed(&mut self, airport_id: u64) {
        self.last_processed = Some(airport_id);
    }

    pub fn last_processed(&self) -> Option<u64> {
        self.last_processed
    }

    pub fn resume_target(&self) -> Option<u64> {
        self.resume_target
    }

    pub fn is_resuming(&self) -> bool {
        self.resume_target.is_some()
    }
}
