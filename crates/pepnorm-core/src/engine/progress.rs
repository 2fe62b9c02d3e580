use super::report::Tally;

#[derive(Debug, Clone)]
pub enum Progress {
    /// A stage begins working on the named table.
    StageStart { stage: &'static str, table: String },
    /// Carries the failure counts accumulated by the run so far.
    StageFinish { tally: Tally },

    RowsStart { total_rows: u64 },
    RowDone,
    RowsFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn stage_start(&self, stage: &'static str, table: &str) {
        self.report(Progress::StageStart {
            stage,
            table: table.to_string(),
        });
    }

    pub fn stage_finish(&self, tally: Tally) {
        self.report(Progress::StageFinish { tally });
    }

    /// Runs `body` once per row index, bracketed by row-progress events.
    pub fn rows<F: FnMut(usize)>(&self, total: usize, mut body: F) {
        self.report(Progress::RowsStart {
            total_rows: total as u64,
        });
        for row in 0..total {
            body(row);
            self.report(Progress::RowDone);
        }
        self.report(Progress::RowsFinish);
    }
}
