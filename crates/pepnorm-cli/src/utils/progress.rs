use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pepnorm::engine::progress::{Progress, ProgressCallback};
use pepnorm::engine::report::Tally;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 100;

/// Draws one line per workflow stage on stderr.
///
/// A stage shows a spinner labelled `stage [table]`, turns into a row counter while
/// records are processed, and ends with the failure tally reported by the engine.
#[derive(Clone)]
pub struct StageProgress {
    state: Arc<Mutex<StageState>>,
}

struct StageState {
    bar: ProgressBar,
    finished: Vec<(String, Tally)>,
}

impl StageProgress {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(target);
        Self {
            state: Arc::new(Mutex::new(StageState {
                bar,
                finished: Vec::new(),
            })),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let shared = self.state.clone();
        Box::new(move |event: Progress| {
            let Ok(mut state) = shared.lock() else {
                warn!("Progress state is poisoned; dropping {:?}", event);
                return;
            };
            state.apply(event);
        })
    }

    /// Stage labels and tallies of every stage that has finished so far.
    pub fn finished(&self) -> Vec<(String, Tally)> {
        self.state
            .lock()
            .map(|state| state.finished.clone())
            .unwrap_or_default()
    }
}

impl Default for StageProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl StageState {
    fn apply(&mut self, event: Progress) {
        match event {
            Progress::StageStart { stage, table } => {
                let target = draw_target_of(&self.bar);
                self.bar = ProgressBar::new_spinner().with_style(spinner_style());
                self.bar.set_draw_target(target);
                self.bar.set_prefix(format!("{} [{}]", stage, table));
                self.bar.set_message("preparing");
                self.bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::RowsStart { total_rows } => {
                self.bar.disable_steady_tick();
                self.bar.set_style(rows_style());
                self.bar.set_length(total_rows);
                self.bar.set_position(0);
                self.bar.set_message("");
            }
            Progress::RowDone => self.bar.inc(1),
            Progress::RowsFinish => {
                if let Some(length) = self.bar.length() {
                    self.bar.set_position(length);
                }
            }
            Progress::StageFinish { tally } => {
                self.bar.disable_steady_tick();
                self.bar.set_style(done_style());
                self.bar.finish_with_message(tally_line(&tally));
                self.finished.push((self.bar.prefix(), tally));
            }
            Progress::Message(message) => self.bar.println(format!("  {}", message)),
        }
    }
}

fn draw_target_of(bar: &ProgressBar) -> ProgressDrawTarget {
    if bar.is_hidden() {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stderr()
    }
}

/// `12 rows, 2 malformed, 1 without auxiliary data`; zero counts are omitted.
pub fn tally_line(tally: &Tally) -> String {
    let mut parts = vec![format!("{} rows", tally.rows)];
    let counts = [
        (tally.parse_failures, "malformed"),
        (tally.conversion_failures, "unconvertible"),
        (tally.key_failures, "without sequence key"),
        (tally.lookup_misses, "without auxiliary data"),
        (tally.derivation_failures, "not derived"),
    ];
    parts.extend(
        counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{} {}", count, label)),
    );
    parts.join(", ")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn rows_style() -> ProgressStyle {
    ProgressStyle::with_template("  {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} rows")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

fn done_style() -> ProgressStyle {
    ProgressStyle::with_template("✓ {prefix:.bold}: {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
