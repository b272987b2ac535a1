// crates/enigma_search/src/search.rs
//
// Fan-out / fan-in driver.
//
//   dispatcher ──batches──▶ workers ──batch top-N──▶ folding loop (caller thread)
//
// - One dispatcher thread walks rotor triples × reflectors × left start letters.
// - Each worker owns one machine and one plaintext buffer, resets the machine
//   per key, and keeps a batch-local top-N.
// - The folding loop owns the global top-N. Any member of the global min-N is
//   also in its batch's min-N, so folding batch winners equals folding everything.
// - A shared stop flag ends the dispatcher and workers early on timeout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use tracing::{debug, info, warn};

use enigma_algo::{decrypt_and_score, EnigmaMachine, Letter, TopN};
use enigma_core::{letters_to_string, ReflectorId, RotorId};

use crate::candidate::{EvaluatedCandidate, KeySettings};
use crate::keyspace::{batches, key_space_size, rotor_triples, Batch};
use crate::request::{SearchPlan, SearchRequest};
use crate::SearchError;

/// How long a blocked dispatcher waits before re-checking the stop flag.
const DISPATCH_POLL: Duration = Duration::from_millis(50);

/// Score credit per crib letter when the crib appears in a plaintext.
pub const CRIB_BONUS_PER_LETTER: f64 = 100.0;

/// Final state of a search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Best candidates, ascending by score.
    pub results: Vec<EvaluatedCandidate>,
    /// Keys actually evaluated.
    pub evaluated: u64,
    /// Keys in the requested space.
    pub key_space: u64,
    /// True if the timeout stopped the search before the space was exhausted.
    pub timed_out: bool,
    pub elapsed: Duration,
}

/// Cumulative progress, reported after every folded batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchProgress {
    pub evaluated: u64,
    pub key_space: u64,
}

/// Run a full search and return the top-N candidates.
pub fn run_search(request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
    run_search_with_progress(request, |_| {})
}

/// Like [`run_search`], calling `on_progress` on the caller's thread after
/// each batch is folded.
pub fn run_search_with_progress<F>(
    request: &SearchRequest,
    mut on_progress: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(SearchProgress),
{
    let plan = request.validate()?;
    let triples = rotor_triples(&plan.rotors);
    let key_space = key_space_size(triples.len(), plan.reflectors.len());

    info!(
        key_space,
        workers = plan.workers,
        results = plan.results,
        scoring = ?plan.scoring,
        "starting search"
    );

    let started = Instant::now();
    let deadline = plan.timeout.map(|t| started + t);
    let stop = AtomicBool::new(false);

    let (batch_tx, batch_rx) = bounded::<Batch>(plan.workers * 2);
    let (best_tx, best_rx) = bounded::<BatchBest>(plan.workers * 2);

    let (top, evaluated, timed_out, joined) = thread::scope(|s| {
        let (plan, stop, triples) = (&plan, &stop, &triples);

        let dispatcher = s.spawn(move || dispatch(triples, &plan.reflectors, batch_tx, stop));
        let workers: Vec<_> = (0..plan.workers)
            .map(|_| {
                let (rx, tx) = (batch_rx.clone(), best_tx.clone());
                s.spawn(move || work(plan, rx, tx, stop))
            })
            .collect();
        // Only workers hold these now; the folding loop ends when they all exit.
        drop(batch_rx);
        drop(best_tx);

        let mut top = TopN::new(plan.results);
        let mut evaluated = 0u64;
        let mut timed_out = false;
        let mut fold = |best: BatchBest, top: &mut TopN<EvaluatedCandidate>| {
            evaluated += best.evaluated;
            top.merge(best.top);
            on_progress(SearchProgress {
                evaluated,
                key_space,
            });
        };

        loop {
            let next = match deadline {
                Some(d) => best_rx.recv_deadline(d),
                None => best_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match next {
                Ok(best) => fold(best, &mut top),
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    warn!(elapsed = ?started.elapsed(), "search timed out; stopping workers");
                    timed_out = true;
                    stop.store(true, Ordering::Relaxed);
                    // Keep whatever is already in flight.
                    for best in best_rx.iter() {
                        fold(best, &mut top);
                    }
                    break;
                }
            }
        }

        let joined = join_all(std::iter::once(dispatcher).chain(workers));
        (top, evaluated, timed_out, joined)
    });
    joined?;

    let elapsed = started.elapsed();
    info!(evaluated, ?elapsed, timed_out, "search finished");

    Ok(SearchOutcome {
        results: top.into_sorted_vec(),
        evaluated,
        key_space,
        timed_out,
        elapsed,
    })
}

/// Best candidates of one batch.
struct BatchBest {
    top: TopN<EvaluatedCandidate>,
    evaluated: u64,
}

/// Join every handle, then report whether any of them panicked.
fn join_all<'scope>(
    handles: impl IntoIterator<Item = ScopedJoinHandle<'scope, ()>>,
) -> Result<(), SearchError> {
    let panicked = handles
        .into_iter()
        .fold(false, |panicked, h| h.join().is_err() | panicked);
    if panicked {
        return Err(SearchError::WorkerPanicked);
    }
    Ok(())
}

fn dispatch(
    triples: &[[RotorId; 3]],
    reflectors: &[ReflectorId],
    tx: Sender<Batch>,
    stop: &AtomicBool,
) {
    for &rotors in triples {
        for &reflector in reflectors {
            debug!(?rotors, %reflector, "dispatching rotor configuration");
            for batch in batches(rotors, reflector) {
                let mut pending = batch;
                loop {
                    if stop.load(Ordering::Relaxed) {
                        return;
                    }
                    match tx.send_timeout(pending, DISPATCH_POLL) {
                        Ok(()) => break,
                        Err(SendTimeoutError::Timeout(b)) => pending = b,
                        // Every worker is gone.
                        Err(SendTimeoutError::Disconnected(_)) => return,
                    }
                }
            }
        }
    }
}

fn work(plan: &SearchPlan, rx: Receiver<Batch>, tx: Sender<BatchBest>, stop: &AtomicBool) {
    let mut worker = Worker::new(plan);
    for batch in rx.iter() {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let best = worker.evaluate(batch, stop);
        if tx.send(best).is_err() {
            return;
        }
    }
}

/// Per-thread evaluation state.
struct Worker<'p> {
    plan: &'p SearchPlan,
    machine: EnigmaMachine<'static>,
    plain: Vec<Letter>,
}

impl<'p> Worker<'p> {
    fn new(plan: &'p SearchPlan) -> Self {
        let idle = KeySettings {
            start: [Letter::A; 3],
            rotors: [RotorId::I, RotorId::II, RotorId::III],
            reflector: ReflectorId::B,
        };
        Self {
            plan,
            machine: EnigmaMachine::new(&idle.machine_config()),
            plain: Vec::with_capacity(plan.ciphertext.len()),
        }
    }

    fn evaluate(&mut self, batch: Batch, stop: &AtomicBool) -> BatchBest {
        let mut top = TopN::<EvaluatedCandidate>::new(self.plan.results);
        let mut evaluated = 0u64;

        for settings in batch.keys() {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            evaluated += 1;

            let score = self.score(&settings);
            // Cheap reject before building the plaintext string.
            if top.is_full() && top.peek_worst().is_some_and(|w| score > w.score) {
                continue;
            }
            top.maybe_add(EvaluatedCandidate {
                plaintext: letters_to_string(&self.plain),
                score,
                settings,
            });
        }

        BatchBest { top, evaluated }
    }

    /// Decrypt under `settings` into `self.plain` and score it.
    fn score(&mut self, settings: &KeySettings) -> f64 {
        self.machine.reset(&settings.machine_config());
        let mut score = decrypt_and_score(
            &mut self.machine,
            &self.plan.ciphertext,
            self.plan.scoring,
            &mut self.plain,
        );

        if let Some(crib) = &self.plan.crib {
            if contains(&self.plain, crib) {
                info!(key = %settings.key(), ?settings.rotors, %settings.reflector, "found crib in the message");
                score -= crib.len() as f64 * CRIB_BONUS_PER_LETTER;
            }
        }
        score
    }
}

fn contains(haystack: &[Letter], needle: &[Letter]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
