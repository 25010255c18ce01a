//! Session scheduling
//!
//! A tick-driven state machine that sequences gesture prompts for one
//! training session. There is no timer callback: callers arm the machine with
//! [`SessionScheduler::start`], then call [`SessionScheduler::tick`] each time
//! the returned deadline elapses. [`run_session`] provides the owning loop for
//! wall-clock use; tests drive `tick` directly.
//!
//! Observers receive events and status text synchronously, in transition
//! order, one tick at a time.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::GestureCatalog;
use crate::config::SessionConfig;
use crate::error::TrainError;
use crate::sequencer::StimulusSequencer;
use crate::types::{Phase, TrainingEvent, TrainingEventKind};
use crate::wait::WaitTimeGenerator;

/// Status shown while the session counts down to the first prompt
pub const START_LABEL: &str = "Starting...";
/// Status shown during a rest pause
pub const REST_LABEL: &str = "Rest";
/// Status shown once all prompts are exhausted
pub const DONE_LABEL: &str = "Done";
/// Advisory hint shown with static gestures
pub const STATIC_HELP_TEXT: &str = "move slowly";

/// Delay between arming and the first tick (ms)
pub const INIT_START_MS: u64 = 1000;
/// Delay between the `Start` event and the first prompt (ms)
pub const START_WAIT_MS: u64 = 8000;

// Letter sequence the original letter-hint feature stepped through. The
// cursor still advances on every static-gesture lookup but the letter never
// reaches the prompt text.
const HELP_ALPHABET: [char; 13] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'k', 'l', 'm', 'n',
];

/// Receiver of session notifications, called synchronously in transition order
pub trait SessionObserver {
    fn on_event(&mut self, event: &TrainingEvent);
    fn on_status(&mut self, status: &str);
}

/// A single notification, for observers that forward over a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    Event(TrainingEvent),
    Status(String),
}

/// Observer adapter forwarding every notification to an mpsc sender
///
/// Sends happen inside the tick, so channel consumers see updates in the same
/// order the state machine produced them. Send failures are ignored; a
/// dropped receiver just means nobody is listening anymore.
pub struct ChannelObserver {
    sender: Sender<SessionUpdate>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<SessionUpdate>) -> Self {
        Self { sender }
    }
}

impl SessionObserver for ChannelObserver {
    fn on_event(&mut self, event: &TrainingEvent) {
        let _ = self.sender.send(SessionUpdate::Event(event.clone()));
    }

    fn on_status(&mut self, status: &str) {
        let _ = self.sender.send(SessionUpdate::Status(status.to_string()));
    }
}

/// Lifecycle of one scheduled session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Initializing,
    Running,
    Done,
}

/// Tick-driven prompt scheduler for one training session
///
/// Owns its stimulus sequencer and wait-time generator exclusively; a
/// scheduler must not be shared across concurrent sessions.
#[derive(Debug)]
pub struct SessionScheduler {
    catalog: GestureCatalog,
    repetitions: u32,
    max_wait_ms: u64,
    show_rest: bool,
    seed: Option<u64>,
    sequencer: StimulusSequencer,
    waits: WaitTimeGenerator,
    state: SchedulerState,
    rest_next: bool,
    status: String,
    deadline: Option<Instant>,
    help_cursor: usize,
}

impl SessionScheduler {
    /// Build a scheduler from a catalog and session configuration,
    /// entropy-seeded
    pub fn new(catalog: GestureCatalog, config: &SessionConfig) -> Self {
        Self::build(catalog, config, None)
    }

    /// Build a scheduler whose shuffle and wait draws are reproducible
    pub fn with_seed(catalog: GestureCatalog, config: &SessionConfig, seed: u64) -> Self {
        Self::build(catalog, config, Some(seed))
    }

    fn build(catalog: GestureCatalog, config: &SessionConfig, seed: Option<u64>) -> Self {
        let labels: Vec<String> = catalog.labels().map(String::from).collect();
        let (sequencer, waits) = Self::generators(
            &labels,
            config.repetitions,
            config.max_wait_ms,
            config.show_rest,
            seed,
        );
        Self {
            catalog,
            repetitions: config.repetitions,
            max_wait_ms: config.max_wait_ms,
            show_rest: config.show_rest,
            seed,
            sequencer,
            waits,
            state: SchedulerState::Idle,
            rest_next: false,
            status: String::new(),
            deadline: None,
            help_cursor: 0,
        }
    }

    fn generators(
        labels: &[String],
        repetitions: u32,
        max_wait_ms: u64,
        show_rest: bool,
        seed: Option<u64>,
    ) -> (StimulusSequencer, WaitTimeGenerator) {
        match seed {
            Some(seed) => (
                StimulusSequencer::with_rng(
                    labels.iter().cloned(),
                    repetitions,
                    StdRng::seed_from_u64(seed),
                ),
                WaitTimeGenerator::with_rng(
                    max_wait_ms,
                    show_rest,
                    StdRng::seed_from_u64(seed.wrapping_add(1)),
                ),
            ),
            None => (
                StimulusSequencer::new(labels.iter().cloned(), repetitions),
                WaitTimeGenerator::new(max_wait_ms, show_rest),
            ),
        }
    }

    /// Arm the session: reshuffle the prompt run, clear the rest toggle, and
    /// return the first tick deadline, `now` plus the initial delay.
    ///
    /// Fails with [`TrainError::AlreadyRunning`] while a pending deadline is
    /// armed; call [`stop`](Self::stop) first.
    pub fn start(
        &mut self,
        now: Instant,
        observer: &mut dyn SessionObserver,
    ) -> Result<Instant, TrainError> {
        if self.deadline.is_some() {
            warn!("start rejected: a tick deadline is still armed");
            return Err(TrainError::AlreadyRunning);
        }
        let labels: Vec<String> = self.catalog.labels().map(String::from).collect();
        let (sequencer, waits) = Self::generators(
            &labels,
            self.repetitions,
            self.max_wait_ms,
            self.show_rest,
            self.seed,
        );
        self.sequencer = sequencer;
        self.waits = waits;
        self.rest_next = false;
        self.state = SchedulerState::Initializing;
        self.set_status(START_LABEL, observer);
        let deadline = now + Duration::from_millis(INIT_START_MS);
        self.deadline = Some(deadline);
        info!(
            "session armed: {} prompts, rest display {}",
            self.sequencer.len(),
            if self.show_rest { "on" } else { "off" }
        );
        Ok(deadline)
    }

    /// Disarm the pending tick and return to `Idle` so a later
    /// [`start`](Self::start) is accepted
    pub fn stop(&mut self) {
        if self.deadline.take().is_some() {
            info!("session stopped with {} prompts left", self.sequencer.remaining());
        }
        self.state = SchedulerState::Idle;
        self.rest_next = false;
    }

    /// Advance the state machine by one tick
    ///
    /// Returns the next deadline, or `None` once the session is done (or was
    /// never armed). Call only from one thread; a single tick is in flight at
    /// a time.
    pub fn tick(&mut self, now: Instant, observer: &mut dyn SessionObserver) -> Option<Instant> {
        match self.state {
            SchedulerState::Idle | SchedulerState::Done => {
                debug!("tick ignored in state {:?}", self.state);
                None
            }
            SchedulerState::Initializing => {
                self.state = SchedulerState::Running;
                self.rest_next = false;
                observer.on_event(&TrainingEvent::new(TrainingEventKind::Start));
                self.arm(now, Duration::from_millis(START_WAIT_MS))
            }
            SchedulerState::Running => {
                let next = if !self.rest_next {
                    self.trial_tick(now, observer)
                } else {
                    self.rest_tick(now, observer)
                };
                if self.state == SchedulerState::Running && self.show_rest {
                    self.rest_next = !self.rest_next;
                }
                next
            }
        }
    }

    fn trial_tick(
        &mut self,
        now: Instant,
        observer: &mut dyn SessionObserver,
    ) -> Option<Instant> {
        let wait = self.waits.next(Phase::Trial);
        match self.sequencer.next().map(String::from) {
            Some(label) => {
                let hint = self.help_text(&label);
                self.set_status(&format!("{label}\n{hint}"), observer);
                observer.on_event(&TrainingEvent::gesture(label));
                self.arm(now, wait)
            }
            None => {
                self.deadline = None;
                self.state = SchedulerState::Done;
                self.set_status(DONE_LABEL, observer);
                observer.on_event(&TrainingEvent::new(TrainingEventKind::End));
                info!("session complete");
                None
            }
        }
    }

    fn rest_tick(&mut self, now: Instant, observer: &mut dyn SessionObserver) -> Option<Instant> {
        let wait = self.waits.next(Phase::Rest);
        self.set_status(REST_LABEL, observer);
        self.arm(now, wait)
    }

    fn arm(&mut self, now: Instant, wait: Duration) -> Option<Instant> {
        let deadline = now + wait;
        self.deadline = Some(deadline);
        debug!("next tick in {} ms", wait.as_millis());
        Some(deadline)
    }

    fn set_status(&mut self, status: &str, observer: &mut dyn SessionObserver) {
        self.status = status.to_string();
        observer.on_status(status);
    }

    /// Advisory hint for a prompt: the fixed slow-movement reminder for
    /// static gestures, empty otherwise.
    fn help_text(&mut self, label: &str) -> &'static str {
        if self.catalog.is_static(label) {
            // vestigial letter walk, kept for parity; never shown
            self.help_cursor = (self.help_cursor + 1) % HELP_ALPHABET.len();
            STATIC_HELP_TEXT
        } else {
            ""
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn show_rest(&self) -> bool {
        self.show_rest
    }

    /// Current status text, as last reported to observers
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Pending tick deadline, if armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Drive a scheduler to completion against the wall clock
///
/// Owns the sleeping between ticks; the scheduler itself never blocks. Ticks
/// are strictly sequential, matching the cooperative single-tick model.
pub fn run_session(
    scheduler: &mut SessionScheduler,
    observer: &mut dyn SessionObserver,
) -> Result<(), TrainError> {
    let mut deadline = scheduler.start(Instant::now(), observer)?;
    loop {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        match scheduler.tick(Instant::now(), observer) {
            Some(next) => deadline = next,
            None => return Ok(()),
        }
    }
}
