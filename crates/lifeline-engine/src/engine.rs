//! The simulation engine
//!
//! [`SimulationEngine`] owns the population, the generation being recorded,
//! the history of committed generations and the saved snapshots. Every
//! operation runs to completion before it returns; nothing here blocks,
//! sleeps or spawns.
//!
//! # Time travel
//!
//! Every birth and death lands in the current [`Generation`]. A forward step
//! commits that generation to history and opens the next one. A backward
//! step inverts the current generation, which throws away any edits made
//! since the last step together with the births and deaths of that step,
//! and then reopens the newest committed generation. Undone steps cannot be
//! redone.
//!
//! # Example
//!
//! ```
//! use lifeline_engine::SimulationEngine;
//!
//! let mut engine = SimulationEngine::new();
//! engine.add_pattern("Blinker", 0, 0).unwrap();
//!
//! engine.step_forward();
//! assert_eq!(engine.live_cells(), vec![(1, 0), (1, 1), (1, 2)]);
//!
//! engine.step_backward();
//! assert_eq!(engine.live_cells(), vec![(0, 1), (1, 1), (2, 1)]);
//! ```

use crate::observer::{EngineEvent, ListenerId, Listeners};
use crate::timer::{PlayTimer, TimerId};
use crate::{transition, EngineConfig, Error, Result, SnapshotStore};
use lifeline_core::{
    CellAddress, CellKey, Generation, GenerationHistory, LifeRng, MutationEvent, Pattern,
    PatternLibrary, Population, Snapshot, SnapshotSummary,
};
use lifeline_history::{HistoryBuffer, HistoryStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Whether the play loop is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Paused,
    Running,
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }
}

/// Outcome of one committed forward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Sequence number of the generation the step opened
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    /// Live cells after the step
    pub population: usize,
}

/// Game of Life engine with bounded undo
///
/// Generic over the history storage; [`HistoryBuffer`] is the default.
pub struct SimulationEngine<H: GenerationHistory = HistoryBuffer> {
    config: EngineConfig,
    status: Status,
    population: Population,
    /// Diff log since the last committed step
    current: Generation,
    history: H,
    snapshots: SnapshotStore,
    patterns: Arc<PatternLibrary>,
    rng: LifeRng,
    timer: PlayTimer,
    listeners: Listeners,
}

impl SimulationEngine<HistoryBuffer> {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let history = HistoryBuffer::new(config.history_size);
        Self::build(config, history)
    }

    /// Create an engine from a configuration, validating it first
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let history = HistoryBuffer::new(config.history_size);
        Ok(Self::build(config, history))
    }

    /// Statistics about the history buffer
    pub fn history_stats(&self) -> HistoryStats {
        self.history.stats()
    }
}

impl Default for SimulationEngine<HistoryBuffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: GenerationHistory> SimulationEngine<H> {
    /// Create an engine around caller-provided history storage
    ///
    /// `config.history_size` is not applied to `history`; the storage keeps
    /// whatever bound it was built with.
    pub fn with_history(config: EngineConfig, history: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, history))
    }

    fn build(config: EngineConfig, history: H) -> Self {
        let rng = LifeRng::new(config.seed);
        Self {
            config,
            status: Status::Paused,
            population: Population::new(),
            current: Generation::new(0),
            history,
            snapshots: SnapshotStore::new(),
            patterns: PatternLibrary::standard(),
            rng,
            timer: PlayTimer::new(),
            listeners: Listeners::new(),
        }
    }

    /// Replace the pattern catalog
    pub fn with_patterns(mut self, patterns: Arc<PatternLibrary>) -> Self {
        self.patterns = patterns;
        self
    }

    // ========================================================================
    // Observation
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Sequence number of the current generation
    pub fn generation_count(&self) -> u64 {
        self.current.sequence()
    }

    /// The generation being recorded
    pub fn current_generation(&self) -> &Generation {
        &self.current
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_count(&self) -> usize {
        self.population.count()
    }

    /// Live cell coordinates, sorted by row then column
    pub fn live_cells(&self) -> Vec<(i64, i64)> {
        self.population.coordinates()
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.population.contains(&CellKey::from_coords(x, y))
    }

    /// Number of committed generations that can be stepped back into
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    pub fn snapshots(&self) -> Vec<SnapshotSummary> {
        self.snapshots.summaries()
    }

    pub fn snapshot(&self, index: usize) -> Result<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn interval(&self) -> Duration {
        self.config.interval()
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    /// Register a listener for every engine event
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Register a listener that only hears about resets
    pub fn on_reset(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.listeners.on_reset(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn emit(&mut self, event: EngineEvent) {
        self.listeners.notify(&event);
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Commit the current generation and advance one B3/S23 step
    pub fn step_forward(&mut self) -> StepReport {
        let next = self.current.successor();
        let committed = std::mem::replace(&mut self.current, next);
        self.history.push(committed);

        let view = self.population.snapshot_view();
        let transition = transition::compute(&view);
        let births = transition.births.len();
        let deaths = transition.deaths.len();

        for cell in transition.births {
            self.birth(cell, false);
        }
        for cell in transition.deaths {
            self.death(cell.key(), false);
        }

        let report = StepReport {
            generation: self.current.sequence(),
            births,
            deaths,
            population: self.population.count(),
        };
        debug!(
            generation = report.generation,
            births, deaths,
            population = report.population,
            "Stepped forward"
        );
        self.emit(EngineEvent::Stepped {
            generation: report.generation,
            births,
            deaths,
        });
        report
    }

    /// Undo everything since the last committed step, then reopen it
    ///
    /// Returns `false` without doing anything when there is nothing to undo.
    pub fn step_backward(&mut self) -> bool {
        if self.history.is_empty() && self.current.is_empty() {
            return false;
        }

        let discarded = std::mem::take(&mut self.current);
        for entry in discarded.entries() {
            match entry.event {
                MutationEvent::Birth | MutationEvent::ManualBirth => {
                    self.population.remove(entry.cell.key());
                }
                MutationEvent::Death | MutationEvent::ManualDeath => {
                    self.population.insert(entry.cell.clone());
                }
            }
        }
        self.current = self.history.pop_last().unwrap_or_default();

        let generation = self.current.sequence();
        debug!(
            generation,
            undone = discarded.len(),
            population = self.population.count(),
            "Stepped backward"
        );
        self.emit(EngineEvent::SteppedBack { generation });
        true
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Returns `true` if the cell was dead
    ///
    /// A cell that is already alive and already has an entry in the current
    /// generation gets that entry overwritten. One that is alive with no
    /// entry was alive when the generation opened, so nothing is recorded.
    fn birth(&mut self, cell: CellAddress, manual: bool) -> bool {
        if self.population.contains(cell.key()) {
            if self.current.entry(cell.key()).is_some() {
                self.current.record_birth(cell, manual);
            }
            return false;
        }
        self.population.insert(cell.clone());
        self.current.record_birth(cell, manual);
        true
    }

    fn death(&mut self, key: &CellKey, manual: bool) -> bool {
        match self.population.remove(key) {
            Some(cell) => {
                self.current.record_death(cell, manual);
                true
            }
            None => false,
        }
    }

    /// Bring a cell to life as a manual edit
    ///
    /// Returns `false` if it was already alive. If this generation already
    /// recorded the cell's birth, the entry becomes a manual birth; otherwise
    /// nothing is recorded.
    pub fn add_cell(&mut self, x: i64, y: i64) -> bool {
        self.add_cell_with(x, y, true)
    }

    /// Bring a cell to life, recorded as manual or automatic
    pub fn add_cell_with(&mut self, x: i64, y: i64, manual: bool) -> bool {
        let added = self.birth(CellAddress::new(x, y), manual);
        if added {
            trace!(x, y, manual, "Cell added");
        }
        added
    }

    /// Kill a cell as a manual edit
    ///
    /// Returns `false` if it was not alive, in which case nothing is recorded.
    pub fn kill_cell(&mut self, x: i64, y: i64) -> bool {
        self.kill_cell_with(x, y, true)
    }

    /// Kill a cell, recorded as manual or automatic
    pub fn kill_cell_with(&mut self, x: i64, y: i64, manual: bool) -> bool {
        let killed = self.death(&CellKey::from_coords(x, y), manual);
        if killed {
            trace!(x, y, manual, "Cell killed");
        }
        killed
    }

    /// Flip a cell as a manual edit, returning whether it is now alive
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> bool {
        if self.kill_cell(x, y) {
            false
        } else {
            self.add_cell(x, y)
        }
    }

    /// Stamp a catalog pattern with its origin at `(x, y)`
    ///
    /// Returns how many cells came alive; cells that were already alive
    /// stay alive and are not recorded again.
    pub fn add_pattern(&mut self, name: &str, x: i64, y: i64) -> Result<usize> {
        let patterns = Arc::clone(&self.patterns);
        let pattern = patterns.get(name).ok_or_else(|| Error::unknown_pattern(name))?;
        Ok(self.stamp_pattern(pattern, x, y))
    }

    /// Stamp any pattern with its origin at `(x, y)`
    pub fn stamp_pattern(&mut self, pattern: &Pattern, x: i64, y: i64) -> usize {
        let mut added = 0;
        for &(dx, dy) in pattern.cells() {
            let cell = CellAddress::new(x.wrapping_add(dx), y.wrapping_add(dy));
            if self.birth(cell, true) {
                added += 1;
            }
        }
        debug!(pattern = pattern.name(), x, y, added, "Pattern stamped");
        added
    }

    /// Clear the board and stamp random patterns inside the configured window
    pub fn randomize(&mut self) {
        self.reset();

        let patterns = Arc::clone(&self.patterns);
        let bounds = self.config.randomize.clone();
        let stamps = self.rng.range_usize(bounds.min_stamps, bounds.max_stamps);

        for _ in 0..stamps {
            let Some(pattern) = self.rng.pick(patterns.as_slice()) else {
                break;
            };
            let x = self.rng.range_i64(bounds.min_x, bounds.max_x);
            let y = self.rng.range_i64(bounds.min_y, bounds.max_y);
            self.stamp_pattern(pattern, x, y);
        }

        info!(
            stamps,
            population = self.population.count(),
            "Randomized board"
        );
    }

    /// Reseed the generator `randomize` draws from
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = LifeRng::new(seed);
    }

    /// Stop playing and clear cells, the current generation and history
    ///
    /// Saved snapshots are kept.
    pub fn reset(&mut self) {
        self.stop();
        self.population = Population::new();
        self.current = Generation::new(0);
        self.history.clear();
        info!("Engine reset");
        self.emit(EngineEvent::Reset);
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Save the live cells under a default name, returning the index
    pub fn save_snapshot(&mut self) -> usize {
        let index = self.snapshots.save(&self.population);
        self.after_snapshot_saved(index);
        index
    }

    /// Save the live cells under `name`, returning the index
    pub fn save_snapshot_named(&mut self, name: impl Into<String>) -> usize {
        let index = self.snapshots.save_named(name, &self.population);
        self.after_snapshot_saved(index);
        index
    }

    fn after_snapshot_saved(&mut self, index: usize) {
        info!(
            index,
            total_cells = self.population.count(),
            "Snapshot saved"
        );
        self.emit(EngineEvent::SnapshotSaved { index });
    }

    pub fn delete_snapshot(&mut self, index: usize) -> Result<()> {
        let removed = self.snapshots.delete(index)?;
        info!(index, name = removed.name(), "Snapshot deleted");
        self.emit(EngineEvent::SnapshotDeleted { index });
        Ok(())
    }

    /// Reset, then redraw the snapshot's cells as manual edits
    ///
    /// The restore lands in the current generation, so one step backward
    /// undoes it.
    pub fn restore_snapshot(&mut self, index: usize) -> Result<()> {
        let cells: Vec<CellAddress> = self.snapshots.get(index)?.cells().cloned().collect();
        self.reset();
        for cell in cells {
            self.birth(cell, true);
        }
        info!(
            index,
            population = self.population.count(),
            "Snapshot restored"
        );
        self.emit(EngineEvent::SnapshotRestored { index });
        Ok(())
    }

    // ========================================================================
    // Play loop
    // ========================================================================

    /// Start playing; the first tick is due one interval from now
    pub fn start(&mut self) -> TimerId {
        self.start_at(Instant::now())
    }

    /// Start playing as of `now`
    ///
    /// Starting while running re-arms the trigger, so there is never more
    /// than one.
    pub fn start_at(&mut self, now: Instant) -> TimerId {
        let id = self.timer.arm(now, self.config.interval());
        if !self.status.is_running() {
            self.status = Status::Running;
            info!(interval_ms = self.config.interval_ms, %id, "Play loop started");
            self.emit(EngineEvent::StatusChanged(Status::Running));
        }
        id
    }

    /// Stop playing and cancel the trigger
    pub fn stop(&mut self) {
        self.timer.cancel();
        if self.status.is_running() {
            self.status = Status::Paused;
            info!(generation = self.current.sequence(), "Play loop stopped");
            self.emit(EngineEvent::StatusChanged(Status::Paused));
        }
    }

    /// Change the play-loop interval
    pub fn set_interval(&mut self, interval_ms: u64) -> Result<()> {
        self.set_interval_at(interval_ms, Instant::now())
    }

    /// Change the play-loop interval as of `now`
    ///
    /// While running, the trigger is cancelled and re-armed with the new
    /// interval in the same call.
    pub fn set_interval_at(&mut self, interval_ms: u64, now: Instant) -> Result<()> {
        if interval_ms == 0 {
            return Err(Error::InvalidArgument(
                "interval must be at least 1 ms".to_string(),
            ));
        }
        self.config.interval_ms = interval_ms;
        if self.status.is_running() {
            self.timer.arm(now, self.config.interval());
        }
        info!(interval_ms, "Interval changed");
        self.emit(EngineEvent::IntervalChanged { interval_ms });
        Ok(())
    }

    /// ID of the armed trigger, if any
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.id()
    }

    /// When the next tick is due, if playing
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.timer.next_due()
    }

    /// Run a tick if one is due now
    pub fn poll(&mut self) -> Option<StepReport> {
        self.poll_at(Instant::now())
    }

    /// Run a tick if one is due at `now`
    ///
    /// A trigger that outlived a pause is cancelled here instead of stepping.
    pub fn poll_at(&mut self, now: Instant) -> Option<StepReport> {
        if !self.timer.is_armed() {
            return None;
        }
        if !self.status.is_running() {
            self.timer.cancel();
            return None;
        }
        if !self.timer.fire(now) {
            return None;
        }
        Some(self.step_forward())
    }

    /// Handle a firing the host scheduled for trigger `id`
    ///
    /// Firings for a trigger that has since been cancelled or re-armed are
    /// ignored.
    pub fn on_timer(&mut self, id: TimerId, now: Instant) -> Option<StepReport> {
        if self.timer.id() != Some(id) {
            trace!(%id, "Ignoring stale timer firing");
            return None;
        }
        self.poll_at(now)
    }
}
