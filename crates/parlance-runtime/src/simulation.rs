//! Simulation: the naming-game population and its tick loop.
//!
//! The simulation owns the grid, the agents, the vocabulary registry,
//! the success window, and the run's random source.
//!
//! Each tick:
//! 1. The activation order is reshuffled
//! 2. Each agent in that order wanders one cell
//! 3. It talks to a random agent sharing its new cell, if any
//! 4. Scored outcomes update its running success and the success window
//! 5. It adapts its vocabulary from the scored outcome
//! 6. The tick counter advances and, if enabled, a step record is collected
//!
//! Agents act on live state: a hearer corrected early in a tick already
//! uses its new coupling when it speaks later in the same tick.
//!
//! A broken lexicon/registry invariant aborts the run. The failing tick
//! returns the error and the simulation stays `Stopped`.

use crate::grid_impl::GridField;
use crate::metrics::{self, ConvergenceMetrics, StepRecord};
use crate::rng::{create_rng, SimRng};
use crate::tracker::SuccessTracker;
use parlance_agents::language_agent::{AdaptationOutcome, LanguageAgent};
use parlance_core::config::SimulationConfig;
use parlance_core::error::{BoundaryError, InvariantViolation, ParlanceError, Result};
use parlance_core::events::LexiconEvent;
use parlance_core::field::SpatialField;
use parlance_core::registry::VocabularyRegistry;
use parlance_core::types::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Event emitted by the simulation during a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    /// An agent stepped to a neighbouring cell.
    Moved { agent: AgentId, from: Cell, to: Cell },
    /// An agent talked to a cellmate.
    Exchanged {
        speaker: AgentId,
        outcome: ExchangeOutcome,
        /// What adaptation did; `None` for unscored exchanges.
        adaptation: Option<AdaptationOutcome>,
    },
    /// An agent's vocabulary changed.
    Lexicon(LexiconEvent),
    /// A tick completed.
    TickComplete {
        tick: Tick,
        success: f64,
        average_success: f64,
        total_dialogs: u64,
    },
}

/// Statistics about the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    pub tick: Tick,
    pub state: SimulationState,
    pub population: usize,
    pub literate: usize,
    pub success: f64,
    pub average_success: f64,
    pub window_len: usize,
    pub total_dialogs: u64,
    /// Distinct (meaning, word) pairs in use.
    pub distinct_words: usize,
    /// Agent couplings across the population.
    pub total_couplings: usize,
    /// Cells holding at least one agent.
    pub occupied_cells: usize,
}

/// A serializable snapshot of an agent's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Cell,
    pub heading: Heading,
    pub known_meanings: Vec<Meaning>,
    pub couplings: BTreeMap<Meaning, Word>,
    pub comm_success: f64,
    pub number_of_dialogs: u64,
    pub literate: bool,
}

impl From<&LanguageAgent> for AgentSnapshot {
    fn from(agent: &LanguageAgent) -> Self {
        Self {
            id: agent.id(),
            position: agent.position(),
            heading: agent.heading(),
            known_meanings: agent.lexicon().meanings().iter().copied().collect(),
            couplings: agent
                .lexicon()
                .couplings()
                .map(|(meaning, word)| (meaning, word.clone()))
                .collect(),
            comm_success: agent.comm_success(),
            number_of_dialogs: agent.number_of_dialogs(),
            literate: agent.is_literate(),
        }
    }
}

/// A complete read-only view of the simulation at a tick boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub tick: Tick,
    pub agents: Vec<AgentSnapshot>,
    pub registry: VocabularyRegistry,
    pub stats: SimulationStats,
}

/// The naming-game simulation.
pub struct Simulation {
    config: SimulationConfig,
    field: GridField,
    agents: Vec<LanguageAgent>,
    registry: VocabularyRegistry,
    tracker: SuccessTracker,
    rng: SimRng,
    tick: Tick,
    state: SimulationState,
    event_history: Vec<(Tick, SimulationEvent)>,
    records: Vec<StepRecord>,
}

impl Simulation {
    /// Validate the configuration, place every agent on a random cell,
    /// and seed the first `literate_count` agents with the canonical table.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = create_rng(config.seed);
        let mut field = GridField::new(config.width, config.height, config.wrap);
        let mut registry = VocabularyRegistry::with_meaning_count(config.meaning_count());
        let mut agents = Vec::with_capacity(config.population_size);

        for index in 0..config.population_size {
            let id = AgentId::new(index as u32);
            let cell = Cell::new(
                rng.random_range(0..i64::from(config.width)),
                rng.random_range(0..i64::from(config.height)),
            );
            let heading = Heading::CARDINALS[rng.random_range(0..Heading::CARDINALS.len())];
            field.place(id, cell)?;
            let mut agent = LanguageAgent::new(id, cell, heading);
            if index < config.literate_count {
                agent.seed_canonical(config.meaning_count(), &mut registry)?;
            }
            agents.push(agent);
        }

        info!(
            population = config.population_size,
            literate = config.literate_count,
            width = config.width,
            height = config.height,
            wrap = config.wrap,
            seed = config.seed,
            "simulation constructed"
        );

        Ok(Self {
            tracker: SuccessTracker::new(config.success_window),
            config,
            field,
            agents,
            registry,
            rng,
            tick: 0,
            state: SimulationState::Constructed,
            event_history: Vec::new(),
            records: Vec::new(),
        })
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> Result<Vec<SimulationEvent>> {
        match self.state {
            SimulationState::Stopped => return Err(ParlanceError::Stopped(self.tick)),
            SimulationState::Constructed => {
                info!("simulation running");
                self.state = SimulationState::Running;
            }
            SimulationState::Running => {}
        }

        let tick = self.tick + 1;
        let mut events = Vec::new();
        if let Err(err) = self.step_agents(&mut events) {
            return Err(self.abort(err));
        }
        if self.config.check_invariants {
            if let Err(violation) = self.check_invariants() {
                return Err(self.abort(violation.into()));
            }
        }
        self.tick = tick;

        let success = self.success();
        let total_dialogs = metrics::total_dialogs(&self.agents);
        events.push(SimulationEvent::TickComplete {
            tick,
            success,
            average_success: self.average_success(),
            total_dialogs,
        });
        debug!(tick, success, dialogs = total_dialogs, "tick complete");
        if self.config.record_steps {
            let record = self.step_record();
            self.records.push(record);
        }

        if self.config.record_history {
            self.event_history
                .extend(events.iter().map(|event| (tick, event.clone())));
        }
        Ok(events)
    }

    fn step_agents(&mut self, events: &mut Vec<SimulationEvent>) -> Result<()> {
        let mut order: Vec<usize> = (0..self.agents.len()).collect();
        order.shuffle(&mut self.rng);

        let mut lexicon_events = Vec::new();
        for index in order {
            let speaker_id = self.agents[index].id();
            let from = self.agents[index].wander(&mut self.field, &mut self.rng)?;
            let to = self.agents[index].position();
            events.push(SimulationEvent::Moved { agent: speaker_id, from, to });

            let occupants = self.field.occupants(&to);
            let Some(hearer_id) = self.agents[index].choose_hearer(occupants, &mut self.rng) else {
                continue;
            };
            let meaning = LanguageAgent::choose_meaning(&mut self.rng, self.config.meaning_count());

            let (speaker, hearer) = pair_mut(&mut self.agents, index, hearer_id.index())?;
            let outcome = speaker.speak(
                hearer,
                meaning,
                &self.config,
                &mut self.rng,
                &mut self.registry,
                &mut lexicon_events,
            )?;

            let adaptation = match outcome.conversation() {
                Some(conversation) => {
                    speaker.record_dialog(conversation.success);
                    self.tracker.record(conversation.success);
                    Some(speaker.adapt(
                        conversation,
                        &self.config,
                        &mut self.rng,
                        &mut self.registry,
                        &mut lexicon_events,
                    )?)
                }
                None => None,
            };

            events.push(SimulationEvent::Exchanged {
                speaker: speaker_id,
                outcome,
                adaptation,
            });
            events.extend(lexicon_events.drain(..).map(SimulationEvent::Lexicon));
        }
        Ok(())
    }

    fn abort(&mut self, err: ParlanceError) -> ParlanceError {
        error!(tick = self.tick, error = %err, "simulation aborted");
        self.state = SimulationState::Stopped;
        err
    }

    /// Run the simulation for N ticks.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<Vec<SimulationEvent>>> {
        let mut all_events = Vec::new();
        for _ in 0..ticks {
            all_events.push(self.tick()?);
        }
        Ok(all_events)
    }

    /// Tick until `done` holds or `max_ticks` ticks have run.
    ///
    /// Returns the tick at which `done` first held, checked before every
    /// tick and after the last one.
    pub fn run_until<F>(&mut self, mut done: F, max_ticks: u64) -> Result<Option<Tick>>
    where
        F: FnMut(&Simulation) -> bool,
    {
        for _ in 0..max_ticks {
            if done(self) {
                return Ok(Some(self.tick));
            }
            self.tick()?;
        }
        Ok(done(self).then_some(self.tick))
    }

    /// Stop the run. Further ticks are rejected.
    pub fn stop(&mut self) {
        if self.state != SimulationState::Stopped {
            info!(tick = self.tick, "simulation stopped");
        }
        self.state = SimulationState::Stopped;
    }

    /// Verify both population invariants: every agent's maps are exact
    /// inverses and the registry lists exactly the couplings agents hold.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        for agent in &self.agents {
            agent.verify(&self.registry)?;
        }
        for (meaning, word, agent) in self.registry.couplings() {
            let holds = self
                .agents
                .get(agent.index())
                .and_then(|a| a.lexicon().word_for(meaning))
                .map_or(false, |w| w == word);
            if !holds {
                return Err(InvariantViolation::RegistryStale {
                    agent,
                    word: word.clone(),
                    meaning,
                });
            }
        }
        Ok(())
    }

    // --- Observation ---

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn agents(&self) -> &[LanguageAgent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&LanguageAgent> {
        self.agents.get(id.index())
    }

    pub fn field(&self) -> &GridField {
        &self.field
    }

    pub fn registry(&self) -> &VocabularyRegistry {
        &self.registry
    }

    pub fn tracker(&self) -> &SuccessTracker {
        &self.tracker
    }

    /// Windowed population success.
    pub fn success(&self) -> f64 {
        self.tracker.metric()
    }

    /// Mean of every agent's running success.
    pub fn average_success(&self) -> f64 {
        metrics::average_success(&self.agents)
    }

    pub fn convergence(&self) -> ConvergenceMetrics {
        metrics::convergence(&self.registry)
    }

    /// Get the full event history with tick numbers. Empty unless
    /// `record_history` is set.
    pub fn event_history(&self) -> &[(Tick, SimulationEvent)] {
        &self.event_history
    }

    /// One record per completed tick. Empty unless `record_steps` is set.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            tick: self.tick,
            state: self.state,
            population: self.agents.len(),
            literate: self.agents.iter().filter(|a| a.is_literate()).count(),
            success: self.success(),
            average_success: self.average_success(),
            window_len: self.tracker.len(),
            total_dialogs: metrics::total_dialogs(&self.agents),
            distinct_words: self.registry.coupling_count(),
            total_couplings: self.registry.usage_count(),
            occupied_cells: self.field.occupied_cells().count(),
        }
    }

    /// Take a serializable snapshot of the current state.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.tick,
            agents: self.agents.iter().map(AgentSnapshot::from).collect(),
            registry: self.registry.clone(),
            stats: self.stats(),
        }
    }

    /// The snapshot as pretty-printed JSON.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    fn step_record(&self) -> StepRecord {
        StepRecord {
            tick: self.tick,
            success: self.success(),
            average_success: self.average_success(),
            total_dialogs: metrics::total_dialogs(&self.agents),
            distinct_words: self.registry.coupling_count(),
            convergence: self.convergence().overall,
            known_meanings: self
                .agents
                .iter()
                .map(|a| a.lexicon().meanings().len())
                .collect(),
        }
    }
}

/// Mutable references to two distinct agents.
fn pair_mut(
    agents: &mut [LanguageAgent],
    first: usize,
    second: usize,
) -> std::result::Result<(&mut LanguageAgent, &mut LanguageAgent), ParlanceError> {
    if first == second || first.max(second) >= agents.len() {
        return Err(BoundaryError::UnknownAgent(AgentId::new(second as u32)).into());
    }
    if first < second {
        let (left, right) = agents.split_at_mut(second);
        Ok((&mut left[first], &mut right[0]))
    } else {
        let (left, right) = agents.split_at_mut(first);
        Ok((&mut right[0], &mut left[second]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> SimulationConfig {
        SimulationConfig {
            population_size: 4,
            width: 2,
            height: 2,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn construction_places_every_agent() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(sim.state(), SimulationState::Constructed);
        assert_eq!(sim.agents().len(), 5);
        assert_eq!(sim.field().agent_count(), 5);
        for agent in sim.agents() {
            assert_eq!(sim.field().position_of(agent.id()), Some(agent.position()));
        }
        assert_eq!(sim.registry().meaning_count(), 5);
        let stats = sim.stats();
        assert!((1..=5).contains(&stats.occupied_cells));
        assert_eq!(stats.population, 5);
        assert_eq!(sim.success(), 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig { literate_count: 9, ..Default::default() };
        assert!(matches!(Simulation::new(config), Err(ParlanceError::Config(_))));
    }

    #[test]
    fn literate_agents_share_a_full_vocabulary() {
        let config = SimulationConfig { literate_count: 5, ..Default::default() };
        let sim = Simulation::new(config).unwrap();
        assert!(sim.agents().iter().all(LanguageAgent::is_literate));
        assert!((sim.convergence().overall - 1.0).abs() < 1e-12);
        assert_eq!(sim.registry().usage_count(), 25);
        assert!(sim.check_invariants().is_ok());
    }

    #[test]
    fn first_tick_moves_to_running() {
        let mut sim = Simulation::new(small(1)).unwrap();
        let events = sim.tick().unwrap();
        assert_eq!(sim.state(), SimulationState::Running);
        assert_eq!(sim.current_tick(), 1);
        let moves = events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::Moved { .. }))
            .count();
        assert_eq!(moves, 4, "every agent moves once per tick");
        assert!(matches!(events.last(), Some(SimulationEvent::TickComplete { tick: 1, .. })));
    }

    #[test]
    fn step_records_are_opt_in() {
        let mut sim = Simulation::new(small(6)).unwrap();
        sim.run(10).unwrap();
        assert!(sim.records().is_empty());

        let config = SimulationConfig { record_steps: true, ..small(6) };
        let mut sim = Simulation::new(config).unwrap();
        let per_tick = sim.run(10).unwrap();
        assert_eq!(sim.records().len(), 10);
        // The tick summary event and the record agree.
        let Some(SimulationEvent::TickComplete { success, total_dialogs, .. }) = per_tick[9].last() else {
            panic!("every tick ends with TickComplete");
        };
        assert_eq!(sim.records()[9].success, *success);
        assert_eq!(sim.records()[9].total_dialogs, *total_dialogs);
    }

    #[test]
    fn stopped_simulation_rejects_ticks() {
        let mut sim = Simulation::new(small(2)).unwrap();
        sim.run(3).unwrap();
        sim.stop();
        assert_eq!(sim.state(), SimulationState::Stopped);
        assert_eq!(sim.tick(), Err(ParlanceError::Stopped(3)));
    }

    #[test]
    fn history_is_opt_in() {
        let mut sim = Simulation::new(small(3)).unwrap();
        sim.run(5).unwrap();
        assert!(sim.event_history().is_empty());

        let config = SimulationConfig { record_history: true, ..small(3) };
        let mut sim = Simulation::new(config).unwrap();
        let per_tick = sim.run(5).unwrap();
        let total: usize = per_tick.iter().map(Vec::len).sum();
        assert_eq!(sim.event_history().len(), total);
        assert_eq!(sim.event_history().last().map(|(t, _)| *t), Some(5));
    }

    #[test]
    fn run_until_reports_the_tick() {
        let mut sim = Simulation::new(small(4)).unwrap();
        let reached = sim.run_until(|s| s.current_tick() >= 7, 100).unwrap();
        assert_eq!(reached, Some(7));

        let mut sim = Simulation::new(small(4)).unwrap();
        assert_eq!(sim.run_until(|_| false, 3).unwrap(), None);
        assert_eq!(sim.current_tick(), 3);
    }

    #[test]
    fn pair_mut_rejects_aliasing() {
        let mut agents = vec![
            LanguageAgent::new(AgentId::new(0), Cell::new(0, 0), Heading::default()),
            LanguageAgent::new(AgentId::new(1), Cell::new(0, 0), Heading::default()),
        ];
        assert!(pair_mut(&mut agents, 1, 1).is_err());
        let (a, b) = pair_mut(&mut agents, 1, 0).unwrap();
        assert_eq!((a.id(), b.id()), (AgentId::new(1), AgentId::new(0)));
    }
}
