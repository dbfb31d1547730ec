// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device controller: ownership root and command dispatcher.
//!
//! [`DeviceController`] owns every process-wide structure of the
//! engine (registry tables, timer engine, loop buffer, device state,
//! configuration) and passes them to the tokenizer and dispatcher by
//! reference. All mutation happens on one cooperative thread: callers
//! drive the controller with [`DeviceController::tick`] and
//! [`DeviceController::process_pass`], or hand it to the async
//! [`DeviceController::run`] loop. A host that moves ingestion onto
//! another thread must put a channel in front of
//! [`DeviceController::ingest`] rather than sharing the controller.

use std::time::Duration;

use crate::command::{CommandRecord, TokenizeMode, Verb, tokenize};
use crate::config::DeviceConfig;
use crate::error::{ConfigError, Error, ParseError};
use crate::publish::{
    ChartDef, EventPayload, Publisher, SensorEntry, StateSnapshot, TimerEntry, WidgetDef,
};
use crate::registry::{ACTUATOR_TABLE, LOGGING_TABLE, RegistryTables, SENSOR_TABLE};
use crate::scenario::{LoopBuffer, Scenario};
use crate::state::{ActuatorState, DeviceState, StateChange};
use crate::timer::{TimerAction, TimerEngine, TimerMode, format_uptime};

/// The top-level automation engine for one device.
///
/// Commands from every origin (HTTP query parameter, MQTT payload,
/// timer expiry) funnel through [`DeviceController::ingest`] into the
/// loop buffer and are executed in strict FIFO order by
/// [`DeviceController::process_pass`]. Every externally observable
/// effect leaves through the [`Publisher`] handed in at construction.
///
/// # Examples
///
/// ```
/// use scenar_lib::DeviceController;
/// use scenar_lib::publish::RecordingPublisher;
/// use scenar_lib::scenario::Scenario;
///
/// let recorder = RecordingPublisher::new();
/// let mut controller = DeviceController::new(Box::new(recorder.clone()));
///
/// controller.set_scenario(Scenario::from_text("addkey,pump,3"));
/// controller.reload();
///
/// controller.ingest("pump,on");
/// controller.process_pass();
///
/// assert_eq!(recorder.changes().len(), 1);
/// ```
pub struct DeviceController {
    registries: RegistryTables,
    timers: TimerEngine,
    loop_buffer: LoopBuffer,
    state: DeviceState,
    config: DeviceConfig,
    scenario: Scenario,
    publisher: Box<dyn Publisher>,
    uptime: Duration,
    reload_requested: bool,
}

impl DeviceController {
    /// Creates a controller with an empty scenario and default
    /// configuration.
    #[must_use]
    pub fn new(publisher: Box<dyn Publisher>) -> Self {
        Self {
            registries: RegistryTables::new(),
            timers: TimerEngine::new(),
            loop_buffer: LoopBuffer::new(),
            state: DeviceState::new(),
            config: DeviceConfig::default(),
            scenario: Scenario::new(),
            publisher,
            uptime: Duration::ZERO,
            reload_requested: false,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Returns the current scenario script.
    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Returns the device state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns the timer engine.
    #[must_use]
    pub fn timers(&self) -> &TimerEngine {
        &self.timers
    }

    /// Returns the registry tables.
    #[must_use]
    pub fn registries(&self) -> &RegistryTables {
        &self.registries
    }

    /// Replaces the stored configuration from a JSON document.
    ///
    /// On success the new configuration takes effect at the next
    /// [`DeviceController::reload`].
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed document; the previous
    /// configuration is kept and the device keeps operating on it.
    pub fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        match DeviceConfig::from_json(json) {
            Ok(config) => {
                self.config = config;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "configuration rejected, keeping previous");
                Err(err)
            }
        }
    }

    /// Replaces the stored scenario script.
    ///
    /// Takes effect at the next [`DeviceController::reload`].
    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.scenario = scenario;
    }

    /// Queues a command string for the next processing pass.
    ///
    /// This is the single ingestion point for every command origin:
    /// HTTP query parameters, MQTT payloads, and internally generated
    /// timer actions all share the loop buffer's FIFO contract.
    pub fn ingest(&mut self, command: impl Into<String>) {
        self.loop_buffer.push(command);
    }

    /// Resolves a configuration parameter to its current value.
    ///
    /// Scenario operands written as `{name}` are substituted through
    /// this lookup, so scripts can be parametrized by live
    /// configuration instead of literals.
    #[must_use]
    pub fn add_set(&self, param_name: &str) -> Option<&str> {
        self.config.param(param_name)
    }

    /// Constructs and routes a named event with a numeric payload.
    pub fn event_gen(&self, event_name: &str, number: i64) {
        self.publisher
            .publish_event(EventPayload::numbered(event_name, number));
    }

    /// Clears all derived state and rebuilds it from the stored
    /// configuration and scenario.
    ///
    /// Runs as one uninterrupted pass of the cooperative scheduler: no
    /// command is dispatched against half-cleared state, and nothing
    /// from the previous scenario (keys, user timers, accumulators,
    /// queued commands) survives into the new one. The uptime timer
    /// and the uptime value itself are device-level and persist.
    pub fn reload(&mut self) {
        tracing::info!(
            scenario_lines = self.scenario.len(),
            "reloading device state"
        );

        self.registries.clear_all();
        self.timers.clear_user_timers();
        self.loop_buffer.clear();
        self.state.clear();

        let actuator_seeds = self.config.actuators.clone();
        let sensor_seeds = self.config.sensors.clone();
        let widget_seeds = self.config.widgets.clone();

        for seed in actuator_seeds {
            self.registries
                .table_mut(ACTUATOR_TABLE)
                .insert(seed.key, seed.slot.into());
        }
        for key in sensor_seeds {
            if let Err(err) = self.registries.table_mut(SENSOR_TABLE).assign(key.as_str()) {
                tracing::warn!(key = %key, error = %err, "sensor key not registered");
            }
        }
        for widget in widget_seeds {
            self.publisher.create_widget(widget);
        }

        if self.config.scenario_enabled() {
            let lines: Vec<String> = self.scenario.lines().map(str::to_string).collect();
            for line in lines {
                self.dispatch_line(&line);
            }
        }

        // A `reload` line inside the scenario is covered by the replay
        // in progress; honoring it would reload on every later pass.
        self.reload_requested = false;
    }

    /// Drains the loop buffer once, dispatching each command in FIFO
    /// order, and returns the number of commands taken this pass.
    ///
    /// Each record is fully dispatched (including synchronous timer
    /// side effects) before the next is taken. Commands queued during
    /// the pass are left for the next one. A reload requested by a
    /// `reload` command runs after the pass completes, never in the
    /// middle of it.
    pub fn process_pass(&mut self) -> usize {
        let batch = self.loop_buffer.drain_pass();
        let count = batch.len();
        for command in batch {
            self.dispatch_line(&command);
        }
        if self.reload_requested {
            self.reload();
        }
        count
    }

    /// Advances time: counts uptime, ticks the timer engine, and
    /// carries out fired timer actions.
    ///
    /// Command actions are re-injected into the loop buffer (executed
    /// on the next [`DeviceController::process_pass`], preserving FIFO
    /// order with everything else queued); uptime refreshes are
    /// applied and published immediately.
    pub fn tick(&mut self, elapsed: Duration) {
        self.uptime += elapsed;
        for fired in self.timers.tick(elapsed) {
            match fired.action {
                TimerAction::Command(command) => {
                    tracing::debug!(command = %command, slot = ?fired.slot, "timer action queued");
                    self.loop_buffer.push(command);
                }
                TimerAction::RefreshUptime => {
                    let change = StateChange::uptime(format_uptime(self.uptime));
                    if self.state.apply(&change) {
                        self.publisher.publish_change(change);
                    }
                }
            }
        }
    }

    /// Builds a full snapshot of engine-owned state.
    ///
    /// Every key the engine owns is present: actuator states, sensor
    /// accumulators, occupied timer slots, logging keys, and uptime.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            generated_at: chrono::Utc::now(),
            uptime: self.state.uptime().map(str::to_string),
            actuators: self.state.all_actuators(),
            sensors: self
                .state
                .all_sensors()
                .into_iter()
                .map(|(slot, acc)| SensorEntry {
                    slot,
                    last: acc.last,
                    average: acc.average(),
                    count: acc.count,
                })
                .collect(),
            timers: self
                .timers
                .iter()
                .map(|(slot, timer)| TimerEntry {
                    slot: slot.value(),
                    remaining_secs: timer.remaining().as_secs(),
                    running: timer.is_running(),
                })
                .collect(),
            logging_keys: self.state.logging_keys().to_vec(),
        }
    }

    /// Publishes a snapshot and closes the sensor measurement window.
    pub fn publish_cycle(&mut self) {
        let snapshot = self.snapshot();
        self.publisher.publish_state(snapshot);
        self.state.reset_sensor_windows();
    }

    /// Drives the controller as a firmware-style main loop.
    ///
    /// Ticks, processes one pass, and publishes a cycle on every
    /// interval. Never returns; run it under `tokio::select!` or abort
    /// the task to stop.
    pub async fn run(&mut self, tick_interval: Duration) {
        let mut interval = tokio::time::interval(tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick(tick_interval);
            self.process_pass();
            self.publish_cycle();
        }
    }

    /// Tokenizes and dispatches one raw command line.
    ///
    /// Malformed lines are logged and skipped; processing always
    /// continues.
    fn dispatch_line(&mut self, line: &str) {
        let Some(record) = tokenize(line, TokenizeMode::detect(line)) else {
            tracing::trace!(line = %line, "skipping empty command line");
            return;
        };
        let record = self.resolve_params(record);
        if let Err(err) = self.dispatch(&record) {
            tracing::warn!(line = %line, error = %err, "command skipped");
        }
    }

    /// Substitutes `{param}` operands with live configuration values.
    ///
    /// An unknown parameter is left as written and reported at
    /// dispatch by the verb's own operand parsing.
    fn resolve_params(&self, record: CommandRecord) -> CommandRecord {
        if !record
            .fields()
            .iter()
            .skip(1)
            .any(|f| f.starts_with('{') && f.ends_with('}'))
        {
            return record;
        }

        let fields: Vec<String> = record
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if i == 0 || !(field.starts_with('{') && field.ends_with('}')) {
                    return field.clone();
                }
                let name = &field[1..field.len() - 1];
                match self.add_set(name) {
                    Some(value) => value.to_string(),
                    None => {
                        tracing::warn!(param = %name, "unknown parameter, leaving operand as-is");
                        field.clone()
                    }
                }
            })
            .collect();
        let verb = record.verb().clone();
        CommandRecord::new(verb, fields)
    }

    /// Executes one command record against device state.
    fn dispatch(&mut self, record: &CommandRecord) -> Result<(), Error> {
        match record.verb() {
            Verb::AddKey => {
                let key = record.str_operand(1)?.to_string();
                let slot = record.slot_operand(2)?;
                let table = record.operand(3).unwrap_or(ACTUATOR_TABLE).to_string();
                self.registries.table_mut(&table).insert(key, slot);
            }
            Verb::SetTimer => {
                let slot = record.slot_operand(1)?;
                let duration = record.str_operand(2)?.to_string();
                let mode = match record.operand(3) {
                    None | Some("once") => TimerMode::OneShot,
                    Some("repeat") => TimerMode::Repeating,
                    Some(other) => {
                        return Err(ParseError::InvalidOperand {
                            field: "settimer mode".to_string(),
                            message: format!("expected 'once' or 'repeat', got '{other}'"),
                        }
                        .into());
                    }
                };
                let action = record
                    .rest_joined(4, ',')
                    .map_or_else(
                        || TimerAction::Command(format!("event,timer,{}", slot.value())),
                        TimerAction::Command,
                    );
                self.timers.add_timer(slot, &duration, mode, action)?;
            }
            Verb::DelTimer => {
                let slot = record.slot_operand(1)?;
                self.timers.del_timer(slot)?;
            }
            Verb::TimerStart => match record.operand(1) {
                Some(_) => self.timers.start(record.slot_operand(1)?)?,
                None => self.timers.start_all(),
            },
            Verb::TimerStop => match record.operand(1) {
                Some(_) => self.timers.stop(record.slot_operand(1)?)?,
                None => self.timers.stop_all(),
            },
            Verb::ReadTimer => {
                let slot = record.slot_operand(1)?;
                match self.timers.read_timer(slot) {
                    Some(remaining) => {
                        // Remaining seconds fit in i64 for any realistic timer.
                        #[allow(clippy::cast_possible_wrap)]
                        let secs = remaining.as_secs() as i64;
                        self.publisher.publish_event(EventPayload::numbered(
                            format!("timer.{}", slot.value()),
                            secs,
                        ));
                    }
                    None => {
                        tracing::warn!(slot = %slot, "readtimer on empty slot");
                    }
                }
            }
            Verb::Event => {
                let name = record.str_operand(1)?.to_string();
                let number = record.i64_operand(2)?;
                self.event_gen(&name, number);
            }
            Verb::Set => {
                let name = record.str_operand(1)?.to_string();
                let value = record.str_operand(2)?.to_string();
                self.config.set_param(name, value);
            }
            Verb::Widget => {
                let widget = WidgetDef::new(
                    record.str_operand(1)?,
                    record.str_operand(2)?,
                    record.u8_operand(3)?,
                    record.str_operand(4)?,
                    record.str_operand(5)?,
                );
                self.publisher.create_widget(widget);
            }
            Verb::WidgetParam => {
                let mut widget = WidgetDef::new(
                    record.str_operand(1)?,
                    record.str_operand(2)?,
                    record.u8_operand(3)?,
                    record.str_operand(4)?,
                    record.str_operand(5)?,
                );
                let mut position = 6;
                while record.operand(position).is_some() {
                    let name = record.str_operand(position)?.to_string();
                    let value = record.str_operand(position + 1)?.to_string();
                    widget.try_add_param(name, value)?;
                    position += 2;
                }
                self.publisher.create_widget(widget);
            }
            Verb::Chart => {
                let max_count = record.i64_operand(6)?;
                let max_count =
                    u32::try_from(max_count).map_err(|_| ParseError::InvalidOperand {
                        field: "chart max_count".to_string(),
                        message: format!("expected unsigned count, got '{max_count}'"),
                    })?;
                let chart = ChartDef::new(
                    record.str_operand(1)?,
                    record.str_operand(2)?,
                    record.u8_operand(3)?,
                    record.str_operand(4)?,
                    record.str_operand(5)?,
                    max_count,
                );
                self.publisher.create_chart(chart);
            }
            Verb::Sensor => {
                let key = record.str_operand(1)?.to_string();
                let value = record.f64_operand(2)?;
                let slot = self.registries.table_mut(SENSOR_TABLE).assign(key)?;
                let change = StateChange::sensor_reading(slot, value);
                self.state.apply(&change);
                self.publisher.publish_change(change);
            }
            Verb::Logging => {
                let key = record.str_operand(1)?.to_string();
                self.registries
                    .table_mut(LOGGING_TABLE)
                    .assign(key.clone())?;
                self.state.add_logging_key(key);
            }
            Verb::Push => {
                let message = record.rest_joined(1, ',').ok_or_else(|| {
                    ParseError::MissingOperand {
                        verb: "push".to_string(),
                        position: 1,
                    }
                })?;
                self.publisher
                    .publish_event(EventPayload::text("push", message));
            }
            Verb::Reload => {
                self.reload_requested = true;
            }
            Verb::Unknown(raw) => {
                let Some(slot) = self.registries.resolve(ACTUATOR_TABLE, raw) else {
                    tracing::warn!(verb = %raw, "unknown command verb, skipping");
                    return Ok(());
                };
                let operand = record.str_operand(1)?;
                let state = ActuatorState::parse(operand).ok_or_else(|| {
                    ParseError::InvalidOperand {
                        field: format!("{raw} state"),
                        message: format!("expected on, off or level, got '{operand}'"),
                    }
                })?;
                let change = StateChange::actuator(slot, state);
                if self.state.apply(&change) {
                    self.publisher.publish_change(change);
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for DeviceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceController")
            .field("registries", &self.registries)
            .field("timers", &self.timers)
            .field("loop_buffer", &self.loop_buffer)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("scenario", &self.scenario)
            .field("uptime", &self.uptime)
            .finish_non_exhaustive()
    }
}
