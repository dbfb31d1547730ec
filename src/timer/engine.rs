// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The timer slot table and its tick loop.

use std::time::Duration;

use crate::error::{Error, TimerError};
use crate::registry::SlotId;

use super::parse_duration;

/// Number of user timer slots in the engine.
pub const MAX_TIMERS: u8 = 16;

/// Cadence of the built-in uptime timer.
pub const UPTIME_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Whether a timer fires once or rearms after every expiry.
///
/// The mode is part of the timer's definition set at creation; it is
/// never inferred from the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Fire once, then free the slot.
    #[default]
    OneShot,
    /// Fire, then rearm to the original duration.
    Repeating,
}

/// What happens when a timer expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    /// Re-inject a command string into the loop buffer.
    Command(String),
    /// Refresh the device's persisted uptime field.
    RefreshUptime,
}

/// One armed countdown timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    duration: Duration,
    remaining: Duration,
    mode: TimerMode,
    action: TimerAction,
    running: bool,
}

impl Timer {
    /// Returns the original countdown duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the remaining time until expiry.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Returns the timer's mode.
    #[must_use]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Returns the configured expiry action.
    #[must_use]
    pub fn action(&self) -> &TimerAction {
        &self.action
    }

    /// Returns `true` if this timer is counting down.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// A fired timer reported by [`TimerEngine::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFired {
    /// The slot that expired, or `None` for the built-in uptime timer.
    pub slot: Option<SlotId>,
    /// The action to carry out, exactly once.
    pub action: TimerAction,
}

/// Fixed-size table of countdown timers plus the built-in uptime timer.
///
/// At most one timer occupies a numeric slot at a time; arming an
/// occupied slot stops the previous occupant first. The whole table
/// can be paused and resumed, and individual timers can be started and
/// stopped by slot.
///
/// The uptime timer lives outside the user slot table: it is periodic,
/// cannot be deleted or paused by user scripts, and survives
/// [`TimerEngine::clear_user_timers`] across scenario reloads.
///
/// # Expiry ordering
///
/// When several slot timers expire within the same tick they fire in
/// slot-ascending order. This is a stable-scan implementation choice,
/// not a contract scripts should depend on.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use scenar_lib::registry::SlotId;
/// use scenar_lib::timer::{TimerAction, TimerEngine, TimerMode};
///
/// let mut engine = TimerEngine::new();
/// engine
///     .add_timer(
///         SlotId::new(3),
///         "10s",
///         TimerMode::OneShot,
///         TimerAction::Command("pump,off".to_string()),
///     )
///     .unwrap();
///
/// assert_eq!(engine.read_timer(SlotId::new(3)), Some(Duration::from_secs(10)));
///
/// let fired = engine.tick(Duration::from_secs(10));
/// assert_eq!(fired.len(), 1);
/// assert_eq!(engine.read_timer(SlotId::new(3)), None);
/// ```
#[derive(Debug, Clone)]
pub struct TimerEngine {
    slots: Vec<Option<Timer>>,
    /// Global pause flag for user timers.
    running: bool,
    uptime_remaining: Duration,
}

impl TimerEngine {
    /// Creates an engine with [`MAX_TIMERS`] empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; usize::from(MAX_TIMERS)],
            running: true,
            uptime_remaining: UPTIME_REFRESH_INTERVAL,
        }
    }

    /// Arms a timer at `slot`.
    ///
    /// Any timer already occupying the slot is stopped and replaced.
    /// The new timer starts counting immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::SlotOutOfRange`] if `slot` is outside the
    /// table, or a parse error for a malformed duration. Neither
    /// failure has side effects.
    pub fn add_timer(
        &mut self,
        slot: SlotId,
        duration_text: &str,
        mode: TimerMode,
        action: TimerAction,
    ) -> Result<(), Error> {
        self.check_slot(slot)?;
        let duration = parse_duration(duration_text)?;

        if self.slots[slot.index()].is_some() {
            tracing::debug!(slot = %slot, "replacing existing timer");
        }
        self.slots[slot.index()] = Some(Timer {
            duration,
            remaining: duration,
            mode,
            action,
            running: true,
        });
        tracing::debug!(slot = %slot, ?duration, ?mode, "timer armed");
        Ok(())
    }

    /// Arms a timer in the first free slot and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::TableFull`] if every slot is occupied, or
    /// a parse error for a malformed duration. Neither failure has
    /// side effects.
    pub fn add_timer_auto(
        &mut self,
        duration_text: &str,
        mode: TimerMode,
        action: TimerAction,
    ) -> Result<SlotId, Error> {
        let free = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(TimerError::TableFull(MAX_TIMERS))?;
        // Index is < MAX_TIMERS, so it fits in u8.
        #[allow(clippy::cast_possible_truncation)]
        let slot = SlotId::new(free as u8);
        self.add_timer(slot, duration_text, mode, action)?;
        Ok(slot)
    }

    /// Stops and frees the timer at `slot`.
    ///
    /// Deleting an empty slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::SlotOutOfRange`] if `slot` is outside the
    /// table.
    pub fn del_timer(&mut self, slot: SlotId) -> Result<(), TimerError> {
        self.check_slot(slot)?;
        if self.slots[slot.index()].take().is_some() {
            tracing::debug!(slot = %slot, "timer deleted");
        }
        Ok(())
    }

    /// Returns the remaining time of the timer at `slot`.
    ///
    /// Returns `None` if the slot is empty or out of range.
    #[must_use]
    pub fn read_timer(&self, slot: SlotId) -> Option<Duration> {
        self.slots
            .get(slot.index())
            .and_then(Option::as_ref)
            .map(Timer::remaining)
    }

    /// Resumes the timer at `slot`. No-op on an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::SlotOutOfRange`] if `slot` is outside the
    /// table.
    pub fn start(&mut self, slot: SlotId) -> Result<(), TimerError> {
        self.check_slot(slot)?;
        if let Some(timer) = &mut self.slots[slot.index()] {
            timer.running = true;
        } else {
            tracing::warn!(slot = %slot, "start requested for empty timer slot");
        }
        Ok(())
    }

    /// Pauses the timer at `slot`. No-op on an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::SlotOutOfRange`] if `slot` is outside the
    /// table.
    pub fn stop(&mut self, slot: SlotId) -> Result<(), TimerError> {
        self.check_slot(slot)?;
        if let Some(timer) = &mut self.slots[slot.index()] {
            timer.running = false;
        } else {
            tracing::warn!(slot = %slot, "stop requested for empty timer slot");
        }
        Ok(())
    }

    /// Resumes every user timer (global resume).
    pub fn start_all(&mut self) {
        self.running = true;
    }

    /// Pauses every user timer (global pause).
    ///
    /// The built-in uptime timer is unaffected.
    pub fn stop_all(&mut self) {
        self.running = false;
    }

    /// Returns `true` if the engine is globally running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterates over occupied slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Timer)> {
        self.slots.iter().enumerate().filter_map(|(i, t)| {
            // Slot indexes are bounded by MAX_TIMERS.
            #[allow(clippy::cast_possible_truncation)]
            t.as_ref().map(|timer| (SlotId::new(i as u8), timer))
        })
    }

    /// Frees every user slot, keeping the uptime timer.
    ///
    /// Called during a scenario reload.
    pub fn clear_user_timers(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.running = true;
    }

    /// Advances all countdowns by `elapsed` and returns the fired
    /// timers.
    ///
    /// The uptime timer is reported first (it is internal and always
    /// periodic), then expired user slots in ascending order. Each
    /// expiry appears exactly once: one-shot timers free their slot,
    /// repeating timers rearm to their original duration. User timers
    /// do not advance while globally paused or individually stopped.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<TimerFired> {
        let mut fired = Vec::new();

        // The uptime timer ticks unconditionally: it is not a user
        // timer and must keep refreshing through a global pause.
        self.uptime_remaining = self.uptime_remaining.saturating_sub(elapsed);
        if self.uptime_remaining.is_zero() {
            self.uptime_remaining = UPTIME_REFRESH_INTERVAL;
            fired.push(TimerFired {
                slot: None,
                action: TimerAction::RefreshUptime,
            });
        }

        if !self.running {
            return fired;
        }

        for (index, entry) in self.slots.iter_mut().enumerate() {
            let Some(timer) = entry else { continue };
            if !timer.running {
                continue;
            }
            timer.remaining = timer.remaining.saturating_sub(elapsed);
            if !timer.remaining.is_zero() {
                continue;
            }

            // Slot indexes are bounded by MAX_TIMERS.
            #[allow(clippy::cast_possible_truncation)]
            let slot = SlotId::new(index as u8);
            fired.push(TimerFired {
                slot: Some(slot),
                action: timer.action.clone(),
            });

            match timer.mode {
                TimerMode::OneShot => {
                    tracing::debug!(slot = %slot, "one-shot timer fired");
                    *entry = None;
                }
                TimerMode::Repeating => {
                    tracing::debug!(slot = %slot, "repeating timer fired, rearming");
                    timer.remaining = timer.duration;
                }
            }
        }

        fired
    }

    fn check_slot(&self, slot: SlotId) -> Result<(), TimerError> {
        if slot.index() >= self.slots.len() {
            return Err(TimerError::SlotOutOfRange {
                slot: slot.value(),
                max: MAX_TIMERS,
            });
        }
        Ok(())
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
