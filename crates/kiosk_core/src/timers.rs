use std::{collections::HashMap, time::Duration};

use shared::domain::PromptCategory;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

pub const DEFAULT_PROMPT_PERIOD: Duration = Duration::from_secs(5);
pub const MIN_PROMPT_PERIOD: Duration = Duration::from_millis(1);

/// One firing of a running timer. `generation` identifies the handle that produced it so
/// ticks still queued from a stopped timer can be told apart from a restarted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTick {
    pub category: PromptCategory,
    pub generation: u64,
}

struct TimerHandle {
    generation: u64,
    task: JoinHandle<()>,
}

struct TimerState {
    handle: Option<TimerHandle>,
    toggle: bool,
}

/// Exactly one timer slot per [`PromptCategory`]; `start` and `stop` are its only mutators.
pub struct TimerRegistry {
    period: Duration,
    ticks: mpsc::UnboundedSender<PromptTick>,
    timers: HashMap<PromptCategory, TimerState>,
    next_generation: u64,
}

impl TimerRegistry {
    pub fn new(period: Duration, ticks: mpsc::UnboundedSender<PromptTick>) -> Self {
        let timers = PromptCategory::ALL
            .into_iter()
            .map(|category| {
                (
                    category,
                    TimerState {
                        handle: None,
                        toggle: true,
                    },
                )
            })
            .collect();
        Self {
            period: period.max(MIN_PROMPT_PERIOD),
            ticks,
            timers,
            next_generation: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the periodic task for `category`. Returns false if it was already running.
    /// The first tick arrives one full period after the start.
    pub fn start(&mut self, category: PromptCategory) -> bool {
        let state = self.timers.entry(category).or_insert(TimerState {
            handle: None,
            toggle: true,
        });
        if state.handle.is_some() {
            debug!(%category, "prompts: timer already running");
            return false;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let period = self.period;
        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks
                    .send(PromptTick {
                        category,
                        generation,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        state.handle = Some(TimerHandle { generation, task });
        state.toggle = true;
        debug!(%category, generation, "prompts: timer started");
        true
    }

    pub fn stop(&mut self, category: PromptCategory) -> bool {
        let Some(handle) = self
            .timers
            .get_mut(&category)
            .and_then(|state| state.handle.take())
        else {
            return false;
        };
        handle.task.abort();
        debug!(%category, generation = handle.generation, "prompts: timer stopped");
        true
    }

    pub fn stop_all(&mut self) {
        for category in PromptCategory::ALL {
            self.stop(category);
        }
    }

    pub fn is_running(&self, category: PromptCategory) -> bool {
        self.timers
            .get(&category)
            .is_some_and(|state| state.handle.is_some())
    }

    pub fn running(&self) -> Vec<PromptCategory> {
        PromptCategory::ALL
            .into_iter()
            .filter(|category| self.is_running(*category))
            .collect()
    }

    pub fn generation(&self, category: PromptCategory) -> Option<u64> {
        self.timers
            .get(&category)?
            .handle
            .as_ref()
            .map(|handle| handle.generation)
    }

    /// Flips the toggle of the live timer that produced `tick`, returning the phase to show
    /// (`true` for the first string). Stale ticks yield `None`.
    pub fn advance(&mut self, tick: PromptTick) -> Option<bool> {
        let state = self.timers.get_mut(&tick.category)?;
        if state.handle.as_ref()?.generation != tick.generation {
            return None;
        }
        let phase = state.toggle;
        state.toggle = !state.toggle;
        Some(phase)
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        for state in self.timers.values_mut() {
            if let Some(handle) = state.handle.take() {
                handle.task.abort();
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/timers_tests.rs"]
mod tests;
