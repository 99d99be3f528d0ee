use std::time::Duration;

use shared::domain::{ElementId, PromptCategory, ScreenContext};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    timers::{PromptTick, TimerRegistry},
    ui::UiSurface,
};

pub const PROMPT_TEXT_NODE: &str = "text_default";
pub const VOCAL_CONTROL_ID: &str = "vocal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    Text(&'static str),
    ControlLabel(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub target: PromptTarget,
    pub first: &'static str,
    pub second: &'static str,
}

impl Rotation {
    pub fn for_category(category: PromptCategory) -> Self {
        match category {
            PromptCategory::Welcoming => Self {
                target: PromptTarget::Text(PROMPT_TEXT_NODE),
                first: "Put yourself in front of me to start",
                second: "Mettiti di fronte a me per iniziare.",
            },
            PromptCategory::UnknownUser => Self {
                target: PromptTarget::Text(PROMPT_TEXT_NODE),
                first: "Hi! I don't think I know you, would you prefer to use vocal commands or the touchscreen?",
                second: "Ciao! Non credo di conoscerti, vuoi usare la modalità vocale o preferisci usare il touchscreen?",
            },
            PromptCategory::Language => Self {
                target: PromptTarget::Text(PROMPT_TEXT_NODE),
                first: "Che lingua preferisci: italiano o inglese?",
                second: "Choose your language: italian or english?",
            },
            PromptCategory::Vocal => Self {
                target: PromptTarget::ControlLabel(VOCAL_CONTROL_ID),
                first: "Comandi vocali",
                second: "Vocal commands",
            },
        }
    }

    pub fn text(&self, first_phase: bool) -> &'static str {
        if first_phase {
            self.first
        } else {
            self.second
        }
    }
}

/// Level-triggered state machine from the shown screen to the prompt timers it needs.
pub struct PromptScheduler {
    registry: TimerRegistry,
    context: ScreenContext,
}

impl PromptScheduler {
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<PromptTick>) {
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            registry: TimerRegistry::new(period, ticks_tx),
            context: ScreenContext::Unknown,
        };
        (scheduler, ticks_rx)
    }

    pub fn context(&self) -> ScreenContext {
        self.context
    }

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    /// Stops every timer the screen does not need, then starts the ones it does.
    /// Re-entering the current screen leaves running timers and their phase untouched.
    pub fn enter(&mut self, context: ScreenContext) {
        let required = context.required_prompts();
        if context != self.context {
            info!(from = ?self.context, to = ?context, "prompts: screen changed");
        }
        self.context = context;

        for category in PromptCategory::ALL {
            if !required.contains(&category) {
                self.registry.stop(category);
            }
        }
        for category in required {
            self.registry.start(*category);
        }
    }

    pub fn on_tick(&mut self, tick: PromptTick, ui: &mut dyn UiSurface) {
        let Some(first_phase) = self.registry.advance(tick) else {
            debug!(category = %tick.category, generation = tick.generation, "prompts: stale tick");
            return;
        };

        let rotation = Rotation::for_category(tick.category);
        let text = rotation.text(first_phase);
        match rotation.target {
            PromptTarget::Text(node) => ui.set_text(node, text),
            PromptTarget::ControlLabel(id) => {
                ui.set_control_label(&ElementId::from(id), text);
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.registry.stop_all();
        self.context = ScreenContext::Unknown;
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
