use std::time::Duration;

use shared::domain::{ConnectionStatus, ElementId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    channel::{ChannelAdapter, ChannelEvent},
    dispatcher::CommandDispatcher,
    scheduler::PromptScheduler,
    timers::{PromptTick, DEFAULT_PROMPT_PERIOD},
    ui::UiSurface,
};

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub prompt_period: Duration,
    pub primary_surfaces: Vec<String>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            prompt_period: DEFAULT_PROMPT_PERIOD,
            primary_surfaces: vec!["default".into(), "display".into()],
        }
    }
}

/// Single event loop over inbound channel events, prompt ticks and control activations.
/// Each event runs to completion before the next one is taken.
pub struct KioskController<U: UiSurface, C: ChannelAdapter> {
    ui: U,
    channel: C,
    dispatcher: CommandDispatcher,
    ticks: mpsc::UnboundedReceiver<PromptTick>,
}

impl<U: UiSurface, C: ChannelAdapter> KioskController<U, C> {
    pub fn new(ui: U, channel: C, options: ControllerOptions) -> Self {
        let (scheduler, ticks) = PromptScheduler::new(options.prompt_period);
        Self {
            ui,
            channel,
            dispatcher: CommandDispatcher::new(options.primary_surfaces, scheduler),
            ticks,
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn handle_channel_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Opened => {
                info!("channel: connection received");
                self.ui.set_connection_status(ConnectionStatus::Connected);
            }
            ChannelEvent::Closed => {
                info!("channel: connection closed");
                self.ui.set_connection_status(ConnectionStatus::Disconnected);
            }
            ChannelEvent::Error(err) => warn!(error = %err, "channel: connection error"),
            ChannelEvent::Message(text) => {
                info!(message = %text, "channel: message received");
                self.dispatcher.handle_message(&text, &mut self.ui);
            }
        }
    }

    pub fn handle_tick(&mut self, tick: PromptTick) {
        self.dispatcher.scheduler_mut().on_tick(tick, &mut self.ui);
    }

    pub fn activate(&mut self, id: &ElementId) {
        let Some(control) = self.ui.control(id) else {
            warn!(id = %id, "channel: activation for unknown control");
            return;
        };
        let message = control.activation_message();
        info!(id = %id, "channel: button pressed");
        if let Err(err) = self.channel.send(&message) {
            debug!(id = %id, error = %err, "channel: dropping outbound message");
        }
    }

    pub fn quit(&mut self) {
        self.channel.close();
        self.dispatcher.scheduler_mut().shutdown();
    }

    /// Runs until both the channel event stream and the activation input are exhausted,
    /// then stops every prompt timer and hands the controller back.
    pub async fn run(
        mut self,
        mut channel_events: mpsc::UnboundedReceiver<ChannelEvent>,
        mut activations: mpsc::UnboundedReceiver<ElementId>,
    ) -> Self {
        let mut channel_live = true;
        let mut input_live = true;

        while channel_live || input_live {
            tokio::select! {
                event = channel_events.recv(), if channel_live => match event {
                    Some(event) => self.handle_channel_event(event),
                    None => channel_live = false,
                },
                activation = activations.recv(), if input_live => match activation {
                    Some(id) => self.activate(&id),
                    None => input_live = false,
                },
                Some(tick) = self.ticks.recv() => self.handle_tick(tick),
            }
        }

        self.quit();
        self
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
