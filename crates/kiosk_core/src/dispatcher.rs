use shared::{
    domain::ScreenContext,
    error::CommandError,
    protocol::Command,
};
use tracing::{debug, info, warn};

use crate::{
    scheduler::PromptScheduler,
    ui::{ControlFactory, UiSurface},
};

pub struct CommandDispatcher {
    primary_surfaces: Vec<String>,
    scheduler: PromptScheduler,
}

impl CommandDispatcher {
    pub fn new(primary_surfaces: Vec<String>, scheduler: PromptScheduler) -> Self {
        Self {
            primary_surfaces,
            scheduler,
        }
    }

    pub fn scheduler(&self) -> &PromptScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut PromptScheduler {
        &mut self.scheduler
    }

    pub fn is_primary_surface(&self, region: &str) -> bool {
        self.primary_surfaces.iter().any(|surface| surface == region)
    }

    pub fn handle_message(&mut self, raw: &str, ui: &mut dyn UiSurface) {
        if let Err(err) = self.dispatch(raw, ui) {
            warn!(error = %err, message = raw, "dispatch: ignoring inbound message");
        }
    }

    pub fn dispatch(
        &mut self,
        raw: &str,
        ui: &mut dyn UiSurface,
    ) -> Result<Command, CommandError> {
        let command = Command::parse(raw)?;
        self.apply(&command, ui);
        Ok(command)
    }

    pub fn apply(&mut self, command: &Command, ui: &mut dyn UiSurface) {
        match command {
            Command::DisplayText { text, .. } => {
                if let Some(node) = command.node_id() {
                    ui.set_text(&node, text);
                }
            }
            Command::DisplayImage { region, path } => {
                if let Some(node) = command.node_id() {
                    ui.set_image_source(&node, path);
                }
                if self.is_primary_surface(region) {
                    let context = ScreenContext::from_image_path(path);
                    debug!(path, ?context, "dispatch: inferred screen context");
                    self.scheduler.enter(context);
                }
            }
            Command::DisplayButton(spec) => ControlFactory::place(ui, spec.clone()),
            Command::RemoveButtons => ControlFactory::clear(ui),
            Command::Navigate { url } => {
                info!(url, "dispatch: load url");
                ui.navigate(url);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
