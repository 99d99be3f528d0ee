//! Presentation seam: the UI surface the dispatcher mutates, and the factory that builds controls.

use std::collections::HashMap;

use shared::{
    domain::{ConnectionStatus, ControlKind, ElementId},
    protocol::ButtonSpec,
};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    id: ElementId,
    kind: ControlKind,
    value: String,
}

impl Control {
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        match self.kind {
            ControlKind::Label => Some(&self.value),
            ControlKind::Image => None,
        }
    }

    pub fn image_source(&self) -> Option<&str> {
        match self.kind {
            ControlKind::Image => Some(&self.value),
            ControlKind::Label => None,
        }
    }

    pub fn activation_message(&self) -> String {
        self.id.0.clone()
    }

    fn relabel(&mut self, label: &str) -> bool {
        if self.kind != ControlKind::Label {
            return false;
        }
        self.value = label.to_string();
        true
    }
}

pub trait UiSurface {
    fn set_text(&mut self, node: &str, text: &str);
    fn set_image_source(&mut self, node: &str, source: &str);
    /// Relabels the first label control with `id`. Returns false when there is none.
    fn set_control_label(&mut self, id: &ElementId, label: &str) -> bool;
    fn append_control(&mut self, control: Control);
    fn clear_controls(&mut self);
    fn control(&self, id: &ElementId) -> Option<&Control>;
    fn navigate(&mut self, url: &str);
    fn set_connection_status(&mut self, status: ConnectionStatus);
}

pub struct ControlFactory;

impl ControlFactory {
    pub fn build(spec: ButtonSpec) -> Control {
        Control {
            id: spec.id,
            kind: spec.kind,
            value: spec.value,
        }
    }

    /// Appends in receipt order. Duplicate ids are kept side by side.
    pub fn place(ui: &mut dyn UiSurface, spec: ButtonSpec) {
        ui.append_control(Self::build(spec));
    }

    pub fn clear(ui: &mut dyn UiSurface) {
        ui.clear_controls();
    }
}

/// In-memory UI model for hosts without a display; every mutation is logged.
#[derive(Debug, Default)]
pub struct HeadlessUi {
    texts: HashMap<String, String>,
    images: HashMap<String, String>,
    controls: Vec<Control>,
    location: Option<String>,
    status: Option<ConnectionStatus>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, node: &str) -> Option<&str> {
        self.texts.get(node).map(String::as_str)
    }

    pub fn image_source(&self, node: &str) -> Option<&str> {
        self.images.get(node).map(String::as_str)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn status(&self) -> Option<ConnectionStatus> {
        self.status
    }
}

impl UiSurface for HeadlessUi {
    fn set_text(&mut self, node: &str, text: &str) {
        info!(node, text, "ui: text");
        self.texts.insert(node.to_string(), text.to_string());
    }

    fn set_image_source(&mut self, node: &str, source: &str) {
        info!(node, source, "ui: image");
        self.images.insert(node.to_string(), source.to_string());
    }

    fn set_control_label(&mut self, id: &ElementId, label: &str) -> bool {
        let relabeled = self
            .controls
            .iter_mut()
            .find(|control| &control.id == id)
            .is_some_and(|control| control.relabel(label));
        if relabeled {
            info!(id = %id, label, "ui: control label");
        } else {
            debug!(id = %id, "ui: no label control to relabel");
        }
        relabeled
    }

    fn append_control(&mut self, control: Control) {
        info!(id = %control.id, kind = ?control.kind, value = %control.value, "ui: control added");
        self.controls.push(control);
    }

    fn clear_controls(&mut self) {
        info!(removed = self.controls.len(), "ui: controls cleared");
        self.controls.clear();
    }

    fn control(&self, id: &ElementId) -> Option<&Control> {
        self.controls.iter().find(|control| &control.id == id)
    }

    fn navigate(&mut self, url: &str) {
        info!(url, "ui: navigate");
        self.location = Some(url.to_string());
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        info!(status = status.label(), "ui: status");
        self.status = Some(status);
    }
}

#[cfg(test)]
#[path = "tests/ui_tests.rs"]
mod tests;
