use crate::server::UiUpdate;

/// Host primitives the controller drives: pushing state to the settings
/// form, toasting the user, and resizing the form's window.
pub trait HostShell {
    fn post_update(&mut self, update: UiUpdate);
    fn notify(&mut self, message: &str);
    fn resize_ui(&mut self, width: u32, height: u32);
}

/// Shell that records every call, for assertions and for headless runs
/// that report afterwards.
#[derive(Debug, Default)]
pub struct RecordingShell {
    pub updates: Vec<UiUpdate>,
    pub notices: Vec<String>,
    pub ui_sizes: Vec<(u32, u32)>,
}

impl HostShell for RecordingShell {
    fn post_update(&mut self, update: UiUpdate) { self.updates.push(update); }

    fn notify(&mut self, message: &str) { self.notices.push(message.to_string()); }

    fn resize_ui(&mut self, width: u32, height: u32) { self.ui_sizes.push((width, height)); }
}
