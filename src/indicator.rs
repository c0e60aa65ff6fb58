//! Busy indicators for the validate and save buttons.

/// Spinner-button contract
pub trait BusyIndicator {
    /// Begin spinning. The button is not clickable while it spins.
    fn start(&mut self);
    fn stop(&mut self);
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_busy(&self) -> bool;
    fn is_enabled(&self) -> bool;
}

/// Button state without any drawing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpinnerButton {
    spinning: bool,
    disabled: bool,
}

impl SpinnerButton {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BusyIndicator for SpinnerButton {
    fn start(&mut self) {
        self.spinning = true;
        self.disabled = true;
    }

    fn stop(&mut self) {
        self.spinning = false;
        self.disabled = false;
    }

    fn enable(&mut self) {
        self.disabled = false;
    }

    fn disable(&mut self) {
        self.disabled = true;
    }

    fn is_busy(&self) -> bool {
        self.spinning
    }

    fn is_enabled(&self) -> bool {
        !self.disabled
    }
}
