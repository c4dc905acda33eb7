//! Deferred activation of a third-party widget
//!
//! The widget's init function only exists once its script has loaded, and
//! the app may ask for activation before or after that. Requests that arrive
//! early collapse into a single call when the load signal fires.

/// Load state of the widget script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Script not ready yet; `pending` requests are waiting
    NotLoaded { pending: u32 },
    /// Script ready (terminal)
    Loaded,
}

/// What happened to an activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Widget init was called now
    Immediate,
    /// Queued until the script loads
    Deferred,
}

/// Calls `activate(config_id)` once it is safe to do so
pub struct WidgetActivator<F> {
    config_id: String,
    activate: F,
    state: WidgetState,
    activations: u32,
}

impl<F: FnMut(&str)> WidgetActivator<F> {
    pub fn new(config_id: impl Into<String>, activate: F) -> Self {
        Self {
            config_id: config_id.into(),
            activate,
            state: WidgetState::NotLoaded { pending: 0 },
            activations: 0,
        }
    }

    /// The app wants the widget initialized
    pub fn request_activation(&mut self) -> Activation {
        if let WidgetState::NotLoaded { pending } = &mut self.state {
            *pending = pending.saturating_add(1);
            log::debug!("Widget not loaded, activation deferred ({} waiting)", pending);
            return Activation::Deferred;
        }
        self.fire();
        Activation::Immediate
    }

    /// The widget script finished loading
    ///
    /// Returns true if queued requests triggered an activation.
    pub fn load_completed(&mut self) -> bool {
        match self.state {
            WidgetState::Loaded => {
                log::debug!("Duplicate widget load signal ignored");
                false
            }
            WidgetState::NotLoaded { pending } => {
                self.state = WidgetState::Loaded;
                log::info!("Widget script loaded");
                if pending > 0 {
                    log::debug!("Replaying {} deferred activation request(s) as one", pending);
                    self.fire();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn fire(&mut self) {
        self.activations = self.activations.saturating_add(1);
        (self.activate)(&self.config_id);
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == WidgetState::Loaded
    }

    /// Number of times the init function has been called
    pub fn activation_count(&self) -> u32 {
        self.activations
    }
}

impl<F> std::fmt::Debug for WidgetActivator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetActivator")
            .field("config_id", &self.config_id)
            .field("state", &self.state)
            .field("activations", &self.activations)
            .finish()
    }
}
