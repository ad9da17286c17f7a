use serde_json::Value;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Payload carried by a popup request. The shell treats it as opaque;
/// only the popup renderer interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContext {
    pub title: String,
    pub payload: Value,
}

impl PopupContext {
    pub fn new(title: impl Into<String>, payload: Value) -> Self {
        Self {
            title: title.into(),
            payload,
        }
    }
}

/// Overlay state of the shell: visible with a context or hidden.
/// Orthogonal to the current page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible(PopupContext),
}

impl PopupState {
    pub fn is_visible(&self) -> bool {
        matches!(self, PopupState::Visible(_))
    }

    /// The context if visible, None otherwise.
    pub fn context(&self) -> Option<&PopupContext> {
        match self {
            PopupState::Visible(context) => Some(context),
            PopupState::Hidden => None,
        }
    }

    pub fn hide(&mut self) {
        *self = PopupState::Hidden;
    }

    pub fn show_with(&mut self, context: PopupContext) {
        *self = PopupState::Visible(context);
    }
}

impl From<Option<PopupContext>> for PopupState {
    fn from(context: Option<PopupContext>) -> Self {
        match context {
            Some(context) => PopupState::Visible(context),
            None => PopupState::Hidden,
        }
    }
}

/// Single-producer fan-out point for popup requests.
///
/// `show` and `hide` may be called from any thread or task; emissions
/// reach every current subscriber in call order, with no buffering and no
/// replay for late subscribers. Delivery into the presentation root is
/// marshaled onto the shell's event loop by the subscriber side.
#[derive(Clone)]
pub struct PopupCoordinator {
    trigger: broadcast::Sender<Option<PopupContext>>,
}

impl PopupCoordinator {
    pub fn new() -> Self {
        let (trigger, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { trigger }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Option<PopupContext>> {
        self.trigger.subscribe()
    }

    /// Request the popup with the given context.
    pub fn show(&self, context: PopupContext) {
        let _ = self.trigger.send(Some(context));
    }

    /// Request that any visible popup be dismissed.
    pub fn hide(&self) {
        let _ = self.trigger.send(None);
    }
}

impl Default for PopupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delivery_matches_call_order() {
        let coordinator = PopupCoordinator::new();
        let mut observer = coordinator.subscribe();

        coordinator.show(PopupContext::new("first", json!({})));
        coordinator.show(PopupContext::new("second", json!({})));
        coordinator.hide();

        assert_eq!(observer.try_recv().unwrap().unwrap().title, "first");
        assert_eq!(observer.try_recv().unwrap().unwrap().title, "second");
        assert_eq!(observer.try_recv().unwrap(), None);
    }

    #[test]
    fn every_observer_receives_every_emission() {
        let coordinator = PopupCoordinator::new();
        let mut first = coordinator.subscribe();
        let mut second = coordinator.subscribe();

        coordinator.show(PopupContext::new("about", json!({"version": 1})));

        for observer in [&mut first, &mut second] {
            let context = observer.try_recv().unwrap().unwrap();
            assert_eq!(context.title, "about");
        }
    }

    #[test]
    fn no_replay_for_late_subscribers() {
        let coordinator = PopupCoordinator::new();
        coordinator.show(PopupContext::new("missed", json!({})));

        let mut observer = coordinator.subscribe();
        assert!(observer.try_recv().is_err());
    }
}
