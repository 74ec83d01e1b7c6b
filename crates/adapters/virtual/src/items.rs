//! Virtual items — in-memory stand-ins for the application-side items.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use hublink_domain::item::ItemType;
use hublink_domain::value::{Command, IncreaseDecrease, OnOff, Percent, State, UpDown};
use tokio::sync::mpsc::UnboundedSender;

/// Percentage points applied by `INCREASE`/`DECREASE` on a dimmer.
const DIMMER_INCREMENT: f64 = 10.0;

/// Emitted whenever a virtual item's state actually changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStateChanged {
    pub item: String,
    pub state: State,
}

/// A simulated item holding its current state, its attributes and the
/// commands it received.
#[derive(Debug)]
pub struct VirtualItem {
    name: String,
    item_type: ItemType,
    state: Mutex<State>,
    attributes: Mutex<HashMap<String, State>>,
    commands: Mutex<Vec<Command>>,
    changes: Option<UnboundedSender<ItemStateChanged>>,
}

impl VirtualItem {
    #[must_use]
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            state: Mutex::new(State::Null),
            attributes: Mutex::new(HashMap::new()),
            commands: Mutex::new(Vec::new()),
            changes: None,
        }
    }

    /// Report state changes to `sender`.
    #[must_use]
    pub fn with_changes(mut self, sender: UnboundedSender<ItemStateChanged>) -> Self {
        self.changes = Some(sender);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    #[must_use]
    pub fn state(&self) -> State {
        lock(&self.state).clone()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<State> {
        lock(&self.attributes).get(name).cloned()
    }

    /// Every command received so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        lock(&self.commands).clone()
    }

    /// Record `command` and move to the state it implies, if any.
    pub fn apply_command(&self, command: Command) {
        let next = self.state_for_command(&command);
        lock(&self.commands).push(command);
        if let Some(state) = next {
            self.update(state);
        }
    }

    /// Set the state directly, notifying listeners when it changed.
    pub fn update(&self, state: State) {
        let changed = {
            let mut current = lock(&self.state);
            if *current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        };
        if !changed {
            return;
        }
        tracing::debug!(item = %self.name, state = %state, "virtual item changed");
        if let Some(sender) = &self.changes {
            let event = ItemStateChanged {
                item: self.name.clone(),
                state,
            };
            if sender.send(event).is_err() {
                tracing::debug!(item = %self.name, "no listener for item changes");
            }
        }
    }

    pub fn set_attribute(&self, name: &str, state: State) {
        lock(&self.attributes).insert(name.to_string(), state);
    }

    fn state_for_command(&self, command: &Command) -> Option<State> {
        match (self.item_type, command) {
            (_, Command::Refresh | Command::StopMove(_) | Command::NextPrevious(_)) => None,
            (ItemType::Rollershutter, Command::UpDown(UpDown::Up)) => {
                Some(State::Percent(Percent::ZERO))
            }
            (ItemType::Rollershutter, Command::UpDown(UpDown::Down)) => {
                Some(State::Percent(Percent::HUNDRED))
            }
            (ItemType::Dimmer, Command::OnOff(OnOff::On)) => Some(State::Percent(Percent::HUNDRED)),
            (ItemType::Dimmer, Command::OnOff(OnOff::Off)) => Some(State::Percent(Percent::ZERO)),
            (ItemType::Dimmer, Command::IncreaseDecrease(direction)) => {
                let level = match self.state() {
                    State::Percent(p) => p.value(),
                    _ => 0.0,
                };
                let delta = match direction {
                    IncreaseDecrease::Increase => DIMMER_INCREMENT,
                    IncreaseDecrease::Decrease => -DIMMER_INCREMENT,
                };
                Some(State::Percent(Percent::clamped(level + delta)))
            }
            (_, other) => State::try_from(other.clone()).ok(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hublink_domain::value::StopMove;
    use tokio::sync::mpsc;

    #[test]
    fn should_start_with_null_state() {
        let item = VirtualItem::new("Heater", ItemType::Switch);
        assert_eq!(item.state(), State::Null);
        assert!(item.commands().is_empty());
    }

    #[test]
    fn should_apply_switch_command_as_state() {
        let item = VirtualItem::new("Heater", ItemType::Switch);
        item.apply_command(Command::OnOff(OnOff::On));
        assert_eq!(item.state(), State::OnOff(OnOff::On));
        assert_eq!(item.commands(), vec![Command::OnOff(OnOff::On)]);
    }

    #[test]
    fn should_move_rollershutter_to_end_position_when_commanded_up_or_down() {
        let item = VirtualItem::new("Blinds", ItemType::Rollershutter);
        item.apply_command(Command::UpDown(UpDown::Down));
        assert_eq!(item.state(), State::Percent(Percent::HUNDRED));
        item.apply_command(Command::UpDown(UpDown::Up));
        assert_eq!(item.state(), State::Percent(Percent::ZERO));
    }

    #[test]
    fn should_keep_state_when_command_has_no_state() {
        let item = VirtualItem::new("Blinds", ItemType::Rollershutter);
        item.update(State::Percent(Percent::clamped(40.0)));
        item.apply_command(Command::StopMove(StopMove::Stop));
        assert_eq!(item.state(), State::Percent(Percent::clamped(40.0)));
        assert_eq!(item.commands().len(), 1);
    }

    #[test]
    fn should_step_dimmer_when_increased_or_decreased() {
        let item = VirtualItem::new("Light", ItemType::Dimmer);
        item.apply_command(Command::IncreaseDecrease(IncreaseDecrease::Increase));
        assert_eq!(item.state(), State::Percent(Percent::clamped(10.0)));
        item.apply_command(Command::OnOff(OnOff::On));
        item.apply_command(Command::IncreaseDecrease(IncreaseDecrease::Increase));
        assert_eq!(item.state(), State::Percent(Percent::HUNDRED));
    }

    #[test]
    fn should_notify_only_when_state_changes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let item = VirtualItem::new("Heater", ItemType::Switch).with_changes(tx);
        item.update(State::OnOff(OnOff::On));
        item.update(State::OnOff(OnOff::On));
        item.update(State::OnOff(OnOff::Off));

        assert_eq!(
            rx.try_recv().unwrap(),
            ItemStateChanged {
                item: "Heater".into(),
                state: State::OnOff(OnOff::On),
            }
        );
        assert_eq!(rx.try_recv().unwrap().state, State::OnOff(OnOff::Off));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn should_store_attributes_by_name() {
        let item = VirtualItem::new("Doorbell", ItemType::DateTime);
        item.set_attribute("last_updated", State::String("now".into()));
        assert_eq!(
            item.attribute("last_updated"),
            Some(State::String("now".into()))
        );
        assert_eq!(item.attribute("last_changed"), None);
    }
}
