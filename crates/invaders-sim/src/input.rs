//! Level-state input per player.
//!
//! Raw key edges are folded into held booleans by the host; systems read
//! the held state every tick.

use invaders_core::commands::Action;
use invaders_core::enums::PlayerSlot;

/// Held state of every action for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub fire: bool,
    pub dash: bool,
    pub slow_time: bool,
    pub bomb: bool,
}

impl ActionState {
    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::MoveUp => self.move_up,
            Action::MoveDown => self.move_down,
            Action::Fire => self.fire,
            Action::Dash => self.dash,
            Action::SlowTime => self.slow_time,
            Action::Bomb => self.bomb,
        }
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        let flag = match action {
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::MoveUp => &mut self.move_up,
            Action::MoveDown => &mut self.move_down,
            Action::Fire => &mut self.fire,
            Action::Dash => &mut self.dash,
            Action::SlowTime => &mut self.slow_time,
            Action::Bomb => &mut self.bomb,
        };
        *flag = pressed;
    }
}

/// Input blocks for both players.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    players: [ActionState; 2],
}

impl InputState {
    pub fn set(&mut self, player: PlayerSlot, action: Action, pressed: bool) {
        self.players[player.index()].set(action, pressed);
    }

    pub fn is_held(&self, player: PlayerSlot, action: Action) -> bool {
        self.players[player.index()].is_held(action)
    }

    /// Clear a flag after it has been consumed, so a held key does not
    /// retrigger once its cooldown expires.
    pub fn consume(&mut self, player: PlayerSlot, action: Action) {
        self.players[player.index()].set(action, false);
    }

    pub fn player(&self, player: PlayerSlot) -> &ActionState {
        &self.players[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_are_independent() {
        let mut input = InputState::default();
        input.set(PlayerSlot::One, Action::Fire, true);
        assert!(input.is_held(PlayerSlot::One, Action::Fire));
        assert!(!input.is_held(PlayerSlot::Two, Action::Fire));
    }

    #[test]
    fn every_action_round_trips() {
        let mut state = ActionState::default();
        for action in Action::ALL {
            state.set(action, true);
            assert!(state.is_held(action), "{action:?} should be held");
        }
        for action in Action::ALL {
            state.set(action, false);
        }
        assert_eq!(state, ActionState::default());
    }

    #[test]
    fn consume_releases_flag() {
        let mut input = InputState::default();
        input.set(PlayerSlot::One, Action::Bomb, true);
        input.consume(PlayerSlot::One, Action::Bomb);
        assert!(!input.player(PlayerSlot::One).bomb);
    }
}
