//! Keyboard shortcut handling and held-key repeat

use std::collections::HashMap;
use std::time::Duration;

use super::timers::{Scheduler, TimerId};
use crate::state::Modifiers;

/// Keys the editor binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Q,
    E,
    Equals,
    Minus,
    Escape,
    Z,
    Y,
    Other,
}

impl Key {
    /// Map a host key name (`"q"`, `"="`, `"Escape"`, ...) to a key
    pub fn from_name(name: &str) -> Self {
        match name {
            "q" | "Q" => Key::Q,
            "e" | "E" => Key::E,
            "=" | "+" => Key::Equals,
            "-" | "_" => Key::Minus,
            "Escape" | "Esc" => Key::Escape,
            "z" | "Z" => Key::Z,
            "y" | "Y" => Key::Y,
            _ => Key::Other,
        }
    }
}

/// Something that repeats while its key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldAction {
    RotateNegative,
    RotatePositive,
    GrowBackground,
    ShrinkBackground,
}

impl HoldAction {
    /// +1 or -1
    pub fn sign(self) -> f64 {
        match self {
            HoldAction::RotateNegative | HoldAction::ShrinkBackground => -1.0,
            HoldAction::RotatePositive | HoldAction::GrowBackground => 1.0,
        }
    }
}

/// What a key press means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Hold(HoldAction),
    ClearSelection,
    Undo,
    Redo,
}

/// Ctrl+Z undo; Ctrl+Y and Ctrl+Shift+Z redo; bare Q/E/=/- hold; Escape clears.
pub fn shortcut(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
    if modifiers.ctrl {
        return match key {
            Key::Z if modifiers.shift => Some(Shortcut::Redo),
            Key::Z => Some(Shortcut::Undo),
            Key::Y => Some(Shortcut::Redo),
            _ => None,
        };
    }
    match key {
        Key::Q => Some(Shortcut::Hold(HoldAction::RotateNegative)),
        Key::E => Some(Shortcut::Hold(HoldAction::RotatePositive)),
        Key::Equals => Some(Shortcut::Hold(HoldAction::GrowBackground)),
        Key::Minus => Some(Shortcut::Hold(HoldAction::ShrinkBackground)),
        Key::Escape => Some(Shortcut::ClearSelection),
        _ => None,
    }
}

/// Timer payload: which hold it belongs to and which stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    pub action: HoldAction,
    pub repeat: bool,
}

/// Per-key hold state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldPhase {
    #[default]
    Idle,
    /// Waiting for the initial delay
    ArmedOnce(TimerId),
    Repeating(TimerId),
}

/// Hold state for every bound key
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    holds: HashMap<HoldAction, HoldPhase>,
}

impl KeyboardState {
    pub fn phase(&self, action: HoldAction) -> HoldPhase {
        self.holds.get(&action).copied().unwrap_or_default()
    }

    pub fn is_held(&self, action: HoldAction) -> bool {
        self.phase(action) != HoldPhase::Idle
    }

    /// Arm the hold. Returns false for OS auto-repeat of a key already down,
    /// in which case the caller must not step again.
    pub fn key_down(
        &mut self,
        action: HoldAction,
        delay: Duration,
        scheduler: &mut Scheduler<HoldTimer>,
    ) -> bool {
        if self.is_held(action) {
            return false;
        }
        let id = scheduler.schedule_once(delay, HoldTimer { action, repeat: false });
        self.holds.insert(action, HoldPhase::ArmedOnce(id));
        true
    }

    /// Cancel both stages of the hold
    pub fn key_up(&mut self, action: HoldAction, scheduler: &mut Scheduler<HoldTimer>) -> bool {
        match self.holds.remove(&action) {
            Some(HoldPhase::ArmedOnce(id)) | Some(HoldPhase::Repeating(id)) => {
                scheduler.cancel(id);
                true
            }
            _ => false,
        }
    }

    /// Cancel every hold (window blur)
    pub fn release_all(&mut self, scheduler: &mut Scheduler<HoldTimer>) {
        let actions: Vec<HoldAction> = self.holds.keys().copied().collect();
        for action in actions {
            self.key_up(action, scheduler);
        }
    }

    /// Handle a fired timer. Returns true when the caller should perform one
    /// repeat step. The initial delay only arms the repeating timer.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        timer: HoldTimer,
        interval: Duration,
        scheduler: &mut Scheduler<HoldTimer>,
    ) -> bool {
        match (self.phase(timer.action), timer.repeat) {
            (HoldPhase::ArmedOnce(armed), false) if armed == id => {
                let repeat = HoldTimer {
                    action: timer.action,
                    repeat: true,
                };
                let rid = scheduler.schedule_repeating(interval, repeat);
                self.holds.insert(timer.action, HoldPhase::Repeating(rid));
                tracing::debug!(action = ?timer.action, "key hold repeating");
                false
            }
            (HoldPhase::Repeating(current), true) => current == id,
            _ => {
                // Stale timer from an earlier gesture
                scheduler.cancel(id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);
    const INTERVAL: Duration = Duration::from_millis(100);

    fn run(
        kb: &mut KeyboardState,
        s: &mut Scheduler<HoldTimer>,
        until: Duration,
    ) -> Vec<Duration> {
        let mut steps = Vec::new();
        while let Some((id, t)) = s.pop_due(until) {
            if kb.on_timer(id, t, INTERVAL, s) {
                steps.push(s.now());
            }
        }
        s.set_now(until);
        steps
    }

    #[test]
    fn test_shortcut_bindings() {
        assert_eq!(shortcut(Key::Z, Modifiers::CTRL), Some(Shortcut::Undo));
        let ctrl_shift = Modifiers { shift: true, ctrl: true };
        assert_eq!(shortcut(Key::Z, ctrl_shift), Some(Shortcut::Redo));
        assert_eq!(shortcut(Key::Y, Modifiers::CTRL), Some(Shortcut::Redo));
        assert_eq!(
            shortcut(Key::Q, Modifiers::NONE),
            Some(Shortcut::Hold(HoldAction::RotateNegative))
        );
        assert_eq!(shortcut(Key::Escape, Modifiers::NONE), Some(Shortcut::ClearSelection));
        assert_eq!(shortcut(Key::Z, Modifiers::NONE), None);
        assert_eq!(Key::from_name("+"), Key::Equals);
    }

    #[test]
    fn test_hold_timeline() {
        let mut kb = KeyboardState::default();
        let mut s = Scheduler::default();
        assert!(kb.key_down(HoldAction::RotatePositive, DELAY, &mut s));

        assert!(run(&mut kb, &mut s, Duration::from_millis(1099)).is_empty());
        assert!(matches!(kb.phase(HoldAction::RotatePositive), HoldPhase::Repeating(_)));

        let steps = run(&mut kb, &mut s, Duration::from_millis(1300));
        assert_eq!(
            steps,
            vec![
                Duration::from_millis(1100),
                Duration::from_millis(1200),
                Duration::from_millis(1300)
            ]
        );
    }

    #[test]
    fn test_auto_repeat_ignored() {
        let mut kb = KeyboardState::default();
        let mut s = Scheduler::default();
        assert!(kb.key_down(HoldAction::RotateNegative, DELAY, &mut s));
        assert!(!kb.key_down(HoldAction::RotateNegative, DELAY, &mut s));
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn test_key_up_cancels_both_stages() {
        let mut kb = KeyboardState::default();
        let mut s = Scheduler::default();
        kb.key_down(HoldAction::GrowBackground, DELAY, &mut s);
        assert!(kb.key_up(HoldAction::GrowBackground, &mut s));
        assert_eq!(s.pending(), 0);

        kb.key_down(HoldAction::GrowBackground, DELAY, &mut s);
        run(&mut kb, &mut s, Duration::from_millis(1500));
        assert!(kb.key_up(HoldAction::GrowBackground, &mut s));
        assert_eq!(s.pending(), 0);
        assert!(run(&mut kb, &mut s, Duration::from_millis(5000)).is_empty());
    }

    #[test]
    fn test_release_all() {
        let mut kb = KeyboardState::default();
        let mut s = Scheduler::default();
        kb.key_down(HoldAction::RotatePositive, DELAY, &mut s);
        kb.key_down(HoldAction::ShrinkBackground, DELAY, &mut s);
        kb.release_all(&mut s);
        assert_eq!(s.pending(), 0);
        assert!(!kb.is_held(HoldAction::RotatePositive));
    }
}
