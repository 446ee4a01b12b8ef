//! Keyboard input.
//!
//! Key presses arrive on whatever thread the host reads them on and are
//! queued until the next tick applies them.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::KeyBindings;

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
}

impl KeyEvent {
    pub fn new(key: char) -> Self {
        Self { key }
    }
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleOrbit,
    CycleCamera,
    Quit,
}

impl KeyBindings {
    /// Action bound to `key`, if any. Matching is case-sensitive.
    pub fn action_for(&self, key: char) -> Option<Action> {
        if self.toggle_orbit.contains(&key) {
            Some(Action::ToggleOrbit)
        } else if self.cycle_camera.contains(&key) {
            Some(Action::CycleCamera)
        } else if self.quit.contains(&key) {
            Some(Action::Quit)
        } else {
            None
        }
    }

    /// On-screen control hints.
    pub fn hints(&self) -> Vec<String> {
        let label = |keys: &[char]| keys.first().map(|k| k.to_ascii_uppercase());
        [
            (label(&self.toggle_orbit), "Toggle orbit camera"),
            (label(&self.cycle_camera), "Toggle cameras"),
        ]
        .into_iter()
        .filter_map(|(key, text)| key.map(|k| format!("{k} - {text}")))
        .collect()
    }
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<KeyEvent>,
    closed: bool,
}

/// Shared queue of pending key events.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    inner: Arc<Mutex<QueueState>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: KeyEvent) {
        self.inner.lock().events.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<KeyEvent> {
        self.inner.lock().events.drain(..).collect()
    }

    /// Mark the input source as finished.
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for('o'), Some(Action::ToggleOrbit));
        assert_eq!(bindings.action_for('c'), Some(Action::CycleCamera));
        assert_eq!(bindings.action_for('C'), Some(Action::CycleCamera));
        assert_eq!(bindings.action_for('q'), Some(Action::Quit));
        assert_eq!(bindings.action_for('O'), None);
        assert_eq!(bindings.action_for('x'), None);
    }

    #[test]
    fn test_hints() {
        assert_eq!(
            KeyBindings::default().hints(),
            vec!["O - Toggle orbit camera", "C - Toggle cameras"]
        );
    }

    #[test]
    fn test_queue_across_threads() {
        let queue = InputQueue::new();
        let producer = queue.clone();
        std::thread::spawn(move || {
            for key in ['c', 'o', 'c'] {
                producer.push(KeyEvent::new(key));
            }
            producer.close();
        })
        .join()
        .unwrap();

        assert_eq!(queue.len(), 3);
        let keys: Vec<char> = queue.drain().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!['c', 'o', 'c']);
        assert!(queue.is_empty());
        assert!(queue.is_closed());
    }
}
