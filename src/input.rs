//! Input handling.
//!
//! `winit` pushes window events at the application as they arrive; the game
//! loop wants to poll them once per frame. [`InputQueue`] sits in between: it
//! translates the events the demo cares about into [`InputEvent`]s and holds
//! them until the next frame drains the queue.
//!
//! Mouse button events from `winit` carry no position, so the queue tracks
//! the last cursor position and stamps it onto presses and releases.

use std::collections::VecDeque;

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// A window event the game loop reacts to. Positions are in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    CloseRequested,
    PointerPressed { button: MouseButton, position: Vec2 },
    PointerReleased { button: MouseButton, position: Vec2 },
    PointerMoved { position: Vec2 },
}

/// Pending input, filled by the window handler and drained by the loop.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    cursor: Vec2,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in pixels.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue an already translated event.
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::PointerMoved { position } = event {
            self.cursor = position;
        }
        self.pending.push_back(event);
    }

    /// Translate and queue a `winit` window event. Returns `true` if the
    /// event was one the game loop cares about.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        let translated = match event {
            WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                let position = self.cursor;
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerPressed { button, position },
                    ElementState::Released => InputEvent::PointerReleased { button, position },
                })
            }
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
                position: Vec2::new(position.x as f32, position.y as f32),
            }),
            _ => None,
        };

        match translated {
            Some(event) => {
                self.push(event);
                true
            }
            None => false,
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerMoved { position: Vec2::new(1.0, 2.0) });
        queue.push(InputEvent::CloseRequested);

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMoved { position: Vec2::new(1.0, 2.0) },
                InputEvent::CloseRequested,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_moves_update_cursor() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerMoved { position: Vec2::new(400.0, 300.0) });
        assert_eq!(queue.cursor(), Vec2::new(400.0, 300.0));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_close_event_is_translated() {
        let mut queue = InputQueue::new();
        assert!(queue.handle_event(&WindowEvent::CloseRequested));
        assert_eq!(queue.drain().next(), Some(InputEvent::CloseRequested));
    }

    #[test]
    fn test_unrelated_events_are_skipped() {
        let mut queue = InputQueue::new();
        assert!(!queue.handle_event(&WindowEvent::Focused(true)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
