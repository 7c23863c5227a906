//! Turns raw mouse/touch samples into joystick drag events.

use macroquad::prelude::*;
use minimap_core::{DragEvent, ScreenPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Held,
    Released,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: ScreenPoint,
    pub phase: PointerPhase,
}

fn touch_phase(phase: TouchPhase) -> PointerPhase {
    match phase {
        TouchPhase::Started => PointerPhase::Pressed,
        TouchPhase::Moved | TouchPhase::Stationary => PointerPhase::Held,
        TouchPhase::Ended => PointerPhase::Released,
        TouchPhase::Cancelled => PointerPhase::Cancelled,
    }
}

/// Every active touch, otherwise the left mouse button. Empty when nothing is pressed.
pub fn sample_pointers() -> Vec<PointerSample> {
    let touches = touches();
    if !touches.is_empty() {
        return touches
            .into_iter()
            .map(|touch| PointerSample {
                position: ScreenPoint::new(touch.position.x, touch.position.y),
                phase: touch_phase(touch.phase),
            })
            .collect();
    }

    let (x, y) = mouse_position();
    let phase = if is_mouse_button_pressed(MouseButton::Left) {
        PointerPhase::Pressed
    } else if is_mouse_button_released(MouseButton::Left) {
        PointerPhase::Released
    } else if is_mouse_button_down(MouseButton::Left) {
        PointerPhase::Held
    } else {
        return Vec::new();
    };
    vec![PointerSample {
        position: ScreenPoint::new(x, y),
        phase,
    }]
}

/// Round on-screen button hit area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldButton {
    pub center: ScreenPoint,
    pub radius: f32,
}

impl HoldButton {
    pub fn contains(&self, point: ScreenPoint) -> bool {
        (point - self.center).length() <= self.radius
    }

    /// Held while any pointer is down on it.
    pub fn is_held(&self, samples: &[PointerSample]) -> bool {
        samples.iter().any(|sample| {
            matches!(sample.phase, PointerPhase::Pressed | PointerPhase::Held)
                && self.contains(sample.position)
        })
    }
}

/// The pointer that steers the joystick: the first one not resting on `button`.
pub fn stick_pointer(samples: &[PointerSample], button: &HoldButton) -> Option<PointerSample> {
    samples
        .iter()
        .copied()
        .find(|sample| !button.contains(sample.position))
}

/// Drag events for one frame. A press only grabs the stick within `grab_radius` of the
/// anchor; losing the pointer mid-drag cancels.
pub fn drag_events(
    sample: Option<PointerSample>,
    anchor: ScreenPoint,
    grab_radius: f32,
    dragging: bool,
) -> Vec<DragEvent> {
    let Some(sample) = sample else {
        return if dragging {
            vec![DragEvent::Cancel]
        } else {
            Vec::new()
        };
    };

    let position = sample.position;
    match (sample.phase, dragging) {
        (PointerPhase::Pressed, false) if (position - anchor).length() <= grab_radius => {
            vec![DragEvent::Start { anchor }, DragEvent::Move { position }]
        }
        (PointerPhase::Pressed | PointerPhase::Held, true) => vec![DragEvent::Move { position }],
        (PointerPhase::Released, true) => vec![DragEvent::End],
        (PointerPhase::Cancelled, true) => vec![DragEvent::Cancel],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: ScreenPoint = ScreenPoint { x: 100.0, y: 100.0 };

    fn sample(x: f32, y: f32, phase: PointerPhase) -> Option<PointerSample> {
        Some(PointerSample {
            position: ScreenPoint::new(x, y),
            phase,
        })
    }

    #[test]
    fn press_inside_base_starts_drag() {
        let pressed = sample(110.0, 95.0, PointerPhase::Pressed);
        let events = drag_events(pressed, ANCHOR, 60.0, false);
        assert_eq!(
            events,
            vec![
                DragEvent::Start { anchor: ANCHOR },
                DragEvent::Move {
                    position: ScreenPoint::new(110.0, 95.0)
                },
            ]
        );
    }

    #[test]
    fn press_outside_base_is_ignored() {
        let pressed = sample(300.0, 100.0, PointerPhase::Pressed);
        assert!(drag_events(pressed, ANCHOR, 60.0, false).is_empty());
        let held = sample(300.0, 100.0, PointerPhase::Held);
        assert!(drag_events(held, ANCHOR, 60.0, false).is_empty());
    }

    #[test]
    fn held_pointer_keeps_moving_even_outside_base() {
        let events = drag_events(sample(400.0, 100.0, PointerPhase::Held), ANCHOR, 60.0, true);
        assert_eq!(
            events,
            vec![DragEvent::Move {
                position: ScreenPoint::new(400.0, 100.0)
            }]
        );
    }

    #[test]
    fn release_ends_and_loss_cancels() {
        assert_eq!(
            drag_events(sample(0.0, 0.0, PointerPhase::Released), ANCHOR, 60.0, true),
            vec![DragEvent::End]
        );
        assert_eq!(
            drag_events(sample(0.0, 0.0, PointerPhase::Cancelled), ANCHOR, 60.0, true),
            vec![DragEvent::Cancel]
        );
        assert_eq!(drag_events(None, ANCHOR, 60.0, true), vec![DragEvent::Cancel]);
        assert!(drag_events(None, ANCHOR, 60.0, false).is_empty());
    }

    const BUTTON: HoldButton = HoldButton {
        center: ScreenPoint { x: 20.0, y: 100.0 },
        radius: 30.0,
    };

    fn at(x: f32, y: f32, phase: PointerPhase) -> PointerSample {
        PointerSample {
            position: ScreenPoint::new(x, y),
            phase,
        }
    }

    #[test]
    fn button_is_held_only_while_pressed_inside() {
        assert!(BUTTON.is_held(&[at(25.0, 110.0, PointerPhase::Pressed)]));
        assert!(BUTTON.is_held(&[at(25.0, 110.0, PointerPhase::Held)]));
        assert!(!BUTTON.is_held(&[at(25.0, 110.0, PointerPhase::Released)]));
        assert!(!BUTTON.is_held(&[at(80.0, 100.0, PointerPhase::Held)]));
        assert!(!BUTTON.is_held(&[]));
    }

    #[test]
    fn stick_ignores_the_pointer_on_the_button() {
        let samples = [
            at(20.0, 100.0, PointerPhase::Held),
            at(110.0, 100.0, PointerPhase::Held),
        ];
        assert!(BUTTON.is_held(&samples));
        assert_eq!(stick_pointer(&samples, &BUTTON), Some(samples[1]));
        assert_eq!(stick_pointer(&samples[..1], &BUTTON), None);
    }
}
