//! Virtual joystick: turns a drag vector into a stick offset and up to two movement
//! directions.
//!
//! Angles are measured in screen space (+y down), so 90° is straight down. Each direction
//! owns a 135° band; neighbouring bands overlap by 45°, which is where diagonals come from.

use crate::draw::ScreenPoint;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirectionSet: u8 {
        const UP = 1;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// Key state handed to keyboard-style movement code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementKeys {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

impl DirectionSet {
    pub fn movement_keys(self) -> MovementKeys {
        MovementKeys {
            w: self.contains(Self::UP),
            a: self.contains(Self::LEFT),
            s: self.contains(Self::DOWN),
            d: self.contains(Self::RIGHT),
        }
    }

    /// Unit-length movement vector in screen space; zero for an empty or cancelling set.
    pub fn vector(self) -> ScreenPoint {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.contains(Self::LEFT) {
            x -= 1.0;
        }
        if self.contains(Self::RIGHT) {
            x += 1.0;
        }
        if self.contains(Self::UP) {
            y -= 1.0;
        }
        if self.contains(Self::DOWN) {
            y += 1.0;
        }
        let length = ScreenPoint::new(x, y).length();
        if length == 0.0 {
            ScreenPoint::ZERO
        } else {
            ScreenPoint::new(x / length, y / length)
        }
    }
}

const UP_BAND: (f32, f32) = (-157.5, -22.5);
const DOWN_BAND: (f32, f32) = (22.5, 157.5);
const LEFT_EDGE: f32 = 112.5;
const RIGHT_EDGE: f32 = 67.5;

/// Directions active for an angle in degrees within (-180, 180]. Band edges are exclusive.
pub fn directions_for_angle(degrees: f32) -> DirectionSet {
    let mut set = DirectionSet::empty();
    if degrees > UP_BAND.0 && degrees < UP_BAND.1 {
        set |= DirectionSet::UP;
    }
    if degrees > DOWN_BAND.0 && degrees < DOWN_BAND.1 {
        set |= DirectionSet::DOWN;
    }
    if degrees > LEFT_EDGE || degrees < -LEFT_EDGE {
        set |= DirectionSet::LEFT;
    }
    if degrees > -RIGHT_EDGE && degrees < RIGHT_EDGE {
        set |= DirectionSet::RIGHT;
    }
    set
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickResolution {
    pub offset: ScreenPoint,
    pub directions: DirectionSet,
}

/// Clamps `drag` to `max_magnitude` and maps its angle to directions.
/// A zero or non-finite drag resolves to the neutral stick.
pub fn resolve_drag(drag: ScreenPoint, max_magnitude: f32) -> StickResolution {
    let distance = drag.x.hypot(drag.y);
    if distance == 0.0 || !distance.is_finite() {
        return StickResolution::default();
    }

    let angle = drag.y.atan2(drag.x);
    let clamped = distance.min(max_magnitude.max(0.0));
    let (sin_a, cos_a) = angle.sin_cos();

    StickResolution {
        offset: ScreenPoint::new(cos_a * clamped, sin_a * clamped),
        directions: directions_for_angle(angle.to_degrees()),
    }
}

/// Receives the direction set after every drag step, including the empty set on release.
pub trait MovementSink {
    fn directions_changed(&mut self, directions: DirectionSet);
}

impl<F: FnMut(DirectionSet)> MovementSink for F {
    fn directions_changed(&mut self, directions: DirectionSet) {
        self(directions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickState {
    pub offset: ScreenPoint,
    pub directions: DirectionSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: ScreenPoint,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Gesture started; `anchor` is the joystick's rest position.
    Start { anchor: ScreenPoint },
    /// Absolute pointer position.
    Move { position: ScreenPoint },
    End,
    /// Gesture lost, e.g. the pointer left the tracked region.
    Cancel,
}

/// One drag gesture at a time: `Idle -> Dragging` on start, back to `Idle` on end or cancel.
/// Returning to `Idle` always emits the empty set.
#[derive(Debug, Clone)]
pub struct DragTracker {
    state: DragState,
    stick: StickState,
    max_magnitude: f32,
}

impl DragTracker {
    pub fn new(max_magnitude: f32) -> Self {
        Self {
            state: DragState::Idle,
            stick: StickState::default(),
            max_magnitude,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn stick(&self) -> StickState {
        self.stick
    }

    pub fn max_magnitude(&self) -> f32 {
        self.max_magnitude
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn begin(&mut self, anchor: ScreenPoint) {
        if self.is_dragging() {
            log::debug!("drag restarted at {:?}", anchor);
        } else {
            log::debug!("drag started at {:?}", anchor);
        }
        self.state = DragState::Dragging { anchor };
    }

    /// Resolves `position` against the anchor and emits the result. Ignored while idle.
    pub fn drag_to<S>(&mut self, position: ScreenPoint, sink: &mut S) -> Option<StickResolution>
    where
        S: MovementSink + ?Sized,
    {
        let DragState::Dragging { anchor } = self.state else {
            return None;
        };

        let resolution = resolve_drag(position - anchor, self.max_magnitude);
        self.stick = StickState {
            offset: resolution.offset,
            directions: resolution.directions,
        };
        sink.directions_changed(resolution.directions);
        Some(resolution)
    }

    pub fn end<S>(&mut self, sink: &mut S)
    where
        S: MovementSink + ?Sized,
    {
        if self.is_dragging() {
            log::debug!("drag ended");
        }
        self.release(sink);
    }

    pub fn cancel<S>(&mut self, sink: &mut S)
    where
        S: MovementSink + ?Sized,
    {
        if self.is_dragging() {
            log::debug!("drag lost");
        }
        self.release(sink);
    }

    pub fn handle<S>(&mut self, event: DragEvent, sink: &mut S) -> Option<StickResolution>
    where
        S: MovementSink + ?Sized,
    {
        match event {
            DragEvent::Start { anchor } => {
                self.begin(anchor);
                None
            }
            DragEvent::Move { position } => self.drag_to(position, sink),
            DragEvent::End => {
                self.end(sink);
                None
            }
            DragEvent::Cancel => {
                self.cancel(sink);
                None
            }
        }
    }

    fn release<S>(&mut self, sink: &mut S)
    where
        S: MovementSink + ?Sized,
    {
        self.state = DragState::Idle;
        self.stick = StickState::default();
        sink.directions_changed(DirectionSet::empty());
    }
}
