use mint::{Quaternion, Vector2, Vector3};
use strum_macros::{Display, EnumIter};

use crate::{tracking::TrackingEvent, DeviceId, Time};

pub(crate) const ZERO2: Vector2<f32> = Vector2 { x: 0., y: 0. };
pub(crate) const ZERO3: Vector3<f32> = Vector3 { x: 0., y: 0., z: 0. };
pub(crate) const IDENTITY: Quaternion<f32> = Quaternion { v: ZERO3, s: 1. };

/**
 * A raw event as delivered by the host event queue
 *
 * `control_index` is only meaningful relative to the raw control layout of the
 * device the event came from. Profiles re-index it into their logical controls.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEvent {
    pub device: DeviceId,
    pub control_index: i32,
    pub time: Time,
    pub data: RawEventData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EventKind {
    Pointer,
    PointerMove,
    Text,
    Tracking,
    Click,
    Key,
    GenericControl,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEventData {
    Pointer(PointerEvent),
    PointerMove(PointerMoveEvent),
    Text(TextEvent),
    Tracking(TrackingEvent),
    Click(ClickEvent),
    Key(KeyEvent),
    GenericControl(ControlValue),
}

impl RawEvent {
    /// A zeroed event of the given kind
    pub fn new(kind: EventKind) -> Self {
        Self {
            device: DeviceId::default(),
            control_index: 0,
            time: Time::default(),
            data: RawEventData::new(kind),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Clears every field back to its zero value, keeping the event kind
    pub fn reset(&mut self) {
        self.device = DeviceId::default();
        self.control_index = 0;
        self.time = Time::default();
        self.data.reset();
    }
}

impl RawEventData {
    pub fn new(kind: EventKind) -> Self {
        match kind {
            EventKind::Pointer => Self::Pointer(PointerEvent::default()),
            EventKind::PointerMove => Self::PointerMove(PointerMoveEvent::default()),
            EventKind::Text => Self::Text(TextEvent::default()),
            EventKind::Tracking => Self::Tracking(TrackingEvent::default()),
            EventKind::Click => Self::Click(ClickEvent::default()),
            EventKind::Key => Self::Key(KeyEvent::default()),
            EventKind::GenericControl => Self::GenericControl(ControlValue::default()),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Pointer(_) => EventKind::Pointer,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::Text(_) => EventKind::Text,
            Self::Tracking(_) => EventKind::Tracking,
            Self::Click(_) => EventKind::Click,
            Self::Key(_) => EventKind::Key,
            Self::GenericControl(_) => EventKind::GenericControl,
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Pointer(pointer) => pointer.reset(),
            Self::PointerMove(pointer_move) => pointer_move.reset(),
            Self::Text(text) => text.reset(),
            Self::Tracking(tracking) => tracking.reset(),
            Self::Click(click) => click.reset(),
            Self::Key(key) => key.reset(),
            Self::GenericControl(value) => value.reset(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: i32,
    pub position: Vector3<f32>,
    pub delta: Vector3<f32>,
    pub pressure: f32,
    pub tilt: Vector2<f32>,
    pub rotation: f32,
    pub radius: Vector3<f32>,
    pub distance: f32,
    pub display_index: i32,
}

impl PointerEvent {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for PointerEvent {
    fn default() -> Self {
        Self {
            pointer_id: 0,
            position: ZERO3,
            delta: ZERO3,
            pressure: 0.,
            tilt: ZERO2,
            rotation: 0.,
            radius: ZERO3,
            distance: 0.,
            display_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMoveEvent {
    pub pointer_id: i32,
    pub position: Vector3<f32>,
    pub delta: Vector3<f32>,
}

impl PointerMoveEvent {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for PointerMoveEvent {
    fn default() -> Self {
        Self {
            pointer_id: 0,
            position: ZERO3,
            delta: ZERO3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextEvent {
    pub character: char,
}

impl TextEvent {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub is_down: bool,
    pub click_count: u32,
    pub position: Vector2<f32>,
}

impl ClickEvent {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for ClickEvent {
    fn default() -> Self {
        Self {
            is_down: false,
            click_count: 0,
            position: ZERO2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: u32,
    pub is_down: bool,
    pub is_repeat: bool,
    pub modifiers: u8,
}

impl KeyEvent {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Payload of a `GenericControl` event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vector2(Vector2<f32>),
    Vector3(Vector3<f32>),
    Quaternion(Quaternion<f32>),
}

impl ControlValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Back to `Float(0.)`, the value a fresh `GenericControl` event carries
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for ControlValue {
    fn default() -> Self {
        Self::Float(0.)
    }
}
