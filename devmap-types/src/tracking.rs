use bitflags::bitflags;
use mint::{Quaternion, Vector3};
use strum_macros::{Display, EnumIter, FromRepr};

bitflags! {
    /// Which of the optional tracking fields carry valid data
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct TrackingFields: u32 {
        const POSITION = 1 << 0;
        const ROTATION = 1 << 1;
        const VELOCITY = 1 << 2;
        const ANGULAR_VELOCITY = 1 << 3;
        const ACCELERATION = 1 << 4;
        const ANGULAR_ACCELERATION = 1 << 5;
    }
}

/// Node ids reported by the XR platform layer before any profile touches them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u32)]
pub enum PlatformNode {
    LeftEye = 0,
    RightEye = 1,
    CenterEye = 2,
    Head = 3,
    LeftHand = 4,
    RightHand = 5,
    GameController = 6,
    TrackingReference = 7,
    HardwareTracker = 8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingEvent {
    pub node_id: u32,
    pub available_fields: TrackingFields,
    pub local_position: Vector3<f32>,
    pub local_rotation: Quaternion<f32>,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    pub acceleration: Vector3<f32>,
    pub angular_acceleration: Vector3<f32>,
}

impl TrackingEvent {
    pub fn has(&self, fields: TrackingFields) -> bool {
        self.available_fields.contains(fields)
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.local_position = position;
        self.available_fields |= TrackingFields::POSITION;
    }

    pub fn set_rotation(&mut self, rotation: Quaternion<f32>) {
        self.local_rotation = rotation;
        self.available_fields |= TrackingFields::ROTATION;
    }

    pub fn set_velocity(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
        self.available_fields |= TrackingFields::VELOCITY;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: Vector3<f32>) {
        self.angular_velocity = angular_velocity;
        self.available_fields |= TrackingFields::ANGULAR_VELOCITY;
    }

    pub fn set_acceleration(&mut self, acceleration: Vector3<f32>) {
        self.acceleration = acceleration;
        self.available_fields |= TrackingFields::ACCELERATION;
    }

    pub fn set_angular_acceleration(&mut self, angular_acceleration: Vector3<f32>) {
        self.angular_acceleration = angular_acceleration;
        self.available_fields |= TrackingFields::ANGULAR_ACCELERATION;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for TrackingEvent {
    fn default() -> Self {
        Self {
            node_id: 0,
            available_fields: TrackingFields::empty(),
            local_position: crate::event::ZERO3,
            local_rotation: crate::event::IDENTITY,
            velocity: crate::event::ZERO3,
            angular_velocity: crate::event::ZERO3,
            acceleration: crate::event::ZERO3,
            angular_acceleration: crate::event::ZERO3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_mark_fields_available() {
        let mut event = TrackingEvent::default();
        assert!(event.available_fields.is_empty());

        event.set_position(Vector3 { x: 1., y: 2., z: 3. });
        event.set_angular_velocity(Vector3 { x: 0., y: 1., z: 0. });

        assert!(event.has(TrackingFields::POSITION | TrackingFields::ANGULAR_VELOCITY));
        assert!(!event.has(TrackingFields::ROTATION));
    }

    #[test]
    fn reset_clears_mask_and_payload() {
        let mut event = TrackingEvent {
            node_id: PlatformNode::RightHand as u32,
            ..Default::default()
        };
        event.set_acceleration(Vector3 { x: 9.8, y: 0., z: 0. });
        event.reset();

        assert_eq!(event, TrackingEvent::default());
    }

    #[test]
    fn platform_node_from_raw() {
        assert_eq!(PlatformNode::from_repr(0), Some(PlatformNode::LeftEye));
        assert_eq!(PlatformNode::from_repr(3), Some(PlatformNode::Head));
        assert_eq!(PlatformNode::from_repr(42), None);
    }
}
