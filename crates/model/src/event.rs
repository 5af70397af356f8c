//! Pan gesture events delivered by the host's gesture-source collaborator.
//!
//! The core does not normalize raw pointer events; it consumes an
//! already-recognized pan stream. Horizontal deltas and velocities are
//! quantized to 3 decimal digits before interpretation so that repeated
//! offset math never accumulates sub-millipixel noise.

use serde::{Deserialize, Serialize};

/// Phase of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanPhase {
    /// First recognized frame of the gesture.
    Start,
    /// Pointer moved with a net leftward delta.
    Left,
    /// Pointer moved with a net rightward delta.
    Right,
    /// Pointer released.
    End,
    /// Gesture aborted by the recognizer.
    Cancel,
}

/// A single recognized pan event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanEvent {
    #[serde(rename = "type")]
    pub phase: PanPhase,

    /// Net horizontal displacement since the gesture started, in px.
    pub delta_x: f64,

    /// Angle of the overall gesture in degrees; 0 is rightward along
    /// the screen axis, ±180 leftward.
    pub angle_deg: f64,

    /// Overall horizontal velocity since the gesture started, in
    /// px/ms.
    pub overall_velocity_x: f64,

    /// Whether the recognizer considers the gesture finished.
    pub is_final: bool,
}

impl PanEvent {
    pub fn start(angle_deg: f64) -> Self {
        Self {
            phase: PanPhase::Start,
            delta_x: 0.0,
            angle_deg,
            overall_velocity_x: 0.0,
            is_final: false,
        }
    }

    pub fn moved(delta_x: f64) -> Self {
        Self {
            phase: if delta_x < 0.0 {
                PanPhase::Left
            } else {
                PanPhase::Right
            },
            delta_x,
            angle_deg: 0.0,
            overall_velocity_x: 0.0,
            is_final: false,
        }
    }

    pub fn end(delta_x: f64, overall_velocity_x: f64) -> Self {
        Self {
            phase: PanPhase::End,
            delta_x,
            angle_deg: 0.0,
            overall_velocity_x,
            is_final: true,
        }
    }

    pub fn cancel(delta_x: f64) -> Self {
        Self {
            phase: PanPhase::Cancel,
            delta_x,
            angle_deg: 0.0,
            overall_velocity_x: 0.0,
            is_final: true,
        }
    }

    /// Net delta floored to 3 decimal digits.
    pub fn quantized_delta_x(&self) -> f64 {
        quantize(self.delta_x)
    }

    /// Overall velocity floored to 3 decimal digits.
    pub fn quantized_velocity_x(&self) -> f64 {
        quantize(self.overall_velocity_x)
    }
}

/// Floor to 3 decimal digits.
fn quantize(value: f64) -> f64 {
    (value * 1000.0).floor() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantization_floors_toward_negative() {
        let event = PanEvent::moved(-10.23456);
        assert_eq!(event.quantized_delta_x(), -10.235);

        let event = PanEvent::moved(10.23456);
        assert_eq!(event.quantized_delta_x(), 10.234);
    }

    #[test]
    fn test_moved_phase_follows_sign() {
        assert_eq!(PanEvent::moved(-4.0).phase, PanPhase::Left);
        assert_eq!(PanEvent::moved(4.0).phase, PanPhase::Right);
    }

    #[test]
    fn test_event_roundtrip() {
        let event = PanEvent::end(-120.5, 0.42);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"end""#));
        let parsed: PanEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
