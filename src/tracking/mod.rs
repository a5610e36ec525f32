//! Landmark ingestion
//!
//! Facial landmarks arrive from an external face-tracking process; this
//! module only defines the wire types and the UDP receiver. No face
//! detection happens in this service.

pub mod landmarks;
pub mod receiver;

pub use landmarks::{Landmark, MouthState, MOUTH_OPEN_THRESHOLD};
pub use receiver::{LandmarkReceiver, TrackerData, TrackerPacket};
