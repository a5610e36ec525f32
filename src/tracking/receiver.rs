//! Landmark receiver
//!
//! Receives JSON-over-UDP packets from an external face-tracking helper
//! (e.g. a MediaPipe Face Landmarker subprocess). One packet per video
//! frame; the tracker owns camera capture and frame-rate throttling.

use serde::Deserialize;
use std::net::UdpSocket;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::TrackingConfig;
use crate::error::{BrushsenseError, TrackingError};
use crate::tracking::landmarks::Landmark;

/// A single JSON packet from the tracker
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerPacket {
    /// Whether a face was detected this frame
    pub face_detected: bool,
    /// Face Mesh landmarks in normalized coordinates; empty when no face
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

/// Aggregated tracking data
#[derive(Debug, Clone, Default)]
pub struct TrackerData {
    /// Most recently parsed packet
    pub packet: Option<TrackerPacket>,
    /// Whether any data has been received
    pub has_data: bool,
}

impl TrackerData {
    /// Landmark frame for the analyzer: `None` before any packet has
    /// arrived, an empty slice when the tracker reported no face.
    pub fn frame(&self) -> Option<&[Landmark]> {
        let packet = self.packet.as_ref()?;
        if packet.face_detected {
            Some(&packet.landmarks)
        } else {
            Some(&[])
        }
    }
}

/// JSON-over-UDP landmark receiver
pub struct LandmarkReceiver {
    config: TrackingConfig,
    socket: Option<UdpSocket>,
    data: Arc<RwLock<TrackerData>>,
}

impl LandmarkReceiver {
    /// Create a new receiver (does not bind yet)
    pub fn new(config: &TrackingConfig) -> Self {
        Self {
            config: config.clone(),
            socket: None,
            data: Arc::new(RwLock::new(TrackerData::default())),
        }
    }

    /// Bind the UDP socket and start receiving
    pub fn start(&mut self) -> Result<(), BrushsenseError> {
        let addr = format!("{}:{}", self.config.listen_address, self.config.port);

        let socket = UdpSocket::bind(&addr).map_err(|e| {
            TrackingError::Receiver(format!("Failed to bind to {}: {}", addr, e))
        })?;

        socket.set_nonblocking(true).map_err(|e| {
            TrackingError::Receiver(format!("Failed to set non-blocking: {}", e))
        })?;

        socket
            .set_read_timeout(Some(Duration::from_millis(100)))
            .ok();

        tracing::info!("Landmark receiver listening on {}", addr);
        self.socket = Some(socket);

        Ok(())
    }

    /// Process incoming JSON packets (non-blocking)
    pub async fn process(&self) -> Result<Option<TrackerData>, BrushsenseError> {
        let socket = match &self.socket {
            Some(s) => s,
            None => return Ok(None),
        };

        let mut buf = [0u8; 65536];

        match socket.recv(&mut buf) {
            Ok(size) if size > 0 => {
                let packet: TrackerPacket = serde_json::from_slice(&buf[..size])
                    .map_err(|e| TrackingError::Parse(format!("JSON parse error: {}", e)))?;

                let mut data = self.data.write().await;
                data.packet = Some(packet);
                data.has_data = true;
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // No data available
            }
            Err(e) => {
                return Err(TrackingError::Receiver(format!("Receive error: {}", e)).into());
            }
        }

        Ok(Some(self.data.read().await.clone()))
    }

    /// Get the current tracking data
    pub async fn get_data(&self) -> TrackerData {
        self.data.read().await.clone()
    }

    /// Check if any data has been received
    pub async fn has_data(&self) -> bool {
        self.data.read().await.has_data
    }

    /// Stop the receiver
    pub fn stop(&mut self) {
        self.socket = None;
        tracing::info!("Landmark receiver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::landmarks::{LOWER_LIP_CENTER, UPPER_LIP_CENTER};

    fn sample_json() -> String {
        let mut landmarks = vec![serde_json::json!({"x": 0.5, "y": 0.5, "z": 0.0}); 478];
        landmarks[UPPER_LIP_CENTER] = serde_json::json!({"x": 0.5, "y": 0.47, "z": 0.0});
        landmarks[LOWER_LIP_CENTER] = serde_json::json!({"x": 0.5, "y": 0.53, "z": 0.0});

        serde_json::json!({
            "face_detected": true,
            "landmarks": landmarks,
        })
        .to_string()
    }

    #[test]
    fn test_parse_packet() {
        let packet: TrackerPacket = serde_json::from_str(&sample_json()).unwrap();
        assert!(packet.face_detected);
        assert_eq!(packet.landmarks.len(), 478);
        assert!((packet.landmarks[UPPER_LIP_CENTER].y - 0.47).abs() < 1e-6);
        assert!((packet.landmarks[LOWER_LIP_CENTER].y - 0.53).abs() < 1e-6);
    }

    #[test]
    fn test_parse_no_face() {
        let json = r#"{"face_detected":false}"#;
        let packet: TrackerPacket = serde_json::from_str(json).unwrap();
        assert!(!packet.face_detected);
        assert!(packet.landmarks.is_empty());
    }

    #[test]
    fn test_malformed_packet_is_error() {
        let result: Result<TrackerPacket, _> = serde_json::from_str(r#"{"landmarks": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_before_first_packet() {
        let data = TrackerData::default();
        assert!(data.frame().is_none());
    }

    #[test]
    fn test_frame_with_face() {
        let packet: TrackerPacket = serde_json::from_str(&sample_json()).unwrap();
        let data = TrackerData {
            packet: Some(packet),
            has_data: true,
        };

        let frame = data.frame().unwrap();
        assert_eq!(frame.len(), 478);
    }

    #[test]
    fn test_frame_without_face_is_empty() {
        let packet: TrackerPacket =
            serde_json::from_str(r#"{"face_detected":false,"landmarks":[]}"#).unwrap();
        let data = TrackerData {
            packet: Some(packet),
            has_data: true,
        };

        // No face maps to an empty frame, not to "nothing delivered"
        let frame = data.frame().unwrap();
        assert!(frame.is_empty());
    }
}
