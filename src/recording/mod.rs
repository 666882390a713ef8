// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Recording system.
//!
//! This module provides:
//! - Timestamped capture of live notes
//! - The finished, immutable recording handed to playback

pub mod capture;

pub use capture::{Note, Recording, RecordingSession, RecordingState};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::SystemClock;

    #[test]
    fn test_session_creation() {
        let session = RecordingSession::new(SystemClock::new());
        assert!(!session.is_active());
        assert_eq!(session.pending_len(), 0);
    }

    #[test]
    fn test_empty_recording() {
        let recording = Recording::default();
        assert!(recording.is_empty());
        assert_eq!(recording.length_ms(), 0);
        assert_eq!(recording.name(), None);
    }
}
