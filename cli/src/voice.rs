//! Voice call mode — explicit state machine for the speech-input toggle.
//!
//! DESIGN
//! ======
//! Replaces implicit restart-on-end recognition callbacks with one explicit
//! machine: idle → listening → processing, back to listening while the call
//! stays active, and back to idle on hang-up or recognizer failure. Speech
//! playback is tracked as a flag so user speech can interrupt the bot
//! mid-sentence.

/// Position of the speech-input toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceState {
    /// No call in progress.
    Idle,
    /// Capturing user speech.
    Listening,
    /// A transcript was submitted; waiting on the reply.
    Processing,
}

impl std::fmt::Display for VoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Processing => "processing",
        };
        f.write_str(name)
    }
}

/// External happenings driving the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceEvent {
    /// The user pressed the call toggle.
    Toggle,
    /// Interim speech was detected while the bot may still be talking.
    SpeechDetected,
    /// A final transcript was captured and submitted.
    FinalTranscript,
    /// The reply for the submitted transcript was delivered.
    ReplyDelivered,
    /// The recognizer failed; the call ends.
    RecognitionError,
}

/// One voice call session: toggle state plus the speech playback flag.
#[derive(Debug)]
pub struct VoiceSession {
    state: VoiceState,
    speaking: bool,
}

impl VoiceSession {
    #[must_use]
    pub fn new() -> Self {
        Self { state: VoiceState::Idle, speaking: false }
    }

    #[must_use]
    pub fn state(&self) -> VoiceState {
        self.state
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state == VoiceState::Listening
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.state == VoiceState::Processing
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Mark reply playback as started. Only meaningful during a call.
    pub fn start_speaking(&mut self) {
        if self.state != VoiceState::Idle {
            self.speaking = true;
        }
    }

    /// Apply one event and return the resulting state.
    pub fn apply(&mut self, event: VoiceEvent) -> VoiceState {
        self.state = match (self.state, event) {
            // Picking up the call begins capture; any leftover playback stops.
            (VoiceState::Idle, VoiceEvent::Toggle) => {
                self.speaking = false;
                VoiceState::Listening
            }
            // Hanging up or a recognizer failure ends the call and playback.
            (_, VoiceEvent::Toggle | VoiceEvent::RecognitionError) => {
                self.speaking = false;
                VoiceState::Idle
            }
            // User speech interrupts the bot but capture continues.
            (VoiceState::Listening, VoiceEvent::SpeechDetected) => {
                self.speaking = false;
                VoiceState::Listening
            }
            (VoiceState::Listening, VoiceEvent::FinalTranscript) => VoiceState::Processing,
            // Capture resumes while the call stays active.
            (VoiceState::Processing, VoiceEvent::ReplyDelivered) => VoiceState::Listening,
            (state, _) => state,
        };
        self.state
    }
}

impl Default for VoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "voice_test.rs"]
mod tests;
