use crate::error::{Result, VoxpipeError};

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real Whisper vs mock).
pub trait Transcriber: Send + Sync {
    /// Transcribe one utterance to text.
    ///
    /// # Arguments
    /// * `audio` - Normalized f32 samples in [-1, 1] at 16kHz mono
    ///
    /// # Returns
    /// Decoded segment texts joined with single spaces and trimmed.
    /// An empty string means the model decoded nothing.
    fn transcribe(&self, audio: &[f32]) -> Result<String>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the transcriber is ready
    fn is_ready(&self) -> bool;
}

/// Mock transcriber for testing.
///
/// Returns scripted responses in order, falling back to a fixed response
/// (or failure) once the script is exhausted.
#[derive(Debug)]
pub struct MockTranscriber {
    model_name: String,
    responses: std::sync::Mutex<Vec<ScriptedCall>>,
    fallback: ScriptedCall,
}

#[derive(Debug, Clone)]
enum ScriptedCall {
    Text(String),
    Fail(String),
}

impl MockTranscriber {
    /// Create a mock that always returns the same text.
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            responses: std::sync::Mutex::new(Vec::new()),
            fallback: ScriptedCall::Text("mock transcription".to_string()),
        }
    }

    /// Set the fallback response returned when the script is exhausted.
    pub fn with_response(mut self, response: &str) -> Self {
        self.fallback = ScriptedCall::Text(response.to_string());
        self
    }

    /// Make every unscripted call fail.
    pub fn with_failure(mut self) -> Self {
        self.fallback = ScriptedCall::Fail("mock transcription failure".to_string());
        self
    }

    /// Queue a scripted successful response for the next call.
    pub fn then_text(self, text: &str) -> Self {
        self.responses
            .lock()
            .expect("mock script lock")
            .push(ScriptedCall::Text(text.to_string()));
        self
    }

    /// Queue a scripted failure for the next call.
    pub fn then_fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .expect("mock script lock")
            .push(ScriptedCall::Fail(message.to_string()));
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[f32]) -> Result<String> {
        let mut script = self.responses.lock().expect("mock script lock");
        let call = if script.is_empty() {
            self.fallback.clone()
        } else {
            script.remove(0)
        };
        match call {
            ScriptedCall::Text(text) => Ok(text),
            ScriptedCall::Fail(message) => Err(VoxpipeError::Transcription { message }),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        !matches!(self.fallback, ScriptedCall::Fail(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_returns_response() {
        let transcriber = MockTranscriber::new("test-model").with_response("hello there");
        let audio = vec![0.0f32; 1000];
        assert_eq!(transcriber.transcribe(&audio).unwrap(), "hello there");
    }

    #[test]
    fn test_mock_returns_error_when_configured() {
        let transcriber = MockTranscriber::new("test-model").with_failure();
        let result = transcriber.transcribe(&[0.0; 100]);
        match result {
            Err(VoxpipeError::Transcription { message }) => {
                assert_eq!(message, "mock transcription failure");
            }
            other => panic!("expected Transcription error, got {other:?}"),
        }
    }

    #[test]
    fn test_mock_scripted_calls_in_order() {
        let transcriber = MockTranscriber::new("test-model")
            .then_text("first")
            .then_fail("boom")
            .then_text("third")
            .with_response("rest");

        assert_eq!(transcriber.transcribe(&[]).unwrap(), "first");
        assert!(transcriber.transcribe(&[]).is_err());
        assert_eq!(transcriber.transcribe(&[]).unwrap(), "third");
        assert_eq!(transcriber.transcribe(&[]).unwrap(), "rest");
        assert_eq!(transcriber.transcribe(&[]).unwrap(), "rest");
    }

    #[test]
    fn test_mock_model_name() {
        let transcriber = MockTranscriber::new("whisper-small");
        assert_eq!(transcriber.model_name(), "whisper-small");
    }

    #[test]
    fn test_mock_is_ready() {
        assert!(MockTranscriber::new("m").is_ready());
        assert!(!MockTranscriber::new("m").with_failure().is_ready());
    }

    #[test]
    fn test_trait_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new("test-model").with_response("boxed"));
        assert_eq!(transcriber.transcribe(&[0.0; 10]).unwrap(), "boxed");
    }

    #[test]
    fn test_mock_can_return_empty_text() {
        let transcriber = MockTranscriber::new("m").with_response("");
        assert_eq!(transcriber.transcribe(&[0.0; 10]).unwrap(), "");
    }
}
