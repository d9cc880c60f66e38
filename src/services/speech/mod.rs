// Speech capture: a toggle-driven recording session feeding a streaming
// speech-recognition engine and publishing a running best transcription.

pub mod http;

pub use http::HttpRecognizer;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::core::errors::SpeechResult;
use crate::core::types::LanguageTag;

/// Capture session state. There is no paused state: a single toggle
/// action flips between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
}

/// A live recognition stream.
///
/// Audio buffers flow in through `audio`; the engine publishes its current
/// best transcription through `transcripts`. Dropping the audio sender ends
/// the stream, though an already-in-flight recognition result may still be
/// published once while the engine drains.
pub struct RecognitionStream {
    pub audio: mpsc::Sender<Vec<i16>>,
    pub transcripts: watch::Receiver<String>,
}

/// Streaming speech-recognition seam, configured per-capture with the
/// user-selected input language.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn start(&self, language: &LanguageTag) -> SpeechResult<RecognitionStream>;
}

/// Toggle-driven capture session: `Idle -> Recording -> Idle`.
///
/// Starting while recording is impossible by construction; the toggle
/// stops instead. Stopping closes the audio channel, so no feed remains
/// installed between captures.
pub struct SpeechCapture {
    recognizer: std::sync::Arc<dyn SpeechRecognizer>,
    audio: Option<mpsc::Sender<Vec<i16>>>,
    transcripts: Option<watch::Receiver<String>>,
}

impl SpeechCapture {
    pub fn new(recognizer: std::sync::Arc<dyn SpeechRecognizer>) -> Self {
        Self {
            recognizer,
            audio: None,
            transcripts: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.audio.is_some() {
            CaptureState::Recording
        } else {
            CaptureState::Idle
        }
    }

    /// Flip the capture state, returning the state entered.
    ///
    /// Starting discards the previous transcript (the display starts
    /// fresh); stopping keeps the transcript receiver so a late in-flight
    /// result still lands.
    pub async fn toggle(&mut self, language: &LanguageTag) -> SpeechResult<CaptureState> {
        match self.audio.take() {
            Some(_feed) => {
                debug!("capture stopped");
                Ok(CaptureState::Idle)
            }
            None => {
                let stream = self.recognizer.start(language).await?;
                self.audio = Some(stream.audio);
                self.transcripts = Some(stream.transcripts);
                debug!(%language, "capture started");
                Ok(CaptureState::Recording)
            }
        }
    }

    /// Forward a captured audio buffer to the engine. Buffers arriving
    /// while idle are dropped.
    pub fn push_audio(&self, samples: &[i16]) {
        if let Some(audio) = &self.audio {
            if audio.try_send(samples.to_vec()).is_err() {
                debug!("audio buffer dropped; recognizer not keeping up");
            }
        }
    }

    /// Current best transcription: live while recording, last published
    /// value once stopped.
    pub fn transcript(&self) -> String {
        self.transcripts
            .as_ref()
            .map(|rx| rx.borrow().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct StubRecognizer {
        taps: Mutex<Vec<mpsc::Receiver<Vec<i16>>>>,
        publishers: Mutex<Vec<watch::Sender<String>>>,
    }

    impl StubRecognizer {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                taps: Mutex::new(Vec::new()),
                publishers: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SpeechRecognizer for StubRecognizer {
        async fn start(&self, _language: &LanguageTag) -> SpeechResult<RecognitionStream> {
            let (audio_tx, audio_rx) = mpsc::channel(8);
            let (text_tx, text_rx) = watch::channel(String::new());
            self.taps.lock().unwrap().push(audio_rx);
            self.publishers.lock().unwrap().push(text_tx);
            Ok(RecognitionStream {
                audio: audio_tx,
                transcripts: text_rx,
            })
        }
    }

    #[tokio::test]
    async fn double_toggle_cycles_through_states() {
        let recognizer = StubRecognizer::new();
        let mut capture = SpeechCapture::new(recognizer.clone());
        let lang = LanguageTag::new("en");

        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(capture.toggle(&lang).await.unwrap(), CaptureState::Recording);
        assert_eq!(capture.toggle(&lang).await.unwrap(), CaptureState::Idle);
        assert_eq!(capture.toggle(&lang).await.unwrap(), CaptureState::Recording);
        assert_eq!(capture.toggle(&lang).await.unwrap(), CaptureState::Idle);
        assert_eq!(capture.state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn stopping_removes_the_audio_tap() {
        let recognizer = StubRecognizer::new();
        let mut capture = SpeechCapture::new(recognizer.clone());
        let lang = LanguageTag::new("en");

        capture.toggle(&lang).await.unwrap();
        capture.push_audio(&[1, 2, 3]);
        capture.toggle(&lang).await.unwrap();

        let mut taps = recognizer.taps.lock().unwrap();
        let tap = &mut taps[0];
        // buffered audio drains, then the closed channel is observable
        assert_eq!(tap.try_recv().unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            tap.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));

        // pushing while idle installs nothing
        capture.push_audio(&[4, 5, 6]);
        assert!(tap.try_recv().is_err());
    }

    #[tokio::test]
    async fn in_flight_result_lands_after_stop() {
        let recognizer = StubRecognizer::new();
        let mut capture = SpeechCapture::new(recognizer.clone());
        let lang = LanguageTag::new("en");

        capture.toggle(&lang).await.unwrap();
        recognizer.publishers.lock().unwrap()[0]
            .send("say something".to_string())
            .unwrap();
        capture.toggle(&lang).await.unwrap();

        // a recognition callback that was mid-flight at stop time
        recognizer.publishers.lock().unwrap()[0]
            .send("say something, I'm listening".to_string())
            .unwrap();

        assert_eq!(capture.transcript(), "say something, I'm listening");
    }

    #[tokio::test]
    async fn restarting_clears_the_previous_transcript() {
        let recognizer = StubRecognizer::new();
        let mut capture = SpeechCapture::new(recognizer.clone());
        let lang = LanguageTag::new("en");

        capture.toggle(&lang).await.unwrap();
        recognizer.publishers.lock().unwrap()[0]
            .send("first take".to_string())
            .unwrap();
        capture.toggle(&lang).await.unwrap();
        capture.toggle(&lang).await.unwrap();

        assert_eq!(capture.transcript(), "");
    }
}
