// Background music: the active track and its play/pause state.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{check_extension, file_size, MediaError};

/// Audio file extensions accepted as background music.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "mpeg", "wav", "ogg", "mp4", "m4a"];

/// A loaded music file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// File name shown in the UI.
    pub title: String,
}

/// Device-facing side of playback.
pub trait AudioOutput: Send {
    fn load(&mut self, track: &Track) -> Result<(), MediaError>;
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    /// Seek back to the start of the loaded track.
    fn rewind(&mut self);
    /// Whether calls reach a real sound device.
    fn is_audible(&self) -> bool {
        true
    }
}

/// Output used when no sound device is attached. Every call succeeds and is
/// only logged, so the draw flow behaves the same with or without speakers.
#[derive(Debug, Default)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn load(&mut self, track: &Track) -> Result<(), MediaError> {
        debug!("silent output: load {}", track.path.display());
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        debug!("silent output: play");
        Ok(())
    }

    fn pause(&mut self) {
        debug!("silent output: pause");
    }

    fn rewind(&mut self) {
        debug!("silent output: rewind");
    }

    fn is_audible(&self) -> bool {
        false
    }
}

/// Looping background track controller.
pub struct Playback {
    output: Box<dyn AudioOutput>,
    track: Option<Track>,
    playing: bool,
}

impl Playback {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Playback {
            output,
            track: None,
            playing: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentOutput))
    }

    /// Replace the active track.
    ///
    /// The current track is paused first. On error the previous track stays
    /// loaded (but paused).
    pub fn set_track(&mut self, path: &Path) -> Result<&Track, MediaError> {
        check_extension(path, "audio", AUDIO_EXTENSIONS)?;
        file_size(path)?;

        self.pause();

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let track = Track {
            path: path.to_path_buf(),
            title,
        };
        self.output.load(&track)?;
        info!("Background music set to {}", track.path.display());
        let stored: &Track = self.track.insert(track);
        Ok(stored)
    }

    /// Start playback for a draw round. Does nothing without a track, and a
    /// device failure is logged rather than returned.
    pub fn begin(&mut self) {
        if self.track.is_none() {
            return;
        }
        match self.output.play() {
            Ok(()) => self.playing = true,
            Err(e) => warn!("Auto-play failed: {}", e),
        }
    }

    pub fn pause(&mut self) {
        self.output.pause();
        self.playing = false;
    }

    /// Pause and rewind to the beginning.
    pub fn stop(&mut self) {
        self.pause();
        self.output.rewind();
    }

    /// Flip between playing and paused. Returns the new playing state.
    pub fn toggle(&mut self) -> Result<bool, MediaError> {
        if self.track.is_none() {
            return Err(MediaError::NoTrack);
        }
        if self.playing {
            self.pause();
        } else {
            self.output.play()?;
            self.playing = true;
        }
        Ok(self.playing)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_audible(&self) -> bool {
        self.output.is_audible()
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }
}

impl std::fmt::Debug for Playback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playback")
            .field("track", &self.track)
            .field("playing", &self.playing)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
