//! Flicker animation engine
//!
//! Plays a [`FlickerScript`] over a channel selection, one token per step.
//! The engine never waits: the owner calls [`FlickerEngine::step`] whenever
//! its one-shot timer fires and re-arms the timer while the engine reports
//! [`FlickerProgress::Continue`]. Only one session can run at a time.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DimmerError;
use crate::bank::ChannelBank;
use crate::level::{ChannelSelection, Intensity};
use crate::script::{FlickerScript, ScriptCursor, ScriptToken};

/// Outcome of consuming one script token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerProgress {
    /// More tokens follow, schedule another step
    Continue,
    /// The script ended, the engine is idle again
    Complete,
    /// The token at `offset` could not be parsed, the engine is idle again
    Malformed { offset: usize },
}

impl FlickerProgress {
    pub const fn is_continue(self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// State of the in-flight animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlickerSession<'a> {
    cursor: ScriptCursor<'a>,
    targets: ChannelSelection,
}

impl FlickerSession<'_> {
    pub const fn targets(&self) -> &ChannelSelection {
        &self.targets
    }

    /// Byte offset of the next token to play
    pub const fn offset(&self) -> usize {
        self.cursor.offset()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum FlickerState<'a> {
    #[default]
    Idle,
    Running(FlickerSession<'a>),
}

/// Single-session flicker player
#[derive(Debug, Clone)]
pub struct FlickerEngine<'a> {
    script: FlickerScript<'a>,
    state: FlickerState<'a>,
}

impl<'a> FlickerEngine<'a> {
    pub const fn new(script: FlickerScript<'a>) -> Self {
        Self {
            script,
            state: FlickerState::Idle,
        }
    }

    pub const fn script(&self) -> FlickerScript<'a> {
        self.script
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, FlickerState::Running(_))
    }

    /// Current session, if one is running
    pub const fn session(&self) -> Option<&FlickerSession<'a>> {
        match &self.state {
            FlickerState::Running(session) => Some(session),
            FlickerState::Idle => None,
        }
    }

    /// Start playing the script from the beginning
    ///
    /// The first token is applied before this returns. Rejected while
    /// another session runs (that session is left untouched) and when the
    /// selection names no channel.
    pub fn start(
        &mut self,
        targets: ChannelSelection,
        bank: &mut ChannelBank,
    ) -> Result<FlickerProgress, DimmerError> {
        if self.is_running() {
            #[cfg(feature = "esp32-log")]
            println!("[FlickerEngine] flicker already active");
            return Err(DimmerError::ReentrantStart);
        }
        if targets.is_empty() {
            #[cfg(feature = "esp32-log")]
            println!("[FlickerEngine] no channel selected");
            return Err(DimmerError::MissingChannelSelection);
        }

        self.state = FlickerState::Running(FlickerSession {
            cursor: self.script.cursor(),
            targets,
        });
        Ok(self.step(bank))
    }

    /// Consume one token and apply it to the selected channels
    ///
    /// Out of range values are skipped without ending the session. Does
    /// nothing and reports [`FlickerProgress::Complete`] when idle.
    pub fn step(&mut self, bank: &mut ChannelBank) -> FlickerProgress {
        let FlickerState::Running(session) = &mut self.state else {
            return FlickerProgress::Complete;
        };

        let progress = match session.cursor.next_token() {
            ScriptToken::Value { value, more } => {
                match Intensity::try_from(value) {
                    Ok(intensity) => {
                        for channel in session.targets.iter() {
                            bank.set_intensity(channel, intensity);
                        }
                    }
                    Err(_err) => {
                        #[cfg(feature = "esp32-log")]
                        println!("[FlickerEngine] skipping token: {}", _err);
                    }
                }
                if more {
                    FlickerProgress::Continue
                } else {
                    FlickerProgress::Complete
                }
            }
            ScriptToken::Exhausted => FlickerProgress::Complete,
            ScriptToken::Malformed { offset } => FlickerProgress::Malformed { offset },
        };

        match progress {
            FlickerProgress::Continue => {}
            FlickerProgress::Complete => {
                #[cfg(feature = "esp32-log")]
                println!("[FlickerEngine] flicker sequence complete");
                self.state = FlickerState::Idle;
            }
            FlickerProgress::Malformed { offset: _offset } => {
                #[cfg(feature = "esp32-log")]
                println!("[FlickerEngine] could not parse value at index {}", _offset);
                self.state = FlickerState::Idle;
            }
        }
        progress
    }

    /// Abort the running session, keeping the values already applied
    ///
    /// Returns whether a session was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = FlickerState::Idle;
        was_running
    }
}
