// Waveform source abstraction - the decoder pulls level transitions on
// demand and never owns a buffer of edges
use crate::types::MorseSignal;

/// Outcome of waiting on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// A level transition occurred; `level` is the new level.
    Edge { position: u64, level: bool },
    /// The requested timeout elapsed with no transition.
    Timeout { position: u64 },
    /// The channel will never transition again (capture ended).
    Exhausted,
}

/// A single logic channel delivering level transitions on demand.
///
/// This is the boundary to the host that acquires the waveform; the
/// decoder only ever blocks here.
pub trait WaveformSource {
    /// Sample clock rate in Hz, when known. Unknown means durations are
    /// configured and reported directly in samples.
    fn sample_rate(&self) -> Option<f64>;

    /// Block until the next level transition, or until `timeout` samples
    /// elapse, whichever comes first. `None` waits indefinitely.
    fn wait(&mut self, timeout: Option<u64>) -> Wait;
}

/// Replays a recorded run-length capture as a [`WaveformSource`].
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    edges: Vec<(u64, bool)>,
    next_edge: usize,
    position: u64,
    length: u64,
    sample_rate: Option<f64>,
}

impl SyntheticSource {
    /// Capture with a known sample clock; `seconds` fields are scaled by
    /// `rate` to sample positions.
    pub fn with_rate(signals: &[MorseSignal], rate: f64) -> Self {
        Self::build(signals, rate, Some(rate))
    }

    /// Capture without clock metadata; `seconds` fields are read directly
    /// as sample counts.
    pub fn unclocked(signals: &[MorseSignal]) -> Self {
        Self::build(signals, 1.0, None)
    }

    fn build(signals: &[MorseSignal], scale: f64, sample_rate: Option<f64>) -> Self {
        let mut edges = Vec::new();
        let mut level = false;
        let mut t = 0.0;
        for run in signals {
            if run.on != level {
                edges.push(((t * scale).round() as u64, run.on));
                level = run.on;
            }
            t += run.seconds;
        }
        Self {
            edges,
            next_edge: 0,
            position: 0,
            length: (t * scale).round() as u64,
            sample_rate,
        }
    }
}

impl WaveformSource for SyntheticSource {
    fn sample_rate(&self) -> Option<f64> {
        self.sample_rate
    }

    fn wait(&mut self, timeout: Option<u64>) -> Wait {
        let edge = self.edges.get(self.next_edge).copied();
        match (edge, timeout) {
            // A transition exactly on the boundary loses to the timeout:
            // a five-unit silence always resolves via the timeout path.
            (Some((at, _)), Some(t)) if at >= self.position + t => {
                self.position += t;
                Wait::Timeout {
                    position: self.position,
                }
            }
            (Some((at, level)), _) => {
                self.next_edge += 1;
                self.position = at;
                Wait::Edge {
                    position: at,
                    level,
                }
            }
            (None, Some(t)) if self.position + t <= self.length => {
                self.position += t;
                Wait::Timeout {
                    position: self.position,
                }
            }
            (None, _) => Wait::Exhausted,
        }
    }
}
