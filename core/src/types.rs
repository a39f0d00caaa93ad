use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::ConfigError;

/// One constant-level run of a recorded capture: tone present or silent,
/// for `seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MorseSignal {
    pub on: bool,
    pub seconds: f64,
}

/// A single mark within a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Dit,
    Dah,
}

impl Element {
    /// Nominal length in time units.
    ///
    /// ITU-R M.1677-1 §2.1: a dash is equal to three dots.
    #[inline]
    pub fn units(self) -> u32 {
        match self {
            Element::Dit => 1,
            Element::Dah => 3,
        }
    }

    pub fn from_units(units: u32) -> Option<Self> {
        match units {
            1 => Some(Element::Dit),
            3 => Some(Element::Dah),
            _ => None,
        }
    }

    /// Printable dot/dash form.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Element::Dit => '.',
            Element::Dah => '-',
        }
    }
}

/// The five recognized (level, unit-count) interval categories.
///
/// Spacing and length per ITU-R M.1677-1 §2: a dash is three dots, the
/// space between signals of the same letter is one dot, between two
/// letters three dots, between two words seven dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Dit,
    Dah,
    ElementGap,
    LetterGap,
    WordGap,
}

impl SymbolKind {
    /// Classify an interval from the level it held and its rounded length
    /// in time units. Pairs outside the five valid categories are
    /// unrecognized and classify to `None`.
    pub fn classify(mark: bool, units: u32) -> Option<Self> {
        match (mark, units) {
            (true, 1) => Some(SymbolKind::Dit),
            (true, 3) => Some(SymbolKind::Dah),
            (false, 1) => Some(SymbolKind::ElementGap),
            (false, 3) => Some(SymbolKind::LetterGap),
            (false, 7) => Some(SymbolKind::WordGap),
            _ => None,
        }
    }

    /// The mark element for tone intervals, `None` for gaps.
    pub fn element(self) -> Option<Element> {
        match self {
            SymbolKind::Dit => Some(Element::Dit),
            SymbolKind::Dah => Some(Element::Dah),
            _ => None,
        }
    }
}

/// A classified interval between two consecutive edges, in sample
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedSymbol {
    pub start: u64,
    pub end: u64,
    pub kind: SymbolKind,
}

/// One measured inter-edge interval.
///
/// Every interval produces a measure whether or not it classifies;
/// `symbol` is present only for the five recognized categories.
#[derive(Debug, Clone, Copy)]
pub struct Measure {
    /// Sample position of the edge opening the interval.
    pub start: u64,
    /// Sample position of the edge closing it.
    pub end: u64,
    /// Interval length in seconds (samples when the clock is unknown).
    pub seconds: f64,
    /// Interval length in fractional time units.
    pub units: f64,
    /// Rounded unit count, at least 1.
    pub iunits: u32,
    /// Time-unit estimate in effect when the interval was measured.
    pub time_unit: f64,
    pub symbol: Option<ClassifiedSymbol>,
}

/// Symbol classifier output.
#[derive(Debug, Clone, Copy)]
pub enum SymbolEvent {
    Measure(Measure),
    /// Silence outlasted the timeout; any letter or word in progress
    /// downstream must terminate.
    Flush,
}

/// A resolved letter with its sample span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLetter {
    pub start: u64,
    pub end: u64,
    pub text: String,
}

/// Letter grouper output.
#[derive(Debug, Clone)]
pub enum LetterEvent {
    /// Forwarded unchanged from the classifier.
    Measure(Measure),
    Letter(DecodedLetter),
    Flush,
}

/// Annotation rows emitted by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum AnnotationKind {
    /// Raw interval duration in seconds.
    Time = 0,
    /// Interval duration as units times the tracked time unit.
    Units = 1,
    /// Reserved; never emitted.
    Symbol = 2,
    Letter = 3,
    Word = 4,
}

/// A (start, end, category, text) tuple for the host's annotation sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub start: u64,
    pub end: u64,
    pub kind: AnnotationKind,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorseDecodeParams {
    /// Nominal time-unit guess in seconds (in samples when the source has
    /// no clock rate).
    pub time_unit: f64,
    /// Adaptive correction weight per observed unit. Empirical constant;
    /// kept configurable for calibration against real captures.
    pub adapt_rate: f64,
}

impl Default for MorseDecodeParams {
    fn default() -> Self {
        Self {
            time_unit: 0.1,
            adapt_rate: 0.02,
        }
    }
}

impl MorseDecodeParams {
    /// Reject malformed configuration up front; nothing fails mid-stream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_unit.is_finite() && self.time_unit > 0.0) {
            return Err(ConfigError::TimeUnit {
                value: self.time_unit,
            });
        }
        if !(self.adapt_rate.is_finite() && self.adapt_rate > 0.0 && self.adapt_rate <= 1.0) {
            return Err(ConfigError::AdaptRate {
                value: self.adapt_rate,
            });
        }
        Ok(())
    }
}
