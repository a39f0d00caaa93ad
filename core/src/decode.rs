use std::collections::VecDeque;

use crate::error::ConfigError;
use crate::letters::LetterGrouper;
use crate::source::WaveformSource;
use crate::types::{Annotation, AnnotationKind, LetterEvent, Measure, MorseDecodeParams};

/// Top-level driver: annotates measured intervals and letters, and groups
/// letters into words.
///
/// The decoder is an iterator over [`Annotation`]s in strict causal order
/// of increasing sample position; the host cancels by ceasing to pull.
/// Every measured interval yields a raw-duration and a unit-duration row.
/// Letters are annotated as they arrive and accumulate into the word
/// buffer, which a flush annotates over its full span and clears.
pub struct MorseDecoder<S> {
    letters: LetterGrouper<S>,
    word: String,
    /// Span of the word in progress; `start` is set by its first letter.
    start: Option<u64>,
    end: u64,
    queue: VecDeque<Annotation>,
}

impl<S: WaveformSource> MorseDecoder<S> {
    pub fn new(source: S, params: &MorseDecodeParams) -> Result<Self, ConfigError> {
        Ok(Self {
            letters: LetterGrouper::new(source, params)?,
            word: String::new(),
            start: None,
            end: 0,
            queue: VecDeque::new(),
        })
    }

    fn annotate_measure(&mut self, measure: &Measure) {
        self.queue.push_back(Annotation {
            start: measure.start,
            end: measure.end,
            kind: AnnotationKind::Time,
            text: format!("{:.3}", measure.seconds),
        });
        self.queue.push_back(Annotation {
            start: measure.start,
            end: measure.end,
            kind: AnnotationKind::Units,
            text: format!("{:.1}*{:.3}", measure.units, measure.time_unit),
        });
    }
}

impl<S: WaveformSource> Iterator for MorseDecoder<S> {
    type Item = Annotation;

    fn next(&mut self) -> Option<Annotation> {
        loop {
            if let Some(annotation) = self.queue.pop_front() {
                return Some(annotation);
            }
            match self.letters.next()? {
                LetterEvent::Measure(measure) => self.annotate_measure(&measure),
                LetterEvent::Letter(letter) => {
                    if self.start.is_none() {
                        self.start = Some(letter.start);
                    }
                    self.end = letter.end;
                    self.word.push_str(&letter.text);
                    self.queue.push_back(Annotation {
                        start: letter.start,
                        end: letter.end,
                        kind: AnnotationKind::Letter,
                        text: letter.text,
                    });
                }
                LetterEvent::Flush => {
                    // A flush with nothing accumulated is absorbed.
                    if let Some(start) = self.start.take() {
                        let word = std::mem::take(&mut self.word);
                        self.queue.push_back(Annotation {
                            start,
                            end: self.end,
                            kind: AnnotationKind::Word,
                            text: word,
                        });
                    }
                }
            }
        }
    }
}
