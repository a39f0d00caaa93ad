use crate::alphabet;
use crate::classify::SymbolClassifier;
use crate::error::ConfigError;
use crate::source::WaveformSource;
use crate::types::{
    DecodedLetter, Element, LetterEvent, MorseDecodeParams, SymbolEvent, SymbolKind,
};

/// Groups classified symbols into letters.
///
/// Consecutive marks accumulate into a dit/dah sequence; any gap of three
/// or more units resolves it through the alphabet table, with a literal
/// dots-and-dashes fallback for sequences the table does not carry.
/// Upstream flushes resolve the pending letter and pass through.
pub struct LetterGrouper<S> {
    symbols: SymbolClassifier<S>,
    sequence: Vec<Element>,
    /// Span of the letter in progress; `start` is set by its first mark.
    start: Option<u64>,
    end: u64,
    pending: Option<LetterEvent>,
}

impl<S: WaveformSource> LetterGrouper<S> {
    pub fn new(source: S, params: &MorseDecodeParams) -> Result<Self, ConfigError> {
        Ok(Self {
            symbols: SymbolClassifier::new(source, params)?,
            sequence: Vec::new(),
            start: None,
            end: 0,
            pending: None,
        })
    }

    /// Resolve and clear the letter in progress, if any. An empty
    /// sequence yields nothing, so repeated gaps cannot produce empty
    /// letters.
    fn resolve(&mut self) -> Option<DecodedLetter> {
        let start = self.start.take()?;
        let text = alphabet::resolve(&self.sequence);
        self.sequence.clear();
        Some(DecodedLetter {
            start,
            end: self.end,
            text,
        })
    }
}

impl<S: WaveformSource> Iterator for LetterGrouper<S> {
    type Item = LetterEvent;

    fn next(&mut self) -> Option<LetterEvent> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }
        match self.symbols.next()? {
            SymbolEvent::Measure(measure) => {
                if let Some(symbol) = measure.symbol {
                    if let Some(element) = symbol.kind.element() {
                        if self.start.is_none() {
                            self.start = Some(symbol.start);
                        }
                        self.end = symbol.end;
                        self.sequence.push(element);
                    } else if matches!(symbol.kind, SymbolKind::LetterGap | SymbolKind::WordGap) {
                        // Letter boundary only, not a word flush.
                        if let Some(letter) = self.resolve() {
                            self.pending = Some(LetterEvent::Letter(letter));
                        }
                    }
                }
                Some(LetterEvent::Measure(measure))
            }
            SymbolEvent::Flush => match self.resolve() {
                Some(letter) => {
                    self.pending = Some(LetterEvent::Flush);
                    Some(LetterEvent::Letter(letter))
                }
                None => Some(LetterEvent::Flush),
            },
        }
    }
}
