// Streaming Morse code decoder
// Timed level transitions in, annotated symbols, letters and words out

pub mod alphabet;
pub mod classify;
pub mod decode;
pub mod error;
pub mod letters;
pub mod source;
pub mod types;

// Re-export main public API
pub use classify::SymbolClassifier;
pub use decode::MorseDecoder;
pub use error::ConfigError;
pub use letters::LetterGrouper;
pub use source::{SyntheticSource, Wait, WaveformSource};
pub use types::*;

/// Decode a recorded capture to its full annotation stream.
pub fn decode_morse_annotations(
    signals: &[MorseSignal],
    sample_rate: f64,
    params: &MorseDecodeParams,
) -> Result<Vec<Annotation>, ConfigError> {
    let source = SyntheticSource::with_rate(signals, sample_rate);
    Ok(MorseDecoder::new(source, params)?.collect())
}

/// Decode a recorded capture to text, words joined by single spaces.
pub fn decode_morse_text(
    signals: &[MorseSignal],
    sample_rate: f64,
    params: &MorseDecodeParams,
) -> Result<String, ConfigError> {
    let annotations = decode_morse_annotations(signals, sample_rate, params)?;
    let words: Vec<String> = annotations
        .into_iter()
        .filter(|a| a.kind == AnnotationKind::Word)
        .map(|a| a.text)
        .collect();
    Ok(words.join(" "))
}
