use crate::error::ConfigError;
use crate::source::{Wait, WaveformSource};
use crate::types::{ClassifiedSymbol, Measure, MorseDecodeParams, SymbolEvent, SymbolKind};

// The inter-word gap is seven units; five units of silence already
// identifies a word boundary without waiting indefinitely for an edge.
const TIMEOUT_UNITS: f64 = 5.0;

/// Turns raw level transitions into classified symbols.
///
/// Pulls edges from the source, measures inter-edge durations, quantizes
/// each against an adaptively tracked time unit and yields one
/// [`SymbolEvent`] per interval or timeout. Lazy, unbounded and
/// non-restartable; the consumer cancels by ceasing to pull.
pub struct SymbolClassifier<S> {
    source: S,
    sample_rate: f64,
    time_unit: f64,
    adapt_rate: f64,
    /// Position of the last consumed edge; `None` until the first rising
    /// edge. Does not advance on timeouts.
    reference: Option<u64>,
    /// Level held since the reference edge.
    level: bool,
    done: bool,
}

impl<S: WaveformSource> SymbolClassifier<S> {
    pub fn new(source: S, params: &MorseDecodeParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let sample_rate = match source.sample_rate() {
            Some(rate) if !(rate.is_finite() && rate > 0.0) => {
                return Err(ConfigError::SampleRate { value: rate });
            }
            Some(rate) => rate,
            // No clock metadata: the configured time unit is in samples.
            None => 1.0,
        };
        Ok(Self {
            source,
            sample_rate,
            time_unit: params.time_unit,
            adapt_rate: params.adapt_rate,
            reference: None,
            level: false,
            done: false,
        })
    }

    /// Current time-unit estimate in seconds (samples when unclocked).
    pub fn time_unit(&self) -> f64 {
        self.time_unit
    }

    fn timeout_samples(&self) -> u64 {
        ((TIMEOUT_UNITS * self.time_unit * self.sample_rate) as u64).max(1)
    }
}

impl<S: WaveformSource> Iterator for SymbolClassifier<S> {
    type Item = SymbolEvent;

    fn next(&mut self) -> Option<SymbolEvent> {
        if self.done {
            return None;
        }
        loop {
            let reference = match self.reference {
                Some(reference) => reference,
                None => {
                    // Nothing is measured before the first rising edge.
                    match self.source.wait(None) {
                        Wait::Edge {
                            position,
                            level: true,
                        } => {
                            self.reference = Some(position);
                            self.level = true;
                        }
                        Wait::Edge { .. } | Wait::Timeout { .. } => {}
                        Wait::Exhausted => {
                            self.done = true;
                            return None;
                        }
                    }
                    continue;
                }
            };

            match self.source.wait(Some(self.timeout_samples())) {
                Wait::Timeout { .. } => {
                    // The reference point stays put; silence keeps
                    // accumulating until the next real edge.
                    return Some(SymbolEvent::Flush);
                }
                Wait::Exhausted => {
                    // Finite capture: one last flush drains anything still
                    // pending downstream.
                    self.done = true;
                    return Some(SymbolEvent::Flush);
                }
                Wait::Edge { position, level } => {
                    let held = self.level;
                    let dt = (position - reference) as f64 / self.sample_rate;
                    let units = dt / self.time_unit;
                    let iunits = units.round().max(1.0) as u32;

                    let symbol = SymbolKind::classify(held, iunits).map(|kind| ClassifiedSymbol {
                        start: reference,
                        end: position,
                        kind,
                    });
                    let measure = Measure {
                        start: reference,
                        end: position,
                        seconds: dt,
                        units,
                        iunits,
                        time_unit: self.time_unit,
                        symbol,
                    };

                    self.reference = Some(position);
                    self.level = level;

                    // Leaky integrator: longer intervals carry more
                    // evidence, with the weight capped so the estimate
                    // never steps past the observation.
                    let observed = dt / iunits as f64;
                    let weight = (self.adapt_rate * iunits as f64).min(1.0);
                    self.time_unit += (observed - self.time_unit) * weight;

                    return Some(SymbolEvent::Measure(measure));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SyntheticSource;
    use crate::types::MorseSignal;

    fn run(on: bool, seconds: f64) -> MorseSignal {
        MorseSignal { on, seconds }
    }

    fn classifier(signals: &[MorseSignal], time_unit: f64) -> SymbolClassifier<SyntheticSource> {
        let params = MorseDecodeParams {
            time_unit,
            ..Default::default()
        };
        SymbolClassifier::new(SyntheticSource::unclocked(signals), &params).unwrap()
    }

    fn kinds(events: &[SymbolEvent]) -> Vec<Option<SymbolKind>> {
        events
            .iter()
            .filter_map(|event| match event {
                SymbolEvent::Measure(m) => Some(m.symbol.map(|s| s.kind)),
                SymbolEvent::Flush => None,
            })
            .collect()
    }

    #[test]
    fn test_clean_ratios_classify_exactly() {
        // dit, gap, dah, letter gap, dit - trailing word gap times out
        let signals = [
            run(true, 10.0),
            run(false, 10.0),
            run(true, 30.0),
            run(false, 30.0),
            run(true, 10.0),
            run(false, 70.0),
        ];
        let events: Vec<_> = classifier(&signals, 10.0).collect();
        assert_eq!(
            kinds(&events),
            vec![
                Some(SymbolKind::Dit),
                Some(SymbolKind::ElementGap),
                Some(SymbolKind::Dah),
                Some(SymbolKind::LetterGap),
                Some(SymbolKind::Dit),
            ]
        );
        // the 70-sample silence is longer than the 50-sample timeout
        assert!(matches!(events.last(), Some(SymbolEvent::Flush)));
    }

    #[test]
    fn test_measures_carry_span_and_units() {
        let signals = [run(true, 30.0), run(false, 10.0), run(true, 10.0)];
        let mut classifier = classifier(&signals, 10.0);
        match classifier.next() {
            Some(SymbolEvent::Measure(m)) => {
                assert_eq!((m.start, m.end), (0, 30));
                assert_eq!(m.seconds, 30.0);
                assert_eq!(m.units, 3.0);
                assert_eq!(m.iunits, 3);
                assert_eq!(m.time_unit, 10.0);
            }
            other => panic!("expected a measure, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_interval_still_measured() {
        // a two-unit mark matches no category but is measured anyway
        let signals = [run(true, 20.0), run(false, 10.0), run(true, 10.0)];
        let events: Vec<_> = classifier(&signals, 10.0).collect();
        match &events[0] {
            SymbolEvent::Measure(m) => {
                assert_eq!(m.iunits, 2);
                assert!(m.symbol.is_none());
            }
            other => panic!("expected a measure, got {other:?}"),
        }
    }

    #[test]
    fn test_glitch_rounds_up_to_one_unit() {
        let signals = [run(true, 2.0), run(false, 10.0), run(true, 10.0)];
        let events: Vec<_> = classifier(&signals, 10.0).collect();
        match &events[0] {
            SymbolEvent::Measure(m) => {
                assert_eq!(m.iunits, 1);
                assert_eq!(m.symbol.map(|s| s.kind), Some(SymbolKind::Dit));
            }
            other => panic!("expected a measure, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_does_not_advance_reference() {
        // silence of six units: a flush fires at five, then the edge
        // measures the whole interval from the last real edge
        let signals = [
            run(true, 10.0),
            run(false, 60.0),
            run(true, 10.0),
            run(false, 10.0),
        ];
        let events: Vec<_> = classifier(&signals, 10.0).collect();
        assert!(matches!(events[1], SymbolEvent::Flush));
        match &events[2] {
            SymbolEvent::Measure(m) => {
                assert_eq!((m.start, m.end), (10, 70));
                assert_eq!(m.iunits, 6);
                assert!(m.symbol.is_none());
            }
            other => panic!("expected a measure, got {other:?}"),
        }
    }

    #[test]
    fn test_five_unit_silence_is_timeout_not_symbol() {
        let signals = [
            run(true, 10.0),
            run(false, 50.0),
            run(true, 10.0),
            run(false, 10.0),
        ];
        let events: Vec<_> = classifier(&signals, 10.0).collect();
        assert!(matches!(events[1], SymbolEvent::Flush));
        match &events[2] {
            SymbolEvent::Measure(m) => {
                assert_eq!(m.iunits, 5);
                assert!(m.symbol.is_none(), "(0,5) must never classify");
            }
            other => panic!("expected a measure, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_silence_and_falling_edge_ignored() {
        let signals = [run(false, 100.0), run(true, 10.0), run(false, 10.0)];
        let events: Vec<_> = classifier(&signals, 10.0).collect();
        // first event is the dit measured from the first rising edge
        match &events[0] {
            SymbolEvent::Measure(m) => {
                assert_eq!((m.start, m.end), (100, 110));
                assert_eq!(m.symbol.map(|s| s.kind), Some(SymbolKind::Dit));
            }
            other => panic!("expected a measure, got {other:?}"),
        }
    }

    #[test]
    fn test_silence_only_capture_yields_nothing() {
        let events: Vec<_> = classifier(&[run(false, 500.0)], 10.0).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn test_adaptation_converges_toward_sender_speed() {
        // sender keys five percent slow against the configured guess
        let mut signals = Vec::new();
        for _ in 0..50 {
            signals.push(run(true, 0.105));
            signals.push(run(false, 0.105));
        }
        let params = MorseDecodeParams::default(); // guess 0.1
        let mut classifier =
            SymbolClassifier::new(SyntheticSource::with_rate(&signals, 1000.0), &params).unwrap();
        let mut dits = 0;
        for event in &mut classifier {
            if let SymbolEvent::Measure(m) = event {
                // classification stays stable throughout the drift
                assert_eq!(m.iunits, 1);
                dits += 1;
            }
        }
        assert!(dits >= 99);
        let tracked = classifier.time_unit();
        assert!(
            (0.103..0.1051).contains(&tracked),
            "tracker did not converge: {tracked}"
        );
    }

    #[test]
    fn test_adaptation_never_overshoots_on_long_intervals() {
        // a 39.5-unit silence carries raw weight 4.0 at this rate, which
        // uncapped would fling the estimate well past the observation
        let signals = [
            run(true, 10.0),
            run(false, 395.0),
            run(true, 10.0),
            run(false, 10.0),
        ];
        let params = MorseDecodeParams {
            time_unit: 10.0,
            adapt_rate: 0.1,
        };
        let mut classifier =
            SymbolClassifier::new(SyntheticSource::unclocked(&signals), &params).unwrap();
        for _ in &mut classifier {}
        let tracked = classifier.time_unit();
        // observed unit for that silence is 395/40 = 9.875; the estimate
        // may land on it but never below
        assert!(tracked >= 9.875 - 1e-9, "estimate overshot: {tracked}");
        assert!(tracked <= 10.0, "estimate moved the wrong way: {tracked}");
    }

    #[test]
    fn test_rejects_invalid_sample_rate() {
        let params = MorseDecodeParams::default();
        let source = SyntheticSource::with_rate(&[run(true, 0.1)], 0.0);
        assert!(matches!(
            SymbolClassifier::new(source, &params),
            Err(ConfigError::SampleRate { .. })
        ));
    }
}
