// International Morse alphabet - bidirectional code/text table
// Transcribed from Recommendation ITU-R M.1677-1 (10/2009):
// https://www.itu.int/dms_pubrec/itu-r/rec/m/R-REC-M.1677-1-200910-I!!PDF-E.pdf
use crate::types::Element;

pub type Code = &'static [Element];

const DIT: Element = Element::Dit;
const DAH: Element = Element::Dah;

static ALPHABET: &[(Code, &str)] = &[
    // 1.1.1 Letters
    (&[DIT, DAH], "a"),
    (&[DAH, DIT, DIT, DIT], "b"),
    (&[DAH, DIT, DAH, DIT], "c"),
    (&[DAH, DIT, DIT], "d"),
    (&[DIT], "e"),
    (&[DIT, DIT, DAH, DIT, DIT], "é"), // "accented"
    (&[DIT, DIT, DAH, DIT], "f"),
    (&[DAH, DAH, DIT], "g"),
    (&[DIT, DIT, DIT, DIT], "h"),
    (&[DIT, DIT], "i"),
    (&[DIT, DAH, DAH, DAH], "j"),
    (&[DAH, DIT, DAH], "k"),
    (&[DIT, DAH, DIT, DIT], "l"),
    (&[DAH, DAH], "m"),
    (&[DAH, DIT], "n"),
    (&[DAH, DAH, DAH], "o"),
    (&[DIT, DAH, DAH, DIT], "p"),
    (&[DAH, DAH, DIT, DAH], "q"),
    (&[DIT, DAH, DIT], "r"),
    (&[DIT, DIT, DIT], "s"),
    (&[DAH], "t"),
    (&[DIT, DIT, DAH], "u"),
    (&[DIT, DIT, DIT, DAH], "v"),
    (&[DIT, DAH, DAH], "w"),
    (&[DAH, DIT, DIT, DAH], "x"),
    (&[DAH, DIT, DAH, DAH], "y"),
    (&[DAH, DAH, DIT, DIT], "z"),
    // 1.1.2 Figures
    (&[DIT, DAH, DAH, DAH, DAH], "1"),
    (&[DIT, DIT, DAH, DAH, DAH], "2"),
    (&[DIT, DIT, DIT, DAH, DAH], "3"),
    (&[DIT, DIT, DIT, DIT, DAH], "4"),
    (&[DIT, DIT, DIT, DIT, DIT], "5"),
    (&[DAH, DIT, DIT, DIT, DIT], "6"),
    (&[DAH, DAH, DIT, DIT, DIT], "7"),
    (&[DAH, DAH, DAH, DIT, DIT], "8"),
    (&[DAH, DAH, DAH, DAH, DIT], "9"),
    (&[DAH, DAH, DAH, DAH, DAH], "0"),
    // 1.1.3 Punctuation marks and miscellaneous signs
    (&[DIT, DAH, DIT, DAH, DIT, DAH], "."),
    (&[DAH, DAH, DIT, DIT, DAH, DAH], ","),
    (&[DAH, DAH, DAH, DIT, DIT, DIT], ":"),
    (&[DIT, DIT, DAH, DAH, DIT, DIT], "?"),
    (&[DIT, DAH, DAH, DAH, DAH, DIT], "’"),
    (&[DAH, DIT, DIT, DIT, DIT, DAH], "-"),
    (&[DAH, DIT, DIT, DAH, DIT], "/"),
    (&[DAH, DIT, DAH, DAH, DIT], "("),
    (&[DAH, DIT, DAH, DAH, DIT, DAH], ")"),
    (&[DIT, DAH, DIT, DIT, DAH, DIT], "“ ”"), // quotation marks, before and after the words
    (&[DAH, DIT, DIT, DIT, DAH], "="),
    (&[DIT, DIT, DIT, DAH, DIT], "UNDERSTOOD"),
    (&[DIT, DIT, DIT, DIT, DIT, DIT, DIT, DIT], "ERROR"), // eight dots
    (&[DIT, DAH, DIT, DAH, DIT], "+"),
    (&[DIT, DAH, DIT, DIT, DIT], "WAIT"),
    (&[DIT, DIT, DIT, DAH, DIT, DAH], "EOW"), // end of work
    (&[DAH, DIT, DAH, DIT, DAH], "START"), // to precede every transmission
    (&[DIT, DAH, DAH, DIT, DAH, DIT], "@"),
    // 3.2.1 The multiplication sign is transmitted as the letter X.
];

/// Exact-match lookup of a dit/dah sequence.
pub fn lookup(code: &[Element]) -> Option<&'static str> {
    ALPHABET
        .iter()
        .find(|&&(entry, _)| entry == code)
        .map(|&(_, text)| text)
}

/// Literal dots-and-dashes rendering, for sequences outside the table.
pub fn render(code: &[Element]) -> String {
    code.iter().map(|e| e.glyph()).collect()
}

/// Inverse of [`render`].
pub fn parse(s: &str) -> Option<Vec<Element>> {
    s.chars()
        .map(|c| match c {
            '.' => Some(Element::Dit),
            '-' => Some(Element::Dah),
            _ => None,
        })
        .collect()
}

/// Table lookup with literal fallback; total over all sequences.
pub fn resolve(code: &[Element]) -> String {
    match lookup(code) {
        Some(text) => text.to_string(),
        None => render(code),
    }
}
