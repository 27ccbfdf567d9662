use crate::draw::{FontSpec, TextMeasure};
use crate::error::PDFError;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit newlines always start a new line (blank lines are kept). Otherwise lines
/// break between words; whitespace runs collapse to a single space. A word that is wider
/// than `max_width` on its own is broken between characters, so no line ever overflows
/// unless a single character does.
///
/// Empty input produces no lines at all.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    font: FontSpec,
    text: &str,
    max_width: Pt,
) -> Result<Vec<String>, PDFError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    // normalize tabs and newlines
    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let fits = |candidate: &str| -> Result<bool, PDFError> {
        Ok(measure.width_of_text(candidate, font)? <= max_width)
    };

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if fits(candidate.as_str())? {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if fits(word)? {
                line = word.to_string();
                continue;
            }

            // no break point in the word: split it wherever it overflows
            for ch in word.chars() {
                line.push(ch);
                if !fits(line.as_str())? && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
        }

        lines.push(line);
    }

    Ok(lines)
}

/// Number of lines `text` occupies when wrapped to `max_width`, at least one
pub fn line_count<M: TextMeasure + ?Sized>(
    measure: &M,
    font: FontSpec,
    text: &str,
    max_width: Pt,
) -> Result<usize, PDFError> {
    Ok(wrap_text(measure, font, text, max_width)?.len().max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Face;
    use crate::testing::FixedMeasure;

    // every character is 5pt wide at size 10
    const FONT: FontSpec = FontSpec::new(Face::Sans, 10.0);

    fn wrap(text: &str, width: f32) -> Vec<String> {
        wrap_text(&FixedMeasure, FONT, text, Pt(width)).unwrap()
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("Drywall Sheet", 100.0), vec!["Drywall Sheet"]);
    }

    #[test]
    fn breaks_between_words() {
        // 10 characters per line
        assert_eq!(
            wrap("paint the fence white", 50.0),
            vec!["paint the", "fence", "white"]
        );
    }

    #[test]
    fn long_words_are_split_between_characters() {
        assert_eq!(wrap("abcdefghijkl", 25.0), vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn explicit_newlines_are_kept() {
        assert_eq!(wrap("123 Fake St\r\n\nSome Town", 500.0), vec!["123 Fake St", "", "Some Town"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(wrap("a \t  b", 500.0), vec!["a b"]);
    }

    #[test]
    fn empty_text_has_no_lines_but_counts_as_one() {
        assert!(wrap("", 50.0).is_empty());
        assert_eq!(line_count(&FixedMeasure, FONT, "", Pt(50.0)).unwrap(), 1);
    }

    #[test]
    fn narrower_columns_never_produce_fewer_lines() {
        let text = "Paint, with a description long enough that it has to wrap";
        let mut previous = 0;
        for width in [400.0, 200.0, 100.0, 50.0, 20.0] {
            let count = line_count(&FixedMeasure, FONT, text, Pt(width)).unwrap();
            assert!(count >= previous);
            previous = count;
        }
        assert!(previous > 1);
    }
}
