//! Splitting one ignore entry into path segments.

use crate::domain::model::Segment;

/// Split the raw text of one entry into its ordered path segments.
///
/// Each segment's text is the cumulative prefix of the entry up to (but not
/// including) the separator that closes the component; the final segment
/// spans the whole entry. Ranges are absolute document offsets anchored at
/// `start_offset`. The separator may be longer than one character; trimming
/// and scanning always operate in units of its length.
///
/// Rules, in order:
/// - one trailing separator is stripped, unless the text *is* the separator;
/// - leading whitespace is skipped for scanning but stays part of the
///   cumulative text;
/// - a leading separator is consumed so anchored entries do not produce an
///   empty first segment;
/// - text equal to exactly the separator yields a single segment spanning
///   it, and nothing else.
pub fn split(text: &str, start_offset: usize, separator: &str) -> Vec<Segment> {
    let sep_len = separator.len();

    let text = if text.len() > sep_len && text.ends_with(separator) {
        &text[..text.len() - sep_len]
    } else {
        text
    };

    let mut segments = Vec::new();

    if text == separator {
        segments.push(Segment {
            index: 0,
            text: separator.to_owned(),
            range: (start_offset, start_offset + sep_len),
        });
        return segments;
    }

    // Scan position: first byte not yet consumed.
    let mut scan = 0;
    while let Some(ch) = text[scan..].chars().next() {
        if !ch.is_whitespace() {
            break;
        }
        scan += ch.len_utf8();
    }

    if scan + sep_len < text.len() && text[scan..].starts_with(separator) {
        scan += sep_len;
    }

    let mut index = 0;
    loop {
        let next = text[scan..].find(separator).map(|pos| pos + scan);
        match next {
            Some(pos) if pos > 0 => {
                segments.push(Segment {
                    index,
                    text: text[..pos].to_owned(),
                    range: (start_offset, start_offset + pos),
                });
                index += 1;
                scan = pos + sep_len;
            }
            // A separator at position 0 (or none at all) closes the scan
            // with one whole-remainder segment.
            _ => {
                segments.push(Segment {
                    index,
                    text: text.to_owned(),
                    range: (start_offset, start_offset + text.len()),
                });
                break;
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn plain_name_yields_one_segment() {
        let segments = split("*.class", 0, "/");
        assert_eq!(texts(&segments), vec!["*.class"]);
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[0].range, (0, 7));
    }

    #[test]
    fn segments_are_cumulative_prefixes() {
        let segments = split("a/b/c", 10, "/");
        assert_eq!(texts(&segments), vec!["a", "a/b", "a/b/c"]);
        assert_eq!(
            segments.iter().map(|s| s.range).collect::<Vec<_>>(),
            vec![(10, 11), (10, 13), (10, 15)]
        );
        for pair in segments.windows(2) {
            assert!(pair[1].text.starts_with(&pair[0].text));
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
    }

    #[test]
    fn trailing_separator_does_not_open_a_segment() {
        let segments = split("build/", 0, "/");
        assert_eq!(texts(&segments), vec!["build"]);
        assert_eq!(segments[0].range, (0, 5));
    }

    #[test]
    fn single_separator_yields_one_separator_segment() {
        let segments = split("/", 3, "/");
        assert_eq!(texts(&segments), vec!["/"]);
        assert_eq!(segments[0].range, (3, 4));
    }

    #[test]
    fn doubled_separator_collapses_to_single_separator_segment() {
        let segments = split("//", 0, "/");
        assert_eq!(texts(&segments), vec!["/"]);
        assert_eq!(segments[0].range, (0, 1));
    }

    #[test]
    fn leading_separator_does_not_split_off_empty_segment() {
        let segments = split("/foo", 0, "/");
        assert_eq!(texts(&segments), vec!["/foo"]);
    }

    #[test]
    fn doubled_leading_separator_keeps_anchor_in_later_segments() {
        let segments = split("//foo", 0, "/");
        assert_eq!(texts(&segments), vec!["/", "//foo"]);
        assert_eq!(segments[0].range, (0, 1));
        assert_eq!(segments[1].range, (0, 5));
    }

    #[test]
    fn leading_whitespace_is_counted_but_not_split_on() {
        let segments = split(" x/y", 5, "/");
        assert_eq!(texts(&segments), vec![" x", " x/y"]);
        assert_eq!(segments[0].range, (5, 7));
        assert_eq!(segments[1].range, (5, 9));
    }

    #[test]
    fn whitespace_only_text_yields_one_segment() {
        let segments = split("   ", 0, "/");
        assert_eq!(texts(&segments), vec!["   "]);
        assert!(segments[0].text.trim().is_empty());
    }

    #[test]
    fn empty_text_yields_one_empty_segment() {
        let segments = split("", 7, "/");
        assert_eq!(texts(&segments), vec![""]);
        assert_eq!(segments[0].range, (7, 7));
    }

    #[test]
    fn separator_count_drives_segment_count() {
        // k non-trailing separators produce k+1 segments.
        assert_eq!(split("a/b/c/d", 0, "/").len(), 4);
        // A trailing occurrence is trimmed away first.
        assert_eq!(split("a/b/", 0, "/").len(), 2);
    }

    #[test]
    fn multi_character_separator() {
        let segments = split("a::b::c", 0, "::");
        assert_eq!(texts(&segments), vec!["a", "a::b", "a::b::c"]);
        assert_eq!(segments[1].range, (0, 4));
    }

    #[test]
    fn multi_character_separator_trailing_and_bare() {
        assert_eq!(texts(&split("a::b::", 0, "::")), vec!["a", "a::b"]);
        let bare = split("::", 0, "::");
        assert_eq!(texts(&bare), vec!["::"]);
        assert_eq!(bare[0].range, (0, 2));
    }
}
