use chronicle_core::DayBucket;

/// One year's merged document.
#[derive(Debug, Clone)]
pub struct YearHtml {
    pub year: i32,
    pub html: String,
}

/// Walk the chronological sequence once, concatenating each day's fragments
/// in bucket order into a running year buffer. A year change (or the end of
/// the sequence) finalizes the buffer, applying the continuation collapse to
/// that year only — continuations never join across a year boundary.
pub fn merge_years(sequence: &[DayBucket]) -> Vec<YearHtml> {
    let mut out: Vec<YearHtml> = Vec::new();
    let mut current: Option<(i32, String)> = None;
    for bucket in sequence {
        let year = bucket.day_key().year;
        if let Some((open_year, buffer)) = current.take() {
            if open_year == year {
                current = Some((open_year, buffer));
            } else {
                out.push(finalize(open_year, buffer));
                current = Some((year, String::new()));
            }
        } else {
            current = Some((year, String::new()));
        }
        if let Some((_, buffer)) = current.as_mut() {
            for fragment in bucket.fragments() {
                buffer.push_str(&fragment.content);
                buffer.push('\n');
            }
        }
    }
    if let Some((year, buffer)) = current {
        out.push(finalize(year, buffer));
    }
    out
}

fn finalize(year: i32, html: String) -> YearHtml {
    YearHtml {
        year,
        html: collapse_continuations(&html),
    }
}

/// Collapse a mid-sentence paragraph break: an ellipsis immediately before a
/// paragraph boundary plus an ellipsis immediately after it becomes a single
/// space. Models fragments truncated mid-sentence at the source.
pub fn collapse_continuations(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"...") {
            if let Some(len) = continuation_len(&bytes[i + 3..]) {
                out.push_str(&html[copied..i]);
                out.push(' ');
                i += 3 + len;
                copied = i;
                continue;
            }
        }
        i += 1;
    }
    out.push_str(&html[copied..]);
    out
}

/// Length of a `</p> <p ...> ...` tail following an opening ellipsis, or
/// None when the bytes are not a continuation boundary.
fn continuation_len(rest: &[u8]) -> Option<usize> {
    let mut j = skip_whitespace(rest, 0);
    if !rest[j..].starts_with(b"</p>") {
        return None;
    }
    j += 4;
    j = skip_whitespace(rest, j);
    if !rest[j..].starts_with(b"<p") {
        return None;
    }
    j += 2;
    match rest.get(j) {
        Some(b'>') => j += 1,
        Some(c) if c.is_ascii_whitespace() => {
            while j < rest.len() && rest[j] != b'>' && rest[j] != b'<' {
                j += 1;
            }
            if rest.get(j) != Some(&b'>') {
                return None;
            }
            j += 1;
        }
        _ => return None,
    }
    j = skip_whitespace(rest, j);
    if !rest[j..].starts_with(b"...") {
        return None;
    }
    Some(j + 3)
}

fn skip_whitespace(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::{build_sequence, Fragment};

    fn fragment(year: i32, month: u32, day: u32, order: &str, content: &str) -> Fragment {
        Fragment::authored(
            year,
            month,
            day,
            order.to_string(),
            content.to_string(),
            format!("src-{}-{}", day, order),
        )
        .expect("fragment")
    }

    #[test]
    fn continuation_collapse_round_trip() {
        let merged = collapse_continuations(
            "<p>the first part of a sentence...</p>\n<p>...and its second part</p>",
        );
        assert_eq!(
            merged,
            "<p>the first part of a sentence and its second part</p>"
        );
    }

    #[test]
    fn collapse_tolerates_paragraph_attributes() {
        let merged =
            collapse_continuations("<p>one...</p><p class=\"entry\">...two</p>");
        assert_eq!(merged, "<p>one two</p>");
    }

    #[test]
    fn plain_paragraph_breaks_survive() {
        let input = "<p>one.</p>\n<p>two.</p>";
        assert_eq!(collapse_continuations(input), input);
        let half = "<p>one...</p>\n<p>two.</p>";
        assert_eq!(collapse_continuations(half), half);
    }

    #[test]
    fn merge_splits_buffers_by_year() {
        let sequence = build_sequence(vec![
            fragment(2020, 12, 31, "a", "<p>twenty</p>"),
            fragment(2021, 1, 1, "a", "<p>twenty-one</p>"),
            fragment(2021, 1, 2, "a", "<p>more</p>"),
        ])
        .expect("sequence");
        let years = merge_years(&sequence);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2020);
        assert_eq!(years[0].html, "<p>twenty</p>\n");
        assert_eq!(years[1].year, 2021);
        assert_eq!(years[1].html, "<p>twenty-one</p>\n<p>more</p>\n");
    }

    #[test]
    fn continuations_never_collapse_across_a_year_boundary() {
        let sequence = build_sequence(vec![
            fragment(2020, 12, 31, "a", "<p>ends mid-sentence...</p>"),
            fragment(2021, 1, 1, "a", "<p>...continues next year</p>"),
        ])
        .expect("sequence");
        let years = merge_years(&sequence);
        assert_eq!(years.len(), 2);
        assert!(years[0].html.contains("mid-sentence..."));
        assert!(years[1].html.contains("...continues"));
    }
}
