//! Engine-computed tags: variant selection and alignment padding

use super::position::{find_span, line_start, Bounds};
use crate::config::BlockConfig;

/// Which segment of a variant auto-tag to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantPick {
    Standard,
    Last,
    First,
}

impl VariantPick {
    /// Segment index: `STD<^.>LAST<^.>FIRST`
    pub fn index(self) -> usize {
        match self {
            VariantPick::Standard => 0,
            VariantPick::Last => 1,
            VariantPick::First => 2,
        }
    }
}

/// Select one segment of `content` split by `separator`.
///
/// Content without the separator is returned unchanged. An out-of-range
/// index falls back to the first segment. One leading blank line and one
/// trailing blank line fragment are trimmed from the chosen segment.
pub fn select_variant<'a>(content: &'a str, separator: &str, index: usize) -> &'a str {
    if separator.is_empty() || !content.contains(separator) {
        return content;
    }

    let segments: Vec<&str> = content.split(separator).collect();
    let mut segment = segments.get(index).copied().unwrap_or(segments[0]);

    if let Some(nl) = segment.find('\n') {
        if segment[..nl].trim().is_empty() {
            segment = &segment[nl + 1..];
        }
    }
    if let Some(nl) = segment.rfind('\n') {
        if segment[nl + 1..].trim().is_empty() {
            segment = &segment[..nl + 1];
        }
    }

    segment
}

/// Replace every variant auto-tag in `content` with its `pick` segment
pub fn resolve_variants(content: &str, config: &BlockConfig, pick: VariantPick) -> String {
    let (start_tag, end_tag, separator) = config.variant_tags();
    let mut content = content.to_string();

    while let Some(outer) = find_span(&content, &start_tag, &end_tag, Bounds::Include) {
        let Some(inner) = find_span(&content, &start_tag, &end_tag, Bounds::Exclude) else {
            break;
        };
        let value = select_variant(&content[inner.range()], &separator, pick.index()).to_string();
        content.replace_range(outer.range(), &value);
    }

    content
}

/// Expand tabs to spaces, with tab stops every `tab_size` columns
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                if tab_size > 0 {
                    let pad = tab_size - column % tab_size;
                    out.extend(std::iter::repeat(' ').take(pad));
                    column += pad;
                }
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// An alignment marker and the run of repeated characters after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    /// Byte offset of the marker
    start: usize,
    /// Byte offset just past the repeated characters
    end: usize,
    /// Display column of the marker, tabs expanded
    column: usize,
    /// Width in characters of the marker plus the run
    width: usize,
    fill: Option<char>,
}

fn locate_run(text: &str, marker: &str, from: usize, tab_size: usize) -> Option<Run> {
    let start = from + text.get(from..)?.find(marker)?;
    let mut end = start + marker.len();
    let fill = text[end..].chars().next();
    if let Some(c) = fill {
        end += text[end..]
            .chars()
            .take_while(|&next| next == c)
            .map(char::len_utf8)
            .sum::<usize>();
    }
    let column = expand_tabs(&text[line_start(text, start)..start], tab_size)
        .chars()
        .count();
    let width = text[start..end].chars().count();
    Some(Run {
        start,
        end,
        column,
        width,
        fill,
    })
}

/// Replace alignment markers so the text after each run keeps its template column.
///
/// For each marker in `content`, left to right, the matching marker of the
/// tab-expanded `template` gives the original column and width. The run is
/// resized by the column shift caused by earlier substitutions, never below
/// one character. Tab runs are converted to the number of tab stops covering
/// the computed width. A marker with no counterpart left in the template
/// collapses to a single character.
pub fn resolve_alignment(content: &str, template: &str, config: &BlockConfig) -> String {
    let marker = config.alignment_tag();
    if marker.is_empty() || !content.contains(&marker) {
        return content.to_string();
    }

    let tab_size = config.tab_size;
    let expanded = expand_tabs(template, tab_size);
    let mut content = content.to_string();
    let mut template_pos = 0;

    while let Some(run) = locate_run(&content, &marker, 0, tab_size) {
        let Some(fill) = run.fill else {
            content.replace_range(run.start..run.end, "");
            continue;
        };

        let count = match locate_run(&expanded, &marker, template_pos, tab_size) {
            Some(original) => {
                template_pos = original.end;
                let width = original.width as isize + original.column as isize - run.column as isize;
                let width = width.max(0) as usize;
                if fill == '\t' {
                    width.div_ceil(tab_size.max(1))
                } else {
                    width
                }
            }
            None => 0,
        };

        let padding: String = std::iter::repeat(fill).take(count.max(1)).collect();
        content.replace_range(run.start..run.end, &padding);
    }

    content
}
