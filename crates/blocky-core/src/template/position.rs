//! Locating tagged regions inside block content
//!
//! The end tag is the first occurrence of its text after the start tag. The
//! search is not nesting-aware: a region named `A` that encloses another
//! region also named `A` ends at the inner end tag.

/// Half-open byte range within a content string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Whether a located region includes its start and end tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// Inner text only
    Exclude,
    /// The tags themselves and everything between them
    Include,
}

/// Find the region delimited by `start_tag` and `end_tag`.
///
/// A tag standing alone on its line takes the whole line with it: with
/// [`Bounds::Exclude`] the inner range starts on the line after the start tag
/// and ends at the start of the end tag's line; with [`Bounds::Include`] the
/// range grows to the start tag's line start and past the end tag's newline.
pub fn find_span(content: &str, start_tag: &str, end_tag: &str, bounds: Bounds) -> Option<Span> {
    find_span_from(content, 0, start_tag, end_tag, bounds)
}

/// Like [`find_span`], ignoring start tags before byte offset `from`
pub fn find_span_from(
    content: &str,
    from: usize,
    start_tag: &str,
    end_tag: &str,
    bounds: Bounds,
) -> Option<Span> {
    if start_tag.is_empty() || end_tag.is_empty() || from > content.len() {
        return None;
    }

    let tag_start = from + content.get(from..)?.find(start_tag)?;
    let tag_end = tag_start + start_tag.len();
    let end_tag_start = tag_end + content[tag_end..].find(end_tag)?;
    let end_tag_end = end_tag_start + end_tag.len();

    let span = match bounds {
        Bounds::Exclude => {
            let mut start = tag_end;
            if let Some(nl) = content[tag_end..].find('\n') {
                let next_line = tag_end + nl + 1;
                if content[tag_end..next_line].trim().is_empty() {
                    start = next_line;
                }
            }

            let mut end = end_tag_start;
            if let Some(nl) = content[start..end_tag_start].rfind('\n') {
                let last_line = start + nl + 1;
                if content[last_line..end_tag_start].trim().is_empty() {
                    end = last_line;
                }
            }

            Span { start, end }
        }
        Bounds::Include => {
            let mut start = tag_start;
            let start_line = line_start(content, tag_start);
            if let Some(nl) = content[tag_start..].find('\n') {
                if content[start_line..tag_start + nl].trim() == start_tag {
                    start = start_line;
                }
            }

            let mut end = end_tag_end;
            let end_line_start = line_start(content, end_tag_start);
            if let Some(nl) = content[end_tag_end..].find('\n') {
                let next_line = end_tag_end + nl + 1;
                if content[end_line_start..next_line].trim() == end_tag {
                    end = next_line;
                }
            }

            Span { start, end }
        }
    };

    Some(span)
}

/// Byte offset of the start of the line containing `pos`
pub(crate) fn line_start(content: &str, pos: usize) -> usize {
    content[..pos].rfind('\n').map_or(0, |nl| nl + 1)
}
