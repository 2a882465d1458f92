use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Cut a line of spans down to `width` cells. The span that crosses the
/// edge is truncated with `…` and everything after it is dropped.
pub(super) fn fit_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Span<'static>> {
    if spans_width(&spans) <= width {
        return spans;
    }
    let mut out = Vec::with_capacity(spans.len());
    let mut used = 0;
    for span in spans {
        let w = unicode::display_width(&span.content);
        if used + w <= width {
            used += w;
            out.push(span);
            continue;
        }
        let room = width - used;
        if room > 0 {
            out.push(Span::styled(
                unicode::truncate_to_width(&span.content, room),
                span.style,
            ));
        }
        break;
    }
    out
}

/// Pad a line with `style` out to `width` cells
pub(super) fn pad_spans(spans: &mut Vec<Span<'static>>, width: usize, style: ratatui::style::Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}
