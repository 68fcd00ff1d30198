const FENCE: &str = "```";

/// Locate the JSON payload most likely embedded in generated text.
///
/// A fenced block (optionally tagged `json`) wrapping a `{ ... }` payload is
/// preferred; otherwise the span from the first `{` to the last `}` is used.
/// Returns `None` when neither is present.
pub fn extract_json_candidate(text: &str) -> Option<&str> {
    fenced_payload(text).or_else(|| brace_span(text))
}

fn fenced_payload(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(FENCE) {
        let fence_end = search_from + offset + FENCE.len();
        if let Some(payload) = payload_after_fence(text, fence_end) {
            return Some(payload);
        }
        search_from = fence_end;
    }
    None
}

/// Payload starting right after an opening fence, if one closes properly.
fn payload_after_fence(text: &str, fence_end: usize) -> Option<&str> {
    let mut start = fence_end;
    if text[start..]
        .get(..4)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
    {
        start += 4;
    }
    let rest = &text[start..];
    start += rest.len() - rest.trim_start().len();

    if !text[start..].starts_with('{') {
        return None;
    }

    // Shortest `{ ... }` followed by optional whitespace and a closing fence.
    text[start..]
        .match_indices('}')
        .map(|(index, _)| start + index + 1)
        .find(|&end| text[end..].trim_start().starts_with(FENCE))
        .map(|end| &text[start..end])
}

fn brace_span(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    if last > first {
        Some(&text[first..=last])
    } else {
        None
    }
}
