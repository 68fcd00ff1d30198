/// Repair the malformed-JSON patterns generated text tends to contain.
///
/// Trailing commas before `}` or `]` are dropped, then newlines, carriage
/// returns, tabs and runs of whitespace collapse to single spaces and the
/// result is trimmed. This is not a lenient parser: the output may still fail
/// to parse. Applying it twice gives the same string as applying it once.
pub fn sanitize_json(candidate: &str) -> String {
    let without_commas = strip_trailing_commas(candidate);
    collapse_whitespace(&without_commas)
}

fn strip_trailing_commas(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch == '}' || ch == ']' {
            drop_dangling_commas(&mut output);
        }
        output.push(ch);
    }
    output
}

/// Remove commas (and the whitespace following them) at the end of `buffer`.
fn drop_dangling_commas(buffer: &mut String) {
    loop {
        let content_len = buffer.trim_end().len();
        if buffer[..content_len].ends_with(',') {
            buffer.truncate(content_len - 1);
        } else {
            break;
        }
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
