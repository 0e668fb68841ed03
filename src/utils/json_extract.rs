/// Locate the JSON object embedded in a free-text model reply
///
/// Extraction order:
/// 1. the body of a fenced ```` ```json ```` block (or a bare ```` ``` ```` block)
///    when it holds a `{`
/// 2. the whole reply
///
/// Within that scope the span from the first `{` to the last `}` is returned.
/// A reply carrying more than one object yields a span that is not valid
/// JSON on its own, which the caller rejects when parsing.
///
/// # Arguments
/// * `reply` - The text returned by the model
///
/// # Returns
/// The candidate JSON slice, or `None` if the reply holds no braces at all.
///
/// # Examples
/// ```
/// use scoreboard_admin::utils::json_extract::extract_json_object;
/// let reply = "Sure! {\"home_score\": 2, \"away_score\": 1, \"status\": \"finished\"} Done.";
/// assert_eq!(
///     extract_json_object(reply),
///     Some("{\"home_score\": 2, \"away_score\": 1, \"status\": \"finished\"}")
/// );
/// ```
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let scope = fenced_block(reply)
        .filter(|block| block.contains('{'))
        .unwrap_or(reply);

    let start = scope.find('{')?;
    let end = scope.rfind('}')?;
    if end < start {
        return None;
    }

    Some(&scope[start..=end])
}

fn fenced_block(reply: &str) -> Option<&str> {
    let (marker, marker_len) = match reply.find("```json") {
        Some(pos) => (pos, "```json".len()),
        None => (reply.find("```")?, "```".len()),
    };
    let start = marker + marker_len;
    let end = start + reply[start..].find("```")?;

    Some(reply[start..end].trim())
}
