//! Pulling payloads out of oracle replies.

/// Strip a markdown code fence around a reply, if there is one.
///
/// Tries a ```` ```json ```` fence first, then a bare fence (skipping any
/// language tag). A missing closing fence keeps everything after the opening
/// one. Replies without fences come back trimmed.
///
/// ```
/// use picturebook_workflow::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"pages\": []}\n```"), "{\"pages\": []}");
/// assert_eq!(strip_code_fences("  {\"pages\": []} "), "{\"pages\": []}");
/// ```
pub fn strip_code_fences(response: &str) -> &str {
    let tagged = "```json";
    if let Some(start) = response.find(tagged) {
        let content_start = start + tagged.len();
        return match response[content_start..].find("```") {
            Some(end) => response[content_start..content_start + end].trim(),
            // Truncated reply
            None => response[content_start..].trim(),
        };
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        return match response[skip_to..].find("```") {
            Some(end) => response[skip_to..skip_to + end].trim(),
            None => response[skip_to..].trim(),
        };
    }

    response.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_fence_with_language_tag() {
        let reply = "Here you go:\n```javascript\n{\"a\": 1}\n```\nEnjoy";
        assert_eq!(strip_code_fences(reply), "{\"a\": 1}");
    }

    #[test]
    fn bare_fence_without_tag() {
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn unterminated_fence_keeps_tail() {
        assert_eq!(strip_code_fences("```json\n{\"pages\": ["), "{\"pages\": [");
    }
}
