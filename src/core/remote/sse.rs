//! Minimal server-sent-events framing for the realtime database stream.
//!
//! Events are separated by a blank line; only the `event:` and `data:` fields are used.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SseEvent {
    pub event: String,
    pub data: String,
}

#[derive(Debug, Default)]
pub(super) struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    pub(super) fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Pop the next complete event, if one is buffered.
    pub(super) fn next_event(&mut self) -> Option<SseEvent> {
        loop {
            let (end, separator_len) = find_separator(&self.buffer)?;
            let block: Vec<u8> = self.buffer.drain(..end + separator_len).take(end).collect();
            if let Some(event) = parse_block(&String::from_utf8_lossy(&block)) {
                return Some(event);
            }
        }
    }
}

fn find_separator(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = buffer.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let crlf = buffer.windows(4).position(|w| w == b"\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn parse_block(block: &str) -> Option<SseEvent> {
    let mut event = None;
    let mut data: Vec<&str> = Vec::new();
    for line in block.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => event = Some(value.to_string()),
            "data" => data.push(value),
            _ => {}
        }
    }
    if event.is_none() && data.is_empty() {
        return None;
    }
    Some(SseEvent {
        event: event.unwrap_or_else(|| "message".to_string()),
        data: data.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_split_across_chunks() {
        let mut parser = SseParser::default();
        parser.push(b"event: put\ndata: {\"path\":\"/\",");
        assert_eq!(parser.next_event(), None);
        parser.push(b"\"data\":null}\n\nevent: keep-alive\ndata: null\n\n");

        let first = parser.next_event().unwrap();
        assert_eq!(first.event, "put");
        assert_eq!(first.data, "{\"path\":\"/\",\"data\":null}");

        let second = parser.next_event().unwrap();
        assert_eq!(second.event, "keep-alive");
        assert_eq!(parser.next_event(), None);
    }

    #[test]
    fn handles_crlf_and_comments() {
        let mut parser = SseParser::default();
        parser.push(b": hello\r\n\r\nevent: patch\r\ndata: {}\r\n\r\n");
        let event = parser.next_event().unwrap();
        assert_eq!(event.event, "patch");
        assert_eq!(event.data, "{}");
    }
}
