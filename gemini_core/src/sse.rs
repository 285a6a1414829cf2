//! Minimal Server-Sent Events decoder.
//!
//! Network reads do not respect event or even UTF-8 boundaries, so bytes are
//! buffered until a full line is available. Only `data:` fields matter here;
//! `event:`, `id:`, `retry:` and comment lines are dropped.

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning the payloads of every event completed by them.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush whatever is left once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(event) = self.process_line(line) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if let Some(value) = line.strip_prefix("data:") {
            self.data
                .push(value.strip_prefix(' ').unwrap_or(value).to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let data = self.data.join("\n");
        self.data.clear();
        Some(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        assert_eq!(decoder.feed(b"data: {\"a\":1}\n\n"), vec!["{\"a\":1}"]);
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_event_split_across_reads() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"da").is_empty());
        assert!(decoder.feed(b"ta: hel").is_empty());
        assert!(decoder.feed(b"lo\r\n").is_empty());
        assert_eq!(decoder.feed(b"\r\ndata: next\n\n"), vec!["hello", "next"]);
    }

    #[test]
    fn test_multibyte_char_split_across_reads() {
        let mut decoder = SseDecoder::new();
        let bytes = "data: héllo\n\n".as_bytes();
        // split inside the two-byte 'é'
        assert!(decoder.feed(&bytes[..8]).is_empty());
        assert_eq!(decoder.feed(&bytes[8..]), vec!["héllo"]);
    }

    #[test]
    fn test_multiline_data_and_ignored_fields() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": keep-alive\nevent: message\nid: 7\ndata: one\ndata:two\n\n");
        assert_eq!(events, vec!["one\ntwo"]);
    }

    #[test]
    fn test_blank_lines_without_data() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"\n\n: ping\n\n").is_empty());
    }

    #[test]
    fn test_finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert_eq!(decoder.feed(b"data: first\n\ndata: last"), vec!["first"]);
        assert_eq!(decoder.finish(), Some("last".to_string()));
        assert_eq!(decoder.finish(), None);
    }
}
