use std::fmt;

/// Human-readable compiler/linker message.
///
/// Bounded to [`DiagnosticLog::MAX_LEN`] bytes so a pathological source cannot
/// flood the log; longer messages are cut on a UTF-8 boundary.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiagnosticLog {
    text: String,
    truncated: bool,
}

impl DiagnosticLog {
    pub const MAX_LEN: usize = 512;

    pub fn new(message: impl Into<String>) -> Self {
        let mut text = message.into();
        let truncated = text.len() > Self::MAX_LEN;
        if truncated {
            let mut end = Self::MAX_LEN;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        Self { text, truncated }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the original message exceeded `MAX_LEN`.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.trim_end())
    }
}
