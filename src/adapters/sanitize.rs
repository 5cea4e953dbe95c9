//! PHI redaction for log output.
//!
//! Chat questions and intake values are free text typed by patients, so
//! anything reaching a log sink passes through [`redact`] first. Covered
//! patterns:
//! - Email addresses
//! - Phone numbers
//! - SSN-like and MRN identifiers
//! - Calendar dates (possible dates of birth)
//!
//! Redaction is applied line by line by [`SanitizingMakeWriter`], which wraps
//! any `tracing_subscriber` writer.
//!
//! Input is capped (see `SLEEPCHECK_SANITIZE_MAX_BYTES`); the remainder of an
//! oversized line is dropped and marked `[TRUNCATED]`.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PHI_RULES: OnceLock<PhiRules> = OnceLock::new();

const DEFAULT_MAX_BYTES: usize = 16 * 1024;

const MAX_BYTES_ENV: &str = "SLEEPCHECK_SANITIZE_MAX_BYTES";

struct PhiRule {
    regex: Regex,
    replacement: &'static str,
}

struct PhiRules {
    any: RegexSet,
    rules: Vec<PhiRule>,
}

fn max_bytes() -> usize {
    std::env::var(MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_BYTES)
}

fn clip(input: &str, limit: usize) -> (&str, bool) {
    if input.len() <= limit {
        return (input, false);
    }
    let mut end = limit;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn rules() -> &'static PhiRules {
    PHI_RULES.get_or_init(|| {
        // Order matters: SSN before phone so 123-45-6789 is not half-eaten.
        let table: [(&'static str, &'static str); 6] = [
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[EMAIL]",
            ),
            (r"\b\d{3}-\d{2}-\d{4}\b", "[SSN]"),
            (r"(?i)\bMRN[:#\s]?\s*\d{5,10}\b", "[MRN]"),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
                "[PHONE]",
            ),
            (r"\b\d{4}-\d{2}-\d{2}\b", "[DATE]"),
            (r"\b\d{1,2}/\d{1,2}/\d{2,4}\b", "[DATE]"),
        ];

        let any = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| PhiRule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        PhiRules { any, rules }
    })
}

/// Replace PHI-like substrings with placeholder tags.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, max_bytes())
}

fn redact_with_limit(input: &str, limit: usize) -> String {
    let phi = rules();
    let (prefix, truncated) = clip(input, limit);

    let mut out = if phi.any.is_match(prefix) {
        let mut text = prefix.to_string();
        for idx in phi.any.matches(prefix).into_iter() {
            let rule = &phi.rules[idx];
            text = rule.regex.replace_all(&text, rule.replacement).into_owned();
        }
        text
    } else {
        prefix.to_string()
    };

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Whether the text contains anything [`redact`] would replace.
#[must_use]
pub fn contains_phi(input: &str) -> bool {
    let (prefix, _) = clip(input, max_bytes());
    rules().any.is_match(prefix)
}

/// `MakeWriter` wrapper that redacts each formatted log line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(redact(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer forever.
        if self.pending.len() > max_bytes().saturating_mul(2) {
            let all = std::mem::take(&mut self.pending);
            self.emit(&all)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_redact_email() {
        let out = redact("question from jane.doe@example.org about cpap");
        assert_eq!(out, "question from [EMAIL] about cpap");
    }

    #[test]
    fn test_redact_ssn_and_phone() {
        let out = redact("SSN 123-45-6789, call 555-867-5309");
        assert!(out.contains("[SSN]"));
        assert!(out.contains("[PHONE]"));
        assert!(!out.contains("6789"));
    }

    #[test]
    fn test_redact_mrn_and_dates() {
        let out = redact("MRN: 00123456 born 1961-04-12 seen 3/7/2024");
        assert_eq!(out, "[MRN] born [DATE] seen [DATE]");
    }

    #[test]
    fn test_clinical_numbers_untouched() {
        let line = "Assessment complete: ahi=20.9 bmi=42.00 spo2=85 pulse=95";
        assert!(!contains_phi(line));
        assert_eq!(redact(line), line);
    }

    #[test]
    fn test_truncation_marker() {
        let out = redact_with_limit("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(out, "abcdefghij [TRUNCATED]");
        // Never split a multi-byte character
        let out = redact_with_limit("ééééé", 3);
        assert_eq!(out, "é [TRUNCATED]");
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("Should lock").extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_redacts_per_line() {
        let sink = Capture::default();
        let make = SanitizingMakeWriter::new({
            let sink = sink.clone();
            move || sink.clone()
        });

        {
            let mut writer = make.make_writer();
            writer.write_all(b"user bob@clinic.com ").expect("Should write");
            writer.write_all(b"asked\nsecond line").expect("Should write");
        }

        let written = String::from_utf8(sink.0.lock().expect("Should lock").clone()).expect("Should be utf8");
        assert_eq!(written, "user [EMAIL] asked\nsecond line");
    }
}
