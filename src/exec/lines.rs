// src/exec/lines.rs

//! Incremental line splitting for child output streams.

use tokio::io::{AsyncRead, AsyncReadExt};

/// Push parser that turns arbitrary byte chunks into complete lines.
///
/// Tolerates both `\n` and `\r\n` endings, and UTF-8 sequences split
/// across chunk boundaries (the buffer holds raw bytes; decoding happens
/// per completed line). There is no line length limit.
#[derive(Debug, Default)]
pub struct LineParser {
    buf: Vec<u8>,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk; returns every line completed by it, in order,
    /// without their line endings.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Whatever remains after the stream ended, if anything.
    pub fn finish(self) -> Option<String> {
        if self.buf.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.buf).into_owned())
        }
    }
}

/// Drive a reader to EOF, invoking `on_line` once per complete line.
///
/// A trailing partial line (no final newline) is still delivered. There is
/// no backpressure: the sink must keep pace with the stream or memory
/// grows with it.
pub async fn stream_lines<R, F>(mut reader: R, mut on_line: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut parser = LineParser::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        for line in parser.push(&chunk[..n]) {
            on_line(line);
        }
    }

    if let Some(rest) = parser.finish() {
        on_line(rest);
    }
    Ok(())
}

/// Accumulate a reader's entire output into one string (lossy UTF-8).
pub async fn collect_stream<R>(mut reader: R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
