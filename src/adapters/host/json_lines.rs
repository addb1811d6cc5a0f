//! Newline-delimited JSON host.
//!
//! Writes each outbound command as one JSON line and, for pages that await
//! a reply, reads one JSON line back. The default wiring is stdout/stdin so
//! an embedding UI can drive the session as a child process.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::domain::donation::{InboundResult, OutboundCommand, Page};
use crate::ports::{DonationHost, HostError};

/// Host speaking JSON lines over a reader/writer pair.
pub struct JsonLinesHost<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
}

impl JsonLinesHost<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Host bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> JsonLinesHost<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }

    async fn send(&self, command: &OutboundCommand) -> Result<(), HostError> {
        let mut line = serde_json::to_string(command)?;
        line.push('\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn receive(&self) -> Result<InboundResult, HostError> {
        let mut reader = self.reader.lock().await;
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                return Err(HostError::Closed);
            }
            if !line.trim().is_empty() {
                break;
            }
        }
        Ok(serde_json::from_str(line.trim())?)
    }
}

#[async_trait]
impl<R, W> DonationHost for JsonLinesHost<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn render(&self, page: &Page) -> Result<InboundResult, HostError> {
        self.send(&OutboundCommand::Render { page: page.clone() })
            .await?;
        if !page.kind().awaits_reply() {
            return Ok(InboundResult::PayloadVoid);
        }
        self.receive().await
    }

    async fn donate(&self, key: &str, payload: &str) -> Result<(), HostError> {
        self.send(&OutboundCommand::Donate {
            key: key.to_string(),
            payload: payload.to_string(),
        })
        .await
    }

    async fn exit(&self, code: i32, message: &str) -> Result<(), HostError> {
        self.send(&OutboundCommand::Exit {
            code,
            message: message.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donation::{prompt_file, render_end_page, render_donation_page};
    use crate::domain::foundation::Progress;
    use std::io::Cursor;

    fn host(input: &str) -> JsonLinesHost<Cursor<Vec<u8>>, Vec<u8>> {
        JsonLinesHost::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(host: JsonLinesHost<Cursor<Vec<u8>>, Vec<u8>>) -> Vec<serde_json::Value> {
        let (_, out) = host.into_inner();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn file_prompt() -> Page {
        page_of(render_donation_page(
            "Facebook",
            prompt_file("application/json", "Facebook"),
            Progress::ZERO,
        ))
    }

    fn page_of(command: OutboundCommand) -> Page {
        command.page().cloned().unwrap()
    }

    #[tokio::test]
    async fn render_writes_command_and_reads_reply() {
        let host = host("\n{\"__type__\":\"PayloadString\",\"value\":\"hello\"}\n");
        let reply = host.render(&file_prompt()).await.unwrap();
        assert_eq!(reply, InboundResult::PayloadString("hello".to_string()));

        let lines = written(host);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["command"], "render");
        assert_eq!(lines[0]["page"]["body"]["kind"], "file-prompt");
    }

    #[tokio::test]
    async fn end_page_reads_nothing() {
        let host = host("");
        let reply = host.render(&page_of(render_end_page(Progress::HUNDRED))).await.unwrap();
        assert_eq!(reply, InboundResult::PayloadVoid);
    }

    #[tokio::test]
    async fn eof_while_awaiting_reply_is_closed() {
        let host = host("");
        let err = host.render(&file_prompt()).await.unwrap_err();
        assert!(matches!(err, HostError::Closed));
    }

    #[tokio::test]
    async fn malformed_reply_is_decode_error() {
        let host = host("{\"__type__\":\"PayloadNope\"}\n");
        let err = host.render(&file_prompt()).await.unwrap_err();
        assert!(matches!(err, HostError::Decode(_)));
    }

    #[tokio::test]
    async fn donate_and_exit_write_one_line_each() {
        let host = host("");
        host.donate("abc-tracking", "[]").await.unwrap();
        host.exit(0, "Success").await.unwrap();

        let lines = written(host);
        assert_eq!(lines[0]["command"], "donate");
        assert_eq!(lines[0]["key"], "abc-tracking");
        assert_eq!(lines[1]["command"], "exit");
        assert_eq!(lines[1]["code"], 0);
        assert_eq!(lines[1]["message"], "Success");
    }
}
