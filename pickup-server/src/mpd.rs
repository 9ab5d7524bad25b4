//! MPD client
//!
//! Just enough of the MPD text protocol to list the library:
//!
//! ```text
//! <- OK MPD 0.23.5
//! -> password "secret"          (only when configured)
//! <- OK
//! -> listall
//! <- directory: Abba
//! <- file: Abba/Arrival/01.mp3
//! <- OK
//! ```
//!
//! Any `ACK ...` line, I/O failure or timeout is a fatal fetch error.

use std::time::Duration;

use async_trait::async_trait;
use pickup_common::config::MpdConfig;
use pickup_common::{Error, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

use crate::source::MusicSource;

const GREETING_PREFIX: &str = "OK MPD ";
const FILE_PREFIX: &str = "file: ";

/// Connection settings for one MPD daemon
#[derive(Debug, Clone)]
pub struct MpdClient {
    address: String,
    password: Option<String>,
    timeout: Duration,
}

impl MpdClient {
    pub fn new(address: impl Into<String>, password: Option<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            password,
            timeout,
        }
    }

    pub fn from_config(config: &MpdConfig) -> Self {
        Self::new(config.address.clone(), config.password.clone(), config.timeout())
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        let mut conn = MpdConnection::connect(&self.address).await?;
        if let Some(password) = &self.password {
            conn.command(&format!("password {}", quote(password))).await?;
        }
        let lines = conn.command("listall").await?;
        Ok(files_from_listing(&lines))
    }
}

#[async_trait]
impl MusicSource for MpdClient {
    async fn list_files(&self) -> Result<Vec<String>> {
        match tokio::time::timeout(self.timeout, self.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(Error::SourceFetch(format!(
                "timed out after {:?} talking to {}",
                self.timeout, self.address
            ))),
        }
    }

    fn describe(&self) -> String {
        format!("mpd at {}", self.address)
    }
}

struct MpdConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl MpdConnection {
    async fn connect(address: &str) -> Result<Self> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| Error::SourceFetch(format!("cannot connect to {}: {}", address, e)))?;
        let (read_half, writer) = stream.into_split();
        let mut conn = Self {
            reader: BufReader::new(read_half),
            writer,
        };

        let greeting = conn.read_line().await?;
        let version = parse_greeting(&greeting)?;
        debug!(address, version, "Connected to MPD");
        Ok(conn)
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| Error::SourceFetch(format!("read failed: {}", e)))?;
        if n == 0 {
            return Err(Error::SourceFetch("connection closed by daemon".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Send one command and collect its response lines up to `OK`.
    async fn command(&mut self, command: &str) -> Result<Vec<String>> {
        self.writer
            .write_all(format!("{}\n", command).as_bytes())
            .await
            .map_err(|e| Error::SourceFetch(format!("write failed: {}", e)))?;

        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            if line == "OK" {
                return Ok(lines);
            }
            if line.starts_with("ACK") {
                return Err(Error::SourceFetch(line));
            }
            lines.push(line);
        }
    }
}

/// Check the banner and return the protocol version.
pub fn parse_greeting(line: &str) -> Result<&str> {
    line.strip_prefix(GREETING_PREFIX)
        .ok_or_else(|| Error::SourceFetch(format!("unexpected greeting: {:?}", line)))
}

/// Keep the `file:` entries of a listing, in order.
pub fn files_from_listing(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.strip_prefix(FILE_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Quote a command argument.
pub fn quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Serve one scripted MPD session, returning the commands received.
    async fn fake_daemon(
        greeting: &'static str,
        replies: Vec<&'static str>,
    ) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read_half, mut write_half) = stream.into_split();
            let mut reader = BufReader::new(read_half);
            write_half.write_all(greeting.as_bytes()).await.unwrap();

            let mut received = Vec::new();
            for reply in replies {
                let mut line = String::new();
                if reader.read_line(&mut line).await.unwrap() == 0 {
                    break;
                }
                received.push(line.trim_end().to_string());
                write_half.write_all(reply.as_bytes()).await.unwrap();
            }
            received
        });

        (address, handle)
    }

    #[test]
    fn test_parse_greeting() {
        assert_eq!(parse_greeting("OK MPD 0.23.5").unwrap(), "0.23.5");
        assert!(matches!(
            parse_greeting("HTTP/1.1 400 Bad Request"),
            Err(Error::SourceFetch(_))
        ));
    }

    #[test]
    fn test_files_from_listing_skips_directories() {
        let lines: Vec<String> = [
            "directory: Abba",
            "directory: Abba/Arrival",
            "file: Abba/Arrival/01.mp3",
            "file: Abba/Arrival/02.mp3",
            "playlist: favourites.m3u",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(
            files_from_listing(&lines),
            vec!["Abba/Arrival/01.mp3", "Abba/Arrival/02.mp3"]
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[tokio::test]
    async fn test_listall_against_fake_daemon() {
        let (address, daemon) = fake_daemon(
            "OK MPD 0.23.5\n",
            vec!["directory: Abba\nfile: Abba/Arrival/01.mp3\nfile: Best Of/01.mp3\nOK\n"],
        )
        .await;

        let client = MpdClient::new(address, None, Duration::from_secs(5));
        let files = client.list_files().await.unwrap();
        assert_eq!(files, vec!["Abba/Arrival/01.mp3", "Best Of/01.mp3"]);

        assert_eq!(daemon.await.unwrap(), vec!["listall"]);
    }

    #[tokio::test]
    async fn test_password_sent_before_listall() {
        let (address, daemon) = fake_daemon(
            "OK MPD 0.23.5\n",
            vec!["OK\n", "file: A/B/c.mp3\nOK\n"],
        )
        .await;

        let client = MpdClient::new(address, Some("s3cret".to_string()), Duration::from_secs(5));
        let files = client.list_files().await.unwrap();
        assert_eq!(files, vec!["A/B/c.mp3"]);

        assert_eq!(
            daemon.await.unwrap(),
            vec!["password \"s3cret\"", "listall"]
        );
    }

    #[tokio::test]
    async fn test_ack_is_fetch_error() {
        let (address, _daemon) = fake_daemon(
            "OK MPD 0.23.5\n",
            vec!["ACK [3@0] {password} incorrect password\n"],
        )
        .await;

        let client = MpdClient::new(address, Some("wrong".to_string()), Duration::from_secs(5));
        match client.list_files().await {
            Err(Error::SourceFetch(msg)) => assert!(msg.contains("incorrect password")),
            other => panic!("expected SourceFetch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let client = MpdClient::new(address, None, Duration::from_secs(5));
        let err = client.list_files().await.unwrap_err();
        assert!(matches!(err, Error::SourceFetch(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_silent_daemon_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let _hold = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = MpdClient::new(address, None, Duration::from_millis(100));
        match client.list_files().await {
            Err(Error::SourceFetch(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
