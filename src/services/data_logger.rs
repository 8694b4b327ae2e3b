use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::{PlaybackEvent, TrackId, UserId};

const DATA_LOG_FILE: &str = "data.jsonl";

/// One served request, as recorded for offline analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Datum {
    pub message: &'static str,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub user: UserId,
    pub track: TrackId,
    pub time: f64,
    /// Seconds spent serving the request
    pub latency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<TrackId>,
}

impl Datum {
    pub fn next(user: UserId, event: PlaybackEvent, latency: f64, recommendation: TrackId) -> Self {
        Self {
            message: "next",
            timestamp: Utc::now().timestamp_millis(),
            user,
            track: event.track,
            time: event.time,
            latency,
            recommendation: Some(recommendation),
        }
    }

    pub fn last(user: UserId, event: PlaybackEvent, latency: f64) -> Self {
        Self {
            message: "last",
            timestamp: Utc::now().timestamp_millis(),
            user,
            track: event.track,
            time: event.time,
            latency,
            recommendation: None,
        }
    }
}

/// Where logged events end up
#[derive(Debug, Clone)]
pub enum EventSink {
    /// Append JSON lines to `data.jsonl` in this directory
    Directory(PathBuf),
    /// Emit events through tracing
    Tracing,
}

impl From<Option<PathBuf>> for EventSink {
    fn from(dir: Option<PathBuf>) -> Self {
        dir.map(EventSink::Directory).unwrap_or(EventSink::Tracing)
    }
}

enum Writer {
    File(File),
    Tracing,
}

impl Writer {
    async fn open(sink: EventSink) -> Self {
        let EventSink::Directory(dir) = sink else {
            return Writer::Tracing;
        };

        let path = dir.join(DATA_LOG_FILE);
        let opened = async {
            tokio::fs::create_dir_all(&dir).await?;
            OpenOptions::new().create(true).append(true).open(&path).await
        };

        match opened.await {
            Ok(file) => {
                tracing::info!(path = %path.display(), "Data log opened");
                Writer::File(file)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    "Failed to open data log, using tracing"
                );
                Writer::Tracing
            }
        }
    }

    async fn write(&mut self, datum: &Datum) {
        let line = match serde_json::to_string(datum) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Datum serialization error");
                return;
            }
        };

        match self {
            Writer::File(file) => {
                let written = async {
                    file.write_all(line.as_bytes()).await?;
                    file.write_all(b"\n").await
                };
                if let Err(e) = written.await {
                    tracing::error!(error = %e, "Failed to write data log");
                }
            }
            Writer::Tracing => {
                tracing::info!(target: "botify_api::data", datum = %line, "{}", datum.message);
            }
        }
    }

    async fn flush(&mut self) {
        if let Writer::File(file) = self {
            if let Err(e) = file.flush().await {
                tracing::error!(error = %e, "Failed to flush data log");
            }
        }
    }
}

/// Records served requests without blocking the response
#[derive(Clone)]
pub struct DataLogger {
    tx: mpsc::UnboundedSender<Datum>,
}

/// Handle for gracefully shutting down the data logger
pub struct DataLoggerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl DataLoggerHandle {
    /// Stops the writer task after it has written every queued event
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Data logger task failed");
        }
    }
}

impl DataLogger {
    /// Spawns the background writer task. Must be called inside a Tokio runtime.
    pub fn new(sink: EventSink) -> (Self, DataLoggerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            Self::writer_task(sink, rx, shutdown_rx).await;
        });

        (Self { tx }, DataLoggerHandle { shutdown_tx, task })
    }

    /// Queues an event; never blocks and never fails the caller
    pub fn log(&self, datum: Datum) {
        if let Err(e) = self.tx.send(datum) {
            tracing::error!(error = %e, "Failed to queue data log event");
        }
    }

    async fn writer_task(
        sink: EventSink,
        mut rx: mpsc::UnboundedReceiver<Datum>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut writer = Writer::open(sink).await;

        loop {
            tokio::select! {
                Some(datum) = rx.recv() => {
                    writer.write(&datum).await;
                }
                Some(()) = shutdown_rx.recv() => {
                    let mut flushed = 0;
                    while let Ok(datum) = rx.try_recv() {
                        writer.write(&datum).await;
                        flushed += 1;
                    }
                    writer.flush().await;

                    tracing::info!(flushed, "Data logger stopped");
                    break;
                }
                // Every logger and the handle are gone
                else => {
                    writer.flush().await;
                    break;
                }
            }
        }
    }
}
