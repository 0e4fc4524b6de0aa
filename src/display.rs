//! # Status Display
//!
//! A listener that renders the shelf snapshot every time an order lands on a
//! shelf or is picked up.

use crate::events::EventListener;
use crate::model::{Order, ShelfSetStatus, ShelfType};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

const BANNER: &str = "----- Kitchen Display -----";

/// Display choice as written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTarget {
    #[default]
    Log,
    Print,
    File,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplaySink {
    /// `tracing::info!` at the `info` level.
    Log,
    /// Standard output.
    Print,
    /// Overwrites the file with the latest snapshot.
    File(PathBuf),
}

enum FileCommand {
    Write(String),
    Flush(oneshot::Sender<()>),
}

/// Writes snapshots on its own task, in the order they were rendered, so a
/// slow disk never holds up event delivery.
struct FileWriter {
    sender: mpsc::UnboundedSender<FileCommand>,
}

impl FileWriter {
    fn spawn(path: PathBuf) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                match command {
                    FileCommand::Write(json) => match tokio::fs::write(&path, json).await {
                        Ok(()) => debug!(path = %path.display(), "Display file updated"),
                        Err(e) => error!(path = %path.display(), error = %e, "Failed to write display file"),
                    },
                    FileCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });
        Self { sender }
    }

    fn write(&self, json: String) {
        if self.sender.send(FileCommand::Write(json)).is_err() {
            error!("Display file writer stopped, snapshot dropped");
        }
    }

    async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(FileCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

pub struct StatusDisplay {
    sink: DisplaySink,
    writer: Option<FileWriter>,
}

impl StatusDisplay {
    /// A [`DisplaySink::File`] spawns its writer task, so this must run inside a
    /// Tokio runtime for that sink.
    pub fn new(sink: DisplaySink) -> Self {
        let writer = match &sink {
            DisplaySink::File(path) => Some(FileWriter::spawn(path.clone())),
            DisplaySink::Log | DisplaySink::Print => None,
        };
        Self { sink, writer }
    }

    /// `None` when the target is [`DisplayTarget::None`].
    pub fn for_target(target: DisplayTarget, file: impl Into<PathBuf>) -> Option<Self> {
        let sink = match target {
            DisplayTarget::Log => DisplaySink::Log,
            DisplayTarget::Print => DisplaySink::Print,
            DisplayTarget::File => DisplaySink::File(file.into()),
            DisplayTarget::None => return None,
        };
        Some(Self::new(sink))
    }

    pub fn sink(&self) -> &DisplaySink {
        &self.sink
    }

    pub fn render(&self, status: &ShelfSetStatus) {
        let json = match status.to_json_pretty() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize shelf status");
                return;
            }
        };

        match &self.sink {
            DisplaySink::Log => info!("\n{BANNER}\n{json}\n"),
            DisplaySink::Print => println!("{BANNER}\n{json}\n"),
            DisplaySink::File(_) => {
                if let Some(writer) = &self.writer {
                    writer.write(json);
                }
            }
        }
    }

    /// Waits until every snapshot rendered so far has reached the file.
    pub async fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush().await;
        }
    }
}

impl EventListener for StatusDisplay {
    fn on_order_added_to_shelf(&self, _order: &Order, _shelf: ShelfType, status: &ShelfSetStatus) {
        self.render(status);
    }

    fn on_order_picked_up(&self, _order: &Order, _courier: &str, status: &ShelfSetStatus) {
        self.render(status);
    }
}
