use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use dominoes::{PersistedBoard, RoomKey, SyncSink};
use tracing::{trace, warn};

/// Stores every published board as a JSON file under
/// `<directory>/<room>/<player>/snapshot_NNNNNN.json`.
///
/// Writing happens on a background thread, so publishing never waits for
/// the disk. Failed writes are logged and dropped.
pub struct Recorder {
    sender: Option<Sender<(RoomKey, PersistedBoard)>>,
    writer: Option<JoinHandle<usize>>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        let (sender, receiver) = mpsc::channel();
        let writer = thread::Builder::new()
            .name(String::from("recorder"))
            .spawn(move || write_snapshots(&directory, receiver))?;
        Ok(Self {
            sender: Some(sender),
            writer: Some(writer),
        })
    }

    /// Waits for all pending snapshots to be written and returns how many
    /// were written successfully.
    pub fn finish(mut self) -> usize {
        self.shut_down()
    }

    fn shut_down(&mut self) -> usize {
        // Closing the channel ends the writer loop.
        drop(self.sender.take());
        match self.writer.take().map(JoinHandle::join) {
            Some(Ok(written)) => written,
            Some(Err(_)) => {
                warn!("Recorder thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl SyncSink for Recorder {
    fn publish(&mut self, key: &RoomKey, board: &PersistedBoard) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send((key.clone(), board.clone())).is_err() {
            warn!(room = %key, "Recorder thread is gone, snapshot dropped");
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.shut_down();
    }
}

fn write_snapshots(directory: &Path, receiver: Receiver<(RoomKey, PersistedBoard)>) -> usize {
    let mut counters: HashMap<RoomKey, usize> = HashMap::new();
    let mut written = 0;
    for (key, board) in receiver {
        let num = counters.entry(key.clone()).or_insert(0);
        *num += 1;
        let dir = directory.join(&key.room).join(&key.player);
        let path = dir.join(format!("snapshot_{:0>6}.json", num));
        match write_snapshot(&dir, &path, &board) {
            Ok(()) => {
                written += 1;
                trace!(path = %path.display(), "Snapshot written");
            }
            Err(err) => warn!(path = %path.display(), "Error writing snapshot: {:#}", err),
        }
    }
    written
}

fn write_snapshot(dir: &Path, path: &Path, board: &PersistedBoard) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, board)?;
    writer.flush()?;
    Ok(())
}
