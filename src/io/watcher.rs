use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Sent from the watcher thread to the TUI loop.
#[derive(Debug)]
pub enum FileEvent {
    /// The workbook file was created, modified or replaced on disk.
    Changed(PathBuf),
}

/// Watches one workbook file. Call [`WorkbookWatcher::poll`] each tick.
pub struct WorkbookWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl WorkbookWatcher {
    /// Watch `path`'s parent directory and report events that touch `path`.
    /// Atomic saves replace the file by rename, so watching the file itself
    /// would lose track of it after the first save.
    pub fn start(path: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let target: Option<OsString> = path.file_name().map(|n| n.to_os_string());
        let reported = path.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                let touches_target = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == target);
                if touches_target {
                    let _ = tx.send(FileEvent::Changed(reported.clone()));
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(WorkbookWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending events without blocking. Bursts collapse to one flag.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(FileEvent::Changed(_)) = self.rx.try_recv() {
            changed = true;
        }
        changed
    }
}
