//! Input folder watching and the keep-alive console loop.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::runner::{Processor, is_report_file};

/// Messages delivered to the keep-alive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// A report file appeared in the input folder.
    Created(PathBuf),
    Quit,
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("cannot watch input folder: {0}")]
    Notify(#[from] notify::Error),
}

/// Watches the input folder and processes each new report until the user
/// types `q` or stdin closes. In-flight reports finish before returning.
///
/// # Errors
///
/// Returns a `WatchError` if the folder watcher cannot be started.
pub fn watch_until_quit(processor: Arc<Processor>) -> Result<(), WatchError> {
    let (tx, rx) = mpsc::channel();

    let events = tx.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) if event.kind.is_create() => {
                for path in event.paths.into_iter().filter(|p| is_report_file(p)) {
                    let _ = events.send(Signal::Created(path));
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "folder watch error"),
        },
        notify::Config::default(),
    )?;

    let folder = &processor.config().paths.input_folder;
    watcher.watch(folder, RecursiveMode::NonRecursive)?;
    info!(folder = %folder.display(), "monitoring input folder for XML files");
    info!("type 'q' and press Enter to quit");

    thread::spawn(move || listen_for_quit(io::stdin().lock(), &tx));

    let poll = Duration::from_millis(processor.config().watch.poll_interval_ms);
    let mut workers: Vec<JoinHandle<()>> = Vec::new();
    keep_alive(&rx, poll, |path| {
        workers.retain(|w| !w.is_finished());
        let p = Arc::clone(&processor);
        workers.push(thread::spawn(move || {
            p.handle_file(&path);
        }));
    });

    drop(watcher);
    for worker in workers {
        if worker.join().is_err() {
            warn!("report worker panicked");
        }
    }
    info!("exiting");
    Ok(())
}

/// Runs until `Quit` arrives or every sender is gone, handing each created
/// path to `on_created`.
pub fn keep_alive(rx: &Receiver<Signal>, poll: Duration, mut on_created: impl FnMut(PathBuf)) {
    loop {
        match rx.recv_timeout(poll) {
            Ok(Signal::Created(path)) => {
                debug!(file = %path.display(), "report created");
                on_created(path);
            }
            Ok(Signal::Quit) | Err(RecvTimeoutError::Disconnected) => return,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

/// Reads lines from `input` and sends `Quit` on a `q` line or end of input.
pub fn listen_for_quit(input: impl BufRead, tx: &Sender<Signal>) {
    for line in input.lines() {
        match line {
            Ok(l) if l.trim().eq_ignore_ascii_case("q") => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "cannot read console input");
                break;
            }
        }
    }
    let _ = tx.send(Signal::Quit);
}
