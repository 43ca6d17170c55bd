//! Background diff loading
//!
//! Diff previews are fetched on tokio's blocking pool so the event loop never
//! waits on git. Results come back over an mpsc channel and are drained by
//! the loop each tick.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::git::{FileStatus, Git};
use crate::selector::{DiffReady, DiffRequest};

/// Produces the preview text for one file
pub trait DiffSource: Send + Sync + 'static {
    fn load(&self, path: &str, status: FileStatus) -> String;
}

impl DiffSource for Git {
    fn load(&self, path: &str, status: FileStatus) -> String {
        self.preview_diff(path, status)
    }
}

/// Runs diff loads off the event loop thread
pub struct DiffLoader<S: DiffSource> {
    runtime: Handle,
    source: Arc<S>,
    tx: UnboundedSender<DiffReady>,
    rx: UnboundedReceiver<DiffReady>,
}

impl<S: DiffSource> DiffLoader<S> {
    pub fn new(runtime: Handle, source: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            source,
            tx,
            rx,
        }
    }

    /// Start loading the diff described by `request`
    pub fn request(&self, request: DiffRequest) {
        debug!(index = request.index, path = %request.path, "loading diff");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            let text = source.load(&request.path, request.status);
            // The receiver only goes away when the selector has exited
            if tx.send(DiffReady { index: request.index, text }).is_err() {
                warn!(path = %request.path, "diff finished after selector closed");
            }
        });
    }

    /// Next finished load, if any
    pub fn poll(&mut self) -> Option<DiffReady> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::mpsc as std_mpsc;
    use std::time::{Duration, Instant};

    use tokio::runtime::{Builder, Runtime};

    use super::*;

    fn runtime() -> Runtime {
        Builder::new_current_thread().enable_all().build().unwrap()
    }

    fn wait_for<S: DiffSource>(loader: &mut DiffLoader<S>) -> DiffReady {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(ready) = loader.poll() {
                return ready;
            }
            assert!(Instant::now() < deadline, "diff load never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    struct Echo;

    impl DiffSource for Echo {
        fn load(&self, path: &str, status: FileStatus) -> String {
            format!("{} {}", status, path)
        }
    }

    /// Blocks each load until released, so completion order can be forced
    struct Gated {
        gates: Mutex<Vec<(String, std_mpsc::Receiver<()>)>>,
    }

    impl DiffSource for Gated {
        fn load(&self, path: &str, _status: FileStatus) -> String {
            let gate = {
                let mut gates = self.gates.lock().unwrap();
                let pos = gates.iter().position(|(p, _)| p == path).unwrap();
                gates.remove(pos).1
            };
            gate.recv().unwrap();
            path.to_string()
        }
    }

    fn request(index: usize, path: &str) -> DiffRequest {
        DiffRequest {
            index,
            path: path.to_string(),
            status: FileStatus::Unstaged,
        }
    }

    #[test]
    fn test_delivers_tagged_result() {
        let rt = runtime();
        let mut loader = DiffLoader::new(rt.handle().clone(), Arc::new(Echo));
        assert!(loader.poll().is_none());

        loader.request(DiffRequest {
            index: 3,
            path: "src/lib.rs".to_string(),
            status: FileStatus::Staged,
        });

        let ready = wait_for(&mut loader);
        assert_eq!(ready.index, 3);
        assert_eq!(ready.text, "staged src/lib.rs");
    }

    #[test]
    fn test_out_of_order_completion() {
        let rt = runtime();
        let (release_a, gate_a) = std_mpsc::channel();
        let (release_b, gate_b) = std_mpsc::channel();
        let source = Gated {
            gates: Mutex::new(vec![("a".to_string(), gate_a), ("b".to_string(), gate_b)]),
        };
        let mut loader = DiffLoader::new(rt.handle().clone(), Arc::new(source));

        loader.request(request(0, "a"));
        loader.request(request(1, "b"));

        release_b.send(()).unwrap();
        let first = wait_for(&mut loader);
        assert_eq!((first.index, first.text.as_str()), (1, "b"));

        release_a.send(()).unwrap();
        let second = wait_for(&mut loader);
        assert_eq!((second.index, second.text.as_str()), (0, "a"));
    }

    #[test]
    fn test_git_source_reports_errors_as_text() {
        let Some((_dir, git)) = crate::git::testing::scratch_repo() else {
            return;
        };
        let text = git.load("missing.txt", FileStatus::Untracked);
        assert!(text.starts_with("Error loading diff: "));
    }
}
