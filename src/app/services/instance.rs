//! One running instance per user session.
//!
//! The first process binds a local socket and keeps serving it on a
//! background thread. Later launches connect, hand over their arguments as
//! a one-line JSON request and exit, so the running controller receives
//! them as ordinary `Activate`/`Open` events.

use std::path::PathBuf;
#[cfg(not(unix))]
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::app::domain::events::AppEvent;
#[cfg(not(unix))]
use crate::app::infrastructure::error::Result;

const SOCKET_FILE: &str = "cherrypad.sock";

/// What a secondary launch asks the running instance to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchRequest {
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl LaunchRequest {
    /// Relative paths are resolved against this process's working
    /// directory, which the running instance does not share.
    pub fn from_event(event: &AppEvent) -> Option<Self> {
        match event {
            AppEvent::Activate => Some(Self::default()),
            AppEvent::Open(files) => Some(Self {
                files: files
                    .iter()
                    .map(|f| std::path::absolute(f).unwrap_or_else(|_| f.clone()))
                    .collect(),
            }),
            _ => None,
        }
    }

    pub fn into_event(self) -> AppEvent {
        if self.files.is_empty() {
            AppEvent::Activate
        } else {
            AppEvent::Open(self.files)
        }
    }
}

/// `$XDG_RUNTIME_DIR/cherrypad.sock`, or the temp dir where there is none.
pub fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_FILE)
}

/// Removes the socket file when the primary instance exits.
#[derive(Debug)]
pub struct InstanceGuard {
    path: Option<PathBuf>,
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if let Some(path) = &self.path
            && let Err(e) = std::fs::remove_file(path)
        {
            log::debug!("Could not remove {}: {}", path.display(), e);
        }
    }
}

#[cfg(unix)]
mod unix {
    use std::fs;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::os::unix::net::{UnixListener, UnixStream};
    use std::path::{Path, PathBuf};
    use std::sync::mpsc::Sender;
    use std::thread;
    use std::time::Duration;

    use super::{InstanceGuard, LaunchRequest};
    use crate::app::domain::events::AppEvent;
    use crate::app::infrastructure::error::Result;

    const READ_TIMEOUT: Duration = Duration::from_secs(2);

    /// Bound socket of the primary instance, not yet serving.
    #[derive(Debug)]
    pub struct InstanceServer {
        listener: UnixListener,
        path: PathBuf,
    }

    /// Become the primary instance, or forward `launch` to the running one.
    /// `Ok(None)` means the request was handed over and this process should
    /// exit.
    pub fn acquire(socket_path: &Path, launch: &AppEvent) -> Result<Option<InstanceServer>> {
        match UnixStream::connect(socket_path) {
            Ok(mut stream) => {
                let request = LaunchRequest::from_event(launch).unwrap_or_default();
                let mut line = serde_json::to_string(&request)?;
                line.push('\n');
                stream.write_all(line.as_bytes())?;
                log::debug!("Forwarded launch to instance at {}", socket_path.display());
                return Ok(None);
            }
            Err(e) => log::debug!("No running instance at {}: {}", socket_path.display(), e),
        }

        // Left behind by a process that did not exit cleanly
        if socket_path.exists() {
            fs::remove_file(socket_path)?;
        }
        if let Some(parent) = socket_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let listener = UnixListener::bind(socket_path)?;
        log::debug!("Primary instance listening on {}", socket_path.display());
        Ok(Some(InstanceServer {
            listener,
            path: socket_path.to_path_buf(),
        }))
    }

    impl InstanceServer {
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Accept forwarded launches on a background thread. Each request is
        /// queued on `events`, then `wake` nudges the host event loop.
        pub fn serve<F>(self, events: Sender<AppEvent>, wake: F) -> Result<InstanceGuard>
        where
            F: Fn() + Send + 'static,
        {
            let InstanceServer { listener, path } = self;
            thread::Builder::new()
                .name("instance-listener".to_string())
                .spawn(move || {
                    for stream in listener.incoming() {
                        let stream = match stream {
                            Ok(stream) => stream,
                            Err(e) => {
                                log::warn!("Instance socket accept failed: {}", e);
                                continue;
                            }
                        };
                        if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
                            log::warn!("Instance socket setup failed: {}", e);
                            continue;
                        }
                        match read_request(stream) {
                            Ok(request) => {
                                if events.send(request.into_event()).is_err() {
                                    break;
                                }
                                wake();
                            }
                            Err(e) => log::warn!("Ignoring malformed launch request: {}", e),
                        }
                    }
                })?;
            Ok(InstanceGuard { path: Some(path) })
        }
    }

    fn read_request(stream: impl Read) -> Result<LaunchRequest> {
        let mut line = String::new();
        BufReader::new(stream).read_line(&mut line)?;
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

#[cfg(unix)]
pub use unix::{InstanceServer, acquire};

/// Platforms without Unix sockets always run as the primary instance.
#[cfg(not(unix))]
#[derive(Debug)]
pub struct InstanceServer;

#[cfg(not(unix))]
pub fn acquire(_socket_path: &std::path::Path, _launch: &AppEvent) -> Result<Option<InstanceServer>> {
    Ok(Some(InstanceServer))
}

#[cfg(not(unix))]
impl InstanceServer {
    pub fn serve<F>(self, _events: Sender<AppEvent>, _wake: F) -> Result<InstanceGuard>
    where
        F: Fn() + Send + 'static,
    {
        Ok(InstanceGuard { path: None })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::net::UnixStream;
    use std::sync::mpsc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_launch_request_from_events() {
        assert_eq!(LaunchRequest::from_event(&AppEvent::Activate), Some(LaunchRequest::default()));
        assert_eq!(LaunchRequest::from_event(&AppEvent::Quit), None);

        let request = LaunchRequest::from_event(&AppEvent::Open(vec![PathBuf::from("notes.ctb")])).unwrap();
        assert!(request.files[0].is_absolute());
        assert!(request.files[0].ends_with("notes.ctb"));

        assert_eq!(LaunchRequest::default().into_event(), AppEvent::Activate);
    }

    #[test]
    fn test_second_launch_is_forwarded_to_primary() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("cp.sock");
        let doc = dir.path().join("a.ctd");

        let server = acquire(&socket, &AppEvent::Activate).unwrap().expect("first launch is primary");
        assert_eq!(server.path(), socket.as_path());

        let (sender, receiver) = mpsc::channel();
        let (wake_tx, wake_rx) = mpsc::channel();
        let _guard = server
            .serve(sender, move || {
                let _ = wake_tx.send(());
            })
            .unwrap();

        let second = acquire(&socket, &AppEvent::Open(vec![doc.clone()])).unwrap();
        assert!(second.is_none());
        assert_eq!(receiver.recv_timeout(WAIT).unwrap(), AppEvent::Open(vec![doc]));

        assert!(acquire(&socket, &AppEvent::Activate).unwrap().is_none());
        assert_eq!(receiver.recv_timeout(WAIT).unwrap(), AppEvent::Activate);
        wake_rx.recv_timeout(WAIT).unwrap();
        wake_rx.recv_timeout(WAIT).unwrap();
    }

    #[test]
    fn test_malformed_request_does_not_stop_listener() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("cp.sock");
        let server = acquire(&socket, &AppEvent::Activate).unwrap().unwrap();
        let (sender, receiver) = mpsc::channel();
        let _guard = server.serve(sender, || {}).unwrap();

        let mut raw = UnixStream::connect(&socket).unwrap();
        raw.write_all(b"not json\n").unwrap();
        drop(raw);

        assert!(acquire(&socket, &AppEvent::Activate).unwrap().is_none());
        assert_eq!(receiver.recv_timeout(WAIT).unwrap(), AppEvent::Activate);
    }

    #[test]
    fn test_stale_socket_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("cp.sock");
        std::fs::write(&socket, b"").unwrap();

        let server = acquire(&socket, &AppEvent::Activate).unwrap();
        assert!(server.is_some());
    }

    #[test]
    fn test_guard_removes_socket_file() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("cp.sock");
        let server = acquire(&socket, &AppEvent::Activate).unwrap().unwrap();
        let (sender, _receiver) = mpsc::channel();
        let guard = server.serve(sender, || {}).unwrap();
        assert!(socket.exists());

        drop(guard);
        assert!(!socket.exists());
    }
}
