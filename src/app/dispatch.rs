//! Hand-off queue between helper threads and the geometry thread
//!
//! Geometry reads and writes run on one owning thread. Other threads (a
//! tray or notification loop, for instance) never touch the engine; they
//! submit a [`Command`] through a [`DispatchHandle`] and get a reply
//! receiver back immediately. The owning thread serves commands with
//! [`Dispatcher::pump`] from its own loop, or [`Dispatcher::run`].

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::app::controller::{AppError, GeometryController, WindowSummary};
use crate::domain::window::{CandidateWindow, WindowHandle};
use crate::engine::{BatchReport, ResizeRequest};
use crate::platform::WindowSystem;

/// Work the geometry thread can perform on behalf of another thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListWindows,
    Describe(WindowHandle),
    Resize(ResizeRequest),
}

/// Answer to a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Windows(Result<Vec<CandidateWindow>, AppError>),
    Summary(Result<WindowSummary, AppError>),
    Resized {
        result: Result<BatchReport, AppError>,
        /// Diagnostic lines produced while resizing
        log: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("geometry thread is no longer accepting commands")]
    Closed,
}

struct Envelope {
    command: Command,
    reply: Sender<Reply>,
}

/// Submitting side; cheap to clone and safe to move to other threads
#[derive(Clone)]
pub struct DispatchHandle {
    sender: Sender<Envelope>,
}

impl DispatchHandle {
    /// Queues a command without waiting for it to run
    pub fn submit(&self, command: Command) -> Result<Receiver<Reply>, DispatchError> {
        let (reply, receiver) = unbounded();
        self.sender
            .send(Envelope { command, reply })
            .map_err(|_| DispatchError::Closed)?;
        Ok(receiver)
    }
}

/// Serving side, owned by the geometry thread
pub struct Dispatcher {
    receiver: Receiver<Envelope>,
}

/// Creates a connected handle/dispatcher pair
pub fn channel() -> (DispatchHandle, Dispatcher) {
    let (sender, receiver) = unbounded();
    (DispatchHandle { sender }, Dispatcher { receiver })
}

impl Dispatcher {
    /// Runs every command already queued and returns how many ran
    ///
    /// Never blocks; meant to be called from the owning thread's event loop.
    pub fn pump<S: WindowSystem>(&self, controller: &GeometryController<S>) -> usize {
        let mut served = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(envelope) => {
                    Self::serve(controller, envelope);
                    served += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        served
    }

    /// Serves commands until every [`DispatchHandle`] has been dropped
    pub fn run<S: WindowSystem>(&self, controller: &GeometryController<S>) {
        while let Ok(envelope) = self.receiver.recv() {
            Self::serve(controller, envelope);
        }
        tracing::debug!("dispatcher stopped: all handles dropped");
    }

    fn serve<S: WindowSystem>(controller: &GeometryController<S>, envelope: Envelope) {
        let Envelope { command, reply } = envelope;
        tracing::debug!("serving {:?}", command);

        let answer = match command {
            Command::ListWindows => Reply::Windows(controller.list_windows()),
            Command::Describe(handle) => Reply::Summary(controller.describe(handle)),
            Command::Resize(request) => {
                let mut log: Vec<String> = Vec::new();
                let result = controller.resize(&request, &mut log);
                Reply::Resized { result, log }
            }
        };

        // The requester may have stopped waiting
        if reply.send(answer).is_err() {
            tracing::debug!("reply dropped: requester went away");
        }
    }
}
