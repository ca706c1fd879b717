//! One-shot background execution of generation scripts.
//!
//! The caller's thread owns the [`Dispatcher`] and the [`StatusSink`]. Each
//! trigger disables the controls, shows the progress message and hands the
//! blocking script run to a fresh worker thread. The worker reports back over
//! a channel; the caller applies the completion on its own thread with
//! [`Dispatcher::wait_for_completion`] or [`Dispatcher::try_complete`].
//! At most one script is in flight: a second trigger is rejected, never queued.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};

use crate::actions::{ActionCatalog, GenerateAction, ScriptDescriptor};
use crate::error::Error::{GenerationInFlight, NothingInFlight};
use crate::error::Result;
use crate::execution::{run_script, RunResult, ScriptInvocation};
use crate::status::{Status, StatusSink};

const WORKER_NAME: &str = "microgen-worker";

/// Everything needed to run one action for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub action: GenerateAction,
    pub model: String,
    pub project_directory: PathBuf,
    pub interpreter: PathBuf,
    pub scripts_root: PathBuf,
}

impl GenerationRequest {
    #[must_use]
    pub fn invocation(&self, descriptor: &ScriptDescriptor) -> ScriptInvocation {
        ScriptInvocation::new(
            descriptor,
            &self.model,
            &self.project_directory,
            &self.interpreter,
            &self.scripts_root,
        )
    }
}

/// What a worker sends back once its script has finished.
#[derive(Debug)]
pub struct Completion {
    pub status: Status,
    pub run_result: Option<RunResult>,
}

#[derive(Debug, Default)]
pub struct Dispatcher {
    pending: Option<Receiver<Completion>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts `request` on a worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationInFlight`] if a previous trigger has not completed yet,
    /// or an IO error if the worker thread could not be started.
    pub fn trigger<S: StatusSink + ?Sized>(
        &mut self,
        catalog: &ActionCatalog,
        request: &GenerationRequest,
        sink: &mut S,
    ) -> Result<()> {
        if self.is_in_flight() {
            return Err(GenerationInFlight);
        }

        let descriptor = catalog.resolve(request.action, &request.model);

        sink.set_controls_enabled(false);
        sink.show_status(&Status::progress(&descriptor));

        let (sender, receiver) = mpsc::channel();

        if !descriptor.is_runnable() {
            // Nothing to spawn; the generic message is the whole result.
            let _ = sender.send(Completion {
                status: Status::failure(descriptor.success_message.clone()),
                run_result: None,
            });
            self.pending = Some(receiver);
            return Ok(());
        }

        let invocation = request.invocation(&descriptor);
        let spawned = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                let outcome = run_script(&invocation);
                let status = Status::from_outcome(&descriptor, &outcome);
                let completion = Completion {
                    status,
                    run_result: outcome.ok(),
                };

                if sender.send(completion).is_err() {
                    debug!("Dispatcher dropped before the script finished");
                }
            });

        if let Err(e) = spawned {
            sink.show_status(&Status::failure(format!(
                "Failed to start generation worker: {e}"
            )));
            sink.set_controls_enabled(true);
            return Err(e.into());
        }

        self.pending = Some(receiver);
        Ok(())
    }

    /// Blocks until the in-flight script finishes, then applies its status
    /// and re-enables the controls.
    ///
    /// # Errors
    ///
    /// Returns [`NothingInFlight`] if nothing was triggered.
    pub fn wait_for_completion<S: StatusSink + ?Sized>(&mut self, sink: &mut S) -> Result<Completion> {
        let receiver = self.pending.take().ok_or(NothingInFlight)?;

        let completion = receiver.recv().unwrap_or_else(|_| worker_lost());
        Ok(Self::apply(completion, sink))
    }

    /// Applies the completion if the script has finished, without blocking.
    pub fn try_complete<S: StatusSink + ?Sized>(&mut self, sink: &mut S) -> Option<Completion> {
        let receiver = self.pending.take()?;

        match receiver.try_recv() {
            Ok(completion) => Some(Self::apply(completion, sink)),
            Err(TryRecvError::Empty) => {
                self.pending = Some(receiver);
                None
            }
            Err(TryRecvError::Disconnected) => Some(Self::apply(worker_lost(), sink)),
        }
    }

    fn apply<S: StatusSink + ?Sized>(completion: Completion, sink: &mut S) -> Completion {
        sink.show_status(&completion.status);
        sink.set_controls_enabled(true);
        completion
    }
}

fn worker_lost() -> Completion {
    warn!("Generation worker stopped without reporting a result");
    Completion {
        status: Status::failure("Generation worker stopped without reporting a result"),
        run_result: None,
    }
}
