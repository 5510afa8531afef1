//! Mount-view acquisition
//!
//! Entering another process's mount namespace rebinds the calling OS
//! thread. The [`MountView`] returned here is the witness of that binding:
//! it is not `Send`, so it cannot leave the thread whose namespace
//! membership it describes.

use std::fs::File;
use std::marker::PhantomData;
use std::os::fd::AsFd;

use nix::sched::{setns, unshare, CloneFlags};
use pagescope_core::{Error, ProcessId, Result};
use tracing::{debug, info};

use crate::id::{mount_ns_of, MntNsId};

/// Capability witnessing that the current OS thread observes the mount view
/// of a target process.
///
/// Acquiring a view compares our own mount namespace with the target's and
/// performs the entry sequence only when they differ. The comparison treats
/// two undetermined namespaces as equal, so hosts without namespace support
/// degrade to a no-op instead of an error.
///
/// The binding is permanent for the thread: no handle to the previous
/// namespace is kept, dropping the view restores nothing, and every later
/// filesystem operation on this thread resolves paths in the entered
/// namespace. Callers that need their old view afterwards must dedicate a
/// throwaway thread to the acquisition.
#[derive(Debug)]
pub struct MountView {
    target: ProcessId,
    namespace: Option<MntNsId>,
    switched: bool,
    // membership belongs to the acquiring OS thread, keep the view there
    _thread_bound: PhantomData<*const ()>,
}

impl MountView {
    /// Acquire the mount view of `target` on the current OS thread.
    ///
    /// No-op when the target already shares our mount namespace (including
    /// the degenerate case where neither namespace can be determined).
    /// Otherwise runs the entry sequence: unshare the filesystem context,
    /// open the target's namespace handle, attach with `setns(2)`.
    ///
    /// Failures of the entry sequence are propagated; a partially executed
    /// sequence is not rolled back.
    pub fn acquire(target: ProcessId) -> Result<Self> {
        let ours = mount_ns_of(ProcessId::current());
        let theirs = mount_ns_of(target);

        if ours == theirs {
            debug!(pid = %target, namespace = ?ours, "target shares our mount namespace");
            return Ok(Self {
                target,
                namespace: ours,
                switched: false,
                _thread_bound: PhantomData,
            });
        }

        enter_mount_ns(target)?;

        // The link for our own pid now resolves inside the entered namespace
        let namespace = mount_ns_of(ProcessId::current()).or(theirs);
        info!(pid = %target, namespace = ?namespace, "entered target mount namespace");

        Ok(Self {
            target,
            namespace,
            switched: true,
            _thread_bound: PhantomData,
        })
    }

    /// Target process this view was acquired for
    #[must_use]
    pub const fn target(&self) -> ProcessId {
        self.target
    }

    /// Namespace this view observes, when it could be determined
    #[must_use]
    pub const fn namespace(&self) -> Option<MntNsId> {
        self.namespace
    }

    /// Whether the entry sequence actually ran
    #[must_use]
    pub const fn switched(&self) -> bool {
        self.switched
    }
}

/// Attach the current OS thread to the mount namespace of `target`.
fn enter_mount_ns(target: ProcessId) -> Result<()> {
    // Threads share one filesystem context by default (spawned with
    // CLONE_FS), and setns(CLONE_NEWNS) refuses to move a thread whose
    // context is still shared. Detach ours first; this is what makes the
    // switch per-thread instead of process-wide.
    unshare(CloneFlags::CLONE_FS).map_err(|source| Error::UnshareFs { source })?;

    let handle = File::open(format!("/proc/{target}/ns/mnt"))
        .map_err(|source| Error::OpenNsHandle { pid: target, source })?;

    setns(handle.as_fd(), CloneFlags::CLONE_NEWNS).map_err(|source| Error::SetNs { source })?;

    Ok(())
}
