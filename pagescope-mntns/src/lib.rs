//! Mount-namespace comparison and entry
//!
//! Containerized processes see the filesystem through their own mount
//! namespace. To observe their files under the paths they use, the
//! observing thread has to join that namespace first; resolving the same
//! paths in the host namespace silently yields the wrong files.
//!
//! This crate provides:
//! - [`mount_ns_of`] - read the mount-namespace identity of a process
//! - [`MountView`] - enter a target's mount namespace when it differs from
//!   ours, returned as a capability bound to the calling OS thread
//!
//! Namespace membership is a property of the OS thread, not the process,
//! and entering another namespace is irreversible here: no handle to the
//! previous namespace is retained, so there is no way back for that thread.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod id;
pub mod view;

pub use id::{mount_ns_of, MntNsId};
pub use view::MountView;
