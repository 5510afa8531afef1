//! Mount-namespace identity lookup

use std::fmt;
use std::fs;

use pagescope_core::ProcessId;
use tracing::debug;

/// Identity of a mount namespace, as exposed by the kernel in the target of
/// the `/proc/<pid>/ns/mnt` symbolic link (`mnt:[<number>]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct MntNsId(u64);

impl MntNsId {
    /// Create from the raw namespace number
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw namespace number
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MntNsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the mount-namespace identity of a process.
///
/// Returns `None` when the namespace link cannot be read: the process is
/// gone, the caller lacks permission, or the kernel has no namespace
/// support. Callers treat `None` as "no distinct namespace" so that such
/// environments degrade to plain same-view operation instead of failing.
///
/// # Panics
///
/// Panics if the link is readable but its target does not embed a decimal
/// namespace number. That means the kernel interface changed under us and
/// every later path lookup would be suspect.
#[must_use]
pub fn mount_ns_of(pid: ProcessId) -> Option<MntNsId> {
    let link = format!("/proc/{pid}/ns/mnt");

    let target = match fs::read_link(&link) {
        Ok(target) => target,
        Err(e) => {
            debug!(pid = %pid, error = %e, "cannot read mount namespace link");
            return None;
        }
    };

    let target = target.to_string_lossy();
    if target.is_empty() {
        return None;
    }

    Some(parse_mnt_link(&target))
}

/// Extract the namespace number from a `mnt:[<number>]` link target.
pub(crate) fn parse_mnt_link(target: &str) -> MntNsId {
    let digits = target
        .strip_prefix("mnt:[")
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(target);

    match digits.parse::<u64>() {
        Ok(id) => MntNsId::from_raw(id),
        Err(e) => panic!("malformed mount namespace link target {target:?}: {e}"),
    }
}
