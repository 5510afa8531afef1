//! Page-cache residency probing
//!
//! This module uses `unsafe` for mmap(2) and mincore(2), which deal in
//! raw pointers. The mapping is `PROT_NONE` and never dereferenced.

#![allow(unsafe_code)]

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;

use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};
use pagescope_core::{Error, Result};
use tracing::{debug, warn};

use crate::stats::ResidencyStats;

/// Page size reported by the kernel
#[must_use]
pub fn page_size() -> usize {
    // SAFETY: sysconf only reads static kernel configuration
    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    usize::try_from(raw).unwrap_or(4096)
}

/// Probe how much of a file currently sits in the page cache.
///
/// The file is mapped shared with `PROT_NONE`, so the probe itself faults
/// nothing in, then `mincore(2)` reports residency one byte per page.
///
/// # Errors
///
/// Returns an error when the file cannot be opened, is not a regular file,
/// or the mapping or the probe itself fails.
pub fn file_residency(path: impl AsRef<Path>) -> Result<ResidencyStats> {
    let path = path.as_ref();

    let file = File::open(path)?;
    let meta = file.metadata()?;

    if !meta.is_file() {
        return Err(Error::Residency {
            path: path.to_path_buf(),
            message: "not a regular file".to_string(),
        });
    }

    let page = page_size();
    let size = usize::try_from(meta.len()).map_err(|_| Error::Residency {
        path: path.to_path_buf(),
        message: "file too large to map".to_string(),
    })?;

    // mmap rejects zero-length mappings, and there is nothing to probe
    let Some(length) = NonZeroUsize::new(size) else {
        debug!(path = %path.display(), "empty file, nothing resident");
        return Ok(ResidencyStats::empty(path, page));
    };

    let pages = size.div_ceil(page);

    // SAFETY: fresh fd, PROT_NONE mapping that is never dereferenced
    let addr = unsafe {
        mmap(
            None,
            length,
            ProtFlags::PROT_NONE,
            MapFlags::MAP_SHARED,
            &file,
            0,
        )
    }
    .map_err(|e| Error::Residency {
        path: path.to_path_buf(),
        message: format!("mmap failed: {e}"),
    })?;

    let mut residency = vec![0u8; pages];

    // nix carries no mincore wrapper, call libc directly
    // SAFETY: addr and size describe the mapping above; residency holds
    // exactly one byte per page of it
    let rc = unsafe { libc::mincore(addr.as_ptr(), size, residency.as_mut_ptr()) };
    let probed = if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    };

    // Unmap on every path before inspecting the probe result
    // SAFETY: exactly the region mapped above
    if let Err(e) = unsafe { munmap(addr, size) } {
        warn!(path = %path.display(), error = %e, "munmap failed");
    }

    probed.map_err(|e| Error::Residency {
        path: path.to_path_buf(),
        message: format!("mincore failed: {e}"),
    })?;

    let resident = residency.iter().filter(|&&entry| entry & 1 != 0).count();

    debug!(
        path = %path.display(),
        pages,
        resident,
        "probed page cache residency"
    );

    Ok(ResidencyStats::new(path, meta.len(), pages, resident, page))
}
