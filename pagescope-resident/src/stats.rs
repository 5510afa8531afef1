//! Per-file residency statistics

use std::fmt;
use std::path::{Path, PathBuf};

use pagescope_core::MemorySize;
use serde::{Deserialize, Serialize};

/// Page-cache residency figures for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidencyStats {
    /// File the figures describe
    pub path: PathBuf,

    /// File size
    pub size: MemorySize,

    /// Number of pages the file spans
    pub pages: usize,

    /// Pages currently resident in the page cache
    pub resident: usize,

    /// Page size the probe used, in bytes
    pub page_size: usize,
}

impl ResidencyStats {
    pub(crate) fn new(
        path: &Path,
        size: u64,
        pages: usize,
        resident: usize,
        page_size: usize,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            size: MemorySize::from_bytes(size),
            pages,
            resident,
            page_size,
        }
    }

    pub(crate) fn empty(path: &Path, page_size: usize) -> Self {
        Self::new(path, 0, 0, 0, page_size)
    }

    /// Bytes of the file resident in the page cache
    #[must_use]
    pub fn resident_bytes(&self) -> MemorySize {
        MemorySize::from_bytes((self.resident * self.page_size) as u64)
    }

    /// Percentage of the file's pages that are resident
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.pages == 0 {
            0.0
        } else {
            self.resident as f64 / self.pages as f64 * 100.0
        }
    }
}

impl fmt::Display for ResidencyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<44} {:>10} {:>7}/{:<7} {:>5.1}%",
            self.path.display().to_string(),
            self.size.to_string(),
            self.resident,
            self.pages,
            self.percent()
        )
    }
}
