//! Scan command implementation

use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use pagescope_core::{MemorySize, ProcessId};
use pagescope_mntns::{mount_ns_of, MountView};
use pagescope_resident::{file_residency, ResidencyStats};
use tracing::{debug, info};

pub async fn execute(pid: Option<i32>, json: bool, files: Vec<PathBuf>) -> Result<()> {
    let stats = match pid {
        Some(raw) => {
            if raw <= 0 {
                anyhow::bail!("Target PID must be positive, got: {raw}");
            }
            let target = ProcessId::from_raw(raw);

            // Entering another mount namespace needs CAP_SYS_ADMIN; tell the
            // user up front instead of failing halfway into the sequence
            let needs_entry = mount_ns_of(ProcessId::current()) != mount_ns_of(target);
            if needs_entry && !nix::unistd::geteuid().is_root() {
                anyhow::bail!(
                    "Must run as root to enter another process's mount namespace. \
                     Try: sudo pagescope scan --pid {raw} ..."
                );
            }

            scan_in_target_view(target, files)?
        }
        None => scan_files(&files)?,
    };

    report(&stats, json)
}

/// Run the switch-and-scan sequence on a dedicated OS thread.
///
/// setns(2) rebinds the calling OS thread for good. A thread from a shared
/// pool must never be handed over to the target namespace, so spawn a named
/// throwaway thread, scan on it, and let it exit with the binding.
fn scan_in_target_view(target: ProcessId, files: Vec<PathBuf>) -> Result<Vec<ResidencyStats>> {
    let handle = thread::Builder::new()
        .name("mount-view".into())
        .spawn(move || -> Result<Vec<ResidencyStats>> {
            let view =
                MountView::acquire(target).context("Failed to enter target mount namespace")?;

            if view.switched() {
                info!(pid = %target, namespace = ?view.namespace(), "observing target mount view");
            } else {
                debug!(pid = %target, "target shares our mount view");
            }

            scan_files(&files)
        })
        .context("Failed to spawn mount view thread")?;

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("Mount view thread panicked"))?
}

fn scan_files(files: &[PathBuf]) -> Result<Vec<ResidencyStats>> {
    let mut all = Vec::with_capacity(files.len());

    for file in files {
        let stats = file_residency(file)
            .with_context(|| format!("Failed to scan {}", file.display()))?;
        all.push(stats);
    }

    Ok(all)
}

fn report(stats: &[ResidencyStats], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("\n📄 Page cache residency");
    println!("{:-<80}", "");
    for entry in stats {
        println!("{entry}");
    }
    println!("{:-<80}", "");

    let pages: usize = stats.iter().map(|s| s.pages).sum();
    let resident: usize = stats.iter().map(|s| s.resident).sum();
    let size = stats
        .iter()
        .fold(MemorySize::default(), |total, s| total + s.size);
    #[allow(clippy::cast_precision_loss)]
    let percent = if pages == 0 {
        0.0
    } else {
        resident as f64 / pages as f64 * 100.0
    };

    println!(
        "Total: {} files, {size}, {resident}/{pages} pages resident ({percent:.1}%)",
        stats.len()
    );

    Ok(())
}
