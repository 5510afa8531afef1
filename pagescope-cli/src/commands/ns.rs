//! Mount namespace inspection command

use anyhow::Result;
use pagescope_core::ProcessId;
use pagescope_mntns::mount_ns_of;

pub async fn execute(pid: Option<i32>) -> Result<()> {
    let target = pid.map_or_else(ProcessId::current, ProcessId::from_raw);

    println!("\n🔒 Mount namespace for PID {target}");
    println!("{:-<60}", "");

    match mount_ns_of(target) {
        Some(ns) => {
            println!("mnt:[{ns}]");

            if pid.is_some() {
                if mount_ns_of(ProcessId::current()) == Some(ns) {
                    println!("\n⚠️  Process is in our mount namespace");
                } else {
                    println!("\n✅ Process has a distinct mount namespace");
                }
            }
        }
        None => {
            println!("undetermined (process gone, permission denied, or no namespace support)");
        }
    }

    Ok(())
}
