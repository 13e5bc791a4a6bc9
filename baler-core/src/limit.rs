use sysinfo::System;

pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Upper bound for the artifact cap: a quarter of physical memory, in MiB.
/// Returns 0 when the host cannot report its memory.
pub fn memory_ceiling_mib() -> u64 {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.total_memory() / BYTES_PER_MIB / 4
}

/// Clamp a requested per-artifact size (MiB) to the memory ceiling. An
/// unreadable ceiling leaves the request untouched.
pub fn clamp_to_memory(requested_mib: u64) -> u64 {
    let ceiling = memory_ceiling_mib();
    if ceiling == 0 {
        return requested_mib;
    }
    requested_mib.min(ceiling)
}
