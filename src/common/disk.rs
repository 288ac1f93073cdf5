use std::mem::MaybeUninit;

/// Disk usage snapshot for the root volume
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
}

impl DiskUsage {
    pub fn used_percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / self.total_bytes as f64 * 100.0
    }
}

/// Read disk usage for the root filesystem via statvfs
pub fn disk_usage() -> Option<DiskUsage> {
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    let path = b"/\0";
    let ret = unsafe { libc::statvfs(path.as_ptr() as *const libc::c_char, stat.as_mut_ptr()) };
    if ret != 0 {
        return None;
    }
    let stat = unsafe { stat.assume_init() };
    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let free = stat.f_bavail as u64 * block_size;
    Some(DiskUsage {
        total_bytes: total,
        free_bytes: free,
        used_bytes: total.saturating_sub(free),
    })
}
