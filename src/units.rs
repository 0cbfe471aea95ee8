const MEBI: u64 = 1024 * 1024;
const GIBI: u64 = MEBI * 1024;

/// Renders a byte count in the largest binary unit it reaches (bytes, MiB or GiB).
pub fn format_bytes(size: u64) -> String {
    if size < MEBI {
        format!("{size} bytes")
    } else if size < GIBI {
        format!("{:.1} MiB", size as f64 / MEBI as f64)
    } else {
        format!("{:.1} GiB", size as f64 / GIBI as f64)
    }
}
