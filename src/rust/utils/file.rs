/// Human readable size, e.g. `1.50 Kb`.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes >= MB {
        format!("{:.2} Mb", (bytes as f64) / (MB as f64))
    } else if bytes >= KB {
        format!("{:.2} Kb", (bytes as f64) / (KB as f64))
    } else {
        format!("{} bytes", bytes)
    }
}

/// `1 file`, `3 files`.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
#[path = "test_file.rs"]
mod tests;
