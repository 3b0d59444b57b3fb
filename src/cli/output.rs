use crate::file::FileStat;
use chrono::{DateTime, Utc};

/// Format bytes into human-readable string (KB, MB, GB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format stat information for display (human or JSON)
pub fn format_stat(stat: &FileStat, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(stat).unwrap_or_else(|_| "{}".to_string());
    }

    let kind = match stat.kind() {
        crate::file::EntryKind::File => "file",
        crate::file::EntryKind::Directory => "directory",
        crate::file::EntryKind::Symlink => "symlink",
        crate::file::EntryKind::Other => "other",
    };

    let mut output = String::new();
    output.push_str(&format!("Type: {}\n", kind));
    output.push_str(&format!("Size: {} ({} bytes)\n", format_bytes(stat.len()), stat.len()));
    output.push_str(&format!("Read-only: {}\n", stat.readonly()));
    output.push_str(&format!("Modified: {}\n", format_time(stat.modified())));
    output.push_str(&format!("Accessed: {}\n", format_time(stat.accessed())));
    output.push_str(&format!("Created: {}", format_time(stat.created())));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_format_stat_human() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();
        let stat = FileStat::from(std::fs::symlink_metadata(&path).unwrap());

        let text = format_stat(&stat, false);
        assert!(text.starts_with("Type: file\n"));
        assert!(text.contains("Size: 5 B (5 bytes)"));
    }

    #[test]
    fn test_format_stat_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let stat = FileStat::from(std::fs::symlink_metadata(temp_dir.path()).unwrap());

        let value: serde_json::Value = serde_json::from_str(&format_stat(&stat, true)).unwrap();
        assert_eq!(value["kind"], "directory");
    }
}
