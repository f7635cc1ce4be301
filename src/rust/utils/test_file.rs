use super::*;

#[test]
fn test_format_file_size_units() {
    assert_eq!(format_file_size(0), "0 bytes");
    assert_eq!(format_file_size(1023), "1023 bytes");
    assert_eq!(format_file_size(1536), "1.50 Kb");
    assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 Mb");
}

#[test]
fn test_pluralize() {
    assert_eq!(pluralize(1, "file", "files"), "1 file");
    assert_eq!(pluralize(0, "file", "files"), "0 files");
    assert_eq!(pluralize(2, "directory", "directories"), "2 directories");
}
