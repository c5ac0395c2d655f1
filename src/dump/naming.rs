use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

pub const DEFAULT_DUMP_DIR: &str = "dumps";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `{database}_{YYYY-MM-DD_HH-mm-ss}.sql`
pub fn dump_filename(database: &str, timestamp: &str) -> String {
    format!("{}_{}.sql", database, timestamp)
}

/// Storage-relative location of the dump. An empty custom path counts
/// as not given.
pub fn relative_path(custom_path: Option<&str>, filename: &str) -> String {
    match custom_path.filter(|p| !p.is_empty()) {
        Some(dir) => format!("{}/{}", dir.trim_end_matches('/'), filename),
        None => format!("{}/{}", DEFAULT_DUMP_DIR, filename),
    }
}

/// Joins a relative path onto the storage root. A leading `/` is
/// treated as relative to the root; `..` components are kept as given.
pub fn resolve_under(storage_root: &Path, relative: &str) -> PathBuf {
    storage_root.join(relative.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_timestamp_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-07_14-05-09");
    }

    #[test]
    fn test_timestamp_uses_local_wall_clock_of_zone() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2023, 12, 31, 23, 59, 1).unwrap();
        assert_eq!(format_timestamp(&at), "2023-12-31_23-59-01");
    }

    #[test]
    fn test_dump_filename() {
        assert_eq!(
            dump_filename("shop", "2024-03-07_14-05-09"),
            "shop_2024-03-07_14-05-09.sql"
        );
    }

    #[test]
    fn test_default_relative_path() {
        assert_eq!(relative_path(None, "a.sql"), "dumps/a.sql");
        assert_eq!(relative_path(Some(""), "a.sql"), "dumps/a.sql");
    }

    #[test]
    fn test_custom_path_trailing_separator_stripped() {
        assert_eq!(relative_path(Some("/backups/"), "a.sql"), "/backups/a.sql");
        assert_eq!(relative_path(Some("nightly///"), "a.sql"), "nightly/a.sql");
        assert_eq!(relative_path(Some("nightly"), "a.sql"), "nightly/a.sql");
    }

    #[test]
    fn test_resolve_stays_under_root() {
        let root = Path::new("/srv/storage/app");
        assert_eq!(
            resolve_under(root, "/backups/a.sql"),
            PathBuf::from("/srv/storage/app/backups/a.sql")
        );
        assert_eq!(
            resolve_under(root, "dumps/a.sql"),
            PathBuf::from("/srv/storage/app/dumps/a.sql")
        );
    }

    #[test]
    fn test_resolve_keeps_parent_components() {
        let root = Path::new("/srv/storage/app");
        assert_eq!(
            resolve_under(root, "../shared/a.sql"),
            PathBuf::from("/srv/storage/app/../shared/a.sql")
        );
    }
}
