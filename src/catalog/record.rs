use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Display format for an entry's last-modified time.
pub const LAST_MODIFIED_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One previewable prefab as reported by the asset store.
///
/// Records are equal when they point at the same prefab path.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    /// Display name (file stem of the prefab)
    pub name: String,
    /// Location of the prefab; primary key for every mutation
    pub path: PathBuf,
    /// Last modification time, used for ordering and display only
    pub last_modified: DateTime<Local>,
    /// Location of the preview image shown as the thumbnail
    pub preview: PathBuf,
}

impl AssetRecord {
    pub fn last_modified_label(&self) -> String {
        self.last_modified.format(LAST_MODIFIED_FORMAT).to_string()
    }
}

impl PartialEq for AssetRecord {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for AssetRecord {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at(secs: i64) -> AssetRecord {
        let path = PathBuf::from("Assets/Chair.prefab");
        AssetRecord {
            name: "Chair".to_string(),
            preview: path.with_extension("png"),
            path,
            last_modified: Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_equality_ignores_last_modified() {
        assert_eq!(record_at(0), record_at(60));
    }

    #[test]
    fn test_equality_uses_path() {
        let mut other = record_at(0);
        other.path = PathBuf::from("Assets/Props/Chair.prefab");
        assert_ne!(record_at(0), other);
    }

    #[test]
    fn test_last_modified_label_format() {
        let record = AssetRecord {
            last_modified: Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap(),
            ..record_at(0)
        };
        assert_eq!(record.last_modified_label(), "2024/03/05 07:08:09");
    }
}
