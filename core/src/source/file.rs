use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tracing::info;

use crate::input::RepoTarget;
use crate::model::activity::WeeklyActivity;
use crate::source::error::SourceError;
use crate::source::traits::ActivitySource;

/// Reads activity saved from the GitHub endpoint (same JSON shape).
/// The target is only used for logging.
#[derive(Clone)]
pub struct FileActivitySource {
    file_path: PathBuf,
}

impl FileActivitySource {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

impl ActivitySource for FileActivitySource {
    fn fetch(&self, target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError> {
        info!("Reading activity for {} from {}", target, self.file_path.display());
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let weeks = serde_json::from_reader(reader)?;
        Ok(weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("commitmap-test-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_reads_saved_payload() {
        let dir = temp_dir("file-source");
        let path = dir.join("activity.json");
        let weeks = vec![
            WeeklyActivity::new(1_704_067_200, vec![5, 0, 0, 0, 0, 0, 0]),
            WeeklyActivity::new(1_704_585_600, vec![0, 1, 2, 3, 4, 5, 6]),
        ];
        fs::write(&path, serde_json::to_string_pretty(&weeks).unwrap()).unwrap();

        let source = FileActivitySource::new(path);
        let loaded = source.fetch(&RepoTarget::new("me", "repo")).unwrap();
        assert_eq!(loaded, weeks);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let source = FileActivitySource::new(PathBuf::from("/definitely/not/here.json"));
        let err = source.fetch(&RepoTarget::new("me", "repo")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_invalid_json() {
        let dir = temp_dir("file-source-invalid");
        let path = dir.join("activity.json");
        fs::write(&path, "{\"week\": 1}").unwrap();

        let err = FileActivitySource::new(path).fetch(&RepoTarget::new("me", "repo")).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));

        fs::remove_dir_all(dir).unwrap();
    }
}
