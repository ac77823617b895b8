//! JSON snapshots of scrape progress and match results under the output directory.
//!
//! Each write goes to its own uniquely named temporary sibling and is renamed into place,
//! so a reader never sees a half-written file, even with concurrent runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::models::job::JobDetail;

pub const JOBS_SNAPSHOT: &str = "jobs_snapshot.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Rewrites the jobs snapshot with everything fetched so far.
    pub async fn write_jobs(&self, jobs: &[JobDetail]) -> Result<PathBuf, SnapshotError> {
        self.write(JOBS_SNAPSHOT, jobs).await
    }

    pub async fn write_matches<T: Serialize>(
        &self,
        name: &str,
        matches: &[T],
    ) -> Result<PathBuf, SnapshotError> {
        let file_name = format!("matches_for_{}.json", sanitize_file_name(name));
        self.write(&file_name, matches).await
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf, SnapshotError> {
        let body = serde_json::to_vec_pretty(value)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SnapshotError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(file_name);
        let dir = self.dir.clone();
        let prefix = format!(".{file_name}.");

        // each write gets its own temp file, so concurrent runs never share one
        tokio::task::spawn_blocking({
            let path = path.clone();
            move || -> Result<(), SnapshotError> {
                let io_error = |source| SnapshotError::Io {
                    path: path.clone(),
                    source,
                };
                let mut tmp = tempfile::Builder::new()
                    .prefix(&prefix)
                    .suffix(".tmp")
                    .tempfile_in(&dir)
                    .map_err(io_error)?;
                tmp.write_all(&body).map_err(io_error)?;
                tmp.persist(&path).map_err(|e| io_error(e.error))?;
                Ok(())
            }
        })
        .await??;

        Ok(path)
    }
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStub;

    fn detail(id: u32) -> JobDetail {
        JobDetail::new(
            JobStub {
                url: format!("https://jobs.example.com/details/?id={id}"),
                title: format!("Job {id}"),
                company: "Acme".to_string(),
            },
            vec!["SQL".to_string()],
            vec![],
        )
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("a-b_c.d"), "a-b_c.d");
        assert_eq!(sanitize_file_name("Zoë"), "Zo_");
        assert_eq!(sanitize_file_name(""), "_");
    }

    #[tokio::test]
    async fn test_write_jobs_overwrites_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("output"));

        writer.write_jobs(&[detail(1)]).await.unwrap();
        let path = writer.write_jobs(&[detail(1), detail(2)]).await.unwrap();

        assert_eq!(path, dir.path().join("output").join(JOBS_SNAPSHOT));
        let body = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["title"], "Job 2");
        assert_eq!(value[0]["skills"][0], "SQL");
    }

    #[tokio::test]
    async fn test_write_matches_uses_sanitized_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path());

        let path = writer
            .write_matches("Jane Doe", &[serde_json::json!({"score": 0.5})])
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("matches_for_Jane_Doe.json"));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_do_not_clobber_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path());

        let handles: Vec<_> = (0..32)
            .map(|run| {
                let writer = writer.clone();
                tokio::spawn(async move {
                    let payload = vec![serde_json::json!({ "run": run, "pad": "x".repeat(4096) })];
                    writer.write_matches("Jane Doe", &payload).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let body = std::fs::read_to_string(dir.path().join("matches_for_Jane_Doe.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let run = value[0]["run"].as_u64().unwrap();
        assert!(run < 32);

        let files: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["matches_for_Jane_Doe.json"]);
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let err = SnapshotWriter::new(&file).write_jobs(&[]).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
