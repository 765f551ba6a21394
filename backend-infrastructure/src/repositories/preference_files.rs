// Column preference repository backed by a single JSON file

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use backend_domain::ports::PreferenceRepository;
use backend_domain::ReportColumn;

pub struct FilePreferenceRepository {
    path: PathBuf,
    // Serializes the read-modify-write cycle on the backing file.
    guard: Mutex<()>,
}

impl FilePreferenceRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> anyhow::Result<HashMap<String, Vec<ReportColumn>>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl PreferenceRepository for FilePreferenceRepository {
    async fn load(&self, actor_id: &str) -> anyhow::Result<Option<Vec<ReportColumn>>> {
        let _guard = self.guard.lock().await;
        let all = self.read_all().await?;
        Ok(all.get(actor_id).cloned())
    }

    async fn save(&self, actor_id: &str, columns: &[ReportColumn]) -> anyhow::Result<()> {
        let _guard = self.guard.lock().await;
        let mut all = self.read_all().await?;
        all.insert(actor_id.to_string(), columns.to_vec());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_repository() -> FilePreferenceRepository {
        let path = std::env::temp_dir().join(format!("boxoffice-prefs-{}.json", Uuid::new_v4()));
        FilePreferenceRepository::new(path)
    }

    #[tokio::test]
    async fn unknown_actor_has_no_saved_preference() {
        let repo = temp_repository();
        assert_eq!(repo.load("nobody").await.expect("load"), None);
    }

    #[tokio::test]
    async fn saved_columns_round_trip_per_actor() {
        let repo = temp_repository();
        repo.save("op-1", &[ReportColumn::Event, ReportColumn::Tickets])
            .await
            .expect("save");
        repo.save("op-2", &[ReportColumn::Email])
            .await
            .expect("save other");

        assert_eq!(
            repo.load("op-1").await.expect("load"),
            Some(vec![ReportColumn::Event, ReportColumn::Tickets])
        );
        assert_eq!(
            repo.load("op-2").await.expect("load"),
            Some(vec![ReportColumn::Email])
        );
    }

    #[tokio::test]
    async fn save_overwrites_the_previous_set_wholesale() {
        let repo = temp_repository();
        repo.save("op-1", &ReportColumn::default_visible())
            .await
            .expect("save");
        repo.save("op-1", &[ReportColumn::Status])
            .await
            .expect("overwrite");

        assert_eq!(
            repo.load("op-1").await.expect("load"),
            Some(vec![ReportColumn::Status])
        );
    }
}
