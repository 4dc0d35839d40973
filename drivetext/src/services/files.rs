use crate::drive::GraphClient;
use crate::error::{DriveTextError, Result};
use crate::models::DriveFile;

/// Recursive folder traversal over the Graph listing API.
pub struct FileService {
    client: GraphClient,
}

impl FileService {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Walk the folder tree rooted at `folder_id` and return every file
    /// found, depth unbounded. Folders are descended into iteratively; a
    /// listing failure aborts the walk naming the folder that failed.
    pub async fn get_files_recursively(
        &self,
        folder_id: &str,
        bearer: &str,
    ) -> Result<Vec<DriveFile>> {
        let mut pending = vec![folder_id.to_string()];
        let mut files = Vec::new();

        while let Some(current) = pending.pop() {
            let items = self
                .client
                .list_children(&current, bearer)
                .await
                .map_err(|e| match e {
                    DriveTextError::NotFound(_) => {
                        DriveTextError::NotFound(format!("folder '{current}' not found"))
                    }
                    other => other,
                })?;

            for item in items {
                if item.is_folder() {
                    pending.push(item.id.clone());
                } else if item.is_file() {
                    files.push(DriveFile::from_item(&item, &current));
                }
            }
        }

        tracing::info!(folder_id, count = files.len(), "recursive listing complete");
        Ok(files)
    }
}
