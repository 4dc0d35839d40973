use serde::{Deserialize, Serialize};

/// Raw drive item as returned by the Microsoft Graph children listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default, rename = "@microsoft.graph.downloadUrl")]
    pub download_url: Option<String>,
    #[serde(default)]
    pub created_date_time: Option<String>,
    #[serde(default)]
    pub last_modified_date_time: Option<String>,
    #[serde(default)]
    pub file: Option<FileFacet>,
    #[serde(default)]
    pub folder: Option<FolderFacet>,
    #[serde(default)]
    pub parent_reference: Option<ParentReference>,
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    #[serde(default)]
    pub child_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub drive_id: Option<String>,
}

/// Flattened file record produced by the recursive listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub web_url: Option<String>,
    pub download_url: Option<String>,
    pub created_date_time: Option<String>,
    pub last_modified_date_time: Option<String>,
    pub parent_folder_id: String,
}

impl DriveFile {
    pub fn from_item(item: &DriveItem, parent_folder_id: &str) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item
                .file
                .as_ref()
                .and_then(|f| f.mime_type.clone())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            size: item.size.unwrap_or(0),
            web_url: item.web_url.clone(),
            download_url: item.download_url.clone(),
            created_date_time: item.created_date_time.clone(),
            last_modified_date_time: item.last_modified_date_time.clone(),
            parent_folder_id: parent_folder_id.to_string(),
        }
    }
}
