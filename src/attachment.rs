//! File attachment records carried alongside BOQ items.
//!
//! These are data shapes only; transferring the files is handled elsewhere.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileUploadStatus {
    #[default]
    Pending,
    Uploading,
    Completed,
    Failed,
}

impl FileUploadStatus {
    /// Completed and failed uploads will not change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, FileUploadStatus::Completed | FileUploadStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub file_name: String,
    #[serde(default)]
    pub loaded: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub status: FileUploadStatus,
}

impl UploadProgress {
    /// Progress in whole percent, 0..=100.
    pub fn percent(&self) -> u8 {
        if self.status == FileUploadStatus::Completed {
            return 100;
        }
        if self.total == 0 {
            return 0;
        }
        let pct = (u128::from(self.loaded) * 100 / u128::from(self.total)).min(100);
        pct as u8
    }
}
