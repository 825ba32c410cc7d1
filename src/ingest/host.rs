//! 호스트 파일 입출력
//!
//! 코어는 "텍스트 파일 내용을 문자열로 받기"와 "문자열을 호스트에 넘겨 저장하기"
//! 두 가지 능력만 필요로 합니다. `LocalFs`는 로컬 파일시스템 구현체입니다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

// ============================================================================
// Errors
// ============================================================================

/// 호스트 경계 오류 (도메인 오류와 구분)
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// HostIo Trait
// ============================================================================

/// 호스트 입출력 트레이트 (async)
#[async_trait]
pub trait HostIo: Send + Sync {
    /// 텍스트 파일 내용 읽기
    async fn read_text(&self, path: &Path) -> Result<String, HostError>;

    /// 문자열을 파일로 저장하고 저장된 경로 반환
    async fn save_text(&self, file_name: &str, contents: &str) -> Result<PathBuf, HostError>;
}

/// 내보내기 파일 이름 (chat-export-<unix-millis>.txt)
pub fn export_file_name(unix_millis: i64) -> String {
    format!("chat-export-{}.txt", unix_millis)
}

// ============================================================================
// Local Filesystem
// ============================================================================

/// 로컬 파일시스템 구현체
///
/// 저장 파일은 `output_dir` 아래에 생성됩니다.
#[derive(Debug, Clone)]
pub struct LocalFs {
    output_dir: PathBuf,
}

impl LocalFs {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl HostIo for LocalFs {
    async fn read_text(&self, path: &Path) -> Result<String, HostError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| HostError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn save_text(&self, file_name: &str, contents: &str) -> Result<PathBuf, HostError> {
        if !self.output_dir.exists() {
            tokio::fs::create_dir_all(&self.output_dir)
                .await
                .map_err(|source| HostError::CreateDir {
                    path: self.output_dir.clone(),
                    source,
                })?;
        }

        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| HostError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Saved {} bytes to {:?}", contents.len(), path);
        Ok(path)
    }
}

// ============================================================================
// Tests
// ============================================================================
