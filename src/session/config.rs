//! 세션 설정
//!
//! 기본값 + 환경변수로 구성합니다.
//! - `FAQ_ASSIST_RESPONSE_DELAY_MS`: 답변 전 인위적 지연 (기본 0)
//! - `FAQ_ASSIST_EXPORT_DIR`: 대화 내보내기 디렉토리 (기본 ~/.faq-assist/exports)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::knowledge::get_data_dir;

pub const RESPONSE_DELAY_ENV: &str = "FAQ_ASSIST_RESPONSE_DELAY_MS";
pub const EXPORT_DIR_ENV: &str = "FAQ_ASSIST_EXPORT_DIR";

/// 세션 시작 인사말
pub const GREETING: &str = "Hi! I'm your Internship Support Assistant. I can help you with questions about:\n\n• Internship hours and policies\n• Time off requests\n• Technical setup and tools\n• Stipend and timesheet queries\n• Project assignments\n• And more!\n\nHow can I help you today?";

/// 세션 설정
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 첫 bot 턴
    pub greeting: String,
    /// 답변 전 지연
    pub response_delay: Duration,
    /// 내보내기 파일 저장 위치
    pub export_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: GREETING.to_string(),
            response_delay: Duration::ZERO,
            export_dir: get_data_dir().join("exports"),
        }
    }
}

impl SessionConfig {
    /// 환경변수에서 설정 로드 (없는 값은 기본값)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(RESPONSE_DELAY_ENV) {
            if !raw.trim().is_empty() {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {}: {:?}", RESPONSE_DELAY_ENV, raw))?;
                config.response_delay = Duration::from_millis(millis);
            }
        }

        if let Ok(dir) = std::env::var(EXPORT_DIR_ENV) {
            if !dir.is_empty() {
                config.export_dir = PathBuf::from(dir);
            }
        }

        tracing::debug!("Session config: {:?}", config);
        Ok(config)
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
