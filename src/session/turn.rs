//! 대화 턴 (user / bot)

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// 턴 발화자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// 내보내기용 대문자 라벨
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Bot => "BOT",
        }
    }
}

/// 대화 턴
///
/// `category`와 `confidence`는 매칭에 성공한 bot 턴에만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 매칭 확신도 (0.0 ~ 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            category: None,
            confidence: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            category: None,
            confidence: None,
        }
    }

    /// 매칭된 답변 턴 (확신도는 [0, 1]로 제한)
    pub fn answer(text: impl Into<String>, category: impl Into<String>, confidence: f32) -> Self {
        Self {
            category: Some(category.into()),
            confidence: Some(confidence.clamp(0.0, 1.0)),
            ..Self::bot(text)
        }
    }

    pub fn is_match(&self) -> bool {
        self.category.is_some()
    }

    /// `[HH:MM:SS] ROLE: text` (로컬 시간)
    pub fn render(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.with_timezone(&Local).format("%H:%M:%S"),
            self.role.label(),
            self.text
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
