//! Session 모듈 - 대화 세션과 트랜스크립트
//!
//! - Turn: user/bot 턴과 내보내기 렌더링
//! - Conversation: 동기 세션 상태 머신 (쿼리, FAQ 적재, 카테고리, 내보내기)
//! - Handle: 쿼리를 직렬화하는 비동기 세션 프론트
//! - Config: 인사말, 응답 지연, 내보내기 위치

mod config;
mod conversation;
mod handle;
mod turn;

// Re-exports
pub use config::{SessionConfig, EXPORT_DIR_ENV, GREETING, RESPONSE_DELAY_ENV};
pub use conversation::{
    ConversationSession, LoadOutcome,
    render_transcript, respond,
    FALLBACK_MESSAGE, LOAD_ERROR_MESSAGE,
};
pub use handle::SessionHandle;
pub use turn::{Role, Turn};
