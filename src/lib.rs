//! faq-assist - 인턴십 FAQ 매칭 어시스턴트
//!
//! 인메모리 FAQ 지식베이스에서 어휘 유사도로 최적 답변을 고르고,
//! 확신이 부족하면 담당자 안내 메시지로 대체하는 대화 엔진입니다.

pub mod cli;
pub mod ingest;
pub mod knowledge;
pub mod session;

// Re-exports
pub use ingest::{HostError, HostIo, IngestError, LocalFs};
pub use knowledge::{
    FaqEntry, KnowledgeBase, MatchResult, CONFIDENCE_THRESHOLD,
    get_data_dir, score, select_best,
};
pub use session::{
    ConversationSession, LoadOutcome, Role, SessionConfig, SessionHandle, Turn,
};
