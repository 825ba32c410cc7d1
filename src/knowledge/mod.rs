//! Knowledge 모듈 - FAQ 지식베이스와 매칭 엔진
//!
//! - Store: 순서가 보존되는 인메모리 FAQ 저장소 + 기본 데이터
//! - Similarity: 부분 문자열 기반 어휘 겹침 점수
//! - Matcher: 임계값이 적용된 최적 엔트리 선택

mod store;
mod similarity;
mod matcher;

// Re-exports
pub use store::{
    FaqEntry, KnowledgeBase, KnowledgeStats,
    get_data_dir, seed_entries, SEED_CATEGORIES,
};
pub use similarity::{score, tokenize, MIN_TOKEN_LEN};
pub use matcher::{
    MatchResult, entry_score, select_best,
    ANSWER_WEIGHT, CONFIDENCE_THRESHOLD,
};
