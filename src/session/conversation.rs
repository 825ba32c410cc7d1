//! Conversation Session - 대화 상태 머신
//!
//! 트랜스크립트(턴 목록)와 지식베이스를 소유하며,
//! 쿼리 → 매칭 → 답변 흐름을 조율합니다.
//!
//! 트랜스크립트와 지식베이스는 모두 추가만 가능합니다.

use serde_json::Value;
use uuid::Uuid;

use crate::ingest::{entries_from_value, parse_faq_json, IngestError};
use crate::knowledge::{select_best, FaqEntry, KnowledgeBase};

use super::config::SessionConfig;
use super::turn::Turn;

// ============================================================================
// Messages
// ============================================================================

/// 확신 매칭이 없을 때의 안내 메시지
pub const FALLBACK_MESSAGE: &str = "I'm not sure about that specific question. Here are some options:\n\n1. Contact HR at hr@company.com for policy questions\n2. Reach out to IT support at it@company.com for technical issues\n3. Talk to your supervisor for project-specific queries\n\nYou can also try rephrasing your question or browse our FAQ categories: General, Technical, HR, Projects, and Policies.";

/// FAQ 적재 실패 메시지
pub const LOAD_ERROR_MESSAGE: &str =
    "Error loading FAQ file. Please ensure it's a valid JSON array.";

fn load_success_message(count: usize) -> String {
    format!("Successfully loaded {} new FAQ entries!", count)
}

fn categories_message(counts: &[(String, usize)]) -> String {
    let list = counts
        .iter()
        .map(|(cat, count)| format!("• {} ({} items)", cat, count))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Here are the available FAQ categories:\n\n{}\n\nFeel free to ask questions about any of these topics!",
        list
    )
}

// ============================================================================
// Types
// ============================================================================

/// FAQ 일괄 적재 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    /// 새로 추가된 엔트리 수
    pub accepted: usize,
    /// 입력 형식 오류로 전체 거부되었는지
    pub rejected: bool,
}

// ============================================================================
// ConversationSession
// ============================================================================

/// 대화 세션
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    transcript: Vec<Turn>,
    knowledge_base: KnowledgeBase,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    /// 기본 FAQ와 기본 인사말로 세션 생성
    pub fn new() -> Self {
        Self::with_config(&SessionConfig::default())
    }

    /// 설정의 인사말로 세션 생성 (기본 FAQ 사용)
    pub fn with_config(config: &SessionConfig) -> Self {
        Self::with_knowledge_base(KnowledgeBase::seeded(), config.greeting.clone())
    }

    /// 지정된 지식베이스와 인사말로 세션 생성
    pub fn with_knowledge_base(knowledge_base: KnowledgeBase, greeting: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "Session created with {} FAQ entries", knowledge_base.len());

        Self {
            id,
            transcript: vec![Turn::bot(greeting)],
            knowledge_base,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// 지식베이스 엔트리 수
    pub fn kb_len(&self) -> usize {
        self.knowledge_base.len()
    }

    /// 쿼리 제출
    ///
    /// 빈 문자열 또는 공백만 있는 쿼리는 무시하고 `None`을 반환합니다.
    /// 그 외에는 user 턴과 bot 턴이 정확히 하나씩 추가됩니다.
    pub fn submit_query(&mut self, text: &str) -> Option<Turn> {
        if !self.record_user_turn(text) {
            return None;
        }

        let reply = respond(text, &self.knowledge_base);
        self.push_turn(reply.clone());
        Some(reply)
    }

    /// user 턴 기록 (빈 쿼리면 false)
    pub(crate) fn record_user_turn(&mut self, text: &str) -> bool {
        if is_blank(text) {
            tracing::debug!(session = %self.id, "Ignoring blank query");
            return false;
        }

        self.push_turn(Turn::user(text));
        true
    }

    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// FAQ 일괄 적재 (JSON 값)
    ///
    /// 배열이 아니면 실패 턴을 기록하고 아무것도 추가하지 않습니다.
    pub fn load_faq_batch(&mut self, value: &Value) -> LoadOutcome {
        let result = entries_from_value(value);
        self.apply_load(result)
    }

    /// FAQ 일괄 적재 (JSON 텍스트)
    ///
    /// 파싱 불가능한 텍스트는 배열이 아닌 입력과 동일하게 처리됩니다.
    pub fn load_faq_json(&mut self, text: &str) -> LoadOutcome {
        let result = parse_faq_json(text);
        self.apply_load(result)
    }

    fn apply_load(&mut self, result: Result<Vec<FaqEntry>, IngestError>) -> LoadOutcome {
        match result {
            Ok(entries) => {
                let accepted = self.knowledge_base.append(entries);
                tracing::info!(
                    session = %self.id,
                    "Loaded {} FAQ entries (total={})",
                    accepted,
                    self.knowledge_base.len()
                );

                self.push_turn(Turn::bot(load_success_message(accepted)));
                LoadOutcome {
                    accepted,
                    rejected: false,
                }
            }
            Err(e) => {
                tracing::warn!(session = %self.id, "Rejected FAQ batch: {}", e);

                self.push_turn(Turn::bot(LOAD_ERROR_MESSAGE));
                LoadOutcome {
                    accepted: 0,
                    rejected: true,
                }
            }
        }
    }

    /// 카테고리 요약 (처음 등장 순서 + 개수), 요약 bot 턴 추가
    pub fn list_categories(&mut self) -> Vec<(String, usize)> {
        let counts = self.knowledge_base.category_counts();
        self.push_turn(Turn::bot(categories_message(&counts)));
        counts
    }

    /// 트랜스크립트를 텍스트로 렌더링 (상태 변경 없음)
    pub fn export_transcript(&self) -> String {
        render_transcript(&self.transcript)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 빈 쿼리 판정 (공백과 U+FEFF만 있으면 빈 쿼리)
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}')
}

/// 쿼리에 대한 bot 턴 생성
///
/// 지식베이스 스냅샷만 읽으므로 세션 밖(블로킹 스레드)에서도 호출할 수 있습니다.
pub fn respond(query: &str, knowledge_base: &KnowledgeBase) -> Turn {
    let result = select_best(query, knowledge_base);

    match result.confident() {
        Some(entry) => Turn::answer(entry.answer.clone(), entry.category.clone(), result.score),
        None => Turn::bot(FALLBACK_MESSAGE),
    }
}

/// 턴 목록 렌더링 (빈 줄로 구분)
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::CONFIDENCE_THRESHOLD;
    use crate::session::Role;
    use serde_json::json;

    #[test]
    fn test_new_session_has_greeting() {
        let session = ConversationSession::new();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Bot);
        assert_eq!(session.kb_len(), 10);
    }

    #[test]
    fn test_blank_queries_append_nothing() {
        let mut session = ConversationSession::new();

        assert!(session.submit_query("").is_none());
        assert!(session.submit_query("   ").is_none());
        assert!(session.submit_query("\t\n").is_none());
        assert!(session.submit_query("\u{FEFF} ").is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_internship_hours_query() {
        let mut session = ConversationSession::new();

        let reply = session.submit_query("What are the internship hours?").unwrap();
        assert_eq!(reply.role, Role::Bot);
        assert_eq!(reply.category.as_deref(), Some("General"));
        assert!(reply.confidence.unwrap() > CONFIDENCE_THRESHOLD);
        assert!(reply.text.starts_with("Internship hours are typically 9 AM to 5 PM"));

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].text, "What are the internship hours?");
        assert_eq!(transcript[2], reply);
    }

    #[test]
    fn test_user_text_kept_verbatim() {
        let mut session = ConversationSession::new();
        session.submit_query("  Can I work remotely?  ").unwrap();
        assert_eq!(session.transcript()[1].text, "  Can I work remotely?  ");
    }

    #[test]
    fn test_gibberish_falls_back() {
        let mut session = ConversationSession::new();

        let reply = session.submit_query("asdkjashdkjashd").unwrap();
        assert_eq!(reply.text, FALLBACK_MESSAGE);
        assert!(reply.category.is_none());
        assert!(reply.confidence.is_none());
    }

    #[test]
    fn test_empty_knowledge_base_falls_back() {
        let mut session = ConversationSession::with_knowledge_base(KnowledgeBase::new(), "hi");
        let reply = session.submit_query("What are the internship hours?").unwrap();
        assert_eq!(reply.text, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_load_three_entries() {
        let mut session = ConversationSession::new();
        let before = session.kb_len();

        let outcome = session.load_faq_batch(&json!([
            {"category": "IT", "question": "How do I get a laptop?", "answer": "Ask IT."},
            {"category": "IT", "question": "Where is the printer?", "answer": "Floor two."},
            {"category": "Facilities", "question": "Where do I park?", "answer": "Lot B."}
        ]));

        assert_eq!(outcome, LoadOutcome { accepted: 3, rejected: false });
        assert_eq!(session.kb_len(), before + 3);

        let last = session.transcript().last().unwrap();
        assert!(last.text.contains('3'));
        assert_eq!(last.text, "Successfully loaded 3 new FAQ entries!");
    }

    #[test]
    fn test_load_object_rejected() {
        let mut session = ConversationSession::new();
        let before = session.kb_len();

        let outcome = session.load_faq_batch(&json!({"category": "IT"}));

        assert!(outcome.rejected);
        assert_eq!(outcome.accepted, 0);
        assert_eq!(session.kb_len(), before);
        assert_eq!(session.transcript().last().unwrap().text, LOAD_ERROR_MESSAGE);
    }

    #[test]
    fn test_load_unparsable_text_rejected() {
        let mut session = ConversationSession::new();
        let before = session.kb_len();

        let outcome = session.load_faq_json("[{\"category\": \"IT\",");

        assert!(outcome.rejected);
        assert_eq!(session.kb_len(), before);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_loaded_entries_are_searchable() {
        let mut session = ConversationSession::new();
        session.load_faq_json(
            r#"[{"category": "Facilities", "question": "Where is the parking garage?", "answer": "Behind building C."}]"#,
        );

        let reply = session.submit_query("parking garage").unwrap();
        assert_eq!(reply.category.as_deref(), Some("Facilities"));
        assert_eq!(reply.text, "Behind building C.");
    }

    #[test]
    fn test_malformed_entries_accepted_leniently() {
        let mut session = ConversationSession::new();
        let outcome = session.load_faq_batch(&json!([{"question": "orphan question"}, 5]));

        assert_eq!(outcome.accepted, 2);
        assert_eq!(session.knowledge_base().entries()[10], FaqEntry::new("", "orphan question", ""));
    }

    #[test]
    fn test_list_categories() {
        let mut session = ConversationSession::new();
        let counts = session.list_categories();

        let names: Vec<&str> = counts.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["General", "Technical", "HR", "Projects", "Policies"]);
        assert!(counts.iter().all(|(_, n)| *n == 2));

        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, session.kb_len());

        let summary = &session.transcript().last().unwrap().text;
        assert!(summary.contains("• General (2 items)"));
        assert!(summary.starts_with("Here are the available FAQ categories:"));
    }

    #[test]
    fn test_category_counts_sum_after_load() {
        let mut session = ConversationSession::new();
        session.load_faq_batch(&json!([
            {"category": "HR", "question": "q", "answer": "a"},
            {"category": "New", "question": "q", "answer": "a"}
        ]));

        let counts = session.list_categories();
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, session.kb_len());
        assert_eq!(counts.last().unwrap(), &("New".to_string(), 1));
    }

    #[test]
    fn test_export_line_count_and_no_mutation() {
        let mut session = ConversationSession::with_knowledge_base(KnowledgeBase::seeded(), "Hello!");
        session.submit_query("What are the internship hours?");
        session.submit_query("What is the dress code?");

        let turns_before = session.transcript().to_vec();
        let kb_before = session.kb_len();

        let exported = session.export_transcript();

        assert_eq!(exported.lines().count(), 2 * session.transcript().len() - 1);
        assert_eq!(session.transcript(), turns_before.as_slice());
        assert_eq!(session.kb_len(), kb_before);

        let first_line = exported.lines().next().unwrap();
        assert!(first_line.ends_with("] BOT: Hello!"));
        assert!(exported.contains("USER: What is the dress code?"));
    }
}
