//! Knowledge Base - 인메모리 FAQ 저장소
//!
//! (category, question, answer) 엔트리를 순서대로 보관합니다.
//! 엔트리는 추가만 가능하며, 한 번 적재된 엔트리는 수정되지 않습니다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Data Directory
// ============================================================================

/// 데이터 디렉토리 경로 (~/.faq-assist/)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".faq-assist")
}

// ============================================================================
// Types
// ============================================================================

/// FAQ 엔트리
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl FaqEntry {
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// JSON 값에서 관대하게 엔트리 생성
    ///
    /// 필드가 없거나 null이면 빈 문자열, 문자열이 아닌 값은 JSON 표기 그대로 사용합니다.
    /// 객체가 아닌 값도 실패하지 않고 빈 엔트리가 됩니다.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| -> String {
            match value.get(name) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            }
        };

        Self {
            category: field("category"),
            question: field("question"),
            answer: field("answer"),
        }
    }
}

/// 지식베이스 통계
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeStats {
    pub entry_count: usize,
    pub category_count: usize,
}

// ============================================================================
// KnowledgeBase
// ============================================================================

/// 순서가 보존되는 FAQ 지식베이스
///
/// 일괄 적재는 항상 끝에 추가되며 기존 엔트리의 순서를 바꾸지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<FaqEntry>,
}

impl KnowledgeBase {
    /// 빈 지식베이스
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 FAQ 10건으로 초기화된 지식베이스
    pub fn seeded() -> Self {
        Self {
            entries: seed_entries(),
        }
    }

    /// 엔트리 일괄 추가
    ///
    /// # Returns
    /// 추가된 엔트리 수
    pub fn append<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = FaqEntry>,
    {
        let before = self.entries.len();
        self.entries.extend(entries);
        let added = self.entries.len() - before;

        tracing::debug!("Appended {} FAQ entries (total={})", added, self.entries.len());
        added
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FaqEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 카테고리별 엔트리 수 (처음 등장한 순서 유지)
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for entry in &self.entries {
            match counts.iter_mut().find(|(cat, _)| *cat == entry.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.category.clone(), 1)),
            }
        }

        counts
    }

    /// 지식베이스 통계
    pub fn stats(&self) -> KnowledgeStats {
        KnowledgeStats {
            entry_count: self.entries.len(),
            category_count: self.category_counts().len(),
        }
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a FaqEntry;
    type IntoIter = std::slice::Iter<'a, FaqEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Seed Data
// ============================================================================

/// 기본 FAQ 카테고리
pub const SEED_CATEGORIES: [&str; 5] = ["General", "Technical", "HR", "Projects", "Policies"];

/// 기본 FAQ 엔트리 (호환성 테스트용 고정 데이터)
pub fn seed_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "General",
            "What are the internship hours?",
            "Internship hours are typically 9 AM to 5 PM, Monday through Friday. However, this may vary by department. Please check with your supervisor for specific requirements.",
        ),
        FaqEntry::new(
            "General",
            "How do I request time off?",
            "To request time off, submit a request through the HR portal at least 48 hours in advance. Navigate to 'Time Off' section and fill out the form. Your supervisor will be notified automatically.",
        ),
        FaqEntry::new(
            "Technical",
            "How do I access the development environment?",
            "Access credentials for the development environment are sent to your company email. Use VPN to connect remotely. Contact IT support at it@company.com if you face any issues.",
        ),
        FaqEntry::new(
            "Technical",
            "What tools and software do I need?",
            "Required tools include: Git, VS Code or your preferred IDE, Docker, and Slack for communication. Specific technical requirements vary by team. Check your onboarding document for details.",
        ),
        FaqEntry::new(
            "HR",
            "When will I receive my stipend?",
            "Stipends are processed on the last working day of each month. Direct deposit typically takes 2-3 business days. Contact hr@company.com for payment-related queries.",
        ),
        FaqEntry::new(
            "HR",
            "How do I submit my timesheet?",
            "Timesheets must be submitted weekly through the HR portal. Navigate to 'Timesheet' section, log your hours, and submit by Friday 5 PM each week.",
        ),
        FaqEntry::new(
            "Projects",
            "How do I choose my project?",
            "Project assignments are discussed during your first week. You'll meet with your mentor to understand available projects and align them with your interests and learning goals.",
        ),
        FaqEntry::new(
            "Projects",
            "Who is my project mentor?",
            "Your project mentor is assigned during onboarding. Check your welcome email or contact your team lead to confirm your mentor assignment.",
        ),
        FaqEntry::new(
            "Policies",
            "What is the dress code?",
            "We follow a business casual dress code. Jeans and sneakers are acceptable. Avoid overly casual wear like shorts or flip-flops. Dress appropriately for client meetings.",
        ),
        FaqEntry::new(
            "Policies",
            "Can I work remotely?",
            "Remote work policies vary by department. Most teams offer 2-3 days remote work per week. Discuss with your supervisor to understand your team's specific policy.",
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seeded_knowledge_base() {
        let kb = KnowledgeBase::seeded();
        assert_eq!(kb.len(), 10);

        let stats = kb.stats();
        assert_eq!(stats.entry_count, 10);
        assert_eq!(stats.category_count, 5);

        let cats: Vec<String> = kb.category_counts().into_iter().map(|(c, _)| c).collect();
        assert_eq!(cats, SEED_CATEGORIES.to_vec());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut kb = KnowledgeBase::seeded();
        let first = kb.entries()[0].clone();

        let added = kb.append(vec![
            FaqEntry::new("Extra", "Q1", "A1"),
            FaqEntry::new("Extra", "Q2", "A2"),
        ]);

        assert_eq!(added, 2);
        assert_eq!(kb.len(), 12);
        assert_eq!(kb.entries()[0], first);
        assert_eq!(kb.entries()[10].question, "Q1");
        assert_eq!(kb.entries()[11].question, "Q2");
    }

    #[test]
    fn test_category_counts_first_seen_order() {
        let mut kb = KnowledgeBase::new();
        kb.append(vec![
            FaqEntry::new("B", "q", "a"),
            FaqEntry::new("A", "q", "a"),
            FaqEntry::new("B", "q", "a"),
        ]);

        assert_eq!(
            kb.category_counts(),
            vec![("B".to_string(), 2), ("A".to_string(), 1)]
        );
    }

    #[test]
    fn test_from_value_lenient() {
        let full = FaqEntry::from_value(&json!({
            "category": "HR",
            "question": "Q?",
            "answer": "A."
        }));
        assert_eq!(full, FaqEntry::new("HR", "Q?", "A."));

        // 필드 누락 -> 빈 문자열
        let partial = FaqEntry::from_value(&json!({ "question": "Only question" }));
        assert_eq!(partial.category, "");
        assert_eq!(partial.question, "Only question");
        assert_eq!(partial.answer, "");

        // 문자열이 아닌 값 -> JSON 표기
        let numeric = FaqEntry::from_value(&json!({ "category": 7, "answer": null }));
        assert_eq!(numeric.category, "7");
        assert_eq!(numeric.answer, "");

        // 객체가 아닌 값 -> 빈 엔트리
        let scalar = FaqEntry::from_value(&json!("just a string"));
        assert_eq!(scalar, FaqEntry::new("", "", ""));
    }

    #[test]
    fn test_get_data_dir() {
        assert!(get_data_dir().ends_with(".faq-assist"));
    }
}
