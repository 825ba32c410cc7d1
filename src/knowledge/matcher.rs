//! 최적 매칭 선택기
//!
//! 지식베이스 전체를 순서대로 스코어링하여 가장 높은 점수의 엔트리를 고릅니다.
//!
//! total = score(query, question) + 0.5 * score(query, answer)

use super::similarity::score;
use super::store::{FaqEntry, KnowledgeBase};

/// 확신 매칭 임계값 (이 값보다 커야 답변으로 채택)
pub const CONFIDENCE_THRESHOLD: f32 = 0.15;

/// 답변 점수 가중치
pub const ANSWER_WEIGHT: f32 = 0.5;

/// 매칭 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// 최고 점수 엔트리 (지식베이스가 비었거나 모든 점수가 0이면 None)
    pub entry: Option<&'a FaqEntry>,
    /// 최고 점수 (0.0 ~ 1.5)
    pub score: f32,
}

impl<'a> MatchResult<'a> {
    /// 임계값을 넘는 확신 매칭이면 엔트리 반환
    pub fn confident(&self) -> Option<&'a FaqEntry> {
        if self.score > CONFIDENCE_THRESHOLD {
            self.entry
        } else {
            None
        }
    }
}

/// 엔트리 하나의 종합 점수
pub fn entry_score(query: &str, entry: &FaqEntry) -> f32 {
    score(query, &entry.question) + ANSWER_WEIGHT * score(query, &entry.answer)
}

/// 쿼리에 가장 잘 맞는 엔트리 선택
///
/// 엄격한 `>` 비교를 사용하므로 동점이면 먼저 나온 엔트리가 유지됩니다.
pub fn select_best<'a>(query: &str, kb: &'a KnowledgeBase) -> MatchResult<'a> {
    let mut best: Option<&FaqEntry> = None;
    let mut best_score = 0.0_f32;

    for entry in kb {
        let total = entry_score(query, entry);
        if total > best_score {
            best_score = total;
            best = Some(entry);
        }
    }

    tracing::debug!(
        "Best match score={:.3} category={:?}",
        best_score,
        best.map(|e| e.category.as_str())
    );

    MatchResult {
        entry: best,
        score: best_score,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_knowledge_base() {
        let kb = KnowledgeBase::new();
        let result = select_best("What are the internship hours?", &kb);
        assert!(result.entry.is_none());
        assert_eq!(result.score, 0.0);
        assert!(result.confident().is_none());
    }

    #[test]
    fn test_tie_keeps_first_entry() {
        let mut kb = KnowledgeBase::new();
        kb.append(vec![
            FaqEntry::new("First", "How do I reset my password?", "Same answer"),
            FaqEntry::new("Second", "How do I reset my password?", "Same answer"),
        ]);

        let result = select_best("reset password", &kb);
        assert_eq!(result.entry.map(|e| e.category.as_str()), Some("First"));
    }

    #[test]
    fn test_internship_hours_scenario() {
        let kb = KnowledgeBase::seeded();
        let result = select_best("What are the internship hours?", &kb);

        let entry = result.confident().expect("confident match");
        assert_eq!(entry.category, "General");
        assert_eq!(entry.question, "What are the internship hours?");
        assert!(result.score > CONFIDENCE_THRESHOLD);
    }

    #[test]
    fn test_gibberish_has_no_match() {
        let kb = KnowledgeBase::seeded();
        let result = select_best("asdkjashdkjashd", &kb);
        assert!(result.entry.is_none());
        assert!(result.confident().is_none());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let kb = KnowledgeBase::seeded();
        let entry = &kb.entries()[0];

        let at_threshold = MatchResult {
            entry: Some(entry),
            score: CONFIDENCE_THRESHOLD,
        };
        assert!(at_threshold.confident().is_none());

        let above = MatchResult {
            entry: Some(entry),
            score: CONFIDENCE_THRESHOLD + 0.01,
        };
        assert!(above.confident().is_some());
    }

    #[test]
    fn test_total_exactly_at_threshold_falls_back() {
        let mut kb = KnowledgeBase::new();
        kb.append(vec![FaqEntry::new("Edge", "alpha", "bravo")]);

        // 10 토큰: 질문 1개 일치 (0.1) + 답변 1개 일치 (0.5 * 0.1) = 0.15
        let query = "alpha bravo xxxx1 xxxx2 xxxx3 xxxx4 xxxx5 xxxx6 xxxx7 xxxx8";
        let result = select_best(query, &kb);

        assert_eq!(result.entry.map(|e| e.category.as_str()), Some("Edge"));
        assert_eq!(result.score, CONFIDENCE_THRESHOLD);
        assert!(result.confident().is_none());

        // 한 토큰 줄이면 (9 토큰) 임계값을 넘는다
        let result = select_best("alpha bravo xxxx1 xxxx2 xxxx3 xxxx4 xxxx5 xxxx6 xxxx7", &kb);
        assert!(result.confident().is_some());
    }

    #[test]
    fn test_answer_weighting() {
        let entry = FaqEntry::new("X", "unrelated words", "stipend payment");
        // 질문 0, 답변 1.0 * 0.5
        assert!((entry_score("stipend", &entry) - 0.5).abs() < 1e-6);
    }
}
