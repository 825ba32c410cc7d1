//! 어휘 유사도 스코어링
//!
//! 쿼리 토큰이 대상 문자열에 부분 문자열로 포함되는지로 점수를 매기는
//! 단순 휴리스틱입니다. 토큰 집합 교집합이 아니라 대상 전체 문자열에 대한
//! 포함 검사이므로, 긴 단어 안에 묻힌 토큰도 일치로 계산됩니다.

use std::sync::OnceLock;

use regex::Regex;

/// 일치 판정에 참여하는 최소 토큰 길이 (UTF-16 단위, 이 값보다 길어야 함)
pub const MIN_TOKEN_LEN: usize = 3;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\x{FEFF}]+").expect("whitespace pattern is valid"))
}

/// 쿼리를 공백 단위로 분할 (U+FEFF 포함)
///
/// 앞뒤 공백은 빈 토큰을 만들며, 빈 토큰도 분모에 포함됩니다.
pub fn tokenize(query: &str) -> Vec<&str> {
    if query.is_empty() {
        return vec![];
    }
    whitespace_re().split(query).collect()
}

/// 토큰 길이 (UTF-16 코드 유닛 수)
fn token_len(token: &str) -> usize {
    token.encode_utf16().count()
}

/// 쿼리와 대상 문자열 사이의 어휘 겹침 점수 (0.0 ~ 1.0)
///
/// `matches / 전체 토큰 수`를 반환합니다. 토큰이 없으면 0입니다.
///
/// # Arguments
/// * `query` - 사용자 쿼리
/// * `target` - 비교 대상 (질문 또는 답변)
pub fn score(query: &str, target: &str) -> f32 {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let tokens = tokenize(&query);
    if tokens.is_empty() {
        return 0.0;
    }

    let matches = tokens
        .iter()
        .filter(|token| token_len(token) > MIN_TOKEN_LEN && target.contains(*token))
        .count();

    matches as f32 / tokens.len() as f32
}

// ============================================================================
// Tests
// ============================================================================
