//! FAQ 적재 모듈
//!
//! JSON 배열 형식의 FAQ 파일을 파싱하고, 호스트 파일 입출력을 추상화합니다.
//! - 최상위가 배열이 아니거나 파싱 불가능한 입력은 전체 거부 (부분 적재 없음)
//! - 배열 안의 개별 엔트리는 모양을 검사하지 않고 관대하게 수용

pub mod host;

use serde_json::Value;

use crate::knowledge::FaqEntry;

pub use host::{export_file_name, HostError, HostIo, LocalFs};

// ============================================================================
// Errors
// ============================================================================

/// FAQ 적재 형식 오류
///
/// 세션에서는 실패 턴으로 보고되며, 호출자에게 전파되지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("FAQ data is not a JSON array (found {0})")]
    NotAnArray(&'static str),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Parsing
// ============================================================================

/// JSON 값의 종류 이름 (오류 메시지용)
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON 값을 FAQ 엔트리 목록으로 변환
///
/// 배열이 아니면 `IngestError::NotAnArray`. 배열 원소는 모두 수용합니다.
pub fn entries_from_value(value: &Value) -> Result<Vec<FaqEntry>, IngestError> {
    let items = value
        .as_array()
        .ok_or_else(|| IngestError::NotAnArray(kind_of(value)))?;

    Ok(items.iter().map(FaqEntry::from_value).collect())
}

/// JSON 텍스트를 FAQ 엔트리 목록으로 파싱
pub fn parse_faq_json(text: &str) -> Result<Vec<FaqEntry>, IngestError> {
    let value: Value = serde_json::from_str(text)?;
    entries_from_value(&value)
}

// ============================================================================
// Tests
// ============================================================================
