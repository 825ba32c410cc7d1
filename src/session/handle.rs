//! Session Handle - 비동기 세션 프론트
//!
//! 세션을 `tokio::sync::Mutex`(FIFO 공정성)로 감싸 쿼리를 하나씩 처리합니다.
//! - 쿼리 하나가 처리되는 동안 락을 유지하므로 트랜스크립트 순서 = 제출 순서
//! - 스코어링은 락 안에서 복제한 지식베이스 스냅샷으로 `spawn_blocking`에서 수행
//! - 처리 태스크는 별도로 spawn되므로 호출자가 future를 버려도 bot 턴은 기록됨

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::ingest::{export_file_name, HostError, HostIo};

use super::config::SessionConfig;
use super::conversation::{is_blank, respond, ConversationSession, LoadOutcome, FALLBACK_MESSAGE};
use super::turn::Turn;

/// 처리 중인 쿼리 카운터 가드
struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 비동기 세션 핸들 (clone 가능)
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<ConversationSession>>,
    pending: Arc<AtomicUsize>,
    response_delay: Duration,
}

impl SessionHandle {
    /// 설정으로 새 세션 생성
    pub fn new(config: &SessionConfig) -> Self {
        Self::from_session(ConversationSession::with_config(config), config.response_delay)
    }

    /// 기존 세션 감싸기
    pub fn from_session(session: ConversationSession, response_delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            pending: Arc::new(AtomicUsize::new(0)),
            response_delay,
        }
    }

    /// 답변 대기 중인 쿼리가 있는지
    pub fn is_busy(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn id(&self) -> Uuid {
        self.session.lock().await.id()
    }

    /// 쿼리 제출 후 bot 턴 대기
    ///
    /// 빈 쿼리는 `None`. 먼저 제출된 쿼리가 끝날 때까지 대기열에서 기다립니다.
    pub async fn submit_query(&self, text: &str) -> Option<Turn> {
        if is_blank(text) {
            return None;
        }

        let guard = PendingGuard::new(&self.pending);
        let mut session = Arc::clone(&self.session).lock_owned().await;
        session.record_user_turn(text);

        let query = text.to_string();
        let snapshot = session.knowledge_base().clone();
        let delay = self.response_delay;
        let session_id = session.id();

        let task = tokio::spawn(async move {
            let _guard = guard;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let reply = match tokio::task::spawn_blocking(move || respond(&query, &snapshot)).await {
                Ok(turn) => turn,
                Err(e) => {
                    tracing::error!(session = %session_id, "Scoring task failed: {}", e);
                    Turn::bot(FALLBACK_MESSAGE)
                }
            };

            session.push_turn(reply.clone());
            reply
        });

        match task.await {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::error!(session = %session_id, "Query task failed: {}", e);
                None
            }
        }
    }

    /// FAQ JSON 텍스트 적재
    pub async fn load_faq_json(&self, text: &str) -> LoadOutcome {
        self.session.lock().await.load_faq_json(text)
    }

    /// 호스트에서 FAQ 파일을 읽어 적재
    ///
    /// 파일을 읽지 못하면 `HostError` (세션은 변경되지 않음).
    pub async fn load_faq_file(&self, host: &dyn HostIo, path: &Path) -> Result<LoadOutcome, HostError> {
        let text = host.read_text(path).await?;
        Ok(self.load_faq_json(&text).await)
    }

    pub async fn list_categories(&self) -> Vec<(String, usize)> {
        self.session.lock().await.list_categories()
    }

    pub async fn export_transcript(&self) -> String {
        self.session.lock().await.export_transcript()
    }

    /// 트랜스크립트를 `chat-export-<millis>.txt`로 저장
    pub async fn save_transcript(&self, host: &dyn HostIo) -> Result<PathBuf, HostError> {
        let text = self.export_transcript().await;
        let file_name = export_file_name(Utc::now().timestamp_millis());
        host.save_text(&file_name, &text).await
    }

    /// 트랜스크립트 복사본
    pub async fn transcript(&self) -> Vec<Turn> {
        self.session.lock().await.transcript().to_vec()
    }

    pub async fn kb_len(&self) -> usize {
        self.session.lock().await.kb_len()
    }
}

// ============================================================================
// Tests
// ============================================================================
