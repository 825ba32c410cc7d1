//! CLI 모듈
//!
//! faq-assist CLI 명령어 정의 및 구현

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::ingest::LocalFs;
use crate::knowledge::{get_data_dir, KnowledgeBase, KnowledgeStats};
use crate::session::{Role, SessionConfig, SessionHandle, Turn};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "faq-assist")]
#[command(version, about = "인턴십 FAQ 매칭 어시스턴트", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 대화형 채팅 (/categories, /export, /load <파일>, /quit)
    Chat {
        /// 추가로 적재할 FAQ JSON 파일
        #[arg(short, long)]
        faq: Vec<PathBuf>,
    },

    /// 단일 질문
    Ask {
        /// 질문
        query: String,

        /// 추가로 적재할 FAQ JSON 파일
        #[arg(short, long)]
        faq: Vec<PathBuf>,
    },

    /// FAQ 카테고리 목록
    Categories {
        /// 추가로 적재할 FAQ JSON 파일
        #[arg(short, long)]
        faq: Vec<PathBuf>,
    },

    /// 질문 목록을 실행하고 대화 내용을 파일로 저장
    Export {
        /// 순서대로 실행할 질문들
        queries: Vec<String>,

        /// 추가로 적재할 FAQ JSON 파일
        #[arg(short, long)]
        faq: Vec<PathBuf>,

        /// 저장 디렉토리 (기본: FAQ_ASSIST_EXPORT_DIR 또는 ~/.faq-assist/exports)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// 상태 확인
    Status,
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    let config = SessionConfig::from_env().context("설정 로드 실패")?;

    match cli.command {
        Commands::Chat { faq } => cmd_chat(&config, &faq).await,
        Commands::Ask { query, faq } => cmd_ask(&config, &query, &faq).await,
        Commands::Categories { faq } => cmd_categories(&config, &faq).await,
        Commands::Export { queries, faq, out } => {
            let config = match out {
                Some(dir) => config.with_export_dir(dir),
                None => config,
            };
            cmd_export(&config, &queries, &faq).await
        }
        Commands::Status => cmd_status(&config).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 세션 생성 후 FAQ 파일 적재
async fn open_session(config: &SessionConfig, host: &LocalFs, faq: &[PathBuf]) -> Result<SessionHandle> {
    let handle = SessionHandle::new(config);

    for path in faq {
        let outcome = handle
            .load_faq_file(host, path)
            .await
            .with_context(|| format!("FAQ 파일 읽기 실패: {}", path.display()))?;

        if outcome.rejected {
            bail!("JSON 배열 형식이 아닙니다: {}", path.display());
        }
        tracing::info!("Loaded {} entries from {}", outcome.accepted, path.display());
    }

    Ok(handle)
}

/// 채팅 명령어 (chat)
///
/// 표준 입력에서 한 줄씩 질문을 읽어 답변합니다.
async fn cmd_chat(config: &SessionConfig, faq: &[PathBuf]) -> Result<()> {
    let host = LocalFs::new(&config.export_dir);
    let handle = open_session(config, &host, faq).await?;
    let session_id = handle.id().await;
    tracing::info!(session = %session_id, "Chat session started");

    for turn in handle.transcript().await {
        print_turn(&turn);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().context("stdout flush 실패")?;

        let Some(line) = lines.next_line().await.context("입력 읽기 실패")? else {
            break;
        };
        let input = line.trim_end_matches(['\r', '\n']);

        match parse_command(input) {
            ChatCommand::Quit => break,
            ChatCommand::Categories => {
                handle.list_categories().await;
                print_last_turn(&handle).await;
            }
            ChatCommand::Export => match handle.save_transcript(&host).await {
                Ok(path) => println!("[OK] 대화 내용 저장됨: {}", path.display()),
                Err(e) => println!("[!] 저장 실패: {}", e),
            },
            ChatCommand::Load(path) => match handle.load_faq_file(&host, &path).await {
                Ok(_) => print_last_turn(&handle).await,
                Err(e) => println!("[!] {}", e),
            },
            ChatCommand::Query(text) => {
                if let Some(reply) = handle.submit_query(&text).await {
                    print_turn(&reply);
                }
            }
        }
    }

    println!("[*] 대화를 종료합니다. (FAQ {} 건)", handle.kb_len().await);
    Ok(())
}

/// 질문 명령어 (ask)
async fn cmd_ask(config: &SessionConfig, query: &str, faq: &[PathBuf]) -> Result<()> {
    if query.trim().is_empty() {
        bail!("질문이 비어 있습니다");
    }

    let host = LocalFs::new(&config.export_dir);
    let handle = open_session(config, &host, faq).await?;

    if let Some(reply) = handle.submit_query(query).await {
        print_turn(&reply);
    }

    Ok(())
}

/// 카테고리 명령어 (categories)
async fn cmd_categories(config: &SessionConfig, faq: &[PathBuf]) -> Result<()> {
    let host = LocalFs::new(&config.export_dir);
    let handle = open_session(config, &host, faq).await?;

    let counts = handle.list_categories().await;
    println!("[OK] 카테고리 ({} 개):\n", counts.len());

    for (category, count) in counts {
        let name = if category.is_empty() { "-" } else { category.as_str() };
        println!("  {:<12} {} 건", name, count);
    }

    Ok(())
}

/// 내보내기 명령어 (export)
async fn cmd_export(config: &SessionConfig, queries: &[String], faq: &[PathBuf]) -> Result<()> {
    let host = LocalFs::new(&config.export_dir);
    let handle = open_session(config, &host, faq).await?;

    for query in queries {
        if handle.submit_query(query).await.is_none() {
            println!("[!] 빈 질문 건너뜀");
        }
    }

    let path = handle
        .save_transcript(&host)
        .await
        .context("대화 내용 저장 실패")?;

    let size = tokio::fs::metadata(&path).await.map(|m| m.len() as usize).unwrap_or(0);
    println!("[OK] 대화 내용 저장됨: {}", path.display());
    println!("     {} 턴, {}", handle.transcript().await.len(), format_bytes(size));

    Ok(())
}

/// 상태 명령어 (status)
async fn cmd_status(config: &SessionConfig) -> Result<()> {
    println!("faq-assist v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("[*] 데이터 디렉토리: {}", get_data_dir().display());
    let host = LocalFs::new(&config.export_dir);
    println!("[*] 내보내기 디렉토리: {}", host.output_dir().display());
    println!("[*] 응답 지연: {} ms", config.response_delay.as_millis());

    println!("{}", kb_summary(&KnowledgeBase::seeded().stats()));

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 채팅 입력 해석 결과
#[derive(Debug, PartialEq)]
enum ChatCommand {
    Quit,
    Categories,
    Export,
    Load(PathBuf),
    Query(String),
}

/// 슬래시 명령어 해석 (그 외 입력은 질문)
fn parse_command(input: &str) -> ChatCommand {
    let trimmed = input.trim();

    match trimmed {
        "/quit" | "/exit" => ChatCommand::Quit,
        "/categories" => ChatCommand::Categories,
        "/export" => ChatCommand::Export,
        _ => match trimmed.strip_prefix("/load ") {
            Some(path) if !path.trim().is_empty() => ChatCommand::Load(PathBuf::from(path.trim())),
            _ => ChatCommand::Query(input.to_string()),
        },
    }
}

async fn print_last_turn(handle: &SessionHandle) {
    if let Some(turn) = handle.transcript().await.last() {
        print_turn(turn);
    }
}

/// 턴 출력
fn print_turn(turn: &Turn) {
    let who = match turn.role {
        Role::User => "you",
        Role::Bot => "bot",
    };

    println!("\n[{}] {}", who, turn.text);

    if let Some(note) = match_note(turn) {
        println!("      {}", note);
    }
    println!();
}

/// 매칭 답변의 카테고리/확신도 표기 (매칭이 아니면 None)
fn match_note(turn: &Turn) -> Option<String> {
    if !turn.is_match() {
        return None;
    }

    Some(format!(
        "(카테고리: {} | 확신도: {:.2})",
        turn.category.as_deref().unwrap_or("-"),
        turn.confidence.unwrap_or_default()
    ))
}

/// 지식베이스 요약
fn kb_summary(stats: &KnowledgeStats) -> String {
    format!(
        "[OK] Knowledge Base: {} FAQs loaded\n     카테고리: {} 개",
        stats.entry_count, stats.category_count
    )
}

/// 바이트 크기 포맷팅
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

// ============================================================================
// Tests
// ============================================================================
