//! Interactive terminal chat against a running server

use anyhow::Result;
use medrag::chat::{ChatSession, Message, Submission, SUGGESTED_QUESTIONS};
use medrag::client::{ApiClient, ClientError};
use medrag::languages::LANGUAGES;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const HELP: &str = "\
Commands:
  /upload FILE   upload a PDF (max 10MB) and start a new conversation
  /lang CODE     answer language, by code or name (e.g. hi, Tamil)
  /langs         list languages
  /suggest       list suggested questions
  /ask N         ask suggested question N
  /help          show this help
  /quit          exit
Anything else is sent as a question.";

/// Prints transcript entries that have not been shown yet
struct Transcript {
    /// Id of the last non-placeholder message printed
    last_shown: Option<String>,
}

impl Transcript {
    fn new() -> Self {
        Self { last_shown: None }
    }

    fn render(&mut self, session: &ChatSession) {
        let messages = session.messages();
        let start = self
            .last_shown
            .as_ref()
            .and_then(|id| messages.iter().position(|m| &m.id == id))
            .map(|i| i + 1)
            .unwrap_or(0);

        for message in &messages[start..] {
            print_message(message);
            if !message.is_typing_indicator() {
                self.last_shown = Some(message.id.clone());
            }
        }
    }
}

fn print_message(message: &Message) {
    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    if message.is_typing_indicator() {
        println!("  {}", message.content);
    } else if message.is_user {
        println!("[{}] you> {}", time, message.content);
    } else {
        println!("[{}] medrag> {}\n", time, message.content);
    }
}

fn prompt(session: &ChatSession) {
    let doc = session.filename().unwrap_or("no document");
    print!("({} | {}) > ", doc, session.language().label());
    let _ = std::io::stdout().flush();
}

/// Message shown in the transcript when a question fails
fn query_failure(err: &ClientError) -> String {
    match err {
        ClientError::Api { status, .. } => format!("Server error: {}", status),
        other => other.to_string(),
    }
}

async fn upload(client: &ApiClient, session: &mut ChatSession, path: &Path) {
    println!("Processing {}...", path.display());
    match client.upload(path).await {
        Ok(uploaded) => {
            let name = if uploaded.filename.is_empty() {
                path.display().to_string()
            } else {
                uploaded.filename
            };
            session.document_loaded(&name, uploaded.document_id);
        }
        // Rejected locally; the current conversation is untouched
        Err(e @ ClientError::InvalidFile) => println!("{}", e),
        Err(ClientError::Api { detail, .. }) => {
            session.document_failed(&format!("File upload failed: {}", detail))
        }
        Err(e) => session.document_failed(&e.to_string()),
    }
}

async fn ask(client: &ApiClient, session: &mut ChatSession, transcript: &mut Transcript, question: &str) {
    let Submission::Send { document_id } = session.submit(question) else {
        return;
    };
    transcript.render(session);

    match client
        .query(&document_id, question, session.language().code)
        .await
    {
        Ok(answer) => session.resolve(answer.response),
        Err(e) => session.fail(&query_failure(&e)),
    }
}

pub async fn run(
    server: &str,
    file: Option<PathBuf>,
    language: &str,
    api_key: Option<String>,
) -> Result<()> {
    let client = ApiClient::new(server)?.with_api_key(api_key);
    let mut session = ChatSession::new();
    let mut transcript = Transcript::new();
    session.set_language(language);

    if let Err(e) = client.health().await {
        warn!("Backend health check failed ({}); the server might be down", e);
    }

    println!("medrag chat, connected to {}", client.base_url());
    println!("Type /help for commands.\n");

    if let Some(path) = file {
        upload(&client, &mut session, &path).await;
        transcript.render(&session);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" => break,
            "/help" => println!("{}", HELP),
            "/langs" => {
                for lang in LANGUAGES {
                    println!("  {:<6} {} ({})", lang.code, lang.label(), lang.native_name);
                }
            }
            "/lang" if !arg.is_empty() => {
                let lang = session.set_language(arg);
                println!("Answers will be in {}", lang.label());
            }
            "/upload" if !arg.is_empty() => {
                upload(&client, &mut session, Path::new(arg)).await;
            }
            "/suggest" => {
                for (i, q) in SUGGESTED_QUESTIONS.iter().enumerate() {
                    println!("  {}. {}", i + 1, q);
                }
            }
            "/ask" => match arg
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| SUGGESTED_QUESTIONS.get(i))
            {
                Some(question) => {
                    ask(&client, &mut session, &mut transcript, question).await
                }
                None => println!("Usage: /ask 1-{}", SUGGESTED_QUESTIONS.len()),
            },
            c if c.starts_with('/') => println!("Unknown command. {}", HELP),
            _ => ask(&client, &mut session, &mut transcript, line).await,
        }

        transcript.render(&session);
    }

    Ok(())
}
