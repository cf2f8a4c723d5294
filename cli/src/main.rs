mod client;
mod fallback;
mod voice;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;

use client::{BotReply, ChatClient, HttpTransport, TransportError};
use voice::{VoiceEvent, VoiceSession, VoiceState};

const DEFAULT_SYSTEM_PROMPT: &str = "You are Hamza's AI assistant. You're smart, friendly, and \
chat like someone on a phone call. Keep responses extremely short (1-2 sentences). Refer to \
Hamza as \"Hamza\" or \"he\".";

#[derive(Parser, Debug)]
#[command(name = "portfolio-chat", about = "Terminal client for the portfolio chat proxy")]
struct Cli {
    /// Base URL of the chat proxy.
    #[arg(long, env = "CHAT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Per-request timeout in seconds; an expired request is cancelled.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    /// System prompt sent with every request.
    #[arg(long, env = "CHAT_SYSTEM_PROMPT", default_value = DEFAULT_SYSTEM_PROMPT)]
    system_prompt: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("stdin read failed: {0}")]
    Stdin(#[from] io::Error),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let transport = HttpTransport::new(&cli.base_url, cli.timeout_secs).map_err(|e| match e {
        TransportError::Network(detail) => CliError::HttpClientBuild(detail),
        other => CliError::HttpClientBuild(other.to_string()),
    })?;
    let mut chat = ChatClient::new(Arc::new(transport), cli.system_prompt);
    let mut voice = VoiceSession::new();

    println!(
        "Hi there! I'm Hamza's AI assistant. Ask about his skills, projects, or how to get \
         in touch. Type /voice to toggle call mode, /history to review the conversation, \
         /quit to leave."
    );

    let stdin = io::stdin();
    loop {
        if voice.state() == VoiceState::Idle {
            print!("> ");
        } else {
            print!("[{}] > ", voice.state());
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/quit" {
            break;
        }
        if text == "/voice" {
            let state = voice.apply(VoiceEvent::Toggle);
            println!("[voice] {state}");
            continue;
        }
        if text == "/history" {
            for turn in chat.history() {
                println!("{}: {}", turn.role, turn.joined_text());
            }
            continue;
        }

        // In call mode, typed input stands in for a captured transcript and
        // interrupts any reply still being spoken.
        if voice.is_listening() {
            if voice.is_speaking() {
                voice.apply(VoiceEvent::SpeechDetected);
            }
            voice.apply(VoiceEvent::FinalTranscript);
        }

        println!("...");
        match chat.send_message(text).await {
            BotReply::Upstream(reply) => println!("{reply}"),
            BotReply::Fallback { notice, text } => {
                eprintln!("{notice}");
                println!("{text}");
            }
        }

        if voice.is_processing() {
            voice.apply(VoiceEvent::ReplyDelivered);
            voice.start_speaking();
        }
    }

    Ok(())
}
