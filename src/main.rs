mod ai;
mod chat;
mod config;
mod engine;
mod guide;
mod knowledge;
mod logger;
mod matcher;

use std::io::{self, BufRead, Write};

use anyhow::Result;

use config::Config;
use engine::ResponseEngine;
use guide::PalaceGuide;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();
    log::info!("Rajvant Palace guide starting");

    let config = Config::default();
    let mut guide = PalaceGuide::new(config);

    println!("{}: ask me anything about Rajvant Palace.", guide.guide_name());
    println!("Commands: /topics /questions /history /clear /ai /local /quit\n");
    print_questions();

    let stdin = io::stdin();
    loop {
        print!("\nyou> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                guide.clear_history();
                println!("History cleared.");
            }
            "/history" => {
                for message in guide.history() {
                    let who = match message.role {
                        chat::Role::User => "you",
                        chat::Role::Assistant => "guide",
                    };
                    println!("[{}] {}: {}", message.timestamp.format("%H:%M:%S"), who, message.content);
                }
            }
            "/topics" => {
                for group in ResponseEngine::conversation_topics() {
                    println!("{} ({})", group.category, group.color_tag);
                    for topic in group.topics {
                        println!("  - {topic}");
                    }
                }
            }
            "/questions" => print_questions(),
            "/ai" => println!("Mode: {}", mode_after(&mut guide, true)),
            "/local" => println!("Mode: {}", mode_after(&mut guide, false)),
            query => {
                let response = guide.get_response(query).await;
                println!("guide> {}", response.message);
                if !response.suggestions.is_empty() {
                    println!("       you could also ask:");
                    for suggestion in &response.suggestions {
                        println!("       - {suggestion}");
                    }
                }
            }
        }
    }

    log::info!("Rajvant Palace guide shutting down");
    Ok(())
}

fn print_questions() {
    println!("Popular questions:");
    for question in ResponseEngine::quick_questions() {
        println!("  - {question}");
    }
}

fn mode_after(guide: &mut PalaceGuide, enabled: bool) -> &'static str {
    let effective = guide.set_ai_mode(enabled);
    if enabled && !effective {
        log::warn!("AI mode requested without a configured API key");
    }
    guide.current_mode()
}
