//! `savor ask` — answer one question, or run an interactive loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use uuid::Uuid;

use crate::domain::models::AnswerRecord;
use crate::domain::ports::ConversationRepository;
use crate::infrastructure::sqlite::{create_pool, SqliteConversationRepository};
use crate::services::Engines;

#[derive(Args)]
pub struct AskArgs {
    /// Question to answer; interactive mode starts when omitted
    pub question: Option<String>,
}

pub async fn execute(args: AskArgs, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let engines = Engines::from_config(&config).context("Failed to construct engines")?;

    let pool = create_pool(&config.database)
        .await
        .context("Failed to open conversation store")?;
    let conversations = SqliteConversationRepository::new(pool);
    conversations.init_schema().await?;
    let conversations: Arc<dyn ConversationRepository> = Arc::new(conversations);

    if let Some(task) = engines.retrieval.ensure_indexed().await? {
        eprintln!("Collection was missing; indexing in the background. Early answers may be incomplete.");
        drop(task);
    }

    match args.question {
        Some(question) => {
            let (conversation_id, record) =
                answer_once(&engines, conversations.as_ref(), &question).await?;
            print_answer(&conversation_id, &record, json);
            Ok(())
        }
        None => interactive_loop(&engines, conversations.as_ref(), json).await,
    }
}

async fn answer_once(
    engines: &Engines,
    conversations: &dyn ConversationRepository,
    question: &str,
) -> Result<(String, AnswerRecord)> {
    let record = engines.composer.answer(question).await?;
    let conversation_id = Uuid::new_v4().to_string();
    conversations
        .save_conversation(&conversation_id, question, &record)
        .await?;
    Ok((conversation_id, record))
}

fn print_answer(conversation_id: &str, record: &AnswerRecord, json: bool) {
    if json {
        let mut value = serde_json::to_value(record).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "conversation_id".to_string(),
                serde_json::Value::String(conversation_id.to_string()),
            );
        }
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }

    println!("\n{}", record.answer);
    println!(
        "\n{} relevance={} cost=${:.6} time={:.2}s tokens={}+{}",
        style("──").dim(),
        style(record.relevance.as_str()).cyan(),
        record.cost_usd,
        record.response_time,
        record.total_tokens,
        record.eval_total_tokens,
    );
}

async fn interactive_loop(
    engines: &Engines,
    conversations: &dyn ConversationRepository,
    json: bool,
) -> Result<()> {
    let term = console::Term::stdout();
    println!("Ask about restaurants and menu items. Empty question exits.");

    loop {
        term.write_str(&format!("{} ", style("Question>").green().bold()))?;
        let question = term.read_line()?;
        let question = question.trim();
        if question.is_empty() {
            println!("Goodbye!");
            return Ok(());
        }

        let (conversation_id, record) =
            match answer_once(engines, conversations, question).await {
                Ok(result) => result,
                Err(err) => {
                    eprintln!("{} {err:#}", style("Error:").red());
                    continue;
                }
            };

        print_answer(&conversation_id, &record, json);

        term.write_str("Rate this answer [+/-, Enter to skip]: ")?;
        let rating = term.read_line()?;
        let value = match rating.trim() {
            "+" | "+1" => Some(1),
            "-" | "-1" => Some(-1),
            _ => None,
        };

        match value {
            Some(value) => {
                conversations.save_feedback(&conversation_id, value).await?;
                println!("Feedback recorded.");
            }
            None => println!("Feedback skipped."),
        }
    }
}
