//! SQLite-backed conversation and feedback store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::domain::errors::DomainResult;
use crate::domain::models::AnswerRecord;
use crate::domain::ports::ConversationRepository;

/// Persists answered conversations and the +1/-1 feedback left on them.
pub struct SqliteConversationRepository {
    pool: SqlitePool,
}

impl SqliteConversationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the two tables if they are not present yet.
    pub async fn init_schema(&self) -> DomainResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                model_used TEXT NOT NULL,
                response_time REAL NOT NULL,
                relevance TEXT NOT NULL,
                relevance_explanation TEXT NOT NULL,
                prompt_tokens INTEGER NOT NULL,
                completion_tokens INTEGER NOT NULL,
                total_tokens INTEGER NOT NULL,
                eval_prompt_tokens INTEGER NOT NULL,
                eval_completion_tokens INTEGER NOT NULL,
                eval_total_tokens INTEGER NOT NULL,
                cost_usd REAL NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id TEXT NOT NULL,
                feedback INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ConversationRepository for SqliteConversationRepository {
    async fn save_conversation(
        &self,
        conversation_id: &str,
        question: &str,
        answer: &AnswerRecord,
    ) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO conversations (
                id, question, answer, model_used, response_time,
                relevance, relevance_explanation,
                prompt_tokens, completion_tokens, total_tokens,
                eval_prompt_tokens, eval_completion_tokens, eval_total_tokens,
                cost_usd, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(conversation_id)
        .bind(question)
        .bind(&answer.answer)
        .bind(&answer.model_used)
        .bind(answer.response_time)
        .bind(answer.relevance.as_str())
        .bind(&answer.relevance_explanation)
        .bind(i64::from(answer.prompt_tokens))
        .bind(i64::from(answer.completion_tokens))
        .bind(i64::from(answer.total_tokens))
        .bind(i64::from(answer.eval_prompt_tokens))
        .bind(i64::from(answer.eval_completion_tokens))
        .bind(i64::from(answer.eval_total_tokens))
        .bind(answer.cost_usd)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(conversation_id, "Saved conversation");
        Ok(())
    }

    async fn save_feedback(&self, conversation_id: &str, value: i32) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO feedback (conversation_id, feedback, created_at) VALUES (?, ?, ?)",
        )
        .bind(conversation_id)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(conversation_id, value, "Saved feedback");
        Ok(())
    }
}
