//! Trivia command.

use async_trait::async_trait;
use interactions::{
    CommandDefinition, CommandHandler, InteractionEvent, Options, ParameterSpec, Responder,
};
use providers::{TriviaClient, TriviaQuestion};
use std::sync::Arc;
use tracing::warn;

pub struct TriviaHandler {
    trivia: TriviaClient,
}

fn format_question(q: &TriviaQuestion) -> String {
    let mut choices: Vec<&str> = q.incorrect_answers.iter().map(String::as_str).collect();
    choices.push(&q.correct_answer);
    // Alphabetical order keeps the correct answer's position unpredictable
    // without pulling in a randomness dependency.
    choices.sort_unstable();

    let mut out = format!("**{}** ({})\n{}\n", q.category, q.difficulty, q.question);
    for choice in choices {
        out.push_str(&format!("- {choice}\n"));
    }
    out
}

#[async_trait]
impl CommandHandler for TriviaHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        let difficulty = options.string("difficulty")?;
        let difficulty = (!difficulty.is_empty()).then_some(difficulty);

        responder.defer(false).await?;

        match self.trivia.question(difficulty.as_deref()).await {
            Ok(question) => {
                responder.edit_response(&format_question(&question)).await?;
                responder
                    .follow_up(&format!("Answer: ||{}||", question.correct_answer))
                    .await?;
            }
            Err(e) => {
                warn!(error = %e, "trivia fetch failed");
                responder
                    .edit_response("Failed to fetch a trivia question. Try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command(trivia: TriviaClient) -> CommandDefinition {
    CommandDefinition::new(
        "trivia",
        "Ask a multiple-choice trivia question",
        super::CATEGORY_FUN,
        Arc::new(TriviaHandler { trivia }),
    )
    .option(ParameterSpec::string("difficulty").choices(["easy", "medium", "hard"]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_question_lists_all_choices() {
        let q = TriviaQuestion {
            category: "Science".into(),
            difficulty: "easy".into(),
            question: "What is H2O?".into(),
            correct_answer: "Water".into(),
            incorrect_answers: vec!["Helium".into(), "Air".into()],
        };

        let text = format_question(&q);
        assert!(text.contains("**Science** (easy)"));
        assert!(text.contains("What is H2O?"));
        for choice in ["Water", "Helium", "Air"] {
            assert!(text.contains(&format!("- {choice}")));
        }
        // Alphabetical, so the correct answer is not always last.
        assert!(text.find("- Air").unwrap() < text.find("- Water").unwrap());
    }
}
