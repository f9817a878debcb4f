//! Calculator command using meval for safe expression evaluation.

use async_trait::async_trait;
use interactions::{
    CommandDefinition, CommandHandler, InteractionEvent, Options, ParameterSpec, Responder,
};
use std::sync::Arc;

pub struct CalcHandler;

fn format_result(value: f64, precision: i64) -> String {
    if precision > 0 {
        format!("{value:.prec$}", prec = precision as usize)
    } else {
        format!("{value}")
    }
}

#[async_trait]
impl CommandHandler for CalcHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        let expression = options.string("expression")?;
        let precision = options.integer("precision")?;

        let expression = expression.trim();
        if expression.is_empty() {
            responder
                .respond_ephemeral("Give me an expression to evaluate, e.g. `2 + 2`.")
                .await?;
            return Ok(());
        }

        match meval::eval_str(expression) {
            Ok(value) => {
                responder
                    .respond(&format!("`{expression}` = {}", format_result(value, precision)))
                    .await?;
            }
            Err(e) => {
                responder
                    .respond_ephemeral(&format!("Could not evaluate `{expression}`: {e}"))
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command() -> CommandDefinition {
    CommandDefinition::new(
        "calc",
        "Evaluate a math expression",
        super::CATEGORY_UTILITY,
        Arc::new(CalcHandler),
    )
    .option(ParameterSpec::string("expression").required())
    .option(ParameterSpec::integer("precision").bounds(0, 12))
}
