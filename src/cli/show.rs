//! Show command - render a stored evaluation

use super::{emit, resolve_output, AppContext};
use anyhow::Result;
use ecoscore::reporters::{self, EvaluationReport, OutputFormat};
use std::str::FromStr;
use uuid::Uuid;

/// Run the show command
pub fn run(
    ctx: &AppContext,
    id: &Uuid,
    format: Option<&str>,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let store = ctx.open_store()?;
    let Some(evaluation) = store.get_evaluation(id)? else {
        anyhow::bail!("No evaluation with id {}", id);
    };

    let history = store.list_evaluations(&evaluation.company_id)?;
    let rep_records = store.list_rep_records(&evaluation.company_id)?;
    let report = EvaluationReport::from_stored(&evaluation)
        .with_history(&history, ctx.config.report.history_limit)
        .with_rep_records(rep_records);

    let format = OutputFormat::from_str(ctx.config.format(format))?;
    let rendered = reporters::report_with_format(&report, format, ctx.color())?;
    emit(&rendered, resolve_output(output, format).as_deref())
}
