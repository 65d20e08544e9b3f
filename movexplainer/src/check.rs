//! `movexplainer check`: reachability of validator, engine and LLM.

use std::fmt;

use chess::{MoveValidator, START_FEN};
use engine::PositionEvaluator;
use explainer::Explainer;

/// Depth of the smoke-test search.
const CHECK_DEPTH: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub component: &'static str,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub lines: Vec<CheckLine>,
}

impl CheckReport {
    fn push(&mut self, component: &'static str, ok: bool, detail: impl Into<String>) {
        self.lines.push(CheckLine {
            component,
            ok,
            detail: detail.into(),
        });
    }

    pub fn all_ok(&self) -> bool {
        self.lines.iter().all(|line| line.ok)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let mark = if line.ok { "ok" } else { "FAIL" };
            writeln!(f, "[{:>4}] {:<10} {}", mark, line.component, line.detail)?;
        }
        Ok(())
    }
}

pub async fn run_checks(
    validator: &impl MoveValidator,
    engine: &impl PositionEvaluator,
    explainer: &impl Explainer,
    llm_label: &str,
) -> CheckReport {
    let mut report = CheckReport::default();

    match validator.legal_moves(START_FEN) {
        Ok(moves) => report.push(
            "validator",
            moves.len() == 20,
            format!("{} legal moves in the start position", moves.len()),
        ),
        Err(e) => report.push("validator", false, e.to_string()),
    }

    match engine.evaluate(START_FEN, CHECK_DEPTH).await {
        Ok(eval) => report.push(
            "engine",
            true,
            format!("start position {} at depth {}", eval.score, eval.depth),
        ),
        Err(e) => report.push("engine", false, e.to_string()),
    }

    let available = explainer.is_available().await;
    report.push(
        "llm",
        available,
        if available {
            format!("{} reachable", llm_label)
        } else {
            format!("{} not reachable", llm_label)
        },
    );

    report
}
