//! Prompt text sent to both LLM providers.

use std::fmt::Write;

use crate::context::ExplanationContext;

const HEADER: &str =
    "You are a chess expert. Explain the following chess move in a clear and educational way.";

const INSTRUCTIONS: &[&str] = &[
    "Please explain:",
    "1. What this move accomplishes",
    "2. The key ideas behind it",
    "3. How it compares to alternatives (if provided)",
    "4. Any tactical or strategic themes involved",
    "",
    "Keep the explanation concise but informative.",
];

/// System message for chat-style APIs.
pub const SYSTEM_PROMPT: &str =
    "You are a chess expert who provides clear, educational explanations of chess moves and positions.";

/// Render the context as a plain-text prompt.
pub fn build_prompt(ctx: &ExplanationContext) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", HEADER);
    let _ = writeln!(out);
    let _ = writeln!(out, "FEN: {}", ctx.fen);
    let _ = writeln!(out, "Side to move: {}", ctx.side_to_move);
    let _ = writeln!(out);

    let _ = writeln!(out, "Evaluation: {}", ctx.baseline.score.describe());
    let _ = writeln!(out, "Analysis depth: {}", ctx.baseline.depth);
    if !ctx.baseline.pv.is_empty() {
        let _ = writeln!(out, "Best continuation: {}", ctx.baseline.pv_line());
    }
    let _ = writeln!(out);

    if !ctx.candidates.is_empty() {
        let _ = writeln!(out, "Alternative moves:");
        for candidate in &ctx.candidates {
            let eval = &candidate.evaluation;
            if eval.pv.is_empty() {
                let _ = writeln!(out, "  - {}: {}", candidate.label(), eval.score.describe());
            } else {
                let _ = writeln!(
                    out,
                    "  - {}: {} (line: {})",
                    candidate.label(),
                    eval.score.describe(),
                    eval.pv_line()
                );
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Target audience: {} (adapt vocabulary and depth to this level)",
        ctx.audience
    );
    let _ = writeln!(out);

    out.push_str(&INSTRUCTIONS.join("\n"));
    out
}
