use crate::error::{DriveTextError, Result};
use crate::extraction::normalize::normalize;
use crate::extraction::validity::ValidityJudge;

pub mod excel;
pub mod legacy_word;
pub mod pdf;
pub mod text;
pub mod word;

/// State of one extraction method within a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodOutcome {
    NotTried,
    /// The method returned text that failed the validity check.
    Invalid,
    /// The underlying backend errored for a reason unrelated to "no text".
    Errored(String),
    Succeeded,
}

#[derive(Debug)]
pub struct Attempt {
    pub method: &'static str,
    pub outcome: MethodOutcome,
}

/// A named extraction method. Each works from the original immutable buffer,
/// so a failed attempt leaks nothing into the next one.
pub type Method<'a> = (&'static str, &'a dyn Fn(&[u8]) -> std::result::Result<String, String>);

/// Run an ordered fallback chain: normalize every candidate, stop at the
/// first output the judge accepts, and fail terminally once all methods are
/// exhausted. When the final method errored (rather than producing invalid
/// text) the terminal error carries its message.
pub fn run_chain(
    buffer: &[u8],
    methods: &[Method<'_>],
    judge: &ValidityJudge,
    exhausted: &str,
) -> Result<String> {
    let mut attempts: Vec<Attempt> = methods
        .iter()
        .map(|&(name, _)| Attempt {
            method: name,
            outcome: MethodOutcome::NotTried,
        })
        .collect();

    for (i, &(name, method)) in methods.iter().enumerate() {
        match method(buffer) {
            Ok(raw) => {
                let normalized = normalize(&raw);
                if judge.is_valid(&normalized) {
                    attempts[i].outcome = MethodOutcome::Succeeded;
                    tracing::debug!(method = name, chars = normalized.len(), "extraction accepted");
                    return Ok(normalized);
                }
                tracing::debug!(
                    method = name,
                    sample = %truncate(&normalized, 80),
                    "extraction output rejected by validity check"
                );
                attempts[i].outcome = MethodOutcome::Invalid;
            }
            Err(e) => {
                tracing::debug!(method = name, error = %e, "extraction method errored");
                attempts[i].outcome = MethodOutcome::Errored(e);
            }
        }
    }

    tracing::debug!(?attempts, "extraction chain exhausted");
    let message = match attempts.last().map(|a| &a.outcome) {
        Some(MethodOutcome::Errored(e)) => format!("{exhausted}: {e}"),
        _ => exhausted.to_string(),
    };
    Err(DriveTextError::NotVectorizable(message))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
