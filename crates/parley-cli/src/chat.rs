//! `parley chat`: a terminal interview

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use parley_core::ai::SharedCompletionClient;
use parley_core::config::ParleyConfig;
use parley_core::interview::InterviewContext;
use parley_core::storage::CredentialStore;
use parley_core::{InterviewMode, InterviewSession};

const QUIT_COMMAND: &str = "/quit";

pub async fn run(settings: &ParleyConfig, context: InterviewContext, mode: InterviewMode) -> Result<()> {
    let credentials = CredentialStore::load()?;
    let client: SharedCompletionClient = Arc::new(
        settings
            .build_ai_client(&credentials)?
            .context("No API key configured; run `parley login` or set the provider's API key variable")?,
    );

    let session = InterviewSession::new(client, context, mode);
    tracing::info!("Terminal interview {} ({} mode)", session.id(), mode);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    converse(session, stdin, &mut stdout).await
}

/// Drive an interview: opening question, then one turn per input line.
///
/// Blank lines are ignored. A failed turn is reported and the respondent
/// may answer again.
async fn converse<R, W>(mut session: InterviewSession, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let opening = session.start().await?;
    writeln!(out, "Interviewer: {}", opening)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == QUIT_COMMAND {
            break;
        }

        match session.chat(line).await {
            Ok(reply) => writeln!(out, "Interviewer: {}", reply)?,
            Err(e) => {
                tracing::warn!("Turn failed: {:#}", e);
                writeln!(out, "[error] {}", e)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Interview ended after {} turns.", session.transcript().len())?;
    Ok(())
}
