//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::build_provider;
use crate::summary::{MeetingSummary, SummaryPipeline};

/// Summarize a transcript file (or stdin) and print or save the result
pub async fn summarize_transcript(
    settings: &Settings,
    file: Option<PathBuf>,
    format: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    if !matches!(format, "text" | "json") {
        anyhow::bail!("Unsupported format: {}. Supported: text, json", format);
    }

    let transcript = read_transcript(file.as_deref())?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    let provider = build_provider(settings)?;
    tracing::debug!(provider = provider.name(), "Using LLM provider");

    let summary = SummaryPipeline::from_settings(provider, &settings.pipeline)
        .summarize(&transcript)
        .await
        .context("Failed to summarize transcript")?;

    let content = match format {
        "json" => format!("{}\n", serde_json::to_string_pretty(&summary)?),
        _ => render_text(&summary),
    };

    if let Some(path) = output {
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        println!("Summary written to: {}", path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn read_transcript(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display())),
        _ => {
            let mut transcript = String::new();
            std::io::stdin()
                .read_to_string(&mut transcript)
                .context("Failed to read transcript from stdin")?;
            Ok(transcript)
        }
    }
}

fn render_text(summary: &MeetingSummary) -> String {
    if summary.is_empty() {
        return "No decisions, topics, or action items found.\n".to_string();
    }

    let mut output = String::new();

    output.push_str("## Decisions\n");
    if summary.key_decisions.is_empty() {
        output.push_str("None\n");
    }
    for decision in &summary.key_decisions {
        match &decision.mover {
            Some(mover) => {
                output.push_str(&format!("- {} (moved by {})\n", decision.decision, mover))
            }
            None => output.push_str(&format!("- {}\n", decision.decision)),
        }
    }

    output.push_str("\n## Topics\n");
    if summary.key_topics.is_empty() {
        output.push_str("None\n");
    }
    for topic in &summary.key_topics {
        output.push_str(&format!("- {}\n", topic));
    }

    output.push_str("\n## Action Items\n");
    if summary.action_items.is_empty() {
        output.push_str("None\n");
    }
    for item in &summary.action_items {
        let deadline = item.deadline.as_deref().unwrap_or("no deadline");
        output.push_str(&format!(
            "- [{}] {} ({})\n",
            item.speaker, item.task, deadline
        ));
    }

    output
}
