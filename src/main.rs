use crossterm::style::Stylize;
use gitpilot::assist::{Assistant, AssistantResponse, RiskLevel};
use gitpilot::config::Config;
use gitpilot::git::Inspector;
use gitpilot::history::SuggestionLogger;
use gitpilot::llm::{AnthropicClient, CommitMessageClient};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let inspector = match Inspector::discover() {
        Ok(inspector) => inspector,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let backend: Option<Box<dyn CommitMessageClient>> = config.get_api_key().map(|key| {
        Box::new(AnthropicClient::with_model(key, config.llm.model.clone()))
            as Box<dyn CommitMessageClient>
    });
    if backend.is_none() {
        eprintln!("Note: no API key configured; commit messages use a fixed fallback.");
    }

    let assistant = Assistant::new(backend)
        .with_enrichment_timeout(Duration::from_secs(config.llm.enrichment_timeout_secs));

    let logger = if config.behavior.log_suggestions {
        SuggestionLogger::new().ok()
    } else {
        None
    };

    // One-shot mode: the whole argument list is the query
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let query = args.join(" ");
        answer(&assistant, &inspector, logger.as_ref(), &query).await;
        return Ok(());
    }

    // Interactive mode
    println!("gitpilot - ask about git in plain language ('exit' to quit)");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        answer(&assistant, &inspector, logger.as_ref(), query).await;
    }

    Ok(())
}

/// Capture a fresh snapshot, run the pipeline, render the response
async fn answer(
    assistant: &Assistant,
    inspector: &Inspector,
    logger: Option<&SuggestionLogger>,
    query: &str,
) {
    let snapshot = match inspector.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error reading repository state: {}", e);
            return;
        }
    };

    let response = assistant.respond(query, &snapshot).await;

    if let Some(logger) = logger {
        let action = assistant.classifier().classify(query).action;
        if let Err(e) = logger.log_suggestion(query, action.as_str(), &response.commands) {
            eprintln!("Warning: failed to write suggestion log: {}", e);
        }
    }

    render(&response);
}

/// Print one response; rendering only, the commands are never executed
fn render(response: &AssistantResponse) {
    println!("\n{}", response.interpretation.clone().bold());

    if !response.commands.is_empty() {
        println!("\nSuggested commands:");
        for (i, cmd) in response.commands.iter().enumerate() {
            let line = format!("  {}. {}", i + 1, cmd.display());
            let styled = match cmd.risk_level {
                RiskLevel::Safe => line.green(),
                RiskLevel::Moderate => line.yellow(),
                RiskLevel::Destructive => line.red(),
            };
            println!("{}", styled);
            println!("     {}", cmd.description);
            if cmd.requires_confirmation {
                println!("     {}", "(requires confirmation)".dark_yellow());
            }
            if let Some(explanation) = &cmd.explanation {
                println!("     {}", explanation);
            }
        }
    }

    if !response.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &response.warnings {
            println!("{}", format!("  ! {}", warning).yellow());
        }
    }

    if let Some(alternatives) = &response.alternatives {
        println!("\nSafer alternatives:");
        for alt in alternatives {
            println!("  {} - {}", alt.display().green(), alt.description);
        }
    }

    println!("\n{}", response.explanation);
    println!("(confidence: {:.1})", response.confidence);
}
