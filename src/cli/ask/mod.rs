//! Ask command - triage one question from the terminal

use clap::Args;

use crate::config::ProviderKind;
use crate::domain::TriageOutcome;
use crate::infrastructure::logging::init_logging;

/// Arguments for the ask command
#[derive(Args, Clone, Debug)]
pub struct AskArgs {
    /// Symptom description; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Skip the advice provider and answer from the keyword table
    #[arg(long)]
    pub fallback_only: bool,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.words.join(" ")
    }
}

/// Print the answer on stdout; the outcome goes to stderr
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = crate::cli::serve::load_config();
    if args.fallback_only {
        config.provider.kind = ProviderKind::None;
    }
    init_logging(&config.logging);

    let service = crate::create_triage_service(&config)?;
    let question = args.question();
    let advice = service.triage(Some(&question)).await?;

    println!("{}", advice.answer);
    if advice.outcome == TriageOutcome::FellBack {
        eprintln!("(answered by keyword fallback)");
    }

    Ok(())
}
