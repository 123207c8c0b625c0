//! CLI entrypoint for team-align
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use align_application::{
    AlignmentOverviewUseCase, AnalysisLog, DetectConflictError, DetectConflictInput,
    DetectConflictUseCase, ExportPrdError, ExportPrdUseCase, GenerateQuestionsInput,
    GenerateQuestionsUseCase, InitWorkspaceUseCase, NoProgress, ProgressNotifier, ProjectStore,
    ResponseStore, ReviewConsensusUseCase, SubmitResponseInput, SubmitResponseUseCase,
    SynthesizeConsensusError, SynthesizeConsensusUseCase,
};
use align_domain::{Member, MemberId, SectionCategory, SectionId, StreamEvent};
use align_infrastructure::{
    AnthropicCompletionGateway, ConfigLoader, FileConfig, JsonFileStore, JsonlAnalysisLogger,
    OpenAiEmbeddingGateway,
};
use align_presentation::{
    Cli, Command, ConsoleFormatter, OutputStyle, ProgressReporter, SimpleProgress,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // The guard must outlive the run so buffered log lines reach the file
    let _log_guard = init_tracing(filter, cli.log_file.as_deref())?;

    info!("Starting team-align");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let store_path = cli
        .workspace
        .clone()
        .unwrap_or_else(|| config.workspace.store_path.clone());
    let store = Arc::new(JsonFileStore::open(&store_path)?);

    let analysis_log = config
        .workspace
        .analysis_log
        .as_ref()
        .and_then(JsonlAnalysisLogger::new)
        .map(|logger| Arc::new(logger) as Arc<dyn AnalysisLog>);

    // === Dependency Injection ===
    let app = App {
        store,
        config,
        analysis_log,
        progress: progress_notifier(cli.quiet, cli.verbose),
    };

    match cli.command {
        Command::Init { name, description } => app.init(&name, description.as_deref()).await,
        Command::Questions { category, defaults } => app.questions(&category, defaults).await,
        Command::Submit {
            category,
            member,
            name,
            content,
            file,
            draft,
        } => {
            app.submit(
                &category,
                &member,
                name.as_deref(),
                content,
                file.as_deref(),
                draft,
            )
            .await
        }
        Command::Status => app.status().await,
        Command::Analyze {
            category,
            threshold,
            output,
        } => app.analyze(&category, threshold, output).await,
        Command::Consensus { category } => app.consensus(&category).await,
        Command::Approve { category, member } => app.approve(&category, &member).await,
        Command::Reject { category } => app.reject(&category).await,
        Command::Export { out, no_stream } => app.export(out.as_deref(), no_stream).await,
        Command::Config => app.show_config(),
    }
}

/// Everything a command handler needs, assembled once in `main`.
///
/// The store is shared by all four store ports. Provider gateways are
/// built per command so that commands which never call a provider
/// (init, status, approve, reject) work without any API key.
struct App {
    store: Arc<JsonFileStore>,
    config: FileConfig,
    analysis_log: Option<Arc<dyn AnalysisLog>>,
    progress: Box<dyn ProgressNotifier>,
}

impl App {
    fn completions(&self) -> Arc<AnthropicCompletionGateway> {
        Arc::new(AnthropicCompletionGateway::new(
            &self.config.providers.anthropic,
            self.config.models.completion.clone(),
            self.config.analysis.to_params().request_timeout(),
        ))
    }

    fn embeddings(&self) -> Arc<OpenAiEmbeddingGateway> {
        Arc::new(
            OpenAiEmbeddingGateway::new(
                &self.config.providers.openai,
                self.config.models.embedding.clone(),
                self.config.analysis.to_params().request_timeout(),
            )
            .with_dimensions(self.config.models.embedding_dimensions),
        )
    }

    async fn init(&self, name: &str, description: Option<&str>) -> Result<()> {
        let use_case = InitWorkspaceUseCase::new(self.store.clone(), self.store.clone());
        let (project, sections) = use_case.execute(name, description).await?;

        println!(
            "Initialized '{}' at {}",
            project.name,
            self.store.path().display()
        );
        for section in &sections {
            println!("  {}. {}", section.position + 1, section.title);
        }
        println!();
        println!("Next: `team-align questions problem` to get the discussion going.");
        Ok(())
    }

    async fn questions(&self, category: &str, defaults: bool) -> Result<()> {
        let category = parse_category(category)?;

        let mut input = GenerateQuestionsInput::new(category);
        if !defaults {
            if let Some(project) = self.store.project().await? {
                input = input.with_project_context(project.context());
            }
        }

        let use_case = GenerateQuestionsUseCase::new(self.completions());
        let set = use_case
            .execute_with_progress(input, self.progress.as_ref())
            .await;

        println!("{}", ConsoleFormatter::format_questions(&set));
        Ok(())
    }

    async fn submit(
        &self,
        category: &str,
        member_id: &str,
        name: Option<&str>,
        content: Option<String>,
        file: Option<&Path>,
        draft: bool,
    ) -> Result<()> {
        let category = parse_category(category)?;
        let section_id = SectionId::new(category.as_str());

        let content = if let Some(path) = file {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        } else if let Some(text) = content {
            text
        } else {
            bail!("Provide the answer inline or with --file");
        };

        let member = Member::new(member_id, name.unwrap_or(member_id));
        let mut input = SubmitResponseInput::new(section_id.clone(), member, content);
        if draft {
            input = input.as_draft();
        }

        let mut use_case =
            SubmitResponseUseCase::new(self.store.clone(), self.store.clone(), self.embeddings());
        if let Some(log) = &self.analysis_log {
            use_case = use_case.with_analysis_log(log.clone());
        }

        let outcome = use_case
            .execute_with_progress(input, self.progress.as_ref())
            .await?;

        let verb = if outcome.updated { "Updated" } else { "Recorded" };
        let kind = if outcome.response.is_draft() {
            "draft"
        } else {
            "answer"
        };
        println!(
            "{} {} for '{}' from {}.",
            verb,
            kind,
            category,
            outcome.response.author()
        );

        if outcome.embedding_skipped {
            println!(
                "Embedding failed; the answer is stored but stays out of analysis until resubmitted."
            );
        }

        let submitted = self.store.submitted_responses(&section_id).await?;
        if submitted.len() >= 2 {
            println!(
                "{} submitted answers. Run `team-align analyze {}` to compare them.",
                submitted.len(),
                category
            );
        }
        Ok(())
    }

    async fn status(&self) -> Result<()> {
        let Some(project) = self.store.project().await? else {
            bail!("No workspace here. Run `team-align init <name>` first.");
        };

        let members = self.store.members().await?;
        let use_case = AlignmentOverviewUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
        );
        let alignment = use_case.execute().await?;

        println!(
            "{}",
            ConsoleFormatter::format_overview(Some(&project), &alignment, &members)
        );
        Ok(())
    }

    async fn analyze(
        &self,
        category: &str,
        threshold: Option<f32>,
        output: OutputStyle,
    ) -> Result<()> {
        let category = parse_category(category)?;
        if let Some(t) = threshold
            && !(0.0..=1.0).contains(&t)
        {
            bail!("Threshold must be between 0.0 and 1.0, got {t}");
        }

        let mut use_case = DetectConflictUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.completions(),
            self.config.analysis.to_params(),
        );
        if let Some(log) = &self.analysis_log {
            use_case = use_case.with_analysis_log(log.clone());
        }

        let mut input = DetectConflictInput::new(SectionId::new(category.as_str()));
        if let Some(t) = threshold {
            input = input.with_threshold(t);
        }

        let report = match use_case
            .execute_with_progress(input, self.progress.as_ref())
            .await
        {
            Ok(report) => report,
            Err(DetectConflictError::Completion(e)) => {
                return Err(provider_failure("Conflict analysis", &e));
            }
            Err(e) => return Err(e.into()),
        };

        let rendered = match output {
            OutputStyle::Text => ConsoleFormatter::format_report(&report),
            OutputStyle::Json => ConsoleFormatter::format_report_json(&report),
        };
        println!("{rendered}");
        Ok(())
    }

    async fn consensus(&self, category: &str) -> Result<()> {
        let category = parse_category(category)?;

        let mut use_case = SynthesizeConsensusUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.completions(),
        );
        if let Some(log) = &self.analysis_log {
            use_case = use_case.with_analysis_log(log.clone());
        }

        let consensus = match use_case
            .execute_with_progress(SectionId::new(category.as_str()), self.progress.as_ref())
            .await
        {
            Ok(consensus) => consensus,
            Err(SynthesizeConsensusError::Completion(e)) => {
                return Err(provider_failure("Consensus synthesis", &e));
            }
            Err(e) => return Err(e.into()),
        };

        println!("{}", ConsoleFormatter::format_consensus(&consensus));
        println!(
            "Approve with `team-align approve {category} -m <member>`, or reject with `team-align reject {category}`."
        );
        Ok(())
    }

    async fn approve(&self, category: &str, member: &str) -> Result<()> {
        let category = parse_category(category)?;

        let mut use_case = ReviewConsensusUseCase::new(self.store.clone());
        if let Some(log) = &self.analysis_log {
            use_case = use_case.with_analysis_log(log.clone());
        }

        let consensus = use_case
            .approve(&SectionId::new(category.as_str()), MemberId::new(member))
            .await?;

        println!("{}", ConsoleFormatter::format_consensus(&consensus));
        Ok(())
    }

    async fn reject(&self, category: &str) -> Result<()> {
        let category = parse_category(category)?;

        let mut use_case = ReviewConsensusUseCase::new(self.store.clone());
        if let Some(log) = &self.analysis_log {
            use_case = use_case.with_analysis_log(log.clone());
        }

        let consensus = use_case.reject(&SectionId::new(category.as_str())).await?;

        println!("{}", ConsoleFormatter::format_consensus(&consensus));
        Ok(())
    }

    async fn export(&self, out: Option<&Path>, no_stream: bool) -> Result<()> {
        let mut use_case =
            ExportPrdUseCase::new(self.store.clone(), self.store.clone(), self.completions());
        if let Some(log) = &self.analysis_log {
            use_case = use_case.with_analysis_log(log.clone());
        }

        if out.is_none() && !no_stream {
            return self.export_streamed(&use_case).await;
        }

        let document = match use_case.execute_with_progress(self.progress.as_ref()).await {
            Ok(document) => document,
            Err(ExportPrdError::Completion(e)) => {
                return Err(provider_failure("PRD export", &e));
            }
            Err(e) => return Err(e.into()),
        };

        match out {
            Some(path) => {
                std::fs::write(path, &document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote PRD to {}", path.display());
            }
            None => println!("{document}"),
        }
        Ok(())
    }

    async fn export_streamed(&self, use_case: &ExportPrdUseCase) -> Result<()> {
        let mut handle = match use_case.execute_streaming().await {
            Ok(handle) => handle,
            Err(ExportPrdError::Completion(e)) => {
                return Err(provider_failure("PRD export", &e));
            }
            Err(e) => return Err(e.into()),
        };

        let mut stdout = std::io::stdout();
        let mut printed = 0usize;
        while let Some(event) = handle.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    printed += chunk.len();
                    print!("{chunk}");
                    stdout.flush()?;
                }
                StreamEvent::Completed(full) => {
                    // The final event carries the full text when no deltas arrived
                    if printed == 0 {
                        print!("{full}");
                        stdout.flush()?;
                    }
                    break;
                }
                StreamEvent::Error(message) => {
                    println!();
                    return Err(provider_failure("PRD export", &message));
                }
            }
        }
        println!();
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        ConfigLoader::print_config_sources();
        println!();
        println!("Effective configuration:");
        println!();
        print!("{}", toml::to_string_pretty(&self.config)?);
        Ok(())
    }
}

fn init_tracing(filter: EnvFilter, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            // Human output goes to stdout; diagnostics stay on stderr
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn progress_notifier(quiet: bool, verbose: u8) -> Box<dyn ProgressNotifier> {
    if quiet {
        Box::new(NoProgress)
    } else if verbose > 0 {
        // Interleaved log lines garble spinner redraws
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    }
}

fn parse_category(raw: &str) -> Result<SectionCategory> {
    raw.parse::<SectionCategory>().map_err(|e| {
        let known = SectionCategory::ALL.map(|c| c.as_str()).join(", ");
        anyhow::anyhow!("{e} (expected one of: {known})")
    })
}

fn provider_failure(context: &str, error: &dyn std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!(
        "{}",
        ConsoleFormatter::format_provider_error(context, &error.to_string())
    )
}
