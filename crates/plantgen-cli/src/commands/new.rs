//! Implementation of the `plantgen new` command.
//!
//! Responsibility: turn flags and config into `GenerateSettings`, gather the
//! package path and service name, call the core generate service, and
//! display results. No business logic lives here.

use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, instrument};

use plantgen_adapters::{LocalFilesystem, ScriptedPrompter};
use plantgen_core::application::{
    GenerateService, GenerateSettings, GenerationOutcome, GenerationPlan, GenerationRequest,
    ports::Prompter,
};

use crate::{
    cli::{GlobalArgs, NewArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::FlagPrompter,
};

/// Number of values `collect_inputs` asks for.
const PROMPTED_VALUES: usize = 2;

/// Execute the `plantgen new` command.
///
/// Dispatch sequence:
/// 1. Resolve settings from config, `--root` and `--template`
/// 2. Take the package path and service name from flags, prompting for
///    whatever is missing (or using defaults under `--yes`)
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Generate via `GenerateService`
/// 5. Print the destination and next-steps guidance
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Settings
    let settings = build_settings(&args, &config)?;
    debug!(
        workspace_root = %settings.workspace_root.display(),
        template_root = %settings.template_root.display(),
        rename_paths = settings.rename_paths,
        "Settings resolved"
    );
    let service = GenerateService::new(Box::new(LocalFilesystem::new()), settings);

    // 2. Inputs
    let request = collect_request(&service, &args, &output)?;

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        let plan = service
            .plan(&request)
            .with_cli_context(|| "planning generation")?;
        return show_plan(&request, &plan, &output);
    }

    // 4. Generate
    let spinner = spinner(&global, &output, &request);
    let result = service.generate(&request);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let outcome = result.with_cli_context(|| format!("generating {}", request.package))?;

    info!(run_id = %outcome.run_id, "Package generated");

    // 5. Success + next steps
    show_outcome(&outcome, &output)
}

// ── Settings and inputs ───────────────────────────────────────────────────────

fn build_settings(args: &NewArgs, config: &AppConfig) -> CliResult<GenerateSettings> {
    let mut settings = config
        .generate_settings(args.root.as_deref())
        .map_err(|e| CliError::ConfigError {
            message: format!("Invalid template configuration: {e}"),
            source: Some(Box::new(e)),
        })?;

    if let Some(template) = &args.template {
        settings = settings.with_template_root(template);
    }
    if args.rename_paths {
        settings = settings.with_rename_paths(true);
    }
    Ok(settings)
}

fn collect_request(
    service: &GenerateService,
    args: &NewArgs,
    output: &OutputManager,
) -> CliResult<GenerationRequest> {
    // Fully specified on the command line: validate, never prompt.
    if let (Some(package), Some(name)) = (&args.package, &args.service) {
        return GenerationRequest::parse(package, name).with_cli_context(|| "parsing flags");
    }

    let fallback = fallback_prompter(args, output)?;
    let prompter = FlagPrompter::new(
        [args.package.clone(), args.service.clone()],
        fallback.as_ref(),
    );
    service
        .collect_inputs(&prompter)
        .with_cli_context(|| "collecting inputs")
}

/// Source of values the flags left out.
fn fallback_prompter(args: &NewArgs, output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    if args.yes {
        return Ok(Box::new(ScriptedPrompter::defaults(PROMPTED_VALUES)));
    }

    #[cfg(feature = "interactive")]
    {
        Ok(Box::new(crate::prompt::TerminalPrompter::new(
            output.supports_color(),
        )))
    }

    #[cfg(not(feature = "interactive"))]
    {
        let _ = output;
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

fn spinner(
    global: &GlobalArgs,
    output: &OutputManager,
    request: &GenerationRequest,
) -> Option<ProgressBar> {
    // Log lines would interleave with the spinner.
    if output.is_quiet() || global.verbose > 0 || output.format() != OutputFormat::Human {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Generating {}...", request.package));
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DryRunReport<'a> {
    dry_run: bool,
    request: &'a GenerationRequest,
    plan: &'a GenerationPlan,
}

#[derive(Serialize)]
struct GeneratedReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: &'a GenerationOutcome,
    next: String,
}

fn next_step(outcome: &GenerationOutcome) -> String {
    format!("cd {} && go test ./...", outcome.destination.display())
}

fn show_plan(
    request: &GenerationRequest,
    plan: &GenerationPlan,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output.json(&DryRunReport {
            dry_run: true,
            request,
            plan,
        });
    }

    output.info(&format!(
        "Dry run: would generate {} at {}",
        request.package,
        plan.destination.display(),
    ))?;
    output.info(&format!("  Template: {}", plan.template_root.display()))?;
    output.info(&format!("  Service:  {}", request.service))?;
    output.info("  Substitutions, in order:")?;
    for rule in plan.substitutions.rules() {
        output.info(&format!("    {} -> {}", rule.from(), rule.to()))?;
    }
    Ok(())
}

fn show_outcome(outcome: &GenerationOutcome, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output.json(&GeneratedReport {
            generated_at: Utc::now(),
            outcome,
            next: next_step(outcome),
        });
    }

    output.success(&format!(
        "Generated {} at {}",
        outcome.package,
        outcome.destination.display(),
    ))?;
    output.info(&format!(
        "{} files and {} directories copied, {} files rewritten",
        outcome.copy.files, outcome.copy.directories, outcome.substitution.files_rewritten,
    ))?;
    if outcome.substitution.paths_renamed > 0 {
        output.info(&format!(
            "{} paths renamed",
            outcome.substitution.paths_renamed
        ))?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  {}", next_step(outcome)))?;

    Ok(())
}
