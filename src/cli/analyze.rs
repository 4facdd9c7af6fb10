//! One-shot analysis: validate, submit with a spinner, print the results

use anyhow::{Context, Result};
use colored::Colorize;

use crate::animator::circumference;
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::controller::{Effect, UploadController};
use crate::render::{parse_color_token, EntryKind, ListEntry, RenderedResults};
use crate::selector::SelectedFile;
use crate::service::{AnalysisService, HttpAnalysisService};
use crate::spinner::{self, BusySpinner, StatusIcons};

/// Run one analysis. Returns `false` when the file was rejected or the
/// service failed; the error has already been reported.
pub async fn run_analyze(args: &AnalyzeArgs, config: &Config) -> Result<bool> {
    let service = HttpAnalysisService::new(&config.service.base_url)
        .context("Failed to build HTTP client")?;
    run_with_service(args, config, &service).await
}

/// Same as [`run_analyze`] against any service
pub async fn run_with_service<S>(args: &AnalyzeArgs, config: &Config, service: &S) -> Result<bool>
where
    S: AnalysisService + ?Sized,
{
    let locale = config.general.locale;
    let strings = locale.strings();
    let mut controller = UploadController::new(locale, config.animation.timing());

    let file = match SelectedFile::from_path(&args.file) {
        Ok(file) => file,
        Err(e) => {
            spinner::print_error(&e.to_string());
            return Ok(false);
        }
    };
    controller.select_file(file);

    let file = match controller.begin_submit() {
        Effect::StartRequest(file) => file,
        Effect::Notify(notification) => {
            spinner::print_error(&notification.message(locale));
            return Ok(false);
        }
        other => anyhow::bail!("unexpected effect from submit: {:?}", other),
    };

    let busy = BusySpinner::new(&format!(
        "{} {} ({})",
        StatusIcons::UPLOAD,
        strings.analyzing,
        file.human_size()
    ));
    let outcome = service.analyze(&file).await;
    match &outcome {
        Ok(_) => busy.success(&file.name),
        Err(_) => busy.error(&file.name),
    }

    match controller.settle(outcome) {
        Effect::RevealResults => {}
        Effect::Notify(notification) => {
            spinner::print_error(&notification.message(locale));
            return Ok(false);
        }
        other => anyhow::bail!("unexpected effect from settle: {:?}", other),
    }

    if args.json {
        let result = controller.result().context("result missing after success")?;
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(true);
    }

    let view = controller
        .view()
        .cloned()
        .context("view missing after success")?;
    print_results(&view, &mut controller, !args.no_animation).await;
    Ok(true)
}

async fn print_results(view: &RenderedResults, controller: &mut UploadController, animate: bool) {
    let locale = controller.locale();
    let strings = locale.strings();
    let (r, g, b) = parse_color_token(view.tier.color_token()).unwrap_or((255, 255, 255));

    spinner::print_header(&format!("{} {}", StatusIcons::DOCUMENT, strings.heading_score));

    let animator = controller.animator_mut();
    if animate {
        spinner::play_score(animator, (r, g, b)).await;
    } else {
        animator.run_to_end();
        println!(
            "  [{}] {:>3}/100",
            spinner::score_bar(animator.ring_progress()).truecolor(r, g, b),
            animator.displayed().to_string().bold()
        );
    }
    tracing::debug!(
        "ring offset {:.2} of {:.2}",
        animator.ring_offset(),
        circumference()
    );
    println!("  {}", view.tier.label(locale).truecolor(r, g, b).bold());
    println!();

    spinner::print_kv(strings.heading_word_count, &view.word_count.to_string());
    spinner::print_kv(strings.heading_found, &view.found_count.to_string());
    spinner::print_kv(strings.heading_missing, &view.missing_count.to_string());
    for check in &view.contact {
        let mark = if check.present {
            StatusIcons::SUCCESS.green()
        } else {
            StatusIcons::WARNING.yellow()
        };
        println!("  {} {}", mark, check.label);
    }

    spinner::print_subheader(strings.heading_found);
    for entry in &view.found {
        println!("  {}", styled_entry(entry, false));
    }

    spinner::print_subheader(strings.heading_missing);
    for entry in &view.missing {
        println!("  {}", styled_entry(entry, true));
    }

    spinner::print_subheader(strings.heading_advice);
    for (i, advice) in view.advice.iter().enumerate() {
        println!("  {}. {}", i + 1, advice);
    }
    println!();
}

/// Marker and colour for one list row; placeholders line up with entries
fn styled_entry(entry: &ListEntry, missing_list: bool) -> String {
    let line = format!("{}{}", entry_marker(&entry.kind, missing_list), entry.text);
    match entry.kind {
        EntryKind::AllSectionsPresent => line.green().to_string(),
        EntryKind::NoKnownSections => line.bright_black().to_string(),
        EntryKind::Unrecognized => line.italic().to_string(),
        EntryKind::Section(_) if missing_list => line.red().to_string(),
        EntryKind::Section(_) => line.green().to_string(),
    }
}

fn entry_marker(kind: &EntryKind, missing_list: bool) -> &'static str {
    match kind {
        EntryKind::AllSectionsPresent | EntryKind::NoKnownSections => "  ",
        _ if missing_list => "✗ ",
        _ => "✓ ",
    }
}
