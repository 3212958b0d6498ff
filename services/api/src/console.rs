use crate::cli::ApplyArgs;
use job_intake::config::{AppConfig, SinkConfig};
use job_intake::error::AppError;
use job_intake::telemetry;
use job_intake::workflows::application::views::{FieldView, ReviewView};
use job_intake::workflows::application::{
    render, ApplicationSink, ApplicationWizard, Attachment, Field, FieldKind, FileIntake,
    HttpSink, Role, Step, SubmissionReceipt, WizardError, WizardView,
};
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Debug)]
pub(crate) enum ConsoleOutcome {
    Submitted(SubmissionReceipt),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Back,
    Submit,
    Quit,
}

impl Command {
    fn parse(raw: &str, step: Step) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" if step == Step::Review => Some(Self::Submit),
            "" | "n" | "next" => Some(Self::Next),
            "b" | "back" => Some(Self::Back),
            "s" | "submit" => Some(Self::Submit),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub(crate) async fn run(args: ApplyArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(sink_url) = args.sink_url {
        config.sink = SinkConfig::new(sink_url)?;
    }

    telemetry::init_console(&config.telemetry)?;
    let sink = HttpSink::from_config(&config.sink)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match run_wizard(&mut input, &mut output, &sink).await? {
        ConsoleOutcome::Submitted(receipt) => {
            debug!(status = receipt.status, "console application delivered");
        }
        ConsoleOutcome::Quit => {
            writeln!(output, "Application not submitted.")?;
        }
    }
    Ok(())
}

/// Drive one wizard over line-oriented input until it is submitted or the applicant quits.
pub(crate) async fn run_wizard<R, W, K>(
    input: &mut R,
    output: &mut W,
    sink: &K,
) -> Result<ConsoleOutcome, AppError>
where
    R: BufRead,
    W: Write,
    K: ApplicationSink + ?Sized,
{
    let mut wizard = ApplicationWizard::new();

    loop {
        let view = render(&wizard);
        print_view(output, &view)?;

        for field_view in &view.fields {
            let Some(line) = prompt(input, output, &field_prompt(field_view))? else {
                return Ok(ConsoleOutcome::Quit);
            };
            apply_input(output, &mut wizard, field_view.field, line.trim())?;
        }

        if let Some(review) = &view.review {
            print_review(output, review)?;
        }

        let options = if view.step == Step::Review {
            "[s]ubmit, [b]ack, [q]uit"
        } else {
            "[n]ext, [b]ack, [q]uit"
        };
        let Some(line) = prompt(input, output, options)? else {
            return Ok(ConsoleOutcome::Quit);
        };

        match Command::parse(&line, view.step) {
            Some(Command::Next) => {
                if let Err(WizardError::Incomplete { errors, .. }) = wizard.advance() {
                    for (field, message) in errors.iter() {
                        writeln!(output, "  ! {}: {}", field.label(), message)?;
                    }
                }
            }
            Some(Command::Back) => {
                let _ = wizard.retreat();
            }
            Some(Command::Submit) if view.step == Step::Review => {
                writeln!(output, "Submitting...")?;
                match wizard.submit(sink).await {
                    Ok(receipt) => {
                        print_view(output, &render(&wizard))?;
                        return Ok(ConsoleOutcome::Submitted(receipt));
                    }
                    Err(err) => {
                        let message = err.alert().map(str::to_string).unwrap_or_else(|| {
                            err.to_string()
                        });
                        writeln!(output, "  ! {message}")?;
                    }
                }
            }
            Some(Command::Submit) => {
                writeln!(output, "  ! Review your application before submitting.")?;
            }
            Some(Command::Quit) => return Ok(ConsoleOutcome::Quit),
            None => writeln!(output, "  ! Unrecognised command '{}'", line.trim())?,
        }
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}> ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn field_prompt(view: &FieldView) -> String {
    let mut text = format!("{} *", view.label);
    if !view.options.is_empty() && view.kind != FieldKind::Document {
        let options: Vec<String> = view
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| format!("{}) {option}", index + 1))
            .collect();
        text.push_str(&format!(" [{}]", options.join(", ")));
    }
    if let Some(attachment) = &view.attachment {
        text.push_str(&format!(" (current: {})", attachment.file_name));
    } else if let Some(value) = view.value.as_deref().filter(|value| !value.is_empty()) {
        text.push_str(&format!(" (current: {value})"));
    } else if let Some(placeholder) = view.placeholder {
        text.push_str(&format!(" (e.g. {placeholder})"));
    }
    text
}

/// Blank input keeps whatever the field already holds.
fn apply_input<W: Write>(
    output: &mut W,
    wizard: &mut ApplicationWizard,
    field: Field,
    raw: &str,
) -> Result<(), AppError> {
    if raw.is_empty() {
        return Ok(());
    }

    match field.kind() {
        FieldKind::Document => match Attachment::read_from(raw) {
            Ok(attachment) => match wizard.select_file(field, attachment) {
                Ok(FileIntake::Accepted) => {}
                Ok(FileIntake::RejectedTooLarge { .. }) => {
                    if let Some(message) = wizard.errors().get(field) {
                        writeln!(output, "  ! {message}")?;
                    }
                }
                Err(err) => writeln!(output, "  ! {err}")?,
            },
            Err(err) => writeln!(output, "  ! Unable to read '{raw}': {err}")?,
        },
        FieldKind::RoleChoice => {
            let value = raw
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| Role::ALL.get(index))
                .map_or(raw, |role| role.label());
            if let Err(err) = wizard.update_field(field, value) {
                writeln!(output, "  ! {err}")?;
            }
        }
        _ => {
            if let Err(err) = wizard.update_field(field, raw) {
                writeln!(output, "  ! {err}")?;
            }
        }
    }
    Ok(())
}

fn print_view<W: Write>(output: &mut W, view: &WizardView) -> io::Result<()> {
    writeln!(output)?;
    if let Some(progress) = &view.progress {
        writeln!(output, "{}", progress.label)?;
    }
    writeln!(output, "== {} ==", view.heading)?;
    if let Some(success) = &view.success {
        writeln!(output, "{}", success.message)?;
        for step in &success.next_steps {
            writeln!(output, "  - {step}")?;
        }
        return Ok(());
    }
    writeln!(output, "{}", view.subheading)?;
    for note in &view.notes {
        writeln!(output, "  {note}")?;
    }
    for field in &view.fields {
        if let Some(error) = &field.error {
            writeln!(output, "  ! {}: {error}", field.label)?;
        }
    }
    Ok(())
}

fn print_review<W: Write>(output: &mut W, review: &ReviewView) -> io::Result<()> {
    for entry in review.identity.iter().chain(review.answers.iter()) {
        writeln!(output, "  {}: {}", entry.label, entry.value)?;
    }
    if let Some(role) = review.role {
        writeln!(output, "  Role: {role}")?;
    }
    for (label, document) in [
        ("Cover Letter", &review.cover_letter),
        ("Resume/CV", &review.resume),
    ] {
        if let Some(document) = document {
            writeln!(
                output,
                "  {label}: {} ({} bytes)",
                document.file_name, document.size
            )?;
        }
    }
    Ok(())
}
