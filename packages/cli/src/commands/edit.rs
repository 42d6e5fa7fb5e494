use super::render::render_html;
use super::{read_document, resolve, write_output};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use folio_document::{BlockFormat, Mark, Point, Range};
use folio_editor::views::ViewMode;
use folio_editor::{EditSession, Key, Mutation, SlashCommand};
use serde::Deserialize;
use std::fs;
use tracing::debug;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Document to edit (.json)
    pub input: String,

    /// Edit script: a JSON array of steps
    #[arg(short, long)]
    pub script: String,

    /// Where to write the edited document (prints to stdout when omitted)
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<String>,

    /// Overwrite the input document
    #[arg(long)]
    pub in_place: bool,

    /// Also render the final state to this HTML file
    #[arg(long)]
    pub html: Option<String>,
}

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Place a collapsed caret
    Caret(Point),
    Select(Range),
    /// Insert literal text at the selection
    Type(String),
    Key(Key),
    Mark(Mark),
    Block(BlockFormat),
    Slash(SlashCommand),
    Mutation(Mutation),
    Title(String),
    View(ViewMode),
    Undo,
    Redo,
    Claim,
    Release,
    /// Another collaborator takes the editing lock
    Lock(String),
}

#[derive(Debug, Default, PartialEq)]
pub struct ScriptReport {
    pub applied: usize,
    /// Indexes of steps that changed nothing
    pub ignored: Vec<usize>,
}

pub fn apply_step(session: &mut EditSession, step: Step) -> bool {
    match step {
        Step::Caret(point) => session.select(Some(Range::new(point.clone(), point))),
        Step::Select(range) => session.select(Some(range)),
        Step::Type(text) => session.insert_text(&text),
        Step::Key(key) => session.handle_key(key),
        Step::Mark(mark) => session.toggle_mark(mark),
        Step::Block(format) => session.set_block_type(format),
        Step::Slash(command) => session.open_slash_menu() && session.run_slash_command(command),
        Step::Mutation(mutation) => session.dispatch(mutation).is_ok(),
        Step::Title(title) => session.set_title(title),
        Step::View(mode) => session.set_view_mode(mode),
        Step::Undo => session.undo(),
        Step::Redo => session.redo(),
        Step::Claim => {
            session.claim_editing();
            true
        }
        Step::Release => {
            let held = !session.is_locked() && session.current_editor().is_some();
            session.release_editing();
            held
        }
        Step::Lock(username) => {
            session.set_current_editor(Some(username));
            true
        }
    }
}

pub fn run_script(session: &mut EditSession, steps: Vec<Step>) -> ScriptReport {
    let mut report = ScriptReport::default();
    for (index, step) in steps.into_iter().enumerate() {
        debug!(index, step = ?step, "Applying step");
        if apply_step(session, step) {
            report.applied += 1;
        } else {
            report.ignored.push(index);
        }
    }
    report
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = resolve(cwd, &args.input);
    let document = read_document(&input)?;

    let script_path = resolve(cwd, &args.script);
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&script)
        .map_err(|e| anyhow!("Invalid edit script {}: {}", script_path.display(), e))?;

    let mut session = EditSession::with_options(config.session_options(document));
    let report = run_script(&mut session, steps);

    eprintln!(
        "{} {} steps applied",
        "✏️".bright_blue(),
        report.applied.to_string().green()
    );
    for index in &report.ignored {
        eprintln!("  {} step {} changed nothing", "⚠️".yellow(), index);
    }

    let output = if args.in_place {
        Some(input)
    } else {
        args.output.as_deref().map(|path| resolve(cwd, path))
    };
    write_output(output.as_deref(), &session.document().to_json_pretty()?)?;

    if let Some(html_path) = &args.html {
        let html_path = resolve(cwd, html_path);
        let html = render_html(session, config.theme, &config.html_options(), false);
        write_output(Some(&html_path), &html)?;
        eprintln!("  {} {}", "✓".green(), html_path.display());
    }

    Ok(())
}
