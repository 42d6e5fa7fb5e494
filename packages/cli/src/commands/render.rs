use super::{read_document, resolve, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::views::ViewMode;
use folio_editor::EditSession;
use folio_render::{HtmlOptions, RenderPipeline, Theme};
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document to render (.json)
    pub input: String,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// View to render (document, table, kanban); overrides config
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Color theme (light, dark); overrides config
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Single-line HTML
    #[arg(long)]
    pub compact: bool,

    /// Emit only the view markup, without the surrounding page
    #[arg(long)]
    pub fragment: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = resolve(cwd, &args.input);
    let document = read_document(&input)?;

    let mut options = config.session_options(document);
    if let Some(view) = args.view {
        options.view_mode = view;
    }
    let theme = args.theme.unwrap_or(config.theme);
    let html_options = if args.compact {
        HtmlOptions::compact()
    } else {
        config.html_options()
    };

    let html = render_html(EditSession::with_options(options), theme, &html_options, args.fragment);
    info!(input = %input.display(), bytes = html.len(), "Rendered document");

    let output = args.output.as_deref().map(|path| resolve(cwd, path));
    write_output(output.as_deref(), &html)?;

    if let Some(path) = output {
        eprintln!(
            "  {} {} → {}",
            "✓".green(),
            args.input,
            path.display()
        );
    }

    Ok(())
}

pub(crate) fn render_html(
    session: EditSession,
    theme: Theme,
    options: &HtmlOptions,
    fragment: bool,
) -> String {
    let mut pipeline = RenderPipeline::new(session, theme);
    if fragment {
        pipeline.html(options)
    } else {
        pipeline.html_page(options)
    }
}
