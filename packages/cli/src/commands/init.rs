use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_document::{CalloutVariant, Document, Element, ElementKind};
use folio_render::Theme;
use std::fs;
use std::path::PathBuf;

pub const WELCOME_DOCUMENT: &str = "welcome.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Your display name in the presence roster
    #[arg(short, long)]
    pub username: Option<String>,

    /// Color theme (light, dark)
    #[arg(short, long, default_value = "light")]
    pub theme: Theme,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = Config::path(cwd);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio workspace...".bright_blue().bold());

    let welcome_path = PathBuf::from(cwd).join(WELCOME_DOCUMENT);
    if !welcome_path.exists() {
        fs::write(&welcome_path, welcome_document().to_json_pretty()?)?;
        println!("  {} Created {}", "✓".green(), WELCOME_DOCUMENT);
    }

    let config = Config {
        username: args.username,
        theme: args.theme,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", WELCOME_DOCUMENT);
    println!("  2. Run: folio render {} -o welcome.html", WELCOME_DOCUMENT);

    Ok(())
}

fn welcome_document() -> Document {
    Document::new(
        "Welcome",
        vec![
            Element::heading(1, "Welcome to Folio").into(),
            Element::paragraph("Type / for commands, or select text to format it.").into(),
            Element::with_text(ElementKind::CheckListItem { checked: false }, "Try the table view")
                .into(),
            Element::with_text(
                ElementKind::Callout {
                    variant: CalloutVariant::Info,
                },
                "Documents are plain JSON files.",
            )
            .into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::validate_nesting;

    #[test]
    fn test_welcome_document_is_valid() {
        let doc = welcome_document();
        assert_eq!(doc.children.len(), 4);
        assert!(validate_nesting(&doc).is_empty());

        let decoded = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_init_writes_config_and_document() {
        let dir = std::env::temp_dir().join(format!("folio-init-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let cwd = dir.display().to_string();

        let args = InitArgs {
            username: Some("Tester".to_string()),
            theme: Theme::Dark,
            force: false,
        };
        init(args, &cwd).unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.username.as_deref(), Some("Tester"));
        assert_eq!(config.theme, Theme::Dark);
        assert!(dir.join(WELCOME_DOCUMENT).exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
