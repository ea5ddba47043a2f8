use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use tagbuilder_editor::Document;
use tagbuilder_model::{IdGenerator, Page};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page file to create
    #[arg(default_value = "page.json")]
    pub file: PathBuf,

    /// Page name (defaults to the config's defaultPageName)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Force overwrite existing page
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let page_path = PathBuf::from(cwd).join(&args.file);

    // Check if page already exists
    if page_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.file.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Creating page...".bright_blue().bold());

    let config = Config::load(cwd)?;
    let name = args
        .name
        .unwrap_or_else(|| config.default_page_name.clone());

    let root_id = IdGenerator::new().new_id();
    let mut doc = Document::new(&page_path, Page::empty(name.clone(), root_id))?;
    doc.save_as(&page_path)?;
    println!(
        "  {} Created {} ({} root {})",
        "✓".green(),
        args.file.display(),
        name.bold(),
        root_id.to_string().dimmed()
    );

    // Write config file alongside, if there is none yet
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("Next steps:");
    println!("  1. Run: tagbuilder edit {} append:{}", args.file.display(), root_id);
    println!("  2. Run: tagbuilder tree {}", args.file.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagbuilder_model::count_tags;

    fn cwd(dir: &tempfile::TempDir) -> String {
        dir.path().display().to_string()
    }

    #[test]
    fn test_init_writes_empty_page_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            file: PathBuf::from("home.json"),
            name: None,
            force: false,
        };

        init(args, &cwd(&dir)).unwrap();

        let doc = Document::load(dir.path().join("home.json")).unwrap();
        assert_eq!(doc.page().name, "Home");
        assert_eq!(count_tags(&doc.page().root), 1);
        assert_eq!(doc.page().root.tags().map(Vec::len), Some(0));
        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());
    }

    #[test]
    fn test_init_keeps_existing_page_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.json");
        fs::write(&path, "keep me").unwrap();

        let args = InitArgs {
            file: PathBuf::from("home.json"),
            name: Some("Other".to_string()),
            force: false,
        };
        init(args, &cwd(&dir)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }
}
