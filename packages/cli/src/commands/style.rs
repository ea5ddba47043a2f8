use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tagbuilder_editor::Document;
use tagbuilder_model::{find_tag, Breakpoint, Styles, TagId};

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Page file
    pub file: PathBuf,

    /// Tag to inspect
    pub id: TagId,

    /// Breakpoint (pc, mob, tab, wide, ultra); all five when omitted
    pub breakpoint: Option<Breakpoint>,
}

/// Breakpoint whose own field supplies the effective style at `breakpoint`
pub fn style_source(styles: &Styles, breakpoint: Breakpoint) -> Option<Breakpoint> {
    breakpoint
        .resolution_order()
        .find(|candidate| styles.get(*candidate).is_some())
}

pub fn style(args: StyleArgs, cwd: &str) -> Result<()> {
    let doc = Document::load(PathBuf::from(cwd).join(&args.file))?;
    let tag = find_tag(&doc.page().root, args.id)
        .ok_or_else(|| anyhow!("Tag {} not found in {}", args.id, args.file.display()))?;

    let breakpoints = match args.breakpoint {
        Some(breakpoint) => vec![breakpoint],
        None => Breakpoint::ALL.to_vec(),
    };

    println!("{} {}", tag.label().bold(), format!("#{}", tag.id).dimmed());
    for breakpoint in breakpoints {
        let effective = tag.effective_style(breakpoint);
        let source = match style_source(&tag.styles, breakpoint) {
            Some(source) if source == breakpoint => String::new(),
            Some(source) => format!(" (from {})", source).dimmed().to_string(),
            None => " (unset)".dimmed().to_string(),
        };
        println!("  {:>5}: {}{}", breakpoint.as_str().cyan(), effective, source);
    }

    Ok(())
}
