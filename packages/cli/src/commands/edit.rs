use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::str::FromStr;
use tagbuilder_editor::{Document, EditSession, Mutation, MutationResult};
use tagbuilder_model::{Breakpoint, ModelError, TagChildrenType, TagId};
use thiserror::Error;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Page file to edit
    pub file: PathBuf,

    /// Operations, applied in order. Forms:
    /// wrap:<id> unwrap:<id> delete:<id> append:<id> clone:<id> up:<id> down:<id>
    /// name:<id>=<text> style:<id>@<bp>=<css> type:<id>=<kind>
    /// move:<id>><parent>[@<index>] undo redo
    #[arg(required = true)]
    pub ops: Vec<EditOp>,

    /// Print the resulting page instead of saving it
    #[arg(long)]
    pub dry_run: bool,

    /// Fail if any operation turns out to be a no-op
    #[arg(long)]
    pub strict: bool,
}

/// One command-line edit step
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    Apply(Mutation),
    Undo,
    Redo,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpParseError {
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Operation '{op}' expects {expected}")]
    Malformed { op: String, expected: &'static str },

    #[error("Invalid index '{0}'")]
    InvalidIndex(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl FromStr for EditOp {
    type Err = OpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => return Ok(EditOp::Undo),
            "redo" => return Ok(EditOp::Redo),
            _ => {}
        }

        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| OpParseError::UnknownOperation(s.to_string()))?;
        let malformed = |expected| OpParseError::Malformed {
            op: s.to_string(),
            expected,
        };

        let mutation = match verb {
            "wrap" => Mutation::Wrap { id: rest.parse()? },
            "unwrap" => Mutation::Unwrap { id: rest.parse()? },
            "delete" => Mutation::Delete { id: rest.parse()? },
            "append" => Mutation::Append { id: rest.parse()? },
            "clone" => Mutation::CloneTag { id: rest.parse()? },
            "up" => Mutation::MoveUp { id: rest.parse()? },
            "down" => Mutation::MoveDown { id: rest.parse()? },
            "name" => {
                let (id, name) = rest.split_once('=').ok_or_else(|| malformed("<id>=<text>"))?;
                Mutation::SetName {
                    id: id.parse()?,
                    name: name.to_string(),
                }
            }
            "style" => {
                let (target, style) = rest
                    .split_once('=')
                    .ok_or_else(|| malformed("<id>@<breakpoint>=<css>"))?;
                let (id, breakpoint) = target
                    .split_once('@')
                    .ok_or_else(|| malformed("<id>@<breakpoint>=<css>"))?;
                Mutation::SetStyle {
                    id: id.parse()?,
                    breakpoint: breakpoint.parse::<Breakpoint>()?,
                    style: style.to_string(),
                }
            }
            "type" => {
                let (id, kind) = rest.split_once('=').ok_or_else(|| malformed("<id>=<kind>"))?;
                Mutation::ChangeChildrenType {
                    id: id.parse()?,
                    kind: kind.parse::<TagChildrenType>()?,
                }
            }
            "move" => {
                let (id, destination) = rest
                    .split_once('>')
                    .ok_or_else(|| malformed("<id>><parent>[@<index>]"))?;
                let (parent, index) = match destination.split_once('@') {
                    Some((parent, index)) => (
                        parent,
                        index
                            .parse::<usize>()
                            .map_err(|_| OpParseError::InvalidIndex(index.to_string()))?,
                    ),
                    None => (destination, usize::MAX),
                };
                Mutation::MoveTo {
                    id: id.parse()?,
                    new_parent: parent.parse::<TagId>()?,
                    index,
                }
            }
            _ => return Err(OpParseError::UnknownOperation(s.to_string())),
        };

        Ok(EditOp::Apply(mutation))
    }
}

/// Run `ops` against a session; returns how many steps took effect
fn run_ops(session: &mut EditSession, ops: Vec<EditOp>, strict: bool) -> Result<usize> {
    let mut changed = 0;

    for op in ops {
        let (label, applied) = match op {
            EditOp::Undo => ("undo".to_string(), session.undo()),
            EditOp::Redo => ("redo".to_string(), session.redo()),
            EditOp::Apply(mutation) => {
                let label = format!("{} #{}", mutation.label().to_lowercase(), mutation.target());
                match session.apply(mutation) {
                    MutationResult::Applied { .. } => (label, true),
                    MutationResult::Noop { reason } => {
                        if strict {
                            return Err(anyhow!("{} skipped: {}", label, reason));
                        }
                        println!("  {} {} skipped: {}", "⚠️".yellow(), label, reason);
                        continue;
                    }
                }
            }
        };

        if applied {
            changed += 1;
            println!("  {} {}", "✓".green(), label);
        } else if strict {
            return Err(anyhow!("nothing to {}", label));
        } else {
            println!("  {} nothing to {}", "⚠️".yellow(), label);
        }
    }

    Ok(changed)
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = PathBuf::from(cwd).join(&args.file);
    let mut doc = Document::load(&path)?;

    println!(
        "{} {}",
        "✏️  Editing".bright_blue().bold(),
        args.file.display()
    );

    let mut session = EditSession::with_config(doc.page().clone(), config.session_config());
    let changed = run_ops(&mut session, args.ops, args.strict)?;

    if changed == 0 || session.page() == doc.page() {
        println!("{}", "No changes".yellow());
        return Ok(());
    }

    doc.replace_page(session.into_page())?;

    if args.dry_run {
        println!("{}", doc.to_json()?);
        println!("{}", "Dry run: page not saved".yellow());
    } else {
        doc.save()?;
        println!(
            "{} {} change(s) saved",
            "✅".green(),
            changed.to_string().bold()
        );
    }

    Ok(())
}
