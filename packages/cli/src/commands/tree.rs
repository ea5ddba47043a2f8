use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tagbuilder_editor::Document;
use tagbuilder_model::{
    find_tag, walk_tag, Breakpoint, Page, Tag, TagChildren, TagId, TagVisitor,
};

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page file to print
    pub file: PathBuf,

    /// Also print each tag's effective style at this breakpoint
    #[arg(short, long)]
    pub breakpoint: Option<Breakpoint>,
}

/// One line of the navigator outline
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub depth: usize,
    pub id: TagId,
    pub label: String,
    pub kind: String,
}

struct Outliner {
    depth: usize,
    rows: Vec<OutlineRow>,
}

impl TagVisitor for Outliner {
    fn visit_tag(&mut self, tag: &Tag) {
        self.rows.push(OutlineRow {
            depth: self.depth,
            id: tag.id,
            label: tag.label(),
            kind: describe(tag),
        });
        self.depth += 1;
        walk_tag(self, tag);
        self.depth -= 1;
    }
}

fn describe(tag: &Tag) -> String {
    match &tag.children {
        None => "empty".to_string(),
        Some(TagChildren::Text(text)) => format!("text {:?}", text),
        Some(TagChildren::Tags(tags)) => format!("tags [{}]", tags.len()),
        Some(TagChildren::ImageCarousel(carousel)) => {
            format!("imageCarousel [{} images]", carousel.link_images.len())
        }
        Some(TagChildren::ItemCarousel(carousel)) => {
            format!("itemCarousel ({} cols)", carousel.cols.get())
        }
        Some(TagChildren::LinkImage(image)) => format!("linkImage → {}", image.href),
    }
}

/// Pre-order outline of the page, root first
pub fn outline(page: &Page) -> Vec<OutlineRow> {
    let mut outliner = Outliner {
        depth: 0,
        rows: Vec::new(),
    };
    outliner.visit_tag(&page.root);
    outliner.rows
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let doc = Document::load(PathBuf::from(cwd).join(&args.file))?;
    let page = doc.page();

    println!("{} {}", "📄".bright_blue(), page.name.bold());
    for row in outline(page) {
        let indent = "  ".repeat(row.depth + 1);
        print!(
            "{}{} {} {}",
            indent,
            row.label.bright_white(),
            format!("#{}", row.id).dimmed(),
            row.kind.cyan()
        );

        if let Some(breakpoint) = args.breakpoint {
            let style = find_tag(&page.root, row.id)
                .map(|tag| tag.effective_style(breakpoint))
                .unwrap_or_default();
            if !style.is_empty() {
                print!(" {}", style.yellow());
            }
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagbuilder_model::LinkImage;

    #[test]
    fn test_outline_is_preorder_with_depths() {
        let page = Page::new(
            "Home",
            Tag::container(
                TagId(1),
                vec![
                    Tag::container(TagId(2), vec![Tag::text(TagId(3), "hi")]).with_name("Header"),
                    Tag::new(TagId(4)).with_children(TagChildren::LinkImage(LinkImage::placeholder())),
                ],
            ),
        );

        let rows: Vec<_> = outline(&page)
            .into_iter()
            .map(|row| (row.depth, row.id.0, row.label, row.kind))
            .collect();

        assert_eq!(
            rows,
            vec![
                (0, 1, "Tag 1".to_string(), "tags [2]".to_string()),
                (1, 2, "Header".to_string(), "tags [1]".to_string()),
                (2, 3, "Tag 3".to_string(), "text \"hi\"".to_string()),
                (1, 4, "Tag 4".to_string(), "linkImage → #".to_string()),
            ]
        );
    }
}
