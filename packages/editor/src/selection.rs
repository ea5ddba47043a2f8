//! The editor's "current tag" pointer.
//!
//! Invariant: after any call that takes a page, the selection is either empty or
//! names a tag present in that page.

use tagbuilder_model::{contains, find_tag, Page, Tag, TagId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<TagId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<TagId> {
        self.selected
    }

    /// Select `id` if it exists in `page`; otherwise leave the selection alone.
    ///
    /// Returns whether the selection now points at `id`.
    pub fn select(&mut self, page: &Page, id: TagId) -> bool {
        if !contains(&page.root, id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected tag, looked up in `page`
    pub fn resolve<'a>(&self, page: &'a Page) -> Option<&'a Tag> {
        find_tag(&page.root, self.selected?)
    }

    /// Update the selection after a mutation on `target` that asked for `preferred`.
    ///
    /// When the mutated tag was selected (or nothing was), the mutation's choice
    /// wins. Any other selection survives as long as its tag still exists.
    pub fn follow(&mut self, page: &Page, target: TagId, preferred: TagId) {
        let keep = self
            .selected
            .filter(|current| *current != target && contains(&page.root, *current));

        self.selected = keep.or(Some(preferred));
        self.revalidate(page);
    }

    /// Drop the selection if its tag is gone from `page`
    pub fn revalidate(&mut self, page: &Page) {
        if let Some(id) = self.selected {
            if !contains(&page.root, id) {
                self.selected = None;
            }
        }
    }
}
