//! Ordered page model that defines the output document's page order

use crate::descriptor::{DescriptorId, PageDescriptor};
use crate::types::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSequence {
    pages: Vec<PageDescriptor>,
}

impl PageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageDescriptor> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter()
    }

    pub fn descriptors(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn position_of(&self, id: DescriptorId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    /// Insert at `position` in `0..=len`, shifting later pages right
    pub fn insert(&mut self, position: usize, descriptor: PageDescriptor) -> Result<()> {
        if position > self.pages.len() {
            return Err(ComposeError::IndexOutOfRange {
                index: position,
                len: self.pages.len(),
            });
        }
        self.pages.insert(position, descriptor);
        Ok(())
    }

    pub fn push(&mut self, descriptor: PageDescriptor) {
        self.pages.push(descriptor);
    }

    pub fn remove(&mut self, index: usize) -> Result<PageDescriptor> {
        self.check_index(index)?;
        Ok(self.pages.remove(index))
    }

    /// Move the page at `from` so that it ends up at `to`.
    ///
    /// `to` is interpreted against the sequence after the page is taken out,
    /// so the page's final index is always `to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        Ok(())
    }

    /// Swap with the previous page; returns the page's new index
    pub fn move_up(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        let to = index.saturating_sub(1);
        self.move_to(index, to)?;
        Ok(to)
    }

    /// Swap with the next page; returns the page's new index
    pub fn move_down(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        let to = (index + 1).min(self.pages.len() - 1);
        self.move_to(index, to)?;
        Ok(to)
    }

    pub fn reverse(&mut self) {
        self.pages.reverse();
    }

    /// Remove every page, returning them in their previous order
    pub fn clear(&mut self) -> Vec<PageDescriptor> {
        std::mem::take(&mut self.pages)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.pages.len() {
            Ok(())
        } else {
            Err(ComposeError::IndexOutOfRange {
                index,
                len: self.pages.len(),
            })
        }
    }
}

impl FromIterator<PageDescriptor> for PageSequence {
    fn from_iter<I: IntoIterator<Item = PageDescriptor>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}
