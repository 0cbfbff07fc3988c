use std::fmt;

/// Position of a link entry inside the dataset.
///
/// Work items carry this instead of a reference so that workers never hold a
/// borrow of the dataset; the draining loop resolves it with
/// [`Dataset::entry_mut`](crate::dataset::Dataset::entry_mut).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath {
    /// Index of the category in the document
    pub category: usize,
    /// Index of the term group inside the category
    pub group: usize,
    /// Index of the link inside the term group
    pub link: usize,
}

impl EntryPath {
    pub fn new(category: usize, group: usize, link: usize) -> Self {
        Self {
            category,
            group,
            link,
        }
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.group, self.link)
    }
}

/// One link entry plus the context needed to process it and write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Position in enumeration order (document order)
    pub index: usize,
    /// Back-reference to the entry in the dataset
    pub path: EntryPath,
    /// Taxonomy of the owning category
    pub category: String,
    /// Term of the owning group
    pub term: String,
    pub title: String,
    pub url: String,
    /// Description before the run
    pub description: Option<String>,
    /// Logo before the run
    pub logo: Option<String>,
}

impl WorkItem {
    /// `"{taxonomy} > {term}"`, the label used for report grouping.
    pub fn category_label(&self) -> String {
        if self.term.is_empty() {
            self.category.clone()
        } else {
            format!("{} > {}", self.category, self.term)
        }
    }
}

#[cfg(test)]
pub(crate) fn work_item(index: usize, title: &str, url: &str) -> WorkItem {
    WorkItem {
        index,
        path: EntryPath::new(0, 0, index),
        category: "Tools".to_string(),
        term: "Dev".to_string(),
        title: title.to_string(),
        url: url.to_string(),
        description: None,
        logo: None,
    }
}
