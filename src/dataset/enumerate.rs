//! Flattening the dataset into work items

use crate::core::types::WorkItem;
use crate::dataset::model::{Dataset, LinkEntry};

/// Which entries a run works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkFilter {
    /// Every entry with a url
    All,
    /// Entries whose description is null or absent
    MissingDescription,
    /// Entries whose logo is null, absent or blank
    MissingLogo,
}

impl WorkFilter {
    pub fn matches(&self, entry: &LinkEntry) -> bool {
        match self {
            Self::All => true,
            Self::MissingDescription => entry.description.is_none(),
            Self::MissingLogo => !entry.has_logo(),
        }
    }
}

/// Walk categories, term groups and links in document order and collect a
/// work item for every entry with a url that passes `filter`.
pub fn enumerate<F>(dataset: &Dataset, filter: F) -> Vec<WorkItem>
where
    F: Fn(&LinkEntry) -> bool,
{
    dataset
        .links()
        .filter(|(_, _, _, entry)| filter(entry))
        .filter_map(|(path, category, group, entry)| {
            let url = entry.processable_url()?;
            Some((path, category, group, entry, url.to_string()))
        })
        .enumerate()
        .map(|(index, (path, category, group, entry, url))| WorkItem {
            index,
            path,
            category: category.taxonomy.clone(),
            term: group.term.clone(),
            title: entry.title.clone(),
            url,
            description: entry.description.clone(),
            logo: entry.logo.clone(),
        })
        .collect()
}
