use crate::commands::helpers::name_matches;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DirectoryStore;

/// View-side filter over the directory list. Never changes the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
    pub query: Option<String>,
    pub favorites_only: bool,
}

impl DirectoryFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            favorites_only: false,
        }
    }

    pub fn favorites() -> Self {
        Self {
            query: None,
            favorites_only: true,
        }
    }

    pub fn matches(&self, name: &str, is_favorite: bool) -> bool {
        if self.favorites_only && !is_favorite {
            return false;
        }
        match &self.query {
            Some(query) => name_matches(name, query),
            None => true,
        }
    }
}

pub fn run<S: DirectoryStore>(store: &S, filter: &DirectoryFilter) -> Result<CmdResult> {
    let all = if filter.favorites_only {
        store.get_favorites()?
    } else {
        store.get_all()?
    };

    let listed = all
        .into_iter()
        .filter(|dir| filter.matches(&dir.name, dir.is_favorite))
        .collect();

    Ok(CmdResult::default().with_directories(listed))
}

pub fn favorites<S: DirectoryStore>(store: &S) -> Result<CmdResult> {
    run(store, &DirectoryFilter::favorites())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryDirectoryStore;

    fn names(result: &CmdResult) -> Vec<&str> {
        result.directories.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn unfiltered_lists_everything_in_order() {
        let store = InMemoryDirectoryStore::with_sample_data();
        let result = run(&store, &DirectoryFilter::default()).unwrap();
        assert_eq!(names(&result), ["Work", "Personal", "Ideas", "Travel"]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let store = InMemoryDirectoryStore::with_sample_data();
        let result = run(&store, &DirectoryFilter::query("O")).unwrap();
        assert_eq!(names(&result), ["Work", "Personal"]);

        let result = run(&store, &DirectoryFilter::query("trAV")).unwrap();
        assert_eq!(names(&result), ["Travel"]);
    }

    #[test]
    fn query_without_hits_is_empty() {
        let store = InMemoryDirectoryStore::with_sample_data();
        let result = run(&store, &DirectoryFilter::query("zzz")).unwrap();
        assert!(result.directories.is_empty());
    }

    #[test]
    fn favorites_combine_with_query() {
        let fixture = StoreFixture::new()
            .with_favorite("a", "Reading")
            .with_favorite("b", "Recipes")
            .with_directory("c", "Receipts");

        let filter = DirectoryFilter {
            query: Some("rec".into()),
            favorites_only: true,
        };
        let result = run(&fixture.directories, &filter).unwrap();
        assert_eq!(names(&result), ["Recipes"]);

        let result = favorites(&fixture.directories).unwrap();
        assert_eq!(names(&result), ["Reading", "Recipes"]);
    }

    #[test]
    fn listed_directories_carry_counts() {
        let store = InMemoryDirectoryStore::with_sample_data();
        let result = run(&store, &DirectoryFilter::default()).unwrap();
        let counts: Vec<_> = result.directories.iter().map(|d| d.message_count).collect();
        assert_eq!(counts, [2, 2, 1, 0]);
    }
}
