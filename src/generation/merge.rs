//! Output merge table - concatenates outputs that land on the same filename

use std::collections::HashMap;

use crate::generation::RenderedFile;

/// Filename-keyed accumulator spanning every pass of one invocation.
///
/// The first file registered under a name keeps its position; later files with
/// the same name have their content appended to it.
#[derive(Debug, Default)]
pub struct MergeTable {
    files: Vec<RenderedFile>,
    index: HashMap<String, usize>,
}

impl MergeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file, appending to an existing entry on collision
    pub fn insert(&mut self, file: RenderedFile) {
        match self.index.get(&file.name) {
            Some(&position) => {
                tracing::debug!(name = %file.name, "Appending to existing output");
                self.files[position].content.push_str(&file.content);
            }
            None => {
                self.index.insert(file.name.clone(), self.files.len());
                self.files.push(file);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Entries in first-registration order
    pub fn into_files(self) -> Vec<RenderedFile> {
        self.files
    }
}

impl Extend<RenderedFile> for MergeTable {
    fn extend<I: IntoIterator<Item = RenderedFile>>(&mut self, iter: I) {
        for file in iter {
            self.insert(file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collisions_append_in_insertion_order() {
        let mut table = MergeTable::new();

        table.extend(vec![
            RenderedFile::new("./a.proto_all.go", "first;"),
            RenderedFile::new("./a.proto_other.go", "other"),
        ]);
        table.extend(vec![RenderedFile::new("./a.proto_all.go", "second;")]);
        table.insert(RenderedFile::new("./a.proto_all.go", "third;"));

        assert_eq!(table.len(), 2);
        let files = table.into_files();
        assert_eq!(files[0].name, "./a.proto_all.go");
        assert_eq!(files[0].content, "first;second;third;");
        assert_eq!(files[1].content, "other");
    }

    #[test]
    fn test_first_registration_order_is_kept() {
        let mut table = MergeTable::new();
        assert!(table.is_empty());

        for name in ["c", "a", "b", "a", "c"] {
            table.insert(RenderedFile::new(name, name));
        }

        let names: Vec<String> = table.into_files().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
