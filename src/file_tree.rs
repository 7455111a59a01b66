use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TreeError;

const MAX_SEARCH_RESULTS: usize = 50;
const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    pub fn file(id: &str, name: &str, language: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: FileKind::File,
            language: Some(language.to_string()),
            content: Some(content.to_string()),
            children: None,
        }
    }

    pub fn folder(id: &str, name: &str, children: Vec<FileNode>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: FileKind::Folder,
            language: None,
            content: None,
            children: Some(children),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub file_id: String,
    pub file_name: String,
    pub line: usize,
    pub text: String,
}

/// Ordered forest of files and folders. Lookups by id go through a flat
/// index of child positions, rebuilt whenever the shape of the tree changes.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    roots: Vec<FileNode>,
    index: HashMap<String, Vec<usize>>,
}

impl FileTree {
    /// Fails on duplicate ids or on files carrying children.
    pub fn new(roots: Vec<FileNode>) -> Result<Self, TreeError> {
        let mut tree = Self { roots, index: HashMap::new() };
        tree.reindex()?;
        Ok(tree)
    }

    fn reindex(&mut self) -> Result<(), TreeError> {
        fn walk(
            nodes: &[FileNode],
            path: &mut Vec<usize>,
            index: &mut HashMap<String, Vec<usize>>,
        ) -> Result<(), TreeError> {
            for (i, node) in nodes.iter().enumerate() {
                path.push(i);
                if index.insert(node.id.clone(), path.clone()).is_some() {
                    return Err(TreeError::DuplicateId(node.id.clone()));
                }
                match (&node.kind, &node.children) {
                    (FileKind::File, Some(_)) => {
                        return Err(TreeError::FileWithChildren(node.name.clone()));
                    }
                    (FileKind::Folder, Some(children)) => walk(children, path, index)?,
                    _ => {}
                }
                path.pop();
            }
            Ok(())
        }
        let mut index = HashMap::new();
        walk(&self.roots, &mut Vec::new(), &mut index)?;
        self.index = index;
        Ok(())
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FileNode> {
        let path = self.index.get(id)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for i in rest {
            node = node.children.as_ref()?.get(*i)?;
        }
        Some(node)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut FileNode> {
        let path = self.index.get(id)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for i in rest {
            node = node.children.as_mut()?.get_mut(*i)?;
        }
        Some(node)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// Every node name, files and folders alike, in tree order.
    pub fn all_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len());
        self.visit(&mut |node| names.push(node.name.clone()));
        names
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let mut found = false;
        self.visit(&mut |node| found |= node.name == name);
        found
    }

    /// First file (not folder) with this exact name.
    pub fn find_file_by_name(&self, name: &str) -> Option<&FileNode> {
        let mut id = None;
        self.visit(&mut |node| {
            if id.is_none() && node.is_file() && node.name == name {
                id = Some(node.id.clone());
            }
        });
        id.and_then(|id| self.get(&id))
    }

    pub fn append_content(&mut self, id: &str, text: &str) -> bool {
        match self.get_mut(id) {
            Some(node) if node.is_file() => {
                let content = node.content.get_or_insert_with(String::new);
                content.push('\n');
                content.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Case-insensitive search over file names and content lines.
    pub fn search(&self, query: &str) -> Vec<SearchMatch> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        self.visit(&mut |node| {
            if !node.is_file() {
                return;
            }
            if node.name.to_lowercase().contains(&needle) {
                matches.push(SearchMatch {
                    file_id: node.id.clone(),
                    file_name: node.name.clone(),
                    line: 1,
                    text: "File name match".to_string(),
                });
            }
            if let Some(content) = &node.content {
                for (i, line) in content.split('\n').enumerate() {
                    if line.to_lowercase().contains(&needle) {
                        matches.push(SearchMatch {
                            file_id: node.id.clone(),
                            file_name: node.name.clone(),
                            line: i + 1,
                            text: line.to_string(),
                        });
                    }
                }
            }
        });
        matches.truncate(MAX_SEARCH_RESULTS);
        matches
    }

    fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a FileNode)) {
        fn walk<'a>(nodes: &'a [FileNode], f: &mut dyn FnMut(&'a FileNode)) {
            for node in nodes {
                f(node);
                if let Some(children) = &node.children {
                    walk(children, f);
                }
            }
        }
        walk(&self.roots, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_lookup_nested_ids() {
        let tree = FileTree::new(fixtures::initial_files()).unwrap();
        assert_eq!(tree.name_of("2"), Some("Storage.sol"));
        assert_eq!(tree.name_of("6"), Some("main.yml"));
        assert_eq!(tree.get("5").map(|n| n.kind), Some(FileKind::Folder));
        assert!(tree.get("99").is_none());
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn test_names_in_tree_order() {
        let tree = FileTree::new(fixtures::initial_files()).unwrap();
        assert_eq!(
            tree.all_names(),
            vec!["contracts", "Storage.sol", "Token.sol", ".github", "workflows", "main.yml", "deploy.yml", "README.md"]
        );
        assert!(tree.contains_name("workflows"));
        assert!(!tree.contains_name("storage.sol"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let roots = vec![
            FileNode::file("1", "a.sol", "solidity", ""),
            FileNode::folder("2", "dir", vec![FileNode::file("1", "b.sol", "solidity", "")]),
        ];
        let err = FileTree::new(roots).unwrap_err();
        assert_eq!(err, TreeError::DuplicateId("1".to_string()));
        assert_eq!(err.to_string(), "duplicate file id '1'");
    }

    #[test]
    fn test_file_with_children_rejected() {
        let mut file = FileNode::file("1", "a.sol", "solidity", "");
        file.children = Some(vec![]);
        assert_eq!(
            FileTree::new(vec![file]).unwrap_err(),
            TreeError::FileWithChildren("a.sol".to_string())
        );
    }

    #[test]
    fn test_append_content() {
        let mut tree = FileTree::new(fixtures::initial_files()).unwrap();
        assert!(tree.append_content("3", "// more"));
        assert!(tree.get("3").unwrap().content.as_deref().unwrap().ends_with("}\n// more"));
        assert!(!tree.append_content("1", "nope"));
        assert!(!tree.append_content("missing", "nope"));
    }

    #[test]
    fn test_search_names_and_lines() {
        let tree = FileTree::new(fixtures::initial_files()).unwrap();
        assert!(tree.search("s").is_empty());
        assert!(tree.search("   ").is_empty());

        let hits = tree.search("STORAGE");
        assert_eq!(hits[0].file_name, "Storage.sol");
        assert_eq!(hits[0].text, "File name match");
        assert!(hits.iter().any(|m| m.line == 4 && m.text == "contract Storage {"));

        let hits = tree.search("runs-on");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].file_name, "main.yml");
        assert_eq!(hits[0].line, 5);
    }

    #[test]
    fn test_find_file_by_name_skips_folders() {
        let tree = FileTree::new(fixtures::initial_files()).unwrap();
        assert_eq!(tree.find_file_by_name("Token.sol").map(|n| n.id.as_str()), Some("3"));
        assert!(tree.find_file_by_name("contracts").is_none());
    }
}
