//! Tree walks over a [`Vault`]

use crate::host::Vault;
use notedate_core::prelude::*;

/// Collect entries below `folder` that satisfy `predicate`.
///
/// Order is depth-first pre-order in listing order, which is the order a
/// recursive walk over `children` produces. Subfolders are entered only
/// when `recursive` is set; whether a folder is entered does not depend on
/// the predicate.
pub async fn collect_entries<V, F>(
    vault: &V,
    folder: &Folder,
    recursive: bool,
    mut predicate: F,
) -> Result<Vec<VaultEntry>>
where
    V: Vault + ?Sized,
    F: FnMut(&VaultEntry) -> bool,
{
    let mut collected = Vec::new();
    let mut stack: Vec<VaultEntry> = vault.children(folder).await?;
    stack.reverse();

    while let Some(entry) = stack.pop() {
        if recursive && let VaultEntry::Folder(sub) = &entry {
            let mut children = vault.children(sub).await?;
            children.reverse();
            stack.extend(children);
        }
        if predicate(&entry) {
            collected.push(entry);
        }
    }

    Ok(collected)
}

/// Markdown notes directly in `folder`, or anywhere below it when `recursive`
pub async fn collect_markdown<V>(vault: &V, folder: &Folder, recursive: bool) -> Result<Vec<Document>>
where
    V: Vault + ?Sized,
{
    let entries = collect_entries(vault, folder, recursive, |entry| {
        entry.as_document().is_some_and(Document::is_markdown)
    })
    .await?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            VaultEntry::File(doc) => Some(doc),
            VaultEntry::Folder(_) => None,
        })
        .collect())
}

/// Every folder of the vault whose path contains `query`, ignoring case.
///
/// The root folder is not offered; an empty query matches all folders.
pub async fn suggest_folders<V>(vault: &V, query: &str) -> Result<Vec<Folder>>
where
    V: Vault + ?Sized,
{
    let needle = query.to_lowercase();
    let entries = collect_entries(vault, &Folder::root(), true, |entry| {
        entry
            .as_folder()
            .is_some_and(|f| f.path_str().to_lowercase().contains(&needle))
    })
    .await?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            VaultEntry::Folder(folder) => Some(folder),
            VaultEntry::File(_) => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::VaultManager;
    use tempfile::TempDir;

    fn build_vault() -> (TempDir, VaultManager) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("Journal/2023")).unwrap();
        std::fs::create_dir_all(root.join("Projects/Alpha")).unwrap();
        std::fs::write(root.join("Journal/a.md"), "").unwrap();
        std::fs::write(root.join("Journal/b.txt"), "").unwrap();
        std::fs::write(root.join("Journal/2023/c.md"), "").unwrap();
        std::fs::write(root.join("Journal/z.md"), "").unwrap();
        std::fs::write(root.join("Projects/Alpha/d.md"), "").unwrap();
        let manager = VaultManager::new(root).unwrap();
        (temp, manager)
    }

    fn paths(docs: &[Document]) -> Vec<String> {
        docs.iter().map(Document::path_str).collect()
    }

    #[tokio::test]
    async fn test_collect_markdown_flat() {
        let (_temp, vault) = build_vault();
        let docs = collect_markdown(&vault, &Folder::new("Journal"), false)
            .await
            .unwrap();
        assert_eq!(paths(&docs), vec!["Journal/a.md", "Journal/z.md"]);
    }

    #[tokio::test]
    async fn test_collect_markdown_recursive_preorder() {
        let (_temp, vault) = build_vault();
        let docs = collect_markdown(&vault, &Folder::new("Journal"), true)
            .await
            .unwrap();
        assert_eq!(
            paths(&docs),
            vec!["Journal/2023/c.md", "Journal/a.md", "Journal/z.md"]
        );
    }

    #[tokio::test]
    async fn test_collect_entries_with_custom_predicate() {
        let (_temp, vault) = build_vault();
        let entries = collect_entries(&vault, &Folder::root(), true, |e| {
            e.path().extension().is_some_and(|ext| ext == "txt")
        })
        .await
        .unwrap();
        assert_eq!(entries, vec![VaultEntry::File(Document::new("Journal/b.txt"))]);
    }

    #[tokio::test]
    async fn test_suggest_folders_case_insensitive() {
        let (_temp, vault) = build_vault();
        let folders = suggest_folders(&vault, "alp").await.unwrap();
        assert_eq!(folders, vec![Folder::new("Projects/Alpha")]);
    }

    #[tokio::test]
    async fn test_suggest_folders_empty_query_lists_all() {
        let (_temp, vault) = build_vault();
        let folders = suggest_folders(&vault, "").await.unwrap();
        let names: Vec<String> = folders.iter().map(Folder::path_str).collect();
        assert_eq!(
            names,
            vec!["Journal", "Journal/2023", "Projects", "Projects/Alpha"]
        );
    }
}
