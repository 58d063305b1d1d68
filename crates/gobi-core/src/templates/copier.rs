//! Rendering a project's templates onto disk

use super::manifest::Root;
use super::render::render;
use super::store::TemplateStore;
use super::TemplateError;
use crate::messages;
use crate::project::{Layout, Project};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

/// Create every file the manifest lists for the project's kind.
///
/// Files already on disk are left untouched. Returns the created paths.
pub async fn copy_project(
    store: &TemplateStore,
    project: &Project,
    layout: &Layout,
) -> Result<Vec<PathBuf>> {
    let kind = store
        .manifest()
        .kind(project.typ)
        .ok_or_else(|| TemplateError::MissingKind(project.typ.to_string()))?;

    fs::create_dir_all(&layout.project_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", layout.project_dir.display()))?;

    let mut created = Vec::new();

    for entry in &kind.files {
        let root = match entry.root {
            Root::Base => &layout.base_dir,
            Root::Project => &layout.project_dir,
        };
        let target = root.join(render(&entry.template, &entry.dest, project)?);

        if fs::try_exists(&target).await.unwrap_or(false) {
            messages::file_exists(target.display());
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = store.read(&entry.template).await?;
        let content = if entry.asset {
            content
        } else {
            render(&entry.template, &content, project)?
        };

        fs::write(&target, content)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;

        if entry.asset {
            messages::assets_created(target.display());
        } else {
            messages::file_created(target.display());
        }
        tracing::debug!(template = %entry.template, path = %target.display(), "created file");

        created.push(target);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;
    use crate::project::ProjectKind;
    use std::path::Path;

    fn user(host: &str) -> UserConfig {
        UserConfig {
            name: "Test".into(),
            id: "test".into(),
            host: host.into(),
            email: "test@mail.com".into(),
            license: "MIT".into(),
        }
    }

    fn relative(created: &[PathBuf], src: &Path) -> Vec<String> {
        created
            .iter()
            .map(|p| p.strip_prefix(src).unwrap().display().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_copy_cl_project() {
        let src = tempfile::tempdir().unwrap();
        let store = TemplateStore::embedded().unwrap();
        let project = Project::new("clapp", ProjectKind::Cl, &user("github.com")).unwrap();
        let layout = project.layout(src.path());

        let created = copy_project(&store, &project, &layout).await.unwrap();
        assert_eq!(
            relative(&created, src.path()),
            vec![
                "github.com/test/clapp/AUTHORS",
                "github.com/test/clapp/VERSION",
                "github.com/test/clapp/README.md",
                "github.com/test/clapp/clapp.go",
            ]
        );

        let main = std::fs::read_to_string(layout.project_dir.join("clapp.go")).unwrap();
        assert!(main.contains("Hello from clapp!"));
        let authors = std::fs::read_to_string(layout.base_dir.join("AUTHORS")).unwrap();
        assert!(authors.contains("Test <test@mail.com>"));
    }

    #[tokio::test]
    async fn test_existing_files_are_skipped() {
        let src = tempfile::tempdir().unwrap();
        let store = TemplateStore::embedded().unwrap();

        let first = Project::new("gopkg", ProjectKind::Pkg, &user("github.com")).unwrap();
        copy_project(&store, &first, &first.layout(src.path()))
            .await
            .unwrap();

        let second = Project::new("gopkg/pkg", ProjectKind::Pkg, &user("github.com")).unwrap();
        let created = copy_project(&store, &second, &second.layout(src.path()))
            .await
            .unwrap();

        // AUTHORS, VERSION and README.md already exist in the base directory
        assert_eq!(
            relative(&created, src.path()),
            vec![
                "github.com/test/gopkg/pkg/pkg.go",
                "github.com/test/gopkg/pkg/pkg_test.go",
                "github.com/test/gopkg/examples/pkg_example.go",
            ]
        );
    }

    #[tokio::test]
    async fn test_web_assets_are_not_rendered() {
        let src = tempfile::tempdir().unwrap();
        let store = TemplateStore::embedded().unwrap();
        let project = Project::new("goweb", ProjectKind::Web, &user("code.google.com")).unwrap();
        let layout = project.layout(src.path());

        copy_project(&store, &project, &layout).await.unwrap();

        let root = src.path().join("code.google.com/p/goweb");
        let index = std::fs::read_to_string(root.join("templates/index.html")).unwrap();
        assert!(index.contains("{{.Title}}"));
        assert!(root.join("static/css/style.css").is_file());

        let main = std::fs::read_to_string(root.join("goweb.go")).unwrap();
        assert!(main.contains(r#"{"goweb"}"#));
    }
}
