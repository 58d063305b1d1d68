//! Project model
//!
//! A project is named `NAME` or `FIRST/SECOND`. It lives at
//! `GOPATH/src/HOST/ID/NAME`, or `GOPATH/src/code.google.com/p/NAME` on
//! Google Code. Files shared by every project under `FIRST` (AUTHORS,
//! VERSION, README.md) go to the base directory `.../FIRST`.

use crate::config::{UserConfig, GOOGLE};
use crate::messages::{self, CommandLineError};
use crate::templates::{copy_project, TemplateStore};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;

/// Kind of project to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Command line app
    Cl,
    /// Package with tests and an example
    Pkg,
    /// Web application
    Web,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 3] = [ProjectKind::Cl, ProjectKind::Pkg, ProjectKind::Web];

    pub fn name(self) -> &'static str {
        match self {
            ProjectKind::Cl => "cl",
            ProjectKind::Pkg => "pkg",
            ProjectKind::Web => "web",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectKind {
    type Err = CommandLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or(CommandLineError::WrongArgument)
    }
}

/// Split a project name on `/`; an empty name has no parts
pub fn parse_name(name: &str) -> Vec<&str> {
    if name.is_empty() {
        return Vec::new();
    }
    name.split('/').collect()
}

/// First and second level of a project name.
///
/// `fmt` gives `("fmt", "fmt")` and `net/http` gives `("net", "http")`.
pub fn validate_name(name: &str) -> Result<(String, String), CommandLineError> {
    match parse_name(name).as_slice() {
        [single] => Ok((single.to_string(), single.to_string())),
        [first, second] if !first.is_empty() && !second.is_empty() => {
            Ok((first.to_string(), second.to_string()))
        }
        _ => Err(CommandLineError::WrongProjectName),
    }
}

fn is_google(host: &str) -> bool {
    host.eq_ignore_ascii_case(GOOGLE)
}

/// Import path of a project
pub fn go_get_name(host: &str, id: &str, name: &str) -> String {
    if is_google(host) {
        format!("{}/p/{}", host, name)
    } else {
        format!("{}/{}/{}", host, id, name)
    }
}

/// Directories a project is created in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub project_dir: PathBuf,
    pub base_dir: PathBuf,
}

/// A project ready to be created; its fields are the template fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub first_name: String,
    pub second_name: String,
    pub go_get_name: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub host: String,
    pub license: String,
    pub typ: ProjectKind,
}

impl Project {
    pub fn new(name: &str, typ: ProjectKind, user: &UserConfig) -> Result<Self, CommandLineError> {
        let (first_name, second_name) = validate_name(name)?;

        Ok(Self {
            name: name.to_string(),
            first_name,
            second_name,
            go_get_name: go_get_name(&user.host, &user.id, name),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            host: user.host.clone(),
            license: user.license.clone(),
            typ,
        })
    }

    /// Value of a template field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "Name" => &self.name,
            "FirstName" => &self.first_name,
            "SecondName" => &self.second_name,
            "GoGetName" => &self.go_get_name,
            "UserId" => &self.user_id,
            "UserName" => &self.user_name,
            "UserEmail" => &self.user_email,
            "Host" => &self.host,
            "License" => &self.license,
            "Typ" => return Some(self.typ.name()),
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn layout(&self, src: &Path) -> Layout {
        let owner = if is_google(&self.host) {
            src.join(&self.host).join("p")
        } else {
            src.join(&self.host).join(&self.user_id)
        };

        Layout {
            project_dir: owner.join(&self.name),
            base_dir: owner.join(&self.first_name),
        }
    }

    pub async fn exists(&self, src: &Path) -> bool {
        fs::try_exists(self.layout(src).project_dir)
            .await
            .unwrap_or(false)
    }

    /// Create the project under `src`, failing when it already exists
    pub async fn create(&self, src: &Path, store: &TemplateStore) -> Result<Vec<PathBuf>> {
        if self.exists(src).await {
            return Err(CommandLineError::ProjectExists.into());
        }

        tracing::info!(name = %self.name, kind = %self.typ, "creating project");
        let created = copy_project(store, self, &self.layout(src)).await?;
        messages::creation_ready();

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(host: &str) -> UserConfig {
        UserConfig {
            name: "Test".into(),
            id: "test".into(),
            host: host.into(),
            email: "test@mail.com".into(),
            license: "MIT".into(),
        }
    }

    #[test]
    fn test_parse_name() {
        assert!(parse_name("").is_empty());
        assert_eq!(parse_name("fmt"), vec!["fmt"]);
        assert_eq!(parse_name("net/http"), vec!["net", "http"]);
        assert_eq!(parse_name("a//b"), vec!["a", "", "b"]);
        assert_eq!(parse_name("/"), vec!["", ""]);
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("fmt").unwrap(), ("fmt".into(), "fmt".into()));
        assert_eq!(
            validate_name("crypto/md5").unwrap(),
            ("crypto".into(), "md5".into())
        );

        for bad in ["", "/", "net/", "/http", "a/b/c"] {
            assert_eq!(
                validate_name(bad),
                Err(CommandLineError::WrongProjectName),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_go_get_name() {
        assert_eq!(go_get_name("github.com", "test", "app"), "github.com/test/app");
        assert_eq!(
            go_get_name("code.google.com", "test", "net/http"),
            "code.google.com/p/net/http"
        );
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("web".parse::<ProjectKind>(), Ok(ProjectKind::Web));
        assert_eq!(
            "bersion".parse::<ProjectKind>(),
            Err(CommandLineError::WrongArgument)
        );
    }

    #[test]
    fn test_fields() {
        let p = Project::new("clapp/app", ProjectKind::Cl, &user("github.com")).unwrap();
        assert_eq!(p.field("FirstName"), Some("clapp"));
        assert_eq!(p.field("SecondName"), Some("app"));
        assert_eq!(p.field("GoGetName"), Some("github.com/test/clapp/app"));
        assert_eq!(p.field("Typ"), Some("cl"));
        assert_eq!(p.field("name"), None);
    }

    #[test]
    fn test_layout() {
        let src = Path::new("/go/src");

        let p = Project::new("clapp/app", ProjectKind::Cl, &user("github.com")).unwrap();
        let layout = p.layout(src);
        assert_eq!(layout.project_dir, PathBuf::from("/go/src/github.com/test/clapp/app"));
        assert_eq!(layout.base_dir, PathBuf::from("/go/src/github.com/test/clapp"));

        let p = Project::new("clapp", ProjectKind::Cl, &user("code.google.com")).unwrap();
        let layout = p.layout(src);
        assert_eq!(layout.project_dir, PathBuf::from("/go/src/code.google.com/p/clapp"));
        assert_eq!(layout.base_dir, layout.project_dir);
    }

    #[tokio::test]
    async fn test_create_twice_fails() {
        let src = tempfile::tempdir().unwrap();
        let store = TemplateStore::embedded().unwrap();
        let p = Project::new("clapp", ProjectKind::Cl, &user("github.com")).unwrap();

        assert!(!p.exists(src.path()).await);
        p.create(src.path(), &store).await.unwrap();
        assert!(p.exists(src.path()).await);

        let err = p.create(src.path(), &store).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<CommandLineError>(),
            Some(&CommandLineError::ProjectExists)
        );

        // a second level under an existing base is a new project
        let nested = Project::new("clapp/app", ProjectKind::Cl, &user("github.com")).unwrap();
        assert!(nested.create(src.path(), &store).await.is_ok());
    }
}
