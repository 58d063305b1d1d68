//! Template manifest types and parsing

use crate::project::ProjectKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directory a file is created in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Root {
    /// First level of the project name (`FIRST` in `FIRST/SECOND`)
    Base,
    /// Full project directory
    #[default]
    Project,
}

/// A file created from a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Template path relative to the templates directory
    pub template: String,

    /// Destination path relative to `root`; may hold template fields
    pub dest: String,

    #[serde(default)]
    pub root: Root,

    /// Copied without rendering
    #[serde(default)]
    pub asset: bool,
}

/// Files for one kind of project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindManifest {
    #[serde(default)]
    pub description: String,

    pub files: Vec<FileEntry>,
}

/// Root template manifest (templates/template.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub kinds: BTreeMap<String, KindManifest>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// The files for a kind of project
    pub fn kind(&self, kind: ProjectKind) -> Option<&KindManifest> {
        self.kinds.get(kind.name())
    }

    /// Every template path the manifest refers to
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.kinds
            .values()
            .flat_map(|k| k.files.iter().map(|f| f.template.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
kinds:
  cl:
    description: Command line app
    files:
      - template: AUTHORS.tpl
        dest: AUTHORS
        root: base
      - template: cl/proj.go.tpl
        dest: "{{.SecondName}}.go"
  web:
    files:
      - template: web/style.css
        dest: static/css/style.css
        asset: true
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::parse(MANIFEST).unwrap();

        let cl = manifest.kind(ProjectKind::Cl).unwrap();
        assert_eq!(cl.description, "Command line app");
        assert_eq!(cl.files.len(), 2);
        assert_eq!(cl.files[0].root, Root::Base);
        assert_eq!(cl.files[1].root, Root::Project);
        assert!(!cl.files[1].asset);

        let web = manifest.kind(ProjectKind::Web).unwrap();
        assert!(web.description.is_empty());
        assert!(web.files[0].asset);

        assert!(manifest.kind(ProjectKind::Pkg).is_none());
    }

    #[test]
    fn test_templates_lists_every_file() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        let templates: Vec<_> = manifest.templates().collect();
        assert_eq!(
            templates,
            vec!["AUTHORS.tpl", "cl/proj.go.tpl", "web/style.css"]
        );
    }

    #[test]
    fn test_unknown_root_is_rejected() {
        let bad = "kinds:\n  cl:\n    files:\n      - template: a\n        dest: b\n        root: elsewhere\n";
        assert!(Manifest::parse(bad).is_err());
    }
}
