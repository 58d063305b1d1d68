//! Field substitution in templates

use super::TemplateError;
use crate::project::Project;
use once_cell::sync::Lazy;
use regex::Regex;

static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("field regex is valid")
});

/// Replace every `{{.Field}}` in `text` with the project's field.
///
/// `template` only names the source in errors. Anything else between
/// braces is left as is.
pub fn render(template: &str, text: &str, project: &Project) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in FIELD.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = project
            .field(name.as_str())
            .ok_or_else(|| TemplateError::UnknownField {
                template: template.to_string(),
                field: name.as_str().to_string(),
            })?;

        out.push_str(&text[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;
    use crate::project::ProjectKind;

    fn project(name: &str) -> Project {
        let user = UserConfig {
            name: "Test".into(),
            id: "test".into(),
            host: "github.com".into(),
            email: "test@mail.com".into(),
            license: "MIT".into(),
        };
        Project::new(name, ProjectKind::Pkg, &user).unwrap()
    }

    #[test]
    fn test_render_fields() {
        let p = project("net/http");
        let out = render(
            "t",
            "package {{.SecondName}} // {{ .GoGetName }} by {{.UserName}} <{{.UserEmail}}>",
            &p,
        )
        .unwrap();
        assert_eq!(
            out,
            "package http // github.com/test/net/http by Test <test@mail.com>"
        );
    }

    #[test]
    fn test_render_without_fields() {
        let p = project("fmt");
        assert_eq!(render("t", "no fields here", &p).unwrap(), "no fields here");
        assert_eq!(render("t", "", &p).unwrap(), "");
    }

    #[test]
    fn test_other_actions_untouched() {
        let p = project("fmt");
        let text = "{{if .Ok}}yes{{end}} {{.Typ}}";
        assert_eq!(render("t", text, &p).unwrap(), "{{if .Ok}}yes{{end}} pkg");
    }

    #[test]
    fn test_unknown_field() {
        let p = project("fmt");
        let err = render("cl/proj.go.tpl", "{{.Nope}}", &p).unwrap_err();
        assert_eq!(
            err.to_string(),
            "template 'cl/proj.go.tpl': unknown field 'Nope'"
        );
    }
}
