//! Remote repository creation through the GitHub CLI.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::ports::runner::CommandSpec;

/// Visibility of a newly created repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Visibility {
    /// Anyone can see it.
    #[default]
    Public,
    /// Only collaborators can see it.
    Private,
    /// Visible to members of the owning enterprise.
    Internal,
}

impl Visibility {
    /// The name `gh` uses for this visibility.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to create a GitHub repository for a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRequest {
    /// Owning account; `gh` picks the logged-in user when `None`.
    pub owner: Option<String>,
    /// Repository name.
    pub name: String,
    /// Local directory pushed as the initial contents.
    pub source: PathBuf,
    /// Repository visibility.
    pub visibility: Visibility,
    /// Remote name to register locally.
    pub remote: Option<String>,
    /// Short description shown on GitHub.
    pub description: Option<String>,
    /// Homepage URL; must be absolute.
    pub homepage: Option<String>,
    /// Let `gh` ask for everything itself.
    pub interactive: bool,
}

impl RepoRequest {
    /// Creates a request for `name` sourced from `source`.
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            owner: None,
            name: name.into(),
            source: source.into(),
            visibility: Visibility::default(),
            remote: None,
            description: None,
            homepage: None,
            interactive: false,
        }
    }

    /// `owner/name`, or just `name` when no owner is set.
    pub fn full_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}/{}", self.name),
            None => self.name.clone(),
        }
    }

    /// HTTPS clone URL, available only when the owner is known.
    pub fn clone_url(&self) -> Option<String> {
        self.owner.as_ref().map(|owner| format!("https://github.com/{owner}/{}.git", self.name))
    }

    /// Checks the request before anything is run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for an empty name or a relative homepage.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Usage("repository name cannot be empty".into()));
        }
        if let Some(url) = &self.homepage {
            if !is_absolute_url(url) {
                return Err(Error::Usage(format!("the specified URL is not absolute: {url}")));
            }
        }
        if self.remote.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(Error::Usage("remote name cannot be empty".into()));
        }
        Ok(())
    }

    /// The `gh repo create` invocation for this request.
    pub fn gh_command(&self) -> CommandSpec {
        let spec = CommandSpec::new("gh").args(["repo", "create"]);
        if self.interactive {
            return spec;
        }
        let mut spec = spec
            .arg(self.full_name())
            .arg(format!("--source={}", self.source.display()))
            .arg(format!("--{}", self.visibility));
        if let Some(remote) = &self.remote {
            spec = spec.arg(format!("--remote={remote}"));
        }
        if let Some(description) = &self.description {
            spec = spec.arg(format!("--description={description}"));
        }
        if let Some(homepage) = &self.homepage {
            spec = spec.arg(format!("--homepage={homepage}"));
        }
        spec
    }
}

/// `scheme://rest` with an RFC 3986 scheme and a non-empty remainder.
pub fn is_absolute_url(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RepoRequest {
        RepoRequest { owner: Some("octocat".into()), ..RepoRequest::new("Demo", "/work/demo") }
    }

    #[test]
    fn gh_command_with_defaults() {
        assert_eq!(
            request().gh_command().display(),
            "gh repo create octocat/Demo --source=/work/demo --public"
        );
    }

    #[test]
    fn gh_command_with_every_option() {
        let req = RepoRequest {
            visibility: Visibility::Private,
            remote: Some("upstream".into()),
            description: Some("A small demo".into()),
            homepage: Some("https://demo.example.com".into()),
            ..request()
        };

        assert_eq!(
            req.gh_command().args,
            vec![
                "repo",
                "create",
                "octocat/Demo",
                "--source=/work/demo",
                "--private",
                "--remote=upstream",
                "--description=A small demo",
                "--homepage=https://demo.example.com",
            ]
        );
    }

    #[test]
    fn interactive_request_is_bare() {
        let req = RepoRequest { interactive: true, ..request() };
        assert_eq!(req.gh_command().display(), "gh repo create");
    }

    #[test]
    fn names_and_urls() {
        assert_eq!(request().full_name(), "octocat/Demo");
        assert_eq!(request().clone_url().as_deref(), Some("https://github.com/octocat/Demo.git"));

        let anonymous = RepoRequest::new("Demo", ".");
        assert_eq!(anonymous.full_name(), "Demo");
        assert!(anonymous.clone_url().is_none());
    }

    #[test]
    fn validation_rejects_bad_input() {
        let relative = RepoRequest { homepage: Some("demo.example.com".into()), ..request() };
        assert!(matches!(relative.validate(), Err(Error::Usage(_))));

        let unnamed = RepoRequest::new("  ", ".");
        assert!(unnamed.validate().is_err());

        let blank_remote = RepoRequest { remote: Some(String::new()), ..request() };
        assert!(blank_remote.validate().is_err());

        assert!(request().validate().is_ok());
    }

    #[test]
    fn absolute_url_detection() {
        assert!(is_absolute_url("https://example.com"));
        assert!(is_absolute_url("git+ssh://host/path"));
        assert!(!is_absolute_url("example.com"));
        assert!(!is_absolute_url("://example.com"));
        assert!(!is_absolute_url("1http://example.com"));
        assert!(!is_absolute_url("https://"));
    }

    #[test]
    fn visibility_names() {
        assert_eq!(Visibility::default(), Visibility::Public);
        assert_eq!(Visibility::Internal.to_string(), "internal");
    }
}
