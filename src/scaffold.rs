//! Starter files for a new repository.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ports::filesystem::FileSystem;

/// Gitignore written when no template file is configured.
pub const DEFAULT_GITIGNORE: &str = "\
# Build output
target/
build/
dist/
*.egg-info/

# Python
__pycache__/
*.py[cod]
.venv/
venv/

# Environment
.env

# Editors and OS
.vscode/
.idea/
.DS_Store
";

const MIT_LICENSE: &str = "\
MIT License

Copyright (c) {year} {holder}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

/// The three files written into a fresh repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    /// `.gitignore` contents.
    pub gitignore: String,
    /// `README.md` contents.
    pub readme: String,
    /// `LICENSE.txt` contents.
    pub license: String,
}

impl ProjectFiles {
    /// Renders the files for a project.
    pub fn render(
        name: &str,
        description: Option<&str>,
        holder: &str,
        year: i32,
        gitignore: &str,
    ) -> Self {
        let readme = match description.map(str::trim).filter(|d| !d.is_empty()) {
            Some(description) => format!("# {name}\n\n{description}\n"),
            None => format!("# {name}\n"),
        };
        let license =
            MIT_LICENSE.replace("{year}", &year.to_string()).replace("{holder}", holder);
        let mut gitignore = gitignore.trim_end().to_string();
        gitignore.push('\n');
        Self { gitignore, readme, license }
    }

    /// Writes the files into `dir`, leaving any that already exist alone.
    ///
    /// Returns the paths that were written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] when a write fails.
    pub fn write_to(&self, fs: &dyn FileSystem, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (file, contents) in
            [(".gitignore", &self.gitignore), ("README.md", &self.readme), ("LICENSE.txt", &self.license)]
        {
            let path = dir.join(file);
            if fs.create(&path, contents).map_err(|e| Error::file(&path, e))? {
                written.push(path);
            } else {
                tracing::info!(path = %path.display(), "keeping existing file");
            }
        }
        Ok(written)
    }
}

/// Reads the gitignore template, or returns the built-in one.
///
/// # Errors
///
/// Returns [`Error::File`] when a configured template cannot be read.
pub fn load_gitignore(fs: &dyn FileSystem, template: Option<&Path>) -> Result<String> {
    match template {
        Some(path) => fs.read_to_string(path).map_err(|e| Error::file(path, e)),
        None => Ok(DEFAULT_GITIGNORE.to_string()),
    }
}

/// Title-cases a directory name the way repository names are derived:
/// a letter is upper-cased when it does not follow another letter.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut after_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

/// Repository name for `dir`: its title-cased final component.
pub fn default_repo_name(dir: &Path) -> String {
    dir.file_name().map(|n| title_case(&n.to_string_lossy())).unwrap_or_default()
}
