//! Package metadata and its core-metadata renderings.
//!
//! The defaults describe the `cppyy-backend` distribution; a project manifest
//! may override any field.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Entry point group holding console scripts.
pub const CONSOLE_SCRIPTS: &str = "console_scripts";

/// Descriptive metadata of the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PackageMetadata {
  /// Distribution name as published (e.g. "cppyy-backend").
  pub name: String,
  /// Importable package name; also the last component of the install prefix.
  pub import_name: String,
  pub summary: String,
  /// Long description file, relative to the project directory.
  pub readme: Option<String>,
  pub home_page: Option<String>,
  pub author: Option<String>,
  pub author_email: Option<String>,
  pub license: Option<String>,
  pub keywords: Option<String>,
  pub classifiers: Vec<String>,
  /// Tag the wheel for both Python 2 and 3 (`py2.py3`).
  pub universal: bool,
  /// Version used when neither the environment nor git can provide one.
  pub fallback_version: Option<String>,
  /// Entry point groups, e.g. `console_scripts` -> { name -> "module:func" }.
  pub entry_points: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for PackageMetadata {
  fn default() -> Self {
    let mut console_scripts = BTreeMap::new();
    console_scripts.insert("genreflex".to_string(), "cppyy_backend._genreflex:main".to_string());
    let mut entry_points = BTreeMap::new();
    entry_points.insert(CONSOLE_SCRIPTS.to_string(), console_scripts);

    Self {
      name: "cppyy-backend".to_string(),
      import_name: "cppyy_backend".to_string(),
      summary: "cppyy backend containing Cling/LLVM".to_string(),
      readme: Some("README.rst".to_string()),
      home_page: Some("http://pypy.org".to_string()),
      author: Some("PyPy Developers".to_string()),
      author_email: Some("pypy-dev@python.org".to_string()),
      license: Some("LLVM: UoI-NCSA; ROOT: LGPL 2.1; Cppyy: LBNL BSD".to_string()),
      keywords: Some("interpreter development, C++ bindings".to_string()),
      classifiers: [
        "Development Status :: 4 - Beta",
        "Intended Audience :: Developers",
        "Topic :: Software Development",
        "Topic :: Software Development :: Interpreters",
        "Programming Language :: Python :: 2",
        "Programming Language :: Python :: 2.7",
        "Programming Language :: Python :: Implementation :: PyPy",
        "Programming Language :: Python :: 3",
        "Programming Language :: Python :: 3.5",
        "Programming Language :: C",
        "Programming Language :: C++",
        "Natural Language :: English",
      ]
      .into_iter()
      .map(String::from)
      .collect(),
      universal: true,
      fallback_version: None,
      entry_points,
    }
  }
}

impl PackageMetadata {
  /// Read the long description named by `readme`, if the file exists.
  pub fn long_description(&self, top_dir: &Path) -> Option<String> {
    let path = top_dir.join(self.readme.as_deref()?);
    match std::fs::read_to_string(&path) {
      Ok(content) => Some(content),
      Err(e) => {
        debug!(path = ?path, error = %e, "no long description");
        None
      }
    }
  }

  /// Content type of the long description, derived from the readme extension.
  fn description_content_type(&self) -> Option<&'static str> {
    let ext = Path::new(self.readme.as_deref()?).extension()?.to_str()?;
    match ext.to_ascii_lowercase().as_str() {
      "rst" => Some("text/x-rst"),
      "md" | "markdown" => Some("text/markdown"),
      "txt" => Some("text/plain"),
      _ => None,
    }
  }

  /// Render the `METADATA` file (core metadata 2.1).
  pub fn render_metadata(&self, version: &str, long_description: Option<&str>) -> String {
    let mut out = String::new();
    header(&mut out, "Metadata-Version", "2.1");
    header(&mut out, "Name", &self.name);
    header(&mut out, "Version", version);
    header(&mut out, "Summary", &self.summary);
    optional_header(&mut out, "Home-page", self.home_page.as_deref());
    optional_header(&mut out, "Author", self.author.as_deref());
    optional_header(&mut out, "Author-email", self.author_email.as_deref());
    optional_header(&mut out, "License", self.license.as_deref());
    optional_header(&mut out, "Keywords", self.keywords.as_deref());
    for classifier in &self.classifiers {
      header(&mut out, "Classifier", classifier);
    }

    if let Some(description) = long_description {
      optional_header(&mut out, "Description-Content-Type", self.description_content_type());
      out.push('\n');
      out.push_str(description);
      if !description.ends_with('\n') {
        out.push('\n');
      }
    }

    out
  }

  /// Render `entry_points.txt`, or `None` when no entry points are declared.
  pub fn render_entry_points(&self) -> Option<String> {
    let mut out = String::new();
    for (group, entries) in self.entry_points.iter().filter(|(_, e)| !e.is_empty()) {
      let _ = writeln!(out, "[{}]", group);
      for (name, target) in entries {
        let _ = writeln!(out, "{} = {}", name, target);
      }
      out.push('\n');
    }
    if out.is_empty() { None } else { Some(out) }
  }

  /// Render `top_level.txt`.
  pub fn render_top_level(&self) -> String {
    format!("{}\n", self.import_name)
  }
}

fn header(out: &mut String, key: &str, value: &str) {
  // Multi-line values would break the RFC 822 layout.
  let value = value.replace('\n', " ");
  let _ = writeln!(out, "{}: {}", key, value.trim());
}

fn optional_header(out: &mut String, key: &str, value: Option<&str>) {
  if let Some(value) = value {
    header(out, key, value);
  }
}
