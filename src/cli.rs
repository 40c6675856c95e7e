//! Command line options and startup loading.

use anyhow::{Context, Result};
use clap::Parser;
use demo_engine::{Catalog, DemoSettings};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "ib-demo", about = "Try an IB Commerce module before activating it")]
pub struct Args {
    /// Module to open the guided demo on at startup (e.g. commerce, finance).
    #[arg(long, short)]
    pub module: Option<String>,

    /// Display name shown in the demo header. Defaults to the module label.
    #[arg(long)]
    pub name: Option<String>,

    /// JSON catalog replacing the built-in modules.
    #[arg(long, env = "IB_DEMO_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// JSON file with tick/advance intervals and jitter ratio.
    #[arg(long, env = "IB_DEMO_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Print the available modules and exit.
    #[arg(long)]
    pub list: bool,
}

/// Everything the window needs, resolved from [`Args`].
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub catalog: Arc<Catalog>,
    pub settings: DemoSettings,
    pub module: Option<String>,
    pub name: Option<String>,
}

impl Args {
    pub fn load(&self) -> Result<DemoOptions> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::from_json_file(path)
                .with_context(|| format!("loading catalog {}", path.display()))?,
            None => Catalog::builtin().clone(),
        };
        let settings = match &self.settings {
            Some(path) => DemoSettings::from_json_file(path)
                .with_context(|| format!("loading settings {}", path.display()))?,
            None => DemoSettings::default(),
        };
        Ok(DemoOptions {
            catalog: Arc::new(catalog),
            settings,
            module: self.module.clone(),
            name: self.name.clone(),
        })
    }
}

/// One `key  label` line per module, for `--list`.
pub fn module_listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for key in catalog.module_keys() {
        let marker = if key == catalog.default_module() { " (default)" } else { "" };
        out.push_str(&format!("{:<14}{}{}\n", key, catalog.label(key), marker));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io::Write;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["ib-demo", "--module", "finance", "--name", "Books"]).unwrap();
        assert_eq!(args.module.as_deref(), Some("finance"));
        assert_eq!(args.name.as_deref(), Some("Books"));
        assert!(!args.list);
    }

    #[test]
    fn test_load_defaults() {
        let args = Args::try_parse_from(["ib-demo"]).unwrap();
        let options = args.load().unwrap();
        assert_eq!(options.catalog.default_module(), "commerce");
        assert_eq!(options.settings, DemoSettings::default());
    }

    #[test]
    fn test_load_custom_files() {
        let mut catalog = tempfile::NamedTempFile::new().unwrap();
        write!(
            catalog,
            r#"{{"default_module": "hr", "modules": {{"hr": {{"label": "IB People", "steps": [{{"title": "Onboarding", "description": "Day one ready."}}]}}}}}}"#
        )
        .unwrap();
        let mut settings = tempfile::NamedTempFile::new().unwrap();
        write!(settings, r#"{{"tick_interval_ms": 250}}"#).unwrap();

        let args = Args::try_parse_from([
            OsString::from("ib-demo"),
            OsString::from("--catalog"),
            catalog.path().as_os_str().to_os_string(),
            OsString::from("--settings"),
            settings.path().as_os_str().to_os_string(),
        ])
        .unwrap();
        let options = args.load().unwrap();
        assert_eq!(options.catalog.label("hr"), "IB People");
        assert_eq!(options.settings.tick_interval_ms, 250);
    }

    #[test]
    fn test_load_reports_bad_catalog() {
        let mut catalog = tempfile::NamedTempFile::new().unwrap();
        write!(catalog, "not json").unwrap();
        let args = Args {
            module: None,
            name: None,
            catalog: Some(catalog.path().to_path_buf()),
            settings: None,
            list: false,
        };
        let err = args.load().unwrap_err();
        assert!(err.to_string().starts_with("loading catalog"));
    }

    #[test]
    fn test_module_listing_marks_default() {
        let listing = module_listing(Catalog::builtin());
        assert!(listing.lines().next().unwrap().starts_with("commerce"));
        assert!(listing.contains("IB Commerce (default)"));
        assert_eq!(listing.lines().count(), 5);
    }
}
