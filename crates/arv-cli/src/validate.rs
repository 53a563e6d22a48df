//! # Validate Command
//!
//! Arguments, option merging and the handler that runs one validation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use arv_validate::Validator;

use crate::render::{render_json, render_text, ReportFormat};
use crate::settings::Settings;
use crate::{EXIT_MISMATCH, EXIT_SUCCESS};

/// Arguments for validating a project against a RAML specification.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Path to the RAML specification.
    pub spec: Option<PathBuf>,

    /// Path to the Apigility project root.
    pub project: Option<PathBuf>,

    /// Module to validate. Defaults to the specification title.
    #[arg(short, long)]
    pub module: Option<String>,

    /// Surface RAML parser warnings.
    #[arg(short, long)]
    pub debug: bool,

    /// Report format.
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub spec: PathBuf,
    pub project: PathBuf,
    pub module: Option<String>,
    pub debug: bool,
    pub format: ReportFormat,
    pub color: bool,
}

impl RunOptions {
    /// Merge command-line arguments over settings-file values.
    ///
    /// `no_color_env` reports whether the `NO_COLOR` environment variable is
    /// set; it is overridden by an explicit `color` setting.
    pub fn merge(args: ValidateArgs, settings: Settings, no_color_env: bool) -> Result<Self> {
        let spec = args
            .spec
            .or(settings.spec)
            .context("no RAML specification given: pass <SPEC> or set `spec` in the settings file")?;
        let project = args
            .project
            .or(settings.project)
            .context("no project given: pass <PROJECT> or set `project` in the settings file")?;

        let color = !args.no_color && settings.color.unwrap_or(!no_color_env);

        Ok(Self {
            spec,
            project,
            module: args.module.or(settings.module),
            debug: args.debug || settings.debug.unwrap_or(false),
            format: args.format.or(settings.format).unwrap_or_default(),
            color,
        })
    }
}

/// Parse the specification, validate the project, and write the report to
/// `out`. Returns the process exit code.
pub fn run_validate(options: &RunOptions, out: &mut dyn Write) -> Result<u8> {
    let parsed = arv_raml::parse_file(&options.spec).with_context(|| {
        format!("failed to parse RAML specification {}", options.spec.display())
    })?;

    for warning in &parsed.warnings {
        if options.debug {
            tracing::warn!("{warning}");
        } else {
            tracing::debug!("{warning}");
        }
    }

    let spec = parsed.specification;
    tracing::info!(
        title = %spec.title,
        version = spec.version.as_deref().unwrap_or("-"),
        resources = spec.resources.len(),
        "parsed specification"
    );

    let report = Validator::new(&spec, &options.project, options.module.as_deref())
        .run()
        .with_context(|| format!("failed to validate project {}", options.project.display()))?;

    let rendered = match options.format {
        ReportFormat::Text => render_text(&report, options.color),
        ReportFormat::Json => render_json(&report).context("failed to serialize report")?,
    };
    out.write_all(rendered.as_bytes())
        .context("failed to write report")?;

    Ok(if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_MISMATCH
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(spec: &str, project: &str) -> ValidateArgs {
        ValidateArgs {
            spec: Some(spec.into()),
            project: Some(project.into()),
            ..ValidateArgs::default()
        }
    }

    #[test]
    fn arguments_win_over_settings() {
        let settings = Settings {
            spec: Some("other.raml".into()),
            project: Some("other".into()),
            module: Some("Other".into()),
            format: Some(ReportFormat::Json),
            ..Settings::default()
        };
        let mut a = args("api.raml", "app");
        a.module = Some("Shop".into());
        a.format = Some(ReportFormat::Text);

        let options = RunOptions::merge(a, settings, false).unwrap();
        assert_eq!(options.spec, PathBuf::from("api.raml"));
        assert_eq!(options.project, PathBuf::from("app"));
        assert_eq!(options.module.as_deref(), Some("Shop"));
        assert_eq!(options.format, ReportFormat::Text);
    }

    #[test]
    fn settings_fill_missing_arguments() {
        let settings = Settings {
            spec: Some("api.raml".into()),
            project: Some("app".into()),
            module: Some("Shop".into()),
            debug: Some(true),
            format: Some(ReportFormat::Json),
            color: None,
        };
        let options = RunOptions::merge(ValidateArgs::default(), settings, false).unwrap();
        assert_eq!(options.spec, PathBuf::from("api.raml"));
        assert_eq!(options.module.as_deref(), Some("Shop"));
        assert!(options.debug);
        assert_eq!(options.format, ReportFormat::Json);
        assert!(options.color);
    }

    #[test]
    fn missing_spec_is_an_error() {
        let err = RunOptions::merge(ValidateArgs::default(), Settings::default(), false).unwrap_err();
        assert!(err.to_string().contains("no RAML specification"));
    }

    #[test]
    fn missing_project_is_an_error() {
        let a = ValidateArgs {
            spec: Some("api.raml".into()),
            ..ValidateArgs::default()
        };
        let err = RunOptions::merge(a, Settings::default(), false).unwrap_err();
        assert!(err.to_string().contains("no project"));
    }

    #[test]
    fn color_resolution() {
        let on = RunOptions::merge(args("a", "b"), Settings::default(), false).unwrap();
        assert!(on.color);

        let env_off = RunOptions::merge(args("a", "b"), Settings::default(), true).unwrap();
        assert!(!env_off.color);

        let setting_on = Settings {
            color: Some(true),
            ..Settings::default()
        };
        let forced = RunOptions::merge(args("a", "b"), setting_on.clone(), true).unwrap();
        assert!(forced.color);

        let mut flag = args("a", "b");
        flag.no_color = true;
        assert!(!RunOptions::merge(flag, setting_on, false).unwrap().color);
    }

    #[test]
    fn unreadable_spec_is_fatal() {
        let options = RunOptions::merge(args("/nonexistent/api.raml", "/nonexistent"), Settings::default(), true)
            .unwrap();
        let mut out = Vec::new();
        let err = run_validate(&options, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse RAML specification"));
        assert!(out.is_empty());
    }

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Run with a `warn`-level subscriber and return what it logged.
    fn warn_logs(options: &RunOptions) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            // The project has no module config, so the run ends in an
            // error after the parser warnings are logged.
            let mut out = Vec::new();
            assert!(run_validate(options, &mut out).is_err());
        });
        captured.text()
    }

    #[test]
    fn debug_controls_parser_warning_level() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("api.raml");
        std::fs::write(
            &spec,
            "#%RAML 1.0\ntitle: Shop\nversion: v1\n/widgets:\n  frobnicate: yes\n  get:\n    description: List\n",
        )
        .unwrap();

        let mut options = RunOptions::merge(
            args(spec.to_str().unwrap(), dir.path().to_str().unwrap()),
            Settings::default(),
            true,
        )
        .unwrap();

        options.debug = true;
        let logs = warn_logs(&options);
        assert!(logs.contains("ignored unknown property 'frobnicate'"), "{logs}");

        options.debug = false;
        let logs = warn_logs(&options);
        assert!(!logs.contains("frobnicate"), "{logs}");
    }
}
