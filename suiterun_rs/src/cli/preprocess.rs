//! Early scan of argv for the global `--config` / `-c` option.
//!
//! The launcher must know which configuration file is in effect before the
//! command table is built, so this pass runs ahead of dispatch. Accepted
//! spellings:
//!
//! ```text
//! -c file.toml|dir        -cfile.toml|dir
//! --config file.toml|dir  --config=file.toml|dir
//! -xc file.toml|dir       -xcfile.toml|dir   (keeps -x)
//! ```

use std::sync::OnceLock;

use once_cell::unsync::OnceCell;
use regex::Regex;
use tracing::debug;

use crate::config::ConfigSource;
use crate::error::LaunchError;

/// Group 1: short flags bundled before `c`. Group 2: inline value.
fn config_flag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:-([^c-]*)?c|--config(?:=|$))(.*)$").expect("valid regex literal")
    })
}

/// Result of the config pre-scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    /// Last resolved config override, never empty.
    pub config_path: Option<String>,
    /// Input for dispatch, with config tokens removed.
    pub remaining: Vec<String>,
}

/// Scans argv once and keeps the result for every later caller.
#[derive(Debug, Default)]
pub struct ArgvPreprocessor {
    parsed: OnceCell<ParsedArguments>,
}

impl ArgvPreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `raw_argv`, preloading each resolved config path through `source`.
    ///
    /// Only the first call scans; later calls return the cached value and
    /// ignore their arguments.
    pub fn process<S>(
        &self,
        raw_argv: &[String],
        source: &mut S,
    ) -> Result<&ParsedArguments, LaunchError>
    where
        S: ConfigSource + ?Sized,
    {
        self.parsed.get_or_try_init(|| scan(raw_argv, source))
    }

    /// The cached result, if [`process`](Self::process) already succeeded.
    pub fn cached(&self) -> Option<&ParsedArguments> {
        self.parsed.get()
    }
}

fn scan<S>(raw_argv: &[String], source: &mut S) -> Result<ParsedArguments, LaunchError>
where
    S: ConfigSource + ?Sized,
{
    let mut parsed = ParsedArguments::default();

    let mut i = 0;
    while i < raw_argv.len() {
        let arg = &raw_argv[i];
        let Some(caps) = config_flag_regex().captures(arg) else {
            parsed.remaining.push(arg.clone());
            i += 1;
            continue;
        };

        let prefix_flags = caps.get(1).map_or("", |m| m.as_str());
        let inline_value = caps.get(2).map_or("", |m| m.as_str());
        let value = if inline_value.is_empty() {
            raw_argv.get(i + 1).map_or("", String::as_str)
        } else {
            inline_value
        };

        if !value.is_empty() {
            preload(source, value)?;
            parsed.config_path = Some(value.to_string());
            if inline_value.is_empty() {
                i += 1;
            }
        }

        if !prefix_flags.is_empty() {
            parsed.remaining.push(format!("-{prefix_flags}"));
        }
        i += 1;
    }

    debug!(
        config = parsed.config_path.as_deref().unwrap_or("<default>"),
        remaining = parsed.remaining.len(),
        "argv pre-scan finished"
    );
    Ok(parsed)
}

/// A missing explicit path is fatal, unlike a failed default discovery.
fn preload<S>(source: &mut S, path: &str) -> Result<(), LaunchError>
where
    S: ConfigSource + ?Sized,
{
    debug!(path, "preloading configuration");
    match source.load(Some(path)) {
        Ok(_) => Ok(()),
        Err(LaunchError::NotFound { .. }) => Err(LaunchError::NotFoundExplicit {
            path: path.to_string(),
        }),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scan_with(items: &[&str]) -> (ParsedArguments, FakeSource) {
        let mut source = FakeSource::default().with_file("foo.yml", &[]);
        let parsed = scan(&argv(items), &mut source).expect("scan argv");
        (parsed, source)
    }

    #[test]
    fn test_no_config_tokens_is_identity() {
        let input = ["run", "unit", "--debug", "-v", "--steps", "-x"];
        let (parsed, source) = scan_with(&input);
        assert_eq!(parsed.remaining, argv(&input));
        assert_eq!(parsed.config_path, None);
        assert!(source.loads.is_empty());
    }

    #[test]
    fn test_all_spellings_resolve_same_path() {
        let cases: &[&[&str]] = &[
            &["run", "-c", "foo.yml", "unit"],
            &["run", "-cfoo.yml", "unit"],
            &["run", "--config", "foo.yml", "unit"],
            &["run", "--config=foo.yml", "unit"],
        ];
        for case in cases {
            let (parsed, source) = scan_with(case);
            assert_eq!(parsed.config_path.as_deref(), Some("foo.yml"), "{case:?}");
            assert_eq!(parsed.remaining, argv(&["run", "unit"]), "{case:?}");
            assert_eq!(source.loads, vec![Some("foo.yml".to_string())], "{case:?}");
        }
    }

    #[test]
    fn test_cluster_keeps_other_flags() {
        let (parsed, _) = scan_with(&["run", "-xcfoo.yml", "unit"]);
        assert_eq!(parsed.config_path.as_deref(), Some("foo.yml"));
        assert_eq!(parsed.remaining, argv(&["run", "-x", "unit"]));

        let (parsed, _) = scan_with(&["-vxc", "foo.yml", "run"]);
        assert_eq!(parsed.config_path.as_deref(), Some("foo.yml"));
        assert_eq!(parsed.remaining, argv(&["-vx", "run"]));
    }

    #[test]
    fn test_similar_long_flags_are_untouched() {
        let input = ["--configure", "--cache", "--color=always", "--config-dir"];
        let (parsed, source) = scan_with(&input);
        assert_eq!(parsed.remaining, argv(&input));
        assert!(parsed.config_path.is_none());
        assert!(source.loads.is_empty());
    }

    #[test]
    fn test_trailing_flag_is_inert() {
        let (parsed, source) = scan_with(&["run", "-c"]);
        assert_eq!(parsed.config_path, None);
        assert_eq!(parsed.remaining, argv(&["run"]));
        assert!(source.loads.is_empty());

        let (parsed, _) = scan_with(&["run", "-xc"]);
        assert_eq!(parsed.remaining, argv(&["run", "-x"]));
    }

    #[test]
    fn test_empty_next_token_is_not_consumed() {
        let (parsed, source) = scan_with(&["-c", "", "run"]);
        assert_eq!(parsed.config_path, None);
        assert_eq!(parsed.remaining, argv(&["", "run"]));
        assert!(source.loads.is_empty());
    }

    #[test]
    fn test_unresolved_flag_keeps_previous_path() {
        let (parsed, _) = scan_with(&["-c", "foo.yml", "run", "--config="]);
        assert_eq!(parsed.config_path.as_deref(), Some("foo.yml"));
        assert_eq!(parsed.remaining, argv(&["run"]));
    }

    #[test]
    fn test_last_flag_wins() {
        let mut source = FakeSource::default()
            .with_file("first.toml", &[])
            .with_file("second.toml", &[]);
        let parsed = scan(
            &argv(&["-c", "first.toml", "run", "--config=second.toml"]),
            &mut source,
        )
        .expect("scan argv");

        assert_eq!(parsed.config_path.as_deref(), Some("second.toml"));
        assert_eq!(
            source.loads,
            vec![Some("first.toml".to_string()), Some("second.toml".to_string())]
        );
    }

    #[test]
    fn test_missing_explicit_path_is_fatal() {
        let mut source = FakeSource::default();
        let err = scan(&argv(&["-c", "missing.toml", "run"]), &mut source)
            .expect_err("missing explicit config");
        match err {
            LaunchError::NotFoundExplicit { path } => assert_eq!(path, "missing.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_explicit_path_is_fatal() {
        let mut source = FakeSource::default().with_broken_file("broken.toml");
        let err = scan(&argv(&["--config=broken.toml", "run"]), &mut source)
            .expect_err("malformed explicit config");
        match err {
            LaunchError::Parse { path, .. } => assert_eq!(path, "broken.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(source.loads, vec![Some("broken.toml".to_string())]);
    }

    #[test]
    fn test_process_is_memoized() {
        let preprocessor = ArgvPreprocessor::new();
        let mut source = FakeSource::default().with_file("foo.yml", &[]);

        let first = preprocessor
            .process(&argv(&["-c", "foo.yml", "run"]), &mut source)
            .expect("first scan") as *const ParsedArguments;
        let second = preprocessor
            .process(&argv(&["something", "else"]), &mut source)
            .expect("cached scan") as *const ParsedArguments;

        assert!(std::ptr::eq(first, second));
        assert_eq!(source.loads.len(), 1);
        assert_eq!(
            preprocessor.cached().map(|p| p.remaining.clone()),
            Some(argv(&["run"]))
        );
    }

    #[test]
    fn test_failed_scan_is_not_cached() {
        let preprocessor = ArgvPreprocessor::new();
        let mut source = FakeSource::default();
        assert!(
            preprocessor
                .process(&argv(&["-c", "missing.toml"]), &mut source)
                .is_err()
        );
        assert!(preprocessor.cached().is_none());
    }
}
