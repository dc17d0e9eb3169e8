use crate::core::util::Progress;
use crate::core::verbs;
use crate::error::FmtwalkError;
use crate::fs::{normalize_ext, AbsPath, Formatter, FormatterFailure, IgnoreRules};
use error_stack::Result;
use termcolor::Color;

mod config;
pub use config::*;

mod error;
pub use error::ExecuteError;
mod scan_dir;
use scan_dir::scan_tree;
mod unit;
pub use unit::*;

/// Run fmtwalk with the given config
///
/// This is the main entry point for fmtwalk. It takes a [`Config`] and runs fmtwalk.
/// If the run cannot start, or any unit fails to format, the errors are printed
/// to stderr and the function returns [`Err`].
///
/// If you want to retrieve the error object instead of printing it, use [`Fmtwalk::run`].
pub fn fmtwalk(config: Config) -> std::result::Result<Summary, ()> {
    let result = Fmtwalk::run(config)
        .map_err(|e| e.change_context(FmtwalkError))
        .and_then(Summary::into_result);
    match result {
        Ok(summary) => Ok(summary),
        Err(e) => {
            eprintln!("{:?}", e);
            Err(())
        }
    }
}

/// The runtime state when executing fmtwalk
pub struct Fmtwalk {
    /// The Config
    config: Config,
    /// The Progress reporter
    progress: Progress,
}

impl Fmtwalk {
    /// Internal run function
    ///
    /// This is what [`fmtwalk`] calls internally. The difference is that this function
    /// returns the error instead of printing it, and a run where some units failed
    /// is still [`Ok`]. Check [`Summary::failures`] for those.
    pub fn run(config: Config) -> Result<Summary, ExecuteError> {
        log::info!("creating fmtwalk");
        log::debug!("using config: {:?}", config);

        let progress = Progress::new(config.verbosity.clone(), config.mode.counter_verb());

        let runtime = Self { config, progress };
        runtime.run_internal()
    }

    fn run_internal(mut self) -> Result<Summary, ExecuteError> {
        let root = AbsPath::create_base(self.config.root_dir.clone()).map_err(|e| {
            e.change_context(ExecuteError)
                .attach_printable("cannot resolve root directory")
        })?;

        // nothing is scanned unless the ignore rules are loaded
        let ignore_path = root.join_unchecked(&self.config.ignore_file);
        let rules = IgnoreRules::load(&ignore_path).map_err(|e| {
            e.change_context(ExecuteError)
                .attach_printable("cannot load ignore rules")
        })?;
        if rules.is_empty() {
            log::warn!("{} has no patterns, no directory is ignored", ignore_path.display());
        }
        let _ = self.progress.print_status(
            verbs::LOADED,
            &format!(
                "{} ignore pattern(s): {}",
                rules.len(),
                rules.patterns().collect::<Vec<_>>().join(" ")
            ),
            Color::Yellow,
            true,
        );

        let formatter = match self.config.mode {
            Mode::List => None,
            Mode::Format => {
                let formatter =
                    Formatter::new(&self.config.formatter_cmd, &self.config.formatter_args)
                        .map_err(|e| {
                            e.change_context(ExecuteError).attach_printable(format!(
                                "cannot resolve formatter command: {cmd}",
                                cmd = self.config.formatter_cmd
                            ))
                        })?;
                let _ = self.progress.print_status(
                    verbs::USING,
                    &formatter.to_string(),
                    Color::Yellow,
                    false,
                );
                Some(formatter)
            }
        };

        let exts = self.extensions();
        log::info!("scanning {root} for extensions {exts:?}");
        let scan = scan_tree(&root, &rules, &exts);
        for dir in &scan.ignored {
            let _ = self
                .progress
                .print_status(verbs::IGNORED, dir, Color::Yellow, true);
        }

        let mut summary = Summary {
            ignored: scan.ignored,
            ..Default::default()
        };
        let _ = self.progress.start_units(scan.units.len());

        for unit in scan.units {
            match &formatter {
                Some(formatter) => {
                    if let Err(failure) = self.format_unit(formatter, &root, &unit) {
                        summary.failures.push(failure);
                    }
                }
                None => {
                    let _ = self.progress.print_status(
                        verbs::FOUND,
                        &unit.pattern(),
                        Color::Green,
                        false,
                    );
                }
            }
            let _ = self.progress.finish_unit();
            summary.units.push(unit);
        }

        let ok_count = summary.units.len() - summary.failures.len();
        if summary.failures.is_empty() {
            let _ = self.progress.print_status(
                verbs::DONE,
                &format!("{ok_count} unit(s)"),
                Color::Green,
                false,
            );
        } else {
            let _ = self.progress.print_status(
                verbs::FAILED,
                &format!(
                    "{} unit(s), {ok_count} unit(s) ok",
                    summary.failures.len()
                ),
                Color::Red,
                false,
            );
        }

        Ok(summary)
    }

    /// Run the formatter on one unit. A failure is returned, not propagated,
    /// so the remaining units still run.
    fn format_unit(
        &mut self,
        formatter: &Formatter,
        root: &AbsPath,
        unit: &Unit,
    ) -> std::result::Result<(), UnitFailure> {
        let pattern = unit.pattern();
        let _ = self
            .progress
            .print_status(verbs::FORMATTING, &pattern, Color::Green, false);
        log::info!("formatting unit: {pattern}");

        let targets = unit.targets(&self.config.target_style);
        match formatter.run(&targets, root) {
            Ok(_) => Ok(()),
            Err(e) => {
                let message = match e.downcast_ref::<FormatterFailure>() {
                    Some(failure) => failure.message.clone(),
                    // the process did not start at all
                    None => format!("{e:?}"),
                };
                log::error!("{} error encountered\n{message}", formatter.name());
                let _ = self
                    .progress
                    .print_status(verbs::FAILED, &pattern, Color::Red, false);
                let _ = self.progress.print_detail(&message);
                Err(UnitFailure {
                    unit: unit.clone(),
                    message,
                })
            }
        }
    }

    /// The configured extensions without the leading `.`, deduplicated in order
    fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = Vec::new();
        for ext in self.config.extensions.iter().map(|e| normalize_ext(e)) {
            if !ext.is_empty() && !exts.contains(&ext) {
                exts.push(ext);
            }
        }
        exts
    }
}
