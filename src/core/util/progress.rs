use crate::core::Verbosity;
use std::error::Error;
use std::io::Write;
use std::time::{Duration, Instant};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Width of the right-aligned status column
const STATUS_WIDTH: usize = 12;
/// Minimum time between two redraws of the unit counter
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);
/// Clear to the end of the line
const CLEAR_LINE: &str = "\x1b[0K";

/// Cargo-style status lines on stderr, plus a `<verb> done/total` unit counter
/// redrawn in place while units are processed
pub struct Progress {
    out: StandardStream,
    units_done: usize,
    units_total: usize,
    /// Shown in front of the counter, depends on the mode
    counter_verb: &'static str,
    last_redraw: Instant,
    verbosity: Verbosity,
}

impl Progress {
    pub fn new(verbosity: Verbosity, counter_verb: &'static str) -> Self {
        Self {
            out: StandardStream::stderr(ColorChoice::Auto),
            units_done: 0,
            units_total: 0,
            counter_verb,
            last_redraw: Instant::now(),
            verbosity,
        }
    }

    /// Set how many units the run will process
    pub fn start_units(&mut self, total: usize) -> Result<(), Box<dyn Error>> {
        self.units_total = total;
        self.units_done = 0;
        self.redraw_counter(false)
    }

    /// Count one more unit as processed, whatever its outcome
    pub fn finish_unit(&mut self) -> Result<(), Box<dyn Error>> {
        self.units_done += 1;
        self.redraw_counter(false)
    }

    fn in_progress(&self) -> bool {
        self.units_done < self.units_total
    }

    fn counter_text(&self) -> String {
        format!("{}/{}", self.units_done, self.units_total)
    }

    fn redraw_counter(&mut self, force: bool) -> Result<(), Box<dyn Error>> {
        if self.verbosity == Verbosity::Quiet || !self.in_progress() {
            return Ok(());
        }
        if !force && self.last_redraw.elapsed() <= REDRAW_INTERVAL {
            return Ok(());
        }
        let verb = self.counter_verb;
        let counter = self.counter_text();
        self.write_status(verb, Color::Yellow)?;
        write!(self.out, " {counter}\r")?;
        self.out.flush()?;
        self.last_redraw = Instant::now();
        Ok(())
    }

    fn write_status(&mut self, status: &str, color: Color) -> Result<(), Box<dyn Error>> {
        self.out.reset()?;
        self.out
            .set_color(ColorSpec::new().set_bold(true).set_fg(Some(color)))?;
        write!(self.out, "{:>width$}", status, width = STATUS_WIDTH)?;
        self.out.reset()?;
        Ok(())
    }

    /// Print a status line. `verbose` lines only show with [`Verbosity::Verbose`]
    pub fn print_status(
        &mut self,
        status: &str,
        message: &str,
        color: Color,
        verbose: bool,
    ) -> Result<(), Box<dyn Error>> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }
        if verbose && self.verbosity != Verbosity::Verbose {
            return Ok(());
        }
        self.write_status(status, color)?;
        writeln!(self.out, " {message}{CLEAR_LINE}")?;
        // the status line overwrote the counter
        self.redraw_counter(true)
    }

    /// Print captured formatter output under the last status, indented
    pub fn print_detail(&mut self, detail: &str) -> Result<(), Box<dyn Error>> {
        if self.verbosity == Verbosity::Quiet || detail.is_empty() {
            return Ok(());
        }
        self.out.reset()?;
        for line in detail.lines() {
            writeln!(self.out, "{:>width$} {line}{CLEAR_LINE}", "", width = STATUS_WIDTH)?;
        }
        self.redraw_counter(true)
    }
}
