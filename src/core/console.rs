//! Diagnostics on stderr
//!
//! Results go to stdout through the renderer; everything here goes to
//! stderr so piped output stays machine-readable.

/// How chatty stderr should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// `--verbose` wins over `--quiet`
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbosity: Verbosity,
}

impl Console {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn shows_progress(&self) -> bool {
        self.verbosity != Verbosity::Quiet
    }

    pub fn shows_details(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Progress line, hidden by `--quiet`
    pub fn progress(&self, message: impl AsRef<str>) {
        if self.shows_progress() {
            eprintln!("{}", message.as_ref());
        }
    }

    /// Diagnostic line, only shown with `--verbose`
    pub fn detail(&self, message: impl AsRef<str>) {
        if self.shows_details() {
            eprintln!("[spacebench] {}", message.as_ref());
        }
    }
}
