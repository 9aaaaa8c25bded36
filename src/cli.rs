use std::path::PathBuf;

use clap::Parser;

use crate::app::domain::events::AppEvent;

/// Hierarchical note-taking application
#[derive(Debug, Parser)]
#[command(name = "cherrypad", version, about)]
pub struct Cli {
    /// Documents to open (.ctd, .ctb, .ctz, .ctx)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// The event that starts the application: activation when no files
    /// were given, an open request otherwise.
    pub fn launch_event(&self) -> AppEvent {
        if self.files.is_empty() {
            AppEvent::Activate
        } else {
            AppEvent::Open(self.files.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_activates() {
        let cli = Cli::try_parse_from(["cherrypad"]).unwrap();
        assert_eq!(cli.launch_event(), AppEvent::Activate);
    }

    #[test]
    fn test_file_arguments_open() {
        let cli = Cli::try_parse_from(["cherrypad", "a.ctb", "notes/b.ctd"]).unwrap();
        assert_eq!(
            cli.launch_event(),
            AppEvent::Open(vec![PathBuf::from("a.ctb"), PathBuf::from("notes/b.ctd")])
        );
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["cherrypad", "--frobnicate"]).is_err());
    }
}
