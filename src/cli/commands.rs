use clap::{Parser, Subcommand};

/// `mansite` - compliant SMS sending from a single-page form.
#[derive(Parser, Debug)]
#[command(name = "mansite")]
#[command(version)]
#[command(about = "Validate, split and send SMS messages.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the send form and its API
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Check a message against the compliance rules and show its segments
    Check {
        /// Message text
        message: String,
    },

    /// Send a message through the configured provider
    Send {
        /// Destination phone number
        #[arg(long)]
        to: String,

        /// Message text
        message: String,
    },

    /// Show recently logged messages
    History {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn send_takes_destination_flag_and_message() {
        let cli = Cli::try_parse_from(["mansite", "send", "--to", "+15552223333", "hello"]).unwrap();
        match cli.command {
            Commands::Send { to, message } => {
                assert_eq!(to, "+15552223333");
                assert_eq!(message, "hello");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn history_limit_defaults_to_twenty() {
        let cli = Cli::try_parse_from(["mansite", "history"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: 20 }));
    }
}
