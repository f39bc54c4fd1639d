use clap::builder::styling::{AnsiColor, Color};
use clap::builder::styling::{Style, Styles};
use clap::{ColorChoice, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "seqrep",
    version = env!("CARGO_PKG_VERSION"),
    about = "Aggregates sequencing QC reports (fragment-length, allelic status, SSDS) into normalized per-sample statistics",
    color = ColorChoice::Always,
    styles = get_styles(),
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Parse and merge every recognized report in a directory
    #[command(alias = "a")]
    Aggregate {
        /// Input directory path
        #[arg(short, long)]
        input: String,

        /// Output directory path
        #[arg(short, long)]
        output: String,

        /// Sample name to drop before merging (repeatable)
        #[arg(long = "ignore-sample")]
        ignore_samples: Vec<String>,
    },
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
