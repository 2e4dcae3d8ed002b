use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};
use termimad::MadSkin;

const BANNER: &str = r#"
 +--------------------------------------+
 |   I N G R E D I E N T   ~   I Q      |
 +--------------------------------------+"#;

pub const FOLLOW_UP_PROMPT: &str = "\nEnter your message (or 'quit' to exit): ";

pub fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", BANNER.bright_green().bold())?;
    writeln!(out, "{}", "Your food log, read by a preventive-health expert.".dimmed())
}

pub fn status<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.cyan())
}

/// Prints an assistant reply, rendering its markdown for the terminal.
pub fn render_reply<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    let skin = MadSkin::default();
    writeln!(out, "{}", "AI Response:".green().bold())?;
    write!(out, "{}", skin.term_text(text))?;
    out.flush()
}

pub fn render_error<W: Write>(out: &mut W, context: &str, err: &dyn Display) -> io::Result<()> {
    writeln!(out, "{} {}", format!("{}:", context).red().bold(), err)
}
