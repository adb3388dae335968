//! WikiSearch: search Wikipedia from the terminal.
//!
//! Interactive console front-end: type a query to search in the current
//! language, `history` / `open N` to revisit saved articles, and `help` for
//! the rest. History and settings are flushed on `quit` or end of input.

use std::io::{self, BufRead, Write};

use wikisearch::app::App;
use wikisearch::logging;
use wikisearch::types::article::{ReplayOutcome, SearchOutcome};
use wikisearch::types::config::AppConfig;
use wikisearch::types::language::Language;
use wikisearch::types::settings::Settings;

const HELP: &str = "\
Commands:
  <query>                  search in the current language
  lang [CODE]              show or switch language (EN RU DE FR ES ZH JA KO)
  history                  list previous searches
  open N                   show the saved article for history entry N
  link N                   browser links for disambiguation option N
  font FAMILY SIZE [bold] [italic]
  color #RRGGBB            change the background color
  settings                 show display settings and colors
  reset                    restore default settings
  help                     show this text
  quit                     save and exit";

#[derive(Debug, PartialEq)]
enum Command {
    Search(String),
    Language(Option<String>),
    History,
    Open(usize),
    Link(usize),
    Font {
        family: String,
        size: u32,
        bold: bool,
        italic: bool,
    },
    Color(String),
    ShowSettings,
    Reset,
    Help,
    Quit,
    Invalid(String),
}

/// Parses a 1-based list position into an index.
fn position(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok().filter(|n| *n > 0).map(|n| n - 1)
}

fn parse_font(args: &str) -> Command {
    let mut words: Vec<&str> = args.split_whitespace().collect();
    let mut bold = false;
    let mut italic = false;
    while let Some(last) = words.last() {
        match last.to_lowercase().as_str() {
            "bold" => bold = true,
            "italic" => italic = true,
            _ => break,
        }
        words.pop();
    }
    let Some(size) = words.pop().and_then(|s| s.parse::<u32>().ok()) else {
        return Command::Invalid("usage: font FAMILY SIZE [bold] [italic]".to_string());
    };
    if words.is_empty() {
        return Command::Invalid("usage: font FAMILY SIZE [bold] [italic]".to_string());
    }
    Command::Font {
        family: words.join(" "),
        size,
        bold,
        italic,
    }
}

impl Command {
    fn parse(line: &str) -> Command {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "quit" | "exit" if rest.is_empty() => Command::Quit,
            "help" | "?" if rest.is_empty() => Command::Help,
            "history" if rest.is_empty() => Command::History,
            "settings" if rest.is_empty() => Command::ShowSettings,
            "reset" if rest.is_empty() => Command::Reset,
            "lang" => Command::Language((!rest.is_empty()).then(|| rest.to_string())),
            "open" => position(rest)
                .map(Command::Open)
                .unwrap_or_else(|| Command::Invalid("usage: open N".to_string())),
            "link" => position(rest)
                .map(Command::Link)
                .unwrap_or_else(|| Command::Invalid("usage: link N".to_string())),
            "font" => parse_font(rest),
            "color" if !rest.is_empty() => Command::Color(rest.to_string()),
            "search" => Command::Search(rest.to_string()),
            _ => Command::Search(line.to_string()),
        }
    }
}

struct Console {
    app: App,
    last_options: Vec<String>,
}

impl Console {
    fn run(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Invalid(msg) => writeln!(out, "{}", msg)?,
            Command::Search(query) => self.search(&query, out)?,
            Command::Language(None) => writeln!(out, "Language: {}", self.app.language())?,
            Command::Language(Some(code)) => match self.app.set_language(&code) {
                Ok(language) => writeln!(out, "Language: {}", language)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::History => {
                let history = self.app.history();
                if history.is_empty() {
                    writeln!(out, "No previous searches.")?;
                }
                for (i, entry) in history.iter().enumerate() {
                    writeln!(out, "{:>3}. {}", i + 1, entry)?;
                }
            }
            Command::Open(index) => match self.app.open_history(index) {
                Some((_, ReplayOutcome::Loaded { text })) => writeln!(out, "{}", text)?,
                Some((_, ReplayOutcome::FileMissing)) => writeln!(out, "File not found.")?,
                Some((_, ReplayOutcome::NotInHistory)) | None => {
                    writeln!(out, "No history entry {}.", index + 1)?
                }
            },
            Command::Link(index) => match self.last_options.get(index) {
                Some(title) => {
                    let link = self.app.resolve_option(title);
                    writeln!(out, "{}\n(search: {})", link.direct, link.search_fallback)?;
                }
                None => writeln!(out, "No disambiguation option {}.", index + 1)?,
            },
            Command::Font {
                family,
                size,
                bold,
                italic,
            } => {
                let settings = Settings {
                    font_family: family,
                    font_size_pt: size,
                    bold,
                    italic,
                    ..self.app.session.settings.clone()
                };
                self.apply_settings(settings, out)?;
            }
            Command::Color(color) => {
                let settings = Settings {
                    background_color_hex: color,
                    ..self.app.session.settings.clone()
                };
                self.apply_settings(settings, out)?;
            }
            Command::ShowSettings => self.show_settings(out)?,
            Command::Reset => {
                if let Err(e) = self.app.reset_settings() {
                    writeln!(out, "{}", e)?;
                }
                self.show_settings(out)?;
            }
        }
        Ok(true)
    }

    fn search(&mut self, query: &str, out: &mut impl Write) -> io::Result<()> {
        match self.app.search(query) {
            SearchOutcome::EmptyQuery => writeln!(out, "Please enter a query."),
            SearchOutcome::Displayed { text } => {
                self.last_options.clear();
                writeln!(out, "{}", text)
            }
            SearchOutcome::Ambiguous { options } => {
                writeln!(out, "Disambiguation options found. Select one with `link N`:")?;
                for (i, option) in options.iter().enumerate() {
                    writeln!(out, "{:>3}. {}", i + 1, option)?;
                }
                self.last_options = options;
                Ok(())
            }
            SearchOutcome::NotFound => {
                self.last_options.clear();
                writeln!(out, "Nothing was found on Wikipedia.")
            }
            SearchOutcome::Failed { reason } => writeln!(out, "Search failed: {}", reason),
        }
    }

    fn apply_settings(&mut self, settings: Settings, out: &mut impl Write) -> io::Result<()> {
        match self.app.update_settings(settings) {
            Ok(()) => self.show_settings(out),
            Err(e) => writeln!(out, "{}", e),
        }
    }

    fn show_settings(&self, out: &mut impl Write) -> io::Result<()> {
        let s = &self.app.session.settings;
        let palette = self.app.palette();
        writeln!(
            out,
            "Font: {} {}pt{}{}\nBackground: {} (panels {}, borders {})",
            s.font_family,
            s.font_size_pt,
            if s.bold { " bold" } else { "" },
            if s.italic { " italic" } else { "" },
            palette.background,
            palette.panel,
            palette.border
        )
    }
}

fn main() {
    logging::init();

    let config = AppConfig::from_env();
    let mut app = match App::with_wikipedia(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("failed to initialize WikiSearch: {}", e);
            std::process::exit(1);
        }
    };
    app.startup();

    let mut console = Console {
        app,
        last_options: Vec::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let languages: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
    let _ = writeln!(
        out,
        "WikiSearch v{} ({}). Type `help` for commands.",
        env!("CARGO_PKG_VERSION"),
        languages.join(" ")
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let _ = write!(out, "[{}] > ", console.app.language());
        let _ = out.flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        match console.run(Command::parse(&line), &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::error!("console output failed: {}", e);
                break;
            }
        }
    }

    console.app.shutdown();
}
