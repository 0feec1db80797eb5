use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rack_elevation_config::Config;
use rack_elevation_engine::{HtmlWriter, RackOutput, StructuralRow, io, render_document};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Html,
    Csv,
    View,
}

const USAGE: &str = "[--html|--csv|--view] [-o <output>] <file>";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    mode: Mode,
    file: PathBuf,
    /// Written instead of stdout. Not available with `--view`.
    output: Option<PathBuf>,
}

/// Flags and the input file, in any order.
fn parse_args(args: &[String]) -> Option<Args> {
    let mut mode = Mode::Html;
    let mut file = None;
    let mut output = None;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => mode = Mode::Html,
            "--csv" => mode = Mode::Csv,
            "--view" => mode = Mode::View,
            "-o" | "--output" => output = Some(PathBuf::from(args.next()?)),
            flag if flag.starts_with('-') => return None,
            path if file.is_none() => file = Some(PathBuf::from(path)),
            _ => return None,
        }
    }

    if mode == Mode::View && output.is_some() {
        return None;
    }
    file.map(|file| Args { mode, file, output })
}

struct App {
    title: String,
    racks: Vec<RackOutput>,
    selected: usize,
    scroll: u16,
    show_csv: bool,
}

impl App {
    fn new(title: String, racks: Vec<RackOutput>) -> Self {
        Self {
            title,
            racks,
            selected: 0,
            scroll: 0,
            show_csv: false,
        }
    }

    fn next_rack(&mut self) {
        if self.racks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.racks.len();
        self.scroll = 0;
    }

    fn previous_rack(&mut self) {
        if self.racks.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.racks.len() - 1
        } else {
            self.selected - 1
        };
        self.scroll = 0;
    }

    fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn toggle_csv(&mut self) {
        self.show_csv = !self.show_csv;
    }

    fn current(&self) -> Option<&RackOutput> {
        self.racks.get(self.selected)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(Args { mode, file, output }) = parse_args(&args[1..]) else {
        eprintln!("Usage: {} {USAGE}", args[0]);
        process::exit(1);
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Using config file {}", config_path.display());
            config
        }
        Ok(None) => {
            log::info!("No config file at {}, using defaults", config_path.display());
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let text = match io::read_file(&file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {e}", file.display());
            eprintln!("Usage: {} {USAGE}", args[0]);
            process::exit(1);
        }
    };

    let racks = render_document(&text, &config.parser(), &config.renderer());
    log::info!("Found {} rack block(s) in {}", racks.len(), file.display());
    for rack in &racks {
        for error in rack.parsed.errors() {
            log::warn!("rack {:?}: {}: {:?}", rack.parsed.config.name, error.reason, error.line);
        }
    }

    match mode {
        Mode::Html => {
            let page = html_page(&file, &racks, config.stylesheet.as_deref())?;
            emit(&page, output.as_deref())?;
        }
        Mode::Csv => emit(&csv_exports(&racks), output.as_deref())?,
        Mode::View => view(file_title(&file), racks)?,
    }

    Ok(())
}

fn file_title(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

fn html_page(file: &Path, racks: &[RackOutput], stylesheet: Option<&Path>) -> Result<String> {
    let css = match stylesheet {
        Some(path) => {
            log::info!("Inlining stylesheet {}", path.display());
            Some(io::read_file(path)?)
        }
        None => None,
    };

    let mut writer = HtmlWriter::new();
    let fragments: Vec<String> = racks.iter().map(|rack| writer.rack(rack)).collect();
    Ok(writer.page(&file_title(file), &fragments, css.as_deref()))
}

/// Every rack's CSV export, one after another. Diagnostics go to stderr.
fn csv_exports(racks: &[RackOutput]) -> String {
    let mut csv = String::new();
    for rack in racks {
        let name = &rack.parsed.config.name;
        for error in rack.parsed.errors() {
            eprintln!("{name}: syntax error on line {:?}: {}", error.line, error.reason);
        }
        for warning in &rack.rendered.warnings {
            eprintln!("{name}: {warning}");
        }
        csv.push_str(rack.rendered.csv.as_str());
    }
    csv
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            io::write_file(path, content)?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn view(title: String, racks: Vec<RackOutput>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(title, racks);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Right | KeyCode::Char('l') => app.next_rack(),
                KeyCode::Left | KeyCode::Char('h') => app.previous_rack(),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                KeyCode::Char('c') => app.toggle_csv(),
                _ => {}
            }
        }
    }
}

/// Converts `#rgb` or `#rrggbb` to a terminal color.
fn css_color(css: &str) -> Option<Color> {
    let hex = css.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| d as u8 * 17));
            Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// One line per unit, with syntax errors above and layout warnings below.
fn elevation_lines(rack: &RackOutput) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for error in rack.parsed.errors() {
        lines.push(Line::from(Span::styled(
            format!("Syntax error: {}", error.line),
            Style::default().fg(Color::Red),
        )));
    }
    if rack.parsed.no_data {
        lines.push(Line::from("No data found"));
    }

    let mut span_style = Style::default();
    for row in &rack.rendered.rows {
        match row {
            StructuralRow::Anchor { unit, block } => {
                span_style = Style::default()
                    .bg(css_color(&block.color).unwrap_or(Color::Gray))
                    .fg(Color::Black);
                let mut spans = vec![
                    Span::raw(format!("{unit:>3} ")),
                    Span::styled(
                        format!(" {} ", block.label),
                        span_style.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" {} ", block.name), span_style),
                ];
                if let Some(link) = &block.link {
                    spans.push(Span::styled(
                        format!(" {}", link.url),
                        Style::default().fg(Color::Blue),
                    ));
                }
                if !block.tooltip.is_empty() {
                    spans.push(Span::styled(
                        format!(" {}", block.tooltip),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(spans));
            }
            StructuralRow::Continuation { unit } => lines.push(Line::from(vec![
                Span::raw(format!("{unit:>3} ")),
                Span::styled("   ", span_style),
            ])),
            StructuralRow::Empty { unit } => lines.push(Line::from(vec![
                Span::raw(format!("{unit:>3} ")),
                Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            ])),
            StructuralRow::Title(_) | StructuralRow::Footer => {}
        }
    }

    for warning in &rack.rendered.warnings {
        lines.push(Line::from(Span::styled(
            format!("Warning: {warning}"),
            Style::default().fg(Color::Yellow),
        )));
    }

    lines
}

fn ui(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let constraints = if app.show_csv {
        vec![Constraint::Percentage(55), Constraint::Percentage(45)]
    } else {
        vec![Constraint::Percentage(100)]
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[0]);

    match app.current() {
        Some(rack) => {
            let title = format!(
                "{} | {} ({}/{})",
                app.title,
                rack.parsed.config.name,
                app.selected + 1,
                app.racks.len()
            );
            let elevation = Paragraph::new(elevation_lines(rack))
                .block(Block::default().borders(Borders::ALL).title(title))
                .scroll((app.scroll, 0));
            f.render_widget(elevation, chunks[0]);

            if app.show_csv {
                let csv = Paragraph::new(rack.rendered.csv.to_string())
                    .block(Block::default().borders(Borders::ALL).title("CSV"))
                    .scroll((app.scroll, 0));
                f.render_widget(csv, chunks[1]);
            }
        }
        None => {
            let empty = Paragraph::new("No rack blocks found")
                .block(Block::default().borders(Borders::ALL).title(app.title.as_str()));
            f.render_widget(empty, chunks[0]);
        }
    }

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("←/→: Rack | "),
        Span::raw("↑/↓: Scroll | "),
        Span::raw("c: Toggle CSV"),
    ]));
    f.render_widget(help, rows[1]);
}
