use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::{Handle, Runtime};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use instock::export::{export_products, DirectoryDownloader, XlsxSerializer};
use instock::{events, filter_catalog, ui, App, Exporter, ProductCatalog, Settings};

#[derive(Parser, Debug)]
#[command(name = "instock")]
#[command(about = "Terminal front page for the InStock inventory manager")]
struct Args {
    /// TOML settings file (INSTOCK_* environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial search term
    #[arg(short, long)]
    search: Option<String>,

    /// Export the matching products to a workbook and exit
    #[arg(short, long)]
    export: bool,

    /// Directory exported workbooks are saved into (overrides settings)
    #[arg(short, long)]
    download_dir: Option<PathBuf>,

    /// Log file
    #[arg(long, default_value = "instock.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(dir) = args.download_dir {
        settings.download_dir = dir;
    }

    let catalog = match &settings.catalog {
        Some(path) => ProductCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => ProductCatalog::sample(),
    };
    tracing::info!(products = catalog.len(), "catalog loaded");

    // Handle export mode (non-interactive)
    if args.export {
        return export_to_file(&catalog, args.search.as_deref().unwrap_or(""), &settings.download_dir);
    }

    // Export work runs on this runtime while the UI loop owns the main thread
    let rt = Runtime::new()?;
    run_tui(&settings, catalog, args.search.as_deref(), rt.handle().clone())
}

/// Send logs to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

/// Run the TUI
fn run_tui(
    settings: &Settings,
    catalog: ProductCatalog,
    search: Option<&str>,
    runtime: Handle,
) -> Result<()> {
    let exporter = Exporter::new(
        Arc::new(XlsxSerializer),
        Arc::new(DirectoryDownloader::new(&settings.download_dir)),
        runtime,
    );
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(settings, catalog, exporter, today);
    if let Some(term) = search {
        app.products.set_search(term);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 20;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let top = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, top, area.width, 5.min(area.height));
                frame.render_widget(paragraph, centered);
                app.hit_map.clear();
                return;
            }

            ui::draw(frame, app);
        })?;

        // Short timeout keeps scroll and slide animations moving
        if let Some(event) = events::poll_event(Duration::from_millis(30))? {
            let now = Instant::now();
            match event {
                Event::Key(key) => events::handle_key_event(app, key, now),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, now),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }

    Ok(())
}

/// Export the products matching `search` and print where they were saved
fn export_to_file(catalog: &ProductCatalog, search: &str, download_dir: &Path) -> Result<()> {
    let view = filter_catalog(catalog, search);
    let rows: Vec<_> = view.products(catalog).cloned().collect();
    if rows.is_empty() {
        bail!("No products match {:?}; nothing to export", search);
    }

    let path = export_products(&rows, &XlsxSerializer, &DirectoryDownloader::new(download_dir))?;
    println!("Exported {} products to: {}", rows.len(), path.display());
    Ok(())
}
