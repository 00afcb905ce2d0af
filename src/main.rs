#[macro_use]
extern crate tracing;

use std::env;
use std::io::{self, BufRead as _, Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{ensure, Context as _};
use clap::{Parser, Subcommand};
use grout::commands::{Commands, Outcome};
use grout::window::EditorWindow;
use grout_config::Config;
use grout_ipc::{Action, Direction, ResizeMode, WindowLayout};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "grout=info";

const HELP: &str = "\
commands:
  split <dir>    split the active pane (slice or create, see `mode`)
  focus <dir>    move the focus to the neighbor with the longest shared border
  move <dir>     carry the active view to that neighbor
  close          close the active pane, neighbors absorb its area
  grow <dir>     push the pane's border outward by the resize step
  shrink <dir>   pull the opposite border inward
  mode           toggle between slice and create splits
  view           open a new view in the active pane
  dump           print the layout as JSON
  quit           exit

directions: left, up, right, down";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: built-in defaults).
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    subcommand: Option<Sub>,
}

#[derive(Subcommand)]
enum Sub {
    /// Cross-check the config file.
    Validate,
    /// Apply one action to a layout read from stdin.
    ///
    /// The layout comes in as JSON and leaves the same way, so calls chain
    /// in a shell pipeline.
    Apply {
        /// Group the action applies to.
        #[arg(short, long, default_value_t = 0)]
        group: usize,
        #[command(subcommand)]
        action: Action,
    },
}

/// An in-memory window for poking at layouts from a terminal.
struct DemoWindow {
    layout: WindowLayout,
    views: Vec<Vec<String>>,
    active_group: usize,
    active_view: Option<String>,
    next_view: u32,
}

impl DemoWindow {
    fn new() -> Self {
        Self {
            layout: WindowLayout::single_pane(),
            views: vec![vec!["v1".to_owned()]],
            active_group: 0,
            active_view: Some("v1".to_owned()),
            next_view: 2,
        }
    }

    fn from_layout(layout: WindowLayout) -> Self {
        Self {
            views: vec![Vec::new(); layout.cells.len()],
            layout,
            active_group: 0,
            active_view: None,
            next_view: 1,
        }
    }

    fn add_view(&mut self) {
        let name = format!("v{}", self.next_view);
        self.next_view += 1;
        self.views[self.active_group].push(name.clone());
        self.active_view = Some(name);
    }

    fn position_of(&self, view: &str) -> Option<(usize, usize)> {
        self.views.iter().enumerate().find_map(|(group, views)| {
            views
                .iter()
                .position(|hosted| hosted == view)
                .map(|position| (group, position))
        })
    }

    fn sync_focus(&mut self) {
        let hosted = self
            .active_view
            .as_ref()
            .is_some_and(|view| self.views[self.active_group].contains(view));
        if !hosted {
            self.active_view = self.views[self.active_group].first().cloned();
        }
    }
}

impl EditorWindow for DemoWindow {
    type ViewId = String;

    fn layout(&self) -> WindowLayout {
        self.layout.clone()
    }

    fn set_layout(&mut self, layout: WindowLayout) {
        let count = layout.cells.len();
        while self.views.len() < count {
            self.views.push(Vec::new());
        }
        while self.views.len() > count {
            // The command layer re-homes views before shrinking the layout;
            // anything still here keeps living in the last group.
            let mut extra = self.views.pop().unwrap();
            self.views[count - 1].append(&mut extra);
        }

        self.layout = layout;
        if self.active_group >= count {
            self.active_group = count - 1;
        }
        self.sync_focus();
    }

    fn active_group(&self) -> usize {
        self.active_group
    }

    fn active_view(&self) -> Option<String> {
        self.active_view.clone()
    }

    fn views_in_group(&self, group: usize) -> Vec<String> {
        self.views[group].clone()
    }

    fn set_view_index(&mut self, view: &String, group: usize, position: usize) {
        let Some((old_group, old_position)) = self.position_of(view) else {
            return;
        };
        self.views[old_group].remove(old_position);

        let target = &mut self.views[group];
        let position = position.min(target.len());
        target.insert(position, view.clone());

        self.sync_focus();
    }

    fn focus_group(&mut self, group: usize) {
        self.active_group = group;
        self.active_view = self.views[group].first().cloned();
    }

    fn focus_view(&mut self, view: &String) {
        if let Some((group, _)) = self.position_of(view) {
            self.active_group = group;
            self.active_view = Some(view.clone());
        }
    }
}

/// Draws the window on a character canvas, one box per pane.
fn render(window: &DemoWindow) -> String {
    const WIDTH: usize = 61;
    const HEIGHT: usize = 17;

    let layout = window.layout();
    let mut canvas = vec![[' '; WIDTH]; HEIGHT];

    for (group, cell) in layout.cells.iter().enumerate() {
        let x0 = (layout.cols[cell.left] * (WIDTH - 1) as f64).round() as usize;
        let x1 = (layout.cols[cell.right] * (WIDTH - 1) as f64).round() as usize;
        let y0 = (layout.rows[cell.top] * (HEIGHT - 1) as f64).round() as usize;
        let y1 = (layout.rows[cell.bottom] * (HEIGHT - 1) as f64).round() as usize;

        for x in x0..=x1 {
            canvas[y0][x] = '-';
            canvas[y1][x] = '-';
        }
        for row in &mut canvas[y0..=y1] {
            row[x0] = '|';
            row[x1] = '|';
        }
        for (x, y) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            canvas[y][x] = '+';
        }

        if y0 + 1 < y1 {
            let marker = if group == window.active_group() { '*' } else { ' ' };
            let label = format!("{marker}{group} {}", window.views_in_group(group).join(","));
            for (offset, ch) in label.chars().enumerate() {
                let x = x0 + 1 + offset;
                if x < x1 {
                    canvas[y0 + 1][x] = ch;
                }
            }
        }
    }

    let mut out = String::with_capacity((WIDTH + 1) * HEIGHT);
    for row in &canvas {
        out.extend(row.iter());
        out.push('\n');
    }
    out.pop();
    out
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load(path).unwrap_or_else(|err| {
            warn!("error loading config, using defaults: {err:?}");
            Config::default()
        }),
        None => {
            info!("no config given, using defaults");
            Config::default()
        }
    }
}

fn apply(group: usize, action: Action, config: &mut Config) -> anyhow::Result<()> {
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut input)
        .context("error reading the layout from stdin")?;
    let layout: WindowLayout = serde_json::from_str(&input).context("error parsing the layout")?;

    for (index, cell) in layout.cells.iter().enumerate() {
        ensure!(
            cell.left < cell.right && cell.right < layout.cols.len(),
            "cell {index} has columns {}..{} outside the cut sequence",
            cell.left,
            cell.right
        );
        ensure!(
            cell.top < cell.bottom && cell.bottom < layout.rows.len(),
            "cell {index} has rows {}..{} outside the cut sequence",
            cell.top,
            cell.bottom
        );
    }

    let mut window = DemoWindow::from_layout(layout);
    window.active_group = group;

    match Commands::new(&mut window, config).dispatch(action)? {
        Outcome::Applied => {}
        Outcome::Blocked(reason) => warn!("blocked: {reason}"),
        Outcome::ModeChanged(mode) => info!("split mode: {mode}"),
    }
    println!("{}", serde_json::to_string_pretty(&window.layout())?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    match cli.subcommand {
        Some(Sub::Validate) => {
            let path = cli
                .config
                .context("--config <PATH> is required to validate")?;
            if let Err(err) = Config::load(&path) {
                eprintln!("{err:?}");
                process::exit(1);
            }
            println!("Config is valid.");
            return Ok(());
        }
        Some(Sub::Apply { group, action }) => {
            let mut config = load_config(cli.config.as_deref());
            return apply(group, action, &mut config);
        }
        None => {}
    }

    let mut config = load_config(cli.config.as_deref());

    let mut window = DemoWindow::new();
    println!("{}", render(&window));
    println!("type \"help\" for commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            continue;
        };

        let action = match command {
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                println!("{HELP}");
                continue;
            }
            "view" => {
                window.add_view();
                println!("{}", render(&window));
                continue;
            }
            "dump" => {
                println!("{}", serde_json::to_string_pretty(&window.layout())?);
                continue;
            }
            "split" | "focus" | "move" | "grow" | "shrink" => {
                let Some(arg) = tokens.next() else {
                    println!("{command} needs a direction");
                    continue;
                };
                let direction: Direction = match arg.parse() {
                    Ok(direction) => direction,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match command {
                    "split" => Action::Split { direction },
                    "focus" => Action::MoveFocus { direction },
                    "move" => Action::MoveView { direction },
                    "grow" => Action::Resize {
                        mode: ResizeMode::Grow,
                        direction,
                    },
                    _ => Action::Resize {
                        mode: ResizeMode::Shrink,
                        direction,
                    },
                }
            }
            "close" => Action::Close,
            "mode" => Action::ToggleSplitMode,
            other => {
                println!("unknown command {other:?}, try \"help\"");
                continue;
            }
        };

        match Commands::new(&mut window, &mut config).dispatch(action)? {
            Outcome::Applied => println!("{}", render(&window)),
            Outcome::Blocked(reason) => println!("blocked: {reason}"),
            Outcome::ModeChanged(mode) => println!("split mode: {mode}"),
        }
    }

    Ok(())
}
