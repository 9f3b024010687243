use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Paragraph, Wrap};

use term_menu::constants::DEFAULT_POLL_INTERVAL_MS;
use term_menu::drivers::ConsoleDriver;
use term_menu::event::Capabilities;
use term_menu::event_loop::{ControlFlow, EventLoop};
use term_menu::gateway::DispatchGateway;
use term_menu::menu::{ContextMenu, MenuItem, MenuServices, MenuWidget};
use term_menu::node::{NodeId, NodeTree, Trigger, TriggerRef};
use term_menu::registry::MenuRegistry;
use term_menu::ui::UiFrame;

const HELP_TEXT: &str = indoc! {"
    Right-click a pane to open its context menu.
    Ctrl+click works everywhere, including emulators
    without right-button reporting.

    Left-click anywhere to dismiss. Press q to quit.
"};

#[derive(Parser, Debug)]
#[command(
    name = "term-menu-demo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Context-menu demo: two panes sharing one menu"
)]
struct Cli {
    /// Force the legacy gesture path (Ctrl+click surrogate) regardless of
    /// what the emulator reports.
    #[arg(long = "legacy-pointer", default_value_t = false)]
    legacy_pointer: bool,

    /// Event-loop poll interval in milliseconds.
    #[arg(long = "poll-ms", value_name = "MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_ms: u64,
}

struct App {
    gateway: DispatchGateway,
    tree: NodeTree,
    registry: MenuRegistry,
    menu: ContextMenu,
    left_pane: NodeId,
    right_pane: NodeId,
    last_target: Option<NodeId>,
}

impl App {
    fn new(caps: Capabilities) -> io::Result<Self> {
        let mut gateway = DispatchGateway::new();
        let mut tree = NodeTree::new();
        let mut registry = MenuRegistry::new();

        let left_pane = tree
            .insert_named("left", Rect::default())
            .map_err(io::Error::other)?;
        let right_pane = tree
            .insert_named("right", Rect::default())
            .map_err(io::Error::other)?;

        let mut services = MenuServices {
            gateway: &mut gateway,
            tree: &mut tree,
            registry: &mut registry,
        };
        let mut menu = ContextMenu::new("Pane", caps, &mut services);
        menu.init(&mut services);
        menu.set_items(vec![
            MenuItem::new("Copy"),
            MenuItem::new("Paste"),
            MenuItem::separator(),
            MenuItem::new("Close pane"),
        ]);
        menu.configure_trigger(
            Some(Trigger::many([
                TriggerRef::Name("left".into()),
                TriggerRef::Name("right".into()),
            ])),
            &mut services,
        );

        Ok(Self {
            gateway,
            tree,
            registry,
            menu,
            left_pane,
            right_pane,
            last_target: None,
        })
    }

    /// Recompute pane node areas for the current frame; returns the help
    /// strip at the bottom.
    fn layout(&mut self, area: Rect) -> Rect {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(8)])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        self.tree.set_area(self.left_pane, panes[0]);
        self.tree.set_area(self.right_pane, panes[1]);
        rows[1]
    }

    fn handle_mouse(&mut self, mouse: &crossterm::event::MouseEvent) {
        let deliveries = self.gateway.dispatch(mouse, &self.tree);
        let mut last_event = None;
        for delivery in &deliveries {
            if self.gateway.propagation_stopped(&delivery.event) {
                break;
            }
            let mut services = MenuServices {
                gateway: &mut self.gateway,
                tree: &mut self.tree,
                registry: &mut self.registry,
            };
            let _ = self
                .menu
                .handle_event(delivery.listener, &delivery.event, &mut services);
            last_event = Some(delivery.event);
        }
        self.last_target = self.menu.context_event_target();

        // A press nobody claimed dismisses whatever is on screen.
        let suppressed = last_event
            .map(|evt| self.gateway.default_suppressed(&evt))
            .unwrap_or(false);
        if !suppressed
            && matches!(
                mouse.kind,
                crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left)
            )
        {
            self.registry.hide_visible();
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help_area = self.layout(frame.area());
        let left = self.tree.area(self.left_pane).unwrap_or_default();
        let right = self.tree.area(self.right_pane).unwrap_or_default();

        let target = match self.last_target {
            Some(id) if id == self.left_pane => "left",
            Some(id) if id == self.right_pane => "right",
            _ => "none",
        };

        frame.render_widget(Block::bordered().title("left"), left);
        frame.render_widget(Block::bordered().title("right"), right);
        frame.render_widget(
            Paragraph::new(format!("{HELP_TEXT}\nLast gesture target: {target}"))
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title("term-menu demo")),
            help_area,
        );

        let mut ui = UiFrame::new(frame);
        self.menu.render(&mut ui);
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    term_menu::tracing_sub::init_default();

    let caps = if cli.legacy_pointer {
        Capabilities::legacy()
    } else {
        Capabilities::detect()
    };
    let mut app = App::new(caps)?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let driver = ConsoleDriver::new();
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(cli.poll_ms));

    let result = event_loop.run(|_, evt| {
        match evt {
            Some(Event::Key(key))
                if key.kind == KeyEventKind::Press
                    && (key.code == KeyCode::Char('q')
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL))) =>
            {
                return Ok(ControlFlow::Quit);
            }
            Some(Event::Mouse(mouse)) => app.handle_mouse(&mouse),
            _ => {}
        }
        terminal
            .draw(|frame| app.render(frame))
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(ControlFlow::Continue)
    });

    terminal::disable_raw_mode()?;
    execute!(
        io::stdout(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;

    result
}
