use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::Event;
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use term_timepicker::components::debug_log::set_global_debug_log;
use term_timepicker::components::{
    Component, ComponentContext, DebugLogComponent, HintBar, TextInputComponent,
};
use term_timepicker::constants::{DEFAULT_FACE, FACE_ATTRIBUTE};
use term_timepicker::drivers::OutputDriver;
use term_timepicker::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_timepicker::event_loop::{ControlFlow, EventLoop, Tick};
use term_timepicker::keybindings::{Action, KeyBindings};
use term_timepicker::{AnchorField, OptionOverrides, PickerError, PickerRegistry, tracing_sub};

const AFTER_HELP: &str = indoc! {"
    Click a field (or Tab into it) to open the clock.
    Inner ring picks the hour, outer ring the minute; arrows step them.
    Enter or [ OK ] writes HH:MM back into the field, Esc or [ Cancel ] closes.
    The End field always uses the 24-hour face via its data-mode attribute.
"};

const FIELD_WIDTH: u16 = 20;
const DEBUG_LOG_HEIGHT: u16 = 8;

#[derive(Parser, Debug)]
#[command(
    name = "term-timepicker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Analog clock time picker attached to terminal text fields",
    after_help = AFTER_HELP
)]
struct DemoCli {
    /// Face id for fields without a data-mode attribute.
    #[arg(long, value_name = "ID", default_value = DEFAULT_FACE)]
    face: String,

    /// Dial and text color.
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,

    /// Canvas background color.
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// Hand and selection color.
    #[arg(long, value_name = "COLOR")]
    highlight: Option<String>,

    /// Initial text of the Start field.
    #[arg(long, value_name = "TEXT", default_value = "")]
    value: String,

    /// Frame interval in milliseconds. Also bounds blur-check latency.
    #[arg(long = "poll-ms", value_name = "MS", default_value_t = 16)]
    poll_ms: u64,
}

impl DemoCli {
    fn poll_interval(&self) -> Result<Duration, String> {
        if !(1..=1000).contains(&self.poll_ms) {
            return Err("poll-ms must be between 1 and 1000".to_string());
        }
        Ok(Duration::from_millis(self.poll_ms))
    }

    fn overrides(&self) -> OptionOverrides {
        let mut overrides = OptionOverrides::new().face(self.face.clone());
        overrides.color = self.color.clone();
        overrides.background = self.background.clone();
        overrides.highlight = self.highlight.clone();
        overrides
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    Start,
    End,
}

impl Field {
    fn area(self) -> Rect {
        match self {
            Field::Start => Rect::new(2, 2, FIELD_WIDTH, 1),
            Field::End => Rect::new(2, 4, FIELD_WIDTH, 1),
        }
    }
}

struct DemoApp {
    pickers: PickerRegistry<Field, TextInputComponent>,
    keys: KeyBindings,
    hints: HintBar,
    debug_log: DebugLogComponent,
    show_debug_log: bool,
}

impl DemoApp {
    fn new(cli: &DemoCli, debug_log: DebugLogComponent) -> Result<Self, PickerError> {
        let keys = KeyBindings::default();
        let mut pickers = PickerRegistry::new()
            .with_defaults(cli.overrides())
            .with_keybindings(keys.clone());
        pickers.attach(
            Field::Start,
            TextInputComponent::new("Start").with_value(cli.value.clone()),
            &HashMap::new(),
        )?;
        let end_attrs = HashMap::from([(FACE_ATTRIBUTE.to_string(), "24".to_string())]);
        pickers.attach(Field::End, TextInputComponent::new("End  "), &end_attrs)?;

        let hints = HintBar::from_bindings(
            &keys,
            &[
                (Action::FocusNext, "next"),
                (Action::PickerAccept, "save"),
                (Action::PickerCancel, "close"),
                (Action::ToggleMeridiem, "am/pm"),
                (Action::ToggleDebugLog, "log"),
                (Action::Quit, "quit"),
            ],
        );
        Ok(Self {
            pickers,
            keys,
            hints,
            debug_log,
            show_debug_log: false,
        })
    }

    fn step<O: OutputDriver>(&mut self, output: &mut O, tick: Tick) -> io::Result<ControlFlow> {
        match tick {
            Tick::Frame(now) => {
                self.draw(output, now)?;
                Ok(ControlFlow::Continue)
            }
            Tick::Input(event, now) => Ok(self.handle_input(&event, now)),
        }
    }

    fn handle_input(&mut self, event: &Event, now: Instant) -> ControlFlow {
        match event {
            Event::Resize(width, height) => {
                self.pickers.resize(Rect::new(0, 0, *width, *height));
            }
            Event::Key(key) => {
                if self.keys.matches(Action::Quit, key) {
                    return ControlFlow::Quit;
                }
                if self.keys.matches(Action::ToggleDebugLog, key) {
                    self.show_debug_log = !self.show_debug_log;
                    return ControlFlow::Continue;
                }
                self.pickers.handle_event_at(event, now);
            }
            Event::Mouse(_) => {
                self.pickers.handle_event_at(event, now);
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn draw<O: OutputDriver>(&mut self, output: &mut O, now: Instant) -> io::Result<()> {
        let area = output.size()?;
        self.pickers.resize(area);
        let status = self
            .pickers
            .iter()
            .find(|(_, p)| p.is_visible())
            .map(|(_, p)| p.time().to_string())
            .unwrap_or_default();
        self.hints.set_status(status);

        output.draw(|mut frame| {
            let ctx = ComponentContext::new(false, now);
            let title = Paragraph::new("term-timepicker demo")
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title, Rect::new(2, 0, area.width.saturating_sub(2), 1));

            for (field, picker) in self.pickers.iter_mut() {
                let focused = picker.anchor().is_focused();
                picker
                    .anchor_mut()
                    .render(&mut frame, field.area(), &ctx.with_focus(focused));
            }

            if area.height > 1 {
                let footer = Rect::new(0, area.height - 1, area.width, 1);
                self.hints.render(&mut frame, footer, &ctx);
                if self.show_debug_log && area.height > DEBUG_LOG_HEIGHT + 1 {
                    let log_area = Rect::new(
                        0,
                        area.height - 1 - DEBUG_LOG_HEIGHT,
                        area.width,
                        DEBUG_LOG_HEIGHT,
                    );
                    self.debug_log.render(&mut frame, log_area, &ctx);
                }
            }

            // Panels float above everything else.
            self.pickers.render_overlays(&mut frame, now);
        })
    }
}

fn main() -> io::Result<()> {
    let cli = DemoCli::parse();
    let poll_interval = cli.poll_interval().map_err(io::Error::other)?;

    let (debug_log, handle) = DebugLogComponent::new_default();
    set_global_debug_log(handle);
    tracing_sub::init_default();

    let mut app = DemoApp::new(&cli, debug_log).map_err(io::Error::other)?;
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;

    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), poll_interval);
    let result = event_loop.run(|_, tick| app.step(&mut output, tick));

    app.pickers.dispose_all();
    output.exit()?;
    result?;

    for (field, picker) in app.pickers.iter() {
        println!("{field:?}: {}", picker.anchor().value());
    }
    Ok(())
}
