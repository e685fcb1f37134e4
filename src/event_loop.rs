use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// One step of the message pump, stamped with when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Idle frame: run deferred work and redraw.
    Frame(Instant),
    Input(Event, Instant),
}

impl Tick {
    pub fn at(&self) -> Instant {
        match self {
            Tick::Frame(at) | Tick::Input(_, at) => *at,
        }
    }
}

/// Single-threaded UI loop.
///
/// Every iteration hands the handler a `Tick::Frame`, then waits up to the
/// poll interval for input and drains whatever arrived as `Tick::Input`.
/// Pickers hang both their render loop and their pending blur checks off
/// the frame ticks, so the poll interval bounds how late a blur check fires.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Tick) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, Tick::Frame(Instant::now()))? {
                return Ok(());
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (drags) so frames don't fall behind input.
                loop {
                    let event = self.driver.read()?;
                    let tick = Tick::Input(event, Instant::now());
                    if let ControlFlow::Quit = handler(&mut self.driver, tick)? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted {
        events: VecDeque<Event>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("no scripted event"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn frames_interleave_with_drained_input() {
        let driver = Scripted {
            events: VecDeque::from(vec![key('a'), key('b')]),
        };
        let mut ev = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = Vec::new();
        let mut frames = 0;
        ev.run(|_, tick| {
            match tick {
                Tick::Frame(_) => {
                    frames += 1;
                    seen.push("frame".to_string());
                    if frames == 2 {
                        return Ok(ControlFlow::Quit);
                    }
                }
                Tick::Input(Event::Key(k), _) => seen.push(format!("{:?}", k.code)),
                Tick::Input(..) => {}
            }
            Ok(ControlFlow::Continue)
        })
        .unwrap();
        assert_eq!(seen, vec!["frame", "Char('a')", "Char('b')", "frame"]);
    }

    #[test]
    fn quit_from_input_stops_immediately() {
        let driver = Scripted {
            events: VecDeque::from(vec![key('q'), key('x')]),
        };
        let mut ev = EventLoop::new(driver, Duration::from_millis(0));
        let mut inputs = 0;
        ev.run(|_, tick| {
            if let Tick::Input(..) = tick {
                inputs += 1;
                return Ok(ControlFlow::Quit);
            }
            Ok(ControlFlow::Continue)
        })
        .unwrap();
        assert_eq!(inputs, 1);
        assert_eq!(ev.driver().events.len(), 1);
    }

    #[test]
    fn tick_timestamp() {
        let now = Instant::now();
        assert_eq!(Tick::Frame(now).at(), now);
        assert_eq!(Tick::Input(key('a'), now).at(), now);
    }
}
