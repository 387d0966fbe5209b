use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::terminal::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Message pump for the terminal host.
///
/// The handler sees `None` once per iteration (time to redraw) and then
/// every queued event in order. Bursts such as mouse drags are drained in one
/// go so the window follows the pointer without lag.
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

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            loop {
                let event = self.driver.read()?;
                if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn drains_bursts_between_ticks() {
        let events = VecDeque::from(vec![
            Event::FocusGained,
            Event::FocusLost,
            Event::Resize(10, 10),
        ]);
        let mut ev = EventLoop::new(Scripted(events), Duration::ZERO);
        let mut seen = Vec::new();
        ev.run(|_, event| {
            seen.push(event.is_some());
            Ok(match event {
                Some(Event::Resize(..)) => ControlFlow::Quit,
                _ => ControlFlow::Continue,
            })
        })
        .unwrap();
        assert_eq!(seen, vec![false, true, true, true]);
    }

    #[test]
    fn idle_tick_can_quit() {
        let mut ticks = 0;
        let mut ev = EventLoop::new(Scripted(VecDeque::new()), Duration::ZERO);
        ev.run(|_, _| {
            ticks += 1;
            Ok(if ticks == 3 {
                ControlFlow::Quit
            } else {
                ControlFlow::Continue
            })
        })
        .unwrap();
        assert_eq!(ticks, 3);
    }
}
