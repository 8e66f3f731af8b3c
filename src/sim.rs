use std::{
    sync::mpsc::{Receiver, TryRecvError},
    thread,
    time::Duration,
};

use log::{debug, trace};

use crate::{
    view::{self, HiddenCursor, Terminal},
    Grid, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Stopped,
}

/// a dropped sender counts as a shutdown, otherwise nothing could stop the loop.
fn poll_phase(shutdown: &Receiver<()>) -> Phase {
    match shutdown.try_recv() {
        Err(TryRecvError::Empty) => Phase::Running,
        Ok(()) | Err(TryRecvError::Disconnected) => Phase::Stopped,
    }
}

/// draws and steps the grid every `tick` until `shutdown` fires.
///
/// the cursor stays hidden for the duration of the loop and is shown again on
/// every way out of it. returns the number of generations advanced.
pub fn run<T>(
    grid: &mut Grid,
    terminal: T,
    shutdown: &Receiver<()>,
    tick: Duration,
) -> Result<u64>
where
    T: Terminal,
{
    let mut screen = HiddenCursor::new(terminal)?;
    let mut generation = 0;

    while poll_phase(shutdown) == Phase::Running {
        screen.home()?;
        view::render(grid, &mut *screen)?;
        screen.flush()?;

        grid.advance();
        generation += 1;
        trace!("generation {generation}: {} alive", grid.population());

        thread::sleep(tick);
    }

    debug!("stopped after {generation} generations");
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use std::{io, sync::mpsc};

    use super::*;
    use crate::{pos, view::frame, Error, Pos};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Hide,
        Show,
        Home,
        Write(String),
        Flush,
    }

    /// records every call, optionally requesting a shutdown on the n-th frame.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        frames: usize,
        stop_on_frame: Option<(usize, mpsc::Sender<()>)>,
        broken: bool,
    }

    impl Terminal for Recorder {
        fn hide_cursor(&mut self) -> io::Result<()> {
            self.events.push(Event::Hide);
            Ok(())
        }

        fn show_cursor(&mut self) -> io::Result<()> {
            self.events.push(Event::Show);
            Ok(())
        }

        fn home(&mut self) -> io::Result<()> {
            self.events.push(Event::Home);
            self.frames += 1;
            if let Some((frame, sender)) = &self.stop_on_frame {
                if *frame == self.frames {
                    sender.send(()).unwrap();
                }
            }
            Ok(())
        }

        fn write(&mut self, text: &str) -> io::Result<()> {
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.events.push(Event::Write(text.to_string()));
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.events.push(Event::Flush);
            Ok(())
        }
    }

    fn blinker() -> Grid {
        Grid::from_actives(6, 8, [pos!(1, 2), pos!(2, 2), pos!(3, 2)]).unwrap()
    }

    #[test]
    fn stops_before_first_frame() {
        let (sender, receiver) = mpsc::channel();
        sender.send(()).unwrap();
        let mut grid = blinker();
        let mut recorder = Recorder::default();

        let generations = run(&mut grid, &mut recorder, &receiver, Duration::ZERO).unwrap();

        assert_eq!(generations, 0);
        assert_eq!(grid, blinker());
        assert_eq!(
            recorder.events,
            vec![Event::Hide, Event::Flush, Event::Show, Event::Flush]
        );
    }

    #[test]
    fn renders_then_advances_each_frame() {
        let (sender, receiver) = mpsc::channel();
        let mut grid = blinker();
        let first = frame(&grid);
        let mut stepped = blinker();
        stepped.advance();
        let second = frame(&stepped);
        let mut recorder = Recorder {
            stop_on_frame: Some((2, sender)),
            ..Recorder::default()
        };

        let generations = run(&mut grid, &mut recorder, &receiver, Duration::ZERO).unwrap();

        assert_eq!(generations, 2);
        assert_eq!(grid, blinker());
        assert_eq!(
            recorder.events,
            vec![
                Event::Hide,
                Event::Flush,
                Event::Home,
                Event::Write(first),
                Event::Flush,
                Event::Home,
                Event::Write(second),
                Event::Flush,
                Event::Show,
                Event::Flush,
            ]
        );
    }

    #[test]
    fn disconnected_shutdown_stops() {
        let (sender, receiver) = mpsc::channel::<()>();
        drop(sender);
        let mut grid = blinker();
        let mut recorder = Recorder::default();

        let generations = run(&mut grid, &mut recorder, &receiver, Duration::ZERO).unwrap();
        assert_eq!(generations, 0);
    }

    #[test]
    fn cursor_is_restored_on_write_failure() {
        let (_sender, receiver) = mpsc::channel();
        let mut grid = blinker();
        let mut recorder = Recorder {
            broken: true,
            ..Recorder::default()
        };

        let result = run(&mut grid, &mut recorder, &receiver, Duration::ZERO);

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(grid, blinker());
        assert_eq!(
            recorder.events,
            vec![
                Event::Hide,
                Event::Flush,
                Event::Home,
                Event::Show,
                Event::Flush
            ]
        );
    }
}
