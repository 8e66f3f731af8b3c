use std::{
    io::{self, Write},
    ops::{Deref, DerefMut},
};

use log::warn;

/// the handful of terminal operations the run loop needs.
pub trait Terminal {
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    fn home(&mut self) -> io::Result<()>;
    fn write(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

impl<T> Terminal for &mut T
where
    T: Terminal + ?Sized,
{
    fn hide_cursor(&mut self) -> io::Result<()> {
        (**self).hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        (**self).show_cursor()
    }

    fn home(&mut self) -> io::Result<()> {
        (**self).home()
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// any byte sink, driven with termion's escape sequences.
pub struct TermionTerminal<W>
where
    W: Write,
{
    out: W,
}

impl<W> TermionTerminal<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> Terminal for TermionTerminal<W>
where
    W: Write,
{
    fn hide_cursor(&mut self) -> io::Result<()> {
        write!(self.out, "{}", termion::cursor::Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        write!(self.out, "{}", termion::cursor::Show)
    }

    fn home(&mut self) -> io::Result<()> {
        write!(self.out, "{}", termion::cursor::Goto(1, 1))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// keeps the cursor hidden for as long as it lives.
///
/// the cursor is shown again when the guard drops, which covers early returns
/// through `?` as well as unwinding.
pub struct HiddenCursor<T>
where
    T: Terminal,
{
    terminal: T,
}

impl<T> HiddenCursor<T>
where
    T: Terminal,
{
    pub fn new(mut terminal: T) -> io::Result<Self> {
        terminal.hide_cursor()?;
        terminal.flush()?;
        Ok(Self { terminal })
    }
}

impl<T> Deref for HiddenCursor<T>
where
    T: Terminal,
{
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl<T> DerefMut for HiddenCursor<T>
where
    T: Terminal,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl<T> Drop for HiddenCursor<T>
where
    T: Terminal,
{
    fn drop(&mut self) {
        let restored = self
            .terminal
            .show_cursor()
            .and_then(|_| self.terminal.flush());
        if let Err(error) = restored {
            warn!("could not restore the cursor: {error}");
        }
    }
}
