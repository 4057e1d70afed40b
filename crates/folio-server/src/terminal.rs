//! Terminal output over an SSH channel.
//!
//! [`RemoteBackend`] is the ratatui backend for a client's terminal: it writes
//! through crossterm but answers size and cursor queries from what the client
//! reported, since the server's own tty (if any) is unrelated. The bytes land
//! in a [`ChannelWriter`], which hands one chunk per flush to an async task
//! that forwards it to the client as channel data.

use std::{
    io::{self, Write},
    mem,
};

use ratatui::{
    backend::{Backend, ClearType, CrosstermBackend, WindowSize},
    buffer::Cell,
    layout::{Position, Size},
};
use russh::{ChannelId, CryptoVec, server::Handle};
use tokio::sync::mpsc::{self, error::TrySendError};

/// Chunks queued for the client before further output is dropped.
pub const OUTPUT_QUEUE: usize = 32;

/// Synchronous writer feeding an SSH channel.
///
/// The queue towards the channel is bounded. A flush that finds it full
/// discards the chunk and records the loss, so a client that stops reading
/// costs at most [`OUTPUT_QUEUE`] chunks of memory.
#[derive(Debug)]
pub struct ChannelWriter {
    sender: mpsc::Sender<Vec<u8>>,
    buffer: Vec<u8>,
    dropped: bool,
}

impl ChannelWriter {
    /// Create a writer and the receiver its flushed chunks arrive on.
    pub fn new() -> (Self, mpsc::Receiver<Vec<u8>>) {
        let (sender, receiver) = mpsc::channel(OUTPUT_QUEUE);
        (Self { sender, buffer: Vec::new(), dropped: false }, receiver)
    }

    /// Free slots in the output queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    /// Whether output was discarded since the last call.
    pub fn take_dropped(&mut self) -> bool {
        mem::take(&mut self.dropped)
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        match self.sender.try_send(mem::take(&mut self.buffer)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.dropped = true;
                Ok(())
            },
            Err(TrySendError::Closed(_)) => {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "session channel closed"))
            },
        }
    }
}

/// ratatui backend for a terminal on the far side of an SSH channel.
#[derive(Debug)]
pub struct RemoteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    size: Size,
    cursor: Position,
}

impl<W: Write> RemoteBackend<W> {
    /// Backend for a client terminal of `size` (columns, rows).
    pub fn new(writer: W, (width, height): (u16, u16)) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            size: Size { width, height },
            cursor: Position::ORIGIN,
        }
    }

    /// Record a new client terminal size.
    pub fn set_size(&mut self, (width, height): (u16, u16)) {
        self.size = Size { width, height };
    }

    /// Underlying writer.
    pub fn writer(&self) -> &W {
        self.inner.writer()
    }

    /// Underlying writer, mutably.
    pub fn writer_mut(&mut self) -> &mut W {
        self.inner.writer_mut()
    }
}

impl<W: Write> Write for RemoteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}

impl<W: Write> Backend for RemoteBackend<W> {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut last = None;
        let content = content.inspect(|&(x, y, _)| last = Some(Position { x, y }));
        self.inner.draw(content)?;
        if let Some(Position { x, y }) = last {
            self.cursor = Position { x: x.saturating_add(1), y };
        }
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        Ok(self.cursor)
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let position = position.into();
        self.inner.set_cursor_position(position)?;
        self.cursor = position;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize { columns_rows: self.size, pixels: Size { width: 0, height: 0 } })
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

/// Forward flushed chunks to `channel` until the writer is dropped or the
/// client goes away.
pub async fn forward(handle: Handle, channel: ChannelId, mut chunks: mpsc::Receiver<Vec<u8>>) {
    while let Some(chunk) = chunks.recv().await {
        if handle.data(channel, CryptoVec::from_slice(&chunk)).await.is_err() {
            tracing::debug!(?channel, "client stopped reading");
            break;
        }
    }
}
