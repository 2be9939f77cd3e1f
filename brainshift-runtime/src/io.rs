//! I/O handling
//!
//! `.` and `,` are the only instructions that touch the outside world, and
//! they go through an [`IoAdapter`]. [`BufferedIo`] keeps everything in
//! memory; [`StreamIo`] wraps any reader/writer pair such as stdin/stdout.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};

/// Byte source and sink for a run
pub trait IoAdapter {
    /// Next input byte, or `None` once input is exhausted
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Called once when the run stops
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: IoAdapter + ?Sized> IoAdapter for &mut T {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<T: IoAdapter + ?Sized> IoAdapter for Box<T> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// In-memory input queue and captured output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedIo {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferedIo {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        let input: Vec<u8> = input.into();
        BufferedIo {
            input: input.into(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Input bytes not consumed yet
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }
}

impl IoAdapter for BufferedIo {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}

/// Adapter over a `Read`/`Write` pair
///
/// Reads block until a byte is available or the reader reports end of
/// stream. Pending output is flushed before every read so a prompt is
/// visible while the program waits for its answer.
#[derive(Debug)]
pub struct StreamIo<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamIo<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StreamIo { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> IoAdapter for StreamIo<R, W> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.writer.flush()?;

        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
