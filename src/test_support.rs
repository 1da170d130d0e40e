use crate::locker::Connector;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// In-memory lock server: records every byte written and replays queued
/// reply bytes. Clones share the same state.
#[derive(Clone, Default)]
pub(crate) struct MockServer {
    state: Rc<RefCell<MockState>>,
}

#[derive(Default)]
struct MockState {
    sent: Vec<u8>,
    replies: VecDeque<u8>,
    connects: usize,
    fail_writes: bool,
    refuse_connect: bool,
}

impl MockServer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue reply bytes for the client to read.
    pub(crate) fn reply(&self, bytes: &[u8]) -> &Self {
        self.state.borrow_mut().replies.extend(bytes.iter().copied());
        self
    }

    /// Bytes written so far, draining the record.
    pub(crate) fn take_sent(&self) -> Vec<u8> {
        std::mem::take(&mut self.state.borrow_mut().sent)
    }

    pub(crate) fn connects(&self) -> usize {
        self.state.borrow().connects
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    pub(crate) fn refuse_connect(&self, refuse: bool) {
        self.state.borrow_mut().refuse_connect = refuse;
    }
}

impl Connector for MockServer {
    type Stream = MockStream;

    fn connect(&self) -> io::Result<MockStream> {
        let mut state = self.state.borrow_mut();
        if state.refuse_connect {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ));
        }
        state.connects += 1;
        Ok(MockStream {
            state: Rc::clone(&self.state),
        })
    }

    fn describe(&self) -> String {
        "mock:4545".to_string()
    }
}

pub(crate) struct MockStream {
    state: Rc<RefCell<MockState>>,
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        }
        state.sent.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let n = buf.len().min(state.replies.len());
        for (slot, byte) in buf.iter_mut().zip(state.replies.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

/// Expected lock frame bytes for `name`.
pub(crate) fn lock_frame(name: &str, sequence: u32, wait_ms: u32, timeout_ms: u32) -> Vec<u8> {
    let mut frame = vec![name.len() as u8];
    frame.extend_from_slice(&sequence.to_le_bytes());
    frame.extend_from_slice(&wait_ms.to_le_bytes());
    frame.extend_from_slice(&timeout_ms.to_le_bytes());
    frame.push(1);
    frame.extend_from_slice(name.as_bytes());
    frame
}

/// Expected unlock frame bytes.
pub(crate) fn unlock_frame(sequence: u32) -> Vec<u8> {
    let mut frame = vec![0];
    frame.extend_from_slice(&sequence.to_le_bytes());
    frame.extend_from_slice(&[0; 8]);
    frame.push(0);
    frame
}
