use std::fmt::{self, Debug, Formatter};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("capacity must be greater than zero, got {0}")]
    InvalidCapacity(usize),
}

type Error = RingBufferError;
type Result<T> = std::result::Result<T, Error>;

/// Fixed capacity FIFO that keeps only the most recent `capacity` items.
///
/// Writes never fail: putting into a full buffer discards the oldest unread item.
/// All state lives behind a single reader-writer lock, so a `RingBuffer<T>` can be
/// shared between threads (e.g. in an `Arc`) and every call is linearizable.
pub struct RingBuffer<T> {
    capacity: usize,
    state: RwLock<State<T>>,
}

struct State<T> {
    storage: Box<[Option<T>]>,
    read_index: usize,
    write_index: usize,
    full: bool,
}

impl<T> RingBuffer<T> {
    /// Allocates a new `RingBuffer<T>` with `capacity` empty slots
    ///
    /// ```
    /// use circular_buffer::{RingBuffer, RingBufferError};
    ///
    /// let rb = RingBuffer::<usize>::new(8).unwrap();
    /// assert_eq!(8, rb.capacity());
    ///
    /// assert_eq!(Err(RingBufferError::InvalidCapacity(0)), RingBuffer::<usize>::new(0).map(|_| ()));
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        let storage = (0..capacity).map(|_| None).collect::<Box<[Option<T>]>>();
        debug!(capacity, "ring buffer allocated");

        Ok(Self {
            capacity,
            state: RwLock::new(State {
                storage,
                read_index: 0,
                write_index: 0,
                full: false,
            }),
        })
    }

    /// Writes `item` at the head, overwriting the oldest unread item if the buffer is full
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let rb = RingBuffer::new(2).unwrap();
    /// rb.put(1);
    /// rb.put(2);
    /// rb.put(3);
    ///
    /// assert_eq!(Some(2), rb.get());
    /// ```
    pub fn put(&self, item: T) {
        let mut state = self.state.write();
        let write_index = state.write_index;
        state.storage[write_index] = Some(item);

        if state.full {
            trace!(index = state.read_index, "overwrote oldest unread item");
            state.read_index = self.advance(state.read_index);
        }

        state.write_index = self.advance(write_index);
        state.full = state.write_index == state.read_index;
    }

    /// Takes the oldest item out of the buffer, or `None` if it is empty
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let rb = RingBuffer::new(4).unwrap();
    /// assert_eq!(None, rb.get());
    ///
    /// rb.put("a");
    /// assert_eq!(Some("a"), rb.get());
    /// ```
    pub fn get(&self) -> Option<T> {
        let mut state = self.state.write();
        self.take_oldest(&mut state)
    }

    /// Logically empties the buffer. Slots are not cleared, stale values are
    /// dropped once they get overwritten by later writes.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.read_index = state.write_index;
        state.full = false;
        debug!(index = state.write_index, "ring buffer reset");
    }

    /// Removes every live item, oldest first, as a single operation
    pub fn drain(&self) -> Vec<T> {
        let mut state = self.state.write();
        let mut items = Vec::with_capacity(Self::live_count(&state, self.capacity));
        while let Some(item) = self.take_oldest(&mut state) {
            items.push(item);
        }

        items
    }

    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        !state.full && state.read_index == state.write_index
    }

    pub fn is_full(&self) -> bool {
        self.state.read().full
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live items, in `0..=capacity`
    pub fn len(&self) -> usize {
        let state = self.state.read();
        Self::live_count(&state, self.capacity)
    }

    fn take_oldest(&self, state: &mut State<T>) -> Option<T> {
        if !state.full && state.read_index == state.write_index {
            return None;
        }

        let read_index = state.read_index;
        let value = state.storage[read_index].take();
        state.full = false;
        state.read_index = self.advance(read_index);

        value
    }

    #[inline(always)]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.capacity {
            0
        } else {
            next
        }
    }

    #[inline(always)]
    fn live_count(state: &State<T>, capacity: usize) -> usize {
        if state.full {
            capacity
        } else if state.write_index >= state.read_index {
            state.write_index - state.read_index
        } else {
            capacity + state.write_index - state.read_index
        }
    }

    fn live_window<'a>(state: &'a State<T>, capacity: usize) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        let len = Self::live_count(state, capacity);
        let read_index = state.read_index;

        (0..len).filter_map(move |offset| {
            let mut index = read_index + offset;
            if index >= capacity {
                index -= capacity;
            }
            state.storage[index].as_ref()
        })
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copies the live items, oldest first, without consuming them
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let rb = RingBuffer::new(3).unwrap();
    /// for i in 1..=5 {
    ///     rb.put(i);
    /// }
    ///
    /// assert_eq!(vec![3, 4, 5], rb.snapshot());
    /// assert_eq!(3, rb.len());
    /// ```
    pub fn snapshot(&self) -> Vec<T> {
        let state = self.state.read();
        Self::live_window(&state, self.capacity).cloned().collect()
    }
}

impl<T: Debug> Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        let items: Vec<&T> = Self::live_window(&state, self.capacity).collect();
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("read_index", &state.read_index)
            .field("write_index", &state.write_index)
            .field("full", &state.full)
            .field("items", &items)
            .finish()
    }
}
