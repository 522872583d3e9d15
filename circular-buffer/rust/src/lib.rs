//! A fixed capacity ring buffer that retains only the freshest items.
//!
//! Writes into a full [`RingBuffer`] overwrite the oldest unread item instead of
//! failing or blocking, which makes it a good fit for "last N samples" style
//! telemetry, logs and the like. Every operation goes through an internal
//! reader-writer lock, so a buffer can be shared between threads as is.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use circular_buffer::RingBuffer;
//!
//! let rb = Arc::new(RingBuffer::new(3).unwrap());
//!
//! let producer = {
//!     let rb = Arc::clone(&rb);
//!     thread::spawn(move || {
//!         for i in 1..=5 {
//!             rb.put(i);
//!         }
//!     })
//! };
//! producer.join().unwrap();
//!
//! assert_eq!(vec![3, 4, 5], rb.drain());
//! ```

pub mod ring_buffer;

pub use ring_buffer::{RingBuffer, RingBufferError};
