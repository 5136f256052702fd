//! ars-storage
//!
//! Storage seams used by the dialog engine and the HTTP surface, each a
//! dyn-compatible trait returning boxed futures, plus in-memory
//! implementations that back a single-process deployment and the tests.

pub mod error;
pub mod kv;
pub mod messages;
pub mod patients;
pub mod records;
pub mod state;

use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
