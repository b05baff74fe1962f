//! scotrack-conn — LMS connection implementations.
//!
//! Implements the `LmsConnection` trait twice: [`MockConnection`] backs
//! tests with call recording, and [`FileConnection`] persists the cmi
//! map as JSON so content can be developed without a host LMS. Both
//! maintain the `_count` elements the way a real LMS does: writing any
//! field of the record at index N makes the count at least N + 1.

mod counts;
pub mod error;
pub mod file;
pub mod mock;

pub use error::StoreError;
pub use file::FileConnection;
pub use mock::MockConnection;
