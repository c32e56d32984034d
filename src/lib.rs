//! Loader for line-oriented `KEY=VALUE` configuration files.
//!
//! ```
//! #[derive(Default)]
//! struct Config {
//!     name: String,
//!     number: i64,
//!     vals: Vec<u8>,
//! }
//!
//! knut::record!(Config { "Name" => name, "Number" => number, "Vals" => vals });
//!
//! let mut config = Config::default();
//! knut::load_str("# service\nName=Knut\nNumber=532\nVals=[1, 2, 3]\n", &mut config)?;
//! assert_eq!(config.name, "Knut");
//! assert_eq!(config.number, 532);
//! assert_eq!(config.vals, vec![1, 2, 3]);
//! # Ok::<(), knut::LoadError>(())
//! ```

pub mod coerce;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod field;
pub mod load;

pub use coerce::{coerce, FieldKind, Value};
pub use config::{load_map, parse_lines, parse_str, RawEntry};
pub use dynamic::{DynamicField, DynamicRecord};
pub use error::{CoerceError, LoadError};
pub use field::{Field, FieldDescriptor, FieldSlot, Record};
pub use load::{load, load_async, load_reader, load_str, LoadReport};
