//! Path handling.
//!
//! Two kinds of paths flow through strata:
//!
//! - **Target paths** are what layers are matched against: relative to the
//!   configuration base, `/`-separated, with no `.` or `..` segments. See
//!   [`normalize_target`].
//! - **Filesystem paths** locate layer documents and base directories. They
//!   are normalized lexically (see [`normalize`]) and converted to target
//!   paths with [`relativize`].
//!
//! ```
//! use strata::path::normalize_target;
//!
//! assert_eq!(normalize_target("src/./util/../index.js").unwrap(), "src/index.js");
//! ```

pub mod normalize;
mod target;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use target::{normalize_target, relativize};
