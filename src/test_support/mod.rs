//! Test utilities for imgui-ffigen unit tests.
//!
//! Provides small cimgui metadata documents written to a temporary
//! directory, with a [`Config`](crate::util::config::Config) pointing at them.
//!
//! # Example
//!
//! ```rust,ignore
//! use imgui_ffigen::test_support::MetadataFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = MetadataFixture::minimal().write();
//!     let summary = generate(&fixture.config()).unwrap();
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
