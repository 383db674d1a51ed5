//! Build preparation utilities for the Adblock Android native library.
//!
//! The Android application embeds libadblockplus, an ad-blocking engine
//! built on the V8 toolchain with a legacy gyp/Makefile build. That build
//! expects its dependencies at fixed locations inside the checkout, and
//! this crate ships the small tools that put them there:
//!
//! - `download-ndk`: fetch and unpack the pinned Android NDK archive
//! - `prepare-deps`: duplicate shared source trees into the libadblockplus
//!   layout
//! - `prepare-build-tools`: copy the vendored SDK and install build-tools
//!   and platform packages
//! - `delete-dir`: remove a directory tree if present
//! - `subproc`: launch a child process with environment and working
//!   directory overrides
//!
//! All tools assume a POSIX host and a checkout rooted at the invocation
//! directory. Each invocation is sequential and all-or-nothing: the first
//! failing step aborts the run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod cli;
pub mod config;
pub mod deps;
pub mod download;
pub mod error;
pub mod fsops;
pub mod layout;
pub mod ndk;
pub mod process;
pub mod sdk;

pub use config::PrepConfig;
pub use error::{PrepError, Result};
pub use layout::Checkout;
