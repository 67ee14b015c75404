//! # logcraft
//!
//! Expands directive comments into logging statements by rewriting the token
//! stream of the captured source.
//!
//! A directive comment names a log level in its prefix and carries the
//! message after it:
//!
//! ```python
//! @log
//! def deploy(target):
//!     #i: deploying to {target}
//!     run(target)
//! ```
//!
//! becomes
//!
//! ```python
//! def deploy(target):
//!     logging.info(f"deploying to {target}")
//!     run(target)
//! ```
//!
//! The transformation is lossless outside the rewritten lines: tokens carry
//! their original text and coordinates, and the reassembler replays them in
//! place. See the [lexing] module for the tokenization pipeline and the
//! [rewriting] module for the passes that consume it.

pub mod config;
pub mod error;
pub mod lexing;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod rewriting;
pub mod testing;
pub mod token;

pub use config::{ConfigError, ExpandConfig};
pub use error::ExpandError;
pub use pipeline::{expand_definition, expand_file, ExpandOptions};
pub use provider::{DeclarationSpan, FileSource, SourceProvider};
pub use registry::{DirectiveKind, DirectiveRegistry};
pub use rewriting::CallBindings;
pub use token::{Position, Token, TokenKind};
