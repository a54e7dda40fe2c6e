//! Program interface
//!
//! The program is the tool author's business logic. The engine only needs
//! its option schema, an optional usage line and the `execute` entry point.

use crate::schema::OptionSchema;
use crate::session::Session;

/// A tool built on pawn
pub trait Program: Send + Sync {
    /// Options the tool declares on top of the built-ins
    fn options(&self) -> OptionSchema {
        OptionSchema::new()
    }

    /// Usage line shown in help output
    fn usage(&self) -> Option<String> {
        None
    }

    /// Run the tool with the resolved session
    fn execute(&self, session: &Session) -> anyhow::Result<()>;
}

impl<P: Program + ?Sized> Program for Box<P> {
    fn options(&self) -> OptionSchema {
        (**self).options()
    }

    fn usage(&self) -> Option<String> {
        (**self).usage()
    }

    fn execute(&self, session: &Session) -> anyhow::Result<()> {
        (**self).execute(session)
    }
}
